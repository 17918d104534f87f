use crate::config::Validation;
use crate::profile::Profile;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub ok: bool,
    pub missing: Vec<String>,
}

/// Check a profile against the required-field schema. Accumulates every
/// missing field path instead of stopping at the first, so one pass
/// reports all problems. Field lists come from `[validation]` config.
pub fn validate(cfg: &Validation, profile: &Profile) -> ValidationResult {
    let mut missing = Vec::new();

    for field in &cfg.required_personal {
        let empty = match field.as_str() {
            "fullName" => profile.full_name.is_empty(),
            "email" => profile.email.is_empty(),
            "phone" => profile.phone.is_empty(),
            _ => false,
        };
        if empty {
            missing.push(field.clone());
        }
    }

    for section in &cfg.required_sections {
        let empty = match section.as_str() {
            "education" => profile.education.is_empty(),
            "experience" => profile.experience.is_empty(),
            "skills" => profile.skills.is_empty(),
            _ => false,
        };
        if empty {
            missing.push(section.clone());
        }
    }

    for (i, entry) in profile.education.iter().enumerate() {
        for field in &cfg.required_education {
            let empty = match field.as_str() {
                "institution" => entry.institution.is_empty(),
                "degree" => entry.degree.is_empty(),
                "startDate" => entry.start_date.is_empty(),
                "endDate" => matches!(&entry.end_date, Some(e) if e.is_empty()),
                _ => false,
            };
            if empty {
                missing.push(format!("education[{i}].{field}"));
            }
        }
        if date_reversed(&entry.start_date, &entry.end_date) {
            missing.push(format!("education[{i}].dateSpan"));
        }
    }

    for (i, entry) in profile.experience.iter().enumerate() {
        for field in &cfg.required_experience {
            let empty = match field.as_str() {
                "title" => entry.title.is_empty(),
                "company" => entry.company.is_empty(),
                "startDate" => entry.start_date.is_empty(),
                "endDate" => matches!(&entry.end_date, Some(e) if e.is_empty()),
                "description" => entry.description.is_empty(),
                _ => false,
            };
            if empty {
                missing.push(format!("experience[{i}].{field}"));
            }
        }
        if date_reversed(&entry.start_date, &entry.end_date) {
            missing.push(format!("experience[{i}].dateSpan"));
        }
    }

    ValidationResult {
        ok: missing.is_empty(),
        missing,
    }
}

fn date_reversed(start: &str, end: &Option<String>) -> bool {
    match end {
        Some(e) if !e.is_empty() && !start.is_empty() => e.as_str() < start,
        _ => false,
    }
}
