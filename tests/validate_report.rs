use cv_distill::config::Config;
use cv_distill::profile::{EducationEntry, ExperienceEntry, Profile};
use cv_distill::validate::validate;

fn base_profile() -> Profile {
    Profile {
        full_name: "Jane Doe".into(),
        email: "jane@x.com".into(),
        phone: "555-123-4567".into(),
        education: vec![EducationEntry {
            institution: "State University".into(),
            degree: "Bachelor of Science".into(),
            start_date: "2015-01".into(),
            end_date: Some("2019-05".into()),
        }],
        experience: vec![ExperienceEntry {
            title: "Senior Software Engineer".into(),
            company: "Acme Corp".into(),
            start_date: "2019-06".into(),
            end_date: None,
            description: "built things".into(),
        }],
        skills: vec!["python".into()],
    }
}

#[test]
fn complete_profile_passes() {
    let cfg = Config::default();
    let result = validate(&cfg.validation, &base_profile());
    assert!(result.ok, "unexpected gaps: {:?}", result.missing);
}

#[test]
fn accumulates_every_gap() {
    let cfg = Config::default();
    let mut profile = base_profile();
    profile.email.clear();
    profile.experience[0].company.clear();

    let result = validate(&cfg.validation, &profile);
    assert!(!result.ok);
    assert!(result.missing.contains(&"email".to_string()));
    assert!(result.missing.contains(&"experience[0].company".to_string()));
    assert_eq!(result.missing.len(), 2);
}

#[test]
fn empty_sections_are_reported() {
    let cfg = Config::default();
    let mut profile = base_profile();
    profile.education.clear();
    profile.skills.clear();

    let result = validate(&cfg.validation, &profile);
    assert!(result.missing.contains(&"education".to_string()));
    assert!(result.missing.contains(&"skills".to_string()));
}

#[test]
fn ongoing_end_date_is_not_a_gap() {
    let cfg = Config::default();
    let mut profile = base_profile();
    // Ongoing (None) is an explicit state, not a missing field.
    profile.experience[0].end_date = None;
    let result = validate(&cfg.validation, &profile);
    assert!(result.ok);
}

#[test]
fn reversed_dates_flag_the_span() {
    let cfg = Config::default();
    let mut profile = base_profile();
    profile.experience[0].start_date = "2020-01".into();
    profile.experience[0].end_date = Some("2019-01".into());

    let result = validate(&cfg.validation, &profile);
    assert!(result
        .missing
        .contains(&"experience[0].dateSpan".to_string()));
}

#[test]
fn required_fields_come_from_config() {
    let mut cfg = Config::default();
    cfg.validation.required_personal = vec!["fullName".into()];
    cfg.validation.required_sections.clear();
    cfg.validation.required_education.clear();
    cfg.validation.required_experience.clear();

    let mut profile = base_profile();
    profile.email.clear();
    profile.phone.clear();

    let result = validate(&cfg.validation, &profile);
    assert!(result.ok, "only fullName is required: {:?}", result.missing);
}
