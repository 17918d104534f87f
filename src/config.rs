use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub vocab: Vocab,
    #[serde(default)]
    pub limits: Limits,
    #[serde(default)]
    pub output: Output,
    #[serde(default)]
    pub validation: Validation,
    #[serde(default)]
    pub logging: Logging,
    #[serde(default)]
    pub security: Security,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config: {}", path.display()))?;
        let cfg: Config = toml::from_str(&raw).with_context(|| "parsing TOML")?;
        Ok(cfg)
    }

    /// A stable, normalization-friendly string for hashing.
    pub fn normalized_for_hash(&self) -> String {
        toml::to_string(self).unwrap_or_default()
    }
}

/// Keyword vocabularies driving section classification and skill matching.
/// Swapping these changes what the pipeline recognizes without code
/// changes; the defaults are the stock résumé vocabularies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vocab {
    pub education_keywords: Vec<String>,
    pub experience_keywords: Vec<String>,
    pub skills_keywords: Vec<String>,
    /// A line with at least this many digits counts as a contact marker.
    pub min_contact_digits: u32,
    pub skills: Vec<String>,
}

impl Default for Vocab {
    fn default() -> Self {
        Self {
            education_keywords: strs(&[
                "education", "academic", "degree", "university", "college", "school",
            ]),
            experience_keywords: strs(&[
                "experience",
                "employment",
                "work",
                "professional",
                "career",
            ]),
            skills_keywords: strs(&[
                "skills",
                "technologies",
                "technical",
                "competencies",
                "proficiencies",
            ]),
            min_contact_digits: 10,
            skills: strs(&[
                "python",
                "java",
                "javascript",
                "typescript",
                "c++",
                "c#",
                "ruby",
                "php",
                "swift",
                "kotlin",
                "react",
                "angular",
                "vue",
                "node.js",
                "express",
                "django",
                "flask",
                "spring",
                "asp.net",
                "html",
                "css",
                "sass",
                "less",
                "bootstrap",
                "tailwind",
                "material-ui",
                "sql",
                "mysql",
                "postgresql",
                "mongodb",
                "oracle",
                "sqlite",
                "nosql",
                "aws",
                "azure",
                "gcp",
                "docker",
                "kubernetes",
                "jenkins",
                "ci/cd",
                "git",
                "svn",
                "github",
                "gitlab",
                "bitbucket",
                "agile",
                "scrum",
                "kanban",
                "jira",
                "confluence",
                "machine learning",
                "ai",
                "data science",
                "tensorflow",
                "pytorch",
                "scikit-learn",
                "rest api",
                "graphql",
                "microservices",
                "serverless",
            ]),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Limits {
    pub max_input_bytes: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_input_bytes: 16 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Output {
    pub pretty: bool,
    pub write_report_json: bool,
    pub report_filename: String,
}

impl Default for Output {
    fn default() -> Self {
        Self {
            pretty: true,
            write_report_json: false,
            report_filename: "report.json".into(),
        }
    }
}

/// Required-field schema. Unknown field names are ignored so a vocabulary
/// typo cannot make validation unsatisfiable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Validation {
    pub required_personal: Vec<String>,
    pub required_sections: Vec<String>,
    pub required_education: Vec<String>,
    pub required_experience: Vec<String>,
    /// When true, the `validate` subcommand exits nonzero on missing
    /// fields. Parsing itself never fails on gaps.
    pub strict: bool,
}

impl Default for Validation {
    fn default() -> Self {
        Self {
            required_personal: strs(&["fullName", "email", "phone"]),
            required_sections: strs(&["education", "experience", "skills"]),
            required_education: strs(&["institution", "degree", "startDate"]),
            required_experience: strs(&["title", "company", "startDate"]),
            strict: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logging {
    pub level: String,
    pub json: bool,
    pub write_to_file: bool,
    pub file_path: String,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "info".into(),
            json: false,
            write_to_file: false,
            file_path: "".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Security {
    pub reject_url_inputs: bool,
}

impl Default for Security {
    fn default() -> Self {
        Self {
            reject_url_inputs: true,
        }
    }
}

fn strs(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
