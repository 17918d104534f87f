use crate::dates::{DateEnd, DateSpan};
use serde::{Deserialize, Serialize};

/// The aggregate output record. Field names on the wire follow the
/// canonical schema: camelCase, `startDate`/`endDate` as `YYYY-MM` strings,
/// empty string for an undetermined value, and `endDate: null` only for an
/// explicitly ongoing position.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub institution: String,
    pub degree: String,
    pub start_date: String,
    /// `Some("")` undetermined, `Some("YYYY-MM")` known, `None` ongoing.
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub description: String,
}

/// Wire encoding of a span: start as string (empty when unknown), end as
/// the Option tri-state described on the entry types.
pub fn date_fields(span: &DateSpan) -> (String, Option<String>) {
    let start = span.start.map(|ym| ym.to_string()).unwrap_or_default();
    let end = match span.end {
        DateEnd::Known(ym) => Some(ym.to_string()),
        DateEnd::Unknown => Some(String::new()),
        DateEnd::Ongoing => None,
    };
    (start, end)
}
