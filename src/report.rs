use crate::validate::ValidationResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseReport {
    pub input: InputInfo,
    pub started: String,
    pub finished: String,
    pub sections: SectionCounts,
    /// Candidate counts per kind, document-wide.
    pub candidates: BTreeMap<String, usize>,
    pub warnings: Vec<String>,
    pub validation: ValidationResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    pub source: String,
    pub text_sha256: String,
    /// Hash of the effective config, so two reports are comparable only
    /// when the vocabularies and rules behind them match.
    pub config_sha256: String,
    pub text_chars: usize,
    pub lines: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SectionCounts {
    pub education: usize,
    pub experience: usize,
    pub skills: usize,
    pub contact: usize,
    pub unknown: usize,
}
