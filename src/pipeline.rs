use crate::{
    assemble,
    config::Config,
    extract::{Candidate, CandidateKind, Matchers},
    profile::Profile,
    report::{InputInfo, ParseReport, SectionCounts},
    sections::{self, SectionTag},
    util::{now_rfc3339, sha256_hex},
    validate,
    validate::ValidationResult,
};
use std::collections::BTreeMap;
use tracing::{debug, info};
use unicode_normalization::UnicodeNormalization;

pub struct Pipeline<'m> {
    cfg: Config,
    matchers: &'m Matchers,
}

pub struct ParseOutput {
    pub profile: Profile,
    pub validation: ValidationResult,
    pub report: ParseReport,
}

impl<'m> Pipeline<'m> {
    pub fn new(cfg: &Config, matchers: &'m Matchers) -> Self {
        Self {
            cfg: cfg.clone(),
            matchers,
        }
    }

    /// One extraction run: a pure function of the input text. Field-level
    /// gaps degrade to emptiness; nothing in here fails.
    pub fn run(&self, source_label: &str, raw: &str) -> ParseOutput {
        let started = now_rfc3339();

        let text = preprocess(raw);
        let lines = sections::classify_lines(&self.cfg.vocab, &text);
        let blocks = sections::section_blocks(&lines, text.len());

        let mut candidates: Vec<Candidate> = Vec::new();
        if let Some(name) = self.matchers.name_candidate(&text) {
            candidates.push(name);
        }
        candidates.extend(self.matchers.document_candidates(&lines, &blocks));

        info!(
            "classified lines={} blocks={} candidates={}",
            lines.len(),
            blocks.len(),
            candidates.len()
        );
        debug!(?blocks, "section blocks");

        let assembled = assemble::assemble(&text, &blocks, &candidates);

        let profile = Profile {
            full_name: self.matchers.extract_name(&text),
            email: first_of(&candidates, CandidateKind::Email),
            phone: first_of(&candidates, CandidateKind::Phone),
            education: assembled.education,
            experience: assembled.experience,
            skills: self.matchers.extract_skills(&text),
        };

        let validation = validate::validate(&self.cfg.validation, &profile);
        if !validation.ok {
            info!("validation gaps: {}", validation.missing.join(", "));
        }

        let report = ParseReport {
            input: InputInfo {
                source: source_label.to_string(),
                text_sha256: sha256_hex(text.as_bytes()),
                config_sha256: sha256_hex(self.cfg.normalized_for_hash().as_bytes()),
                text_chars: text.chars().count(),
                lines: lines.len(),
            },
            started,
            finished: now_rfc3339(),
            sections: section_counts(&lines),
            candidates: candidate_counts(&candidates),
            warnings: assembled.warnings,
            validation: validation.clone(),
        };

        ParseOutput {
            profile,
            validation,
            report,
        }
    }
}

/// Newline and NFKC normalization before any pattern matching, so the
/// rules see one canonical text form regardless of source encoding quirks.
fn preprocess(raw: &str) -> String {
    raw.replace("\r\n", "\n").nfkc().collect()
}

fn first_of(candidates: &[Candidate], kind: CandidateKind) -> String {
    candidates
        .iter()
        .find(|c| c.kind == kind)
        .map(|c| c.text.clone())
        .unwrap_or_default()
}

fn section_counts(lines: &[sections::ClassifiedLine]) -> SectionCounts {
    let mut counts = SectionCounts::default();
    for line in lines {
        match line.tag {
            SectionTag::Education => counts.education += 1,
            SectionTag::Experience => counts.experience += 1,
            SectionTag::Skills => counts.skills += 1,
            SectionTag::Contact => counts.contact += 1,
            SectionTag::Unknown => counts.unknown += 1,
        }
    }
    counts
}

fn candidate_counts(candidates: &[Candidate]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for c in candidates {
        *counts.entry(kind_label(c.kind).to_string()).or_insert(0) += 1;
    }
    counts
}

fn kind_label(kind: CandidateKind) -> &'static str {
    match kind {
        CandidateKind::Name => "NAME",
        CandidateKind::Email => "EMAIL",
        CandidateKind::Phone => "PHONE",
        CandidateKind::Institution => "INSTITUTION",
        CandidateKind::Degree => "DEGREE",
        CandidateKind::Title => "TITLE",
        CandidateKind::Company => "COMPANY",
        CandidateKind::DateSpan => "DATE_SPAN",
    }
}
