use crate::config::Config;
use crate::sections::{effective_tag, ClassifiedLine, SectionBlock, SectionTag};
use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CandidateKind {
    Name,
    Email,
    Phone,
    Institution,
    Degree,
    Title,
    Company,
    DateSpan,
}

/// A span of source text tentatively identified as one structured field.
/// `position` is the byte offset of the span in the full document.
#[derive(Debug, Clone, Serialize)]
pub struct Candidate {
    pub kind: CandidateKind,
    pub text: String,
    pub position: usize,
}

const MONTHS_PATTERN: &str = "jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|jun(?:e)?\
|jul(?:y)?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?";

/// Compiled pattern rules plus the skill vocabulary. Built once from config
/// and shared read-only across extraction runs; holds no mutable state.
pub struct Matchers {
    email: Regex,
    phone: Regex,
    date_range: Regex,
    institution: Regex,
    degree: Regex,
    title: Regex,
    company: Regex,
    skills: Vec<String>,
}

impl Matchers {
    pub fn new(cfg: &Config) -> Result<Self> {
        let date_range = format!(
            r"(?i)\b(?:{m})\.?\s+\d{{4}}\s*(?:[-\u{{2013}}\u{{2014}}]|to|until)\s*(?:present|current|now|(?:{m})\.?\s*\d{{0,4}})",
            m = MONTHS_PATTERN
        );

        Ok(Self {
            email: compile(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}")?,
            phone: compile(r"\b\d{3}[-.\s]?\d{3}[-.\s]?\d{4}\b")?,
            date_range: compile(&date_range)?,
            institution: compile(
                r"(?:[A-Z][A-Za-z&.'-]*\s+){0,4}(?:[Uu]niversity|[Cc]ollege|[Ss]chool|[Ii]nstitute)\b(?:\s+(?:of|for)\s+[A-Z][A-Za-z'&-]*)*",
            )?,
            degree: compile(
                r"(?i)\b(?:bachelor|master|doctorate|phd|mba|bs|ms|ba|ma)\b[^,\n]*",
            )?,
            title: compile(
                r"(?i)\b(?:(?:senior|junior|lead|principal|staff)\s+)?(?:(?:software|frontend|backend|full[ -]?stack|data|product|project|program|web|mobile|cloud|devops|qa|test)\s+)?(?:developer|engineer|architect|manager|analyst|designer|consultant|specialist)\b",
            )?,
            company: compile(r"\b(?i:at|with|for)\s+([^,\n]+)")?,
            skills: cfg
                .vocab
                .skills
                .iter()
                .map(|s| s.to_lowercase())
                .collect(),
        })
    }

    /// Candidates for every line of a classified document. Section-specific
    /// rules fire for the line's effective (block-derived) tag; when the
    /// document has no recognizable section structure at all, they run on
    /// every line instead, so extraction still degrades gracefully.
    pub fn document_candidates(
        &self,
        lines: &[ClassifiedLine],
        blocks: &[SectionBlock],
    ) -> Vec<Candidate> {
        let mut out = Vec::new();
        for line in lines {
            if blocks.is_empty() {
                out.extend(self.line_candidates(&line.text, line.offset, true, true));
            } else {
                let tag = effective_tag(blocks, line);
                out.extend(self.candidates_for_line(&line.text, line.offset, tag));
            }
        }
        out
    }

    /// All candidates found on one line. Email, phone, and date-range rules
    /// run on every line regardless of tag, since those details can appear
    /// anywhere; the section-specific rules only fire for their tag.
    pub fn candidates_for_line(
        &self,
        line: &str,
        offset: usize,
        tag: SectionTag,
    ) -> Vec<Candidate> {
        self.line_candidates(
            line,
            offset,
            tag == SectionTag::Education,
            tag == SectionTag::Experience,
        )
    }

    fn line_candidates(
        &self,
        line: &str,
        offset: usize,
        education_rules: bool,
        experience_rules: bool,
    ) -> Vec<Candidate> {
        let mut out = Vec::new();

        for m in self.email.find_iter(line) {
            out.push(candidate(CandidateKind::Email, m.as_str(), offset + m.start()));
        }
        for m in self.phone.find_iter(line) {
            out.push(candidate(CandidateKind::Phone, m.as_str(), offset + m.start()));
        }
        for m in self.date_range.find_iter(line) {
            out.push(candidate(
                CandidateKind::DateSpan,
                m.as_str(),
                offset + m.start(),
            ));
        }

        if education_rules {
            if let Some(m) = self.institution.find(line) {
                out.push(candidate(
                    CandidateKind::Institution,
                    m.as_str(),
                    offset + m.start(),
                ));
            }
            if let Some(m) = self.degree.find(line) {
                out.push(candidate(
                    CandidateKind::Degree,
                    self.trim_before_date(m.as_str()),
                    offset + m.start(),
                ));
            }
        }
        if experience_rules {
            if let Some(m) = self.title.find(line) {
                out.push(candidate(CandidateKind::Title, m.as_str(), offset + m.start()));
            }
            if let Some(caps) = self.company.captures(line) {
                if let Some(g) = caps.get(1) {
                    out.push(candidate(
                        CandidateKind::Company,
                        self.trim_before_date(g.as_str()),
                        offset + g.start(),
                    ));
                }
            }
        }

        out.sort_by_key(|c| c.position);
        out
    }

    /// First-line name heuristic: run the person-name rule over the first
    /// non-empty line, and fall back to that line verbatim when it does not
    /// look like a name. Also surfaced as a NAME candidate by the pipeline.
    pub fn extract_name(&self, text: &str) -> String {
        let Some(line) = text.lines().map(str::trim).find(|l| !l.is_empty()) else {
            return String::new();
        };
        person_name(line).unwrap_or_else(|| line.to_string())
    }

    pub fn name_candidate(&self, text: &str) -> Option<Candidate> {
        let mut offset = 0usize;
        for line in text.split('\n') {
            if !line.trim().is_empty() {
                let name = self.extract_name(text);
                if name.is_empty() {
                    return None;
                }
                return Some(Candidate {
                    kind: CandidateKind::Name,
                    text: name,
                    position: offset,
                });
            }
            offset += line.len() + 1;
        }
        None
    }

    /// Exact-vocabulary skill hits over the whole document, lowercase,
    /// deduplicated, sorted. Occurrences inside a longer word do not count,
    /// so "javascript" never yields "java".
    pub fn extract_skills(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        let mut found = BTreeSet::new();

        for skill in &self.skills {
            if skill.is_empty() {
                continue;
            }
            if contains_bounded(&lower, skill) {
                found.insert(skill.clone());
            }
        }

        found.into_iter().collect()
    }

    /// Cut a trailing clause short where a date range begins, so "Bachelor
    /// of Science Jan 2015 - May 2019" yields just the degree text.
    fn trim_before_date<'a>(&self, s: &'a str) -> &'a str {
        match self.date_range.find(s) {
            Some(m) => s[..m.start()].trim(),
            None => s.trim(),
        }
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).with_context(|| format!("compiling pattern: {pattern}"))
}

fn candidate(kind: CandidateKind, text: &str, position: usize) -> Candidate {
    Candidate {
        kind,
        text: text.trim().to_string(),
        position,
    }
}

/// Rule-based person-name check: two to four capitalized alphabetic words,
/// no digits or address characters. Stands in for a model-backed tagger
/// behind the same seam.
fn person_name(line: &str) -> Option<String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    if !(2..=4).contains(&words.len()) {
        return None;
    }
    for w in &words {
        let mut chars = w.chars();
        let first = chars.next()?;
        if !first.is_uppercase() || !first.is_alphabetic() {
            return None;
        }
        if !chars.all(|c| c.is_alphabetic() || matches!(c, '.' | '-' | '\'')) {
            return None;
        }
    }
    Some(words.join(" "))
}

/// Substring containment with non-alphanumeric boundaries on both sides.
fn contains_bounded(haystack: &str, needle: &str) -> bool {
    for (pos, _) in haystack.match_indices(needle) {
        let before_ok = haystack[..pos]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_ascii_alphanumeric());
        let after_ok = haystack[pos + needle.len()..]
            .chars()
            .next()
            .is_none_or(|c| !c.is_ascii_alphanumeric());
        if before_ok && after_ok {
            return true;
        }
    }
    false
}
