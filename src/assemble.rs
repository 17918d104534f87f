use crate::dates::{self, DateSpan};
use crate::extract::{Candidate, CandidateKind};
use crate::profile::{date_fields, EducationEntry, ExperienceEntry};
use crate::sections::{SectionBlock, SectionTag};
use tracing::debug;

pub struct Assembled {
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub warnings: Vec<String>,
}

/// Group candidates into entries. Candidates are bucketed into the section
/// block their position falls in, and paired by index within that block, so
/// entries in one section never steal fields from another. A document with
/// no recognizable education/experience blocks falls back to index-pairing
/// over the global candidate lists. In both modes the pairing is padded to
/// the longest field list with empty fields; a detected entry is never
/// dropped because a sibling field is missing.
pub fn assemble(text: &str, blocks: &[SectionBlock], candidates: &[Candidate]) -> Assembled {
    let mut education = Vec::new();
    let mut experience = Vec::new();
    let mut warnings = Vec::new();

    let edu_blocks: Vec<&SectionBlock> = blocks
        .iter()
        .filter(|b| b.tag == SectionTag::Education)
        .collect();
    let exp_blocks: Vec<&SectionBlock> = blocks
        .iter()
        .filter(|b| b.tag == SectionTag::Experience)
        .collect();

    if edu_blocks.is_empty() && exp_blocks.is_empty() {
        debug!("no section blocks detected; falling back to global pairing");
        assemble_global(text, candidates, &mut education, &mut experience);
    } else {
        for block in &edu_blocks {
            let inst = in_block(candidates, block, CandidateKind::Institution);
            let deg = in_block(candidates, block, CandidateKind::Degree);
            let dates = in_block(candidates, block, CandidateKind::DateSpan);
            education.extend(education_entries(&inst, &deg, &dates));
        }
        for block in &exp_blocks {
            let titles = in_block(candidates, block, CandidateKind::Title);
            let companies = in_block(candidates, block, CandidateKind::Company);
            let dates = in_block(candidates, block, CandidateKind::DateSpan);
            experience.extend(experience_entries(
                text,
                &titles,
                &companies,
                &dates,
                block.end,
            ));
        }
    }

    for (i, e) in education.iter().enumerate() {
        if is_reversed(&e.start_date, &e.end_date) {
            warnings.push(format!("education[{i}]: end date precedes start date"));
        }
    }
    for (i, e) in experience.iter().enumerate() {
        if is_reversed(&e.start_date, &e.end_date) {
            warnings.push(format!("experience[{i}]: end date precedes start date"));
        }
    }

    Assembled {
        education,
        experience,
        warnings,
    }
}

fn assemble_global(
    text: &str,
    candidates: &[Candidate],
    education: &mut Vec<EducationEntry>,
    experience: &mut Vec<ExperienceEntry>,
) {
    let inst = of_kind(candidates, CandidateKind::Institution);
    let deg = of_kind(candidates, CandidateKind::Degree);
    let titles = of_kind(candidates, CandidateKind::Title);
    let companies = of_kind(candidates, CandidateKind::Company);
    let dates = of_kind(candidates, CandidateKind::DateSpan);

    education.extend(education_entries(&inst, &deg, &dates));
    experience.extend(experience_entries(
        text,
        &titles,
        &companies,
        &dates,
        text.len(),
    ));
}

fn education_entries(
    inst: &[&Candidate],
    deg: &[&Candidate],
    dates: &[&Candidate],
) -> Vec<EducationEntry> {
    let n = inst.len().max(deg.len());
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let span = span_at(dates, i);
        let (start_date, end_date) = date_fields(&span);
        out.push(EducationEntry {
            institution: text_at(inst, i),
            degree: text_at(deg, i),
            start_date,
            end_date,
        });
    }
    out
}

fn experience_entries(
    text: &str,
    titles: &[&Candidate],
    companies: &[&Candidate],
    dates: &[&Candidate],
    slice_end: usize,
) -> Vec<ExperienceEntry> {
    let n = titles.len().max(companies.len());
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let span = span_at(dates, i);
        let (start_date, end_date) = date_fields(&span);
        out.push(ExperienceEntry {
            title: text_at(titles, i),
            company: text_at(companies, i),
            start_date,
            end_date,
            description: description_slice(text, titles, i, slice_end),
        });
    }
    out
}

/// The raw text from this entry's title to the next entry's title, or to
/// the end of the section for the last entry.
fn description_slice(text: &str, titles: &[&Candidate], i: usize, slice_end: usize) -> String {
    let Some(title) = titles.get(i) else {
        return String::new();
    };
    let start = title.position.min(text.len());
    let end = titles
        .get(i + 1)
        .map(|t| t.position)
        .unwrap_or(slice_end)
        .clamp(start, text.len());
    text[start..end].trim().to_string()
}

fn in_block<'a>(
    candidates: &'a [Candidate],
    block: &SectionBlock,
    kind: CandidateKind,
) -> Vec<&'a Candidate> {
    candidates
        .iter()
        .filter(|c| c.kind == kind && block.contains(c.position))
        .collect()
}

fn of_kind(candidates: &[Candidate], kind: CandidateKind) -> Vec<&Candidate> {
    candidates.iter().filter(|c| c.kind == kind).collect()
}

fn text_at(list: &[&Candidate], i: usize) -> String {
    list.get(i).map(|c| c.text.clone()).unwrap_or_default()
}

fn span_at(dates: &[&Candidate], i: usize) -> DateSpan {
    dates
        .get(i)
        .map(|c| dates::normalize(&c.text))
        .unwrap_or_else(DateSpan::empty)
}

/// Lexical compare works for zero-padded YYYY-MM strings. Only flags when
/// both sides are concrete dates.
fn is_reversed(start: &str, end: &Option<String>) -> bool {
    match end {
        Some(e) if !e.is_empty() && !start.is_empty() => e.as_str() < start,
        _ => false,
    }
}
