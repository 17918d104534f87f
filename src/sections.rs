use crate::config::Vocab;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SectionTag {
    Education,
    Experience,
    Skills,
    Contact,
    Unknown,
}

/// One source line with its byte offset into the document and the tag the
/// classifier assigned to it on its own, independent of neighbors.
#[derive(Debug, Clone, Serialize)]
pub struct ClassifiedLine {
    pub text: String,
    pub offset: usize,
    pub tag: SectionTag,
}

/// A contiguous byte range of the document attributed to one section,
/// derived downstream of the per-line classification.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SectionBlock {
    pub tag: SectionTag,
    pub start: usize,
    pub end: usize,
}

impl SectionBlock {
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }
}

/// Classify a single line. Stateless: the same line always gets the same
/// tag, regardless of surrounding lines. Vocabulary priority order is
/// education > experience > skills > contact markers.
pub fn classify_line(vocab: &Vocab, line: &str) -> SectionTag {
    let lower = line.to_lowercase();

    if has_keyword(&vocab.education_keywords, &lower) {
        return SectionTag::Education;
    }
    if has_keyword(&vocab.experience_keywords, &lower) {
        return SectionTag::Experience;
    }
    if has_keyword(&vocab.skills_keywords, &lower) {
        return SectionTag::Skills;
    }
    if looks_like_contact(vocab, &lower) {
        return SectionTag::Contact;
    }
    SectionTag::Unknown
}

/// Classify every line of the document, carrying byte offsets so downstream
/// stages can map candidates back into section blocks.
pub fn classify_lines(vocab: &Vocab, text: &str) -> Vec<ClassifiedLine> {
    let mut out = Vec::new();
    let mut offset = 0usize;

    for line in text.split('\n') {
        out.push(ClassifiedLine {
            text: line.to_string(),
            offset,
            tag: classify_line(vocab, line),
        });
        offset += line.len() + 1;
    }

    out
}

/// Group classified lines into section blocks. A line tagged education,
/// experience, or skills opens a block of that kind; the block runs until
/// the next line that opens a different one. Contact and unknown lines
/// never switch sections, so entry lines that carry no section keyword
/// stay inside the block their header opened.
pub fn section_blocks(lines: &[ClassifiedLine], text_len: usize) -> Vec<SectionBlock> {
    let mut blocks = Vec::new();
    let mut active: Option<(SectionTag, usize)> = None;

    for line in lines {
        let opens = matches!(
            line.tag,
            SectionTag::Education | SectionTag::Experience | SectionTag::Skills
        );
        if !opens {
            continue;
        }
        match active {
            Some((tag, _)) if tag == line.tag => {}
            _ => {
                if let Some((tag, start)) = active.take() {
                    blocks.push(SectionBlock {
                        tag,
                        start,
                        end: line.offset,
                    });
                }
                active = Some((line.tag, line.offset));
            }
        }
    }

    if let Some((tag, start)) = active {
        blocks.push(SectionBlock {
            tag,
            start,
            end: text_len,
        });
    }

    blocks
}

/// The tag extraction should treat a line as having: the enclosing block's
/// tag when the line sits inside one, otherwise the line's own tag.
pub fn effective_tag(blocks: &[SectionBlock], line: &ClassifiedLine) -> SectionTag {
    blocks
        .iter()
        .find(|b| b.contains(line.offset))
        .map(|b| b.tag)
        .unwrap_or(line.tag)
}

fn has_keyword(keywords: &[String], lower_line: &str) -> bool {
    tokens(lower_line).any(|t| keywords.iter().any(|k| k.as_str() == t))
}

fn looks_like_contact(vocab: &Vocab, lower_line: &str) -> bool {
    if lower_line.contains('@') {
        return true;
    }
    let digits = lower_line.chars().filter(|c| c.is_ascii_digit()).count();
    digits >= vocab.min_contact_digits as usize
}

fn tokens(s: &str) -> impl Iterator<Item = &str> {
    s.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| !t.is_empty())
}
