use serde::{Deserialize, Serialize};
use std::fmt;

/// Three-letter month prefixes, index + 1 is the month number.
const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

const PRESENT_MARKERS: [&str; 3] = ["present", "current", "now"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: u16,
    pub month: u8,
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// End of a date span. `Ongoing` (an explicit present-tense marker in the
/// source) and `Unknown` (nothing parseable) are distinct and must stay so.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateEnd {
    Known(YearMonth),
    Ongoing,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSpan {
    pub start: Option<YearMonth>,
    pub end: DateEnd,
}

impl DateSpan {
    pub fn empty() -> Self {
        Self {
            start: None,
            end: DateEnd::Unknown,
        }
    }

    /// True when both ends are known and the end precedes the start.
    pub fn is_reversed(&self) -> bool {
        matches!(
            (self.start, self.end),
            (Some(s), DateEnd::Known(e)) if e < s
        )
    }
}

/// Normalize a free-text date range into a `DateSpan`. Total: malformed
/// input degrades to `None`/`Unknown` components, never an error.
///
/// A present-tense marker is only meaningful on the end side; on the start
/// side it is treated as unparseable.
pub fn normalize(text: &str) -> DateSpan {
    let lower = text.to_lowercase();

    let (lhs, rhs) = split_range(&lower);

    let start = match lhs {
        Some(side) if !has_present_marker(side) => parse_side(side),
        _ => None,
    };

    let end = match rhs {
        None => DateEnd::Unknown,
        Some(side) if has_present_marker(side) => DateEnd::Ongoing,
        Some(side) => match parse_side(side) {
            Some(ym) => DateEnd::Known(ym),
            None => DateEnd::Unknown,
        },
    };

    DateSpan { start, end }
}

/// Split on the first range separator: en/em dash, hyphen, "to", "until".
fn split_range(s: &str) -> (Option<&str>, Option<&str>) {
    let mut best: Option<(usize, usize)> = None;

    for dash in ['\u{2013}', '\u{2014}', '-'] {
        if let Some(pos) = s.find(dash) {
            let cand = (pos, dash.len_utf8());
            if best.is_none_or(|(b, _)| pos < b) {
                best = Some(cand);
            }
        }
    }
    for word in [" to ", " until "] {
        if let Some(pos) = s.find(word) {
            if best.is_none_or(|(b, _)| pos < b) {
                best = Some((pos, word.len()));
            }
        }
    }

    match best {
        Some((pos, len)) => (Some(&s[..pos]), Some(&s[pos + len..])),
        None => (Some(s), None),
    }
}

fn has_present_marker(side: &str) -> bool {
    tokens(side).any(|t| PRESENT_MARKERS.contains(&t))
}

/// One side of a range: a 4-digit year plus an optional month name.
/// Month defaults to January when absent so year-only spans stay
/// chronologically comparable. No year means the side is unparseable.
fn parse_side(side: &str) -> Option<YearMonth> {
    let mut year: Option<u16> = None;
    let mut month: Option<u8> = None;

    for tok in tokens(side) {
        if year.is_none() && tok.len() == 4 && tok.chars().all(|c| c.is_ascii_digit()) {
            year = tok.parse::<u16>().ok();
        } else if month.is_none() && tok.len() >= 3 && tok.chars().all(|c| c.is_alphabetic()) {
            month = month_number(tok);
        }
    }

    year.map(|year| YearMonth {
        year,
        month: month.unwrap_or(1),
    })
}

fn month_number(token: &str) -> Option<u8> {
    let prefix = &token[..3];
    MONTHS
        .iter()
        .position(|m| *m == prefix)
        .map(|i| (i + 1) as u8)
}

fn tokens(s: &str) -> impl Iterator<Item = &str> {
    s.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| !t.is_empty())
}
