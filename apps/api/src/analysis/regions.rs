//! Region Parser — splits a letter/email shaped document into
//! subject / greeting / body / closing / signature using line heuristics.
//!
//! Region positions are recovered by locating the FIRST occurrence of the
//! extracted text inside the document. If the same text appears earlier
//! (e.g. a greeting phrase quoted in the subject line) offsets land on that
//! earlier occurrence. This is a known limitation and is kept as-is.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analysis::matcher::char_offset;
use crate::analysis::models::Span;

const SUBJECT_PREFIX: &str = "subject:";

static GREETING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^\s*(?:dear|hi|hello|hey|greetings|good\s+(?:morning|afternoon|evening)|to\s+whom\s+it\s+may\s+concern)\b",
    )
    .unwrap()
});

static CLOSING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^\s*(?:best|kind\s+regards|warm\s+regards|regards|sincerely|thanks|thank\s+you|cheers|respectfully|yours|all\s+the\s+best)\b",
    )
    .unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionName {
    Subject,
    Greeting,
    Body,
    Closing,
    Signature,
}

/// The five extracted region strings. Any of them may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Regions {
    pub subject: String,
    pub greeting: String,
    pub body: String,
    pub closing: String,
    pub signature: String,
}

/// A named region resolved to a document span, in char offsets like issue
/// positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Region {
    pub name: RegionName,
    pub span: Span,
}

impl Regions {
    pub fn get(&self, name: RegionName) -> &str {
        match name {
            RegionName::Subject => &self.subject,
            RegionName::Greeting => &self.greeting,
            RegionName::Body => &self.body,
            RegionName::Closing => &self.closing,
            RegionName::Signature => &self.signature,
        }
    }

    /// Resolves every non-empty region to a span via first-occurrence search.
    pub fn spans(&self, document: &str) -> Vec<Region> {
        [
            RegionName::Subject,
            RegionName::Greeting,
            RegionName::Body,
            RegionName::Closing,
            RegionName::Signature,
        ]
        .into_iter()
        .filter_map(|name| {
            let text = self.get(name);
            locate(document, text).map(|start| {
                let start_char = char_offset(document, start);
                Region {
                    name,
                    span: Span::new(start_char, start_char + text.chars().count()),
                }
            })
        })
        .collect()
    }
}

/// Byte offset of the first occurrence of `region_text` in `document`.
/// Empty regions have no position.
pub fn locate(document: &str, region_text: &str) -> Option<usize> {
    if region_text.is_empty() {
        return None;
    }
    document.find(region_text)
}

/// Parses the letter structure of `document`. Never fails; regions that
/// cannot be identified are returned empty.
///
/// Every region is a trimmed slice of `document`, line endings included, so
/// it can always be found again by `locate`.
pub fn parse_regions(document: &str) -> Regions {
    let spans = line_spans(document);
    let lines: Vec<&str> = spans.iter().map(|&(s, e)| &document[s..e]).collect();
    let mut regions = Regions::default();

    let mut content_start = 0;
    if let Some(first) = lines.first() {
        if let Some(subject) = strip_subject(first) {
            regions.subject = subject.to_string();
            content_start = 1;
        }
    }

    let greeting_idx = (content_start..lines.len()).find(|&i| GREETING_RE.is_match(lines[i]));
    if let Some(g) = greeting_idx {
        regions.greeting = lines[g].trim().to_string();
    }

    let closing_floor = greeting_idx.map(|g| g + 1).unwrap_or(content_start);
    let closing_idx = (closing_floor..lines.len())
        .rev()
        .find(|&i| CLOSING_RE.is_match(lines[i]));
    if let Some(c) = closing_idx {
        regions.closing = lines[c].trim().to_string();
        regions.signature = slice_lines(document, &spans[c + 1..]);
    }

    regions.body = match (greeting_idx, closing_idx) {
        (Some(g), Some(c)) => slice_lines(document, &spans[g + 1..c]),
        _ => document.trim().to_string(),
    };

    regions
}

fn strip_subject(line: &str) -> Option<&str> {
    let line = line.trim_start();
    let prefix = line.get(..SUBJECT_PREFIX.len())?;
    if prefix.eq_ignore_ascii_case(SUBJECT_PREFIX) {
        Some(line[SUBJECT_PREFIX.len()..].trim())
    } else {
        None
    }
}

/// Byte spans of each line, without its `\n` or `\r\n` terminator.
fn line_spans(document: &str) -> Vec<(usize, usize)> {
    let mut offset = 0;
    let mut spans = Vec::new();
    for raw in document.split_inclusive('\n') {
        let line = raw.strip_suffix('\n').unwrap_or(raw);
        let line = line.strip_suffix('\r').unwrap_or(line);
        spans.push((offset, offset + line.len()));
        offset += raw.len();
    }
    spans
}

/// The document text from the first to the last of `spans`, trimmed.
fn slice_lines(document: &str, spans: &[(usize, usize)]) -> String {
    match (spans.first(), spans.last()) {
        (Some(&(start, _)), Some(&(_, end))) => document[start..end].trim().to_string(),
        _ => String::new(),
    }
}
