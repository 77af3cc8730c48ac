//! Pattern scanning primitives shared by all detectors.
//!
//! Every scan owns its cursor: compiled `Regex` values are immutable and
//! shared, so nothing carries match state between calls.

use regex::Regex;

/// Capture group name a pattern can use to narrow the flagged span to part
/// of the full match (the regex crate has no look-around).
pub const HIT_GROUP: &str = "m";

/// One matched span within the scanned text, in local byte offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternMatch {
    pub start: usize,
    pub end: usize,
}

/// Lazy, finite, restartable sequence of all non-overlapping matches of a
/// pattern over a text. Cloning restarts nothing; it forks the cursor.
#[derive(Debug, Clone)]
pub struct Matches<'r, 't> {
    regex: &'r Regex,
    text: &'t str,
    cursor: usize,
}

impl<'r, 't> Iterator for Matches<'r, 't> {
    type Item = PatternMatch;

    fn next(&mut self) -> Option<PatternMatch> {
        while self.cursor <= self.text.len() {
            let caps = self.regex.captures_at(self.text, self.cursor)?;
            let whole = caps.get(0)?;

            let hit = caps.name(HIT_GROUP).unwrap_or(whole);

            // Resume right after the flagged span so context consumed around
            // it stays available to the next match. Empty matches make no
            // progress; step one char past them.
            self.cursor = if hit.end() > hit.start() {
                hit.end()
            } else if whole.end() > whole.start() {
                whole.end()
            } else {
                next_char_boundary(self.text, whole.end())
            };

            if hit.end() > hit.start() {
                return Some(PatternMatch {
                    start: hit.start(),
                    end: hit.end(),
                });
            }
        }
        None
    }
}

/// Starts a fresh scan of `text` with `regex`.
pub fn matches<'r, 't>(regex: &'r Regex, text: &'t str) -> Matches<'r, 't> {
    Matches {
        regex,
        text,
        cursor: 0,
    }
}

/// The text within `radius` characters either side of the byte range
/// `[start, end)`.
pub fn window(text: &str, start: usize, end: usize, radius: usize) -> &str {
    let start = floor_char_boundary(text, start);
    let end = ceil_char_boundary(text, end).max(start);
    let lo = match radius.checked_sub(1) {
        Some(back) => text[..start]
            .char_indices()
            .rev()
            .nth(back)
            .map_or(0, |(i, _)| i),
        None => start,
    };
    let hi = text[end..]
        .char_indices()
        .nth(radius)
        .map_or(text.len(), |(i, _)| end + i);
    &text[lo..hi]
}

/// Char offset of byte `index`. Callers outside the engine count chars.
pub fn char_offset(text: &str, index: usize) -> usize {
    text[..floor_char_boundary(text, index)].chars().count()
}

/// Byte index of char offset `index`; `None` past the end of `text`.
pub fn byte_offset(text: &str, index: usize) -> Option<usize> {
    text.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .nth(index)
}

pub fn floor_char_boundary(text: &str, index: usize) -> usize {
    let mut i = index.min(text.len());
    while !text.is_char_boundary(i) {
        i -= 1;
    }
    i
}

pub fn ceil_char_boundary(text: &str, index: usize) -> usize {
    let mut i = index.min(text.len());
    while !text.is_char_boundary(i) {
        i += 1;
    }
    i
}

fn next_char_boundary(text: &str, index: usize) -> usize {
    if index >= text.len() {
        return text.len() + 1;
    }
    ceil_char_boundary(text, index + 1)
}

/// Returns `replacement` with the capitalisation of `original`'s first letter.
pub fn match_case(original: &str, replacement: &str) -> String {
    let starts_upper = original.chars().next().is_some_and(char::is_uppercase);
    if !starts_upper {
        return replacement.to_string();
    }
    let mut chars = replacement.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
