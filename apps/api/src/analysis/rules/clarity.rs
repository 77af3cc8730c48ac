use once_cell::sync::Lazy;
use regex::Regex;

use crate::analysis::models::{Category, WritingMode};
use crate::analysis::rules::{CheckHit, DetectorSpec, Matcher, Suggest};

/// Sentences above this many words are flagged as hard to follow.
pub const LONG_SENTENCE_WORDS: usize = 35;

pub const VAGUE_WORDS: &[(&str, &str)] = &[
    ("stuff", "materials"),
    ("things", "details"),
    ("a lot of", "many"),
    ("lots of", "many"),
    ("kind of", "somewhat"),
    ("sort of", "somewhat"),
    ("some sort of", "a"),
    ("and so on", "and similar items"),
];

pub const DOUBLE_NEGATIVES: &[(&str, &str)] = &[
    ("not unlike", "like"),
    ("not uncommon", "common"),
    ("not unusual", "usual"),
    ("don't have no", "don't have any"),
    ("can't hardly", "can hardly"),
    ("not never", "never"),
];

static SENTENCE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^.!?\n]+[.!?]*").unwrap());

pub const DETECTORS: &[DetectorSpec] = &[
    DetectorSpec::new(
        "long_sentence",
        Category::Clarity,
        Matcher::Check(long_sentences),
        Suggest::Keep,
    ),
    DetectorSpec::new(
        "vague_wording",
        Category::Clarity,
        Matcher::Words(VAGUE_WORDS),
        Suggest::Lookup,
    ),
    DetectorSpec::new(
        "double_negative",
        Category::Clarity,
        Matcher::Words(DOUBLE_NEGATIVES),
        Suggest::Lookup,
    ),
];

fn long_sentences(text: &str, _mode: &WritingMode) -> Vec<CheckHit> {
    SENTENCE_RE
        .find_iter(text)
        .filter_map(|sentence| {
            let raw = sentence.as_str();
            let trimmed = raw.trim();
            if trimmed.split_whitespace().count() <= LONG_SENTENCE_WORDS {
                return None;
            }
            let start = sentence.start() + (raw.len() - raw.trim_start().len());
            Some(CheckHit {
                start,
                end: start + trimmed.len(),
                suggestion: trimmed.to_string(),
            })
        })
        .collect()
}
