use once_cell::sync::Lazy;
use regex::Regex;

use crate::analysis::models::{Category, WritingMode};
use crate::analysis::rules::{CheckHit, DetectorSpec, Matcher, Suggest};

pub const CONFUSED_PHRASES: &[(&str, &str)] = &[
    ("could of", "could have"),
    ("would of", "would have"),
    ("should of", "should have"),
    ("must of", "must have"),
    ("he don't", "he doesn't"),
    ("she don't", "she doesn't"),
    ("it don't", "it doesn't"),
    ("he have", "he has"),
    ("she have", "she has"),
    ("they was", "they were"),
    ("we was", "we were"),
    ("you was", "you were"),
    ("there is many", "there are many"),
    ("its a", "it's a"),
    ("its the", "it's the"),
    ("your welcome", "you're welcome"),
    ("your right", "you're right"),
    ("less people", "fewer people"),
    ("irregardless", "regardless"),
];

/// Words that take "an" despite a consonant letter, or "a" despite a vowel.
const SILENT_H: &[&str] = &["hour", "hours", "honest", "honestly", "honor", "honour", "heir", "herb"];
const CONSONANT_SOUND_VOWELS: &[&str] = &[
    "one", "once", "user", "users", "unique", "unit", "united", "university", "useful", "usual",
    "euro", "european", "eulogy", "ewe", "uniform", "union", "utility",
];

const ABBREVIATIONS: &[&str] = &["e.g.", "i.e.", "etc.", "vs.", "approx.", "no.", "dr.", "mr.", "ms.", "mrs.", "st.", "p.m.", "a.m."];

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z']+").unwrap());
static ARTICLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(a|an|A|An)\s+([A-Za-z][\w'-]*)").unwrap());
static SENTENCE_START_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|[.!?]\s+|\n\s*\n\s*)([a-z])").unwrap());

pub const DETECTORS: &[DetectorSpec] = &[
    DetectorSpec::new(
        "lowercase_i",
        Category::Grammar,
        Matcher::Pattern(r"(?:^|[\s(])(?P<m>i)(?:[\s,;:!?)]|'[a-z]|$)"),
        Suggest::Fixed("I"),
    ),
    DetectorSpec::new(
        "repeated_word",
        Category::Grammar,
        Matcher::Check(repeated_words),
        Suggest::FromCheck,
    ),
    DetectorSpec::new(
        "article_agreement",
        Category::Grammar,
        Matcher::Check(article_agreement),
        Suggest::FromCheck,
    ),
    DetectorSpec::new(
        "confused_phrase",
        Category::Grammar,
        Matcher::Words(CONFUSED_PHRASES),
        Suggest::Lookup,
    ),
    DetectorSpec::new(
        "sentence_capitalization",
        Category::Grammar,
        Matcher::Check(sentence_capitalization),
        Suggest::FromCheck,
    ),
];

/// "the the" → "the". Only whitespace may separate the pair.
fn repeated_words(text: &str, _mode: &WritingMode) -> Vec<CheckHit> {
    let mut hits = Vec::new();
    let mut previous: Option<(usize, usize)> = None;

    for word in WORD_RE.find_iter(text) {
        if let Some((p_start, p_end)) = previous {
            let gap = &text[p_end..word.start()];
            let prev = &text[p_start..p_end];
            if !gap.is_empty()
                && gap.chars().all(char::is_whitespace)
                && prev.eq_ignore_ascii_case(word.as_str())
                // "had had", "that that" are often intentional
                && !matches!(prev.to_ascii_lowercase().as_str(), "had" | "that")
            {
                hits.push(CheckHit {
                    start: p_start,
                    end: word.end(),
                    suggestion: prev.to_string(),
                });
                previous = None;
                continue;
            }
        }
        previous = Some((word.start(), word.end()));
    }
    hits
}

fn article_agreement(text: &str, _mode: &WritingMode) -> Vec<CheckHit> {
    let mut hits = Vec::new();
    for caps in ARTICLE_RE.captures_iter(text) {
        let (Some(article), Some(word)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        let next = word.as_str();
        let lower = next.to_ascii_lowercase();
        let first = lower.chars().next().unwrap_or(' ');
        let vowel_letter = matches!(first, 'a' | 'e' | 'i' | 'o' | 'u');
        // Acronyms ("an MBA", "a UX role") follow pronunciation we can't see.
        let is_acronym = next.len() > 1 && next.chars().all(|c| c.is_ascii_uppercase());
        if is_acronym {
            continue;
        }

        let wants_an = if vowel_letter {
            !CONSONANT_SOUND_VOWELS.iter().any(|w| lower.starts_with(w))
        } else {
            SILENT_H.contains(&lower.as_str())
        };

        let is_an = article.as_str().eq_ignore_ascii_case("an");
        if wants_an != is_an {
            let fixed = match (wants_an, article.as_str().starts_with('A')) {
                (true, true) => "An",
                (true, false) => "an",
                (false, true) => "A",
                (false, false) => "a",
            };
            hits.push(CheckHit {
                start: article.start(),
                end: article.end(),
                suggestion: fixed.to_string(),
            });
        }
    }
    hits
}

fn sentence_capitalization(text: &str, _mode: &WritingMode) -> Vec<CheckHit> {
    let mut hits = Vec::new();
    for caps in SENTENCE_START_RE.captures_iter(text) {
        let Some(letter) = caps.get(1) else { continue };
        if follows_abbreviation(&text[..letter.start()]) {
            continue;
        }
        hits.push(CheckHit {
            start: letter.start(),
            end: letter.end(),
            suggestion: letter.as_str().to_uppercase(),
        });
    }
    hits
}

/// Whether the text preceding a sentence boundary ends in a known
/// abbreviation, so the period does not end a sentence.
fn follows_abbreviation(before: &str) -> bool {
    let last_token = before
        .split_whitespace()
        .last()
        .unwrap_or("")
        .to_ascii_lowercase();
    ABBREVIATIONS.contains(&last_token.trim_start_matches(['(', '"']))
}
