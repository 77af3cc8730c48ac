//! Detector Registry — the catalog of rule detectors.
//!
//! Rule literals live in the per-category tables below as plain data
//! (`DetectorSpec`). They are compiled once into an immutable `Registry`
//! shared by every analysis call.

pub mod academic;
pub mod clarity;
pub mod grammar;
pub mod professionalism;
pub mod spelling;
pub mod structure;
pub mod style;
pub mod tone;

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::analysis::matcher::{self, match_case};
use crate::analysis::models::{Category, ModeKind, WritingMode};
use crate::analysis::regions::RegionName;

/// Citation-like tokens: `(Smith, 2020)`, `(Lee et al., 2019a)`, `[4]`, `[2, 7-9]`.
pub const CITATION_PATTERN: &str = r"\([A-Z][A-Za-z'\-]+(?:\s+et\s+al\.)?(?:\s+(?:and|&)\s+[A-Z][A-Za-z'\-]+)?,?\s+\d{4}[a-z]?\)|\[\d+(?:\s*[,\-–]\s*\d+)*\]";

/// Radius, in characters, of the secondary-predicate window around a match.
pub const GUARD_RADIUS: usize = 100;

// ────────────────────────────────────────────────────────────────────────────
// Rule data
// ────────────────────────────────────────────────────────────────────────────

/// What text a detector scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanTarget {
    Full,
    Region(RegionName),
}

/// A hit produced by a structural check, in local offsets of the scan text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckHit {
    pub start: usize,
    pub end: usize,
    pub suggestion: String,
}

pub type CheckFn = fn(&str, &WritingMode) -> Vec<CheckHit>;

#[derive(Clone, Copy)]
pub enum Matcher {
    /// Regex; a named group `m` narrows the flagged span.
    Pattern(&'static str),
    /// Case-insensitive whole-word phrase table `(phrase, replacement)`.
    /// Spaces in a phrase match any run of whitespace.
    Words(&'static [(&'static str, &'static str)]),
    /// Hand-written scan for rules a regex cannot express.
    Check(CheckFn),
}

#[derive(Clone, Copy)]
pub enum Suggest {
    Fixed(&'static str),
    /// Replacement from the `Words` table, first-letter case preserved.
    Lookup,
    /// Delete the flagged text.
    Delete,
    /// No automatic rewrite; the suggestion repeats the original text.
    Keep,
    Transform(fn(&str) -> String),
    /// Suggestion supplied by the `Check` matcher.
    FromCheck,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardMode {
    Require,
    Forbid,
}

/// Secondary predicate evaluated in a window around each primary match.
/// Gates emission only; never alters the span.
#[derive(Debug, Clone, Copy)]
pub struct GuardSpec {
    pub pattern: &'static str,
    pub radius: usize,
    pub mode: GuardMode,
}

#[derive(Clone, Copy)]
pub struct DetectorSpec {
    pub id: &'static str,
    pub category: Category,
    pub target: ScanTarget,
    pub matcher: Matcher,
    pub suggest: Suggest,
    pub guard: Option<GuardSpec>,
    /// Modes the detector is limited to; empty means every mode.
    pub only_in: &'static [ModeKind],
}

impl DetectorSpec {
    pub const fn new(
        id: &'static str,
        category: Category,
        matcher: Matcher,
        suggest: Suggest,
    ) -> Self {
        DetectorSpec {
            id,
            category,
            target: ScanTarget::Full,
            matcher,
            suggest,
            guard: None,
            only_in: &[],
        }
    }

    pub const fn target(mut self, target: ScanTarget) -> Self {
        self.target = target;
        self
    }

    pub const fn guard(mut self, guard: GuardSpec) -> Self {
        self.guard = Some(guard);
        self
    }

    pub const fn only_in(mut self, modes: &'static [ModeKind]) -> Self {
        self.only_in = modes;
        self
    }
}

/// Every table, in category execution order.
fn all_specs() -> Vec<DetectorSpec> {
    [
        spelling::DETECTORS,
        grammar::DETECTORS,
        style::DETECTORS,
        tone::DETECTORS,
        structure::DETECTORS,
        professionalism::DETECTORS,
        clarity::DETECTORS,
        academic::DETECTORS,
    ]
    .concat()
}

// ────────────────────────────────────────────────────────────────────────────
// Compiled detectors
// ────────────────────────────────────────────────────────────────────────────

/// A local hit from one detector run: span in scan-text offsets plus the
/// suggested replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub start: usize,
    pub end: usize,
    pub suggestion: String,
}

enum CompiledMatcher {
    Regex(Regex),
    Words {
        regex: Regex,
        lookup: HashMap<String, &'static str>,
    },
    Check(CheckFn),
}

struct CompiledGuard {
    regex: Regex,
    radius: usize,
    mode: GuardMode,
}

pub struct Detector {
    pub id: &'static str,
    pub category: Category,
    pub target: ScanTarget,
    only_in: &'static [ModeKind],
    suggest: Suggest,
    matcher: CompiledMatcher,
    guard: Option<CompiledGuard>,
}

impl Detector {
    fn compile(spec: &DetectorSpec) -> Result<Self, regex::Error> {
        let matcher = match spec.matcher {
            Matcher::Pattern(pattern) => CompiledMatcher::Regex(Regex::new(pattern)?),
            Matcher::Words(table) => CompiledMatcher::Words {
                regex: Regex::new(&words_pattern(table))?,
                lookup: table
                    .iter()
                    .map(|(phrase, replacement)| (normalize_phrase(phrase), *replacement))
                    .collect(),
            },
            Matcher::Check(check) => CompiledMatcher::Check(check),
        };
        let guard = match spec.guard {
            Some(g) => Some(CompiledGuard {
                regex: Regex::new(g.pattern)?,
                radius: g.radius,
                mode: g.mode,
            }),
            None => None,
        };
        Ok(Detector {
            id: spec.id,
            category: spec.category,
            target: spec.target,
            only_in: spec.only_in,
            suggest: spec.suggest,
            matcher,
            guard,
        })
    }

    pub fn applies_to(&self, mode: &WritingMode) -> bool {
        self.only_in.is_empty() || self.only_in.contains(&mode.kind())
    }

    /// Runs the detector over `text`. Pure: same input, same hits.
    pub fn scan(&self, text: &str, mode: &WritingMode) -> Vec<Hit> {
        let raw: Vec<(usize, usize, Option<String>)> = match &self.matcher {
            CompiledMatcher::Regex(regex) => matcher::matches(regex, text)
                .map(|m| (m.start, m.end, None))
                .collect(),
            CompiledMatcher::Words { regex, lookup } => matcher::matches(regex, text)
                .map(|m| {
                    let found = &text[m.start..m.end];
                    let replacement = lookup
                        .get(&normalize_phrase(found))
                        .map(|r| match_case(found, r));
                    (m.start, m.end, replacement)
                })
                .collect(),
            CompiledMatcher::Check(check) => check(text, mode)
                .into_iter()
                .map(|h| (h.start, h.end, Some(h.suggestion)))
                .collect(),
        };

        raw.into_iter()
            .filter(|&(start, end, _)| self.guard_allows(text, start, end))
            .map(|(start, end, provided)| {
                let found = &text[start..end];
                let suggestion = match self.suggest {
                    Suggest::Fixed(s) => s.to_string(),
                    Suggest::Delete => String::new(),
                    Suggest::Keep => found.to_string(),
                    Suggest::Transform(f) => f(found),
                    Suggest::Lookup | Suggest::FromCheck => {
                        provided.unwrap_or_else(|| found.to_string())
                    }
                };
                Hit {
                    start,
                    end,
                    suggestion,
                }
            })
            .collect()
    }

    fn guard_allows(&self, text: &str, start: usize, end: usize) -> bool {
        match &self.guard {
            None => true,
            Some(guard) => {
                let found = guard
                    .regex
                    .is_match(matcher::window(text, start, end, guard.radius));
                match guard.mode {
                    GuardMode::Require => found,
                    GuardMode::Forbid => !found,
                }
            }
        }
    }
}

/// Lower-cases and collapses whitespace so table lookups ignore layout.
fn normalize_phrase(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Builds `(?i)\b(?:p1|p2|...)\b`, longest phrases first so alternation
/// prefers the fuller match.
fn words_pattern(table: &[(&str, &str)]) -> String {
    let mut phrases: Vec<&str> = table.iter().map(|(p, _)| *p).collect();
    phrases.sort_by_key(|p| std::cmp::Reverse(p.len()));
    let alternation = phrases
        .iter()
        .map(|p| {
            p.split_whitespace()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s+")
        })
        .collect::<Vec<_>>()
        .join("|");
    let lead = if phrases.iter().all(|p| starts_with_word_char(p)) {
        r"\b"
    } else {
        ""
    };
    let tail = if phrases.iter().all(|p| ends_with_word_char(p)) {
        r"\b"
    } else {
        ""
    };
    format!(r"(?i){lead}(?:{alternation}){tail}")
}

fn starts_with_word_char(p: &str) -> bool {
    p.chars().next().is_some_and(|c| c.is_alphanumeric() || c == '_')
}

fn ends_with_word_char(p: &str) -> bool {
    p.chars().last().is_some_and(|c| c.is_alphanumeric() || c == '_')
}

// ────────────────────────────────────────────────────────────────────────────
// Registry
// ────────────────────────────────────────────────────────────────────────────

pub struct Registry {
    detectors: Vec<Detector>,
}

pub static REGISTRY: Lazy<Registry> = Lazy::new(|| Registry::from_specs(&all_specs()));

impl Registry {
    /// Compiles every spec. A spec whose pattern fails to compile is
    /// logged and left out rather than poisoning the registry.
    pub fn from_specs(specs: &[DetectorSpec]) -> Self {
        let detectors = specs
            .iter()
            .filter_map(|spec| match Detector::compile(spec) {
                Ok(detector) => Some(detector),
                Err(e) => {
                    warn!("Detector '{}' failed to compile: {e}", spec.id);
                    None
                }
            })
            .collect();
        Registry { detectors }
    }

    /// Detectors of one category, in registration order.
    pub fn for_category(&self, category: Category) -> impl Iterator<Item = &Detector> {
        self.detectors
            .iter()
            .filter(move |d| d.category == category)
    }

    #[cfg(test)]
    pub fn get(&self, id: &str) -> Option<&Detector> {
        self.detectors.iter().find(|d| d.id == id)
    }

    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &Detector> {
        self.detectors.iter()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn hits(id: &str, text: &str, mode: &WritingMode) -> Vec<(String, String)> {
        let detector = REGISTRY.get(id).expect("detector registered");
        detector
            .scan(text, mode)
            .into_iter()
            .map(|h| (text[h.start..h.end].to_string(), h.suggestion))
            .collect()
    }

    #[test]
    fn test_every_spec_compiles() {
        assert_eq!(
            REGISTRY.len(),
            all_specs().len(),
            "a detector pattern failed to compile"
        );
    }

    #[test]
    fn test_detector_ids_are_unique() {
        let mut seen = HashSet::new();
        for spec in all_specs() {
            assert!(seen.insert(spec.id), "duplicate detector id '{}'", spec.id);
        }
    }

    #[test]
    fn test_bad_pattern_is_skipped() {
        let specs = [
            DetectorSpec::new("broken", Category::Style, Matcher::Pattern("(unclosed"), Suggest::Keep),
            DetectorSpec::new("fine", Category::Style, Matcher::Pattern("ok"), Suggest::Keep),
        ];
        let registry = Registry::from_specs(&specs);
        assert_eq!(registry.len(), 1);
        assert!(registry.get("fine").is_some());
    }

    #[test]
    fn test_words_pattern_prefers_longest_phrase() {
        let table: &[(&str, &str)] = &[("in order", "x"), ("in order to", "to")];
        let re = Regex::new(&words_pattern(table)).unwrap();
        assert_eq!(re.find("we did it in order to win").unwrap().as_str(), "in order to");
    }

    #[test]
    fn test_words_lookup_tolerates_whitespace_and_case() {
        let got = hits("wordy_phrase", "In  order\nto win", &WritingMode::General);
        assert_eq!(got, vec![("In  order\nto".to_string(), "To".to_string())]);
    }

    #[test]
    fn test_forbid_guard_suppresses_cited_claim() {
        let mode = WritingMode::AcademicResearch;
        assert_eq!(hits("absolute_claim", "This proves the model works.", &mode).len(), 1);
        assert!(hits(
            "absolute_claim",
            "This proves the model works (Smith, 2020).",
            &mode
        )
        .is_empty());
    }

    #[test]
    fn test_guard_window_is_bounded() {
        let mode = WritingMode::AcademicResearch;
        let far = format!("This proves it.{}(Smith, 2020)", " filler".repeat(30));
        assert_eq!(hits("absolute_claim", &far, &mode).len(), 1);
    }

    #[test]
    fn test_require_guard_needs_nearby_citation() {
        let mode = WritingMode::AcademicResearch;
        assert!(hits("self_citation", "Our previous work found the same effect.", &mode).is_empty());
        assert_eq!(
            hits(
                "self_citation",
                "Our previous work (Okafor, 2021) found the same effect.",
                &mode
            ),
            vec![("Our previous work".to_string(), "Prior work".to_string())]
        );
    }

    #[test]
    fn test_guard_radius_counts_chars() {
        let mode = WritingMode::AcademicResearch;
        // 84 chars (164 bytes) between the claim and the citation.
        let near = format!("This proves it {}(Smith, 2020)", "é".repeat(80));
        assert!(hits("absolute_claim", &near, &mode).is_empty());
    }

    #[test]
    fn test_only_in_limits_modes() {
        let detector = REGISTRY.get("missing_greeting").unwrap();
        assert!(!detector.applies_to(&WritingMode::General));
        assert!(detector.applies_to(&WritingMode::Email(Default::default())));
    }
}
