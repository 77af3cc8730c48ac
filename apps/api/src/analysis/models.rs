//! Data model shared by every stage of the issue pipeline.
//!
//! Lifecycle of one issue inside a single analysis call:
//! `CandidateIssue` (raw, signed offsets) → `NormalizedIssue` (clamped span) →
//! `FinalIssue` (validated, non-empty, `status = open`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Categories & severities
// ────────────────────────────────────────────────────────────────────────────

/// Taxonomy bucket a detector belongs to.
///
/// Declaration order is the execution order, which is also the tie-break order
/// used by the conflict resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Spelling,
    Grammar,
    Style,
    Tone,
    Structure,
    Professionalism,
    Clarity,
    AcademicTone,
    AcademicObjectivity,
    AcademicHedging,
    AcademicCitation,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::Spelling,
        Category::Grammar,
        Category::Style,
        Category::Tone,
        Category::Structure,
        Category::Professionalism,
        Category::Clarity,
        Category::AcademicTone,
        Category::AcademicObjectivity,
        Category::AcademicHedging,
        Category::AcademicCitation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Spelling => "spelling",
            Category::Grammar => "grammar",
            Category::Style => "style",
            Category::Tone => "tone",
            Category::Structure => "structure",
            Category::Professionalism => "professionalism",
            Category::Clarity => "clarity",
            Category::AcademicTone => "academic_tone",
            Category::AcademicObjectivity => "academic_objectivity",
            Category::AcademicHedging => "academic_hedging",
            Category::AcademicCitation => "academic_citation",
        }
    }

    /// Lenient lookup used for externally produced issues (LLM output).
    pub fn parse(value: &str) -> Option<Category> {
        let wanted = value.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        Category::ALL.into_iter().find(|c| c.as_str() == wanted)
    }

    /// Whether the category's detector group is switched on for `mode`.
    ///
    /// Academic groups are mode-exclusive; citation checks only make sense
    /// for research writing.
    pub fn active_in(self, mode: &WritingMode) -> bool {
        match self {
            Category::AcademicTone
            | Category::AcademicObjectivity
            | Category::AcademicHedging => mode.is_academic(),
            Category::AcademicCitation => matches!(mode, WritingMode::AcademicResearch),
            _ => true,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
}

impl Severity {
    pub fn parse(value: &str) -> Option<Severity> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" | "minor" | "info" => Some(Severity::Low),
            "medium" | "moderate" | "warning" => Some(Severity::Medium),
            "high" | "major" | "critical" | "error" => Some(Severity::High),
            _ => None,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Writing mode
// ────────────────────────────────────────────────────────────────────────────

/// Context of an email being analyzed. Only selects wording and suggestion
/// text; it never changes which spans are flagged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailContext {
    pub recipient_type: String,
    pub purpose: String,
    pub required_tone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WritingMode {
    #[default]
    General,
    AcademicStandard,
    AcademicResearch,
    Email(EmailContext),
}

/// Payload-free mirror of `WritingMode`, used as a lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeKind {
    General,
    AcademicStandard,
    AcademicResearch,
    Email,
}

impl WritingMode {
    pub fn kind(&self) -> ModeKind {
        match self {
            WritingMode::General => ModeKind::General,
            WritingMode::AcademicStandard => ModeKind::AcademicStandard,
            WritingMode::AcademicResearch => ModeKind::AcademicResearch,
            WritingMode::Email(_) => ModeKind::Email,
        }
    }

    pub fn is_academic(&self) -> bool {
        matches!(
            self,
            WritingMode::AcademicStandard | WritingMode::AcademicResearch
        )
    }

    pub fn email(&self) -> Option<&EmailContext> {
        match self {
            WritingMode::Email(ctx) => Some(ctx),
            _ => None,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Category flags
// ────────────────────────────────────────────────────────────────────────────

/// Fully enumerated category switches. Every flag defaults to enabled and
/// unknown keys are rejected at deserialization time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CategoryFlags {
    pub spelling: bool,
    pub grammar: bool,
    pub style: bool,
    pub tone: bool,
    pub structure: bool,
    pub professionalism: bool,
    pub clarity: bool,
    pub academic_tone: bool,
    pub academic_objectivity: bool,
    pub academic_hedging: bool,
    pub academic_citation: bool,
}

impl Default for CategoryFlags {
    fn default() -> Self {
        Self::all(true)
    }
}

impl CategoryFlags {
    fn all(value: bool) -> Self {
        CategoryFlags {
            spelling: value,
            grammar: value,
            style: value,
            tone: value,
            structure: value,
            professionalism: value,
            clarity: value,
            academic_tone: value,
            academic_objectivity: value,
            academic_hedging: value,
            academic_citation: value,
        }
    }

    /// Flags with exactly the given categories enabled.
    #[cfg(test)]
    pub fn only(categories: &[Category]) -> Self {
        let mut flags = Self::all(false);
        for &category in categories {
            flags.set(category, true);
        }
        flags
    }

    pub fn is_enabled(&self, category: Category) -> bool {
        match category {
            Category::Spelling => self.spelling,
            Category::Grammar => self.grammar,
            Category::Style => self.style,
            Category::Tone => self.tone,
            Category::Structure => self.structure,
            Category::Professionalism => self.professionalism,
            Category::Clarity => self.clarity,
            Category::AcademicTone => self.academic_tone,
            Category::AcademicObjectivity => self.academic_objectivity,
            Category::AcademicHedging => self.academic_hedging,
            Category::AcademicCitation => self.academic_citation,
        }
    }

    #[cfg(test)]
    pub fn set(&mut self, category: Category, enabled: bool) {
        let slot = match category {
            Category::Spelling => &mut self.spelling,
            Category::Grammar => &mut self.grammar,
            Category::Style => &mut self.style,
            Category::Tone => &mut self.tone,
            Category::Structure => &mut self.structure,
            Category::Professionalism => &mut self.professionalism,
            Category::Clarity => &mut self.clarity,
            Category::AcademicTone => &mut self.academic_tone,
            Category::AcademicObjectivity => &mut self.academic_objectivity,
            Category::AcademicHedging => &mut self.academic_hedging,
            Category::AcademicCitation => &mut self.academic_citation,
        };
        *slot = enabled;
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Issues
// ────────────────────────────────────────────────────────────────────────────

/// Half-open byte range `[start, end)` into the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Unvalidated detector output. `start`/`end` are signed and may be out of
/// bounds or inverted until the normalizer has run.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateIssue {
    pub category: Category,
    pub severity: Severity,
    pub message: String,
    pub explanation: Option<String>,
    pub claimed_text: String,
    pub suggestion: String,
    pub start: i64,
    pub end: i64,
    /// Detector id, or the external source name (e.g. `llm_grammar`).
    pub source: String,
}

/// Candidate after clamping and text reconciliation.
/// Invariant: `span.start <= span.end <= document.len()`.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedIssue {
    pub category: Category,
    pub severity: Severity,
    pub message: String,
    pub explanation: Option<String>,
    pub text: String,
    pub suggestion: String,
    pub span: Span,
    pub source: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    #[default]
    Open,
    Applied,
    Rejected,
}

/// Issue as handed to callers. `startIndex`/`endIndex` count characters, not
/// bytes; `original_text` is exactly the characters in that range and is
/// never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalIssue {
    #[serde(rename = "type")]
    pub issue_type: Category,
    pub severity: Severity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    pub original_text: String,
    pub suggestion_text: String,
    #[serde(rename = "startIndex")]
    pub start_index: usize,
    #[serde(rename = "endIndex")]
    pub end_index: usize,
    #[serde(default)]
    pub status: IssueStatus,
}

// ────────────────────────────────────────────────────────────────────────────
// Diagnostics
// ────────────────────────────────────────────────────────────────────────────

/// Per-call diagnostics returned alongside the issues. Nothing here is
/// retained between calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisMetrics {
    /// Raw match count per category, before any filtering.
    pub matches_by_category: BTreeMap<Category, usize>,
    pub raw_candidates: usize,
    pub external_candidates: usize,
    pub overlaps_discarded: usize,
    pub truncated: usize,
    pub empty_dropped: usize,
    pub failed_categories: Vec<Category>,
    pub regions_unlocated: usize,
}
