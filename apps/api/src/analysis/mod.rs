//! Analysis Engine — deterministic issue detection over one document.
//!
//! Pipeline, one pass per call with no state carried between calls:
//! regions → detector execution → normalization → conflict resolution →
//! cap & validation. Optional external candidates (e.g. from the LLM
//! source) join the stream before normalization and obey every
//! post-condition the rule-based candidates do.

pub mod apply;
pub mod executor;
pub mod handlers;
pub mod llm_source;
pub mod matcher;
pub mod messages;
pub mod models;
pub mod normalize;
pub mod prompts;
pub mod regions;
pub mod resolve;
pub mod rules;
pub mod validate;

use tracing::debug;

use crate::analysis::executor::{execute, ExecutionInput};
use crate::analysis::matcher::byte_offset;
use crate::analysis::models::{AnalysisMetrics, CandidateIssue, CategoryFlags, FinalIssue, WritingMode};
use crate::analysis::normalize::normalize_all;
use crate::analysis::regions::{parse_regions, Regions};
use crate::analysis::resolve::resolve_conflicts;
use crate::analysis::rules::REGISTRY;
use crate::analysis::validate::finalize;

/// Input to one analysis call.
#[derive(Debug, Clone)]
pub struct AnalysisRequest<'a> {
    pub document: &'a str,
    /// Parse letter regions so region-scoped detectors scan only their part.
    pub regions_needed: bool,
    pub mode: WritingMode,
    pub categories: CategoryFlags,
}

#[derive(Debug, Clone, Default)]
pub struct AnalysisOutcome {
    pub issues: Vec<FinalIssue>,
    pub metrics: AnalysisMetrics,
    /// Present only when regions were requested.
    pub regions: Option<Regions>,
}

/// Runs the rule-based engine alone.
#[cfg(test)]
pub fn analyze(request: &AnalysisRequest<'_>) -> AnalysisOutcome {
    analyze_with(request, Vec::new())
}

/// Runs the engine, merging `external` candidates into the stream before
/// normalization. Never fails: the worst case is an empty issue list.
///
/// External candidates in a disabled or inactive category are dropped.
/// Their offsets are char offsets, the same unit the engine emits.
pub fn analyze_with(request: &AnalysisRequest<'_>, mut external: Vec<CandidateIssue>) -> AnalysisOutcome {
    let document = request.document;
    // External sources obey the same category gating as the rules.
    external.retain(|c| request.categories.is_enabled(c.category) && c.category.active_in(&request.mode));
    for candidate in &mut external {
        candidate.start = to_byte_offset(document, candidate.start);
        candidate.end = to_byte_offset(document, candidate.end);
    }

    let regions = request.regions_needed.then(|| parse_regions(document));

    let execution = execute(
        &REGISTRY,
        &ExecutionInput {
            document,
            regions: regions.as_ref(),
            mode: &request.mode,
            flags: &request.categories,
        },
    );

    let raw_candidates = execution.candidates.len();
    let external_candidates = external.len();
    let mut candidates = execution.candidates;
    candidates.extend(external);
    debug!("Executor produced {raw_candidates} candidates (+{external_candidates} external)");

    let normalized = normalize_all(document, candidates);
    let (resolved, overlaps_discarded) = resolve_conflicts(normalized);
    debug!(
        "Resolver kept {} issues, discarded {overlaps_discarded} overlaps",
        resolved.len()
    );

    let finalized = finalize(document, resolved);
    debug!(
        "Validator emitted {} issues (truncated {}, empty {})",
        finalized.issues.len(),
        finalized.truncated,
        finalized.empty_dropped
    );

    AnalysisOutcome {
        issues: finalized.issues,
        metrics: AnalysisMetrics {
            matches_by_category: execution.matches_by_category,
            raw_candidates,
            external_candidates,
            overlaps_discarded,
            truncated: finalized.truncated,
            empty_dropped: finalized.empty_dropped,
            failed_categories: execution.failed_categories,
            regions_unlocated: execution.regions_unlocated,
        },
        regions,
    }
}

/// Negative offsets pass through for the normalizer to clamp.
fn to_byte_offset(document: &str, offset: i64) -> i64 {
    match usize::try_from(offset) {
        Ok(chars) => byte_offset(document, chars).unwrap_or(document.len()) as i64,
        Err(_) => offset,
    }
}
