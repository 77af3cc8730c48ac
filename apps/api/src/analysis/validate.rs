//! Final gate before issues leave the engine: cap, re-extract, drop empties.

use tracing::debug;

use crate::analysis::matcher::char_offset;
use crate::analysis::models::{FinalIssue, IssueStatus, NormalizedIssue};
use crate::analysis::normalize::clamp_span;

/// Hard upper bound on issues returned by one analysis.
pub const MAX_ISSUES: usize = 50;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Finalized {
    pub issues: Vec<FinalIssue>,
    pub truncated: usize,
    pub empty_dropped: usize,
}

/// Truncates to `MAX_ISSUES`, then re-clamps and re-extracts every survivor.
/// Issues whose text is still empty are dropped with a diagnostic. Byte spans
/// become char offsets here, on the way out.
pub fn finalize(document: &str, mut resolved: Vec<NormalizedIssue>) -> Finalized {
    let truncated = resolved.len().saturating_sub(MAX_ISSUES);
    resolved.truncate(MAX_ISSUES);

    let mut issues = Vec::with_capacity(resolved.len());
    let mut empty_dropped = 0;

    for issue in resolved {
        let span = clamp_span(document, issue.span.start as i64, issue.span.end as i64);
        let actual = &document[span.start..span.end];
        if actual.is_empty() {
            debug!(
                "Dropping '{}' issue from {} (claimed '{}'): empty span at {}..{}",
                issue.category, issue.source, issue.text, span.start, span.end
            );
            empty_dropped += 1;
            continue;
        }
        let start_index = char_offset(document, span.start);
        issues.push(FinalIssue {
            issue_type: issue.category,
            severity: issue.severity,
            message: issue.message,
            explanation: issue.explanation,
            original_text: actual.to_string(),
            suggestion_text: issue.suggestion,
            start_index,
            end_index: start_index + actual.chars().count(),
            status: IssueStatus::Open,
        });
    }

    Finalized {
        issues,
        truncated,
        empty_dropped,
    }
}
