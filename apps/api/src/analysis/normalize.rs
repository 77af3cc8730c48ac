//! Span normalization: turns untrusted candidates into internally consistent
//! issues. Never drops anything; dropping is the validator's job.

use crate::analysis::matcher::floor_char_boundary;
use crate::analysis::models::{CandidateIssue, NormalizedIssue, Span};

/// Clamps raw signed offsets into `[0, len]` with `start <= end`, snapped
/// down to char boundaries so the span is always sliceable.
pub fn clamp_span(document: &str, start: i64, end: i64) -> Span {
    let len = document.len() as i64;
    let start = start.clamp(0, len);
    let end = end.min(len).max(start);
    let start = floor_char_boundary(document, start as usize);
    let end = floor_char_boundary(document, end as usize).max(start);
    Span::new(start, end)
}

/// Normalizes one candidate. The claimed text is replaced by the real
/// document text whenever it is empty or disagrees case-insensitively.
pub fn normalize(document: &str, candidate: CandidateIssue) -> NormalizedIssue {
    let span = clamp_span(document, candidate.start, candidate.end);
    let actual = &document[span.start..span.end];

    let text = if candidate.claimed_text.is_empty()
        || candidate.claimed_text.to_lowercase() != actual.to_lowercase()
    {
        actual.to_string()
    } else {
        candidate.claimed_text
    };

    NormalizedIssue {
        category: candidate.category,
        severity: candidate.severity,
        message: candidate.message,
        explanation: candidate.explanation,
        text,
        suggestion: candidate.suggestion,
        span,
        source: candidate.source,
    }
}

pub fn normalize_all(document: &str, candidates: Vec<CandidateIssue>) -> Vec<NormalizedIssue> {
    candidates
        .into_iter()
        .map(|c| normalize(document, c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::models::{Category, Severity};

    fn candidate(claimed: &str, start: i64, end: i64) -> CandidateIssue {
        CandidateIssue {
            category: Category::Grammar,
            severity: Severity::Medium,
            message: "m".to_string(),
            explanation: None,
            claimed_text: claimed.to_string(),
            suggestion: "s".to_string(),
            start,
            end,
            source: "test".to_string(),
        }
    }

    #[test]
    fn test_clamps_out_of_bounds() {
        let doc = "hello world";
        assert_eq!(clamp_span(doc, -5, 3), Span::new(0, 3));
        assert_eq!(clamp_span(doc, 6, 500), Span::new(6, 11));
        assert_eq!(clamp_span(doc, 50, 60), Span::new(11, 11));
    }

    #[test]
    fn test_inverted_span_collapses() {
        assert_eq!(clamp_span("hello world", 8, 2), Span::new(8, 8));
    }

    #[test]
    fn test_snaps_to_char_boundary() {
        let doc = "café au lait";
        // byte 4 is inside 'é' (bytes 3..5)
        let span = clamp_span(doc, 4, 8);
        assert!(doc.is_char_boundary(span.start));
        assert!(doc.is_char_boundary(span.end));
        assert_eq!(span, Span::new(3, 8));
    }

    #[test]
    fn test_empty_claim_takes_actual_text() {
        let issue = normalize("I recieve mail", candidate("", 2, 9));
        assert_eq!(issue.text, "recieve");
    }

    #[test]
    fn test_disagreeing_claim_is_overwritten() {
        let issue = normalize("I recieve mail", candidate("receive", 2, 9));
        assert_eq!(issue.text, "recieve");
    }

    #[test]
    fn test_case_only_difference_keeps_claim() {
        let issue = normalize("I Recieve mail", candidate("recieve", 2, 9));
        assert_eq!(issue.text, "recieve");
    }

    #[test]
    fn test_never_drops() {
        let issues = normalize_all("abc", vec![candidate("x", 10, 20), candidate("", -1, -1)]);
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.span.is_empty()));
    }
}
