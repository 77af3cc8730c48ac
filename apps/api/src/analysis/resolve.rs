//! Keeps a mutually non-overlapping subset of issues.
//!
//! Greedy, not optimal: after a stable sort by start offset, an issue is
//! accepted only if it overlaps nothing already accepted. Earlier-positioned
//! and earlier-registered issues win, regardless of severity.

use crate::analysis::models::{NormalizedIssue, Span};

/// Non-empty intersection, or containment in either direction (which also
/// catches zero-width spans sitting on another span's edge).
///
/// A zero-width span can only come from an external candidate that clamped
/// to nothing. It still takes part here and is dropped by the validator
/// afterwards, so if it wins a tie at `start` the issue it blocked is lost
/// too. Rule candidates precede external ones in the stream, so that tie is
/// only ever lost to another external candidate.
pub fn spans_overlap(a: Span, b: Span) -> bool {
    let intersects = a.start < b.end && b.start < a.end;
    let a_in_b = b.start <= a.start && a.end <= b.end;
    let b_in_a = a.start <= b.start && b.end <= a.end;
    intersects || a_in_b || b_in_a
}

/// Returns the accepted issues in start order and the number discarded.
pub fn resolve_conflicts(mut issues: Vec<NormalizedIssue>) -> (Vec<NormalizedIssue>, usize) {
    // `sort_by_key` is stable: ties keep detection order.
    issues.sort_by_key(|i| i.span.start);

    let total = issues.len();
    let mut accepted: Vec<NormalizedIssue> = Vec::with_capacity(total);
    for issue in issues {
        if accepted.iter().all(|a| !spans_overlap(a.span, issue.span)) {
            accepted.push(issue);
        }
    }

    let discarded = total - accepted.len();
    (accepted, discarded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::models::{Category, Severity};

    fn issue(source: &str, start: usize, end: usize) -> NormalizedIssue {
        NormalizedIssue {
            category: Category::Style,
            severity: Severity::Low,
            message: String::new(),
            explanation: None,
            text: String::new(),
            suggestion: String::new(),
            span: Span::new(start, end),
            source: source.to_string(),
        }
    }

    fn sources(issues: &[NormalizedIssue]) -> Vec<&str> {
        issues.iter().map(|i| i.source.as_str()).collect()
    }

    #[test]
    fn test_overlap_cases() {
        assert!(spans_overlap(Span::new(0, 5), Span::new(3, 8)));
        assert!(spans_overlap(Span::new(0, 10), Span::new(3, 4)));
        assert!(spans_overlap(Span::new(3, 4), Span::new(0, 10)));
        assert!(!spans_overlap(Span::new(0, 5), Span::new(5, 8)), "touching spans do not overlap");
        assert!(!spans_overlap(Span::new(0, 2), Span::new(6, 8)));
        assert!(spans_overlap(Span::new(3, 3), Span::new(3, 8)));
    }

    #[test]
    fn test_sorted_and_non_overlapping() {
        let (kept, dropped) = resolve_conflicts(vec![
            issue("c", 20, 25),
            issue("a", 0, 4),
            issue("b", 2, 6),
            issue("d", 10, 12),
        ]);
        assert_eq!(sources(&kept), vec!["a", "d", "c"]);
        assert_eq!(dropped, 1);
    }

    #[test]
    fn test_exact_tie_first_registered_wins() {
        let (kept, _) = resolve_conflicts(vec![issue("first", 5, 9), issue("second", 5, 9)]);
        assert_eq!(sources(&kept), vec!["first"]);
    }

    #[test]
    fn test_earlier_start_wins_over_containing_span() {
        let (kept, _) = resolve_conflicts(vec![issue("wide", 4, 20), issue("narrow", 2, 6)]);
        assert_eq!(sources(&kept), vec!["narrow"]);
    }

    #[test]
    fn test_discarded_issue_never_blocks_later_ones() {
        // b loses to a; c overlaps only b and must survive.
        let (kept, _) = resolve_conflicts(vec![issue("a", 0, 5), issue("b", 3, 10), issue("c", 8, 12)]);
        assert_eq!(sources(&kept), vec!["a", "c"]);
    }

    #[test]
    fn test_zero_width_span_at_shared_start() {
        let (kept, _) = resolve_conflicts(vec![issue("rule", 3, 8), issue("external", 3, 3)]);
        assert_eq!(sources(&kept), vec!["rule"]);

        let (kept, dropped) = resolve_conflicts(vec![issue("empty", 3, 3), issue("real", 3, 8)]);
        assert_eq!(sources(&kept), vec!["empty"]);
        assert_eq!(dropped, 1);
    }

    #[test]
    fn test_empty_input() {
        let (kept, dropped) = resolve_conflicts(Vec::new());
        assert!(kept.is_empty());
        assert_eq!(dropped, 0);
    }
}
