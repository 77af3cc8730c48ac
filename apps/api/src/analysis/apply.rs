//! Replays an issue's suggested edit onto a document.
//!
//! Relies on the engine's positional guarantee: `original_text` is exactly
//! what sits at `[startIndex, endIndex)`, counted in chars. If the document
//! changed since the analysis, the edit is refused rather than applied to
//! the wrong text.

use serde::Serialize;
use thiserror::Error;

use crate::analysis::matcher::byte_offset;
use crate::analysis::models::{FinalIssue, IssueStatus};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApplyError {
    #[error("Issue span {start}..{end} is outside the document (length {len})")]
    OutOfBounds { start: usize, end: usize, len: usize },

    #[error("Document text at the issue span is '{found}', expected '{expected}'")]
    TextMismatch { expected: String, found: String },

    #[error("Issue is already {0:?}")]
    NotOpen(IssueStatus),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedEdit {
    pub document: String,
    /// Length change in chars; later offsets move by this amount.
    pub shift: i64,
}

pub fn apply_issue(document: &str, issue: &FinalIssue) -> Result<AppliedEdit, ApplyError> {
    if issue.status != IssueStatus::Open {
        return Err(ApplyError::NotOpen(issue.status));
    }
    let (start, end) = (issue.start_index, issue.end_index);
    let out_of_bounds = || ApplyError::OutOfBounds {
        start,
        end,
        len: document.chars().count(),
    };
    if start > end {
        return Err(out_of_bounds());
    }
    let (Some(lo), Some(hi)) = (byte_offset(document, start), byte_offset(document, end)) else {
        return Err(out_of_bounds());
    };
    let found = &document[lo..hi];
    if found != issue.original_text {
        return Err(ApplyError::TextMismatch {
            expected: issue.original_text.clone(),
            found: found.to_string(),
        });
    }

    let mut edited = String::with_capacity(document.len() + issue.suggestion_text.len());
    edited.push_str(&document[..lo]);
    edited.push_str(&issue.suggestion_text);
    edited.push_str(&document[hi..]);

    Ok(AppliedEdit {
        document: edited,
        shift: issue.suggestion_text.chars().count() as i64 - (end - start) as i64,
    })
}

/// Moves the remaining open issues after an edit. Issues positioned after
/// the applied span are shifted; any issue touching the edited span can no
/// longer be trusted and is dropped.
pub fn rebase_issues(remaining: Vec<FinalIssue>, applied: &FinalIssue, shift: i64) -> Vec<FinalIssue> {
    remaining
        .into_iter()
        .filter_map(|mut issue| {
            if issue.end_index <= applied.start_index {
                Some(issue)
            } else if issue.start_index >= applied.end_index {
                issue.start_index = (issue.start_index as i64 + shift) as usize;
                issue.end_index = (issue.end_index as i64 + shift) as usize;
                Some(issue)
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::models::{Category, Severity};

    fn issue(original: &str, suggestion: &str, start: usize, end: usize) -> FinalIssue {
        FinalIssue {
            issue_type: Category::Spelling,
            severity: Severity::Medium,
            message: String::new(),
            explanation: None,
            original_text: original.to_string(),
            suggestion_text: suggestion.to_string(),
            start_index: start,
            end_index: end,
            status: IssueStatus::Open,
        }
    }

    #[test]
    fn test_applies_replacement() {
        let out = apply_issue("I recieve alot", &issue("recieve", "receive", 2, 9)).unwrap();
        assert_eq!(out.document, "I receive alot");
        assert_eq!(out.shift, 0);
    }

    #[test]
    fn test_shift_and_rebase() {
        let doc = "I recieve alot of mail";
        let first = issue("alot", "a lot", 10, 14);
        let out = apply_issue(doc, &first).unwrap();
        assert_eq!(out.shift, 1);

        let later = issue("mail", "email", 18, 22);
        let earlier = issue("recieve", "receive", 2, 9);
        let rebased = rebase_issues(vec![earlier, later], &first, out.shift);
        assert_eq!(rebased[0].start_index, 2);
        assert_eq!((rebased[1].start_index, rebased[1].end_index), (19, 23));
        assert_eq!(&out.document[19..23], "mail");
    }

    #[test]
    fn test_offsets_are_chars() {
        let doc = "Café owners recieve mail.";
        let out = apply_issue(doc, &issue("recieve", "receive", 12, 19)).unwrap();
        assert_eq!(out.document, "Café owners receive mail.");

        let accent = apply_issue(doc, &issue("é", "e", 3, 4)).unwrap();
        assert_eq!(accent.document, "Cafe owners recieve mail.");
        assert_eq!(accent.shift, 0);
    }

    #[test]
    fn test_rebase_drops_the_applied_and_touching_issues() {
        let applied = issue("alot", "a lot", 10, 14);
        let overlapping = issue("alot of", "many", 10, 17);
        let rebased = rebase_issues(vec![applied.clone(), overlapping], &applied, 1);
        assert!(rebased.is_empty());
    }

    #[test]
    fn test_refuses_stale_text() {
        let err = apply_issue("I receive alot", &issue("recieve", "receive", 2, 9)).unwrap_err();
        assert!(matches!(err, ApplyError::TextMismatch { .. }));
    }

    #[test]
    fn test_refuses_out_of_bounds() {
        let err = apply_issue("short", &issue("x", "y", 3, 40)).unwrap_err();
        assert!(matches!(err, ApplyError::OutOfBounds { .. }));
    }

    #[test]
    fn test_refuses_closed_issue() {
        let mut closed = issue("recieve", "receive", 2, 9);
        closed.status = IssueStatus::Rejected;
        assert_eq!(
            apply_issue("I recieve", &closed).unwrap_err(),
            ApplyError::NotOpen(IssueStatus::Rejected)
        );
    }
}
