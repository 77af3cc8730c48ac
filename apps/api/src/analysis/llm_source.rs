//! Issue sources beyond the rule registry.
//!
//! `AppState` holds an optional `Arc<dyn IssueSource>`. Its candidates are
//! merged into the engine before normalization, so whatever offsets or text
//! a source claims, the output contract still holds.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::analysis::models::{CandidateIssue, Category, Severity, WritingMode};
use crate::analysis::prompts::{grammar_check_prompt, JSON_ONLY_SYSTEM};
use crate::errors::AppError;
use crate::llm_client::LlmClient;

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait IssueSource: Send + Sync {
    /// Short tag recorded as the `source` of every candidate.
    fn name(&self) -> &'static str;

    async fn detect(&self, document: &str, mode: &WritingMode) -> Result<Vec<CandidateIssue>, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// LlmGrammarSource
// ────────────────────────────────────────────────────────────────────────────

/// Grammar checks delegated to Claude through the shared `LlmClient`.
pub struct LlmGrammarSource {
    llm: LlmClient,
}

impl LlmGrammarSource {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[derive(Debug, Deserialize)]
struct LlmIssueList {
    #[serde(default)]
    issues: Vec<LlmIssue>,
}

#[derive(Debug, Deserialize)]
struct LlmIssue {
    #[serde(rename = "type", default)]
    issue_type: String,
    #[serde(default)]
    severity: String,
    #[serde(default)]
    message: String,
    explanation: Option<String>,
    #[serde(default)]
    original_text: String,
    #[serde(default)]
    suggestion_text: String,
    #[serde(default)]
    start_index: i64,
    #[serde(default)]
    end_index: i64,
}

impl LlmIssue {
    fn into_candidate(self, source: &str) -> CandidateIssue {
        let category = Category::parse(&self.issue_type).unwrap_or(Category::Grammar);
        let message = if self.message.trim().is_empty() {
            format!("Possible {category} issue")
        } else {
            self.message
        };
        CandidateIssue {
            category,
            severity: Severity::parse(&self.severity).unwrap_or_default(),
            message,
            explanation: self.explanation.filter(|e| !e.trim().is_empty()),
            claimed_text: self.original_text,
            suggestion: self.suggestion_text,
            start: self.start_index,
            end: self.end_index,
            source: source.to_string(),
        }
    }
}

#[async_trait]
impl IssueSource for LlmGrammarSource {
    fn name(&self) -> &'static str {
        "llm_grammar"
    }

    async fn detect(&self, document: &str, mode: &WritingMode) -> Result<Vec<CandidateIssue>, AppError> {
        let prompt = grammar_check_prompt(document, mode);
        let list: LlmIssueList = self
            .llm
            .call_json(&prompt, JSON_ONLY_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(e.to_string()))?;

        debug!("LLM grammar source returned {} issues", list.issues.len());
        Ok(list
            .issues
            .into_iter()
            .map(|issue| issue.into_candidate(self.name()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_llm_payload() {
        let raw = r#"{"issues": [
            {"type": "grammar", "severity": "high", "message": "Wrong form",
             "original_text": "Their", "suggestion_text": "They're",
             "start_index": 0, "end_index": 5}
        ]}"#;
        let list: LlmIssueList = serde_json::from_str(raw).unwrap();
        let candidate = list.issues.into_iter().next().unwrap().into_candidate("llm_grammar");
        assert_eq!(candidate.category, Category::Grammar);
        assert_eq!(candidate.severity, Severity::High);
        assert_eq!((candidate.start, candidate.end), (0, 5));
        assert_eq!(candidate.source, "llm_grammar");
    }

    #[test]
    fn test_lenient_defaults() {
        let raw = r#"{"issues": [{"type": "nonsense", "severity": "urgent", "start_index": -3}]}"#;
        let list: LlmIssueList = serde_json::from_str(raw).unwrap();
        let candidate = list.issues.into_iter().next().unwrap().into_candidate("x");
        assert_eq!(candidate.category, Category::Grammar);
        assert_eq!(candidate.severity, Severity::Medium);
        assert_eq!(candidate.message, "Possible grammar issue");
        assert_eq!(candidate.start, -3);
    }

    #[test]
    fn test_missing_issue_list_is_empty() {
        let list: LlmIssueList = serde_json::from_str("{}").unwrap();
        assert!(list.issues.is_empty());
    }
}
