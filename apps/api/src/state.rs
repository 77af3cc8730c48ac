use std::sync::Arc;

use crate::analysis::llm_source::IssueSource;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Extra detector source merged into proofreading on request.
    /// `None` unless ENABLE_LLM_GRAMMAR is set.
    pub issue_source: Option<Arc<dyn IssueSource>>,
}
