use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::analysis::apply::{apply_issue, rebase_issues, AppliedEdit};
use crate::analysis::models::{
    AnalysisMetrics, CandidateIssue, CategoryFlags, EmailContext, FinalIssue, WritingMode,
};
use crate::analysis::regions::{Region, Regions};
use crate::analysis::{analyze_with, AnalysisRequest};
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / response types
// ────────────────────────────────────────────────────────────────────────────

/// Modes accepted by the proofreading endpoint. Email analysis has its own
/// endpoint because it needs the recipient context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProofreadMode {
    #[default]
    General,
    AcademicStandard,
    AcademicResearch,
}

impl From<ProofreadMode> for WritingMode {
    fn from(mode: ProofreadMode) -> Self {
        match mode {
            ProofreadMode::General => WritingMode::General,
            ProofreadMode::AcademicStandard => WritingMode::AcademicStandard,
            ProofreadMode::AcademicResearch => WritingMode::AcademicResearch,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ProofreadRequest {
    pub document: String,
    #[serde(default)]
    pub mode: ProofreadMode,
    #[serde(default)]
    pub categories: CategoryFlags,
    /// Merge issues from the LLM grammar source when one is configured.
    #[serde(default)]
    pub include_llm: bool,
}

#[derive(Debug, Deserialize)]
pub struct EmailAnalysisRequest {
    pub document: String,
    pub recipient_type: String,
    pub purpose: String,
    pub required_tone: String,
    #[serde(default)]
    pub categories: CategoryFlags,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub issues: Vec<FinalIssue>,
    pub metrics: AnalysisMetrics,
}

#[derive(Debug, Serialize)]
pub struct EmailAnalysisResponse {
    pub issues: Vec<FinalIssue>,
    pub metrics: AnalysisMetrics,
    pub regions: Regions,
    /// Document positions of the non-empty regions.
    pub region_spans: Vec<Region>,
}

#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    pub document: String,
    pub issue: FinalIssue,
    /// Other open issues from the same analysis, to be moved past the edit.
    #[serde(default)]
    pub remaining: Vec<FinalIssue>,
}

#[derive(Debug, Serialize)]
pub struct ApplyResponse {
    #[serde(flatten)]
    pub edit: AppliedEdit,
    pub remaining: Vec<FinalIssue>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analysis/proofread
pub async fn handle_proofread(
    State(state): State<AppState>,
    Json(req): Json<ProofreadRequest>,
) -> Result<Json<AnalysisResponse>, AppError> {
    validate_document(&req.document, state.config.min_document_chars)?;
    let mode = WritingMode::from(req.mode);

    let external = if req.include_llm {
        external_candidates(&state, &req.document, &mode).await
    } else {
        Vec::new()
    };

    let outcome = analyze_with(
        &AnalysisRequest {
            document: &req.document,
            regions_needed: false,
            mode,
            categories: req.categories,
        },
        external,
    );
    info!(
        "Proofread: {} issues ({} raw candidates)",
        outcome.issues.len(),
        outcome.metrics.raw_candidates
    );

    Ok(Json(AnalysisResponse {
        issues: outcome.issues,
        metrics: outcome.metrics,
    }))
}

/// POST /api/v1/analysis/email
pub async fn handle_email_analysis(
    State(state): State<AppState>,
    Json(req): Json<EmailAnalysisRequest>,
) -> Result<Json<EmailAnalysisResponse>, AppError> {
    validate_document(&req.document, state.config.min_document_chars)?;

    let outcome = analyze_with(
        &AnalysisRequest {
            document: &req.document,
            regions_needed: true,
            mode: WritingMode::Email(EmailContext {
                recipient_type: req.recipient_type,
                purpose: req.purpose,
                required_tone: req.required_tone,
            }),
            categories: req.categories,
        },
        Vec::new(),
    );
    info!("Email analysis: {} issues", outcome.issues.len());

    let regions = outcome.regions.unwrap_or_default();
    Ok(Json(EmailAnalysisResponse {
        issues: outcome.issues,
        metrics: outcome.metrics,
        region_spans: regions.spans(&req.document),
        regions,
    }))
}

/// POST /api/v1/analysis/apply
pub async fn handle_apply(Json(req): Json<ApplyRequest>) -> Result<Json<ApplyResponse>, AppError> {
    let edit = apply_issue(&req.document, &req.issue)
        .map_err(|e| AppError::UnprocessableEntity(e.to_string()))?;
    let submitted = req.remaining.len();
    let remaining = rebase_issues(req.remaining, &req.issue, edit.shift);
    info!(
        "Applied '{}' issue ({} of {submitted} remaining issues kept)",
        req.issue.issue_type,
        remaining.len()
    );
    Ok(Json(ApplyResponse { edit, remaining }))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Rejects documents the engine should never see.
pub fn validate_document(document: &str, min_chars: usize) -> Result<(), AppError> {
    let trimmed = document.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation("Document is empty".to_string()));
    }
    if trimmed.chars().count() < min_chars {
        return Err(AppError::Validation(format!(
            "Document must be at least {min_chars} characters"
        )));
    }
    Ok(())
}

/// Candidates from the configured external source. A failing source is
/// logged and contributes nothing.
async fn external_candidates(
    state: &AppState,
    document: &str,
    mode: &WritingMode,
) -> Vec<CandidateIssue> {
    let Some(source) = state.issue_source.as_ref() else {
        return Vec::new();
    };
    match source.detect(document, mode).await {
        Ok(candidates) => candidates,
        Err(e) => {
            warn!("Issue source '{}' failed, continuing without it: {e}", source.name());
            Vec::new()
        }
    }
}
