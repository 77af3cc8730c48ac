pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::errors::AppError;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route(
            "/api/v1/analysis/proofread",
            post(handlers::handle_proofread),
        )
        .route(
            "/api/v1/analysis/email",
            post(handlers::handle_email_analysis),
        )
        .route("/api/v1/analysis/apply", post(handlers::handle_apply))
        .fallback(not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::analysis::llm_source::IssueSource;
    use crate::analysis::models::{CandidateIssue, Category, Severity, WritingMode};
    use crate::config::Config;

    fn app() -> Router {
        build_router(AppState {
            config: Config::default(),
            issue_source: None,
        })
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let response = app()
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_proofread_returns_issues() {
        let (status, body) = post_json(
            app(),
            "/api/v1/analysis/proofread",
            json!({
                "document": "I recieve alot of messages every day.",
                "categories": {"grammar": false, "style": false}
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let issues = body["issues"].as_array().unwrap();
        assert_eq!(issues[0]["type"], "spelling");
        assert_eq!(issues[0]["original_text"], "recieve");
        assert_eq!(issues[0]["startIndex"], 2);
        assert_eq!(issues[0]["endIndex"], 9);
        assert_eq!(issues[0]["status"], "open");
        assert!(body["metrics"]["raw_candidates"].as_u64().unwrap() >= 2);
    }

    #[tokio::test]
    async fn test_short_document_rejected() {
        let (status, body) = post_json(
            app(),
            "/api/v1/analysis/proofread",
            json!({"document": "Too short"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_unknown_category_key_rejected() {
        let (status, _) = post_json(
            app(),
            "/api/v1/analysis/proofread",
            json!({"document": "A perfectly ordinary sentence.", "categories": {"vibes": true}}),
        )
        .await;
        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn test_email_analysis_returns_regions() {
        let (status, body) = post_json(
            app(),
            "/api/v1/analysis/email",
            json!({
                "document": "Subject: Invoice\nHi Dana,\nPlease send the invoice ASAP.\nThanks,\nEli",
                "recipient_type": "client",
                "purpose": "request",
                "required_tone": "polite"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["regions"]["greeting"], "Hi Dana,");
        assert!(body["issues"]
            .as_array()
            .unwrap()
            .iter()
            .any(|i| i["original_text"] == "ASAP"));
    }

    #[tokio::test]
    async fn test_apply_and_stale_apply() {
        let issue = json!({
            "type": "spelling", "severity": "medium", "message": "Misspelling",
            "original_text": "recieve", "suggestion_text": "receive",
            "startIndex": 2, "endIndex": 9, "status": "open"
        });
        let (status, body) = post_json(
            app(),
            "/api/v1/analysis/apply",
            json!({"document": "I recieve mail", "issue": issue.clone()}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["document"], "I receive mail");

        let (status, body) = post_json(
            app(),
            "/api/v1/analysis/apply",
            json!({"document": "I receive mail", "issue": issue}),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "UNPROCESSABLE_ENTITY");
    }

    #[tokio::test]
    async fn test_apply_rebases_remaining_issues() {
        let issue = |original: &str, suggestion: &str, start: usize, end: usize| {
            json!({
                "type": "spelling", "severity": "medium", "message": "Misspelling",
                "original_text": original, "suggestion_text": suggestion,
                "startIndex": start, "endIndex": end, "status": "open"
            })
        };
        let (status, body) = post_json(
            app(),
            "/api/v1/analysis/apply",
            json!({
                "document": "Café: I recieve alot of mail",
                "issue": issue("alot", "a lot", 16, 20),
                "remaining": [issue("recieve", "receive", 8, 15), issue("mail", "email", 24, 28)]
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["document"], "Café: I recieve a lot of mail");
        assert_eq!(body["shift"], 1);
        let remaining = body["remaining"].as_array().unwrap();
        assert_eq!(remaining.len(), 2);
        assert_eq!(remaining[0]["startIndex"], 8);
        assert_eq!(remaining[1]["startIndex"], 25);
        assert_eq!(remaining[1]["endIndex"], 29);
    }

    struct FixedSource;

    #[async_trait]
    impl IssueSource for FixedSource {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn detect(&self, _: &str, _: &WritingMode) -> Result<Vec<CandidateIssue>, AppError> {
            Ok(vec![CandidateIssue {
                category: Category::Grammar,
                severity: Severity::High,
                message: "From source".to_string(),
                explanation: None,
                claimed_text: String::new(),
                suggestion: "The".to_string(),
                start: 0,
                end: 3,
                source: self.name().to_string(),
            }])
        }
    }

    struct FailingSource;

    #[async_trait]
    impl IssueSource for FailingSource {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn detect(&self, _: &str, _: &WritingMode) -> Result<Vec<CandidateIssue>, AppError> {
            Err(AppError::Llm("upstream down".to_string()))
        }
    }

    fn app_with(source: Arc<dyn IssueSource>) -> Router {
        build_router(AppState {
            config: Config::default(),
            issue_source: Some(source),
        })
    }

    #[tokio::test]
    async fn test_external_source_merged_on_request() {
        let doc = json!({"document": "Our committee approved the budget.", "include_llm": true});
        let (status, body) = post_json(app_with(Arc::new(FixedSource)), "/api/v1/analysis/proofread", doc).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["metrics"]["external_candidates"], 1);
        assert!(body["issues"]
            .as_array()
            .unwrap()
            .iter()
            .any(|i| i["message"] == "From source" && i["original_text"] == "Our"));
    }

    #[tokio::test]
    async fn test_failing_source_does_not_fail_request() {
        let doc = json!({"document": "I recieve alot of messages every day.", "include_llm": true});
        let (status, body) =
            post_json(app_with(Arc::new(FailingSource)), "/api/v1/analysis/proofread", doc).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["metrics"]["external_candidates"], 0);
        assert!(!body["issues"].as_array().unwrap().is_empty());
    }
}
