mod analysis;
mod config;
mod errors;
mod llm_client;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::llm_source::{IssueSource, LlmGrammarSource};
use crate::analysis::rules::REGISTRY;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME").replace('-', "_"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting writing API v{}", env!("CARGO_PKG_VERSION"));

    // Compile the rule registry up front so a bad pattern shows in startup logs
    info!("Rule registry ready: {} detectors", REGISTRY.len());

    let issue_source = build_issue_source(&config)?;

    let state = AppState {
        config: config.clone(),
        issue_source,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// The LLM grammar source is only wired up when explicitly enabled.
fn build_issue_source(config: &Config) -> Result<Option<Arc<dyn IssueSource>>> {
    if !config.enable_llm_grammar {
        info!("LLM grammar source disabled");
        return Ok(None);
    }
    let api_key = config
        .anthropic_api_key
        .clone()
        .context("ANTHROPIC_API_KEY is required for the LLM grammar source")?;
    let llm = LlmClient::new(api_key).context("Failed to build LLM client")?;
    info!("LLM grammar source enabled (model: {})", llm_client::MODEL);
    Ok(Some(Arc::new(LlmGrammarSource::new(llm))))
}
