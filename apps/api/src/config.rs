use anyhow::{bail, Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup on malformed values; everything has a default.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Documents shorter than this (in chars, after trimming) are rejected.
    pub min_document_chars: usize,
    pub anthropic_api_key: Option<String>,
    /// Merge LLM grammar issues into proofreading when requested.
    pub enable_llm_grammar: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let anthropic_api_key = optional_env("ANTHROPIC_API_KEY");
        let enable_llm_grammar = parse_bool(&env_or("ENABLE_LLM_GRAMMAR", "false"))
            .context("ENABLE_LLM_GRAMMAR must be true or false")?;
        if enable_llm_grammar && anthropic_api_key.is_none() {
            bail!("ENABLE_LLM_GRAMMAR is set but ANTHROPIC_API_KEY is not");
        }

        Ok(Config {
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            min_document_chars: env_or("MIN_DOCUMENT_CHARS", "20")
                .parse::<usize>()
                .context("MIN_DOCUMENT_CHARS must be a non-negative integer")?,
            anthropic_api_key,
            enable_llm_grammar,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            min_document_chars: 20,
            anthropic_api_key: None,
            enable_llm_grammar: false,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("'{other}' is not a boolean"),
    }
}
