use anyhow::{bail, Context, Result};

const DEFAULT_AI_BATCH_DELAY_MS: u64 = 1000;

/// Application configuration loaded from environment variables.
/// Fails at startup when AI matching is enabled without an API key.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: Option<String>,
    pub enable_ai_matching: bool,
    pub ai_batch_delay_ms: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let anthropic_api_key = std::env::var("ANTHROPIC_API_KEY")
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        let enable_ai_matching = parse_flag(std::env::var("ENABLE_AI_MATCHING").ok().as_deref());
        if enable_ai_matching && anthropic_api_key.is_none() {
            bail!("ENABLE_AI_MATCHING is set but 'ANTHROPIC_API_KEY' is not");
        }

        Ok(Config {
            anthropic_api_key,
            enable_ai_matching,
            ai_batch_delay_ms: match std::env::var("AI_BATCH_DELAY_MS") {
                Ok(raw) => raw
                    .trim()
                    .parse::<u64>()
                    .context("AI_BATCH_DELAY_MS must be a number of milliseconds")?,
                Err(_) => DEFAULT_AI_BATCH_DELAY_MS,
            },
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// "1", "true", "yes" and "on" (any case) enable a flag; anything else disables it.
fn parse_flag(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("1" | "true" | "yes" | "on")
    )
}
