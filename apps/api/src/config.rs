use anyhow::{Context, Result};

use crate::layout::page::{clamp_scale, DEFAULT_PREVIEW_SCALE};

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values abort startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Enables the in-process Claude backend.
    pub anthropic_api_key: Option<String>,
    /// Remote generation proxy; takes precedence over `anthropic_api_key`.
    pub generation_endpoint: Option<String>,
    /// On-screen preview scale, clamped to [0.3, 1.0].
    pub preview_scale: f32,
    pub port: u16,
    pub rust_log: String,
    /// Idle sessions older than this are evicted. `0` keeps sessions forever.
    pub session_ttl_minutes: u64,
}

pub const DEFAULT_SESSION_TTL_MINUTES: u64 = 120;

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let preview_scale = match optional_env("PREVIEW_SCALE") {
            Some(raw) => raw
                .parse::<f32>()
                .context("PREVIEW_SCALE must be a number")?,
            None => DEFAULT_PREVIEW_SCALE,
        };

        Ok(Config {
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            generation_endpoint: optional_env("GENERATION_ENDPOINT"),
            preview_scale: clamp_scale(preview_scale),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            session_ttl_minutes: match optional_env("SESSION_TTL_MINUTES") {
                Some(raw) => raw
                    .parse::<u64>()
                    .context("SESSION_TTL_MINUTES must be a whole number of minutes")?,
                None => DEFAULT_SESSION_TTL_MINUTES,
            },
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            anthropic_api_key: None,
            generation_endpoint: None,
            preview_scale: DEFAULT_PREVIEW_SCALE,
            port: 8080,
            rust_log: "info".to_string(),
            session_ttl_minutes: DEFAULT_SESSION_TTL_MINUTES,
        }
    }
}

/// Reads `key`, treating unset and blank the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
