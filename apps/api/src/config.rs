use anyhow::{Context, Result};

use crate::latex::extract::DEFAULT_FALLBACK_NAME;

const DEFAULT_MAX_LATEX_BYTES: usize = 256 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable has a default; startup only fails on values that do not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Contact name used when an uploaded résumé has none.
    pub fallback_name: String,
    /// Ceiling on request bodies and on the `latex` field of a parse request.
    pub max_latex_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            fallback_name: DEFAULT_FALLBACK_NAME.to_string(),
            max_latex_bytes: DEFAULT_MAX_LATEX_BYTES,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            fallback_name: non_blank_env("FALLBACK_NAME")
                .unwrap_or_else(|| DEFAULT_FALLBACK_NAME.to_string()),
            max_latex_bytes: env_or("MAX_LATEX_BYTES", &DEFAULT_MAX_LATEX_BYTES.to_string())
                .parse::<usize>()
                .context("MAX_LATEX_BYTES must be a byte count")?,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn non_blank_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
