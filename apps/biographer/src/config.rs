use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Placeholder shipped in the sample `.env`; treated the same as a missing key.
pub const PLACEHOLDER_API_KEY: &str = "TU_CLAVE_AQUI";

const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
/// Relative to the repository root, where the sample dataset ships.
const DEFAULT_DATASET_PATH: &str = "demos/dataset_adopcion.csv";
const DEFAULT_SAMPLE_SIZE: usize = 3;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Completion service credential, resolved once at startup.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    Unconfigured,
    Configured(String),
}

impl Credential {
    /// Absent, blank and placeholder keys all resolve to `Unconfigured`.
    pub fn resolve(raw: Option<String>) -> Self {
        match raw {
            Some(key) if !key.trim().is_empty() && key.trim() != PLACEHOLDER_API_KEY => {
                Credential::Configured(key.trim().to_string())
            }
            _ => Credential::Unconfigured,
        }
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, Credential::Configured(_))
    }
}

// Keeps the key out of logs.
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credential::Unconfigured => f.write_str("Unconfigured"),
            Credential::Configured(_) => f.write_str("Configured(***)"),
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub credential: Credential,
    pub api_url: String,
    pub dataset_path: PathBuf,
    pub sample_size: usize,
    pub completion_timeout: Duration,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            credential: Credential::resolve(std::env::var("OPENAI_API_KEY").ok()),
            api_url: std::env::var("OPENAI_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            dataset_path: std::env::var("DATASET_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATASET_PATH)),
            sample_size: optional_env("SAMPLE_SIZE")
                .map(|v| v.parse::<usize>())
                .transpose()
                .context("SAMPLE_SIZE must be a non-negative integer")?
                .unwrap_or(DEFAULT_SAMPLE_SIZE),
            completion_timeout: Duration::from_secs(
                optional_env("COMPLETION_TIMEOUT_SECS")
                    .map(|v| v.parse::<u64>())
                    .transpose()
                    .context("COMPLETION_TIMEOUT_SECS must be a whole number of seconds")?
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
