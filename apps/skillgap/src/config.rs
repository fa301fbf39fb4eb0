use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_TOKEN_FILE: &str = "skillgap/token";

/// Client configuration loaded from environment variables.
/// Fails at startup if the backend URL is neither given nor set.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend origin without the `/api` prefix, e.g. `https://skillgap.example.com`.
    pub backend_url: String,
    /// File holding the persisted bearer token.
    pub token_file: PathBuf,
    pub rust_log: String,
}

impl Config {
    /// `backend_url` takes precedence over `SKILLGAP_BACKEND_URL`.
    pub fn from_env(backend_url: Option<&str>) -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let backend_url = match backend_url {
            Some(url) => url.to_string(),
            None => require_env("SKILLGAP_BACKEND_URL")?,
        };

        let token_file = match std::env::var("SKILLGAP_TOKEN_FILE") {
            Ok(path) => PathBuf::from(path),
            Err(_) => default_token_file()?,
        };

        Ok(Config {
            backend_url: normalize_backend_url(&backend_url),
            token_file,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn default_token_file() -> Result<PathBuf> {
    let base = dirs::config_dir()
        .context("No config directory available; set SKILLGAP_TOKEN_FILE explicitly")?;
    Ok(base.join(DEFAULT_TOKEN_FILE))
}

fn normalize_backend_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
