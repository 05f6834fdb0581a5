//! Client configuration resolved from CLI flags and environment variables.
//!
//! SYSTEM CONTEXT
//! ==============
//! `clap` reads `PORTFOLIO_API_URL` / `PORTFOLIO_TOKEN_PATH` (after `dotenvy`
//! has loaded any `.env` file) and hands the raw values here for validation
//! and defaulting.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const TOKEN_DIR_NAME: &str = "portfolio";
pub const TOKEN_FILE_NAME: &str = "session_token";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid API URL '{0}' (expected http:// or https://)")]
    InvalidApiUrl(String),
    #[error("no local data directory available; pass --token-path or set PORTFOLIO_TOKEN_PATH")]
    NoDataDir,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL without a trailing slash.
    pub api_url: String,
    /// File backing the persistent token store.
    pub token_path: PathBuf,
}

impl ClientConfig {
    /// Build a typed config from optional raw values.
    ///
    /// - `api_url`: defaults to [`DEFAULT_API_URL`]
    /// - `token_path`: defaults to `<data-local-dir>/portfolio/session_token`
    ///
    /// # Errors
    ///
    /// Returns an error if the URL scheme is not HTTP(S) or no default token
    /// location can be determined.
    pub fn new(api_url: Option<&str>, token_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let api_url = parse_api_url(api_url.unwrap_or(DEFAULT_API_URL))?;
        let token_path = match token_path {
            Some(path) => path,
            None => default_token_path()?,
        };
        Ok(Self { api_url, token_path })
    }
}

fn parse_api_url(raw: &str) -> Result<String, ConfigError> {
    let url = raw.trim().trim_end_matches('/');
    let invalid = || ConfigError::InvalidApiUrl(raw.to_owned());
    let parsed = reqwest::Url::parse(url).map_err(|_| invalid())?;
    if !matches!(parsed.scheme(), "http" | "https") || !parsed.has_host() {
        return Err(invalid());
    }
    Ok(url.to_owned())
}

fn default_token_path() -> Result<PathBuf, ConfigError> {
    dirs::data_local_dir()
        .map(|dir| dir.join(TOKEN_DIR_NAME).join(TOKEN_FILE_NAME))
        .ok_or(ConfigError::NoDataDir)
}
