//! Configuration management for the batchview client
//!
//! Resolved once at process start from the environment and injected into the
//! components that need it. Nothing else reads these variables.

use crate::error::{CliError, Result};
use batchview_common::pagination::DEFAULT_ROWS_PER_PAGE;
use serde::Serialize;
use std::time::Duration;

// ============================================================================
// Client Configuration Constants
// ============================================================================

/// Default collaborator service URL when not specified via environment variable.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Default per-request timeout in seconds. Large uploads and server-side
/// processing share this budget, so it is generous.
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 300;

/// Largest file the server accepts (50 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

/// Most rows the data endpoint returns in one call.
pub const MAX_FETCH_LIMIT: usize = 1000;

/// Client configuration
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Base URL of the collaborator service, without trailing slash
    pub api_url: String,

    /// Per-request timeout
    #[serde(with = "duration_secs")]
    pub timeout: Duration,

    /// Upper bound on uploaded file size in bytes
    pub max_upload_bytes: u64,

    /// Rows per page; fixed for the process lifetime
    pub rows_per_page: usize,

    /// Row limit for batch retrieval
    pub fetch_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_API_TIMEOUT_SECS),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            fetch_limit: MAX_FETCH_LIMIT,
        }
    }
}

impl Config {
    /// Load config from environment variables
    ///
    /// - `BATCHVIEW_API_URL`
    /// - `BATCHVIEW_API_TIMEOUT_SECS`
    /// - `BATCHVIEW_MAX_UPLOAD_BYTES`
    /// - `BATCHVIEW_ROWS_PER_PAGE`
    /// - `BATCHVIEW_FETCH_LIMIT`
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("BATCHVIEW_API_URL") {
            config.set_api_url(url)?;
        }

        if let Some(secs) = parse_var::<u64>("BATCHVIEW_API_TIMEOUT_SECS")? {
            if secs == 0 {
                return Err(CliError::config("BATCHVIEW_API_TIMEOUT_SECS must be greater than 0"));
            }
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(bytes) = parse_var("BATCHVIEW_MAX_UPLOAD_BYTES")? {
            config.max_upload_bytes = bytes;
        }

        if let Some(rows) = parse_var::<usize>("BATCHVIEW_ROWS_PER_PAGE")? {
            if rows == 0 {
                return Err(CliError::config("BATCHVIEW_ROWS_PER_PAGE must be greater than 0"));
            }
            config.rows_per_page = rows;
        }

        if let Some(limit) = parse_var::<usize>("BATCHVIEW_FETCH_LIMIT")? {
            config.fetch_limit = limit.clamp(1, MAX_FETCH_LIMIT);
        }

        Ok(config)
    }

    /// Set the base URL; must be http(s), trailing slashes are dropped
    pub fn set_api_url(&mut self, url: impl Into<String>) -> Result<()> {
        let url = url.into();
        let trimmed = url.trim().trim_end_matches('/');
        let parsed = reqwest::Url::parse(trimmed)
            .map_err(|e| CliError::config(format!("Invalid API URL '{}': {}", url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CliError::config(format!(
                "API URL '{}' must use http or https",
                url
            )));
        }
        self.api_url = trimmed.to_string();
        Ok(())
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| CliError::config(format!("{} has invalid value '{}': {}", name, raw, e))),
        Err(_) => Ok(None),
    }
}

mod duration_secs {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }
}
