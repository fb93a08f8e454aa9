//! Backend configuration.
//!
//! Resolves where the agreement backend lives. The `API_BASE_URL` environment variable
//! wins over `config.toml`, which wins over the local development default.

use serde::Deserialize;

/// Backend URL used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

/// Request timeout used when nothing else is configured. PDF extraction is slow.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Connection settings for the agreement backend
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL, e.g. `http://localhost:5000`
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl BackendConfig {
    /// Applies the `API_BASE_URL` override, if set and non-empty.
    #[must_use]
    pub fn with_env_override(self) -> Self {
        self.with_base_url_override(std::env::var("API_BASE_URL").ok())
    }

    fn with_base_url_override(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }
        self
    }
}
