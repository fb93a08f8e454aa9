//! Application settings loaded from config.toml
//!
//! The file is optional. Every section and key has a default, so a missing file or a
//! partial one is fine; a file that exists but does not parse is an error.

use crate::config::backend::BackendConfig;
use crate::core::events::DEFAULT_UPCOMING_HORIZON_DAYS;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Default location of the settings file
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Settings for the rendered views
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Window for the upcoming list and counter, in days
    pub upcoming_horizon_days: i64,
    /// Maximum events listed in one message before truncating
    pub max_listed_events: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            upcoming_horizon_days: DEFAULT_UPCOMING_HORIZON_DAYS,
            max_listed_events: 25,
        }
    }
}

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Backend connection settings
    pub backend: BackendConfig,
    /// View settings
    pub dashboard: DashboardConfig,
}

impl AppConfig {
    fn validate(self) -> Result<Self> {
        if self.dashboard.upcoming_horizon_days < 0 {
            return Err(Error::Config {
                message: "dashboard.upcoming_horizon_days must not be negative".to_string(),
            });
        }
        if self.dashboard.max_listed_events == 0 {
            return Err(Error::Config {
                message: "dashboard.max_listed_events must be at least 1".to_string(),
            });
        }
        if self.backend.timeout_secs == 0 {
            return Err(Error::Config {
                message: "backend.timeout_secs must be at least 1".to_string(),
            });
        }
        Ok(self)
    }
}

/// Parses settings from TOML text.
///
/// # Errors
/// Returns an error if the TOML syntax is invalid or a value is out of range.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let config: AppConfig = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;
    config.validate()
}

/// Loads settings from a TOML file.
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A value is out of range
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;
    parse_config(&contents)
}

/// Loads `config.toml` if present, falls back to defaults if not, then applies
/// environment overrides.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_app_configuration() -> Result<AppConfig> {
    let path = Path::new(DEFAULT_CONFIG_PATH);
    let mut config = if path.exists() {
        load_config(path)?
    } else {
        info!("No {} found, using default settings", DEFAULT_CONFIG_PATH);
        AppConfig::default()
    };
    config.backend = config.backend.with_env_override();
    info!(backend = %config.backend.base_url, "Configuration loaded");
    Ok(config)
}
