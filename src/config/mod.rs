/// Backend location and HTTP client settings
pub mod backend;

/// Discord-specific settings read from the environment
pub mod discord;

/// Application settings loaded from config.toml
pub mod settings;

pub use settings::{AppConfig, DashboardConfig, load_app_configuration};
