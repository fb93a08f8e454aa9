//! Unified error types and result handling.
//!
//! Every fallible operation in the crate returns [`Result`]. Validation failures carry the
//! full per-field error map so the bot layer can show each message next to its field.

use crate::core::validation::ValidationErrors;
use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// One or more form fields failed client-side validation
    #[error("Validation failed: {errors}")]
    Validation {
        /// Field-level messages
        errors: ValidationErrors,
    },

    /// The user supplied a file the backend cannot process
    #[error("Unsupported input: {message}")]
    UnsupportedInput {
        /// Why the input was rejected
        message: String,
    },

    /// No agreement with the given ID exists in the current snapshot
    #[error("Agreement not found: {id}")]
    AgreementNotFound {
        /// The ID that was looked up
        id: String,
    },

    /// The backend answered with a non-2xx status
    #[error("Backend returned {status}: {message}")]
    Backend {
        /// HTTP status code
        status: u16,
        /// Error text reported by the backend, or the request that failed
        message: String,
    },

    /// Network failure or undecodable response
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Serenity/Poise framework error
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation { errors }
    }
}

impl Error {
    /// Returns true for errors raised before any request reached the backend.
    #[must_use]
    pub const fn is_client_side(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. } | Self::UnsupportedInput { .. } | Self::AgreementNotFound { .. }
        )
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
