//! Domain-level errors
//!
//! Only configuration can fail inside this crate. API failures are
//! normalized into `greenloop_common::ApiError` at the infrastructure edge.

use thiserror::Error;

/// Configuration loading or validation failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing configuration value: {0}")]
    Missing(String),

    #[error("Invalid {field}: {message}")]
    Invalid { field: &'static str, message: String },

    #[error("Config file not found: {0}")]
    NotFound(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Failed to read configuration: {0}")]
    Io(String),
}

impl ConfigError {
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid { field, message: message.into() }
    }
}

/// Result type alias for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
