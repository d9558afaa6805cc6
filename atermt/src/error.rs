//! Error handling module for the atermt CLI.

use aterm_afun::ConfigError;
use thiserror::Error;

/// Main error type for the atermt CLI application.
#[derive(Error, Debug)]
pub enum AtermtError {
    /// Registry options were rejected.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Command arguments are out of range.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A registry property did not hold during a run.
    #[error("Verification failed: {0}")]
    Verification(String),

    /// The tracing subscriber could not be installed.
    #[error("Failed to initialize logging: {0}")]
    Logging(String),

    /// Error when writing output fails.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error when JSON serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using AtermtError.
pub type Result<T> = std::result::Result<T, AtermtError>;
