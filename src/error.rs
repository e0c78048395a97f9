// src/error.rs

//! Unified error handling for the ingestion pipeline.
//!
//! Every failure is fatal: nothing in the pipeline catches and retries. Errors
//! propagate to the top-level run, which prints a diagnostic and exits
//! non-zero. A partially written checkpoint file is left on disk as-is.

use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// SQLite operation failed (includes constraint violations during load)
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Malformed checkpoint line encountered during aggregation
    #[error("Corrupt checkpoint at line {line}: {message}")]
    Checkpoint { line: usize, message: String },

    /// Relational invariant violated (e.g. duplicate stop code)
    #[error("Data integrity error: {0}")]
    Integrity(String),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a corrupt-checkpoint error for a 1-based line number.
    pub fn checkpoint(line: usize, message: impl std::fmt::Display) -> Self {
        Self::Checkpoint {
            line,
            message: message.to_string(),
        }
    }

    /// Create a data integrity error.
    pub fn integrity(message: impl Into<String>) -> Self {
        Self::Integrity(message.into())
    }
}
