//! Error types for the quote tool.

use rental_core::{ValidationError, WireError};

/// Result type alias for quote operations.
pub type QuoteResult<T> = Result<T, QuoteError>;

#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to load config {path}: {reason}")]
    ConfigLoadFailed { path: String, reason: String },

    // =========================================================================
    // Input Errors
    // =========================================================================
    #[error("Failed to read {source_name}: {reason}")]
    ReadFailed { source_name: String, reason: String },

    #[error(transparent)]
    Wire(#[from] WireError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    // =========================================================================
    // Output Errors
    // =========================================================================
    #[error("Failed to write output: {0}")]
    WriteFailed(String),
}

impl From<serde_json::Error> for QuoteError {
    fn from(err: serde_json::Error) -> Self {
        QuoteError::WriteFailed(err.to_string())
    }
}
