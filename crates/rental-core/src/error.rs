//! # Error Types
//!
//! Domain-specific error types for rental-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  rental-core errors (this file)                                        │
//! │  ├── CoreError        - Umbrella for callers that want one type        │
//! │  ├── ValidationError  - Boundary checks (ids, selections, percents)    │
//! │  └── WireError        - Cart response is not a JSON object at all      │
//! │                                                                         │
//! │  rental-quote errors (app)                                             │
//! │  └── QuoteError       - Config, IO, and the above                      │
//! │                                                                         │
//! │  Pricing itself never fails: malformed numbers become 0 at the wire.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Wire error: {0}")]
    Wire(#[from] WireError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by [`crate::validation`] before values reach the calculator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// A selected cart line does not exist in the cart.
    ///
    /// ## When This Occurs
    /// - The cart was re-fetched after a line was removed in another tab
    /// - A stale id was passed on the command line
    #[error("Selected cart line not found: {0}")]
    UnknownLine(String),
}

// =============================================================================
// Wire Error
// =============================================================================

/// Errors decoding a cart response.
///
/// Only structural failures are errors. Bad field values are zeroed instead.
#[derive(Debug, Error)]
pub enum WireError {
    /// The document is not valid JSON (or could not be read).
    #[error("Invalid cart response JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The JSON root is not an object.
    #[error("Cart response must be a JSON object, got {found}")]
    NotAnObject { found: &'static str },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
