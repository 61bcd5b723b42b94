//! # Validation Module
//!
//! Boundary checks for values that come from a person rather than the
//! backend: ids typed on a command line, a selection restored from a URL.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Backend JSON ─────► wire.rs: lenient, bad numbers become 0            │
//! │                                                                         │
//! │  User input ───────► THIS MODULE: typed errors, caller decides         │
//! │                                                                         │
//! │  pricing.rs ───────► assumes both of the above, never fails            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::types::{Cart, Selection};
use crate::{MAX_ID_LEN, MAX_PERCENTAGE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a cart line or coupon id typed by a user.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 64 characters
///
/// ## Example
/// ```rust
/// use rental_core::validation::validate_id;
///
/// assert!(validate_id("line id", "12").is_ok());
/// assert!(validate_id("line id", "  ").is_err());
/// ```
pub fn validate_id(field: &str, id: &str) -> ValidationResult<()> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if id.chars().count() > MAX_ID_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_ID_LEN,
        });
    }

    Ok(())
}

/// Returns every selected line id that is not in the cart.
///
/// An empty result means the selection is consistent with the cart.
pub fn unknown_lines(cart: &Cart, selection: &Selection) -> Vec<ValidationError> {
    selection
        .line_ids()
        .filter(|id| !cart.contains(id.as_str()))
        .map(|id| ValidationError::UnknownLine(id.to_string()))
        .collect()
}

/// Fails on the first selected line id that is not in the cart.
pub fn validate_selection(cart: &Cart, selection: &Selection) -> ValidationResult<()> {
    match unknown_lines(cart, selection).into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Validates a percentage coupon value (0 to 100 inclusive).
pub fn validate_percentage(value: Decimal) -> ValidationResult<()> {
    if value.is_sign_negative() || value > Decimal::from(MAX_PERCENTAGE) {
        return Err(ValidationError::OutOfRange {
            field: "percentage".to_string(),
            min: 0,
            max: i64::from(MAX_PERCENTAGE),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
