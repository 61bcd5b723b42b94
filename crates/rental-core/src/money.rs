//! # Money Module
//!
//! Provides the `Money` type for rental prices, discounts and totals.
//!
//! ## Whole Units Only
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Rental prices are quoted in whole currency units (₩10,000 / day).      │
//! │                                                                         │
//! │  Every intermediate value is FLOORED back to a whole unit:              │
//! │    20,000 × 12.5% = 2,500        → 2,500                                │
//! │    9,999  × 10%   = 999.9        → 999                                  │
//! │    fixed coupon 4,999.99         → 4,999                                │
//! │                                                                         │
//! │  Fractions come from coupons only, and are held as exact decimals       │
//! │  (rust_decimal) until the final floor. No floats anywhere.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rental_core::money::Money;
//!
//! let per_day = Money::from_units(10_000);
//! let line = per_day.multiply_quantity(3);
//! assert_eq!(line.units(), 30_000);
//! assert_eq!(line.to_string(), "30,000");
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole currency units.
///
/// ## Design Decisions
/// - **i64 (signed)**: a final total may legitimately go negative when a
///   fixed coupon exceeds the subtotal
/// - **Saturating arithmetic**: a hostile backend payload (huge price ×
///   huge quantity) pins at `i64::MAX` instead of wrapping or panicking
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Largest representable amount.
    pub const MAX: Money = Money(i64::MAX);

    /// Creates a Money value from whole currency units.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the value in whole currency units.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value, saturating at `i64::MAX`.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.saturating_abs())
    }

    /// Floors an exact decimal amount to whole units.
    ///
    /// Values outside the `i64` range saturate.
    ///
    /// ```rust
    /// use rental_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// assert_eq!(Money::floor_decimal(Decimal::new(499_999, 2)).units(), 4_999);
    /// assert_eq!(Money::floor_decimal(Decimal::new(-25, 1)).units(), -3);
    /// ```
    pub fn floor_decimal(amount: Decimal) -> Money {
        let floored = amount.round_dp_with_strategy(0, RoundingStrategy::ToNegativeInfinity);
        match floored.to_i64() {
            Some(units) => Money(units),
            None if floored.is_sign_negative() => Money(i64::MIN),
            None => Money::MAX,
        }
    }

    /// Returns `floor(self × percent / 100)`.
    ///
    /// ```rust
    /// use rental_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let subtotal = Money::from_units(9_999);
    /// assert_eq!(subtotal.percent_of(Decimal::from(10)).units(), 999);
    /// ```
    pub fn percent_of(&self, percent: Decimal) -> Money {
        let scaled = Decimal::from(self.0)
            .checked_mul(percent)
            .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED));
        match scaled {
            Some(amount) => Money::floor_decimal(amount),
            // Only reachable with a percent far outside 0..=100
            None if self.is_negative() != percent.is_sign_negative() => Money(i64::MIN),
            None => Money::MAX,
        }
    }

    /// Multiplies a unit price by a quantity, saturating on overflow.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Groups thousands with commas: `-12,500`.
///
/// The currency symbol is a presentation concern and is added by the caller.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
        if self.0 < 0 {
            grouped.push('-');
        }
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }
        f.pad(&grouped)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
