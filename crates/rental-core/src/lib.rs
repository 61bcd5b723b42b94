//! # rental-core: Pure Pricing Logic for the Rental Marketplace
//!
//! Everything the cart and order views need to turn a fetched cart into a
//! price breakdown, as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Rental Marketplace Pricing                          │
//! │                                                                         │
//! │  Backend REST ──► { cartItems, coupons } JSON                           │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ rental-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   wire    │  │   types   │  │  coupon   │  │  pricing  │  │   │
//! │  │   │  lenient  │─►│ CartLine  │─►│CouponBook │─►│ subtotal  │  │   │
//! │  │   │  decode   │  │ Selection │  │ available │  │ discount  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  │  total    │  │   │
//! │  │                                                └───────────┘  │   │
//! │  │   NO I/O • NO NETWORK • NO CLOCK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │                 Cart view / Order view / rental-quote CLI              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (CartLine, Coupon, Selection, ...)
//! - [`money`] - Whole-unit integer money with saturating arithmetic
//! - [`pricing`] - Subtotal, discount and final total
//! - [`coupon`] - The available coupon set
//! - [`wire`] - Lenient decoding of the backend cart response
//! - [`validation`] - Boundary checks for ids and selections
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use rental_core::pricing::{compute_discount, compute_final_total, compute_subtotal};
//! use rental_core::{CartLine, Coupon, CouponKind, Money, Selection};
//! use rust_decimal::Decimal;
//!
//! let lines = vec![CartLine::new("tent-1", Money::from_units(10_000), 2)];
//! let selection = Selection::of(["tent-1"]);
//!
//! let subtotal = compute_subtotal(&lines, &selection);
//! let coupon = Coupon::new("welcome", CouponKind::PercentageDiscount, Decimal::from(10));
//! let discount = compute_discount(subtotal, Some(&coupon));
//!
//! assert_eq!(subtotal.units(), 20_000);
//! assert_eq!(discount.units(), 2_000);
//! assert_eq!(compute_final_total(subtotal, discount).units(), 18_000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod coupon;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;
pub mod wire;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use coupon::CouponBook;
pub use error::{CoreError, CoreResult, ValidationError, WireError};
pub use money::Money;
pub use pricing::{DiscountPolicy, PriceBreakdown};
pub use types::*;
pub use wire::CartResponse;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Longest cart line or coupon id accepted at the input boundary.
pub const MAX_ID_LEN: usize = 64;

/// Upper bound of a percentage coupon's value.
pub const MAX_PERCENTAGE: u32 = 100;
