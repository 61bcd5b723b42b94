//! # Pricing Calculator
//!
//! Subtotal, discount and final payable amount for a cart selection.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  lines + Selection ──► compute_subtotal ──► Σ price × qty (selected)    │
//! │                                │                                        │
//! │  CouponBook.resolve(selection) │                                        │
//! │            │                   ▼                                        │
//! │            └─────────► compute_discount                                 │
//! │                          ├── none / unknown  → 0                        │
//! │                          ├── FixedAmount     → floor(value)             │
//! │                          └── Percentage      → floor(subtotal×value/100)│
//! │                                │                                        │
//! │                                ▼                                        │
//! │                      DiscountPolicy (optional clamp)                    │
//! │                                │                                        │
//! │                                ▼                                        │
//! │                     compute_final_total → subtotal − discount           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything is recomputed from scratch whenever the selection changes.
//! None of these functions can fail.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::coupon::CouponBook;
use crate::money::Money;
use crate::types::{CartLine, Coupon, CouponId, CouponKind, Selection};

// =============================================================================
// Core Operations
// =============================================================================

/// Sums `unit_price × quantity` over the lines whose id is selected.
///
/// ```rust
/// use rental_core::pricing::compute_subtotal;
/// use rental_core::{CartLine, Money, Selection};
///
/// let lines = vec![
///     CartLine::new("1", Money::from_units(10_000), 2),
///     CartLine::new("2", Money::from_units(3_000), 1),
/// ];
/// assert_eq!(compute_subtotal(&lines, &Selection::of(["1"])).units(), 20_000);
/// assert_eq!(compute_subtotal(&lines, &Selection::new()).units(), 0);
/// ```
pub fn compute_subtotal(lines: &[CartLine], selection: &Selection) -> Money {
    lines
        .iter()
        .filter(|line| selection.contains(line.id.as_str()))
        .map(CartLine::line_total)
        .sum()
}

/// Discount granted by `coupon` on `subtotal`.
///
/// A fixed-amount discount is not capped at the subtotal; see
/// [`DiscountPolicy`] for the clamped variant.
///
/// ```rust
/// use rental_core::pricing::compute_discount;
/// use rental_core::{Coupon, CouponKind, Money};
/// use rust_decimal::Decimal;
///
/// let subtotal = Money::from_units(20_000);
/// let fixed = Coupon::new("f", CouponKind::FixedAmountDiscount, Decimal::from(5_000));
///
/// assert_eq!(compute_discount(subtotal, Some(&fixed)).units(), 5_000);
/// assert_eq!(compute_discount(subtotal, None).units(), 0);
/// ```
pub fn compute_discount(subtotal: Money, coupon: Option<&Coupon>) -> Money {
    match coupon {
        None => Money::zero(),
        Some(coupon) => match coupon.kind {
            CouponKind::FixedAmountDiscount => Money::floor_decimal(coupon.value),
            CouponKind::PercentageDiscount => subtotal.percent_of(coupon.value),
        },
    }
}

/// `subtotal − discount`. Negative when the discount exceeds the subtotal.
#[inline]
pub fn compute_final_total(subtotal: Money, discount: Money) -> Money {
    subtotal - discount
}

// =============================================================================
// Discount Policy
// =============================================================================

/// How a discount larger than the subtotal is treated.
///
/// ## Comparison
/// ```text
/// subtotal 3,000, fixed coupon 5,000
///
///   clamp_to_subtotal = false (default)   clamp_to_subtotal = true
///   discount  5,000                       discount  3,000
///   total    -2,000                       total         0
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DiscountPolicy {
    pub clamp_to_subtotal: bool,
}

impl DiscountPolicy {
    pub const fn clamped() -> Self {
        DiscountPolicy {
            clamp_to_subtotal: true,
        }
    }

    /// Applies the policy to a raw discount.
    pub fn apply(&self, subtotal: Money, discount: Money) -> Money {
        if self.clamp_to_subtotal {
            discount.min(subtotal.max(Money::zero()))
        } else {
            discount
        }
    }
}

// =============================================================================
// Price Breakdown
// =============================================================================

/// What the cart and order views display under the item list.
///
/// ## User Workflow
/// ```text
/// ┌───────────────────────────────────────────┐
/// │  Subtotal (2 items)            ₩45,000    │
/// │  Coupon SUMMER10               -₩4,500    │
/// │  ──────────────────────────────────────   │
/// │  Total                         ₩40,500    │
/// └───────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub subtotal: Money,
    pub discount: Money,
    pub total: Money,

    /// The coupon actually applied; `None` when none was chosen or it was
    /// not available.
    pub coupon_id: Option<CouponId>,

    /// Number of cart lines that contributed to the subtotal.
    pub selected_lines: usize,
}

impl PriceBreakdown {
    /// Runs the full calculation for one render of the cart view.
    pub fn compute(
        lines: &[CartLine],
        selection: &Selection,
        coupons: &CouponBook,
        policy: DiscountPolicy,
    ) -> Self {
        let subtotal = compute_subtotal(lines, selection);
        let coupon = coupons.resolve(selection);
        let discount = policy.apply(subtotal, compute_discount(subtotal, coupon));

        PriceBreakdown {
            subtotal,
            discount,
            total: compute_final_total(subtotal, discount),
            coupon_id: coupon.map(|c| c.id.clone()),
            selected_lines: lines
                .iter()
                .filter(|line| selection.contains(line.id.as_str()))
                .count(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn line(id: &str, price: i64, qty: u32) -> CartLine {
        CartLine::new(id, Money::from_units(price), qty)
    }

    fn percent(value: i64) -> Coupon {
        Coupon::new("pct", CouponKind::PercentageDiscount, Decimal::from(value))
    }

    fn fixed(value: i64) -> Coupon {
        Coupon::new("fix", CouponKind::FixedAmountDiscount, Decimal::from(value))
    }

    #[test]
    fn test_subtotal_empty_cart() {
        assert!(compute_subtotal(&[], &Selection::of(["1", "2"])).is_zero());
    }

    #[test]
    fn test_subtotal_single_line() {
        let lines = [line("1", 10_000, 2)];
        assert_eq!(compute_subtotal(&lines, &Selection::of(["1"])).units(), 20_000);
    }

    #[test]
    fn test_subtotal_ignores_unselected_lines() {
        let lines = [line("1", 10_000, 2), line("2", 7_000, 3)];
        assert_eq!(compute_subtotal(&lines, &Selection::of(["2"])).units(), 21_000);
        assert_eq!(compute_subtotal(&lines, &Selection::of(["9"])).units(), 0);
    }

    #[test]
    fn test_subtotal_counts_duplicate_ids() {
        let lines = [line("1", 1_000, 1), line("1", 2_000, 1)];
        assert_eq!(compute_subtotal(&lines, &Selection::of(["1"])).units(), 3_000);
    }

    #[test]
    fn test_subtotal_order_independent() {
        let lines = vec![line("a", 1_500, 2), line("b", 9_900, 1), line("c", 30_000, 4)];
        let selection = Selection::of(["a", "b", "c"]);
        let expected = compute_subtotal(&lines, &selection);

        let mut reversed = lines.clone();
        reversed.reverse();
        assert_eq!(compute_subtotal(&reversed, &selection), expected);

        let rotated = [lines[1].clone(), lines[2].clone(), lines[0].clone()];
        assert_eq!(compute_subtotal(&rotated, &selection), expected);
    }

    #[test]
    fn test_subtotal_monotonic_in_selection() {
        let lines = [
            line("a", 1_500, 2),
            line("b", 0, 5),
            line("c", 30_000, 0),
            line("d", 12_000, 1),
        ];

        let mut selection = Selection::new();
        let mut previous = compute_subtotal(&lines, &selection);
        for id in ["a", "b", "c", "d"] {
            selection.select(id);
            let current = compute_subtotal(&lines, &selection);
            assert!(current >= previous, "adding {id} decreased the subtotal");
            previous = current;
        }
        assert_eq!(previous.units(), 15_000);
    }

    #[test]
    fn test_percentage_discount() {
        let subtotal = Money::from_units(20_000);
        assert_eq!(compute_discount(subtotal, Some(&percent(10))).units(), 2_000);
    }

    #[test]
    fn test_percentage_discount_floors() {
        let subtotal = Money::from_units(9_999);
        assert_eq!(compute_discount(subtotal, Some(&percent(15))).units(), 1_499);

        let fractional = Coupon::new("p", CouponKind::PercentageDiscount, Decimal::new(125, 1));
        assert_eq!(
            compute_discount(Money::from_units(1_001), Some(&fractional)).units(),
            125
        );
    }

    #[test]
    fn test_fixed_discount() {
        let subtotal = Money::from_units(20_000);
        assert_eq!(compute_discount(subtotal, Some(&fixed(5_000))).units(), 5_000);

        let fractional = Coupon::new("f", CouponKind::FixedAmountDiscount, Decimal::new(49_999, 1));
        assert_eq!(compute_discount(subtotal, Some(&fractional)).units(), 4_999);
    }

    #[test]
    fn test_fixed_discount_not_clamped() {
        let subtotal = Money::from_units(3_000);
        let discount = compute_discount(subtotal, Some(&fixed(5_000)));
        assert_eq!(discount.units(), 5_000);
        assert_eq!(compute_final_total(subtotal, discount).units(), -2_000);
    }

    #[test]
    fn test_final_total() {
        let total = compute_final_total(Money::from_units(20_000), Money::from_units(2_000));
        assert_eq!(total.units(), 18_000);
    }

    #[test]
    fn test_policy_clamp() {
        let policy = DiscountPolicy::clamped();
        let subtotal = Money::from_units(3_000);

        assert_eq!(policy.apply(subtotal, Money::from_units(5_000)).units(), 3_000);
        assert_eq!(policy.apply(subtotal, Money::from_units(1_000)).units(), 1_000);
        assert_eq!(policy.apply(Money::zero(), Money::from_units(1_000)).units(), 0);

        let unclamped = DiscountPolicy::default();
        assert_eq!(unclamped.apply(subtotal, Money::from_units(5_000)).units(), 5_000);
    }

    #[test]
    fn test_breakdown_with_available_coupon() {
        let lines = [line("1", 10_000, 2), line("2", 5_000, 1)];
        let coupons = CouponBook::new(vec![percent(10)]);
        let selection = Selection::of(["1"]).with_coupon("pct");

        let breakdown = PriceBreakdown::compute(&lines, &selection, &coupons, DiscountPolicy::default());

        assert_eq!(breakdown.subtotal.units(), 20_000);
        assert_eq!(breakdown.discount.units(), 2_000);
        assert_eq!(breakdown.total.units(), 18_000);
        assert_eq!(breakdown.coupon_id, Some(CouponId::from("pct")));
        assert_eq!(breakdown.selected_lines, 1);
    }

    #[test]
    fn test_breakdown_unknown_coupon_gives_no_discount() {
        let lines = [line("1", 10_000, 2)];
        let coupons = CouponBook::new(vec![percent(10)]);
        let selection = Selection::of(["1"]).with_coupon("missing");

        let breakdown = PriceBreakdown::compute(&lines, &selection, &coupons, DiscountPolicy::default());

        assert!(breakdown.discount.is_zero());
        assert_eq!(breakdown.total.units(), 20_000);
        assert!(breakdown.coupon_id.is_none());
    }

    #[test]
    fn test_breakdown_clamped_policy() {
        let lines = [line("1", 3_000, 1)];
        let coupons = CouponBook::new(vec![fixed(5_000)]);
        let selection = Selection::of(["1"]).with_coupon("fix");

        let raw = PriceBreakdown::compute(&lines, &selection, &coupons, DiscountPolicy::default());
        assert_eq!(raw.total.units(), -2_000);

        let clamped = PriceBreakdown::compute(&lines, &selection, &coupons, DiscountPolicy::clamped());
        assert_eq!(clamped.discount.units(), 3_000);
        assert!(clamped.total.is_zero());
    }

    #[test]
    fn test_breakdown_serializes_camel_case() {
        let breakdown = PriceBreakdown {
            subtotal: Money::from_units(20_000),
            discount: Money::from_units(2_000),
            total: Money::from_units(18_000),
            coupon_id: Some(CouponId::from("pct")),
            selected_lines: 1,
        };
        let json = serde_json::to_value(&breakdown).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "subtotal": 20000,
                "discount": 2000,
                "total": 18000,
                "couponId": "pct",
                "selectedLines": 1
            })
        );
    }
}
