//! # Domain Types
//!
//! Core domain types shared by the cart view and the order view.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    CartLine     │   │     Coupon      │   │   Selection     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  line ids (set) │       │
//! │  │  unit_price     │   │  kind           │   │  coupon id?     │       │
//! │  │  quantity       │   │  value          │   └─────────────────┘       │
//! │  │  name?          │   │  expires_at?    │                             │
//! │  └─────────────────┘   │  remaining?     │   ┌─────────────────┐       │
//! │                        └─────────────────┘   │   CouponKind    │       │
//! │  ┌─────────────────┐                         │  Percentage     │       │
//! │  │      Cart       │                         │  FixedAmount    │       │
//! │  │  lines: Vec     │                         └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lifecycle
//! Every value here is ephemeral: re-fetched per page view, never persisted.

use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Identifiers
// =============================================================================

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[serde(transparent)]
        #[ts(export)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                $name(id.into())
            }

            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                $name(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                $name(id)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Cart line identifier as issued by the backend.
    ///
    /// The backend sends numeric ids; they are normalised to their decimal
    /// string form so `7` and `"7"` name the same line.
    CartLineId
);

string_id!(
    /// Coupon identifier (`couponId` on the wire).
    CouponId
);

// =============================================================================
// Cart Line
// =============================================================================

/// One rental item in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: CartLineId,

    /// Display name of the rental item, when the backend sends one.
    pub name: Option<String>,

    /// Price per unit in whole currency units. Never negative.
    pub unit_price: Money,

    pub quantity: u32,
}

impl CartLine {
    pub fn new(id: impl Into<CartLineId>, unit_price: Money, quantity: u32) -> Self {
        CartLine {
            id: id.into(),
            name: None,
            unit_price,
            quantity,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(i64::from(self.quantity))
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The lines of one fetched cart, in backend order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    pub lines: Vec<CartLine>,
}

impl Cart {
    pub fn new(lines: Vec<CartLine>) -> Self {
        Cart { lines }
    }

    #[inline]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.lines.iter().any(|line| line.id.as_str() == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &CartLineId> {
        self.lines.iter().map(|line| &line.id)
    }
}

// =============================================================================
// Coupon
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CouponKind {
    /// `value` is a percentage of the subtotal, 0 to 100.
    PercentageDiscount,
    /// `value` is an absolute amount in currency units.
    FixedAmountDiscount,
}

impl fmt::Display for CouponKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CouponKind::PercentageDiscount => write!(f, "percentage"),
            CouponKind::FixedAmountDiscount => write!(f, "fixed_amount"),
        }
    }
}

/// A discount instrument owned by the user. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub id: CouponId,
    pub kind: CouponKind,

    /// Non-negative. Exact decimal so fractional percentages floor correctly.
    #[ts(type = "string")]
    pub value: Decimal,

    /// Last day the coupon can be used (inclusive).
    #[ts(as = "Option<String>")]
    pub expires_at: Option<NaiveDate>,

    /// Uses left under the quantity cap; `None` means uncapped.
    pub remaining: Option<u32>,
}

impl Coupon {
    pub fn new(id: impl Into<CouponId>, kind: CouponKind, value: Decimal) -> Self {
        Coupon {
            id: id.into(),
            kind,
            value,
            expires_at: None,
            remaining: None,
        }
    }

    pub fn expiring(mut self, date: NaiveDate) -> Self {
        self.expires_at = Some(date);
        self
    }

    pub fn with_remaining(mut self, remaining: u32) -> Self {
        self.remaining = Some(remaining);
        self
    }

    /// Whether the coupon can still be applied on `date`.
    pub fn is_usable_on(&self, date: NaiveDate) -> bool {
        let unexpired = self.expires_at.map_or(true, |last_day| date <= last_day);
        let in_stock = self.remaining != Some(0);
        unexpired && in_stock
    }
}

// =============================================================================
// Selection
// =============================================================================

/// What the user has checked in the cart view, plus the chosen coupon.
///
/// ## User Workflow
/// ```text
/// ☑ Tent (2 days)     ──► toggle("12")
/// ☐ Lantern           ──► toggle("13")
/// Coupon: [WELCOME ▼] ──► choose_coupon(Some("3"))
///        │
///        ▼
/// PriceBreakdown recomputed on every change
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    lines: BTreeSet<CartLineId>,
    coupon: Option<CouponId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// A selection of the given line ids and no coupon.
    pub fn of<I, T>(ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<CartLineId>,
    {
        Selection {
            lines: ids.into_iter().map(Into::into).collect(),
            coupon: None,
        }
    }

    /// Every line in the cart ("select all" checkbox).
    pub fn all(cart: &Cart) -> Self {
        Selection::of(cart.ids().cloned())
    }

    pub fn with_coupon(mut self, coupon: impl Into<CouponId>) -> Self {
        self.coupon = Some(coupon.into());
        self
    }

    pub fn select(&mut self, id: impl Into<CartLineId>) {
        self.lines.insert(id.into());
    }

    pub fn deselect(&mut self, id: &str) {
        self.lines.remove(id);
    }

    /// Flips a line's checkbox. Returns whether the line is now selected.
    pub fn toggle(&mut self, id: impl Into<CartLineId>) -> bool {
        let id = id.into();
        if self.lines.remove(&id) {
            false
        } else {
            self.lines.insert(id);
            true
        }
    }

    pub fn choose_coupon(&mut self, coupon: Option<CouponId>) {
        self.coupon = coupon;
    }

    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.lines.contains(id)
    }

    pub fn coupon(&self) -> Option<&CouponId> {
        self.coupon.as_ref()
    }

    pub fn line_ids(&self) -> impl Iterator<Item = &CartLineId> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_line_total() {
        let line = CartLine::new("1", Money::from_units(10_000), 2);
        assert_eq!(line.line_total().units(), 20_000);

        let none = CartLine::new("2", Money::from_units(10_000), 0);
        assert!(none.line_total().is_zero());
    }

    #[test]
    fn test_ids_compare_by_string() {
        assert_eq!(CartLineId::from("7"), CartLineId::new(String::from("7")));
        assert_eq!(CouponId::from("W1").to_string(), "W1");
    }

    #[test]
    fn test_cart_lookup() {
        let cart = Cart::new(vec![
            CartLine::new("1", Money::from_units(100), 1),
            CartLine::new("2", Money::from_units(200), 1),
        ]);
        assert_eq!(cart.len(), 2);
        assert!(cart.contains("2"));
        assert!(!cart.contains("3"));
        assert!(Cart::default().is_empty());
    }

    #[test]
    fn test_selection_toggle() {
        let mut selection = Selection::new();
        assert!(selection.toggle("1"));
        assert!(selection.contains("1"));

        assert!(!selection.toggle("1"));
        assert!(!selection.contains("1"));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_selection_all_and_deselect() {
        let cart = Cart::new(vec![
            CartLine::new("1", Money::from_units(100), 1),
            CartLine::new("2", Money::from_units(200), 1),
        ]);
        let mut selection = Selection::all(&cart);
        assert_eq!(selection.len(), 2);

        selection.deselect("1");
        assert_eq!(selection.line_ids().collect::<Vec<_>>(), vec![&CartLineId::from("2")]);
    }

    #[test]
    fn test_selection_coupon() {
        let mut selection = Selection::of(["1"]).with_coupon("w");
        assert_eq!(selection.coupon(), Some(&CouponId::from("w")));

        selection.choose_coupon(None);
        assert!(selection.coupon().is_none());
    }

    #[test]
    fn test_coupon_usable_on() {
        let coupon = Coupon::new("c", CouponKind::FixedAmountDiscount, Decimal::from(1_000))
            .expiring(date(2026, 8, 31));

        assert!(coupon.is_usable_on(date(2026, 8, 1)));
        assert!(coupon.is_usable_on(date(2026, 8, 31)));
        assert!(!coupon.is_usable_on(date(2026, 9, 1)));
    }

    #[test]
    fn test_coupon_exhausted() {
        let today = date(2026, 1, 1);
        let base = Coupon::new("c", CouponKind::PercentageDiscount, Decimal::from(5));

        assert!(base.is_usable_on(today));
        assert!(base.clone().with_remaining(1).is_usable_on(today));
        assert!(!base.with_remaining(0).is_usable_on(today));
    }

    #[test]
    fn test_selection_serializes_camel_case() {
        let selection = Selection::of(["2", "1"]).with_coupon("9");
        let json = serde_json::to_value(&selection).unwrap();
        assert_eq!(json, serde_json::json!({ "lines": ["1", "2"], "coupon": "9" }));
    }
}
