//! # Wire Decoding
//!
//! Turns the backend's cart response into domain types.
//!
//! ## Wire Format
//! ```text
//! {
//!   "cartItems": [
//!     { "id": 12, "quantity": 2, "rentalItem": { "name": "Tent", "price": 10000 } }
//!   ],
//!   "coupons": [
//!     { "couponId": 3, "type": "PERCENTAGE", "discount": 10,
//!       "expirationDate": "2026-08-31", "quantity": 5 }
//!   ]
//! }
//! ```
//!
//! ## Leniency Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Field                    Bad value (missing/null/garbage/negative)     │
//! │  ───────────────────────  ───────────────────────────────────────────   │
//! │  price, quantity          → 0 (fractions are floored)                   │
//! │  discount                 → 0 (also a percentage above 100)             │
//! │  type (unknown)           → coupon dropped (= unavailable)              │
//! │  id / couponId            → record dropped                              │
//! │  expirationDate           → no expiry                                   │
//! │  coupon quantity          → no cap                                      │
//! │  cartItems / coupons      → empty list                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! This is a display aggregation, not a ledger: a bad number must never
//! take the whole cart view down. Only a document that is not a JSON object
//! is an error.

use std::io::Read;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde_json::{Map, Number, Value};
use tracing::{debug, warn};

use crate::coupon::CouponBook;
use crate::error::WireError;
use crate::money::Money;
use crate::types::{Cart, CartLine, CartLineId, Coupon, CouponId, CouponKind};
use crate::validation::validate_percentage;

/// A decoded cart response: the cart lines and the user's coupons.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartResponse {
    pub cart: Cart,
    pub coupons: CouponBook,
}

impl CartResponse {
    pub fn from_json(json: &str) -> Result<Self, WireError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, WireError> {
        let value: Value = serde_json::from_reader(reader)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, WireError> {
        let root = match value {
            Value::Object(root) => root,
            other => {
                return Err(WireError::NotAnObject {
                    found: json_type_name(&other),
                })
            }
        };

        let lines: Vec<CartLine> = array_field(&root, "cartItems")
            .iter()
            .filter_map(decode_cart_item)
            .collect();
        let coupons: CouponBook = array_field(&root, "coupons")
            .iter()
            .filter_map(decode_coupon)
            .collect();

        debug!(
            lines = lines.len(),
            coupons = coupons.len(),
            "Decoded cart response"
        );

        Ok(CartResponse {
            cart: Cart::new(lines),
            coupons,
        })
    }
}

// =============================================================================
// Records
// =============================================================================

fn decode_cart_item(item: &Value) -> Option<CartLine> {
    let Some(id) = item.get("id").and_then(decode_id) else {
        warn!(item = %item, "Dropping cart item without a usable id");
        return None;
    };

    let rental_item = item.get("rentalItem");
    let price = rental_item
        .and_then(|r| r.get("price"))
        .map_or(0, non_negative_units);
    let quantity = item.get("quantity").map_or(0, non_negative_units);
    let quantity = u32::try_from(quantity).unwrap_or(0);

    let mut line = CartLine::new(CartLineId::new(id), Money::from_units(price), quantity);
    line.name = rental_item
        .and_then(|r| r.get("name"))
        .and_then(Value::as_str)
        .map(str::to_string);
    Some(line)
}

fn decode_coupon(entry: &Value) -> Option<Coupon> {
    let Some(id) = entry.get("couponId").and_then(decode_id) else {
        warn!(coupon = %entry, "Dropping coupon without a usable couponId");
        return None;
    };

    let raw_kind = entry.get("type").and_then(Value::as_str).unwrap_or("");
    let Some(kind) = parse_coupon_kind(raw_kind) else {
        warn!(coupon_id = %id, kind = raw_kind, "Dropping coupon with unknown type");
        return None;
    };

    let mut value = entry
        .get("discount")
        .and_then(decimal_of)
        .filter(|d| !d.is_sign_negative())
        .unwrap_or(Decimal::ZERO);
    if kind == CouponKind::PercentageDiscount && validate_percentage(value).is_err() {
        warn!(coupon_id = %id, %value, "Percentage above 100, treating as 0");
        value = Decimal::ZERO;
    }

    Some(Coupon {
        id: CouponId::new(id),
        kind,
        value,
        expires_at: entry.get("expirationDate").and_then(parse_expiry),
        remaining: entry.get("quantity").and_then(parse_remaining),
    })
}

// =============================================================================
// Fields
// =============================================================================

fn array_field<'a>(root: &'a Map<String, Value>, key: &str) -> &'a [Value] {
    match root.get(key) {
        Some(Value::Array(items)) => items,
        Some(other) => {
            warn!(field = key, found = json_type_name(other), "Expected an array, using empty");
            &[]
        }
        None => &[],
    }
}

/// Ids arrive as integers or strings; both normalise to a non-empty string.
fn decode_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Exact decimal of a JSON number or numeric string.
fn decimal_of(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => decimal_of_number(n),
        Value::String(s) => decimal_of_text(s.trim()),
        _ => None,
    }
}

fn decimal_of_number(n: &Number) -> Option<Decimal> {
    if let Some(i) = n.as_i64() {
        return Some(Decimal::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Some(Decimal::from(u));
    }
    // serde_json prints the shortest round-trip form, so 0.1 stays 0.1
    decimal_of_text(&n.to_string()).or_else(|| n.as_f64().and_then(Decimal::from_f64))
}

fn decimal_of_text(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// Floor of a non-negative number, or 0 for anything else.
fn non_negative_units(value: &Value) -> i64 {
    decimal_of(value)
        .filter(|d| !d.is_sign_negative())
        .and_then(|d| d.floor().to_i64())
        .unwrap_or(0)
}

fn parse_coupon_kind(raw: &str) -> Option<CouponKind> {
    let normalised: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .collect::<String>()
        .to_ascii_uppercase();

    match normalised.as_str() {
        "PERCENTAGE" | "PERCENT" | "RATE" => Some(CouponKind::PercentageDiscount),
        "FIXED" | "FIXEDAMOUNT" | "AMOUNT" | "PRICE" => Some(CouponKind::FixedAmountDiscount),
        _ => None,
    }
}

/// `YYYY-MM-DD` or an RFC 3339 timestamp (its calendar date is used).
fn parse_expiry(value: &Value) -> Option<NaiveDate> {
    let text = value.as_str()?.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            debug!(expiration = text, "Unparseable expirationDate, ignoring");
            None
        })
}

fn parse_remaining(value: &Value) -> Option<u32> {
    let remaining = decimal_of(value).filter(|d| !d.is_sign_negative())?;
    Some(remaining.floor().to_u32().unwrap_or(u32::MAX))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn test_decodes_full_response() -> TestResult {
        let response = CartResponse::from_json(
            r#"{
                "cartItems": [
                    { "id": 12, "quantity": 2, "rentalItem": { "name": "Tent", "price": 10000 } },
                    { "id": "13", "quantity": 1, "rentalItem": { "price": 3500 } }
                ],
                "coupons": [
                    { "couponId": 3, "type": "PERCENTAGE", "discount": 10,
                      "expirationDate": "2026-08-31", "quantity": 5 },
                    { "couponId": "W", "type": "fixed_amount", "discount": 5000 }
                ]
            }"#,
        )?;

        let lines = response.cart.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].id.as_str(), "12");
        assert_eq!(lines[0].name.as_deref(), Some("Tent"));
        assert_eq!(lines[0].line_total().units(), 20_000);
        assert_eq!(lines[1].id.as_str(), "13");
        assert!(lines[1].name.is_none());

        let pct = response.coupons.get("3").ok_or("coupon 3 missing")?;
        assert_eq!(pct.kind, CouponKind::PercentageDiscount);
        assert_eq!(pct.value, Decimal::from(10));
        assert_eq!(pct.expires_at, NaiveDate::from_ymd_opt(2026, 8, 31));
        assert_eq!(pct.remaining, Some(5));

        let fixed = response.coupons.get("W").ok_or("coupon W missing")?;
        assert_eq!(fixed.kind, CouponKind::FixedAmountDiscount);
        assert!(fixed.expires_at.is_none());
        assert!(fixed.remaining.is_none());

        Ok(())
    }

    #[test]
    fn test_rejects_non_object_root() {
        assert!(matches!(
            CartResponse::from_value(json!([1, 2])),
            Err(WireError::NotAnObject { found: "array" })
        ));
        assert!(matches!(
            CartResponse::from_json("not json"),
            Err(WireError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_missing_collections_are_empty() -> TestResult {
        let response = CartResponse::from_value(json!({}))?;
        assert!(response.cart.is_empty());
        assert!(response.coupons.is_empty());

        let response = CartResponse::from_value(json!({ "cartItems": null, "coupons": "x" }))?;
        assert!(response.cart.is_empty());
        assert!(response.coupons.is_empty());
        Ok(())
    }

    #[test]
    fn test_malformed_numbers_become_zero() -> TestResult {
        let response = CartResponse::from_value(json!({
            "cartItems": [
                { "id": 1, "quantity": "two", "rentalItem": { "price": 1000 } },
                { "id": 2, "quantity": 3, "rentalItem": { "price": null } },
                { "id": 3, "quantity": 1 },
                { "id": 4, "quantity": -1, "rentalItem": { "price": -500 } },
                { "id": 5, "quantity": 2.9, "rentalItem": { "price": "1500.75" } }
            ]
        }))?;

        let totals: Vec<i64> = response
            .cart
            .lines()
            .iter()
            .map(|line| line.line_total().units())
            .collect();
        assert_eq!(totals, vec![0, 0, 0, 0, 3_000]);
        Ok(())
    }

    #[test]
    fn test_records_without_ids_are_dropped() -> TestResult {
        let response = CartResponse::from_value(json!({
            "cartItems": [
                { "quantity": 1, "rentalItem": { "price": 1000 } },
                { "id": "  ", "quantity": 1 },
                { "id": 7, "quantity": 1, "rentalItem": { "price": 1000 } }
            ],
            "coupons": [
                { "type": "FIXED", "discount": 1000 },
                { "couponId": true, "type": "FIXED", "discount": 1000 }
            ]
        }))?;

        assert_eq!(response.cart.len(), 1);
        assert!(response.cart.contains("7"));
        assert!(response.coupons.is_empty());
        Ok(())
    }

    #[test]
    fn test_coupon_kind_aliases() {
        for raw in ["PERCENTAGE", "percent", "Rate", " percentage "] {
            assert_eq!(parse_coupon_kind(raw), Some(CouponKind::PercentageDiscount), "{raw}");
        }
        for raw in ["FIXED", "fixed-amount", "FIXED_AMOUNT", "amount", "PRICE"] {
            assert_eq!(parse_coupon_kind(raw), Some(CouponKind::FixedAmountDiscount), "{raw}");
        }
        assert_eq!(parse_coupon_kind("BOGO"), None);
        assert_eq!(parse_coupon_kind(""), None);
    }

    #[test]
    fn test_unknown_coupon_type_is_dropped() -> TestResult {
        let response = CartResponse::from_value(json!({
            "coupons": [
                { "couponId": 1, "type": "BOGO", "discount": 50 },
                { "couponId": 2, "discount": 50 }
            ]
        }))?;
        assert!(response.coupons.is_empty());
        Ok(())
    }

    #[test]
    fn test_bad_discount_values() -> TestResult {
        let response = CartResponse::from_value(json!({
            "coupons": [
                { "couponId": 1, "type": "PERCENTAGE", "discount": 150 },
                { "couponId": 2, "type": "FIXED", "discount": -100 },
                { "couponId": 3, "type": "FIXED", "discount": "lots" },
                { "couponId": 4, "type": "FIXED", "discount": 150 },
                { "couponId": 5, "type": "PERCENTAGE", "discount": 12.5 }
            ]
        }))?;

        let value = |id: &str| response.coupons.get(id).map(|c| c.value);
        assert_eq!(value("1"), Some(Decimal::ZERO));
        assert_eq!(value("2"), Some(Decimal::ZERO));
        assert_eq!(value("3"), Some(Decimal::ZERO));
        assert_eq!(value("4"), Some(Decimal::from(150)));
        assert_eq!(value("5"), Some(Decimal::new(125, 1)));
        Ok(())
    }

    #[test]
    fn test_fractional_discount_is_exact() {
        assert_eq!(decimal_of(&json!(0.1)), Some(Decimal::new(1, 1)));
        assert_eq!(decimal_of(&json!(1e3)), Some(Decimal::from(1000)));
        assert_eq!(decimal_of(&json!(" 7 ")), Some(Decimal::from(7)));
        assert_eq!(decimal_of(&json!(false)), None);
    }

    #[test]
    fn test_expiry_formats() {
        let expected = NaiveDate::from_ymd_opt(2026, 8, 31);
        assert_eq!(parse_expiry(&json!("2026-08-31")), expected);
        assert_eq!(parse_expiry(&json!("2026-08-31T23:59:59+09:00")), expected);
        assert_eq!(parse_expiry(&json!("soon")), None);
        assert_eq!(parse_expiry(&json!(20260831)), None);
    }

    #[test]
    fn test_remaining_cap() {
        assert_eq!(parse_remaining(&json!(0)), Some(0));
        assert_eq!(parse_remaining(&json!(3)), Some(3));
        assert_eq!(parse_remaining(&json!(-3)), None);
        assert_eq!(parse_remaining(&json!("x")), None);
        assert_eq!(parse_remaining(&json!(1e12)), Some(u32::MAX));
    }

    #[test]
    fn test_from_reader() -> TestResult {
        let body = br#"{ "cartItems": [ { "id": 1, "quantity": 1, "rentalItem": { "price": 100 } } ] }"#;
        let response = CartResponse::from_reader(&body[..])?;
        assert_eq!(response.cart.len(), 1);
        Ok(())
    }
}
