//! # Output Rendering
//!
//! ## Text Layout
//! ```text
//! Tent                     x2      ₩20,000
//! Lantern                  x1       ₩3,000
//! ────────────────────────────────────────
//! Subtotal (2 items)               ₩23,000
//! Discount (coupon 10)             -₩2,300
//! ────────────────────────────────────────
//! Total                            ₩20,700
//! ```

use std::fmt::Write as _;

use rental_core::{Cart, Money, PriceBreakdown, Selection};

use crate::config::{CurrencySettings, OutputFormat};
use crate::error::QuoteResult;

const WIDTH: usize = 40;
const AMOUNT_WIDTH: usize = 14;

/// Renders a breakdown in the requested format, with a trailing newline.
pub fn render(
    format: OutputFormat,
    cart: &Cart,
    selection: &Selection,
    breakdown: &PriceBreakdown,
    currency: &CurrencySettings,
) -> QuoteResult<String> {
    match format {
        OutputFormat::Text => Ok(render_text(cart, selection, breakdown, currency)),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(breakdown)?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// `₩20,000` / `-₩2,300`.
pub fn format_amount(amount: Money, symbol: &str) -> String {
    if amount.is_negative() {
        format!("-{symbol}{}", amount.abs())
    } else {
        format!("{symbol}{amount}")
    }
}

fn render_text(
    cart: &Cart,
    selection: &Selection,
    breakdown: &PriceBreakdown,
    currency: &CurrencySettings,
) -> String {
    let symbol = currency.symbol.as_str();
    let rule = "─".repeat(WIDTH);
    let mut out = String::new();

    for line in cart.lines() {
        if !selection.contains(line.id.as_str()) {
            continue;
        }
        let label = match &line.name {
            Some(name) => name.clone(),
            None => format!("#{}", line.id),
        };
        let qty = format!("x{}", line.quantity);
        let _ = writeln!(
            out,
            "{:<label_w$}{:>4}{:>AMOUNT_WIDTH$}",
            truncate(&label, WIDTH - 4 - AMOUNT_WIDTH),
            qty,
            format_amount(line.line_total(), symbol),
            label_w = WIDTH - 4 - AMOUNT_WIDTH,
        );
    }

    let _ = writeln!(out, "{rule}");
    push_row(
        &mut out,
        &format!("Subtotal ({} items)", breakdown.selected_lines),
        &format_amount(breakdown.subtotal, symbol),
    );

    let discount_label = match &breakdown.coupon_id {
        Some(id) => format!("Discount (coupon {id})"),
        None => "Discount".to_string(),
    };
    let discount = if breakdown.discount.is_zero() {
        format_amount(Money::zero(), symbol)
    } else {
        format_amount(Money::zero() - breakdown.discount, symbol)
    };
    push_row(&mut out, &discount_label, &discount);

    let _ = writeln!(out, "{rule}");
    push_row(&mut out, "Total", &format_amount(breakdown.total, symbol));
    let _ = writeln!(out, "{:>WIDTH$}", currency.code);

    out
}

fn push_row(out: &mut String, label: &str, amount: &str) {
    let label_w = WIDTH - AMOUNT_WIDTH;
    let _ = writeln!(out, "{:<label_w$}{:>AMOUNT_WIDTH$}", truncate(label, label_w), amount);
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}
