//! # Quote Assembly
//!
//! Turns arguments plus config into a [`QuoteRequest`], and a request plus
//! a decoded cart into a [`PriceBreakdown`].
//!
//! ## Flow
//! ```text
//! Args + QuoteConfig ──► QuoteRequest::build ──► (validated ids, date, policy)
//!                                                   │
//! CartResponse ──────────────────────────────────► quote()
//!                                                   │
//!                          coupons.available_at(on) │ warn on unknown ids
//!                                                   ▼
//!                                             PriceBreakdown
//! ```

use chrono::NaiveDate;
use rental_core::validation::{unknown_lines, validate_id};
use rental_core::{CartResponse, CouponId, DiscountPolicy, PriceBreakdown, Selection};
use tracing::{info, warn};

use crate::cli::Args;
use crate::config::{OutputFormat, QuoteConfig};
use crate::error::QuoteResult;

/// Which lines to include.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineChoice {
    All,
    Only(Vec<String>),
}

/// Everything needed to price one cart, independent of where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    pub lines: LineChoice,
    pub coupon: Option<CouponId>,
    pub on: NaiveDate,
    pub policy: DiscountPolicy,
    pub format: OutputFormat,
}

impl QuoteRequest {
    /// Merges flags over config. `today` is used when `--on` is absent.
    pub fn build(args: &Args, config: &QuoteConfig, today: NaiveDate) -> QuoteResult<Self> {
        for id in &args.select {
            validate_id("line id", id)?;
        }
        if let Some(ref coupon) = args.coupon {
            validate_id("coupon id", coupon)?;
        }

        let lines = if args.all {
            LineChoice::All
        } else {
            LineChoice::Only(args.select.iter().map(|id| id.trim().to_string()).collect())
        };

        let policy = if args.clamp {
            DiscountPolicy::clamped()
        } else {
            config.discount_policy()
        };

        Ok(QuoteRequest {
            lines,
            coupon: args.coupon.as_deref().map(|id| CouponId::from(id.trim())),
            on: args.on.unwrap_or(today),
            policy,
            format: args.format.unwrap_or(config.output),
        })
    }

    /// The cart view's selection state for this request.
    pub fn selection(&self, response: &CartResponse) -> Selection {
        let mut selection = match &self.lines {
            LineChoice::All => Selection::all(&response.cart),
            LineChoice::Only(ids) => Selection::of(ids.iter().map(String::as_str)),
        };
        selection.choose_coupon(self.coupon.clone());
        selection
    }
}

/// Prices `response` for `request`. Never fails; problems are logged.
pub fn quote(response: &CartResponse, request: &QuoteRequest) -> (Selection, PriceBreakdown) {
    let selection = request.selection(response);

    for err in unknown_lines(&response.cart, &selection) {
        warn!(%err, "Selected line ignored");
    }

    let available = response.coupons.available_at(request.on);
    if let Some(id) = selection.coupon() {
        if available.get(id.as_str()).is_none() {
            let reason = if response.coupons.get(id.as_str()).is_some() {
                "expired or used up"
            } else {
                "not owned"
            };
            warn!(coupon_id = %id, reason, "Coupon not applicable, no discount");
        }
    }

    let breakdown = PriceBreakdown::compute(
        response.cart.lines(),
        &selection,
        &available,
        request.policy,
    );

    info!(
        subtotal = breakdown.subtotal.units(),
        discount = breakdown.discount.units(),
        total = breakdown.total.units(),
        "Quote computed"
    );

    (selection, breakdown)
}
