//! # Coupon Book
//!
//! The set of coupons a user may apply at checkout.
//!
//! A coupon that is not in the book gives no discount. That is the only way
//! expiry and the quantity cap reach the arithmetic: [`CouponBook::available_at`]
//! drops unusable coupons, so resolving them later yields `None`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{Coupon, Selection};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CouponBook {
    coupons: Vec<Coupon>,
}

impl CouponBook {
    pub fn new(coupons: Vec<Coupon>) -> Self {
        CouponBook { coupons }
    }

    /// Coupons usable on `date`: not past their expiry and not exhausted.
    pub fn available_at(&self, date: NaiveDate) -> CouponBook {
        let coupons: Vec<Coupon> = self
            .coupons
            .iter()
            .filter(|coupon| {
                let usable = coupon.is_usable_on(date);
                if !usable {
                    debug!(coupon_id = %coupon.id, %date, "Coupon unavailable");
                }
                usable
            })
            .cloned()
            .collect();
        CouponBook { coupons }
    }

    /// Finds a coupon by id. With duplicate ids the first one wins.
    pub fn get(&self, id: &str) -> Option<&Coupon> {
        self.coupons.iter().find(|coupon| coupon.id.as_str() == id)
    }

    /// The coupon chosen in `selection`, if it is in this book.
    pub fn resolve(&self, selection: &Selection) -> Option<&Coupon> {
        selection.coupon().and_then(|id| self.get(id.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Coupon> {
        self.coupons.iter()
    }

    pub fn len(&self) -> usize {
        self.coupons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coupons.is_empty()
    }
}

impl FromIterator<Coupon> for CouponBook {
    fn from_iter<I: IntoIterator<Item = Coupon>>(iter: I) -> Self {
        CouponBook::new(iter.into_iter().collect())
    }
}
