//! Command-line arguments.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

use crate::config::OutputFormat;

/// Price a rental cart: subtotal, coupon discount and total.
///
/// Reads the backend's `{ cartItems, coupons }` response and prints the
/// breakdown for the selected lines.
#[derive(Debug, Clone, Parser)]
#[command(name = "rental-quote", version)]
pub struct Args {
    /// Cart response JSON file, or `-` for stdin.
    #[arg(short, long, default_value = "-", value_name = "PATH")]
    pub input: String,

    /// Cart line id to include (repeatable).
    #[arg(short, long = "select", value_name = "LINE_ID")]
    pub select: Vec<String>,

    /// Include every cart line.
    #[arg(long, conflicts_with = "select")]
    pub all: bool,

    /// Coupon id to apply.
    #[arg(short, long, value_name = "COUPON_ID")]
    pub coupon: Option<String>,

    /// Date used for coupon expiry (defaults to today).
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub on: Option<NaiveDate>,

    /// Cap the discount at the subtotal.
    #[arg(long)]
    pub clamp: bool,

    /// Output format (overrides config).
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Config file path.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}
