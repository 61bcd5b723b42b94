//! # rental-quote
//!
//! ```text
//! $ rental-quote --input cart.json --select 12 --select 13 --coupon 3
//! Tent                     x2      ₩20,000
//! Lantern                  x1       ₩3,000
//! ────────────────────────────────────────
//! Subtotal (2 items)               ₩23,000
//! Discount (coupon 3)              -₩2,300
//! ────────────────────────────────────────
//! Total                            ₩20,700
//!                                      KRW
//! ```

use clap::Parser;
use tracing_subscriber::EnvFilter;

use rental_quote::Args;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = Args::parse();
    let today = chrono::Local::now().date_naive();

    rental_quote::run(&args, today)?;
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show decode decisions
/// - `RUST_LOG=rental_core=trace` - Trace the pricing crate only
/// - Default: warnings, plus info from this tool
///
/// Logs go to stderr so `--format json` output can be piped.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,rental_quote=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
