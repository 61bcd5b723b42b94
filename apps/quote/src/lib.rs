//! # rental-quote
//!
//! Command-line price quotes for rental carts, built on [`rental_core`].
//!
//! ## Modules
//! - [`cli`] - Argument parsing (clap)
//! - [`config`] - TOML + environment configuration
//! - [`quote`] - Request assembly and pricing
//! - [`render`] - Text and JSON output
//! - [`error`] - Error types

pub mod cli;
pub mod config;
pub mod error;
pub mod quote;
pub mod render;

use std::fs::File;
use std::io::{self, BufReader, Write};

use chrono::NaiveDate;
use rental_core::CartResponse;
use tracing::debug;

pub use cli::Args;
pub use config::{OutputFormat, QuoteConfig};
pub use error::{QuoteError, QuoteResult};

/// Runs one quote end to end: load config, read input, price, print.
pub fn run(args: &Args, today: NaiveDate) -> QuoteResult<()> {
    let config = QuoteConfig::load(args.config.clone())?;
    debug!(?config, "Configuration loaded");

    let request = quote::QuoteRequest::build(args, &config, today)?;
    let response = read_response(&args.input)?;
    let (selection, breakdown) = quote::quote(&response, &request);

    let rendered = render::render(
        request.format,
        &response.cart,
        &selection,
        &breakdown,
        &config.currency,
    )?;

    io::stdout()
        .lock()
        .write_all(rendered.as_bytes())
        .map_err(|e| QuoteError::WriteFailed(e.to_string()))
}

/// Reads a cart response from a file path, or stdin for `-`.
pub fn read_response(input: &str) -> QuoteResult<CartResponse> {
    if input == "-" {
        debug!("Reading cart response from stdin");
        return Ok(CartResponse::from_reader(io::stdin().lock())?);
    }

    let file = File::open(input).map_err(|e| QuoteError::ReadFailed {
        source_name: input.to_string(),
        reason: e.to_string(),
    })?;
    Ok(CartResponse::from_reader(BufReader::new(file))?)
}
