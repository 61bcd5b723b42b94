//! # Quote Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority)                              │
//! │     --clamp, --format json                                             │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     RENTAL_CURRENCY_SYMBOL=₩   RENTAL_CLAMP_DISCOUNT=true               │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config PATH, else $RENTAL_QUOTE_CONFIG, else                     │
//! │     ~/.config/rental-quote/quote.toml (Linux)                          │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     ₩ / KRW, no clamping, text output                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! output = "text"  # text | json
//!
//! [currency]
//! symbol = "₩"
//! code = "KRW"
//!
//! [pricing]
//! clamp_to_subtotal = false
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rental_core::DiscountPolicy;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{QuoteError, QuoteResult};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "RENTAL_QUOTE_CONFIG";

// =============================================================================
// Output Format
// =============================================================================

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Human-readable receipt.
    #[default]
    Text,
    /// The `PriceBreakdown` as JSON.
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencySettings {
    /// Prefix for amounts in text output.
    #[serde(default = "default_symbol")]
    pub symbol: String,

    /// ISO 4217 code shown in the receipt footer.
    #[serde(default = "default_code")]
    pub code: String,
}

fn default_symbol() -> String {
    "₩".to_string()
}

fn default_code() -> String {
    "KRW".to_string()
}

impl Default for CurrencySettings {
    fn default() -> Self {
        CurrencySettings {
            symbol: default_symbol(),
            code: default_code(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingSettings {
    /// Cap the discount at the subtotal so the total never goes negative.
    #[serde(default)]
    pub clamp_to_subtotal: bool,
}

// =============================================================================
// Main Configuration
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteConfig {
    #[serde(default)]
    pub output: OutputFormat,

    #[serde(default)]
    pub currency: CurrencySettings,

    #[serde(default)]
    pub pricing: PricingSettings,
}

impl QuoteConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> QuoteResult<Self> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// [`QuoteConfig::load`] with an injectable environment.
    pub fn load_with<F>(config_path: Option<PathBuf>, env: F) -> QuoteResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let explicit = config_path.or_else(|| env(CONFIG_PATH_ENV).map(PathBuf::from));

        let mut config = match explicit {
            // A path the user asked for must exist
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_overrides(env);
        config.validate()?;

        Ok(config)
    }

    fn from_file(path: &Path) -> QuoteResult<Self> {
        info!(?path, "Loading quote config from file");
        let load_failed = |reason: String| QuoteError::ConfigLoadFailed {
            path: path.display().to_string(),
            reason,
        };
        let contents = std::fs::read_to_string(path).map_err(|e| load_failed(e.to_string()))?;
        toml::from_str(&contents).map_err(|e| load_failed(e.to_string()))
    }

    /// Validates the configuration.
    pub fn validate(&self) -> QuoteResult<()> {
        if self.currency.symbol.trim().is_empty() {
            return Err(QuoteError::InvalidConfig(
                "currency.symbol must not be empty".into(),
            ));
        }

        if self.currency.code.trim().is_empty() {
            return Err(QuoteError::InvalidConfig(
                "currency.code must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Applies `RENTAL_*` overrides. Unparseable values are ignored.
    fn apply_overrides<F>(&mut self, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(symbol) = env("RENTAL_CURRENCY_SYMBOL") {
            debug!(symbol = %symbol, "Overriding currency symbol from environment");
            self.currency.symbol = symbol;
        }

        if let Some(code) = env("RENTAL_CURRENCY_CODE") {
            self.currency.code = code;
        }

        if let Some(clamp) = env("RENTAL_CLAMP_DISCOUNT") {
            match clamp.trim().to_lowercase().parse::<bool>() {
                Ok(clamp) => self.pricing.clamp_to_subtotal = clamp,
                Err(_) => warn!(value = %clamp, "Ignoring RENTAL_CLAMP_DISCOUNT, expected true/false"),
            }
        }

        if let Some(output) = env("RENTAL_OUTPUT") {
            match output.parse() {
                Ok(format) => self.output = format,
                Err(e) => warn!(error = %e, "Ignoring RENTAL_OUTPUT"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "rental", "rental-quote")
            .map(|dirs| dirs.config_dir().join("quote.toml"))
    }

    /// The discount policy these settings describe.
    pub fn discount_policy(&self) -> DiscountPolicy {
        DiscountPolicy {
            clamp_to_subtotal: self.pricing.clamp_to_subtotal,
        }
    }
}
