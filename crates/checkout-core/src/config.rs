//! # Pricing Configuration
//!
//! Loads the discount code table.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Explicit path passed to PricingConfig::load                        │
//! │                                                                         │
//! │  2. Environment variable                                               │
//! │     CHECKOUT_PRICING_CONFIG=/etc/checkout/pricing.toml                 │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     SAVE10 = 10%, SAVE20 = 20%, SAVE50 = 50%                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # pricing.toml
//! [discounts]
//! SAVE10 = 0.10
//! SAVE20 = 0.20
//! SAVE50 = 0.50
//! ```
//!
//! The loaded table is turned into an immutable [`DiscountTable`] once and
//! handed to a [`crate::discount::DiscountApplier`]; nothing reads the file
//! while pricing a cart.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::discount::{DiscountTable, DEFAULT_DISCOUNT_CODES};
use crate::error::{ConfigError, ConfigResult};
use crate::types::DiscountRate;

/// Environment variable naming the pricing config file.
pub const CONFIG_PATH_ENV: &str = "CHECKOUT_PRICING_CONFIG";

// =============================================================================
// Pricing Config
// =============================================================================

/// Pricing configuration as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Discount code → fraction in `(0, 1]`.
    #[serde(default = "default_discounts")]
    pub discounts: BTreeMap<String, f64>,
}

fn default_discounts() -> BTreeMap<String, f64> {
    DEFAULT_DISCOUNT_CODES
        .iter()
        .map(|&(code, bps)| (code.to_string(), DiscountRate::from_bps(bps).fraction()))
        .collect()
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            discounts: default_discounts(),
        }
    }
}

impl PricingConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        let config: PricingConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a file.
    ///
    /// Uses `config_path` if given, else `CHECKOUT_PRICING_CONFIG`, else the
    /// built-in defaults.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let Some(path) = config_path.or_else(Self::env_config_path) else {
            debug!("No pricing config path, using defaults");
            return Ok(Self::default());
        };

        let config = Self::load_file(&path)?;
        info!(?path, codes = config.discounts.len(), "Pricing config loaded");
        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load pricing config: {}. Using defaults.", e);
            Self::default()
        })
    }

    fn load_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    fn env_config_path() -> Option<PathBuf> {
        std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from)
    }

    /// Validates the configuration.
    ///
    /// Every code must be non-empty and every rate must be in `(0, 1]` and a
    /// whole number of basis points. Rates are never rounded.
    pub fn validate(&self) -> ConfigResult<()> {
        self.discounts
            .iter()
            .try_for_each(|(code, &rate)| parse_rate(code, rate).map(|_| ()))
    }

    /// Builds the immutable discount table.
    pub fn discount_table(&self) -> ConfigResult<DiscountTable> {
        let rates = self
            .discounts
            .iter()
            .map(|(code, &rate)| parse_rate(code, rate).map(|parsed| (code.as_str(), parsed)))
            .collect::<ConfigResult<Vec<_>>>()?;
        Ok(DiscountTable::from_rates(rates))
    }
}

fn parse_rate(code: &str, rate: f64) -> ConfigResult<DiscountRate> {
    if code.trim().is_empty() {
        return Err(ConfigError::EmptyCode);
    }

    if !DiscountRate::is_valid_fraction(rate) {
        return Err(ConfigError::InvalidRate {
            code: code.to_string(),
            rate,
        });
    }

    DiscountRate::from_fraction(rate).ok_or_else(|| ConfigError::InexactRate {
        code: code.to_string(),
        rate,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
