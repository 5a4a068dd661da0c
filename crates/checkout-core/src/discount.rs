//! # Discount Codes
//!
//! Validates and stacks discount codes against a fixed rate table.
//!
//! ## Stacking Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  apply_discounts(200.00, ["SAVE50", "SAVE20"])                          │
//! │                                                                         │
//! │  running = 0%                                                           │
//! │     │                                                                   │
//! │     ├── SAVE50: known? yes   0% + 50% ≤ 100%? yes   running = 50%       │
//! │     │                                                                   │
//! │     ├── SAVE20: known? yes  50% + 20% ≤ 100%? yes   running = 70%       │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  200.00 × (1 − 0.70) = 60.00                                            │
//! │                                                                         │
//! │  Unknown code      → InvalidCode, stop                                  │
//! │  Would pass 100%   → ExceedsMaximumDiscount, stop (code not applied)    │
//! │  Exactly 100%      → allowed, total becomes 0                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The table is an immutable value handed to [`DiscountApplier::new`]; there
//! is no global, mutable code list.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{PricingError, PricingResult};
use crate::types::{DiscountCode, DiscountRate};

/// The codes every checkout accepts out of the box.
pub const DEFAULT_DISCOUNT_CODES: [(&str, u32); 3] =
    [("SAVE10", 1000), ("SAVE20", 2000), ("SAVE50", 5000)];

// =============================================================================
// Discount Table
// =============================================================================

/// Immutable mapping from discount code to rate.
///
/// Every rate is in `1..=10000` bps: [`DiscountRate`] can only be built
/// outside this crate through its range-checked constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountTable {
    rates: BTreeMap<DiscountCode, DiscountRate>,
}

impl DiscountTable {
    /// Builds a table from `(code, rate)` pairs.
    pub fn from_rates<I, C>(rates: I) -> Self
    where
        I: IntoIterator<Item = (C, DiscountRate)>,
        C: Into<DiscountCode>,
    {
        DiscountTable {
            rates: rates.into_iter().map(|(code, rate)| (code.into(), rate)).collect(),
        }
    }

    /// A table with no codes; every code is rejected.
    pub fn empty() -> Self {
        DiscountTable {
            rates: BTreeMap::new(),
        }
    }

    /// Looks up the rate for a code.
    #[inline]
    pub fn rate(&self, code: &str) -> Option<DiscountRate> {
        self.rates.get(code).copied()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.rates.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl Default for DiscountTable {
    fn default() -> Self {
        DiscountTable::from_rates(
            DEFAULT_DISCOUNT_CODES
                .iter()
                .map(|&(code, bps)| (code, DiscountRate::from_bps(bps))),
        )
    }
}

// =============================================================================
// Discount Applier
// =============================================================================

/// Applies stacked discount codes to a cart total.
///
/// Holds no mutable state, so one applier can serve any number of callers.
#[derive(Debug, Clone, Default)]
pub struct DiscountApplier {
    table: DiscountTable,
}

impl DiscountApplier {
    /// Creates an applier over the given table.
    pub fn new(table: DiscountTable) -> Self {
        DiscountApplier { table }
    }

    /// Returns the table this applier validates against.
    pub fn table(&self) -> &DiscountTable {
        &self.table
    }

    /// Validates the codes in order and returns the cumulative rate.
    ///
    /// ## Errors
    /// - [`PricingError::InvalidCode`] for the first unknown code
    /// - [`PricingError::ExceedsMaximumDiscount`] for the first code that
    ///   would take the running total past 100%
    pub fn total_discount<S: AsRef<str>>(&self, codes: &[S]) -> PricingResult<DiscountRate> {
        codes.iter().try_fold(DiscountRate::zero(), |running, code| {
            let code: &str = code.as_ref();
            let rate = self
                .table
                .rate(code)
                .ok_or_else(|| PricingError::InvalidCode {
                    code: code.to_string(),
                })?;

            let stacked = running
                .checked_stack(rate)
                .ok_or(PricingError::ExceedsMaximumDiscount)?;

            debug!(code, rate = %rate, total = %stacked, "Applied discount code");
            Ok(stacked)
        })
    }

    /// Applies the codes to `cart_total`: `cart_total × (1 − Σ rates)`.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::discount::DiscountApplier;
    ///
    /// let applier = DiscountApplier::default();
    /// assert_eq!(applier.apply_discounts(100.0, &["SAVE10"]).unwrap(), 90.0);
    /// assert!(applier.apply_discounts(100.0, &["BOGUS"]).is_err());
    /// ```
    pub fn apply_discounts<S: AsRef<str>>(
        &self,
        cart_total: f64,
        codes: &[S],
    ) -> PricingResult<f64> {
        let total_discount = self.total_discount(codes)?;
        Ok(total_discount.apply_to(cart_total))
    }
}

/// Applies discount codes using the default code table.
pub fn apply_discounts<S: AsRef<str>>(cart_total: f64, codes: &[S]) -> PricingResult<f64> {
    DiscountApplier::default().apply_discounts(cart_total, codes)
}

// =============================================================================
// Unit Tests
// =============================================================================
