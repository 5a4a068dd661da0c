//! # Domain Types
//!
//! Core domain types used by the pricing engine.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    LineItem     │   │  DiscountCode   │   │  DiscountRate   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  price (f64)    │   │  "SAVE10"       │   │  bps (u32)      │       │
//! │  │  quantity (f64) │   │  "SAVE20"       │   │  1000 = 10%     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// Line Item
// =============================================================================

/// A purchasable entry: unit price times quantity.
///
/// Line items have no identity beyond their position in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Unit price.
    pub price: f64,

    /// Quantity purchased. Fractional quantities (weighed goods) are allowed.
    pub quantity: f64,
}

impl LineItem {
    /// Creates a line item.
    #[inline]
    pub const fn new(price: f64, quantity: f64) -> Self {
        LineItem { price, quantity }
    }

    /// Returns `price × quantity`.
    #[inline]
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity
    }
}

// =============================================================================
// Discount Code
// =============================================================================

/// A discount code as typed by the customer, e.g. `SAVE10`.
///
/// Matching is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DiscountCode(String);

impl DiscountCode {
    pub fn new(code: impl Into<String>) -> Self {
        DiscountCode(code.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DiscountCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DiscountCode {
    fn from(code: &str) -> Self {
        DiscountCode(code.to_string())
    }
}

impl From<String> for DiscountCode {
    fn from(code: String) -> Self {
        DiscountCode(code)
    }
}

/// Lets tables keyed by `DiscountCode` be queried with a plain `&str`.
impl Borrow<str> for DiscountCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// Discount Rate
// =============================================================================

/// A discount rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1000 bps = 10% (`SAVE10`)
///
/// Rates are accumulated as integers, so stacking ten 10% codes lands on
/// exactly 10000 bps instead of `0.9999999999999999`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// 100% in basis points.
    pub const MAX_BPS: u32 = 10_000;

    /// Largest gap between `fraction × 10000` and a whole basis point that
    /// still counts as exact (absorbs `0.1 × 10000 = 1000.0000000000001`).
    const BPS_TOLERANCE: f64 = 1e-6;

    /// Creates a rate without range checks. Table rates go through
    /// [`DiscountRate::try_from_bps`] or [`DiscountRate::from_fraction`].
    #[inline]
    pub(crate) const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Creates a rate from basis points in `1..=10000`.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::types::DiscountRate;
    ///
    /// assert_eq!(DiscountRate::try_from_bps(1000).unwrap().bps(), 1000);
    /// assert!(DiscountRate::try_from_bps(0).is_none());
    /// assert!(DiscountRate::try_from_bps(10_001).is_none());
    /// ```
    pub const fn try_from_bps(bps: u32) -> Option<Self> {
        if bps == 0 || bps > Self::MAX_BPS {
            return None;
        }
        Some(DiscountRate(bps))
    }

    /// Returns true if `fraction` is finite and in `(0, 1]`.
    pub fn is_valid_fraction(fraction: f64) -> bool {
        fraction.is_finite() && fraction > 0.0 && fraction <= 1.0
    }

    /// Creates a rate from a fraction in `(0, 1]`, e.g. `0.10` for 10%.
    ///
    /// Returns `None` for values outside `(0, 1]` and for values that are
    /// not a whole number of basis points (`0.12345`, `0.00004`). Rates are
    /// never silently rounded.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::types::DiscountRate;
    ///
    /// assert_eq!(DiscountRate::from_fraction(0.10).unwrap().bps(), 1000);
    /// assert!(DiscountRate::from_fraction(0.0).is_none());
    /// assert!(DiscountRate::from_fraction(1.5).is_none());
    /// assert!(DiscountRate::from_fraction(0.12345).is_none());
    /// ```
    pub fn from_fraction(fraction: f64) -> Option<Self> {
        if !Self::is_valid_fraction(fraction) {
            return None;
        }

        let scaled = fraction * Self::MAX_BPS as f64;
        let bps = scaled.round();
        if (scaled - bps).abs() > Self::BPS_TOLERANCE {
            return None;
        }

        Self::try_from_bps(bps as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a fraction (0.10 for 10%).
    #[inline]
    pub fn fraction(&self) -> f64 {
        self.0 as f64 / Self::MAX_BPS as f64
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero rate, the starting point for stacking.
    #[inline]
    pub(crate) const fn zero() -> Self {
        DiscountRate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Adds another rate, returning `None` if the sum would exceed 100%.
    ///
    /// Exactly 100% is allowed.
    pub fn checked_stack(self, other: DiscountRate) -> Option<DiscountRate> {
        let total = self.0.checked_add(other.0)?;
        (total <= Self::MAX_BPS).then_some(DiscountRate(total))
    }

    /// Applies the rate to an amount: `amount × (1 − rate)`.
    ///
    /// No rounding is performed.
    #[inline]
    pub fn apply_to(&self, amount: f64) -> f64 {
        amount * (1.0 - self.fraction())
    }
}

impl fmt::Display for DiscountRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percentage())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        let item = LineItem::new(9.99, 2.0);
        assert!((item.line_total() - 19.98).abs() < 1e-9);
    }

    #[test]
    fn test_line_item_from_json() {
        let item: LineItem = serde_json::from_str(r#"{"price": 10, "quantity": 3}"#).unwrap();
        assert_eq!(item, LineItem::new(10.0, 3.0));
    }

    #[test]
    fn test_discount_rate_from_fraction() {
        assert_eq!(DiscountRate::from_fraction(0.10).unwrap().bps(), 1000);
        assert_eq!(DiscountRate::from_fraction(0.5).unwrap().bps(), 5000);
        assert_eq!(DiscountRate::from_fraction(1.0).unwrap().bps(), 10_000);

        assert!(DiscountRate::from_fraction(0.0).is_none());
        assert!(DiscountRate::from_fraction(-0.1).is_none());
        assert!(DiscountRate::from_fraction(1.01).is_none());
        assert!(DiscountRate::from_fraction(f64::NAN).is_none());
        assert!(DiscountRate::from_fraction(0.000_01).is_none());
    }

    #[test]
    fn test_from_fraction_rejects_partial_basis_points() {
        assert!(DiscountRate::from_fraction(0.12345).is_none());
        assert!(DiscountRate::from_fraction(0.000_04).is_none());
        assert!(DiscountRate::is_valid_fraction(0.000_04));

        assert_eq!(DiscountRate::from_fraction(0.1235).unwrap().bps(), 1235);
        assert_eq!(DiscountRate::from_fraction(0.0001).unwrap().bps(), 1);
    }

    #[test]
    fn test_try_from_bps_range() {
        assert!(DiscountRate::try_from_bps(0).is_none());
        assert!(DiscountRate::try_from_bps(10_001).is_none());
        assert_eq!(DiscountRate::try_from_bps(1).unwrap().bps(), 1);
        assert_eq!(DiscountRate::try_from_bps(10_000).unwrap().bps(), 10_000);
    }

    #[test]
    fn test_checked_stack_allows_exactly_full() {
        let half = DiscountRate::from_bps(5000);
        let full = half.checked_stack(half).unwrap();
        assert_eq!(full.bps(), DiscountRate::MAX_BPS);

        assert!(full.checked_stack(DiscountRate::from_bps(1)).is_none());
    }

    #[test]
    fn test_ten_tenths_are_exactly_full() {
        let tenth = DiscountRate::from_fraction(0.1).unwrap();
        let total = (0..10).try_fold(DiscountRate::zero(), |acc, _| acc.checked_stack(tenth));
        assert_eq!(total, Some(DiscountRate::from_bps(10_000)));
    }

    #[test]
    fn test_apply_to() {
        let rate = DiscountRate::from_bps(1000);
        assert_eq!(rate.apply_to(100.0), 90.0);
        assert_eq!(DiscountRate::zero().apply_to(150.0), 150.0);
        assert_eq!(DiscountRate::from_bps(10_000).apply_to(120.40), 0.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(DiscountRate::from_bps(1000).to_string(), "10%");
        assert_eq!(DiscountCode::from("SAVE10").to_string(), "SAVE10");
    }
}
