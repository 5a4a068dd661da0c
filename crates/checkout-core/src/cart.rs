//! # Cart Totals
//!
//! Reduces line items into a cart total.
//!
//! ## Two Entry Points
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Typed callers                      Untyped callers (JSON payloads)     │
//! │  ─────────────                      ───────────────────────────────     │
//! │  &[LineItem]                        serde_json::Value                   │
//! │      │                                  │                               │
//! │      │                                  ▼                               │
//! │      │                          aggregate_and_discount()                │
//! │      │                            1. shape: list of objects?            │
//! │      │                            2. per item: price, quantity present? │
//! │      │                            3. per item: both numeric?            │
//! │      │                                  │                               │
//! │      ▼                                  ▼                               │
//! │  calculate_cart_total(items, discount) ◄┘                               │
//! │      Σ price × quantity × (1 − discount)                                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `discount` fraction is trusted: it is not bounds-checked here. Use
//! [`crate::discount::DiscountApplier`] when the discount comes from codes.

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{PricingError, PricingResult};
use crate::types::LineItem;

const PRICE: &str = "price";
const QUANTITY: &str = "quantity";

// =============================================================================
// Typed API
// =============================================================================

/// Sums `price × quantity` over all items.
///
/// An empty cart sums to zero.
pub fn calculate_cart_subtotal(items: &[LineItem]) -> f64 {
    items.iter().map(LineItem::line_total).sum()
}

/// Calculates `Σ(price × quantity) × (1 − discount)`.
///
/// ## Example
/// ```rust
/// use checkout_core::cart::calculate_cart_total;
/// use checkout_core::LineItem;
///
/// let items = [LineItem::new(10.0, 1.0), LineItem::new(20.0, 2.0)];
/// assert_eq!(calculate_cart_total(&items, 0.0), 50.0);
/// assert_eq!(calculate_cart_total(&items, 0.5), 25.0);
/// ```
pub fn calculate_cart_total(items: &[LineItem], discount: f64) -> f64 {
    let subtotal = calculate_cart_subtotal(items);
    let total = subtotal * (1.0 - discount);
    debug!(items = items.len(), subtotal, discount, total, "Calculated cart total");
    total
}

// =============================================================================
// JSON Boundary
// =============================================================================

/// Converts a JSON cart into typed line items.
///
/// ## Failure Order
/// 1. The whole value must be an array of objects, otherwise
///    [`PricingError::InvalidInput`]. No item is inspected before this passes.
/// 2. Items are then visited in order. For each item `price` is looked up,
///    then `quantity` ([`PricingError::MissingField`]), then both are checked
///    to be numbers ([`PricingError::TypeMismatch`]).
///
/// The first failing item wins; later items are not examined.
pub fn parse_line_items(items: &Value) -> PricingResult<Vec<LineItem>> {
    let records = as_records(items).ok_or(PricingError::InvalidInput)?;

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| parse_record(index, record))
        .collect()
}

/// Calculates the cart total for an untyped JSON cart.
///
/// Equivalent to [`parse_line_items`] followed by [`calculate_cart_total`].
///
/// ## Example
/// ```rust
/// use checkout_core::cart::aggregate_and_discount;
/// use checkout_core::PricingError;
/// use serde_json::json;
///
/// let total = aggregate_and_discount(&json!([{"price": 100, "quantity": 2}]), 0.0).unwrap();
/// assert_eq!(total, 200.0);
///
/// let err = aggregate_and_discount(&json!("not a list"), 0.0).unwrap_err();
/// assert!(matches!(err, PricingError::InvalidInput));
/// ```
pub fn aggregate_and_discount(items: &Value, discount: f64) -> PricingResult<f64> {
    let items = parse_line_items(items)?;
    Ok(calculate_cart_total(&items, discount))
}

fn as_records(items: &Value) -> Option<Vec<&Map<String, Value>>> {
    items.as_array()?.iter().map(Value::as_object).collect()
}

fn parse_record(index: usize, record: &Map<String, Value>) -> PricingResult<LineItem> {
    let price = lookup(index, record, PRICE)?;
    let quantity = lookup(index, record, QUANTITY)?;

    Ok(LineItem {
        price: as_number(index, price, PRICE)?,
        quantity: as_number(index, quantity, QUANTITY)?,
    })
}

fn lookup<'a>(
    index: usize,
    record: &'a Map<String, Value>,
    field: &'static str,
) -> PricingResult<&'a Value> {
    record
        .get(field)
        .ok_or(PricingError::MissingField { index, field })
}

/// Only JSON numbers count; numeric-looking strings and booleans do not.
fn as_number(index: usize, value: &Value, field: &'static str) -> PricingResult<f64> {
    value
        .as_f64()
        .ok_or(PricingError::TypeMismatch { index, field })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn approx_eq(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() <= f64::max(1e-12, expected.abs() * 1e-6)
    }

    #[test]
    fn test_cart_total_valid_cases() {
        let cases = [
            (json!([]), 0.0, 0.0),
            (json!([]), 0.5, 0.0),
            (json!([{"price": 10, "quantity": 1}]), 0.0, 10.0),
            (
                json!([{"price": 10, "quantity": 1}, {"price": 20, "quantity": 2}]),
                0.0,
                50.0,
            ),
            (json!([{"price": 10, "quantity": 1}]), 0.5, 5.0),
            (
                json!([{"price": 10, "quantity": 1}, {"price": 20, "quantity": 2}]),
                0.5,
                25.0,
            ),
            (
                json!([{"price": 10, "quantity": 1}, {"price": 20, "quantity": 2}]),
                1.0,
                0.0,
            ),
        ];

        for (items, discount, expected) in cases {
            let total = aggregate_and_discount(&items, discount).unwrap();
            assert!(
                approx_eq(total, expected),
                "items: {items}, discount: {discount}, expected: {expected}, got: {total}"
            );
        }
    }

    #[test]
    fn test_cart_total_float_cases() {
        let cases = [
            (json!([{"price": 10, "quantity": 1}]), 0.33, 6.7),
            (json!([{"price": 9.99, "quantity": 2}]), 0.10, 17.982),
            (
                json!([{"price": 15.15, "quantity": 1}, {"price": 7.7, "quantity": 3}]),
                0.15,
                32.5125,
            ),
        ];

        for (items, discount, expected) in cases {
            let total = aggregate_and_discount(&items, discount).unwrap();
            assert!(
                approx_eq(total, expected),
                "items: {items}, discount: {discount}, expected: {expected}, got: {total}"
            );
        }
    }

    #[test]
    fn test_default_discount_is_zero() {
        let items = [LineItem::new(100.0, 2.0)];
        assert_eq!(calculate_cart_total(&items, 0.0), 200.0);
        assert_eq!(calculate_cart_subtotal(&items), 200.0);
    }

    #[test]
    fn test_discount_is_not_bounds_checked() {
        let items = [LineItem::new(10.0, 1.0)];
        assert!(approx_eq(calculate_cart_total(&items, 1.5), -5.0));
        assert!(approx_eq(calculate_cart_total(&items, -0.5), 15.0));
    }

    #[test]
    fn test_invalid_structure() {
        let cases = [
            json!("not a list"),
            json!(123),
            json!(null),
            json!({"price": "10", "quantity": 1}),
            json!(["price", 10, "quantity", 1]),
            json!([{"price": 10, "quantity": 1}, "not have amount"]),
        ];

        for items in cases {
            let err = aggregate_and_discount(&items, 0.0).unwrap_err();
            assert!(matches!(err, PricingError::InvalidInput), "items: {items}");
            assert_eq!(err.to_string(), "Cart items should be a list of dictionaries.");
        }
    }

    #[test]
    fn test_missing_keys() {
        let cases = [
            (json!([{"price": 10}]), 0, QUANTITY),
            (json!([{"quantity": 1}]), 0, PRICE),
            (json!([{"price": 10, "quantity": 1}, {"price": 20}]), 1, QUANTITY),
            (json!([{"price": 10, "quantity": 1}, {"quantity": 2}]), 1, PRICE),
            (json!([{"price": 10}, {"price": 20, "quantity": 2}]), 0, QUANTITY),
            (json!([{"quantity": 10}, {"price": 20, "quantity": 2}]), 0, PRICE),
        ];

        for (items, expected_index, expected_field) in cases {
            match aggregate_and_discount(&items, 0.0) {
                Err(PricingError::MissingField { index, field }) => {
                    assert_eq!(index, expected_index, "items: {items}");
                    assert_eq!(field, expected_field, "items: {items}");
                }
                other => panic!("expected MissingField for {items}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_non_numeric_values() {
        let cases = [
            (json!([{"price": "100", "quantity": 2}]), PRICE),
            (json!([{"price": 100, "quantity": "2"}]), QUANTITY),
            (json!([{"price": "one hundred", "quantity": 2}]), PRICE),
            (json!([{"price": 100, "quantity": "two"}]), QUANTITY),
            (json!([{"price": true, "quantity": 1}]), PRICE),
            (json!([{"price": 100, "quantity": null}]), QUANTITY),
        ];

        for (items, expected_field) in cases {
            match aggregate_and_discount(&items, 0.0) {
                Err(PricingError::TypeMismatch { index, field }) => {
                    assert_eq!(index, 0);
                    assert_eq!(field, expected_field, "items: {items}");
                }
                other => panic!("expected TypeMismatch for {items}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_lookup_happens_before_type_check() {
        // Quantity is missing, so the bad price is never type-checked.
        let err = aggregate_and_discount(&json!([{"price": "10"}]), 0.0).unwrap_err();
        assert!(matches!(err, PricingError::MissingField { field: QUANTITY, .. }));
    }

    #[test]
    fn test_first_failing_item_wins() {
        let items = json!([{"price": "x", "quantity": 1}, {"quantity": 2}]);
        let err = aggregate_and_discount(&items, 0.0).unwrap_err();
        assert!(matches!(err, PricingError::TypeMismatch { index: 0, field: PRICE }));
    }

    #[test]
    fn test_parse_line_items() {
        let items = parse_line_items(&json!([{"price": 9.99, "quantity": 2, "sku": "X"}])).unwrap();
        assert_eq!(items, vec![LineItem::new(9.99, 2.0)]);
    }
}
