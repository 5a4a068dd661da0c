//! # checkout-core: Pure Pricing Logic
//!
//! Cart totals, stacked discount codes and shipping address checks as pure
//! functions.
//!
//! ## Pricing Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   line items ──► cart::calculate_cart_total ──► subtotal                │
//! │                                                    │                    │
//! │   codes ───────► discount::DiscountApplier ◄───────┘                    │
//! │                         │   (table from config::PricingConfig)          │
//! │                         ▼                                               │
//! │                    cart total                                           │
//! │                                                                         │
//! │   address ─────► validation::validate_shipping_address                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. **Pure Functions**: No side effects on the pricing path
//! 2. **No Global State**: The code table is a value passed to the applier
//! 3. **Float Arithmetic**: Amounts are `f64`, no rounding is applied
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use checkout_core::{calculate_cart_total, DiscountApplier, LineItem};
//!
//! let items = [LineItem::new(100.0, 1.0), LineItem::new(50.0, 2.0)];
//! let subtotal = calculate_cart_total(&items, 0.0);
//!
//! let applier = DiscountApplier::default();
//! let total = applier.apply_discounts(subtotal, &["SAVE50", "SAVE20"]).unwrap();
//!
//! assert!((total - 60.0).abs() < 1e-9);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod config;
pub mod discount;
pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{aggregate_and_discount, calculate_cart_subtotal, calculate_cart_total};
pub use config::PricingConfig;
pub use discount::{apply_discounts, DiscountApplier, DiscountTable};
pub use error::{ConfigError, ConfigResult, PricingError, PricingResult, ValidationError};
pub use types::{DiscountCode, DiscountRate, LineItem};
pub use validation::{validate_shipping_address, ShippingAddress, ValidationResult};
