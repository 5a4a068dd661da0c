//! # Validation Module
//!
//! Shipping address checks run before an order is accepted.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Address Validation                                 │
//! │                                                                         │
//! │  Incoming payload (JSON)                                               │
//! │           │                                                             │
//! │           ├── not an object? → NotAnObject                             │
//! │           │                                                             │
//! │           ├── any of name/street/city/postcode/country absent?         │
//! │           │       → MissingFields [all absent, in that order]          │
//! │           │                                                             │
//! │           └── OK (values are not inspected)                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use checkout_core::validation::validate_shipping_address;
//! use serde_json::json;
//!
//! let address = json!({
//!     "name": "John Doe",
//!     "street": "Jl. Sudirman",
//!     "city": "Malang",
//!     "postcode": "65122",
//!     "country": "Indonesia",
//! });
//! assert!(validate_shipping_address(&address).is_ok());
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Fields every shipping address must carry, in reporting order.
pub const REQUIRED_ADDRESS_FIELDS: [&str; 5] = ["name", "street", "city", "postcode", "country"];

// =============================================================================
// Shipping Address
// =============================================================================

/// A typed shipping address, for callers past the validation boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub name: String,
    pub street: String,
    pub city: String,
    pub postcode: String,
    pub country: String,
}

impl ShippingAddress {
    /// Validates a JSON address and converts it to the typed form.
    ///
    /// Presence is checked first so callers get the full list of missing
    /// fields; after that every field must be a string.
    pub fn from_json(address: &Value) -> ValidationResult<Self> {
        validate_shipping_address(address)?;
        serde_json::from_value(address.clone()).map_err(|e| ValidationError::InvalidField {
            reason: e.to_string(),
        })
    }
}

// =============================================================================
// Validators
// =============================================================================

/// Validates that a shipping address is an object carrying every required
/// field.
///
/// ## Rules
/// - Must be a JSON object
/// - Must contain `name`, `street`, `city`, `postcode` and `country`
/// - Field values are not inspected; an empty string counts as present
///
/// ## Example
/// ```rust
/// use checkout_core::validation::validate_shipping_address;
/// use serde_json::json;
///
/// let err = validate_shipping_address(&json!({"street": "x", "city": "y"})).unwrap_err();
/// assert_eq!(err.to_string(), "Missing required fields: name,postcode,country");
/// ```
pub fn validate_shipping_address(address: &Value) -> ValidationResult<()> {
    let record = address.as_object().ok_or(ValidationError::NotAnObject)?;

    let missing: Vec<&'static str> = REQUIRED_ADDRESS_FIELDS
        .into_iter()
        .filter(|field| !record.contains_key(*field))
        .collect();

    if !missing.is_empty() {
        debug!(missing = ?missing, "Shipping address rejected");
        return Err(ValidationError::MissingFields { fields: missing });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
