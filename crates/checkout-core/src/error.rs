//! # Error Types
//!
//! Domain-specific error types for checkout-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  PricingError         - Cart total and discount failures               │
//! │  ├── ValidationError  - Address record failures                        │
//! │  └── ConfigError      - Pricing config load/parse failures             │
//! │                                                                         │
//! │  Flow: ValidationError / ConfigError → PricingError → Caller           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (code, item index, field)
//! 3. Errors are enum variants, never String
//! 4. Nothing in this crate logs-and-swallows an error

use std::path::PathBuf;

use thiserror::Error;

// =============================================================================
// Pricing Error
// =============================================================================

/// Cart pricing and discount errors.
#[derive(Debug, Error)]
pub enum PricingError {
    /// Cart items are not a list of records.
    ///
    /// ## When This Occurs
    /// - Input is a string, number, null or a single object
    /// - Any element of the list is not an object
    #[error("Cart items should be a list of dictionaries.")]
    InvalidInput,

    /// A line item is missing `price` or `quantity`.
    #[error("Line item {index} is missing required field '{field}'")]
    MissingField { index: usize, field: &'static str },

    /// A line item field is present but not a number.
    #[error("Line item {index} field '{field}' must be a number")]
    TypeMismatch { index: usize, field: &'static str },

    /// Discount code is not in the rate table.
    ///
    /// ## User Workflow
    /// ```text
    /// Codes: ["SAVE10", "BOGUS", "SAVE20"]
    ///      │
    ///      ▼
    /// SAVE10 ok (10%)
    ///      │
    ///      ▼
    /// BOGUS → InvalidCode { code: "BOGUS" }   (SAVE20 never looked at)
    /// ```
    #[error("Invalid discount code: {code}")]
    InvalidCode { code: String },

    /// Stacking the next code would push the discount past 100%.
    #[error("Total discount cannot exceed 100%.")]
    ExceedsMaximumDiscount,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration error (wraps ConfigError).
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Shipping address validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The address is not a record.
    #[error("Address must be a dictionary.")]
    NotAnObject,

    /// One or more required fields are absent, in required order.
    #[error("Missing required fields: {}", fields.join(","))]
    MissingFields { fields: Vec<&'static str> },

    /// Fields are present but cannot be read as a typed address.
    #[error("Address has an invalid field: {reason}")]
    InvalidField { reason: String },
}

// =============================================================================
// Config Error
// =============================================================================

/// Pricing configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read pricing config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse pricing config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Discount codes must be non-empty.
    #[error("Discount code must not be empty")]
    EmptyCode,

    /// Rate is outside `(0, 1]`.
    #[error("Discount rate for {code} must be in (0, 1], got {rate}")]
    InvalidRate { code: String, rate: f64 },

    /// Rate is in range but not a whole number of basis points (0.0001).
    #[error("Discount rate for {code} must be a whole number of basis points (multiple of 0.0001), got {rate}")]
    InexactRate { code: String, rate: f64 },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with PricingError.
pub type PricingResult<T> = Result<T, PricingError>;

/// Convenience type alias for Results with ConfigError.
pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PricingError::InvalidCode {
            code: "BOGUS".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid discount code: BOGUS");

        assert_eq!(
            PricingError::ExceedsMaximumDiscount.to_string(),
            "Total discount cannot exceed 100%."
        );
        assert_eq!(
            PricingError::InvalidInput.to_string(),
            "Cart items should be a list of dictionaries."
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MissingFields {
            fields: vec!["name", "postcode", "country"],
        };
        assert_eq!(err.to_string(), "Missing required fields: name,postcode,country");
        assert_eq!(
            ValidationError::NotAnObject.to_string(),
            "Address must be a dictionary."
        );
    }

    #[test]
    fn test_validation_converts_to_pricing_error() {
        let pricing_err: PricingError = ValidationError::NotAnObject.into();
        assert!(matches!(pricing_err, PricingError::Validation(_)));
    }

    #[test]
    fn test_config_error_messages() {
        let err = ConfigError::InexactRate {
            code: "ODD".to_string(),
            rate: 0.12345,
        };
        assert_eq!(
            err.to_string(),
            "Discount rate for ODD must be a whole number of basis points (multiple of 0.0001), got 0.12345"
        );
    }

    #[test]
    fn test_config_converts_to_pricing_error() {
        let pricing_err: PricingError = ConfigError::EmptyCode.into();
        assert!(matches!(pricing_err, PricingError::Config(_)));
    }
}
