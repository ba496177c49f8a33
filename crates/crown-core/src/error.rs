//! # Error Types
//!
//! Domain-specific error types for crown-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  crown-core errors (this file)                                         │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  crown-store errors (separate crate)                                   │
//! │  └── StoreError       - Backend / entity store failures                │
//! │                                                                         │
//! │  API errors (apps/api)                                                 │
//! │  └── ApiError         - What the client sees ({success:false, error})  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → HTTP status + envelope │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An invoice line references a product that does not exist.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Invoice cannot be found.
    #[error("Invoice not found: {0}")]
    InvoiceNotFound(String),

    /// A cart line asks for more units than are on the shelf.
    ///
    /// ## User Workflow
    /// ```text
    /// Finalize invoice (Silk Tie × 80)
    ///      │
    ///      ▼
    /// Check stock: available=75
    ///      │
    ///      ▼
    /// InsufficientStock { product: "Silk Tie", available: 75, requested: 80 }
    ///      │
    ///      ▼
    /// 400 "Insufficient stock for Silk Tie. Available: 75"
    /// ```
    #[error("Insufficient stock for {product}. Available: {available}")]
    InsufficientStock {
        product: String,
        available: i64,
        requested: i64,
    },

    /// Validation error (wraps ValidationError).
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when request data doesn't meet requirements.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., PIN with letters, NaN price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Shorthand for [`ValidationError::Required`].
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_stock_message_names_product_and_available() {
        let err = CoreError::InsufficientStock {
            product: "Silk Tie".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(err.to_string(), "Insufficient stock for Silk Tie. Available: 3");
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(ValidationError::required("name").to_string(), "name is required");

        let err = ValidationError::OutOfRange {
            field: "taxRate".to_string(),
            min: 0,
            max: 100,
        };
        assert_eq!(err.to_string(), "taxRate must be between 0 and 100");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("customer").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.to_string(), "customer is required");
    }
}
