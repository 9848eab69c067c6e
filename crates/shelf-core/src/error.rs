//! # Error Types
//!
//! Domain-specific error types for shelf-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shelf-core errors (this file)                                         │
//! │  ├── CoreError        - Not-found and uniqueness conflicts             │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  shelf-db errors (separate crate)                                      │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  shelf-service errors                                                  │
//! │  └── ServiceError     - What callers see (code + safe message)         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ServiceError                      │
//! │        DbError ───────────────────→ ServiceError                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::ProductId;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations detected before anything is written.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No product row exists for the identifier.
    #[error("Can't find product {0}")]
    ProductNotFound(ProductId),

    /// Another product already owns this SKU.
    ///
    /// ## When This Occurs
    /// - Creating a product with a SKU that is taken
    /// - Renaming a product's SKU to one owned by a different product
    #[error("SKU '{0}' already exists")]
    SkuAlreadyExists(String),

    /// One or more barcodes already belong to another product.
    #[error("Barcodes not unique: {}", .0.join(", "))]
    BarcodesNotUnique(Vec<String>),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// They are raised before any statement is built.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
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

    /// Invalid format (e.g. a price that is not a decimal).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// The same value appears more than once in one input collection.
    #[error("{field} contains duplicate value '{value}'")]
    Duplicate { field: String, value: String },

    /// A requested field name is not part of the vocabulary.
    #[error("Unknown field ({0}) in field list")]
    UnknownField(String),
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
    fn test_error_messages() {
        let err = CoreError::SkuAlreadyExists("MUG-1".to_string());
        assert_eq!(err.to_string(), "SKU 'MUG-1' already exists");

        let err = CoreError::BarcodesNotUnique(vec!["111".to_string(), "222".to_string()]);
        assert_eq!(err.to_string(), "Barcodes not unique: 111, 222");

        let err = CoreError::ProductNotFound(7);
        assert_eq!(err.to_string(), "Can't find product 7");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "sku".to_string(),
        };
        assert_eq!(err.to_string(), "sku is required");

        let err = ValidationError::TooLong {
            field: "title".to_string(),
            max: 32,
        };
        assert_eq!(err.to_string(), "title must be at most 32 characters");

        let err = ValidationError::UnknownField("colour".to_string());
        assert_eq!(err.to_string(), "Unknown field (colour) in field list");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "sku".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
