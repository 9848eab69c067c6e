//! # Service Error Type
//!
//! The only error type that crosses the service boundary.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Shelf                                  │
//! │                                                                         │
//! │  ValidationError ─── bad input ─────────────► VALIDATION_ERROR         │
//! │                                                                         │
//! │  CoreError ───────── ProductNotFound ───────► NOT_FOUND                │
//! │                      SkuAlreadyExists ──────► CONFLICT                 │
//! │                      BarcodesNotUnique ─────► CONFLICT                 │
//! │                                                                         │
//! │  DbError ─────────── NotFound ──────────────► NOT_FOUND                │
//! │                      UniqueViolation ───────► CONFLICT (race lost)     │
//! │                      anything else ─────────► DATABASE_ERROR           │
//! │                                               "Database error"         │
//! │                                               full detail only in log  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use shelf_core::{CoreError, ValidationError};
use shelf_db::DbError;

/// Error returned by every [`ProductService`](crate::ProductService) call.
///
/// ## Serialization
/// ```json
/// {
///   "code": "CONFLICT",
///   "message": "SKU 'MUG-1' already exists"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable message, safe to show to a client
    pub message: String,
}

/// Error codes for service responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// SKU or barcode already taken (409)
    Conflict,

    /// Storage failed; details are in the log (500)
    DatabaseError,
}

impl ServiceError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ServiceError {
            code,
            message: message.into(),
        }
    }

    /// Returns true for failures the caller can fix by changing the request.
    pub fn is_client_error(&self) -> bool {
        !matches!(self.code, ErrorCode::DatabaseError)
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<CoreError> for ServiceError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => e.into(),
            CoreError::ProductNotFound(_) => ServiceError::new(ErrorCode::NotFound, err.to_string()),
            CoreError::SkuAlreadyExists(_) | CoreError::BarcodesNotUnique(_) => {
                ServiceError::new(ErrorCode::Conflict, err.to_string())
            }
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::new(ErrorCode::ValidationError, err.to_string())
    }
}

/// Converts database errors, never leaking storage detail.
impl From<DbError> for ServiceError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => {
                ServiceError::new(ErrorCode::NotFound, format!("{entity} not found: {id}"))
            }
            DbError::UniqueViolation { .. } => {
                ServiceError::new(ErrorCode::Conflict, err.to_string())
            }
            other => {
                tracing::error!(error = %other, "Storage failure");
                ServiceError::new(ErrorCode::DatabaseError, "Database error")
            }
        }
    }
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ServiceError {}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_errors_are_generic() {
        let err: ServiceError = DbError::QueryFailed("no such table: product".to_string()).into();

        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.message, "Database error");
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_conflicts_keep_the_offending_value() {
        let err: ServiceError = CoreError::BarcodesNotUnique(vec!["111".to_string()]).into();
        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(err.message, "Barcodes not unique: 111");

        let err: ServiceError = DbError::duplicate("sku", "MUG-1").into();
        assert_eq!(err.code, ErrorCode::Conflict);
        assert!(err.message.contains("MUG-1"));
    }

    #[test]
    fn test_validation_inside_core_error() {
        let err: ServiceError = CoreError::Validation(ValidationError::UnknownField(
            "colour".to_string(),
        ))
        .into();

        assert_eq!(
            err,
            ServiceError::new(ErrorCode::ValidationError, "Unknown field (colour) in field list")
        );
    }

    #[test]
    fn test_serialized_shape() {
        let err = ServiceError::new(ErrorCode::NotFound, "Can't find product 3");
        let json = serde_json::to_value(&err).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"code": "NOT_FOUND", "message": "Can't find product 3"})
        );
    }
}
