//! # Error Types
//!
//! Domain-specific error types for mercadito-core.
//!
//! ## Error Hierarchy
//! ```text
//! mercadito-core errors (this file)
//! ├── CoreError        - business rule violations
//! └── ValidationError  - input validation failures
//!
//! mercadito-db errors (separate crate)
//! ├── DbError          - database operation failures
//! └── StoreError       - CoreError | DbError, what callers match on
//! ```
//!
//! Every variant maps to a distinct, actionable caller-facing condition;
//! none of them should be collapsed into a generic failure message.

use thiserror::Error;

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Requested sale quantity exceeds the currently known stock.
    ///
    /// Raised while staging a ticket line and again at commit time, where
    /// stock is re-read from the store. The staging buffer is left
    /// untouched in both cases so the operator can adjust quantities.
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: f64,
        requested: f64,
    },

    /// A sale must carry at least one line item.
    #[error("Sale has no line items")]
    EmptySale,

    /// A staged-line index that does not exist in the ticket.
    #[error("No staged line at index {0}")]
    LineOutOfRange(usize),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Input validation errors.
///
/// Detected before any persistence attempt, with no partial mutation.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// A price that would be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// A quantity that must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// A numeric field that is NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        let err = CoreError::InsufficientStock {
            name: "Pan Amasado".to_string(),
            available: 3.0,
            requested: 5.0,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Pan Amasado: available 3, requested 5"
        );

        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");
    }

    #[test]
    fn validation_converts_to_core_error() {
        let validation_err = ValidationError::Negative {
            field: "sale price".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
