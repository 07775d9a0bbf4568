//! # Error Types
//!
//! Domain-specific error types for lightweight-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  lightweight-core errors (this file)                                    │
//! │  ├── CoreError         - Hard failures (export, set_sum precondition)   │
//! │  ├── ValidationError   - A single field rule violation                  │
//! │  └── ValidationErrors  - All violations of one request, field-keyed     │
//! │                                                                         │
//! │  Flow: ValidationError ──collected──► ValidationErrors                  │
//! │        ValidationErrors ──export_data──► CoreError::ValidationFailed    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, bound, value)
//! 3. Errors are enum variants, never String
//! 4. `validate()` never fails fast - all field problems are collected and
//!    returned together in a `ValidationErrors`

use std::fmt;

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Hard failures of the request lifecycle.
///
/// Unlike per-field validation problems (which are collected, never thrown),
/// these errors abort the operation that raised them.
#[derive(Debug, Error)]
pub enum CoreError {
    /// `export_data` was invoked on a request that does not validate.
    ///
    /// ## When This Occurs
    /// - A mandatory field (shopId, sum) is missing or out of bounds
    /// - Any line item violates its field rules
    ///
    /// The consuming form layer is expected to block submission instead of
    /// showing these errors to the end customer.
    #[error("validation failed: {0}")]
    ValidationFailed(ValidationErrors),

    /// `set_sum` was called with a non-positive amount.
    ///
    /// This is a programmer-facing precondition, not end-user input, so it
    /// fails hard instead of being collected.
    #[error("sum must be positive, got {kopecks} kopecks")]
    InvalidSum { kopecks: i64 },

    /// Single field validation error (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// A single field rule violation.
///
/// These errors occur when a request or line-item field doesn't meet the
/// bank's lightweight-form requirements.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Monetary value is below a required minimum.
    #[error("{field} must be at least {min}")]
    BelowMinimum { field: String, min: Money },

    /// Phone number does not normalize to 10 or 11 digits.
    #[error("phone must contain 10 or 11 digits, got {digits}")]
    InvalidPhone { digits: usize },

    /// E-mail address has invalid syntax.
    #[error("invalid e-mail address: {value}")]
    InvalidEmail { value: String },
}

// =============================================================================
// Validation Errors Collection
// =============================================================================

/// All rule violations of one request, keyed by field path.
///
/// ## Field Paths
/// Top-level fields use the bank's camelCase field names (`shopId`,
/// `customerPhone`). Line-item violations are keyed by position:
/// `items[0].price`, `items[2].name`. Position matters because the flat
/// export schema encodes item identity by index.
///
/// ## Example
/// ```rust
/// use lightweight_core::error::{ValidationError, ValidationErrors};
///
/// let mut errors = ValidationErrors::new();
/// errors.add("shopId", ValidationError::Required { field: "shopId".to_string() });
///
/// assert_eq!(errors.len(), 1);
/// assert!(errors.contains("shopId"));
/// assert_eq!(errors.to_string(), "shopId: shopId is required");
/// ```
#[derive(Debug, Default)]
pub struct ValidationErrors {
    /// Violations in the order they were recorded.
    errors: Vec<(String, ValidationError)>,
}

impl ValidationErrors {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a violation against a field path.
    pub fn add(&mut self, field: impl Into<String>, error: ValidationError) {
        self.errors.push((field.into(), error));
    }

    /// Checks whether any violation was recorded.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of recorded violations.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Checks whether a specific field path has a violation.
    pub fn contains(&self, field: &str) -> bool {
        self.errors.iter().any(|(f, _)| f == field)
    }

    /// Iterates over `(field path, error)` pairs in recording order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ValidationError)> {
        self.errors.iter().map(|(f, e)| (f.as_str(), e))
    }

    /// Converts the collection into a `Result`: `Ok` when empty.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, error)) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

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
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "shopId".to_string(),
        };
        assert_eq!(err.to_string(), "shopId is required");

        let err = ValidationError::TooLong {
            field: "promoCode".to_string(),
            max: 20,
        };
        assert_eq!(err.to_string(), "promoCode must be at most 20 characters");

        let err = ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: 999,
        };
        assert_eq!(err.to_string(), "quantity must be between 1 and 999");

        let err = ValidationError::InvalidPhone { digits: 5 };
        assert_eq!(err.to_string(), "phone must contain 10 or 11 digits, got 5");

        let err = ValidationError::BelowMinimum {
            field: "sum".to_string(),
            min: Money::from_kopecks(300_000),
        };
        assert_eq!(err.to_string(), "sum must be at least 3000.00");
    }

    #[test]
    fn test_errors_collect_in_order() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "shopId",
            ValidationError::Required {
                field: "shopId".to_string(),
            },
        );
        errors.add(
            "items[0].price",
            ValidationError::MustBePositive {
                field: "price".to_string(),
            },
        );

        assert_eq!(errors.len(), 2);
        assert!(errors.contains("shopId"));
        assert!(errors.contains("items[0].price"));
        assert!(!errors.contains("sum"));

        let fields: Vec<&str> = errors.iter().map(|(f, _)| f).collect();
        assert_eq!(fields, vec!["shopId", "items[0].price"]);
    }

    #[test]
    fn test_into_result() {
        assert!(ValidationErrors::new().into_result().is_ok());

        let mut errors = ValidationErrors::new();
        errors.add(
            "sum",
            ValidationError::MustBePositive {
                field: "sum".to_string(),
            },
        );
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn test_errors_convert_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "shopId".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }

    #[test]
    fn test_validation_failed_message() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "shopId",
            ValidationError::Required {
                field: "shopId".to_string(),
            },
        );
        let err = CoreError::ValidationFailed(errors);
        assert_eq!(err.to_string(), "validation failed: shopId: shopId is required");
    }
}
