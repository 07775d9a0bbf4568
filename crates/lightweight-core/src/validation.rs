//! # Validation Module
//!
//! Stateless field validation and normalization primitives.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Host shop UI                                                 │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (per-field primitives)                           │
//! │  ├── Trimming, length bounds, phone digits, email syntax               │
//! │  └── Used by LineItem::validate and CreditRequest::validate            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Bank endpoint                                                │
//! │  └── Server-side rejection of malformed applications                   │
//! │                                                                         │
//! │  Defense in depth: the export map is never built from raw input        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use lightweight_core::validation::{normalize_phone, trim_to_len};
//!
//! // Normalize a customer phone before export
//! assert_eq!(normalize_phone("+7 (916) 123-45-67").unwrap(), "79161234567");
//!
//! // Trim and bound a shop identifier
//! assert_eq!(trim_to_len("shopId", "  shop1  ", 50).unwrap(), "shop1");
//! ```

use std::sync::OnceLock;

use regex::Regex;

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Trims a string and enforces a maximum length.
///
/// ## Rules
/// - Leading/trailing whitespace is removed
/// - Length is counted in characters, not bytes (names and categories are
///   routinely Cyrillic)
///
/// ## Example
/// ```rust
/// use lightweight_core::validation::trim_to_len;
///
/// assert_eq!(trim_to_len("orderNumber", " A-17 ", 64).unwrap(), "A-17");
/// assert!(trim_to_len("promoCode", &"x".repeat(21), 20).is_err());
/// ```
pub fn trim_to_len(field: &str, value: &str, max: usize) -> ValidationResult<String> {
    let value = value.trim();

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(value.to_string())
}

/// Normalizes an optional string field: trims, converts empty to absent.
///
/// The bank endpoint treats absent fields as unset, not as empty strings,
/// so `Some("")` and `Some("  ")` both become `None`.
pub fn normalize_optional(value: Option<&str>) -> Option<String> {
    let value = value?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Normalizes and bounds an optional string field in one step.
///
/// Empty-to-absent conversion happens before the length check, matching the
/// per-field order used for `showcaseId`, `orderNumber` and friends.
pub fn trim_optional_to_len(
    field: &str,
    value: Option<&str>,
    max: usize,
) -> ValidationResult<Option<String>> {
    match normalize_optional(value) {
        None => Ok(None),
        Some(v) => trim_to_len(field, &v, max).map(Some),
    }
}

/// Checks that a field is present and non-empty after trimming.
///
/// ## Example
/// ```rust
/// use lightweight_core::validation::require_non_empty;
///
/// assert!(require_non_empty("shopId", "shop1").is_ok());
/// assert!(require_non_empty("shopId", "   ").is_err());
/// ```
pub fn require_non_empty(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Phone Normalization
// =============================================================================

/// Strips every non-digit character from a phone number.
///
/// Accepts any customer-entered formatting: `+7XXXXXXXXXX`, `7(XXX)XXXXXXX`,
/// `8-XXX-XXX-XX-XX`, `(XXX)XXX-XX-XX` and so on.
pub fn strip_digits(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Normalizes a customer phone to bare digits.
///
/// ## Rules
/// - All non-digit characters are stripped
/// - The result must be 10 or 11 digits
///
/// ## Example
/// ```rust
/// use lightweight_core::validation::normalize_phone;
///
/// assert_eq!(normalize_phone("+7 (916) 123-45-67").unwrap(), "79161234567");
/// assert_eq!(normalize_phone("(916)123-45-67").unwrap(), "9161234567");
/// assert!(normalize_phone("12345").is_err());
/// ```
pub fn normalize_phone(value: &str) -> ValidationResult<String> {
    let digits = strip_digits(value);

    if !(10..=11).contains(&digits.chars().count()) {
        return Err(ValidationError::InvalidPhone {
            digits: digits.chars().count(),
        });
    }

    Ok(digits)
}

// =============================================================================
// E-mail Validation
// =============================================================================

/// Checks standard e-mail syntax.
///
/// ## Example
/// ```rust
/// use lightweight_core::validation::validate_email;
///
/// assert!(validate_email("user@example.com").is_ok());
/// assert!(validate_email("user.name+tag@example.co.uk").is_ok());
/// assert!(validate_email("not-an-email").is_err());
/// ```
pub fn validate_email(value: &str) -> ValidationResult<()> {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
    });

    if !regex.is_match(value) {
        return Err(ValidationError::InvalidEmail {
            value: value.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_to_len() {
        assert_eq!(trim_to_len("shopId", "  shop1  ", 50).unwrap(), "shop1");
        assert_eq!(trim_to_len("shopId", "", 50).unwrap(), "");

        let err = trim_to_len("promoCode", &"x".repeat(21), 20).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 20, .. }));
    }

    #[test]
    fn test_trim_to_len_counts_characters_not_bytes() {
        // 5 Cyrillic characters = 10 bytes; must pass a max of 5
        assert!(trim_to_len("name", "диван", 5).is_ok());
        assert!(trim_to_len("name", "диваны", 5).is_err());
    }

    #[test]
    fn test_normalize_optional() {
        assert_eq!(normalize_optional(None), None);
        assert_eq!(normalize_optional(Some("")), None);
        assert_eq!(normalize_optional(Some("   ")), None);
        assert_eq!(normalize_optional(Some(" ABC ")), Some("ABC".to_string()));
    }

    #[test]
    fn test_trim_optional_to_len() {
        assert_eq!(trim_optional_to_len("showcaseId", Some(""), 50).unwrap(), None);
        assert_eq!(
            trim_optional_to_len("showcaseId", Some(" site-2 "), 50).unwrap(),
            Some("site-2".to_string())
        );
        assert!(trim_optional_to_len("showcaseId", Some(&"x".repeat(51)), 50).is_err());
    }

    #[test]
    fn test_require_non_empty() {
        assert!(require_non_empty("shopId", "shop1").is_ok());
        assert!(require_non_empty("shopId", "").is_err());
        assert!(require_non_empty("shopId", "  ").is_err());
    }

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone("+7 (916) 123-45-67").unwrap(), "79161234567");
        assert_eq!(normalize_phone("8-916-123-45-67").unwrap(), "89161234567");
        assert_eq!(normalize_phone("(916)123-45-67").unwrap(), "9161234567");

        let err = normalize_phone("12345").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidPhone { digits: 5 }));

        // 12 digits is too many
        assert!(normalize_phone("791612345678").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("user.name+tag@example.co.uk").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@").is_err());
    }
}
