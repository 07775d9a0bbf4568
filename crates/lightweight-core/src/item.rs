//! # Line Item
//!
//! One position of the order being submitted for credit.
//!
//! ## Field Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Line Item Validation                               │
//! │                                                                         │
//! │  Field         Required   Rule                       Normalization      │
//! │  ───────────   ────────   ────────────────────────   ─────────────────  │
//! │  name          yes        3..=255 characters         trimmed in place   │
//! │  price         yes        > 0 kopecks                -                  │
//! │  quantity      yes        1..=999                    -                  │
//! │  vendorCode    no         <= 64 characters           trim, "" -> None   │
//! │  category      no         <= 255 characters          trim, "" -> None   │
//! │                                                                         │
//! │  Each field is normalized as soon as it is checked, even when a        │
//! │  sibling field fails: a half-valid item still comes out half-clean.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationErrors};
use crate::money::Money;
use crate::validation::normalize_optional;

/// Minimum item name length in characters.
pub const NAME_MIN: usize = 3;

/// Maximum item name length in characters.
pub const NAME_MAX: usize = 255;

/// Maximum number of units in one order line.
///
/// Catches accidental over-ordering (typing 1000 instead of 10) and keeps
/// line totals well inside i64 kopecks.
pub const QUANTITY_MAX: i64 = 999;

/// Maximum vendor code (article number) length in characters.
pub const VENDOR_CODE_MAX: usize = 64;

/// Maximum category length in characters.
pub const CATEGORY_MAX: usize = 255;

// =============================================================================
// Line Item
// =============================================================================

/// One order line: a product name, unit price and quantity, plus optional
/// vendor code (article number) and category.
///
/// Serde field names follow the bank's camelCase schema so items can be
/// deserialized straight from a host-app order payload.
///
/// ## Example
/// ```rust
/// use lightweight_core::item::LineItem;
/// use lightweight_core::money::Money;
///
/// let mut item = LineItem::new("Phone", Money::from_rubles(15000.0), 1)
///     .with_category("электроника");
///
/// assert!(item.validate().is_ok());
/// assert_eq!(item.line_total().to_string(), "15000.00");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Product name shown on the application.
    pub name: String,

    /// Unit price in kopecks.
    pub price: Money,

    /// Number of units.
    pub quantity: i64,

    /// Vendor code / article number.
    #[serde(default)]
    pub vendor_code: Option<String>,

    /// Product category (furniture, electronics, appliances, ...).
    #[serde(default)]
    pub category: Option<String>,
}

impl LineItem {
    /// Creates a line item with the mandatory fields.
    pub fn new(name: impl Into<String>, price: Money, quantity: i64) -> Self {
        LineItem {
            name: name.into(),
            price,
            quantity,
            vendor_code: None,
            category: None,
        }
    }

    /// Sets the vendor code (builder style).
    pub fn with_vendor_code(mut self, vendor_code: impl Into<String>) -> Self {
        self.vendor_code = Some(vendor_code.into());
        self
    }

    /// Sets the category (builder style).
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Calculates the line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }

    /// Validates all fields, accumulating every violation.
    ///
    /// Field errors are keyed by plain field name (`name`, `price`, ...).
    /// Successful sub-fields are normalized in place even when siblings
    /// fail; callers may re-validate after fixing the reported fields.
    pub fn validate(&mut self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        self.collect_errors("", &mut errors);
        errors.into_result()
    }

    /// Validates this item, recording violations under `{prefix}.{field}`.
    ///
    /// `CreditRequest` passes `items[{pos}]` so that errors stay attached to
    /// the item position used by the flat export schema.
    pub(crate) fn collect_errors(&mut self, prefix: &str, errors: &mut ValidationErrors) {
        let key = |field: &str| {
            if prefix.is_empty() {
                field.to_string()
            } else {
                format!("{prefix}.{field}")
            }
        };

        // name: trimmed in place regardless of the outcome
        self.name = self.name.trim().to_string();
        let name_len = self.name.chars().count();
        if self.name.is_empty() {
            errors.add(
                key("name"),
                ValidationError::Required {
                    field: "name".to_string(),
                },
            );
        } else if name_len < NAME_MIN {
            errors.add(
                key("name"),
                ValidationError::TooShort {
                    field: "name".to_string(),
                    min: NAME_MIN,
                },
            );
        } else if name_len > NAME_MAX {
            errors.add(
                key("name"),
                ValidationError::TooLong {
                    field: "name".to_string(),
                    max: NAME_MAX,
                },
            );
        }

        // price: integer kopecks, so "positive" is the whole rule
        if !self.price.is_positive() {
            errors.add(
                key("price"),
                ValidationError::MustBePositive {
                    field: "price".to_string(),
                },
            );
        }

        // quantity
        if self.quantity < 1 {
            errors.add(
                key("quantity"),
                ValidationError::MustBePositive {
                    field: "quantity".to_string(),
                },
            );
        } else if self.quantity > QUANTITY_MAX {
            errors.add(
                key("quantity"),
                ValidationError::OutOfRange {
                    field: "quantity".to_string(),
                    min: 1,
                    max: QUANTITY_MAX,
                },
            );
        }

        // vendorCode: empty-to-absent even when other fields failed
        self.vendor_code = normalize_optional(self.vendor_code.as_deref());
        if let Some(vendor_code) = &self.vendor_code {
            if vendor_code.chars().count() > VENDOR_CODE_MAX {
                errors.add(
                    key("vendorCode"),
                    ValidationError::TooLong {
                        field: "vendorCode".to_string(),
                        max: VENDOR_CODE_MAX,
                    },
                );
            }
        }

        // category
        self.category = normalize_optional(self.category.as_deref());
        if let Some(category) = &self.category {
            if category.chars().count() > CATEGORY_MAX {
                errors.add(
                    key("category"),
                    ValidationError::TooLong {
                        field: "category".to_string(),
                        max: CATEGORY_MAX,
                    },
                );
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_item() {
        let mut item = LineItem::new("Phone", Money::from_kopecks(1_500_000), 1);
        assert!(item.validate().is_ok());
        assert_eq!(item.line_total().kopecks(), 1_500_000);
    }

    #[test]
    fn test_line_total_multiplies_quantity() {
        let item = LineItem::new("Chair", Money::from_kopecks(250_000), 4);
        assert_eq!(item.line_total().kopecks(), 1_000_000);
    }

    #[test]
    fn test_name_rules() {
        let mut item = LineItem::new("  ", Money::from_kopecks(100), 1);
        let errors = item.validate().unwrap_err();
        assert!(errors.contains("name"));

        let mut item = LineItem::new("TV", Money::from_kopecks(100), 1);
        let errors = item.validate().unwrap_err();
        assert!(matches!(
            errors.iter().next().unwrap().1,
            ValidationError::TooShort { min: 3, .. }
        ));

        let mut item = LineItem::new("x".repeat(256), Money::from_kopecks(100), 1);
        assert!(item.validate().is_err());
    }

    #[test]
    fn test_all_errors_reported_together() {
        let mut item = LineItem::new("", Money::zero(), 0);
        let errors = item.validate().unwrap_err();

        assert_eq!(errors.len(), 3);
        assert!(errors.contains("name"));
        assert!(errors.contains("price"));
        assert!(errors.contains("quantity"));
    }

    #[test]
    fn test_partial_normalization_on_partial_failure() {
        // price is invalid, but name must still be trimmed and the empty
        // vendor code converted to absent
        let mut item = LineItem::new("  Диван  ", Money::zero(), 2).with_vendor_code("   ");

        let errors = item.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains("price"));

        assert_eq!(item.name, "Диван");
        assert_eq!(item.vendor_code, None);
    }

    #[test]
    fn test_quantity_upper_bound() {
        let mut item = LineItem::new("Phone", Money::from_kopecks(2), QUANTITY_MAX);
        assert!(item.validate().is_ok());

        let mut item = LineItem::new("Phone", Money::from_kopecks(2), QUANTITY_MAX + 1);
        let errors = item.validate().unwrap_err();
        assert!(errors.contains("quantity"));
        assert!(matches!(
            errors.iter().next().unwrap().1,
            ValidationError::OutOfRange { min: 1, max: 999, .. }
        ));
    }

    #[test]
    fn test_extreme_quantity_is_rejected_and_total_does_not_panic() {
        let mut item = LineItem::new("Phone", Money::from_kopecks(2), i64::MAX);

        let errors = item.validate().unwrap_err();
        assert!(errors.contains("quantity"));

        // even before the caller sees the error, the total must not panic
        assert_eq!(item.line_total().kopecks(), i64::MAX);
    }

    #[test]
    fn test_vendor_code_and_category_bounds() {
        let mut item = LineItem::new("Sofa", Money::from_kopecks(100), 1)
            .with_vendor_code("v".repeat(65))
            .with_category("c".repeat(256));

        let errors = item.validate().unwrap_err();
        assert!(errors.contains("vendorCode"));
        assert!(errors.contains("category"));
    }

    #[test]
    fn test_prefixed_keys_for_request_level_errors() {
        let mut item = LineItem::new("", Money::from_kopecks(100), 1);
        let mut errors = ValidationErrors::new();
        item.collect_errors("items[2]", &mut errors);

        assert!(errors.contains("items[2].name"));
    }

    #[test]
    fn test_deserializes_from_camel_case_payload() {
        let item: LineItem = serde_json::from_str(
            r#"{"name":"Phone","price":1500000,"quantity":1,"vendorCode":"SKU-1"}"#,
        )
        .unwrap();

        assert_eq!(item.name, "Phone");
        assert_eq!(item.price.kopecks(), 1_500_000);
        assert_eq!(item.vendor_code.as_deref(), Some("SKU-1"));
        assert_eq!(item.category, None);
    }
}
