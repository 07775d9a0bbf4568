//! # Credit Request
//!
//! The aggregate being built per credit application: shop and order fields,
//! optional customer contacts and the ordered list of line items.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Request Lifecycle                                    │
//! │                                                                         │
//! │  construct ──► fill fields / items ──► validate() ──► export_data()    │
//! │      │                                     │                │           │
//! │      │                                     │                ▼           │
//! │      │                                     │     flat map, rendered as  │
//! │      │                                     │     hidden <input> fields  │
//! │      │                                     ▼     by the host app        │
//! │      │                          all field errors collected,             │
//! │      │                          none thrown, none short-circuited      │
//! │      ▼                                                                  │
//! │  one request per form build; discarded after rendering                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Sum Semantics
//! `sum()` is the explicit override when `set_sum` was called, otherwise the
//! exact Σ(price × quantity) over items. Replacing or appending items clears
//! the override, so the two sources can never silently disagree.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CoreError, CoreResult, ValidationError, ValidationErrors};
use crate::item::LineItem;
use crate::money::Money;
use crate::validation::{normalize_optional, strip_digits, trim_optional_to_len, validate_email};
use crate::{
    ACTION_TEST_URL, ACTION_URL, PROMO_DEFAULT, PROMO_TEST, SHOP_TEST_ID, SHOWCASE_TEST_ID,
    SUM_MIN,
};

/// Maximum shop identifier length in characters.
const SHOP_ID_MAX: usize = 50;

/// Maximum showcase identifier length in characters.
const SHOWCASE_ID_MAX: usize = 50;

/// Maximum promo code length in characters.
const PROMO_CODE_MAX: usize = 20;

/// Maximum order number length in characters.
const ORDER_NUMBER_MAX: usize = 64;

/// Maximum customer number length in characters.
const CUSTOMER_NUMBER_MAX: usize = 64;

/// Maximum customer e-mail length in characters.
const CUSTOMER_EMAIL_MAX: usize = 100;

// =============================================================================
// Sum Check Mode
// =============================================================================

/// How the bank's 3000 ₽ minimum is applied.
///
/// Integrations disagree on whether an under-minimum order is a broken
/// request or merely an ineligible one, so the caller picks:
///
/// - `Strict`: `validate()` fails when `sum < SUM_MIN`
/// - `Lenient`: `validate()` only requires a positive sum; the minimum is
///   exposed through [`CreditRequest::is_eligible`] so the host app can
///   disable its submit control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SumCheck {
    /// The minimum sum is a validation error.
    Strict,
    /// The minimum sum only drives the eligibility flag.
    Lenient,
}

impl Default for SumCheck {
    fn default() -> Self {
        SumCheck::Lenient
    }
}

// =============================================================================
// Credit Request
// =============================================================================

/// A credit application form payload in the making.
///
/// Only `shop_id` and a positive sum are mandatory; everything else narrows
/// the application (showcase, promo product, customer contacts, order lines).
///
/// ## Example
/// ```rust
/// use lightweight_core::item::LineItem;
/// use lightweight_core::money::Money;
/// use lightweight_core::request::CreditRequest;
///
/// let mut request = CreditRequest::new("shop1");
/// request.push_item(LineItem::new("Phone", Money::from_rubles(15000.0), 1));
///
/// assert!(request.validate().is_ok());
/// assert!(request.is_eligible());
///
/// let data = request.export_data().unwrap();
/// assert_eq!(data["sum"], "15000.00");
/// assert_eq!(data["itemName_0"], "Phone");
/// ```
#[derive(Debug, Clone)]
pub struct CreditRequest {
    /// Form action URL; the end-user's browser posts the form here.
    pub url: String,

    /// Shop identifier issued by the bank on onboarding.
    pub shop_id: String,

    /// Showcase identifier; distinguishes several sites registered under one
    /// legal entity. Optional when the merchant has a single showcase.
    pub showcase_id: Option<String>,

    /// Credit product variant ("default", "installment_0_0_3", ...).
    pub promo_code: Option<String>,

    /// Order number in the shop's own system; the bank generates one when
    /// absent.
    pub order_number: Option<String>,

    /// Customer identifier in the shop's own system.
    pub customer_number: Option<String>,

    /// Customer mobile phone with any formatting; normalized to bare digits
    /// by `validate()`.
    pub customer_phone: Option<String>,

    /// Customer e-mail address.
    pub customer_email: Option<String>,

    /// Whether the 3000 ₽ minimum is a validation error or only an
    /// eligibility flag.
    pub sum_check: SumCheck,

    /// Order lines, in export order. Private: mutation goes through
    /// [`set_items`](Self::set_items) / [`push_item`](Self::push_item) to
    /// keep the sum override in sync.
    items: Vec<LineItem>,

    /// Explicit sum set by `set_sum`; cleared whenever items change.
    sum_override: Option<Money>,
}

impl CreditRequest {
    /// Creates a request against the production endpoint.
    ///
    /// The promo code starts at `"default"` (the plain credit product), as
    /// most integrations never change it.
    pub fn new(shop_id: impl Into<String>) -> Self {
        CreditRequest {
            url: ACTION_URL.to_string(),
            shop_id: shop_id.into(),
            showcase_id: None,
            promo_code: Some(PROMO_DEFAULT.to_string()),
            order_number: None,
            customer_number: None,
            customer_phone: None,
            customer_email: None,
            sum_check: SumCheck::default(),
            items: Vec::new(),
            sum_override: None,
        }
    }

    /// Creates a request against the bank's sandbox, pre-filled with the
    /// published test credentials.
    pub fn sandbox() -> Self {
        let mut request = CreditRequest::new(SHOP_TEST_ID);
        request.url = ACTION_TEST_URL.to_string();
        request.showcase_id = Some(SHOWCASE_TEST_ID.to_string());
        request.promo_code = Some(PROMO_TEST.to_string());
        request
    }

    // -------------------------------------------------------------------------
    // Items & Sum
    // -------------------------------------------------------------------------

    /// Returns the order lines in export order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Replaces the order lines and clears any explicit sum.
    pub fn set_items(&mut self, items: Vec<LineItem>) {
        self.items = items;
        self.sum_override = None;
    }

    /// Appends an order line and clears any explicit sum.
    pub fn push_item(&mut self, item: LineItem) {
        self.items.push(item);
        self.sum_override = None;
    }

    /// Returns the order sum.
    ///
    /// The explicit override wins when set; otherwise the exact sum of line
    /// totals (zero for an empty item list).
    pub fn sum(&self) -> Money {
        self.sum_override
            .unwrap_or_else(|| self.items.iter().map(LineItem::line_total).sum())
    }

    /// Sets the sum explicitly, for integrations that don't pass order lines.
    ///
    /// ## Errors
    /// Fails hard with [`CoreError::InvalidSum`] on a non-positive amount:
    /// this is a programmer-facing precondition, not end-user input.
    ///
    /// ## Example
    /// ```rust
    /// use lightweight_core::money::Money;
    /// use lightweight_core::request::CreditRequest;
    ///
    /// let mut request = CreditRequest::new("shop1");
    /// assert!(request.set_sum(Money::from_rubles(5000.0)).is_ok());
    /// assert!(request.set_sum(Money::zero()).is_err());
    /// ```
    pub fn set_sum(&mut self, sum: Money) -> CoreResult<()> {
        if !sum.is_positive() {
            return Err(CoreError::InvalidSum {
                kopecks: sum.kopecks(),
            });
        }

        self.sum_override = Some(sum);
        Ok(())
    }

    /// Checks whether the order total meets the bank's minimum for credit
    /// offers (3000 ₽).
    ///
    /// The host app typically disables its submit button when this is false.
    pub fn is_eligible(&self) -> bool {
        self.sum() >= SUM_MIN
    }

    // -------------------------------------------------------------------------
    // Validation
    // -------------------------------------------------------------------------

    /// Validates every field, accumulating all violations.
    ///
    /// No field problem short-circuits another: the returned collection
    /// covers the whole request in one pass. Fields are normalized in place
    /// as they are checked (trimming, phone digit stripping, empty-to-absent
    /// conversion), including on requests that ultimately fail.
    pub fn validate(&mut self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        // shopId: required, bounded
        self.shop_id = self.shop_id.trim().to_string();
        if self.shop_id.is_empty() {
            errors.add(
                "shopId",
                ValidationError::Required {
                    field: "shopId".to_string(),
                },
            );
        } else if self.shop_id.chars().count() > SHOP_ID_MAX {
            errors.add(
                "shopId",
                ValidationError::TooLong {
                    field: "shopId".to_string(),
                    max: SHOP_ID_MAX,
                },
            );
        }

        // optional bounded strings
        match trim_optional_to_len("showcaseId", self.showcase_id.as_deref(), SHOWCASE_ID_MAX) {
            Ok(value) => self.showcase_id = value,
            Err(error) => errors.add("showcaseId", error),
        }
        match trim_optional_to_len("promoCode", self.promo_code.as_deref(), PROMO_CODE_MAX) {
            Ok(value) => self.promo_code = value,
            Err(error) => errors.add("promoCode", error),
        }
        match trim_optional_to_len("orderNumber", self.order_number.as_deref(), ORDER_NUMBER_MAX) {
            Ok(value) => self.order_number = value,
            Err(error) => errors.add("orderNumber", error),
        }
        match trim_optional_to_len(
            "customerNumber",
            self.customer_number.as_deref(),
            CUSTOMER_NUMBER_MAX,
        ) {
            Ok(value) => self.customer_number = value,
            Err(error) => errors.add("customerNumber", error),
        }

        // items, keyed by position
        for (pos, item) in self.items.iter_mut().enumerate() {
            item.collect_errors(&format!("items[{pos}]"), &mut errors);
        }

        // sum: positive always; the 3000 ₽ bound only in strict mode
        let sum = self.sum();
        if !sum.is_positive() {
            errors.add(
                "sum",
                ValidationError::MustBePositive {
                    field: "sum".to_string(),
                },
            );
        } else if self.sum_check == SumCheck::Strict && sum < SUM_MIN {
            errors.add(
                "sum",
                ValidationError::BelowMinimum {
                    field: "sum".to_string(),
                    min: SUM_MIN,
                },
            );
        }

        // customerPhone: strip formatting first, then require 10-11 digits.
        // The stripped value is written back even when the count is off.
        if let Some(phone) = normalize_optional(self.customer_phone.as_deref()) {
            let digits = strip_digits(&phone);
            let digit_count = digits.chars().count();
            self.customer_phone = if digits.is_empty() { None } else { Some(digits) };
            if !(10..=11).contains(&digit_count) {
                errors.add(
                    "customerPhone",
                    ValidationError::InvalidPhone {
                        digits: digit_count,
                    },
                );
            }
        } else {
            self.customer_phone = None;
        }

        // customerEmail: syntax and length checked independently
        if let Some(email) = normalize_optional(self.customer_email.as_deref()) {
            if let Err(error) = validate_email(&email) {
                errors.add("customerEmail", error);
            }
            if email.chars().count() > CUSTOMER_EMAIL_MAX {
                errors.add(
                    "customerEmail",
                    ValidationError::TooLong {
                        field: "customerEmail".to_string(),
                        max: CUSTOMER_EMAIL_MAX,
                    },
                );
            }
            self.customer_email = Some(email);
        } else {
            self.customer_email = None;
        }

        errors.into_result()
    }

    // -------------------------------------------------------------------------
    // Export
    // -------------------------------------------------------------------------

    /// Validates the request and exports the flat form-field map.
    ///
    /// ## Field Order
    /// Insertion order is part of the contract: the map is rendered as hidden
    /// inputs in map order, and item position encodes item identity in the
    /// bank's flat schema (`itemName_0`, `itemPrice_0`, ...).
    ///
    /// ## Errors
    /// [`CoreError::ValidationFailed`] carrying every collected violation
    /// when the request does not validate.
    pub fn export_data(&mut self) -> CoreResult<IndexMap<String, String>> {
        if let Err(errors) = self.validate() {
            debug!(errors = errors.len(), "credit request failed validation");
            return Err(CoreError::ValidationFailed(errors));
        }

        let mut data: IndexMap<String, String> = IndexMap::new();

        data.insert("shopId".to_string(), self.shop_id.clone());
        for (key, value) in [
            ("showcaseId", &self.showcase_id),
            ("promoCode", &self.promo_code),
            ("orderNumber", &self.order_number),
            ("customerNumber", &self.customer_number),
            ("customerPhone", &self.customer_phone),
            ("customerEmail", &self.customer_email),
        ] {
            if let Some(value) = value {
                data.insert(key.to_string(), value.clone());
            }
        }

        data.insert("sum".to_string(), self.sum().to_string());

        for (pos, item) in self.items.iter().enumerate() {
            data.insert(format!("itemName_{pos}"), item.name.clone());
            data.insert(format!("itemPrice_{pos}"), item.price.to_string());
            data.insert(format!("itemQuantity_{pos}"), item.quantity.to_string());

            if let Some(vendor_code) = &item.vendor_code {
                data.insert(format!("itemVendorCode_{pos}"), vendor_code.clone());
            }
            if let Some(category) = &item.category {
                data.insert(format!("itemCategory_{pos}"), category.clone());
            }
        }

        // Final pass: the bank treats absent fields as unset, not as empty
        // strings, so trimmed-empty values must not produce a key at all.
        let data: IndexMap<String, String> = data
            .into_iter()
            .map(|(key, value)| (key, value.trim().to_string()))
            .filter(|(_, value)| !value.is_empty())
            .collect();

        debug!(fields = data.len(), "exported credit form data");
        Ok(data)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
