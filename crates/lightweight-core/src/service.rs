//! # Credit Service
//!
//! Factory for credit requests with application-wide defaults.
//!
//! A host shop usually configures its shop/showcase identifiers once and
//! builds many requests from them, overriding only the per-order fields.
//!
//! ## Configuration Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Configuration Merge                                │
//! │                                                                         │
//! │  App config (once)            Per-order overrides                       │
//! │  ──────────────────           ───────────────────                       │
//! │  shopId, showcaseId,    +     orderNumber, items,                       │
//! │  promoCode, sandbox           customer contacts, sum                    │
//! │            │                           │                                │
//! │            └────────── merge ──────────┘                                │
//! │                          │                                              │
//! │                          ▼                                              │
//! │                    CreditRequest                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Deserialize;

use crate::error::CoreResult;
use crate::item::LineItem;
use crate::money::Money;
use crate::request::{CreditRequest, SumCheck};

// =============================================================================
// Request Configuration
// =============================================================================

/// Declarative request configuration, deserializable from host-app settings.
///
/// Field names follow the bank's camelCase schema; every field is optional so
/// a config can describe just the defaults (or just the overrides) it cares
/// about.
///
/// ## Example
/// ```rust
/// use lightweight_core::service::CreditRequestConfig;
///
/// let config: CreditRequestConfig = serde_json::from_str(
///     r#"{"shopId": "shop1", "items": [{"name": "Phone", "price": 1500000, "quantity": 1}]}"#,
/// ).unwrap();
///
/// let mut request = config.into_request().unwrap();
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditRequestConfig {
    /// Override for the form action URL.
    pub url: Option<String>,

    /// Shop identifier issued by the bank.
    pub shop_id: Option<String>,

    /// Showcase identifier.
    pub showcase_id: Option<String>,

    /// Credit product variant.
    pub promo_code: Option<String>,

    /// Order number in the shop's system.
    pub order_number: Option<String>,

    /// Order lines.
    #[serde(default)]
    pub items: Vec<LineItem>,

    /// Customer identifier in the shop's system.
    pub customer_number: Option<String>,

    /// Customer phone.
    pub customer_phone: Option<String>,

    /// Customer e-mail.
    pub customer_email: Option<String>,

    /// Explicit order sum in kopecks; wins over the item total.
    pub sum: Option<Money>,

    /// Target the bank's sandbox with its published test credentials.
    #[serde(default)]
    pub sandbox: bool,

    /// Minimum-sum handling mode.
    pub sum_check: Option<SumCheck>,
}

impl CreditRequestConfig {
    /// Merges per-call overrides over these defaults.
    ///
    /// Every `Some` in `overrides` wins; `sandbox` is sticky (either side can
    /// turn it on); override items replace default items wholesale when
    /// non-empty.
    pub fn merge(self, overrides: CreditRequestConfig) -> CreditRequestConfig {
        CreditRequestConfig {
            url: overrides.url.or(self.url),
            shop_id: overrides.shop_id.or(self.shop_id),
            showcase_id: overrides.showcase_id.or(self.showcase_id),
            promo_code: overrides.promo_code.or(self.promo_code),
            order_number: overrides.order_number.or(self.order_number),
            items: if overrides.items.is_empty() {
                self.items
            } else {
                overrides.items
            },
            customer_number: overrides.customer_number.or(self.customer_number),
            customer_phone: overrides.customer_phone.or(self.customer_phone),
            customer_email: overrides.customer_email.or(self.customer_email),
            sum: overrides.sum.or(self.sum),
            sandbox: overrides.sandbox || self.sandbox,
            sum_check: overrides.sum_check.or(self.sum_check),
        }
    }

    /// Builds a request from this configuration.
    ///
    /// Sandbox mode seeds the test credentials first, so explicit fields in
    /// the config still win over them. The explicit `sum` is applied after
    /// items and therefore overrides their total.
    ///
    /// ## Errors
    /// [`crate::error::CoreError::InvalidSum`] when `sum` is present but not
    /// positive.
    pub fn into_request(self) -> CoreResult<CreditRequest> {
        let mut request = if self.sandbox {
            CreditRequest::sandbox()
        } else {
            CreditRequest::new(String::new())
        };

        if let Some(url) = self.url {
            request.url = url;
        }
        if let Some(shop_id) = self.shop_id {
            request.shop_id = shop_id;
        }
        if let Some(showcase_id) = self.showcase_id {
            request.showcase_id = Some(showcase_id);
        }
        if let Some(promo_code) = self.promo_code {
            request.promo_code = Some(promo_code);
        }
        if let Some(order_number) = self.order_number {
            request.order_number = Some(order_number);
        }
        if let Some(customer_number) = self.customer_number {
            request.customer_number = Some(customer_number);
        }
        if let Some(customer_phone) = self.customer_phone {
            request.customer_phone = Some(customer_phone);
        }
        if let Some(customer_email) = self.customer_email {
            request.customer_email = Some(customer_email);
        }
        if let Some(sum_check) = self.sum_check {
            request.sum_check = sum_check;
        }

        if !self.items.is_empty() {
            request.set_items(self.items);
        }
        if let Some(sum) = self.sum {
            request.set_sum(sum)?;
        }

        Ok(request)
    }
}

// =============================================================================
// Credit Service
// =============================================================================

/// Request factory holding the application-wide default configuration.
///
/// ## Example
/// ```rust
/// use lightweight_core::money::Money;
/// use lightweight_core::service::{CreditRequestConfig, CreditService};
///
/// let service = CreditService::new(CreditRequestConfig {
///     shop_id: Some("shop1".to_string()),
///     ..Default::default()
/// });
///
/// let mut request = service
///     .request(CreditRequestConfig {
///         sum: Some(Money::from_rubles(12345.0)),
///         ..Default::default()
///     })
///     .unwrap();
///
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CreditService {
    defaults: CreditRequestConfig,
}

impl CreditService {
    /// Creates a service with the given default configuration.
    pub fn new(defaults: CreditRequestConfig) -> Self {
        CreditService { defaults }
    }

    /// Builds a request: per-call overrides merged over the service defaults.
    pub fn request(&self, overrides: CreditRequestConfig) -> CoreResult<CreditRequest> {
        self.defaults.clone().merge(overrides).into_request()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_plus_sum_override() {
        let service = CreditService::new(CreditRequestConfig {
            shop_id: Some("test_online".to_string()),
            ..Default::default()
        });

        let mut request = service
            .request(CreditRequestConfig {
                sum: Some(Money::from_rubles(12345.0)),
                ..Default::default()
            })
            .unwrap();

        assert!(request.validate().is_ok());

        let data = request.export_data().unwrap();
        assert_eq!(data["shopId"], "test_online");
        assert_eq!(data["sum"], "12345.00");
    }

    #[test]
    fn test_overrides_win_over_defaults() {
        let defaults = CreditRequestConfig {
            shop_id: Some("shop1".to_string()),
            promo_code: Some("default".to_string()),
            ..Default::default()
        };
        let overrides = CreditRequestConfig {
            promo_code: Some(crate::PROMO_INSTALLMENT.to_string()),
            ..Default::default()
        };

        let merged = defaults.merge(overrides);
        assert_eq!(merged.shop_id.as_deref(), Some("shop1"));
        assert_eq!(merged.promo_code.as_deref(), Some("installment_0_0_3"));
    }

    #[test]
    fn test_sandbox_config_seeds_test_credentials() {
        let request = CreditRequestConfig {
            sandbox: true,
            ..Default::default()
        }
        .into_request()
        .unwrap();

        assert_eq!(request.shop_id, crate::SHOP_TEST_ID);
        assert_eq!(request.url, crate::ACTION_TEST_URL);
    }

    #[test]
    fn test_config_shop_id_wins_over_sandbox_seed() {
        let request = CreditRequestConfig {
            sandbox: true,
            shop_id: Some("my-shop".to_string()),
            ..Default::default()
        }
        .into_request()
        .unwrap();

        assert_eq!(request.shop_id, "my-shop");
        assert_eq!(request.url, crate::ACTION_TEST_URL);
    }

    #[test]
    fn test_invalid_config_sum_fails_hard() {
        let result = CreditRequestConfig {
            shop_id: Some("shop1".to_string()),
            sum: Some(Money::zero()),
            ..Default::default()
        }
        .into_request();

        assert!(result.is_err());
    }

    #[test]
    fn test_config_from_json() {
        let config: CreditRequestConfig = serde_json::from_str(
            r#"{
                "shopId": "shop1",
                "orderNumber": "A-17",
                "items": [
                    {"name": "Phone", "price": 1500000, "quantity": 1, "vendorCode": "SKU-1"}
                ],
                "sumCheck": "strict"
            }"#,
        )
        .unwrap();

        let mut request = config.into_request().unwrap();
        assert_eq!(request.sum_check, SumCheck::Strict);
        assert!(request.validate().is_ok());

        let data = request.export_data().unwrap();
        assert_eq!(data["orderNumber"], "A-17");
        assert_eq!(data["itemVendorCode_0"], "SKU-1");
    }

    #[test]
    fn test_override_items_replace_default_items() {
        let defaults = CreditRequestConfig {
            items: vec![LineItem::new("Old", Money::from_kopecks(100), 1)],
            ..Default::default()
        };
        let overrides = CreditRequestConfig {
            items: vec![LineItem::new("New", Money::from_kopecks(200), 1)],
            ..Default::default()
        };

        let merged = defaults.merge(overrides);
        assert_eq!(merged.items.len(), 1);
        assert_eq!(merged.items[0].name, "New");
    }
}
