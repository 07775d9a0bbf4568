//! # lightweight-core: Tinkoff "Lightweight" Credit Form Payload
//!
//! This crate builds and validates the data payload for the Tinkoff bank
//! point-of-sale credit/installment application form. Its job ends at a
//! validated, insertion-ordered map of form fields; the host app renders the
//! map as hidden `<input>` fields and the end-user's browser submits the form
//! straight to the bank.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Integration Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Host Shop (any web framework)                  │   │
//! │  │     order data ──► credit form page ──► hidden-input form       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ lightweight-core (THIS CRATE) ★                  │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │   item    │  │  request  │  │ validation│  │   │
//! │  │   │   Money   │  │ LineItem  │  │  Credit   │  │   rules   │  │   │
//! │  │   │  kopecks  │  │  rules    │  │  Request  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO HTTP • NO RENDERING • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ flat field map                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                end-user's browser ──► bank endpoint             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer kopeck arithmetic (no floating point!)
//! - [`item`] - Order line items with accumulating field validation
//! - [`request`] - The credit request aggregate: sum, eligibility, export
//! - [`service`] - Request factory with application-wide defaults
//! - [`validation`] - Stateless field validation primitives
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: construct → validate → export, no side channels
//! 2. **No I/O**: the bank is contacted by the browser, never by this crate
//! 3. **Integer Money**: all amounts are kopecks (i64) to keep wire values exact
//! 4. **Collected Errors**: validation reports every field problem at once
//!
//! ## Example Usage
//!
//! ```rust
//! use lightweight_core::{CreditRequest, LineItem, Money};
//!
//! let mut request = CreditRequest::new("shop1");
//! request.push_item(LineItem::new("Phone", Money::from_rubles(15000.0), 1));
//!
//! assert!(request.is_eligible());
//!
//! let data = request.export_data().unwrap();
//! assert_eq!(data["shopId"], "shop1");
//! assert_eq!(data["sum"], "15000.00");
//! assert_eq!(data["itemPrice_0"], "15000.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod item;
pub mod money;
pub mod request;
pub mod service;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use lightweight_core::CreditRequest` instead of
// `use lightweight_core::request::CreditRequest`

pub use error::{CoreError, CoreResult, ValidationError, ValidationErrors};
pub use item::LineItem;
pub use money::Money;
pub use request::{CreditRequest, SumCheck};
pub use service::{CreditRequestConfig, CreditService};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Production form action URL; the hidden-input form posts here.
pub const ACTION_URL: &str = "https://loans.tinkoff.ru/api/partners/v1/lightweight/create";

/// Sandbox form action URL for integration testing.
pub const ACTION_TEST_URL: &str = "https://loans-qa.tcsbank.ru/api/partners/v1/lightweight/create";

/// Shop identifier accepted by the sandbox.
pub const SHOP_TEST_ID: &str = "test_online";

/// Showcase identifier accepted by the sandbox.
pub const SHOWCASE_TEST_ID: &str = SHOP_TEST_ID;

/// Promo code of the plain "buy on credit" product.
pub const PROMO_DEFAULT: &str = "default";

/// Promo code of the 0-0-3 installment product.
pub const PROMO_INSTALLMENT: &str = "installment_0_0_3";

/// Promo code accepted by the sandbox.
pub const PROMO_TEST: &str = PROMO_DEFAULT;

/// Minimum order total the bank offers credit for: 3000.00 ₽.
///
/// Whether falling short of it fails validation or only clears the
/// eligibility flag is chosen per request via [`SumCheck`].
pub const SUM_MIN: Money = Money::from_kopecks(300_000);
