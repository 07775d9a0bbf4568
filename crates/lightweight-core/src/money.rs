//! # Money Module
//!
//! Provides the `Money` type for handling ruble amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  The bank endpoint expects exact amounts with two decimal digits:      │
//! │    sum=15000.00, itemPrice_0=15000.00                                  │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Kopecks                                          │
//! │    15000.00 ₽ = 1_500_000 kopecks (i64)                                │
//! │    Order totals are exact sums, formatting is exact division           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use lightweight_core::money::Money;
//!
//! // Create from kopecks (preferred)
//! let price = Money::from_kopecks(1_500_000); // 15000.00 ₽
//!
//! // Or from a ruble amount coming off an order record
//! let same = Money::from_rubles(15000.0);
//! assert_eq!(price, same);
//!
//! // Display renders the bank wire format
//! assert_eq!(price.to_string(), "15000.00");
//! ```

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use serde::{Deserialize, Serialize};

// =============================================================================
// Money Type
// =============================================================================

/// A ruble amount in kopecks (the smallest currency unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: Intermediate arithmetic may go negative; validation
///   rejects non-positive amounts where the bank requires them
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serde as plain number**: Serializes as the kopeck count
///
/// ## Where Money Flows
/// ```text
/// LineItem.price ──► LineItem.line_total() ──► CreditRequest.sum()
///                                                    │
///                       exported as "15000.00" ◄────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from kopecks.
    ///
    /// ## Example
    /// ```rust
    /// use lightweight_core::money::Money;
    ///
    /// let price = Money::from_kopecks(1099); // 10.99 ₽
    /// assert_eq!(price.kopecks(), 1099);
    /// ```
    #[inline]
    pub const fn from_kopecks(kopecks: i64) -> Self {
        Money(kopecks)
    }

    /// Creates a Money value from a ruble amount, rounding to the nearest
    /// kopeck.
    ///
    /// Order records in host shops commonly carry ruble floats; this is the
    /// single conversion point into exact arithmetic.
    ///
    /// ## Example
    /// ```rust
    /// use lightweight_core::money::Money;
    ///
    /// assert_eq!(Money::from_rubles(10.99).kopecks(), 1099);
    /// assert_eq!(Money::from_rubles(15000.0).kopecks(), 1_500_000);
    /// ```
    #[inline]
    pub fn from_rubles(rubles: f64) -> Self {
        Money((rubles * 100.0).round() as i64)
    }

    /// Returns the value in kopecks.
    #[inline]
    pub const fn kopecks(&self) -> i64 {
        self.0
    }

    /// Returns the whole-ruble portion.
    ///
    /// ## Example
    /// ```rust
    /// use lightweight_core::money::Money;
    ///
    /// assert_eq!(Money::from_kopecks(1099).rubles(), 10);
    /// ```
    #[inline]
    pub const fn rubles(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the kopeck portion (always 0-99).
    #[inline]
    pub const fn kopecks_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Multiplies money by a quantity.
    ///
    /// Saturates instead of overflowing: quantities past the line-item bound
    /// never validate, so saturation can only show up on amounts that are
    /// already being rejected.
    ///
    /// ## Example
    /// ```rust
    /// use lightweight_core::money::Money;
    ///
    /// let unit_price = Money::from_kopecks(299); // 2.99 ₽
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total.kopecks(), 897); // 8.97 ₽
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display renders the bank wire format: two decimal digits, dot separator,
/// no currency symbol. `export_data` relies on this exact shape.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.rubles().abs(), self.kopecks_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summation of line totals into an order total.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_kopecks() {
        let money = Money::from_kopecks(1099);
        assert_eq!(money.kopecks(), 1099);
        assert_eq!(money.rubles(), 10);
        assert_eq!(money.kopecks_part(), 99);
    }

    #[test]
    fn test_from_rubles_rounds_to_kopeck() {
        assert_eq!(Money::from_rubles(10.99).kopecks(), 1099);
        assert_eq!(Money::from_rubles(0.1).kopecks(), 10);
        // 0.1 + 0.2 style inputs still land on an exact kopeck
        assert_eq!(Money::from_rubles(0.1 + 0.2).kopecks(), 30);
    }

    #[test]
    fn test_display_is_wire_format() {
        assert_eq!(Money::from_kopecks(1_500_000).to_string(), "15000.00");
        assert_eq!(Money::from_kopecks(1099).to_string(), "10.99");
        assert_eq!(Money::from_kopecks(500).to_string(), "5.00");
        assert_eq!(Money::from_kopecks(7).to_string(), "0.07");
        assert_eq!(Money::from_kopecks(0).to_string(), "0.00");
        assert_eq!(Money::from_kopecks(-550).to_string(), "-5.50");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_kopecks(1000);
        let b = Money::from_kopecks(500);

        assert_eq!((a + b).kopecks(), 1500);
        assert_eq!((a - b).kopecks(), 500);
        assert_eq!((a * 3).kopecks(), 3000);
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_kopecks(299);
        assert_eq!(unit_price.multiply_quantity(3).kopecks(), 897);
    }

    #[test]
    fn test_multiply_quantity_saturates_instead_of_overflowing() {
        let total = Money::from_kopecks(2).multiply_quantity(i64::MAX);
        assert_eq!(total.kopecks(), i64::MAX);
    }

    #[test]
    fn test_sum_of_line_totals() {
        let totals = [
            Money::from_kopecks(1000),
            Money::from_kopecks(250),
            Money::from_kopecks(99),
        ];
        let sum: Money = totals.into_iter().sum();
        assert_eq!(sum.kopecks(), 1349);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());

        let positive = Money::from_kopecks(100);
        assert!(!positive.is_zero());
        assert!(positive.is_positive());
    }
}
