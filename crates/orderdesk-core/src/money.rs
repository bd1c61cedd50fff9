//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Minor Units                                      │
//! │    Every unit price, line total, and order total is an i64.            │
//! │    Only the view layer turns it into a grouped string ("10,000").      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use orderdesk_core::money::Money;
//!
//! let unit_price = Money::from_minor(2000);
//! let line_total = unit_price.multiply_quantity(5);
//! assert_eq!(line_total.minor(), 10_000);
//! assert_eq!(line_total.grouped(), "10,000");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: Leaves room for corrections and negative adjustments
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Transparent serde**: Serializes as a plain JSON number, which is the
///   shape the order API sends and expects for `price` and `total` fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units (the smallest currency unit).
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Zero money value.
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
    /// Saturates at the i64 bounds instead of wrapping. Quantities are
    /// bounded upstream ([`crate::cart::MAX_QUANTITY`]), so saturation is
    /// unreachable through the keypad; it guards direct callers.
    ///
    /// ## User Workflow
    /// ```text
    /// Product: Apple, unit price 2,000
    /// Quantity: 5
    ///      │
    ///      ▼
    /// multiply_quantity(5) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Line Total: 10,000
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Formats the value with locale-style thousands grouping ("10,000").
    ///
    /// ## Note
    /// This is the display shape for unit prices, line totals, and the
    /// order total. No currency symbol is attached here; the surrounding UI
    /// decides whether one is shown.
    pub fn grouped(&self) -> String {
        group_thousands(self.0)
    }
}

/// Groups an integer's digits in threes with commas.
///
/// Shared with the view layer, which also groups plain quantities.
pub fn group_thousands(value: i64) -> String {
    let negative = value < 0;
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - offset) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if negative {
        format!("-{out}")
    } else {
        out
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the grouped form; use [`Money::minor`] for raw values.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.grouped())
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

/// Summing an iterator of Money values (order totals).
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
    fn test_from_minor() {
        let money = Money::from_minor(2000);
        assert_eq!(money.minor(), 2000);
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_minor(1000);
        let b = Money::from_minor(500);

        assert_eq!((a + b).minor(), 1500);
        assert_eq!((a - b).minor(), 500);
        assert_eq!((a * 3).minor(), 3000);
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_minor(2000);
        assert_eq!(unit_price.multiply_quantity(5).minor(), 10_000);
    }

    #[test]
    fn test_multiply_quantity_saturates_instead_of_wrapping() {
        let unit_price = Money::from_minor(2000);
        assert_eq!(unit_price.multiply_quantity(i64::MAX).minor(), i64::MAX);
        assert_eq!(unit_price.multiply_quantity(i64::MIN).minor(), i64::MIN);
    }

    #[test]
    fn test_sum() {
        let total: Money = [10_000, 25_000]
            .iter()
            .map(|&m| Money::from_minor(m))
            .sum();
        assert_eq!(total.minor(), 35_000);
    }

    #[test]
    fn test_grouping() {
        assert_eq!(Money::from_minor(0).grouped(), "0");
        assert_eq!(Money::from_minor(999).grouped(), "999");
        assert_eq!(Money::from_minor(1000).grouped(), "1,000");
        assert_eq!(Money::from_minor(10_000).grouped(), "10,000");
        assert_eq!(Money::from_minor(1_234_567).grouped(), "1,234,567");
        assert_eq!(Money::from_minor(-10_000).grouped(), "-10,000");
    }

    #[test]
    fn test_display_matches_grouped() {
        assert_eq!(format!("{}", Money::from_minor(10_000)), "10,000");
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());

        let positive = Money::from_minor(100);
        assert!(!positive.is_zero());
        assert!(positive.is_positive());
    }

    #[test]
    fn test_serde_transparent() {
        let money = Money::from_minor(2000);
        assert_eq!(serde_json::to_string(&money).unwrap(), "2000");
        let back: Money = serde_json::from_str("2000").unwrap();
        assert_eq!(back, money);
    }
}
