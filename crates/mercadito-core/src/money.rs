//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! In floating point:  0.1 + 0.2 = 0.30000000000000004
//!
//! Our solution: whole currency units as i64. The database, all
//! calculations and the API carry integers; only display formats them.
//! ```
//!
//! Prices in this domain are whole pesos, so the smallest unit is 1.
//! The one place fractional arithmetic enters is weighable goods: a line
//! subtotal is `quantity × unit price` with a fractional quantity, rounded
//! to the nearest unit in exactly one function ([`Money::line_subtotal`])
//! so sale totals stay exact sums of their line subtotals.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

/// A monetary value in whole currency units.
///
/// i64 is signed on purpose: stock corrections and refund-style edits can
/// produce negative intermediate amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole currency units.
    ///
    /// ```rust
    /// use mercadito_core::Money;
    ///
    /// let price = Money::from_units(1500);
    /// assert_eq!(price.units(), 1500);
    /// ```
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the value in whole currency units.
    #[inline]
    pub const fn units(&self) -> i64 {
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

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Computes a line subtotal: `quantity × unit price`, rounded to the
    /// nearest whole unit (ties round away from zero).
    ///
    /// Quantity is real-valued because weighable goods sell in fractions.
    /// All subtotal computation in the system goes through this function;
    /// a persisted subtotal is never trusted as independently entered data.
    ///
    /// ```rust
    /// use mercadito_core::Money;
    ///
    /// let unit_price = Money::from_units(500);
    /// assert_eq!(unit_price.line_subtotal(3.0).units(), 1500);
    /// assert_eq!(unit_price.line_subtotal(0.25).units(), 125);
    /// // 1.5 kg at $333/kg = 499.5 → 500
    /// assert_eq!(Money::from_units(333).line_subtotal(1.5).units(), 500);
    /// ```
    pub fn line_subtotal(&self, quantity: f64) -> Money {
        Money((self.0 as f64 * quantity).round() as i64)
    }
}

/// Display shows the value with a currency sign and thousands separators,
/// matching how totals are rendered on tickets: `$12,500`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let digits = self.0.abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        write!(f, "{}${}", sign, grouped)
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by an integer quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Sums an iterator of Money values; the natural way to compute a sale
/// total from its line subtotals.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_units_roundtrip() {
        let money = Money::from_units(1500);
        assert_eq!(money.units(), 1500);
        assert!(!money.is_zero());
        assert!(!money.is_negative());
    }

    #[test]
    fn display_groups_thousands() {
        assert_eq!(format!("{}", Money::from_units(0)), "$0");
        assert_eq!(format!("{}", Money::from_units(500)), "$500");
        assert_eq!(format!("{}", Money::from_units(1500)), "$1,500");
        assert_eq!(format!("{}", Money::from_units(1234567)), "$1,234,567");
        assert_eq!(format!("{}", Money::from_units(-2500)), "-$2,500");
    }

    #[test]
    fn arithmetic() {
        let a = Money::from_units(1000);
        let b = Money::from_units(400);

        assert_eq!((a + b).units(), 1400);
        assert_eq!((a - b).units(), 600);
        assert_eq!((a * 3).units(), 3000);

        let mut acc = Money::zero();
        acc += a;
        acc -= b;
        assert_eq!(acc.units(), 600);
    }

    #[test]
    fn sum_of_subtotals() {
        let subtotals = vec![
            Money::from_units(1500),
            Money::from_units(250),
            Money::from_units(90),
        ];
        let total: Money = subtotals.into_iter().sum();
        assert_eq!(total.units(), 1840);
    }

    #[test]
    fn line_subtotal_whole_quantities() {
        assert_eq!(Money::from_units(500).line_subtotal(3.0).units(), 1500);
        assert_eq!(Money::from_units(500).line_subtotal(0.0).units(), 0);
    }

    #[test]
    fn line_subtotal_fractional_quantities_round() {
        // 0.5 kg at $990/kg = 495
        assert_eq!(Money::from_units(990).line_subtotal(0.5).units(), 495);
        // 1.5 kg at $333/kg = 499.5 → 500
        assert_eq!(Money::from_units(333).line_subtotal(1.5).units(), 500);
        // 0.3 kg at $1000/kg = 300, no float residue
        assert_eq!(Money::from_units(1000).line_subtotal(0.3).units(), 300);
    }

    #[test]
    fn negative_values_behave() {
        let refund = Money::from_units(-550);
        assert!(refund.is_negative());
        assert_eq!(refund.abs().units(), 550);
    }
}
