//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    180 × 0.18 = 32.400000000000006  ❌ WRONG!                           │
//! │    212.4 − 212 = 0.4000000000000057 ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Decimal arithmetic                                       │
//! │    Amounts arrive as f64 rupees, are converted to Decimal once,         │
//! │    every step of the bill is exact, and only the final figures are     │
//! │    converted back to f64 for storage.                                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Overflow
//! `Decimal` tops out near 7.9 × 10²⁸. Every operator here saturates at
//! that bound instead of panicking; request validation keeps real amounts
//! far below it (see `MAX_AMOUNT`).
//!
//! ## Usage
//! ```rust
//! use crown_core::money::Money;
//!
//! let price = Money::from_f64(2499.0);
//! let line = price * 2;
//! assert_eq!(line.to_f64(), 4998.0);
//!
//! let grand_total = Money::from_f64(212.4);
//! assert_eq!(grand_total.round_to_whole().to_f64(), 212.0);
//! ```

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in rupees.
///
/// ## Design Decisions
/// - **Decimal (signed)**: exact base-10 arithmetic; negative values appear
///   for rounding adjustments
/// - **Single field tuple struct**: zero-cost abstraction over `Decimal`
/// - **No serde**: the wire format is plain `f64`; conversion is explicit
///
/// ## Where Money is Used
/// ```text
/// InvoiceItem.originalPrice ──► line gross ──► subTotal
///                                   │
///                                   └──► item discount ──► totalDiscount
///
/// subTotal − totalDiscount ──► taxable ──► tax ──► grandTotal ──► words
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(Decimal);

impl Money {
    /// Creates Money from a rupee amount as it appears on the wire.
    ///
    /// Non-finite input (NaN, ±∞) has no decimal representation and maps to
    /// zero; request validation rejects such values before they get here.
    pub fn from_f64(rupees: f64) -> Self {
        Money(Decimal::from_f64(rupees).unwrap_or(Decimal::ZERO))
    }

    /// Creates Money from an exact decimal.
    #[inline]
    pub const fn from_decimal(value: Decimal) -> Self {
        Money(value)
    }

    /// Creates Money from whole rupees.
    #[inline]
    pub fn from_rupees(rupees: i64) -> Self {
        Money(Decimal::from(rupees))
    }

    /// Returns the value as `f64` for storage and serialization.
    pub fn to_f64(&self) -> f64 {
        self.0.normalize().to_f64().unwrap_or(0.0)
    }

    /// Returns the underlying decimal.
    #[inline]
    pub const fn decimal(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Returns `pct` percent of this amount (`self × pct / 100`).
    ///
    /// ## Example
    /// ```rust
    /// use crown_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let taxable = Money::from_f64(180.0);
    /// let tax = taxable.percent(Decimal::from(18));
    /// assert_eq!(tax.to_f64(), 32.4);
    /// ```
    pub fn percent(&self, pct: Decimal) -> Money {
        match self.0.checked_mul(pct) {
            Some(scaled) => Money(scaled / Decimal::ONE_HUNDRED),
            None => Money((self.0 / Decimal::ONE_HUNDRED).saturating_mul(pct)),
        }
    }

    /// Multiplies money by a quantity.
    #[inline]
    pub fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(Decimal::from(qty)))
    }

    /// Rounds to whole rupees; halves round toward positive infinity.
    ///
    /// ## Example
    /// ```rust
    /// use crown_core::money::Money;
    ///
    /// assert_eq!(Money::from_f64(212.4).round_to_whole().to_f64(), 212.0);
    /// assert_eq!(Money::from_f64(212.5).round_to_whole().to_f64(), 213.0);
    /// assert_eq!(Money::from_f64(-2.5).round_to_whole().to_f64(), -2.0);
    /// ```
    pub fn round_to_whole(&self) -> Money {
        Money(self.0.saturating_add(Decimal::new(5, 1)).floor())
    }

    /// Splits a non-negative amount into whole rupees and paise (0–99).
    ///
    /// Paise are rounded to the nearest whole paisa; a fraction that rounds
    /// up to 100 paise carries into the rupees. Any `Decimal` fits in `u128`.
    pub fn rupees_and_paise(&self) -> (u128, u32) {
        let abs = self.0.abs();
        let whole = abs.trunc();
        let paise = ((abs - whole) * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero);

        let mut rupees = whole.to_u128().unwrap_or(u128::MAX);
        let mut paise = paise.to_u32().unwrap_or(0);
        if paise >= 100 {
            rupees = rupees.saturating_add(1);
            paise -= 100;
        }
        (rupees, paise)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display uses the rupee sign and Indian digit grouping: `₹1,23,456.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let (rupees, paise) = self.rupees_and_paise();
        write!(f, "{}₹{}.{:02}", sign, group_indian(rupees), paise)
    }
}

/// Groups digits as 12,34,56,789 (last three, then pairs).
fn group_indian(n: u128) -> String {
    let digits = n.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

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
    fn test_f64_round_trip_is_exact_for_rupee_amounts() {
        assert_eq!(Money::from_f64(2499.0).to_f64(), 2499.0);
        assert_eq!(Money::from_f64(100.5).to_f64(), 100.5);
        assert_eq!(Money::from_f64(0.1).decimal(), Decimal::new(1, 1));
    }

    #[test]
    fn test_non_finite_maps_to_zero() {
        assert!(Money::from_f64(f64::NAN).is_zero());
        assert!(Money::from_f64(f64::INFINITY).is_zero());
    }

    #[test]
    fn test_percent_is_exact() {
        let tax = Money::from_f64(180.0).percent(Decimal::from(18));
        assert_eq!(tax.decimal(), Decimal::new(324, 1));
    }

    #[test]
    fn test_rounding_difference_is_exact() {
        let grand = Money::from_f64(212.4);
        let rounding = grand.round_to_whole() - grand;
        assert_eq!(rounding.to_f64(), -0.4);
    }

    #[test]
    fn test_rupees_and_paise() {
        assert_eq!(Money::from_f64(100.5).rupees_and_paise(), (100, 50));
        assert_eq!(Money::from_f64(7.0).rupees_and_paise(), (7, 0));
        assert_eq!(Money::from_f64(1.999).rupees_and_paise(), (2, 0));
    }

    #[test]
    fn test_display_uses_indian_grouping() {
        assert_eq!(Money::from_f64(0.0).to_string(), "₹0.00");
        assert_eq!(Money::from_f64(999.0).to_string(), "₹999.00");
        assert_eq!(Money::from_f64(1234.5).to_string(), "₹1,234.50");
        assert_eq!(Money::from_f64(123456.0).to_string(), "₹1,23,456.00");
        assert_eq!(Money::from_f64(12345678.9).to_string(), "₹1,23,45,678.90");
        assert_eq!(Money::from_f64(-5.5).to_string(), "-₹5.50");
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_rupees(1000);
        let b = Money::from_rupees(500);

        assert_eq!((a + b).to_f64(), 1500.0);
        assert_eq!((a - b).to_f64(), 500.0);
        assert_eq!((a * 3).to_f64(), 3000.0);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.to_f64(), 2000.0);
    }

    #[test]
    fn test_arithmetic_saturates_instead_of_panicking() {
        let huge = Money::from_f64(5e27);

        assert_eq!((huge * 999).decimal(), Decimal::MAX);
        assert_eq!(huge.percent(Decimal::from(100)).to_f64(), 5e27);
        assert_eq!((huge * 999 + huge).decimal(), Decimal::MAX);
        assert_eq!((-(huge * 999) - huge).decimal(), Decimal::MIN);
        assert_eq!(Money::from_decimal(Decimal::MAX).round_to_whole().decimal(), Decimal::MAX);

        let total: Money = vec![huge; 20].into_iter().sum();
        assert_eq!(total.decimal(), Decimal::MAX);
    }

    #[test]
    fn test_rupees_and_paise_beyond_u64() {
        let big = Money::from_decimal(Decimal::from_i128_with_scale(10i128.pow(20), 0));
        assert_eq!(big.rupees_and_paise(), (100_000_000_000_000_000_000, 0));

        let max = Money::from_decimal(Decimal::MAX).rupees_and_paise();
        assert_eq!(max, (79_228_162_514_264_337_593_543_950_335, 0));
    }
}
