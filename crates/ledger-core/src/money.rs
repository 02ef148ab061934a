//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Minor Units?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing prices as floats drifts:                                       │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Every line is rounded ONCE into cents, sums are exact integers,     │
//! │    and the total goes back to major units exactly once, at the end.    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Overflow
//! Amounts never wrap. `checked_*` methods report overflow as `None`, the
//! operators saturate at the `i64` bounds, and catalog input is capped at
//! [`MAX_AMOUNT_CENTS`](crate::MAX_AMOUNT_CENTS) by validation.
//!
//! ## Usage
//! ```rust
//! use ledger_core::money::Money;
//! use ledger_core::types::Multiplier;
//!
//! let price = Money::from_major(30.0);
//! assert_eq!(price.cents(), 3000);
//!
//! // 30.00 × 0.95 = 28.50
//! let line = price.scale(Multiplier::from_bps(9500));
//! assert_eq!(line.cents(), 2850);
//! assert_eq!(line.to_major(), 28.5);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use crate::types::Multiplier;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in minor units (cents).
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► Pricing line (scaled, rounded) ──► Quote.total
///                                                          │
/// Account.balance ◄──────── debit on placement ◄───────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a major-unit amount into minor units.
    ///
    /// Rounds half-up by adding 0.5 cents before truncating, so
    /// `0.125` becomes 13 and `10.994` becomes 1099.
    ///
    /// ## Example
    /// ```rust
    /// use ledger_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(60.5).cents(), 6050);
    /// assert_eq!(Money::from_major(0.125).cents(), 13);
    /// ```
    ///
    /// Non-finite input becomes zero and out-of-range input saturates;
    /// use [`Money::try_from_major`] where that must be detected.
    #[inline]
    pub fn from_major(amount: f64) -> Self {
        Money((amount * 100.0 + 0.5) as i64)
    }

    /// Like [`Money::from_major`], but `None` for NaN, infinities, and
    /// amounts outside the `i64` cent range.
    ///
    /// ## Example
    /// ```rust
    /// use ledger_core::money::Money;
    ///
    /// assert_eq!(Money::try_from_major(60.5), Some(Money::from_cents(6050)));
    /// assert_eq!(Money::try_from_major(f64::NAN), None);
    /// assert_eq!(Money::try_from_major(1e17), None);
    /// ```
    pub fn try_from_major(amount: f64) -> Option<Self> {
        let cents = (amount * 100.0 + 0.5).trunc();
        // i64::MAX as f64 rounds up to 2^63, which is itself out of range.
        if !cents.is_finite() || cents < i64::MIN as f64 || cents >= i64::MAX as f64 {
            return None;
        }
        Some(Money(cents as i64))
    }

    /// Converts back to major units. Only used for presentation and at
    /// the API boundary; arithmetic stays in cents.
    #[inline]
    pub fn to_major(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Applies a basis-point multiplier, rounding half-up to the cent.
    ///
    /// ## Implementation
    /// Integer math: `(cents * bps + 5000) / 10000`. The +5000 is the half
    /// cent, i128 keeps large balances from overflowing.
    ///
    /// ## Example
    /// ```rust
    /// use ledger_core::money::Money;
    /// use ledger_core::types::Multiplier;
    ///
    /// let price = Money::from_cents(4000);
    /// assert_eq!(price.scale(Multiplier::from_bps(8000)).cents(), 3200);
    /// assert_eq!(price.scale(Multiplier::from_bps(15000)).cents(), 6000);
    /// ```
    ///
    /// Saturates at the `i64` bounds; see [`Money::checked_scale`].
    pub fn scale(&self, multiplier: Multiplier) -> Money {
        let scaled = Self::scaled_cents(self.0, multiplier);
        Money(i64::try_from(scaled).unwrap_or(if scaled < 0 { i64::MIN } else { i64::MAX }))
    }

    /// Applies a basis-point multiplier, `None` if the result leaves the
    /// `i64` cent range.
    pub fn checked_scale(&self, multiplier: Multiplier) -> Option<Money> {
        i64::try_from(Self::scaled_cents(self.0, multiplier))
            .ok()
            .map(Money)
    }

    #[inline]
    fn scaled_cents(cents: i64, multiplier: Multiplier) -> i128 {
        (cents as i128 * multiplier.bps() as i128 + 5000).div_euclid(10000)
    }

    #[inline]
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    #[inline]
    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain two-decimal rendering; the ledger is currency-agnostic.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
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
    fn test_from_major_rounds_half_up() {
        assert_eq!(Money::from_major(40.0).cents(), 4000);
        assert_eq!(Money::from_major(28.5).cents(), 2850);
        assert_eq!(Money::from_major(10.994).cents(), 1099);
        assert_eq!(Money::from_major(0.125).cents(), 13);
        assert_eq!(Money::from_major(0.0).cents(), 0);
    }

    #[test]
    fn test_to_major() {
        assert_eq!(Money::from_cents(6050).to_major(), 60.5);
        assert_eq!(Money::from_cents(1).to_major(), 0.01);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(6050)), "60.50");
        assert_eq!(format!("{}", Money::from_cents(5)), "0.05");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-5.50");
    }

    #[test]
    fn test_scale_rounds_half_up() {
        // 30.00 × 0.95 = 28.50
        assert_eq!(Money::from_cents(3000).scale(Multiplier::from_bps(9500)).cents(), 2850);
        // 0.15 × 0.50 = 0.075 → 0.08
        assert_eq!(Money::from_cents(15).scale(Multiplier::from_bps(5000)).cents(), 8);
        // 0.13 × 0.50 = 0.065 → 0.07
        assert_eq!(Money::from_cents(13).scale(Multiplier::from_bps(5000)).cents(), 7);
        assert_eq!(Money::from_cents(999).scale(Multiplier::ONE).cents(), 999);
    }

    /// Summing many rounded lines stays exact; the float equivalent drifts.
    #[test]
    fn test_sum_has_no_drift() {
        let lines = vec![Money::from_major(0.1); 10];
        let total: Money = lines.into_iter().sum();
        assert_eq!(total.cents(), 100);
        assert_eq!(total.to_major(), 1.0);
    }

    #[test]
    fn test_arithmetic_and_checks() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);
        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert!((b - a).is_negative());
        assert!(Money::zero().is_zero());
        assert!(a.is_positive());
    }

    #[test]
    fn test_try_from_major_rejects_extremes() {
        assert_eq!(Money::try_from_major(28.5), Some(Money::from_cents(2850)));
        assert_eq!(Money::try_from_major(f64::NAN), None);
        assert_eq!(Money::try_from_major(f64::INFINITY), None);
        assert_eq!(Money::try_from_major(f64::NEG_INFINITY), None);
        assert_eq!(Money::try_from_major(1e17), None);
        assert_eq!(Money::try_from_major(-1e17), None);
    }

    #[test]
    fn test_scale_never_wraps() {
        let huge = Money::from_cents(i64::MAX);
        let premium = Multiplier::from_bps(15_000);

        assert_eq!(huge.checked_scale(premium), None);
        assert_eq!(huge.scale(premium), Money::from_cents(i64::MAX));
        assert!(!huge.scale(premium).is_negative());
        assert_eq!(Money::from_cents(i64::MIN).scale(premium), Money::from_cents(i64::MIN));

        assert_eq!(
            Money::from_cents(3000).checked_scale(Multiplier::from_bps(9500)),
            Some(Money::from_cents(2850))
        );
    }

    #[test]
    fn test_overflowing_arithmetic_saturates() {
        let max = Money::from_cents(i64::MAX);
        let one = Money::from_cents(1);

        assert_eq!(max.checked_add(one), None);
        assert_eq!(Money::from_cents(i64::MIN).checked_sub(one), None);
        assert_eq!(max + one, max);
        assert_eq!(Money::from_cents(i64::MIN) - one, Money::from_cents(i64::MIN));

        let mut balance = max;
        balance += one;
        assert_eq!(balance, max);

        let total: Money = vec![max, max, one].into_iter().sum();
        assert_eq!(total, max);
    }
}
