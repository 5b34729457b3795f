//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    15.55 * 0.19 = 2.9545000000000003  → which cent is it?               │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    1555 cents × 1900 bps = 2_954_500 → (+5000) / 10000 = 295 cents      │
//! │    Every amount is rounded exactly once, with the same rule             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Decimal amounts only appear at the edges (the persisted menu snapshot and
//! command-line arguments) and are converted with [`Money::from_decimal`].
//!
//! ## Usage
//! ```rust
//! use bistro_core::money::Money;
//! use bistro_core::types::Rate;
//!
//! let price = Money::from_cents(1200); // $12.00
//! let main_course = price.apply_rate(Rate::from_bps(9000)); // × 0.90
//! assert_eq!(main_course.cents(), 1080);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use crate::types::Rate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Subtraction of a discount never needs a special type
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support, serialized as a plain cent count
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  MenuItemEntry.price ──► LineItem.unit_price ──► price_for_quantity()   │
/// │                                                        │                │
/// │                                     bundling discount ─┤                │
/// │                                                        ▼                │
/// │  OrderTotals.subtotal ──► discount / tax ──► total ──► Payment.amount   │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use bistro_core::money::Money;
    ///
    /// let price = Money::from_cents(250); // Represents $2.50
    /// assert_eq!(price.cents(), 250);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a decimal amount in major units to Money, rounding to the
    /// nearest cent.
    ///
    /// Returns `None` for NaN, infinities and values outside the `i64` cent
    /// range. Sign is preserved; rejecting negative prices is the caller's
    /// job (see [`crate::validation::validate_price_decimal`]).
    ///
    /// ## Example
    /// ```rust
    /// use bistro_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(2.5).unwrap().cents(), 250);
    /// assert_eq!(Money::from_decimal(12.499).unwrap().cents(), 1250);
    /// assert!(Money::from_decimal(f64::NAN).is_none());
    /// ```
    pub fn from_decimal(amount: f64) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }

        let cents = (amount * 100.0).round();
        if cents < i64::MIN as f64 || cents > i64::MAX as f64 {
            return None;
        }

        Some(Money(cents as i64))
    }

    /// Returns the value as a decimal amount in major units.
    ///
    /// Only used when writing the menu snapshot; never compute with it.
    #[inline]
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
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

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies the amount by a rate and rounds to the cent.
    ///
    /// This is the ONE rounding rule of the crate. Line adjustments
    /// (× 0.95, × 0.90), the bundling discount, the volume discount
    /// (× 0.10) and tax (× 0.19) all go through here.
    ///
    /// ## Rounding
    /// Half away from zero at the cent: `(|amount| * bps + 5000) / 10000`,
    /// with the sign restored afterwards.
    ///
    /// ## Example
    /// ```rust
    /// use bistro_core::money::Money;
    /// use bistro_core::types::Rate;
    ///
    /// let subtotal = Money::from_cents(1555); // $15.55
    /// let tax = subtotal.apply_rate(Rate::from_bps(1900)); // 19%
    /// // $15.55 × 19% = $2.9545 → $2.95
    /// assert_eq!(tax.cents(), 295);
    /// ```
    pub fn apply_rate(&self, rate: Rate) -> Money {
        // Use i128 to prevent overflow on large amounts
        let magnitude = (self.0.unsigned_abs() as i128 * rate.bps() as i128 + 5000) / 10000;
        let cents = if self.0 < 0 { -magnitude } else { magnitude };
        Money::from_cents(cents as i64)
    }

    /// Multiplies money by a quantity, `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use bistro_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(250); // $2.50
    /// assert_eq!(unit_price.checked_multiply_quantity(2).unwrap().cents(), 500);
    /// assert!(unit_price.checked_multiply_quantity(i64::MAX).is_none());
    /// ```
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Adds two amounts, `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Subtracts two amounts, `None` on overflow.
    #[inline]
    pub const fn checked_sub(&self, other: Money) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// [`apply_rate`](Self::apply_rate) for rates that may exceed 100%,
    /// `None` when the result leaves the `i64` range.
    pub fn checked_apply_rate(&self, rate: Rate) -> Option<Money> {
        let magnitude = (self.0.unsigned_abs() as i128 * rate.bps() as i128 + 5000) / 10000;
        let cents = if self.0 < 0 { -magnitude } else { magnitude };
        i64::try_from(cents).ok().map(Money)
    }

    /// Formats the amount with a custom currency symbol.
    ///
    /// ## Example
    /// ```rust
    /// use bistro_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1850).format_with("€"), "€18.50");
    /// ```
    pub fn format_with(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money as `$12.34`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with("$"))
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

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
