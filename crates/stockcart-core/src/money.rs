//! # Money Module
//!
//! Provides the `Money` type for unit prices and cart totals.
//!
//! ## Why Integer Minor Units?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The catalog API sends prices as JSON numbers: 179.9                    │
//! │  In floating point:  179.9 * 3 = 539.7000000000001  ❌                  │
//! │                                                                         │
//! │  OUR SOLUTION: parse the decimal text straight into cents               │
//! │    "179.9" ──► 17990 cents ──► × 3 = 53970 cents  ✓                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockcart_core::money::Money;
//!
//! let price = Money::parse_decimal("179.9").unwrap();
//! assert_eq!(price.cents(), 17990);
//!
//! let subtotal = price.multiply_quantity(3);
//! assert_eq!(subtotal.to_string(), "539.70");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use ts_rs::TS;

use crate::error::ValidationError;

/// Number of minor units in one major unit.
const MINOR_PER_MAJOR: i64 = 100;

/// Digits after the decimal point that a price may carry.
const MINOR_DIGITS: usize = 2;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► CartItem.price (frozen) ──► CartItem.subtotal()
///                                                     │
///                                                     ▼
///                                              Cart.total()
/// ```
///
/// Serialized as a plain integer number of cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct Money(#[ts(type = "number")] i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Largest representable amount. Saturated arithmetic stops here.
    pub const MAX: Money = Money(i64::MAX);

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a quantity, saturating at the `i64` bounds.
    ///
    /// ## Example
    /// ```rust
    /// use stockcart_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// assert_eq!(unit_price.multiply_quantity(i64::MAX), Money::MAX);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Multiplies a unit price by a quantity. `None` on overflow.
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Parses a decimal amount in major units ("179.9", "25", "-3.50") into
    /// minor units without going through floating point.
    ///
    /// ## Rules
    /// - Optional leading `-`
    /// - Digits, optionally followed by `.` and more digits
    /// - At most two significant fraction digits; extra digits must be zeros
    /// - Exponents (`1e3`) are rejected
    ///
    /// ## Example
    /// ```rust
    /// use stockcart_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("179.9").unwrap().cents(), 17990);
    /// assert_eq!(Money::parse_decimal("10.500").unwrap().cents(), 1050);
    /// assert!(Money::parse_decimal("0.125").is_err());
    /// assert!(Money::parse_decimal("1e3").is_err());
    /// ```
    pub fn parse_decimal(text: &str) -> Result<Money, ValidationError> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: format!("'{}' {}", text, reason),
        };

        let trimmed = text.trim();
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let (whole, fraction) = match unsigned.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (unsigned, ""),
        };

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("is not a decimal number"));
        }
        if !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("is not a decimal number"));
        }

        let (significant, rest) = fraction.split_at(fraction.len().min(MINOR_DIGITS));
        if rest.bytes().any(|b| b != b'0') {
            return Err(invalid("has more precision than the currency's minor unit"));
        }

        let major: i64 = whole
            .parse()
            .map_err(|_| invalid("is too large"))?;
        let mut minor: i64 = 0;
        for (position, digit) in significant.bytes().enumerate() {
            let weight = 10_i64.pow((MINOR_DIGITS - 1 - position) as u32);
            minor += i64::from(digit - b'0') * weight;
        }

        let cents = major
            .checked_mul(MINOR_PER_MAJOR)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(|| invalid("is too large"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal rendering ("179.90"). Currency symbols and locale-specific
/// formatting belong to the presentation layer.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let per = MINOR_PER_MAJOR as u64;
        write!(f, "{}{}.{:02}", sign, abs / per, abs % per)
    }
}

// Saturating: a cart total never wraps around to a negative amount.
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
        *self = *self + other;
    }
}

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
