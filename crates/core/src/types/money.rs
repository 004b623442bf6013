//! Monetary amounts in minor currency units.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors from monetary arithmetic.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    /// An addition or multiplication overflowed.
    #[error("monetary amount overflowed")]
    Overflow,
}

/// A monetary amount in minor currency units (centavos).
///
/// All amounts cross the wire as non-negative integers in minor units;
/// no floating point money exists anywhere in the pipeline. Conversion
/// to a two-decimal major-unit value is only done for display, via
/// [`Money::as_decimal`].
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// A zero amount.
    pub const ZERO: Self = Self(0);

    /// Create an amount from minor units (centavos).
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// The amount in minor units.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// True if the amount is strictly positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Overflow`] if the sum overflows.
    pub fn checked_add(self, other: Self) -> Result<Self, MoneyError> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or(MoneyError::Overflow)
    }

    /// Checked multiplication by a quantity.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Overflow`] if the product overflows.
    pub fn checked_mul(self, quantity: u32) -> Result<Self, MoneyError> {
        self.0
            .checked_mul(i64::from(quantity))
            .map(Self)
            .ok_or(MoneyError::Overflow)
    }

    /// The amount as a two-decimal major-unit value, for display.
    #[must_use]
    pub fn as_decimal(self) -> Decimal {
        Decimal::new(self.0, 2)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.as_decimal())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents_roundtrip() {
        let m = Money::from_cents(250);
        assert_eq!(m.cents(), 250);
    }

    #[test]
    fn test_as_decimal() {
        assert_eq!(Money::from_cents(250).as_decimal().to_string(), "2.50");
        assert_eq!(Money::from_cents(100).as_decimal().to_string(), "1.00");
        assert_eq!(Money::from_cents(5).as_decimal().to_string(), "0.05");
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1999).to_string(), "19.99");
        assert_eq!(Money::ZERO.to_string(), "0.00");
    }

    #[test]
    fn test_checked_arithmetic() {
        let a = Money::from_cents(100);
        let b = Money::from_cents(50);
        assert_eq!(a.checked_add(b).unwrap(), Money::from_cents(150));
        assert_eq!(a.checked_mul(3).unwrap(), Money::from_cents(300));
    }

    #[test]
    fn test_overflow() {
        let max = Money::from_cents(i64::MAX);
        assert_eq!(
            max.checked_add(Money::from_cents(1)).unwrap_err(),
            MoneyError::Overflow
        );
        assert_eq!(max.checked_mul(2).unwrap_err(), MoneyError::Overflow);
    }

    #[test]
    fn test_serde_as_integer() {
        let m = Money::from_cents(250);
        assert_eq!(serde_json::to_string(&m).unwrap(), "250");
        let parsed: Money = serde_json::from_str("250").unwrap();
        assert_eq!(parsed, m);
    }
}
