//! Money: an exact decimal amount that maps onto minor units (cents).
//!
//! Balances never go through floating point, so a transfer always conserves
//! the sum of the two balances involved.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

const FRACTION_DIGITS: u32 = 2;

/// Largest magnitude whose minor units still fit in an `i64`.
const LIMIT: Decimal = Decimal::from_parts(0xFFFF_FFFF, 0x7FFF_FFFF, 0, false, FRACTION_DIGITS);

/// A signed amount of money with at most two fractional digits.
///
/// The value never carries more than two fractional digits and stays within
/// [`LIMIT`], so it maps onto an `i64` count of minor units without loss.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Build an amount from minor units (`1050` is `10.50`).
    #[must_use]
    pub fn from_minor(minor: i64) -> Self {
        Self(Decimal::new(minor, FRACTION_DIGITS))
    }

    /// Amount in minor units.
    #[must_use]
    pub fn minor(self) -> i64 {
        let mut value = self.0;
        value.rescale(FRACTION_DIGITS);
        // bounded by LIMIT on construction
        i64::try_from(value.mantissa()).unwrap_or(if value.is_sign_negative() {
            i64::MIN
        } else {
            i64::MAX
        })
    }

    #[must_use]
    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }

    #[must_use]
    pub fn is_negative(self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Return `self` when strictly positive.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NonPositiveAmount`] for zero or negative amounts.
    pub fn ensure_positive(self) -> Result<Self, ValidationError> {
        if self.is_positive() {
            Ok(self)
        } else {
            Err(ValidationError::NonPositiveAmount)
        }
    }

    /// Add two amounts, returning `None` on overflow.
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0
            .checked_add(other.0)
            .and_then(|sum| Self::try_from(sum).ok())
    }

    /// Subtract two amounts, returning `None` on overflow.
    #[must_use]
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0
            .checked_sub(other.0)
            .and_then(|diff| Self::try_from(diff).ok())
    }
}

impl TryFrom<Decimal> for Money {
    type Error = ValidationError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        let mut value = value.normalize();
        if value.scale() > FRACTION_DIGITS {
            return Err(ValidationError::InvalidAmount(value.to_string()));
        }
        if value.abs() > LIMIT {
            return Err(ValidationError::AmountOverflow);
        }
        value.rescale(FRACTION_DIGITS);
        Ok(Self(value))
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0.round_dp(FRACTION_DIGITS))
    }
}

impl FromStr for Money {
    type Err = ValidationError;

    /// Parse decimal text such as `100`, `100.5`, `-3.25`.
    ///
    /// At most two fractional digits are accepted; anything finer would
    /// silently lose precision.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidAmount(s.to_string());
        let value = Decimal::from_str_exact(s.trim()).map_err(|err| match err {
            rust_decimal::Error::ExceedsMaximumPossibleValue
            | rust_decimal::Error::LessThanMinimumPossibleValue => ValidationError::AmountOverflow,
            _ => invalid(),
        })?;
        Self::try_from(value).map_err(|err| match err {
            ValidationError::InvalidAmount(_) => invalid(),
            other => other,
        })
    }
}
