//! Fixed-point decimal types for prices and amounts
//!
//! Uses rust_decimal for deterministic arithmetic (no floating-point errors).
//! `Price` is strictly positive; `Amount` is non-negative. All comparisons
//! and subtractions in the core are exact, so order store fills and ledger
//! aggregates can never drift apart.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;
use std::str::FromStr;
use thiserror::Error;

/// Errors constructing numeric values
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NumericError {
    #[error("Price must be positive, got {0}")]
    NonPositivePrice(Decimal),

    #[error("Amount must not be negative, got {0}")]
    NegativeAmount(Decimal),

    #[error("Not a valid decimal: {0}")]
    Unparseable(String),
}

/// A strictly positive limit price
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a price, returning None unless the value is strictly positive
    pub fn try_new(value: Decimal) -> Option<Self> {
        if value > Decimal::ZERO {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Create a price from an integer value
    pub fn from_u64(value: u64) -> Self {
        Self(Decimal::from(value))
    }

    /// Parse a price from a decimal string
    pub fn from_str(s: &str) -> Result<Self, NumericError> {
        let value = Decimal::from_str(s).map_err(|_| NumericError::Unparseable(s.to_string()))?;
        Self::try_new(value).ok_or(NumericError::NonPositivePrice(value))
    }

    /// Get the inner decimal value
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A non-negative token amount
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    /// The zero amount
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Create an amount, returning None if the value is negative
    pub fn try_new(value: Decimal) -> Option<Self> {
        if value >= Decimal::ZERO {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Parse an amount from a decimal string
    pub fn from_str(s: &str) -> Result<Self, NumericError> {
        let value = Decimal::from_str(s).map_err(|_| NumericError::Unparseable(s.to_string()))?;
        Self::try_new(value).ok_or(NumericError::NegativeAmount(value))
    }

    /// Get the inner decimal value
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Check for the zero amount
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Exact subtraction, None if the result would be negative
    pub fn checked_sub(&self, other: Amount) -> Option<Self> {
        Self::try_new(self.0 - other.0)
    }

    /// The smaller of two amounts
    pub fn min(self, other: Amount) -> Self {
        if self.0 <= other.0 {
            self
        } else {
            other
        }
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0 + rhs.0)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
