//! Money value object.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// A non-negative currency amount.
///
/// Backed by a `Decimal` so sums of subtotals are exact. Every operation returns a
/// new value; a result that would be negative is rejected by [`Money::new`], which
/// all arithmetic funnels through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a money value, rejecting negative amounts. Negative zero becomes zero.
    pub fn new(amount: Decimal) -> DomainResult<Self> {
        if amount.is_zero() {
            return Ok(Self::ZERO);
        }
        if amount.is_sign_negative() {
            return Err(DomainError::invalid_amount(format!(
                "money amount cannot be negative: {amount}"
            )));
        }
        Ok(Self(amount))
    }

    /// Create a money value from a float, rejecting NaN, infinities and negatives.
    pub fn from_f64(amount: f64) -> DomainResult<Self> {
        if !amount.is_finite() {
            return Err(DomainError::invalid_amount("money amount must be finite"));
        }
        let decimal = Decimal::try_from(amount)
            .map_err(|e| DomainError::invalid_amount(format!("{amount}: {e}")))?;
        Self::new(decimal)
    }

    /// Create a money value from an integer number of cents.
    pub fn from_cents(cents: u64) -> Self {
        Self(Decimal::from(cents) / Decimal::ONE_HUNDRED)
    }

    pub fn zero() -> Self {
        Self::ZERO
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn add(&self, other: &Money) -> DomainResult<Money> {
        let sum = self
            .0
            .checked_add(other.0)
            .ok_or_else(|| DomainError::invalid_amount("money addition overflowed"))?;
        Self::new(sum)
    }

    pub fn subtract(&self, other: &Money) -> DomainResult<Money> {
        let difference = self
            .0
            .checked_sub(other.0)
            .ok_or_else(|| DomainError::invalid_amount("money subtraction overflowed"))?;
        Self::new(difference)
    }

    /// Scale by an arbitrary factor. Negative or non-finite factors are rejected.
    pub fn multiply(&self, factor: f64) -> DomainResult<Money> {
        if !factor.is_finite() || factor < 0.0 {
            return Err(DomainError::invalid_amount(format!(
                "multiplication factor must be a non-negative finite number, got {factor}"
            )));
        }
        let factor = Decimal::try_from(factor)
            .map_err(|e| DomainError::invalid_amount(format!("{factor}: {e}")))?;
        self.scale(factor)
    }

    /// Scale by a whole quantity (the common case for order lines).
    pub fn times(&self, quantity: u32) -> DomainResult<Money> {
        self.scale(Decimal::from(quantity))
    }

    pub fn equals(&self, other: &Money) -> bool {
        self == other
    }

    pub fn is_greater_than(&self, other: &Money) -> bool {
        self > other
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    fn scale(&self, factor: Decimal) -> DomainResult<Money> {
        let product = self
            .0
            .checked_mul(factor)
            .ok_or_else(|| DomainError::invalid_amount("money multiplication overflowed"))?;
        Self::new(product)
    }
}

impl ValueObject for Money {}

impl Default for Money {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl TryFrom<Decimal> for Money {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.0
    }
}
