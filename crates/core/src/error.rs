//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Construction-time invariant violations (money, quantities, names) and illegal
/// state transitions surface here. Drink-pairing violations are normally returned as
/// a [`ValidationResult`](crate::ValidationResult) and only become a
/// `RuleViolation` once a caller decides to reject the operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Money arithmetic produced (or was given) a negative or non-finite amount.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// A quantity was zero, negative or otherwise unusable.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    /// An operation is not legal in the aggregate's current status.
    #[error("invalid state transition: {0}")]
    InvalidStateTransition(String),

    /// A product or order could not be resolved.
    #[error("not found: {0}")]
    NotFound(String),

    /// A business rule rejected the request.
    #[error("rule violation: {0}")]
    RuleViolation(String),

    /// A value failed validation (e.g. empty name, unknown category).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn invalid_amount(msg: impl Into<String>) -> Self {
        Self::InvalidAmount(msg.into())
    }

    pub fn invalid_quantity(msg: impl Into<String>) -> Self {
        Self::InvalidQuantity(msg.into())
    }

    pub fn invalid_transition(msg: impl Into<String>) -> Self {
        Self::InvalidStateTransition(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn rule_violation(msg: impl Into<String>) -> Self {
        Self::RuleViolation(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
