//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`KeeperError`]
//! via `From`. Adapters box their errors into [`KeeperError::Storage`].

use crate::money::Money;

/// Top-level error returned by every service and repository.
#[derive(Debug, thiserror::Error)]
pub enum KeeperError {
    /// Bad input shape or out-of-range value.
    #[error(transparent)]
    InvalidArgument(#[from] ValidationError),

    /// The referenced record does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// A withdrawal or transfer exceeds the available balance.
    #[error(transparent)]
    InsufficientFunds(#[from] InsufficientFundsError),

    /// The storage backend failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl KeeperError {
    /// Whether this error is a business-rule rejection rather than an
    /// infrastructure failure.
    #[must_use]
    pub fn is_business(&self) -> bool {
        !matches!(self, Self::Storage(_))
    }
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("account holder cannot be empty")]
    EmptyHolder,

    #[error("task title cannot be empty")]
    EmptyTitle,

    #[error("initial balance cannot be negative")]
    NegativeInitialBalance,

    #[error("amount must be positive")]
    NonPositiveAmount,

    #[error("amount is too large")]
    AmountOverflow,

    #[error("cannot transfer to the same account")]
    SameAccountTransfer,

    #[error("invalid amount `{0}`")]
    InvalidAmount(String),

    #[error("invalid due date `{0}`, expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid status `{0}`, expected Pending, In Progress or Done")]
    InvalidStatus(String),

    #[error("invalid id `{0}`")]
    InvalidId(String),
}

/// A lookup by id found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// Kind of record that was looked up (`"Account"`, `"Task"`).
    pub entity: &'static str,
    pub id: String,
}

/// The source account cannot cover the requested amount.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("insufficient funds in account {account}: requested {requested}, available {available}")]
pub struct InsufficientFundsError {
    pub account: String,
    pub requested: Money,
    pub available: Money,
}
