//! Account: a named holder with a balance that never goes negative.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{InsufficientFundsError, KeeperError, ValidationError};
use crate::id::AccountId;
use crate::money::Money;
use crate::time::{self, Timestamp};

/// A bank account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub holder: String,
    pub balance: Money,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Account {
    /// Create a builder for constructing an [`Account`].
    #[must_use]
    pub fn builder() -> AccountBuilder {
        AccountBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`KeeperError::InvalidArgument`] when `holder` is blank or the
    /// balance is negative.
    pub fn validate(&self) -> Result<(), KeeperError> {
        if self.holder.trim().is_empty() {
            return Err(ValidationError::EmptyHolder.into());
        }
        if self.balance.is_negative() {
            return Err(ValidationError::NegativeInitialBalance.into());
        }
        Ok(())
    }

    /// Add `amount` to the balance.
    ///
    /// # Errors
    ///
    /// Returns [`KeeperError::InvalidArgument`] if `amount` is not positive or
    /// the new balance would overflow. The account is left untouched on error.
    pub fn deposit(&mut self, amount: Money, at: Timestamp) -> Result<(), KeeperError> {
        amount.ensure_positive()?;
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(ValidationError::AmountOverflow)?;
        self.touch(at);
        Ok(())
    }

    /// Remove `amount` from the balance.
    ///
    /// # Errors
    ///
    /// Returns [`KeeperError::InvalidArgument`] if `amount` is not positive,
    /// or [`KeeperError::InsufficientFunds`] if it exceeds the balance. The
    /// account is left untouched on error.
    pub fn withdraw(&mut self, amount: Money, at: Timestamp) -> Result<(), KeeperError> {
        amount.ensure_positive()?;
        if amount > self.balance {
            return Err(InsufficientFundsError {
                account: self.id.to_string(),
                requested: amount,
                available: self.balance,
            }
            .into());
        }
        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(ValidationError::AmountOverflow)?;
        self.touch(at);
        Ok(())
    }

    fn touch(&mut self, at: Timestamp) {
        self.updated_at = time::after(self.updated_at, at);
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Account Number: {}, Holder: {}, Balance: {}",
            self.id, self.holder, self.balance
        )
    }
}

/// Step-by-step builder for [`Account`].
#[derive(Debug, Default)]
pub struct AccountBuilder {
    id: Option<AccountId>,
    holder: Option<String>,
    balance: Option<Money>,
    created_at: Option<Timestamp>,
}

impl AccountBuilder {
    #[must_use]
    pub fn id(mut self, id: AccountId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn holder(mut self, holder: impl Into<String>) -> Self {
        self.holder = Some(holder.into());
        self
    }

    #[must_use]
    pub fn balance(mut self, balance: Money) -> Self {
        self.balance = Some(balance);
        self
    }

    #[must_use]
    pub fn created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Consume the builder, validate, and return an [`Account`].
    ///
    /// Both timestamps start at `created_at` (now, unless provided).
    ///
    /// # Errors
    ///
    /// Returns [`KeeperError::InvalidArgument`] if `holder` is missing or
    /// blank, or the balance is negative.
    pub fn build(self) -> Result<Account, KeeperError> {
        let created_at = self.created_at.unwrap_or_else(time::now);
        let account = Account {
            id: self.id.unwrap_or_default(),
            holder: self.holder.unwrap_or_default(),
            balance: self.balance.unwrap_or_default(),
            created_at,
            updated_at: created_at,
        };
        account.validate()?;
        Ok(account)
    }
}
