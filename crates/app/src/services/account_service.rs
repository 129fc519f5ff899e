//! Account service: use-cases for opening accounts and moving money.

use keeper_domain::account::Account;
use keeper_domain::error::{KeeperError, ValidationError};
use keeper_domain::id::AccountId;
use keeper_domain::money::Money;
use keeper_domain::time::now;

use crate::ports::AccountRepository;

/// Application service for account CRUD and balance operations.
pub struct AccountService<R> {
    repo: R,
}

impl<R: AccountRepository> AccountService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Open a new account for `holder` with `initial_balance`.
    ///
    /// # Errors
    ///
    /// Returns [`KeeperError::InvalidArgument`] if the holder is blank or the
    /// initial balance is negative, or a storage error from the repository.
    #[tracing::instrument(
        skip(self, holder, initial_balance),
        fields(initial_balance = %initial_balance)
    )]
    pub async fn create_account(
        &self,
        holder: &str,
        initial_balance: Money,
    ) -> Result<Account, KeeperError> {
        let account = Account::builder()
            .holder(holder)
            .balance(initial_balance)
            .build()?;
        let account = self.repo.create(account).await?;
        tracing::info!(account_id = %account.id, "account created");
        Ok(account)
    }

    /// Look up an account by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`KeeperError::NotFound`] when no account with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_account(&self, id: AccountId) -> Result<Account, KeeperError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| id.not_found().into())
    }

    /// List all accounts.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_accounts(&self) -> Result<Vec<Account>, KeeperError> {
        self.repo.get_all().await
    }

    /// Add `amount` to an account.
    ///
    /// # Errors
    ///
    /// Returns [`KeeperError::InvalidArgument`] if `amount` is not positive,
    /// [`KeeperError::NotFound`] if the account does not exist, or a storage
    /// error from the repository.
    #[tracing::instrument(skip(self, amount), fields(amount = %amount))]
    pub async fn deposit(&self, id: AccountId, amount: Money) -> Result<Account, KeeperError> {
        amount.ensure_positive()?;
        let mut account = self.get_account(id).await?;
        account.deposit(amount, now())?;
        let account = self.repo.update(account).await?;
        tracing::info!(account_id = %id, %amount, balance = %account.balance, "deposited");
        Ok(account)
    }

    /// Remove `amount` from an account.
    ///
    /// # Errors
    ///
    /// Returns [`KeeperError::InvalidArgument`] if `amount` is not positive,
    /// [`KeeperError::NotFound`] if the account does not exist,
    /// [`KeeperError::InsufficientFunds`] if `amount` exceeds the balance, or
    /// a storage error from the repository.
    #[tracing::instrument(skip(self, amount), fields(amount = %amount))]
    pub async fn withdraw(&self, id: AccountId, amount: Money) -> Result<Account, KeeperError> {
        amount.ensure_positive()?;
        let mut account = self.get_account(id).await?;
        if let Err(err) = account.withdraw(amount, now()) {
            tracing::warn!(account_id = %id, %amount, error = %err, "withdrawal rejected");
            return Err(err);
        }
        let account = self.repo.update(account).await?;
        tracing::info!(account_id = %id, %amount, balance = %account.balance, "withdrew");
        Ok(account)
    }

    /// Move `amount` from one account to another.
    ///
    /// Both balances are committed together through
    /// [`AccountRepository::update_pair`]: either both change or neither does.
    /// Returns the `(source, destination)` accounts after the transfer.
    ///
    /// # Errors
    ///
    /// Returns [`KeeperError::InvalidArgument`] if `amount` is not positive or
    /// both ids are equal, [`KeeperError::NotFound`] if either account is
    /// missing (source checked first), [`KeeperError::InsufficientFunds`] if
    /// the source cannot cover `amount`, or a storage error.
    #[tracing::instrument(skip(self, amount), fields(amount = %amount))]
    pub async fn transfer(
        &self,
        from: AccountId,
        to: AccountId,
        amount: Money,
    ) -> Result<(Account, Account), KeeperError> {
        amount.ensure_positive()?;
        if from == to {
            return Err(ValidationError::SameAccountTransfer.into());
        }
        let mut source = self.get_account(from).await?;
        let mut destination = self.get_account(to).await?;

        let at = now();
        if let Err(err) = source.withdraw(amount, at) {
            tracing::warn!(from = %from, to = %to, %amount, error = %err, "transfer rejected");
            return Err(err);
        }
        destination.deposit(amount, at)?;

        let (source, destination) = self.repo.update_pair(source, destination).await?;
        tracing::info!(from = %from, to = %to, %amount, "transferred");
        Ok((source, destination))
    }

    /// Delete an account by id.
    ///
    /// # Errors
    ///
    /// Returns [`KeeperError::NotFound`] if the account does not exist, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_account(&self, id: AccountId) -> Result<(), KeeperError> {
        self.repo.delete(id).await?;
        tracing::info!(account_id = %id, "account deleted");
        Ok(())
    }
}
