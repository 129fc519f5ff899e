//! Storage port: repository traits for persistence.
//!
//! Absence on lookup is a normal outcome (`Ok(None)`); absence on `update`
//! or `delete` is reported as [`KeeperError::NotFound`].

use std::future::Future;

use keeper_domain::account::Account;
use keeper_domain::error::KeeperError;
use keeper_domain::id::{AccountId, TaskId};
use keeper_domain::task::Task;

/// Repository for persisting and querying [`Account`]s.
pub trait AccountRepository {
    /// Persist a new account. Its id was generated at construction.
    fn create(&self, account: Account) -> impl Future<Output = Result<Account, KeeperError>> + Send;

    /// Get an account by its unique identifier.
    fn get_by_id(
        &self,
        id: AccountId,
    ) -> impl Future<Output = Result<Option<Account>, KeeperError>> + Send;

    /// Get all accounts in insertion order.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Account>, KeeperError>> + Send;

    /// Replace the stored fields of an existing account.
    fn update(&self, account: Account) -> impl Future<Output = Result<Account, KeeperError>> + Send;

    /// Replace two accounts in a single unit of work.
    ///
    /// Either both records are written or neither is. If either id is
    /// missing nothing changes and [`KeeperError::NotFound`] is returned.
    fn update_pair(
        &self,
        debit: Account,
        credit: Account,
    ) -> impl Future<Output = Result<(Account, Account), KeeperError>> + Send;

    /// Delete an account by its unique identifier.
    fn delete(&self, id: AccountId) -> impl Future<Output = Result<(), KeeperError>> + Send;
}

/// Repository for persisting and querying [`Task`]s.
pub trait TaskRepository {
    /// Persist a new task. Its id was generated at construction.
    fn create(&self, task: Task) -> impl Future<Output = Result<Task, KeeperError>> + Send;

    /// Get a task by its unique identifier.
    fn get_by_id(
        &self,
        id: TaskId,
    ) -> impl Future<Output = Result<Option<Task>, KeeperError>> + Send;

    /// Get all tasks in insertion order.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Task>, KeeperError>> + Send;

    /// Replace the stored fields of an existing task.
    fn update(&self, task: Task) -> impl Future<Output = Result<Task, KeeperError>> + Send;

    /// Delete a task by its unique identifier.
    fn delete(&self, id: TaskId) -> impl Future<Output = Result<(), KeeperError>> + Send;
}
