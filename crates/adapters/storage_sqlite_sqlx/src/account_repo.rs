//! `SQLite` implementation of [`AccountRepository`].

use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqliteConnection, SqlitePool};

use keeper_app::ports::AccountRepository;
use keeper_domain::account::Account;
use keeper_domain::error::KeeperError;
use keeper_domain::id::AccountId;
use keeper_domain::money::Money;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain types without polluting
/// domain structs with database concerns.
struct Wrapper(Account);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Account> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let holder: String = row.try_get("holder")?;
        let balance: i64 = row.try_get("balance")?;
        let created_at: String = row.try_get("created_at")?;
        let updated_at: String = row.try_get("updated_at")?;

        let id = AccountId::from_str(&id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let created_at = chrono::DateTime::parse_from_rfc3339(&created_at)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?
            .to_utc();
        let updated_at = chrono::DateTime::parse_from_rfc3339(&updated_at)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?
            .to_utc();

        Ok(Self(Account {
            id,
            holder,
            balance: Money::from_minor(balance),
            created_at,
            updated_at,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO accounts (id, holder, balance, created_at, updated_at)
    VALUES (?, ?, ?, ?, ?)
";
const SELECT_BY_ID: &str = "SELECT * FROM accounts WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM accounts ORDER BY rowid";
const UPDATE: &str = "UPDATE accounts SET holder = ?, balance = ?, updated_at = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM accounts WHERE id = ?";

/// `SQLite`-backed account repository.
pub struct SqliteAccountRepository {
    pool: SqlitePool,
}

impl SqliteAccountRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Write `account` over its stored row, returning whether a row matched.
async fn write(conn: &mut SqliteConnection, account: &Account) -> Result<bool, StorageError> {
    let result = sqlx::query(UPDATE)
        .bind(&account.holder)
        .bind(account.balance.minor())
        .bind(account.updated_at.to_rfc3339())
        .bind(account.id.to_string())
        .execute(conn)
        .await?;
    Ok(result.rows_affected() > 0)
}

impl AccountRepository for SqliteAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, KeeperError> {
        sqlx::query(INSERT)
            .bind(account.id.to_string())
            .bind(&account.holder)
            .bind(account.balance.minor())
            .bind(account.created_at.to_rfc3339())
            .bind(account.updated_at.to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(account)
    }

    async fn get_by_id(&self, id: AccountId) -> Result<Option<Account>, KeeperError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn get_all(&self) -> Result<Vec<Account>, KeeperError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn update(&self, account: Account) -> Result<Account, KeeperError> {
        let mut conn = self.pool.acquire().await.map_err(StorageError::from)?;
        if !write(&mut *conn, &account).await? {
            return Err(account.id.not_found().into());
        }
        Ok(account)
    }

    async fn update_pair(
        &self,
        debit: Account,
        credit: Account,
    ) -> Result<(Account, Account), KeeperError> {
        let mut tx = self.pool.begin().await.map_err(StorageError::from)?;

        for account in [&debit, &credit] {
            if !write(&mut *tx, account).await? {
                tx.rollback().await.map_err(StorageError::from)?;
                return Err(account.id.not_found().into());
            }
        }

        tx.commit().await.map_err(StorageError::from)?;
        Ok((debit, credit))
    }

    async fn delete(&self, id: AccountId) -> Result<(), KeeperError> {
        let result = sqlx::query(DELETE_BY_ID)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        if result.rows_affected() == 0 {
            return Err(id.not_found().into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;
    use keeper_domain::time::now;

    async fn setup() -> SqliteAccountRepository {
        let db = Config::in_memory().build().await.unwrap();
        SqliteAccountRepository::new(db.pool().clone())
    }

    fn test_account(holder: &str, balance: i64) -> Account {
        Account::builder()
            .holder(holder)
            .balance(Money::from_minor(balance))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_create_and_retrieve_account_when_valid() {
        let repo = setup().await;
        let account = test_account("Test User", 10_000);
        let id = account.id;

        repo.create(account.clone()).await.unwrap();

        let fetched = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(fetched, account);
    }

    #[tokio::test]
    async fn should_return_none_when_account_not_found() {
        let repo = setup().await;
        let result = repo.get_by_id(AccountId::new()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn should_list_accounts_in_insertion_order() {
        let repo = setup().await;
        let mut expected = Vec::new();
        for holder in ["Carol", "Alice", "Bob"] {
            let account = test_account(holder, 0);
            expected.push(account.id);
            repo.create(account).await.unwrap();
        }

        let all = repo.get_all().await.unwrap();
        let ids: Vec<_> = all.iter().map(|acc| acc.id).collect();
        assert_eq!(ids, expected);
    }

    #[tokio::test]
    async fn should_update_account_when_exists() {
        let repo = setup().await;
        let mut account = test_account("Test User", 10_000);
        let id = account.id;
        repo.create(account.clone()).await.unwrap();

        account.deposit(Money::from_minor(5_000), now()).unwrap();
        repo.update(account.clone()).await.unwrap();

        let fetched = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(fetched.balance, Money::from_minor(15_000));
        assert_eq!(fetched.updated_at, account.updated_at);
        assert_eq!(fetched.created_at, account.created_at);
    }

    #[tokio::test]
    async fn should_return_not_found_when_updating_missing_account() {
        let repo = setup().await;
        let result = repo.update(test_account("Ghost", 0)).await;
        assert!(matches!(result, Err(KeeperError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_reject_negative_balance_at_storage_level() {
        let repo = setup().await;
        let mut account = test_account("Test User", 100);
        repo.create(account.clone()).await.unwrap();

        account.balance = Money::from_minor(-1);
        let Err(KeeperError::Storage(source)) = repo.update(account).await else {
            panic!("expected a storage error");
        };
        assert!(matches!(
            source.downcast_ref::<StorageError>(),
            Some(StorageError::Constraint(_))
        ));
    }

    #[tokio::test]
    async fn should_reject_duplicate_account_id() {
        let repo = setup().await;
        let account = test_account("Test User", 0);
        repo.create(account.clone()).await.unwrap();

        let result = repo.create(account).await;
        assert!(matches!(result, Err(KeeperError::Storage(_))));
        assert_eq!(repo.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn should_write_both_accounts_when_updating_pair() {
        let repo = setup().await;
        let mut a = test_account("Alice", 10_000);
        let mut b = test_account("Bob", 0);
        repo.create(a.clone()).await.unwrap();
        repo.create(b.clone()).await.unwrap();

        let at = now();
        a.withdraw(Money::from_minor(2_500), at).unwrap();
        b.deposit(Money::from_minor(2_500), at).unwrap();
        repo.update_pair(a.clone(), b.clone()).await.unwrap();

        let a = repo.get_by_id(a.id).await.unwrap().unwrap();
        let b = repo.get_by_id(b.id).await.unwrap().unwrap();
        assert_eq!(a.balance, Money::from_minor(7_500));
        assert_eq!(b.balance, Money::from_minor(2_500));
    }

    #[tokio::test]
    async fn should_roll_back_debit_when_credit_account_is_gone() {
        let repo = setup().await;
        let mut a = test_account("Alice", 10_000);
        let mut b = test_account("Bob", 0);
        repo.create(a.clone()).await.unwrap();
        repo.create(b.clone()).await.unwrap();
        repo.delete(b.id).await.unwrap();

        let at = now();
        a.withdraw(Money::from_minor(2_500), at).unwrap();
        b.deposit(Money::from_minor(2_500), at).unwrap();
        let result = repo.update_pair(a.clone(), b).await;
        assert!(matches!(result, Err(KeeperError::NotFound(_))));

        let stored = repo.get_by_id(a.id).await.unwrap().unwrap();
        assert_eq!(stored.balance, Money::from_minor(10_000));
    }

    #[tokio::test]
    async fn should_delete_account_when_exists() {
        let repo = setup().await;
        let account = test_account("Test User", 0);
        let id = account.id;
        repo.create(account).await.unwrap();

        repo.delete(id).await.unwrap();

        assert!(repo.get_by_id(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_return_not_found_when_deleting_missing_account() {
        let repo = setup().await;
        let result = repo.delete(AccountId::new()).await;
        assert!(matches!(result, Err(KeeperError::NotFound(_))));
    }
}
