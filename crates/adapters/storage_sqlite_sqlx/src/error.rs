//! Errors raised by the `SQLite` adapter.

use keeper_domain::error::KeeperError;

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A write was refused by a table constraint.
    #[error("constraint violated: {0}")]
    Constraint(String),

    /// A query or connection failed.
    #[error("database error")]
    Database(#[source] sqlx::Error),

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        let constraint = err
            .as_database_error()
            .filter(|db| db.is_check_violation() || db.is_unique_violation())
            .map(|db| db.message().to_string());
        match constraint {
            Some(message) => Self::Constraint(message),
            None => Self::Database(err),
        }
    }
}

impl From<StorageError> for KeeperError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
