//! # keeper-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `keeper-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `keeper-app` (for port traits) and `keeper-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod account_repo;
mod error;
mod pool;
mod task_repo;

pub use account_repo::SqliteAccountRepository;
pub use error::StorageError;
pub use pool::{Config, Database};
pub use task_repo::SqliteTaskRepository;
