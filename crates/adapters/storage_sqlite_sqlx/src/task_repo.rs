//! `SQLite` implementation of [`TaskRepository`].

use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use keeper_app::ports::TaskRepository;
use keeper_domain::error::{KeeperError, ValidationError};
use keeper_domain::id::TaskId;
use keeper_domain::task::{Task, TaskStatus, parse_due_date};

use crate::error::StorageError;

struct Wrapper(Task);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Task> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let title: String = row.try_get("title")?;
        let description: String = row.try_get("description")?;
        let due_date: String = row.try_get("due_date")?;
        let status: String = row.try_get("status")?;
        let created_at: String = row.try_get("created_at")?;
        let updated_at: String = row.try_get("updated_at")?;

        let decode = |err: ValidationError| sqlx::Error::Decode(Box::new(err));
        let id = TaskId::from_str(&id).map_err(decode)?;
        let due_date = parse_due_date(&due_date).map_err(decode)?;
        let status = TaskStatus::from_str(&status).map_err(decode)?;
        let created_at = chrono::DateTime::parse_from_rfc3339(&created_at)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?
            .to_utc();
        let updated_at = chrono::DateTime::parse_from_rfc3339(&updated_at)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?
            .to_utc();

        Ok(Self(Task {
            id,
            title,
            description,
            due_date,
            status,
            created_at,
            updated_at,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO tasks (id, title, description, due_date, status, created_at, updated_at)
    VALUES (?, ?, ?, ?, ?, ?, ?)
";
const SELECT_BY_ID: &str = "SELECT * FROM tasks WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM tasks ORDER BY rowid";
const UPDATE: &str = r"
    UPDATE tasks
    SET title = ?, description = ?, due_date = ?, status = ?, updated_at = ?
    WHERE id = ?
";
const DELETE_BY_ID: &str = "DELETE FROM tasks WHERE id = ?";

/// `SQLite`-backed task repository.
pub struct SqliteTaskRepository {
    pool: SqlitePool,
}

impl SqliteTaskRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl TaskRepository for SqliteTaskRepository {
    async fn create(&self, task: Task) -> Result<Task, KeeperError> {
        sqlx::query(INSERT)
            .bind(task.id.to_string())
            .bind(&task.title)
            .bind(&task.description)
            .bind(task.due_date.to_string())
            .bind(task.status.as_str())
            .bind(task.created_at.to_rfc3339())
            .bind(task.updated_at.to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(task)
    }

    async fn get_by_id(&self, id: TaskId) -> Result<Option<Task>, KeeperError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn get_all(&self) -> Result<Vec<Task>, KeeperError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn update(&self, task: Task) -> Result<Task, KeeperError> {
        let result = sqlx::query(UPDATE)
            .bind(&task.title)
            .bind(&task.description)
            .bind(task.due_date.to_string())
            .bind(task.status.as_str())
            .bind(task.updated_at.to_rfc3339())
            .bind(task.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        if result.rows_affected() == 0 {
            return Err(task.id.not_found().into());
        }
        Ok(task)
    }

    async fn delete(&self, id: TaskId) -> Result<(), KeeperError> {
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
