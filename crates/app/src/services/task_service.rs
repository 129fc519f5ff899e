//! Task service: use-cases for managing tasks.

use chrono::NaiveDate;
use keeper_domain::error::KeeperError;
use keeper_domain::id::TaskId;
use keeper_domain::task::{Task, TaskStatus};
use keeper_domain::time::now;

use crate::ports::TaskRepository;

/// Application service for task CRUD and status changes.
pub struct TaskService<R> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create a new [`TaskStatus::Pending`] task.
    ///
    /// # Errors
    ///
    /// Returns [`KeeperError::InvalidArgument`] if the title is blank, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, description, due_date), fields(due_date = %due_date))]
    pub async fn create_task(
        &self,
        title: &str,
        description: &str,
        due_date: NaiveDate,
    ) -> Result<Task, KeeperError> {
        let task = Task::builder()
            .title(title)
            .description(description)
            .due_date(due_date)
            .build()?;
        let task = self.repo.create(task).await?;
        tracing::info!(task_id = %task.id, "task created");
        Ok(task)
    }

    /// Look up a task by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`KeeperError::NotFound`] when no task with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_task(&self, id: TaskId) -> Result<Task, KeeperError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| id.not_found().into())
    }

    /// List all tasks.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_tasks(&self) -> Result<Vec<Task>, KeeperError> {
        self.repo.get_all().await
    }

    /// Set the status of a task. Any status may follow any other.
    ///
    /// # Errors
    ///
    /// Returns [`KeeperError::NotFound`] if the task does not exist,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn update_task_status(
        &self,
        id: TaskId,
        status: TaskStatus,
    ) -> Result<Task, KeeperError> {
        let mut task = self.get_task(id).await?;
        let previous = task.status;
        task.update_status(status, now());
        let task = self.repo.update(task).await?;
        tracing::info!(task_id = %id, %previous, current = %status, "task status updated");
        Ok(task)
    }

    /// Replace every editable field of a task.
    ///
    /// # Errors
    ///
    /// Returns [`KeeperError::InvalidArgument`] if the new title is blank,
    /// [`KeeperError::NotFound`] if the task does not exist, or a storage
    /// error from the repository.
    #[tracing::instrument(skip(self, title, description))]
    pub async fn update_task(
        &self,
        id: TaskId,
        title: &str,
        description: &str,
        due_date: NaiveDate,
        status: TaskStatus,
    ) -> Result<Task, KeeperError> {
        let mut task = self.get_task(id).await?;
        task.edit(title, description, due_date, status, now())?;
        let task = self.repo.update(task).await?;
        tracing::info!(task_id = %id, "task updated");
        Ok(task)
    }

    /// Delete a task by id.
    ///
    /// # Errors
    ///
    /// Returns [`KeeperError::NotFound`] if the task does not exist, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_task(&self, id: TaskId) -> Result<(), KeeperError> {
        self.repo.delete(id).await?;
        tracing::info!(task_id = %id, "task deleted");
        Ok(())
    }
}
