//! Task: a titled to-do item with a due date and a status.
//!
//! Status changes are unrestricted: any status may move to any other,
//! including itself. New tasks start as [`TaskStatus::Pending`].

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{KeeperError, ValidationError};
use crate::id::TaskId;
use crate::time::{self, Timestamp};

const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Progress of a [`Task`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Done,
}

impl TaskStatus {
    /// Stable machine-readable name, used for storage.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str("Pending"),
            Self::InProgress => f.write_str("In Progress"),
            Self::Done => f.write_str("Done"),
        }
    }
}

impl FromStr for TaskStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" | "todo" | "to do" => Ok(Self::Pending),
            "in progress" | "in_progress" | "in-progress" | "inprogress" => Ok(Self::InProgress),
            "done" | "completed" => Ok(Self::Done),
            _ => Err(ValidationError::InvalidStatus(s.to_string())),
        }
    }
}

/// Parse a `YYYY-MM-DD` due date.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidDate`] when `value` is not a calendar date.
pub fn parse_due_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), DUE_DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(value.to_string()))
}

/// A to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub status: TaskStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Task {
    /// Create a builder for constructing a [`Task`].
    #[must_use]
    pub fn builder() -> TaskBuilder {
        TaskBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`KeeperError::InvalidArgument`] when `title` is blank.
    pub fn validate(&self) -> Result<(), KeeperError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }
        Ok(())
    }

    /// Move to `status`, refreshing `updated_at`.
    pub fn update_status(&mut self, status: TaskStatus, at: Timestamp) {
        self.status = status;
        self.touch(at);
    }

    /// Replace every editable field at once.
    ///
    /// # Errors
    ///
    /// Returns [`KeeperError::InvalidArgument`] when the new title is blank.
    /// The task is left untouched on error.
    pub fn edit(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        due_date: NaiveDate,
        status: TaskStatus,
        at: Timestamp,
    ) -> Result<(), KeeperError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }
        self.title = title;
        self.description = description.into();
        self.due_date = due_date;
        self.status = status;
        self.touch(at);
        Ok(())
    }

    fn touch(&mut self, at: Timestamp) {
        self.updated_at = time::after(self.updated_at, at);
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Task ID: {}, Title: {}, Description: {}, Due Date: {}, Status: {}",
            self.id,
            self.title,
            self.description,
            self.due_date.format(DUE_DATE_FORMAT),
            self.status
        )
    }
}

/// Step-by-step builder for [`Task`].
#[derive(Debug, Default)]
pub struct TaskBuilder {
    id: Option<TaskId>,
    title: Option<String>,
    description: Option<String>,
    due_date: Option<NaiveDate>,
    status: Option<TaskStatus>,
    created_at: Option<Timestamp>,
}

impl TaskBuilder {
    #[must_use]
    pub fn id(mut self, id: TaskId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    #[must_use]
    pub fn status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Consume the builder, validate, and return a [`Task`].
    ///
    /// A missing due date defaults to the creation day.
    ///
    /// # Errors
    ///
    /// Returns [`KeeperError::InvalidArgument`] if `title` is missing or blank.
    pub fn build(self) -> Result<Task, KeeperError> {
        let created_at = self.created_at.unwrap_or_else(time::now);
        let task = Task {
            id: self.id.unwrap_or_default(),
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            due_date: self.due_date.unwrap_or_else(|| created_at.date_naive()),
            status: self.status.unwrap_or_default(),
            created_at,
            updated_at: created_at,
        };
        task.validate()?;
        Ok(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn due() -> NaiveDate {
        parse_due_date("2024-03-15").unwrap()
    }

    fn grocery() -> Task {
        Task::builder()
            .title("Grocery Shopping")
            .description("Milk, eggs")
            .due_date(due())
            .build()
            .unwrap()
    }

    #[test]
    fn should_start_pending() {
        let task = grocery();
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.created_at, task.updated_at);
    }

    #[test]
    fn should_return_validation_error_when_title_is_empty() {
        let result = Task::builder().due_date(due()).build();
        assert!(matches!(
            result,
            Err(KeeperError::InvalidArgument(ValidationError::EmptyTitle))
        ));
    }

    #[test]
    fn should_parse_iso_due_date() {
        assert_eq!(due(), NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    }

    #[test]
    fn should_reject_malformed_due_date() {
        for text in ["15/03/2024", "2024-02-30", "tomorrow"] {
            assert_eq!(
                parse_due_date(text),
                Err(ValidationError::InvalidDate(text.to_string()))
            );
        }
    }

    #[test]
    fn should_parse_status_aliases() {
        assert_eq!("In Progress".parse(), Ok(TaskStatus::InProgress));
        assert_eq!("in_progress".parse(), Ok(TaskStatus::InProgress));
        assert_eq!("To Do".parse(), Ok(TaskStatus::Pending));
        assert_eq!("PENDING".parse(), Ok(TaskStatus::Pending));
        assert_eq!("Completed".parse(), Ok(TaskStatus::Done));
        assert_eq!(
            "archived".parse::<TaskStatus>(),
            Err(ValidationError::InvalidStatus("archived".to_string()))
        );
    }

    #[test]
    fn should_roundtrip_status_through_display_and_storage_name() {
        for status in [TaskStatus::Pending, TaskStatus::InProgress, TaskStatus::Done] {
            assert_eq!(status.to_string().parse(), Ok(status));
            assert_eq!(status.as_str().parse(), Ok(status));
        }
    }

    #[test]
    fn should_allow_any_transition() {
        let mut task = grocery();
        task.update_status(TaskStatus::Done, time::now());
        task.update_status(TaskStatus::Pending, time::now());
        task.update_status(TaskStatus::Pending, time::now());
        task.update_status(TaskStatus::InProgress, time::now());
        assert_eq!(task.status, TaskStatus::InProgress);
    }

    #[test]
    fn should_move_updated_at_strictly_forward() {
        let mut task = grocery();
        task.update_status(TaskStatus::InProgress, task.created_at);
        assert!(task.updated_at > task.created_at);
    }

    #[test]
    fn should_edit_all_fields() {
        let mut task = grocery();
        let new_due = parse_due_date("2024-04-01").unwrap();
        task.edit("Hardware store", "", new_due, TaskStatus::Done, time::now())
            .unwrap();
        assert_eq!(task.title, "Hardware store");
        assert_eq!(task.description, "");
        assert_eq!(task.due_date, new_due);
        assert_eq!(task.status, TaskStatus::Done);
    }

    #[test]
    fn should_leave_task_untouched_when_edit_title_is_blank() {
        let mut task = grocery();
        let before = task.clone();
        let result = task.edit(" ", "x", due(), TaskStatus::Done, time::now());
        assert!(matches!(
            result,
            Err(KeeperError::InvalidArgument(ValidationError::EmptyTitle))
        ));
        assert_eq!(task, before);
    }

    #[test]
    fn should_render_display_line() {
        let task = grocery();
        assert_eq!(
            task.to_string(),
            format!(
                "Task ID: {}, Title: Grocery Shopping, Description: Milk, eggs, Due Date: 2024-03-15, Status: Pending",
                task.id
            )
        );
    }

    #[test]
    fn should_roundtrip_through_serde_json() {
        let task = grocery();
        let json = serde_json::to_string(&task).unwrap();
        let parsed: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, task);
    }
}
