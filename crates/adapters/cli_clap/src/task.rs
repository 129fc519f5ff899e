//! `keeper task ...` commands.

use std::io::Write;

use clap::Subcommand;

use keeper_app::ports::TaskRepository;
use keeper_app::services::task_service::TaskService;
use keeper_domain::error::KeeperError;
use keeper_domain::id::TaskId;
use keeper_domain::task::{TaskStatus, parse_due_date};

use crate::{CliError, parse};

#[derive(Debug, Subcommand)]
pub enum TaskCommand {
    /// Add a new pending task
    Create {
        title: String,
        /// Due date as YYYY-MM-DD
        due_date: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// List every task
    List,
    /// Show one task
    Get { id: String },
    /// Change the status of a task (Pending, In Progress, Done)
    Update { id: String, status: String },
    /// Replace every field of a task
    Edit {
        id: String,
        title: String,
        description: String,
        due_date: String,
        status: String,
    },
    /// Remove a task
    Delete { id: String },
}

pub(crate) async fn execute<R, W>(
    command: TaskCommand,
    service: &TaskService<R>,
    out: &mut W,
) -> Result<(), CliError>
where
    R: TaskRepository,
    W: Write,
{
    match command {
        TaskCommand::Create {
            title,
            due_date,
            description,
        } => {
            let due_date = parse_due_date(&due_date).map_err(KeeperError::from)?;
            let task = service.create_task(&title, &description, due_date).await?;
            writeln!(out, "Task created: {task}")?;
        }
        TaskCommand::List => {
            let tasks = service.list_tasks().await?;
            if tasks.is_empty() {
                writeln!(out, "No tasks found.")?;
            }
            for task in tasks {
                writeln!(out, "{task}")?;
            }
        }
        TaskCommand::Get { id: raw } => {
            let Ok(id) = raw.parse::<TaskId>() else {
                writeln!(out, "Task {raw} not found.")?;
                return Ok(());
            };
            match service.get_task(id).await {
                Ok(task) => writeln!(out, "{task}")?,
                Err(KeeperError::NotFound(_)) => writeln!(out, "Task {id} not found.")?,
                Err(err) => return Err(err.into()),
            }
        }
        TaskCommand::Update { id, status } => {
            let id: TaskId = parse(&id)?;
            let status: TaskStatus = parse(&status)?;
            let task = service.update_task_status(id, status).await?;
            writeln!(out, "Task {id} status updated to {}", task.status)?;
        }
        TaskCommand::Edit {
            id,
            title,
            description,
            due_date,
            status,
        } => {
            let id: TaskId = parse(&id)?;
            let due_date = parse_due_date(&due_date).map_err(KeeperError::from)?;
            let status: TaskStatus = parse(&status)?;
            let task = service
                .update_task(id, &title, &description, due_date, status)
                .await?;
            writeln!(out, "Task updated: {task}")?;
        }
        TaskCommand::Delete { id } => {
            let id: TaskId = parse(&id)?;
            service.delete_task(id).await?;
            writeln!(out, "Task {id} deleted.")?;
        }
    }
    Ok(())
}
