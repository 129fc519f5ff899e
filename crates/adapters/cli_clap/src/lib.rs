//! Command-line adapter for keeper.
//!
//! Parses `keeper account ...` and `keeper task ...` invocations with `clap`
//! and drives the application services, rendering one human-readable line
//! per outcome.
//!
//! Business rejections (bad input, unknown ids, insufficient funds) are part
//! of the normal output: they are printed as `Error: <message>` and the
//! command still succeeds. Only infrastructure failures surface as
//! [`CliError`].

use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};

use keeper_app::ports::{AccountRepository, TaskRepository};
use keeper_app::services::account_service::AccountService;
use keeper_app::services::task_service::TaskService;
use keeper_domain::error::{KeeperError, ValidationError};

mod account;
mod task;

pub use account::AccountCommand;
pub use task::TaskCommand;

/// Top-level command line.
#[derive(Debug, Parser)]
#[command(name = "keeper")]
#[command(about = "Keeper - bank accounts and task tracking", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, global = true, default_value = "keeper.toml")]
    pub config: PathBuf,

    /// Database URL, overriding the configuration file and environment
    #[arg(long, global = true)]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage bank accounts
    Account {
        #[command(subcommand)]
        command: AccountCommand,
    },
    /// Manage tasks
    Task {
        #[command(subcommand)]
        command: TaskCommand,
    },
}

/// Failures that end the process with a non-zero status.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("failed to write output")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Keeper(#[from] KeeperError),
}

/// Run one command against the services, writing its output to `out`.
///
/// # Errors
///
/// Returns [`CliError`] when the output cannot be written or the storage
/// backend fails. Business errors are rendered to `out` instead.
pub async fn execute<A, T, W>(
    command: Commands,
    accounts: &AccountService<A>,
    tasks: &TaskService<T>,
    out: &mut W,
) -> Result<(), CliError>
where
    A: AccountRepository,
    T: TaskRepository,
    W: Write,
{
    let result = match command {
        Commands::Account { command } => account::execute(command, accounts, out).await,
        Commands::Task { command } => task::execute(command, tasks, out).await,
    };

    match result {
        Err(CliError::Keeper(err)) if err.is_business() => {
            writeln!(out, "Error: {err}")?;
            Ok(())
        }
        Err(CliError::Keeper(err)) => {
            tracing::error!(error = ?err, "command failed");
            Err(CliError::Keeper(err))
        }
        other => other,
    }
}

/// Parse a command argument into a domain value.
fn parse<V>(raw: &str) -> Result<V, KeeperError>
where
    V: FromStr<Err = ValidationError>,
{
    Ok(raw.parse()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    use keeper_domain::account::Account;
    use keeper_domain::id::{AccountId, TaskId};
    use keeper_domain::task::Task;
    use std::future::Future;

    /// Repository whose backend is always down.
    struct Unavailable;

    fn unavailable<T: Send>() -> impl Future<Output = Result<T, KeeperError>> + Send {
        async { Err(KeeperError::Storage("disk unavailable".into())) }
    }

    impl AccountRepository for Unavailable {
        fn create(&self, _: Account) -> impl Future<Output = Result<Account, KeeperError>> + Send {
            unavailable()
        }

        fn get_by_id(
            &self,
            _: AccountId,
        ) -> impl Future<Output = Result<Option<Account>, KeeperError>> + Send {
            unavailable()
        }

        fn get_all(&self) -> impl Future<Output = Result<Vec<Account>, KeeperError>> + Send {
            unavailable()
        }

        fn update(&self, _: Account) -> impl Future<Output = Result<Account, KeeperError>> + Send {
            unavailable()
        }

        fn update_pair(
            &self,
            _: Account,
            _: Account,
        ) -> impl Future<Output = Result<(Account, Account), KeeperError>> + Send {
            unavailable()
        }

        fn delete(&self, _: AccountId) -> impl Future<Output = Result<(), KeeperError>> + Send {
            unavailable()
        }
    }

    impl TaskRepository for Unavailable {
        fn create(&self, _: Task) -> impl Future<Output = Result<Task, KeeperError>> + Send {
            unavailable()
        }

        fn get_by_id(
            &self,
            _: TaskId,
        ) -> impl Future<Output = Result<Option<Task>, KeeperError>> + Send {
            unavailable()
        }

        fn get_all(&self) -> impl Future<Output = Result<Vec<Task>, KeeperError>> + Send {
            unavailable()
        }

        fn update(&self, _: Task) -> impl Future<Output = Result<Task, KeeperError>> + Send {
            unavailable()
        }

        fn delete(&self, _: TaskId) -> impl Future<Output = Result<(), KeeperError>> + Send {
            unavailable()
        }
    }

    async fn run(args: &[&str]) -> (Result<(), CliError>, String) {
        let cli = Cli::try_parse_from(args).unwrap();
        let accounts = AccountService::new(Unavailable);
        let tasks = TaskService::new(Unavailable);
        let mut out = Vec::new();
        let result = execute(cli.command, &accounts, &tasks, &mut out).await;
        (result, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn should_fail_when_storage_is_unavailable() {
        let (result, output) = run(&["keeper", "account", "list"]).await;
        assert!(matches!(result, Err(CliError::Keeper(KeeperError::Storage(_)))));
        assert!(output.is_empty());
    }

    #[tokio::test]
    async fn should_fail_get_when_storage_is_unavailable() {
        let id = TaskId::new().to_string();
        let (result, output) = run(&["keeper", "task", "get", &id]).await;
        assert!(result.is_err());
        assert!(output.is_empty());
    }

    #[tokio::test]
    async fn should_print_error_when_id_does_not_parse() {
        let (result, output) = run(&["keeper", "account", "deposit", "ACC0001", "10"]).await;
        assert!(result.is_ok());
        assert_eq!(output, "Error: invalid id `ACC0001`\n");
    }

    #[tokio::test]
    async fn should_print_not_found_when_get_id_does_not_parse() {
        let (result, output) = run(&["keeper", "account", "get", "ACC0001"]).await;
        assert!(result.is_ok());
        assert_eq!(output, "Account ACC0001 not found.\n");

        let (result, output) = run(&["keeper", "task", "get", "42"]).await;
        assert!(result.is_ok());
        assert_eq!(output, "Task 42 not found.\n");
    }

    #[tokio::test]
    async fn should_print_error_when_amount_is_not_positive() {
        let id = AccountId::new().to_string();
        let (result, output) = run(&["keeper", "account", "withdraw", &id, "-5"]).await;
        assert!(result.is_ok());
        assert_eq!(output, "Error: amount must be positive\n");
    }

    #[tokio::test]
    async fn should_print_error_when_due_date_is_malformed() {
        let (result, output) = run(&["keeper", "task", "create", "Title", "15/03/2024"]).await;
        assert!(result.is_ok());
        assert_eq!(
            output,
            "Error: invalid due date `15/03/2024`, expected YYYY-MM-DD\n"
        );
    }

    #[test]
    fn should_have_consistent_clap_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn should_use_default_config_path_when_not_given() {
        let cli = Cli::try_parse_from(["keeper", "account", "list"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("keeper.toml"));
        assert!(cli.database_url.is_none());
    }

    #[test]
    fn should_accept_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "keeper",
            "task",
            "list",
            "--database-url",
            "sqlite::memory:",
        ])
        .unwrap();
        assert_eq!(cli.database_url.as_deref(), Some("sqlite::memory:"));
    }

    #[test]
    fn should_reject_unknown_subcommand() {
        let err = Cli::try_parse_from(["keeper", "account", "close", "x"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn should_reject_missing_arguments() {
        let err = Cli::try_parse_from(["keeper", "account", "deposit", "only-id"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn should_default_initial_balance_to_zero() {
        let cli = Cli::try_parse_from(["keeper", "account", "create", "Alice"]).unwrap();
        let Commands::Account {
            command: AccountCommand::Create { holder, initial_balance },
        } = cli.command
        else {
            panic!("unexpected command");
        };
        assert_eq!(holder, "Alice");
        assert_eq!(initial_balance, "0");
    }

    #[test]
    fn should_pass_negative_amounts_through_to_validation() {
        let cli = Cli::try_parse_from(["keeper", "account", "create", "Bob", "-5"]).unwrap();
        let Commands::Account {
            command: AccountCommand::Create { initial_balance, .. },
        } = cli.command
        else {
            panic!("unexpected command");
        };
        assert_eq!(initial_balance, "-5");
    }

    #[test]
    fn should_parse_task_description_option() {
        let cli = Cli::try_parse_from([
            "keeper",
            "task",
            "create",
            "Grocery Shopping",
            "2024-03-15",
            "--description",
            "Milk, eggs",
        ])
        .unwrap();
        let Commands::Task {
            command:
                TaskCommand::Create {
                    title,
                    due_date,
                    description,
                },
        } = cli.command
        else {
            panic!("unexpected command");
        };
        assert_eq!(title, "Grocery Shopping");
        assert_eq!(due_date, "2024-03-15");
        assert_eq!(description, "Milk, eggs");
    }
}
