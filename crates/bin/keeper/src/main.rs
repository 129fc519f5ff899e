//! # keeper: bank accounts and tasks from the command line
//!
//! Composition root that wires the adapters together and runs one command.
//!
//! ## Responsibilities
//! - Parse the command line (clap)
//! - Load configuration (config file, env vars, `--database-url`)
//! - Install the tracing subscriber on stderr (`warn` if configuration fails)
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct repositories and inject them into the application services
//! - Execute the command, writing its output to stdout
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use std::io::Write;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use keeper_adapter_cli_clap::Cli;
use keeper_adapter_storage_sqlite_sqlx::{
    Config as StorageConfig, SqliteAccountRepository, SqliteTaskRepository,
};
use keeper_app::services::account_service::AccountService;
use keeper_app::services::task_service::TaskService;

use crate::config::{Config, DEFAULT_LOG_FILTER};

fn init_tracing(filter: EnvFilter) {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Configuration and logging
    let config = match Config::load(&cli.config, cli.database_url) {
        Ok(config) => {
            init_tracing(config.logging.env_filter()?);
            config
        }
        Err(err) => {
            init_tracing(EnvFilter::new(DEFAULT_LOG_FILTER));
            tracing::error!(
                error = ?err,
                path = %cli.config.display(),
                "failed to load configuration"
            );
            return Err(err.into());
        }
    };

    // Database
    let db = StorageConfig {
        database_url: config.database.url,
    }
    .build()
    .await
    .inspect_err(|err| tracing::error!(error = ?err, "failed to open database"))?;
    let pool = db.pool().clone();

    // Services
    let accounts = AccountService::new(SqliteAccountRepository::new(pool.clone()));
    let tasks = TaskService::new(SqliteTaskRepository::new(pool));

    // Command
    let mut stdout = std::io::stdout().lock();
    let outcome =
        keeper_adapter_cli_clap::execute(cli.command, &accounts, &tasks, &mut stdout).await;
    stdout.flush()?;
    db.close().await;
    outcome?;

    Ok(())
}
