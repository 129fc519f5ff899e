//! `keeper account ...` commands.

use std::io::Write;

use clap::Subcommand;

use keeper_app::ports::AccountRepository;
use keeper_app::services::account_service::AccountService;
use keeper_domain::error::KeeperError;
use keeper_domain::id::AccountId;
use keeper_domain::money::Money;

use crate::{CliError, parse};

#[derive(Debug, Subcommand)]
pub enum AccountCommand {
    /// Open a new account
    Create {
        holder: String,
        #[arg(default_value = "0", allow_hyphen_values = true)]
        initial_balance: String,
    },
    /// List every account
    List,
    /// Show one account
    Get { id: String },
    /// Add money to an account
    Deposit {
        id: String,
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Take money out of an account
    Withdraw {
        id: String,
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Move money between two accounts
    Transfer {
        from_id: String,
        to_id: String,
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Close an account
    Delete { id: String },
}

pub(crate) async fn execute<R, W>(
    command: AccountCommand,
    service: &AccountService<R>,
    out: &mut W,
) -> Result<(), CliError>
where
    R: AccountRepository,
    W: Write,
{
    match command {
        AccountCommand::Create {
            holder,
            initial_balance,
        } => {
            let initial_balance: Money = parse(&initial_balance)?;
            let account = service.create_account(&holder, initial_balance).await?;
            writeln!(out, "Account created: {account}")?;
        }
        AccountCommand::List => {
            let accounts = service.list_accounts().await?;
            if accounts.is_empty() {
                writeln!(out, "No accounts found.")?;
            }
            for account in accounts {
                writeln!(out, "{account}")?;
            }
        }
        AccountCommand::Get { id: raw } => {
            let Ok(id) = raw.parse::<AccountId>() else {
                writeln!(out, "Account {raw} not found.")?;
                return Ok(());
            };
            match service.get_account(id).await {
                Ok(account) => writeln!(out, "{account}")?,
                Err(KeeperError::NotFound(_)) => writeln!(out, "Account {id} not found.")?,
                Err(err) => return Err(err.into()),
            }
        }
        AccountCommand::Deposit { id, amount } => {
            let id: AccountId = parse(&id)?;
            let amount: Money = parse(&amount)?;
            service.deposit(id, amount).await?;
            writeln!(out, "Deposited {amount} into {id}")?;
        }
        AccountCommand::Withdraw { id, amount } => {
            let id: AccountId = parse(&id)?;
            let amount: Money = parse(&amount)?;
            service.withdraw(id, amount).await?;
            writeln!(out, "Withdrew {amount} from {id}")?;
        }
        AccountCommand::Transfer {
            from_id,
            to_id,
            amount,
        } => {
            let from: AccountId = parse(&from_id)?;
            let to: AccountId = parse(&to_id)?;
            let amount: Money = parse(&amount)?;
            service.transfer(from, to, amount).await?;
            writeln!(out, "Transferred {amount} from {from} to {to}")?;
        }
        AccountCommand::Delete { id } => {
            let id: AccountId = parse(&id)?;
            service.delete_account(id).await?;
            writeln!(out, "Account {id} deleted.")?;
        }
    }
    Ok(())
}
