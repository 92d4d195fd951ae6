//! Account commands

use anyhow::{bail, Result};
use clap::Subcommand;

use super::app::Context;
use crate::domain::{table_file, Account};

#[derive(Subcommand)]
pub enum AccountCommands {
    /// List all accounts
    List,

    /// Add an account
    Add {
        /// Email address, the account's key
        email: String,

        /// Optional display tag
        #[arg(long)]
        tag: Option<String>,
    },

    /// Remove an account
    Remove {
        /// Email address of the account to remove
        email: String,
    },
}

pub fn run(ctx: &Context, cmd: AccountCommands) -> Result<()> {
    match cmd {
        AccountCommands::List => list(ctx),
        AccountCommands::Add { email, tag } => add(ctx, email, tag),
        AccountCommands::Remove { email } => remove(ctx, &email),
    }
}

fn list(ctx: &Context) -> Result<()> {
    let accounts = ctx.tables.read_all::<Account>()?;

    if ctx.out.is_json() {
        return ctx.out.data(&accounts);
    }

    if accounts.is_empty() {
        println!("No accounts");
        return Ok(());
    }
    for account in accounts {
        println!("{} ({})", account.email, account.identifier());
    }
    Ok(())
}

fn add(ctx: &Context, email: String, tag: Option<String>) -> Result<()> {
    let account = Account { tag, ..Account::with_email(email) };

    // Check-then-save must not interleave with another writer.
    ctx.locks.with_table(&table_file::<Account>(), || {
        if ctx.tables.exists(&account)? {
            bail!("Account {} already exists", account.email);
        }
        ctx.tables.save(&account)?;
        Ok(())
    })?;

    ctx.out.success(&format!("Added account {}", account.email));
    Ok(())
}

fn remove(ctx: &Context, email: &str) -> Result<()> {
    let probe = Account::with_email(email);

    ctx.locks
        .with_table(&table_file::<Account>(), || ctx.tables.delete(&probe))?;

    ctx.out.success(&format!("Removed account {}", email));
    Ok(())
}
