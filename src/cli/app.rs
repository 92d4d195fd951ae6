//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use super::output::{Output, OutputFormat};
use super::{account, group, tap};
use crate::domain::{Account, Group, Invitation};
use crate::storage::{IdAllocator, LockRegistry, ShardStore, StoreConfig, TableStore};

#[derive(Parser)]
#[command(name = "tapstore")]
#[command(author, version, about = "Inspect and administer a tapstore data directory")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Data directory holding the table files
    #[arg(long, global = true, env = "TAPSTORE_DATA")]
    pub data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage accounts
    #[command(subcommand)]
    Account(account::AccountCommands),

    /// Manage groups
    #[command(subcommand)]
    Group(group::GroupCommands),

    /// List pending invitations
    Invitations,

    /// Manage tap logs
    #[command(subcommand)]
    Tap(tap::TapCommands),

    /// Drop a whole table
    Clear {
        /// Table to drop
        table: ClearTable,
    },
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ClearTable {
    Accounts,
    Groups,
    Invitations,
}

/// Everything a command needs to talk to the store.
pub struct Context {
    pub tables: TableStore,
    pub shards: ShardStore,
    pub locks: LockRegistry,
    pub ids: IdAllocator,
    pub out: Output,
}

/// Parses arguments and executes the appropriate command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = StoreConfig::resolve(cli.data_dir)?;
    let ctx = Context {
        tables: TableStore::new(&config.data_dir),
        shards: ShardStore::new(&config.data_dir),
        locks: LockRegistry::new(),
        ids: IdAllocator::new(),
        out: Output::new(cli.format),
    };

    match cli.command {
        Commands::Account(cmd) => account::run(&ctx, cmd),
        Commands::Group(cmd) => group::run(&ctx, cmd),
        Commands::Invitations => list_invitations(&ctx),
        Commands::Tap(cmd) => tap::run(&ctx, cmd),
        Commands::Clear { table } => clear_table(&ctx, table),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("tapstore=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tapstore=warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn list_invitations(ctx: &Context) -> Result<()> {
    let invitations = ctx.tables.read_all::<Invitation>()?;

    if ctx.out.is_json() {
        return ctx.out.data(&invitations);
    }

    if invitations.is_empty() {
        println!("No invitations");
        return Ok(());
    }
    for invitation in invitations {
        println!(
            "{} -> {} ({})",
            invitation.email, invitation.group_name, invitation.group_id
        );
    }
    Ok(())
}

fn clear_table(ctx: &Context, table: ClearTable) -> Result<()> {
    match table {
        ClearTable::Accounts => ctx.tables.clear::<Account>()?,
        ClearTable::Groups => ctx.tables.clear::<Group>()?,
        ClearTable::Invitations => ctx.tables.clear::<Invitation>()?,
    }
    ctx.out.success("Table cleared");
    Ok(())
}
