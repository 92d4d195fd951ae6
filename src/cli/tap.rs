//! Tap log commands

use anyhow::Result;
use clap::Subcommand;

use super::app::Context;
use crate::domain::{shard_file, Account, Tap};

#[derive(Subcommand)]
pub enum TapCommands {
    /// List a group's tap log
    List {
        /// Group id selecting the shard
        #[arg(long)]
        group: u64,
    },

    /// Record a tap
    Add {
        /// Group id selecting the shard
        #[arg(long)]
        group: u64,

        /// Email of the tapping account
        #[arg(long)]
        email: String,
    },

    /// Drop a group's tap log
    Clear {
        /// Group id selecting the shard
        #[arg(long)]
        group: u64,
    },
}

pub fn run(ctx: &Context, cmd: TapCommands) -> Result<()> {
    match cmd {
        TapCommands::List { group } => list(ctx, group),
        TapCommands::Add { group, email } => add(ctx, group, email),
        TapCommands::Clear { group } => clear(ctx, group),
    }
}

fn list(ctx: &Context, group: u64) -> Result<()> {
    let probe = Tap::for_group(group);
    let taps = ctx.shards.read_shard(&probe)?;

    if ctx.out.is_json() {
        return ctx.out.data(&taps);
    }

    if taps.is_empty() {
        println!("No taps for group {}", group);
        return Ok(());
    }
    for tap in taps {
        println!("{}  {}", tap.time.to_rfc3339(), tap.user.identifier());
    }
    Ok(())
}

fn add(ctx: &Context, group: u64, email: String) -> Result<()> {
    let tap = Tap::new(group, Account::with_email(email));

    ctx.locks
        .with_table(&shard_file(&tap), || ctx.shards.append(&tap))?;

    ctx.out.success(&format!("Tapped group {}", group));
    Ok(())
}

fn clear(ctx: &Context, group: u64) -> Result<()> {
    let probe = Tap::for_group(group);

    ctx.locks
        .with_table(&shard_file(&probe), || ctx.shards.clear_shard(&probe))?;

    ctx.out.success(&format!("Cleared taps for group {}", group));
    Ok(())
}
