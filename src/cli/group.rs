//! Group commands

use anyhow::Result;
use clap::Subcommand;

use super::app::Context;
use crate::domain::{table_file, Group};

#[derive(Subcommand)]
pub enum GroupCommands {
    /// List all groups
    List,

    /// Show one group
    Show {
        /// Group id
        id: u64,
    },

    /// Create a group with a freshly allocated id
    Add {
        /// Group name
        #[arg(long)]
        name: String,

        /// Group emoji
        #[arg(long)]
        emoji: String,

        /// Optional description
        #[arg(long)]
        description: Option<String>,

        /// Owner email
        #[arg(long)]
        owner: Option<String>,
    },

    /// Remove a group
    Remove {
        /// Group id
        id: u64,
    },
}

pub fn run(ctx: &Context, cmd: GroupCommands) -> Result<()> {
    match cmd {
        GroupCommands::List => list(ctx),
        GroupCommands::Show { id } => show(ctx, id),
        GroupCommands::Add {
            name,
            emoji,
            description,
            owner,
        } => add(ctx, name, emoji, description, owner),
        GroupCommands::Remove { id } => remove(ctx, id),
    }
}

fn list(ctx: &Context) -> Result<()> {
    let groups = ctx.tables.read_all::<Group>()?;

    if ctx.out.is_json() {
        return ctx.out.data(&groups);
    }

    if groups.is_empty() {
        println!("No groups");
        return Ok(());
    }
    for group in groups {
        println!(
            "{:>4}  {} {} ({} members)",
            group.id,
            group.emoji,
            group.name,
            group.members.len()
        );
    }
    Ok(())
}

fn show(ctx: &Context, id: u64) -> Result<()> {
    let group = ctx.tables.read(&Group::with_id(id))?;

    if ctx.out.is_json() {
        return ctx.out.data(&group);
    }

    println!("{} {} (id {})", group.emoji, group.name, group.id);
    if let Some(description) = &group.description {
        println!("{}", description);
    }
    if let Some(owner) = &group.owner {
        println!("Owner: {}", owner);
    }
    for member in &group.members {
        println!("Member: {}", member.identifier());
    }
    for invite in &group.invites {
        println!("Invited: {}", invite.identifier());
    }
    Ok(())
}

fn add(
    ctx: &Context,
    name: String,
    emoji: String,
    description: Option<String>,
    owner: Option<String>,
) -> Result<()> {
    // Allocate-then-save is one critical section.
    let group = ctx.locks.with_table(&table_file::<Group>(), || {
        let group = Group {
            id: ctx.ids.next_id::<Group>(&ctx.tables)?,
            name,
            emoji,
            description,
            owner,
            ..Group::default()
        };
        ctx.tables.save(&group)?;
        Ok::<_, anyhow::Error>(group)
    })?;

    ctx.out
        .success(&format!("Created group {} with id {}", group.name, group.id));
    Ok(())
}

fn remove(ctx: &Context, id: u64) -> Result<()> {
    ctx.locks.with_table(&table_file::<Group>(), || {
        ctx.tables.delete(&Group::with_id(id))
    })?;

    ctx.out.success(&format!("Removed group {}", id));
    Ok(())
}
