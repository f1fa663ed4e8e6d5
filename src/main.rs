//! vcsr - a local, single-user version control engine with branches and
//! three-way merge.
//!
//! Created by Sudeep Ranjan Sahoo
//! GitHub: https://github.com/srs-sudeep

use clap::{Parser, Subcommand};
use anyhow::Result;

use vcsr::commands;
use vcsr::repo::Repository;

/// vcsr - a local, single-user version control engine
#[derive(Parser)]
#[command(name = "vcsr")]
#[command(author = "Sudeep Ranjan Sahoo <sudeep.ranjan.sahoo@example.com>")]
#[command(version = "0.1.0")]
#[command(about = "A local, single-user version control engine with branches and three-way merge", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new repository in the current directory
    Init,

    /// Stage a file, or every eligible file when PATH is "all"
    Add {
        /// File path to stage, or "all"
        path: String,
    },

    /// Record a commit from the staging area
    Commit {
        /// The commit message
        #[arg(short, long)]
        message: String,
    },

    /// Create a branch from the current head and switch to it
    Branch {
        /// Name of the branch to create
        name: String,
    },

    /// Switch to a branch and restore its head
    Checkout {
        /// Name of the branch to switch to
        name: String,
    },

    /// Restore the working tree to a past commit
    Revert {
        /// The commit to revert to
        commit_id: String,
    },

    /// Merge a branch's tip into the current branch
    Merge {
        /// Name of the branch to merge from
        source_branch: String,
    },

    /// Show the current branch's commit history, newest first
    Log,

    /// Print the commit history graph and write it as Graphviz DOT
    Graph,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Init = cli.command {
        commands::init::run()?;
        return Ok(());
    }

    let repo = Repository::find()?;

    match cli.command {
        Commands::Init => unreachable!(),
        Commands::Add { path } => commands::add::run(&repo, &path)?,
        Commands::Commit { message } => {
            commands::commit::run(&repo, &message)?;
        }
        Commands::Branch { name } => commands::branch::run(&repo, &name)?,
        Commands::Checkout { name } => commands::checkout::run(&repo, &name)?,
        Commands::Revert { commit_id } => commands::revert::run(&repo, &commit_id)?,
        Commands::Merge { source_branch } => commands::merge::run(&repo, &source_branch)?,
        Commands::Log => commands::log::run(&repo)?,
        Commands::Graph => commands::graph::run(&repo)?,
    }

    Ok(())
}
