//! `log` — print commits on the current branch, newest first.
//!
//! Reads the current branch's commit list directly (not a parent-chain
//! walk), matching the original `VCSCommands::log`; missing commit records
//! are warned about and skipped rather than aborting the whole command.

use anyhow::Result;

use crate::commit::CommitLog;
use crate::refs::RefManager;
use crate::repo::Repository;

pub fn run(repo: &Repository) -> Result<()> {
    let refs = RefManager::new(repo);
    let current = match refs.read_current()? {
        Some(current) => current,
        None => {
            println!("fatal: your current branch does not have any commits yet");
            return Ok(());
        }
    };

    let branch = refs.read_branch(&current.name)?;
    let commit_log = CommitLog::new(repo);

    for commit_id in branch.commits.iter().rev() {
        match commit_log.read(commit_id) {
            Ok(commit) => {
                println!("Commit ID: {}", commit.commit_id);
                println!("Timestamp: {}", commit.timestamp);
                println!("Message: {}", commit.message);
                println!("---");
            }
            Err(err) => {
                eprintln!("warning: skipping unreadable commit '{commit_id}': {err}");
            }
        }
    }

    Ok(())
}
