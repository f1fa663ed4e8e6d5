//! `checkout` — switch to a branch and restore its head.

use anyhow::Result;

use crate::refs::{CurrentBranch, RefManager};
use crate::repo::Repository;
use crate::restore;

pub fn run(repo: &Repository, branch_name: &str) -> Result<()> {
    let refs = RefManager::new(repo);
    let branch = refs.read_branch(branch_name)?;

    if !branch.head.is_empty() {
        restore::restore(repo, &branch.head)?;
    }

    refs.write_current(&CurrentBranch {
        name: branch_name.to_string(),
        head: branch.head,
    })?;

    println!("Switched to branch '{branch_name}'.");
    Ok(())
}
