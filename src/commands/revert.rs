//! `revert` — restore the working tree to a past commit and move the
//! current branch's head there, without truncating its commit history
//! (Open Question 3: `commits` stays append-only, `head` moves back).

use anyhow::Result;

use crate::commit::CommitLog;
use crate::refs::RefManager;
use crate::repo::Repository;
use crate::restore;
use crate::snapshot;

pub fn run(repo: &Repository, commit_id: &str) -> Result<()> {
    CommitLog::new(repo).read(commit_id)?;

    restore::restore(repo, commit_id)?;
    snapshot::stage(repo, "all")?;

    let refs = RefManager::new(repo);
    if let Some(mut current) = refs.read_current()? {
        current.head = commit_id.to_string();
        refs.write_current(&current)?;

        let mut branch = refs.read_branch(&current.name)?;
        branch.head = commit_id.to_string();
        refs.write_branch(&branch)?;
    }

    println!("Reverted to commit '{commit_id}'.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn revert_unknown_commit_fails() {
        let dir = tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        assert!(run(&repo, "nope").is_err());
    }

    #[test]
    fn revert_restores_tree_and_moves_head_without_truncating_commits() {
        let dir = tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();

        fs::write(dir.path().join("a.txt"), b"v1").unwrap();
        crate::commands::add::run(&repo, "a.txt").unwrap();
        let first = crate::commands::commit::run(&repo, "first").unwrap();

        fs::write(dir.path().join("a.txt"), b"v2").unwrap();
        crate::commands::add::run(&repo, "a.txt").unwrap();
        let second = crate::commands::commit::run(&repo, "second").unwrap();

        run(&repo, &first).unwrap();

        assert_eq!(fs::read(dir.path().join("a.txt")).unwrap(), b"v1");

        let refs = RefManager::new(&repo);
        let current = refs.read_current().unwrap().unwrap();
        assert_eq!(current.head, first);

        let branch = refs.read_branch("master").unwrap();
        assert_eq!(branch.head, first);
        assert_eq!(branch.commits, vec![first, second]);
    }
}
