//! `commit` — drain the staging area into the object store, write a
//! commit record, and advance the current branch head.
//!
//! `commit` reads the *live working tree* for `directory_tree`, not the
//! staging snapshot (Open Question 1, resolved as documented divergence in
//! DESIGN.md): a file edited after `add` but before `commit` is recorded
//! at its current on-disk digest even though that digest was never staged.

use chrono::Local;
use uuid::Uuid;

use anyhow::Result;

use serde::{Deserialize, Serialize};

use crate::commit::{Commit, CommitLog, NULL_PARENT};
use crate::json;
use crate::object_store::ObjectStore;
use crate::refs::{Branch, CurrentBranch, RefManager};
use crate::repo::Repository;
use crate::snapshot;

fn current_timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

#[derive(Debug, Serialize, Deserialize)]
struct LatestCommit {
    commit_id: String,
    timestamp: String,
}

/// The full commit operation, parameterized with `additional_parents` so
/// `merge` can attach the source branch's head without duplicating this
/// logic.
pub fn commit_with_parents(
    repo: &Repository,
    message: &str,
    additional_parents: Vec<String>,
) -> Result<String> {
    let refs = RefManager::new(repo);
    let commit_log = CommitLog::new(repo);
    let store = ObjectStore::new(repo);

    let current = match refs.read_current()? {
        Some(current) => current,
        None => {
            let master = Branch {
                branch_name: "master".to_string(),
                head: String::new(),
                commits: vec![],
            };
            refs.write_branch(&master)?;
            let current = CurrentBranch {
                name: "master".to_string(),
                head: String::new(),
            };
            refs.write_current(&current)?;
            println!("Initialized repository with 'master' branch.");
            current
        }
    };

    let branch_name = current.name.clone();
    let parent = if current.head.is_empty() {
        NULL_PARENT.to_string()
    } else {
        current.head.clone()
    };

    let directory_tree = snapshot::capture_working_tree(repo)?;
    let staged = snapshot::staged_files(repo)?;
    let commit_id = Uuid::new_v4().to_string();

    let mut file_names = Vec::with_capacity(staged.len());
    let mut file_hashes = Vec::with_capacity(staged.len());
    for staged_file in &staged {
        let src = snapshot::slot_file_path(repo, &staged_file.digest, &staged_file.name);
        store.put(&src, &staged_file.digest, &branch_name, &commit_id)?;
        file_names.push(staged_file.name.clone());
        file_hashes.push(staged_file.digest.clone());
    }

    let commit = Commit {
        commit_id: commit_id.clone(),
        branch_name: branch_name.clone(),
        parent,
        additional_parents,
        directory_tree,
        file_names,
        file_hashes,
        message: message.to_string(),
        timestamp: current_timestamp(),
    };
    commit_log.write(&commit)?;

    let mut branch = refs.read_branch(&branch_name).unwrap_or(Branch {
        branch_name: branch_name.clone(),
        head: String::new(),
        commits: vec![],
    });
    branch.commits.push(commit_id.clone());
    branch.head = commit_id.clone();
    refs.write_branch(&branch)?;

    refs.write_current(&CurrentBranch {
        name: branch_name.clone(),
        head: commit_id.clone(),
    })?;

    json::write_pretty(
        &repo.latest_commit_path(),
        &LatestCommit {
            commit_id: commit_id.clone(),
            timestamp: commit.timestamp.clone(),
        },
    )?;

    snapshot::clear(repo)?;

    println!("[{branch_name} {commit_id}] {message}");
    println!(" {} file(s) staged", staged.len());

    Ok(commit_id)
}

pub fn run(repo: &Repository, message: &str) -> Result<String> {
    commit_with_parents(repo, message, Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn first_commit_creates_master_and_records_tree() {
        let dir = tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        fs::write(dir.path().join("a.txt"), b"hi").unwrap();
        crate::commands::add::run(&repo, "a.txt").unwrap();

        let commit_id = run(&repo, "first").unwrap();

        let refs = RefManager::new(&repo);
        let master = refs.read_branch("master").unwrap();
        assert_eq!(master.commits, vec![commit_id.clone()]);
        assert_eq!(master.head, commit_id);

        let commit = CommitLog::new(&repo).read(&commit_id).unwrap();
        assert!(commit.is_root());
        assert_eq!(
            commit.directory_tree.get("a.txt").unwrap(),
            &crate::hasher::hash_bytes(b"hi")
        );

        assert!(snapshot::staged_files(&repo).unwrap().is_empty());

        let latest: LatestCommit = json::read(&repo.latest_commit_path()).unwrap();
        assert_eq!(latest.commit_id, commit_id);
    }

    #[test]
    fn second_commit_chains_parent() {
        let dir = tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        fs::write(dir.path().join("a.txt"), b"hi").unwrap();
        crate::commands::add::run(&repo, "a.txt").unwrap();
        let first = run(&repo, "first").unwrap();

        fs::write(dir.path().join("b.txt"), b"bye").unwrap();
        crate::commands::add::run(&repo, "b.txt").unwrap();
        let second = run(&repo, "second").unwrap();

        let commit = CommitLog::new(&repo).read(&second).unwrap();
        assert_eq!(commit.parent, first);
        assert!(!commit.is_root());
    }
}
