//! # Materialization primitive
//!
//! Shared by `checkout` and `revert`: destructively replace the working
//! tree with the snapshot of a target commit.

use std::fs;

use anyhow::Result;

use crate::commit::CommitLog;
use crate::fs_adapter;
use crate::object_store::ObjectStore;
use crate::repo::Repository;

/// Remove every entry of the working directory other than the
/// repository-internal directory.
fn clear_working_tree(repo: &Repository) -> Result<()> {
    for entry in fs::read_dir(&repo.root)? {
        let entry = entry?;
        if entry.file_name() == crate::repo::VCS_DIR {
            continue;
        }
        let path = entry.path();
        if path.is_dir() {
            fs_adapter::remove_tree(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
    }
    Ok(())
}

/// Replace the working tree with the snapshot of `commit_id`. Individual
/// missing blobs are logged and skipped rather than aborting the whole
/// restore, per the error-handling design for materialization failures.
pub fn restore(repo: &Repository, commit_id: &str) -> Result<()> {
    let commit_log = CommitLog::new(repo);
    let commit = commit_log.read(commit_id)?;

    clear_working_tree(repo)?;

    let store = ObjectStore::new(repo);
    for (path, digest) in &commit.directory_tree {
        let normalized = fs_adapter::normalize_path(path);
        if fs_adapter::is_excluded(&normalized) {
            continue;
        }
        let dest = repo.root.join(&normalized);
        match store.materialize(digest, &dest) {
            Ok(()) => println!("Restored: {normalized}"),
            Err(err) => eprintln!("warning: failed to restore '{normalized}': {err}"),
        }
    }

    if let Some(exe_name) = fs_adapter::current_exe_name() {
        if !commit.directory_tree.contains_key(&exe_name) {
            let exe_path = repo.root.join(&exe_name);
            if exe_path.is_file() {
                let _ = fs::remove_file(&exe_path);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commit::{Commit, NULL_PARENT};
    use crate::snapshot::Snapshot;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    fn commit_with_blob(repo: &Repository, id: &str, path: &str, content: &[u8]) -> Commit {
        let digest = crate::hasher::hash_bytes(content);
        let src = repo.root.join("tmp_src");
        fs::write(&src, content).unwrap();
        ObjectStore::new(repo).put(&src, &digest, "master", id).unwrap();
        fs::remove_file(&src).unwrap();

        let mut tree: Snapshot = BTreeMap::new();
        tree.insert(path.to_string(), digest.clone());
        let commit = Commit {
            commit_id: id.to_string(),
            branch_name: "master".to_string(),
            parent: NULL_PARENT.to_string(),
            additional_parents: vec![],
            directory_tree: tree,
            file_names: vec![path.to_string()],
            file_hashes: vec![digest],
            message: "m".to_string(),
            timestamp: "2026-01-01 00:00:00".to_string(),
        };
        CommitLog::new(repo).write(&commit).unwrap();
        commit
    }

    #[test]
    fn restore_materializes_snapshot_and_clears_other_files() {
        let dir = tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        commit_with_blob(&repo, "c1", "a.txt", b"hi");

        fs::write(dir.path().join("stray.txt"), b"stray").unwrap();

        restore(&repo, "c1").unwrap();

        assert_eq!(fs::read(dir.path().join("a.txt")).unwrap(), b"hi");
        assert!(!dir.path().join("stray.txt").exists());
    }

    #[test]
    fn restore_unknown_commit_fails() {
        let dir = tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        assert!(restore(&repo, "nope").is_err());
    }
}
