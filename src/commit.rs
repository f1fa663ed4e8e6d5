//! # Commit log
//!
//! Commit records are immutable once written. `parent` carries the
//! sentinel [`NULL_PARENT`] for the root commit; merge commits additionally
//! populate `additional_parents` with the source branch's head at merge
//! time.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::error::VcsError;
use crate::json;
use crate::repo::Repository;
use crate::snapshot::Snapshot;

pub const NULL_PARENT: &str = "null";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Commit {
    pub commit_id: String,
    pub branch_name: String,
    pub parent: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_parents: Vec<String>,
    pub directory_tree: Snapshot,
    pub file_names: Vec<String>,
    pub file_hashes: Vec<String>,
    pub message: String,
    pub timestamp: String,
}

impl Commit {
    /// All parent commit IDs: the primary parent (if not the root
    /// sentinel) followed by any additional (merge) parents.
    pub fn parents(&self) -> Vec<String> {
        let mut out = Vec::new();
        if self.parent != NULL_PARENT {
            out.push(self.parent.clone());
        }
        out.extend(self.additional_parents.iter().cloned());
        out
    }

    pub fn is_root(&self) -> bool {
        self.parent == NULL_PARENT
    }

    pub fn is_merge(&self) -> bool {
        !self.additional_parents.is_empty()
    }
}

pub struct CommitLog<'a> {
    repo: &'a Repository,
}

impl<'a> CommitLog<'a> {
    pub fn new(repo: &'a Repository) -> Self {
        Self { repo }
    }

    fn path(&self, commit_id: &str) -> PathBuf {
        self.repo.commits_dir().join(format!("{commit_id}.json"))
    }

    pub fn exists(&self, commit_id: &str) -> bool {
        self.path(commit_id).is_file()
    }

    pub fn write(&self, commit: &Commit) -> Result<()> {
        json::write_pretty(&self.path(&commit.commit_id), commit)
    }

    pub fn read(&self, commit_id: &str) -> Result<Commit> {
        let path = self.path(commit_id);
        if !path.is_file() {
            return Err(VcsError::NoSuchCommit(commit_id.to_string()).into());
        }
        json::read(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::Repository;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    fn sample_commit(id: &str) -> Commit {
        let mut tree = BTreeMap::new();
        tree.insert("a.txt".to_string(), "deadbeef".to_string());
        Commit {
            commit_id: id.to_string(),
            branch_name: "master".to_string(),
            parent: NULL_PARENT.to_string(),
            additional_parents: vec![],
            directory_tree: tree,
            file_names: vec!["a.txt".to_string()],
            file_hashes: vec!["deadbeef".to_string()],
            message: "first".to_string(),
            timestamp: "2026-01-01 00:00:00".to_string(),
        }
    }

    #[test]
    fn write_then_read_round_trips() {
        let dir = tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        let log = CommitLog::new(&repo);
        let commit = sample_commit("c1");
        log.write(&commit).unwrap();
        let back = log.read("c1").unwrap();
        assert_eq!(back.commit_id, "c1");
        assert!(back.is_root());
        assert!(!back.is_merge());
    }

    #[test]
    fn reading_unknown_commit_fails() {
        let dir = tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        let log = CommitLog::new(&repo);
        let err = log.read("nope").unwrap_err();
        assert!(err.to_string().contains("no such commit"));
    }

    #[test]
    fn merge_commit_reports_all_parents() {
        let mut commit = sample_commit("c2");
        commit.parent = "c1".to_string();
        commit.additional_parents = vec!["c-feature".to_string()];
        assert!(commit.is_merge());
        assert_eq!(commit.parents(), vec!["c1".to_string(), "c-feature".to_string()]);
    }
}
