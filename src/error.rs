//! # Error Kinds
//!
//! The typed error surface of the core engine. Commands wrap these in
//! `anyhow::Context` as they propagate up to the CLI; the kinds themselves
//! stay plain data so the merge engine can report `Conflict` as a result
//! rather than unwinding through it.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VcsError {
    #[error("not initialized: no active branch for this repository")]
    NotInitialized,

    #[error("no such branch: '{0}'")]
    NoSuchBranch(String),

    #[error("a branch named '{0}' already exists")]
    BranchExists(String),

    #[error("no such commit: '{0}'")]
    NoSuchCommit(String),

    #[error("malformed record at {path}: {reason}")]
    MalformedRecord { path: PathBuf, reason: String },

    #[error("missing blob for digest '{0}'")]
    MissingBlob(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("merge conflict in {} path(s)", .0.len())]
    Conflict(Vec<String>),
}
