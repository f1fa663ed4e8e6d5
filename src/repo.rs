//! # Repository handle
//!
//! The repository root is process-wide state threaded explicitly through
//! every component rather than hard-coded, per the "Global state"
//! re-architecture note: a `Repository` is constructed once at command
//! entry and passed by reference from there on.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::fs_adapter;

pub const VCS_DIR: &str = ".vcs";

/// A located repository: a working-tree root and its `.vcs` directory.
#[derive(Debug, Clone)]
pub struct Repository {
    pub root: PathBuf,
    pub vcs_dir: PathBuf,
}

impl Repository {
    /// Search the current directory and its ancestors for a `.vcs` directory.
    pub fn find() -> Result<Self> {
        let cwd = env::current_dir().context("failed to read current directory")?;
        Self::find_from(&cwd)
    }

    pub fn find_from(start: &Path) -> Result<Self> {
        let mut dir = start.to_path_buf();
        loop {
            let candidate = dir.join(VCS_DIR);
            if candidate.is_dir() {
                return Ok(Self {
                    root: dir,
                    vcs_dir: candidate,
                });
            }
            if !dir.pop() {
                bail!(
                    "not a vcsr repository (or any of the parent directories): {}",
                    VCS_DIR
                );
            }
        }
    }

    /// Create the repository layout under `path`, which must not already
    /// contain a `.vcs` directory.
    pub fn init(path: &Path) -> Result<Self> {
        let root = path.to_path_buf();
        let vcs_dir = root.join(VCS_DIR);
        if vcs_dir.exists() {
            bail!("repository already initialized at {}", vcs_dir.display());
        }

        fs_adapter::mkdir_p(&vcs_dir.join("branches"))?;
        fs_adapter::mkdir_p(&vcs_dir.join("commits"))?;
        fs_adapter::mkdir_p(&vcs_dir.join("data").join("hash"))?;
        fs_adapter::mkdir_p(&vcs_dir.join("staging").join("files"))?;
        fs_adapter::mkdir_p(&vcs_dir.join("staging").join("tree"))?;
        fs_adapter::mkdir_p(&vcs_dir.join("current_branch"))?;
        fs_adapter::mkdir_p(&vcs_dir.join("latest_commit"))?;

        Ok(Self { root, vcs_dir })
    }

    pub fn branches_dir(&self) -> PathBuf {
        self.vcs_dir.join("branches")
    }

    pub fn commits_dir(&self) -> PathBuf {
        self.vcs_dir.join("commits")
    }

    pub fn data_hash_dir(&self) -> PathBuf {
        self.vcs_dir.join("data").join("hash")
    }

    pub fn staging_files_dir(&self) -> PathBuf {
        self.vcs_dir.join("staging").join("files")
    }

    pub fn staging_tree_path(&self) -> PathBuf {
        self.vcs_dir
            .join("staging")
            .join("tree")
            .join("staging_tree.json")
    }

    pub fn current_branch_path(&self) -> PathBuf {
        self.vcs_dir
            .join("current_branch")
            .join("current_branch.json")
    }

    pub fn latest_commit_path(&self) -> PathBuf {
        self.vcs_dir
            .join("latest_commit")
            .join("latest_commit.json")
    }
}
