//! # Ref manager
//!
//! Branches are append-only named commit-ID sequences with a `head`
//! pointer; the current-branch pointer designates which branch the next
//! commit attaches to.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::error::VcsError;
use crate::json;
use crate::repo::Repository;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Branch {
    pub branch_name: String,
    pub head: String,
    pub commits: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CurrentBranch {
    pub name: String,
    pub head: String,
}

pub struct RefManager<'a> {
    repo: &'a Repository,
}

impl<'a> RefManager<'a> {
    pub fn new(repo: &'a Repository) -> Self {
        Self { repo }
    }

    fn branch_path(&self, name: &str) -> PathBuf {
        self.repo.branches_dir().join(format!("{name}.json"))
    }

    pub fn branch_exists(&self, name: &str) -> bool {
        self.branch_path(name).is_file()
    }

    pub fn read_branch(&self, name: &str) -> Result<Branch> {
        let path = self.branch_path(name);
        if !path.is_file() {
            return Err(VcsError::NoSuchBranch(name.to_string()).into());
        }
        json::read(&path)
    }

    pub fn write_branch(&self, branch: &Branch) -> Result<()> {
        json::write_pretty(&self.branch_path(&branch.branch_name), branch)
    }

    pub fn read_current(&self) -> Result<Option<CurrentBranch>> {
        let path = self.repo.current_branch_path();
        if !path.is_file() {
            return Ok(None);
        }
        Ok(Some(json::read(&path)?))
    }

    pub fn write_current(&self, current: &CurrentBranch) -> Result<()> {
        json::write_pretty(&self.repo.current_branch_path(), current)
    }

    /// Create a branch from the current branch's head and switch to it.
    /// This is the original's literal (if unusual) behavior: `branch`
    /// both creates and switches.
    pub fn create_branch(&self, name: &str) -> Result<Branch> {
        let current = self.read_current()?.ok_or(VcsError::NotInitialized)?;
        if self.branch_exists(name) {
            return Err(VcsError::BranchExists(name.to_string()).into());
        }
        let current_data = self.read_branch(&current.name)?;
        let new_branch = Branch {
            branch_name: name.to_string(),
            head: current_data.head.clone(),
            commits: current_data.commits.clone(),
        };
        self.write_branch(&new_branch)?;
        self.write_current(&CurrentBranch {
            name: name.to_string(),
            head: new_branch.head.clone(),
        })?;
        Ok(new_branch)
    }
}
