//! `branch` — create a branch from the current head and switch to it.
//!
//! Switching to the newly created branch is the original's literal (if
//! unusual) behavior, preserved per Open Question 2.

use anyhow::Result;

use crate::refs::RefManager;
use crate::repo::Repository;

pub fn run(repo: &Repository, name: &str) -> Result<()> {
    let refs = RefManager::new(repo);
    refs.create_branch(name)?;
    println!("Created a new branch: {name} and set it as the current branch.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refs::{Branch, CurrentBranch};
    use tempfile::tempdir;

    #[test]
    fn branch_creates_and_switches() {
        let dir = tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        let refs = RefManager::new(&repo);
        refs.write_branch(&Branch {
            branch_name: "master".to_string(),
            head: "c1".to_string(),
            commits: vec!["c1".to_string()],
        })
        .unwrap();
        refs.write_current(&CurrentBranch {
            name: "master".to_string(),
            head: "c1".to_string(),
        })
        .unwrap();

        run(&repo, "feature").unwrap();

        let current = refs.read_current().unwrap().unwrap();
        assert_eq!(current.name, "feature");
        let feature = refs.read_branch("feature").unwrap();
        assert_eq!(feature.head, "c1");
    }

    #[test]
    fn duplicate_branch_name_fails() {
        let dir = tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        let refs = RefManager::new(&repo);
        refs.write_branch(&Branch {
            branch_name: "master".to_string(),
            head: String::new(),
            commits: vec![],
        })
        .unwrap();
        refs.write_current(&CurrentBranch {
            name: "master".to_string(),
            head: String::new(),
        })
        .unwrap();

        run(&repo, "master").unwrap_err();
    }
}

