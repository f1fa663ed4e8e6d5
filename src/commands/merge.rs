//! `merge` — two-way merge of the source branch's tip into the current
//! branch's tip, using `MergeEngine::merge_tips` (Open Question 5: the
//! base-aware `three_way_merge` is implemented but not wired here, matching
//! the original's literal tip-only comparison).
//!
//! Unlike the original, which stages merged paths without first writing
//! their content to the working tree, this materializes every merged path
//! to disk before staging it — otherwise source-only files would be
//! recorded in the commit's directory tree without ever existing on disk.
//!
//! The head-equality short-circuit alone doesn't give idempotence once the
//! current branch's head has moved to a merge commit: a second `merge` of
//! the same source would find heads unequal (the merge commit isn't the
//! source's head) but produce a merged snapshot identical to what's already
//! checked in. The second check below (`result.snapshot == current_tree`)
//! catches that case and reports "already merged" instead of committing a
//! content-identical merge commit.

use anyhow::Result;

use crate::commit::CommitLog;
use crate::error::VcsError;
use crate::merge::MergeEngine;
use crate::object_store::ObjectStore;
use crate::refs::RefManager;
use crate::repo::Repository;
use crate::snapshot;

use super::commit::commit_with_parents;

pub fn run(repo: &Repository, source_branch: &str) -> Result<()> {
    let refs = RefManager::new(repo);
    let current = refs.read_current()?.ok_or(VcsError::NotInitialized)?;
    let current_branch = refs.read_branch(&current.name)?;
    let source = refs.read_branch(source_branch)?;

    if current_branch.head == source.head {
        println!("Branches are already merged.");
        return Ok(());
    }

    let commit_log = CommitLog::new(repo);
    let current_tree = if current_branch.head.is_empty() {
        snapshot::Snapshot::new()
    } else {
        commit_log.read(&current_branch.head)?.directory_tree
    };
    let source_tree = if source.head.is_empty() {
        snapshot::Snapshot::new()
    } else {
        commit_log.read(&source.head)?.directory_tree
    };

    let engine = MergeEngine::new(repo);
    let result = engine.merge_tips(&current_tree, &source_tree);

    if !result.conflicts.is_empty() {
        for path in &result.conflicts {
            eprintln!("Conflict detected in file: {path}");
        }
        eprintln!("Merge aborted due to conflicts. Resolve them and commit manually.");
        return Err(VcsError::Conflict(result.conflicts).into());
    }

    if result.snapshot == current_tree {
        println!("Branches are already merged.");
        return Ok(());
    }

    let store = ObjectStore::new(repo);
    for (path, digest) in &result.snapshot {
        let dest = repo.root.join(path);
        store.materialize(digest, &dest)?;
        snapshot::stage(repo, path)?;
    }

    commit_with_parents(
        repo,
        &format!("Merged branch '{source_branch}' into '{}'", current.name),
        vec![source.head.clone()],
    )?;

    println!("Merged branch '{source_branch}' into '{}'.", current.name);
    Ok(())
}
