//! # vcsr - a local, single-user version control engine
//!
//! vcsr tracks a working tree with content-addressed blob storage, branches,
//! and commits, the way an educational from-scratch VCS would, but keyed on
//! SHA-256 digests and flat path-to-digest snapshots rather than Git's
//! tree-object model.
//!
//! ## Repository layout
//!
//! ```text
//! .vcs/
//! ├── branches/<name>.json       # Branch { head, commits[] }
//! ├── commits/<commit_id>.json   # Commit records
//! ├── data/hash/<digest>/        # Content-addressed blob + reverse index
//! ├── staging/files/<digest>/    # Staged blobs awaiting commit
//! ├── staging/tree/              # Snapshot of the tree at last `add`
//! ├── current_branch/            # CurrentBranch { name, head }
//! └── latest_commit/             # LatestCommit { commit_id, timestamp }
//! ```
//!
//! ## Usage
//!
//! ```bash
//! vcsr init
//! vcsr add all
//! vcsr commit -m "first commit"
//! vcsr branch feature
//! vcsr checkout feature
//! vcsr merge master
//! vcsr log
//! vcsr graph
//! ```

pub mod commands;
pub mod commit;
pub mod dag;
pub mod error;
pub mod fs_adapter;
pub mod hasher;
pub mod json;
pub mod merge;
pub mod object_store;
pub mod refs;
pub mod repo;
pub mod restore;
pub mod snapshot;

pub use repo::Repository;
