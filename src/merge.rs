//! # Merge engine
//!
//! `merge_tips` is the tip-only two-way comparison actually wired into the
//! `merge` command, matching the original's literal behavior.
//! `three_way_merge` is the base-aware algorithm described in §4.8's
//! second paragraph; it is implemented and tested but intentionally not
//! called from `merge` (see Open Question 5 in DESIGN.md).

use crate::refs::Branch;
use crate::repo::Repository;
use crate::snapshot::Snapshot;

pub struct MergeResult {
    pub snapshot: Snapshot,
    pub conflicts: Vec<String>,
}

pub struct MergeEngine<'a> {
    #[allow(dead_code)]
    repo: &'a Repository,
}

impl<'a> MergeEngine<'a> {
    pub fn new(repo: &'a Repository) -> Self {
        Self { repo }
    }

    /// The latest commit ID present in both branches' commit lists,
    /// scanning from the tail (most recent) toward the root.
    pub fn find_common_ancestor(&self, a: &Branch, b: &Branch) -> Option<String> {
        for c1 in a.commits.iter().rev() {
            for c2 in b.commits.iter().rev() {
                if c1 == c2 {
                    return Some(c1.clone());
                }
            }
        }
        None
    }

    /// Two-way merge of two tip snapshots: keys present in both with equal
    /// digests are kept; differing digests are reported as conflicts; keys
    /// unique to either side are carried into the result.
    pub fn merge_tips(&self, current: &Snapshot, source: &Snapshot) -> MergeResult {
        let mut merged = current.clone();
        let mut conflicts = Vec::new();
        for (path, source_digest) in source {
            match current.get(path) {
                Some(current_digest) if current_digest != source_digest => {
                    conflicts.push(path.clone());
                }
                Some(_) => {}
                None => {
                    merged.insert(path.clone(), source_digest.clone());
                }
            }
        }
        conflicts.sort();
        MergeResult {
            snapshot: merged,
            conflicts,
        }
    }

    /// Base-aware three-way merge of snapshot maps.
    pub fn three_way_merge(&self, base: &Snapshot, branch1: &Snapshot, branch2: &Snapshot) -> MergeResult {
        let mut merged = base.clone();
        let mut conflicts = Vec::new();

        for (key, base_value) in base {
            let v1 = branch1.get(key).cloned();
            let v2 = branch2.get(key).cloned();
            if v1 == v2 {
                match v1 {
                    Some(v) => {
                        merged.insert(key.clone(), v);
                    }
                    None => {
                        merged.remove(key);
                    }
                }
            } else if v1.as_ref() != Some(base_value) && v2.as_ref() == Some(base_value) {
                match v1 {
                    Some(v) => {
                        merged.insert(key.clone(), v);
                    }
                    None => {
                        merged.remove(key);
                    }
                }
            } else if v2.as_ref() != Some(base_value) && v1.as_ref() == Some(base_value) {
                match v2 {
                    Some(v) => {
                        merged.insert(key.clone(), v);
                    }
                    None => {
                        merged.remove(key);
                    }
                }
            } else {
                conflicts.push(key.clone());
                match v1 {
                    Some(v) => {
                        merged.insert(key.clone(), v);
                    }
                    None => {
                        merged.remove(key);
                    }
                }
            }
        }

        for (key, value) in branch1 {
            if !base.contains_key(key) {
                if let Some(v2) = branch2.get(key) {
                    if v2 != value {
                        conflicts.push(key.clone());
                    }
                }
                merged.insert(key.clone(), value.clone());
            }
        }
        for (key, value) in branch2 {
            if !base.contains_key(key) && !branch1.contains_key(key) {
                merged.insert(key.clone(), value.clone());
            }
        }

        conflicts.sort();
        conflicts.dedup();
        MergeResult {
            snapshot: merged,
            conflicts,
        }
    }
}
