//! # Snapshot builder and staging area
//!
//! A snapshot is a (path -> digest) map of the working tree, excluding
//! repository-internal paths. Staging is a transient per-digest store on
//! disk under `staging/files/<digest>/`, plus a captured snapshot of the
//! working tree at the moment of the most recent `add`, written to
//! `staging/tree/staging_tree.json`.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::fs_adapter;
use crate::hasher;
use crate::json;
use crate::repo::Repository;

pub type Snapshot = BTreeMap<String, String>;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StagingMetadata {
    pub name: String,
    pub hash: String,
}

#[derive(Debug, Clone)]
pub struct StagedFile {
    pub digest: String,
    pub name: String,
}

/// Walk the working tree and hash every eligible file.
pub fn capture_working_tree(repo: &Repository) -> Result<Snapshot> {
    let mut snapshot = Snapshot::new();
    for rel in fs_adapter::walk_recursive(&repo.root)? {
        let abs = repo.root.join(&rel);
        let digest = hasher::hash_file(&abs)?;
        snapshot.insert(rel, digest);
    }
    Ok(snapshot)
}

fn slot_dir(repo: &Repository, digest: &str) -> PathBuf {
    repo.staging_files_dir().join(digest)
}

pub fn slot_file_path(repo: &Repository, digest: &str, name: &str) -> PathBuf {
    slot_dir(repo, digest).join(name)
}

fn stage_one(repo: &Repository, rel_path: &str) -> Result<()> {
    let abs_path = repo.root.join(rel_path);
    let content = fs::read(&abs_path)?;
    let digest = hasher::hash_bytes(&content);

    let base_name = std::path::Path::new(rel_path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| rel_path.to_string());

    let dir = slot_dir(repo, &digest);
    fs_adapter::mkdir_p(&dir)?;
    fs_adapter::copy_file(&abs_path, &dir.join(&base_name))?;
    json::write_pretty(
        &dir.join("metadata.json"),
        &StagingMetadata {
            name: base_name,
            hash: digest,
        },
    )?;
    Ok(())
}

fn write_staging_tree(repo: &Repository) -> Result<()> {
    let snapshot = capture_working_tree(repo)?;
    json::write_pretty(&repo.staging_tree_path(), &snapshot)
}

/// Stage `path`, or every eligible file when `path == "all"`. Paths under
/// the repository-internal directory or naming the tool's own executable
/// are rejected with a warning rather than an error.
pub fn stage(repo: &Repository, path: &str) -> Result<()> {
    if path == "all" {
        for rel in fs_adapter::walk_recursive(&repo.root)? {
            stage_one(repo, &rel)?;
        }
    } else {
        let normalized = fs_adapter::normalize_path(path);
        if fs_adapter::is_excluded(&normalized) {
            eprintln!(
                "warning: refusing to stage repository-internal path '{}'",
                path
            );
        } else {
            stage_one(repo, &normalized)?;
        }
    }
    write_staging_tree(repo)?;
    Ok(())
}

/// Enumerate the files currently staged, reading each slot's metadata.
pub fn staged_files(repo: &Repository) -> Result<Vec<StagedFile>> {
    let dir = repo.staging_files_dir();
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut out = Vec::new();
    for entry in fs::read_dir(&dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let digest = entry.file_name().to_string_lossy().into_owned();
        let meta_path = entry.path().join("metadata.json");
        if !meta_path.is_file() {
            continue;
        }
        let meta: StagingMetadata = json::read(&meta_path)?;
        out.push(StagedFile {
            digest,
            name: meta.name,
        });
    }
    out.sort_by(|a, b| a.digest.cmp(&b.digest));
    Ok(out)
}

/// Delete every staged file and the staging snapshot file.
pub fn clear(repo: &Repository) -> Result<()> {
    fs_adapter::remove_tree(&repo.staging_files_dir())?;
    fs_adapter::mkdir_p(&repo.staging_files_dir())?;
    let tree_path = repo.staging_tree_path();
    if tree_path.exists() {
        fs::remove_file(&tree_path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn stage_all_excludes_vcs_dir() {
        let dir = tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        fs::write(dir.path().join("a.txt"), b"hi").unwrap();

        stage(&repo, "all").unwrap();

        let staged = staged_files(&repo).unwrap();
        assert_eq!(staged.len(), 1);
        assert_eq!(staged[0].name, "a.txt");

        let tree: Snapshot = json::read(&repo.staging_tree_path()).unwrap();
        assert!(tree.contains_key("a.txt"));
        assert!(!tree.keys().any(|k| k.starts_with(".vcs")));
    }

    #[test]
    fn stage_single_path() {
        let dir = tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        fs::write(dir.path().join("a.txt"), b"hi").unwrap();
        fs::write(dir.path().join("b.txt"), b"bye").unwrap();

        stage(&repo, "a.txt").unwrap();

        let staged = staged_files(&repo).unwrap();
        assert_eq!(staged.len(), 1);
        assert_eq!(staged[0].name, "a.txt");
    }

    #[test]
    fn clear_empties_staging_area() {
        let dir = tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        fs::write(dir.path().join("a.txt"), b"hi").unwrap();
        stage(&repo, "all").unwrap();

        clear(&repo).unwrap();

        assert!(staged_files(&repo).unwrap().is_empty());
        assert!(!repo.staging_tree_path().exists());
    }
}
