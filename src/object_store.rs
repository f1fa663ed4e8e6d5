//! # Content-addressed object store
//!
//! Layout: `data/hash/<digest>/<original_basename>` holds the blob,
//! `data/hash/<digest>/hash.json` holds the reverse-index metadata. Blob
//! bytes are written once and never mutated; `put` on an existing digest
//! only updates the metadata.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::error::VcsError;
use crate::fs_adapter;
use crate::json;
use crate::repo::Repository;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct BlobMetadata {
    pub file_name: String,
    pub file_hash: String,
    pub branches: Vec<String>,
    pub commit_ids: Vec<String>,
}

pub struct ObjectStore<'a> {
    repo: &'a Repository,
}

impl<'a> ObjectStore<'a> {
    pub fn new(repo: &'a Repository) -> Self {
        Self { repo }
    }

    fn digest_dir(&self, digest: &str) -> PathBuf {
        self.repo.data_hash_dir().join(digest)
    }

    fn metadata_path(&self, digest: &str) -> PathBuf {
        self.digest_dir(digest).join("hash.json")
    }

    /// Register `src_path` (whose content hashes to `digest`) as having
    /// been referenced by `branch`/`commit_id`. The blob is copied in only
    /// on first insertion; later calls only touch the metadata.
    pub fn put(&self, src_path: &Path, digest: &str, branch: &str, commit_id: &str) -> Result<()> {
        let dir = self.digest_dir(digest);
        let meta_path = self.metadata_path(digest);

        if !dir.is_dir() {
            fs_adapter::mkdir_p(&dir)?;
            let file_name = src_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| digest.to_string());
            fs_adapter::copy_file(src_path, &dir.join(&file_name))?;
            let meta = BlobMetadata {
                file_name,
                file_hash: digest.to_string(),
                branches: vec![branch.to_string()],
                commit_ids: vec![commit_id.to_string()],
            };
            json::write_pretty(&meta_path, &meta)?;
        } else {
            let mut meta: BlobMetadata = json::read(&meta_path)?;
            if !meta.branches.iter().any(|b| b == branch) {
                meta.branches.push(branch.to_string());
            }
            meta.commit_ids.push(commit_id.to_string());
            json::write_pretty(&meta_path, &meta)?;
        }
        Ok(())
    }

    /// Copy the blob for `digest` to `dest_path`, creating parent
    /// directories as needed.
    pub fn materialize(&self, digest: &str, dest_path: &Path) -> Result<()> {
        let dir = self.digest_dir(digest);
        let blob_path = fs::read_dir(&dir)
            .ok()
            .into_iter()
            .flatten()
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .find(|p| p.is_file() && p.file_name().map(|n| n != "hash.json").unwrap_or(false));

        let blob_path = blob_path.ok_or_else(|| VcsError::MissingBlob(digest.to_string()))?;
        fs_adapter::copy_file(&blob_path, dest_path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::Repository;
    use tempfile::tempdir;

    #[test]
    fn put_then_materialize_round_trips() {
        let dir = tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        let src = dir.path().join("a.txt");
        fs::write(&src, b"hi").unwrap();
        let digest = crate::hasher::hash_bytes(b"hi");

        let store = ObjectStore::new(&repo);
        store.put(&src, &digest, "master", "c1").unwrap();

        let dest = dir.path().join("restored.txt");
        store.materialize(&digest, &dest).unwrap();
        assert_eq!(fs::read(&dest).unwrap(), b"hi");
    }

    #[test]
    fn put_twice_unions_reverse_index_without_rewriting_blob() {
        let dir = tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        let src = dir.path().join("a.txt");
        fs::write(&src, b"hi").unwrap();
        let digest = crate::hasher::hash_bytes(b"hi");

        let store = ObjectStore::new(&repo);
        store.put(&src, &digest, "master", "c1").unwrap();
        store.put(&src, &digest, "feature", "c2").unwrap();
        store.put(&src, &digest, "master", "c3").unwrap();

        let meta: BlobMetadata = json::read(&repo.data_hash_dir().join(&digest).join("hash.json")).unwrap();
        assert_eq!(meta.branches, vec!["master".to_string(), "feature".to_string()]);
        assert_eq!(meta.commit_ids, vec!["c1".to_string(), "c2".to_string(), "c3".to_string()]);
    }

    #[test]
    fn materialize_missing_digest_fails() {
        let dir = tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        let store = ObjectStore::new(&repo);
        let err = store
            .materialize("deadbeef", &dir.path().join("x"))
            .unwrap_err();
        assert!(err.to_string().contains("missing blob"));
    }
}
