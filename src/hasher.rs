//! # Hasher
//!
//! A deterministic 256-bit content digest rendered as 64 lowercase hex
//! characters, computed over the whole byte stream. Streaming is not
//! needed at this scale.

use std::path::Path;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};

pub fn hash_bytes(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}

pub fn hash_file(path: &Path) -> Result<String> {
    let content =
        std::fs::read(path).with_context(|| format!("failed to read '{}'", path.display()))?;
    Ok(hash_bytes(&content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_bytes_hash_equal() {
        assert_eq!(hash_bytes(b"hello"), hash_bytes(b"hello"));
    }

    #[test]
    fn different_bytes_hash_differ() {
        assert_ne!(hash_bytes(b"hello"), hash_bytes(b"world"));
    }

    #[test]
    fn empty_input_has_well_known_digest() {
        let digest = hash_bytes(b"");
        assert_eq!(digest.len(), 64);
        assert_eq!(
            digest,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn hash_file_matches_hash_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, b"hi").unwrap();
        assert_eq!(hash_file(&path).unwrap(), hash_bytes(b"hi"));
    }
}
