//! # Filesystem adapter
//!
//! Path-normalized directory traversal, read/write/copy, recursive create
//! and delete. This is the single place that knows which paths are
//! repository-internal (`.vcs/...`) or the tool's own executable, so every
//! other module excludes them by calling into here rather than
//! re-implementing the rule.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use walkdir::WalkDir;

use crate::repo::VCS_DIR;

pub fn mkdir_p(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .with_context(|| format!("failed to create directory '{}'", path.display()))
}

pub fn exists(path: &Path) -> bool {
    path.exists()
}

pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read '{}'", path.display()))
}

pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("failed to read '{}'", path.display()))
}

pub fn write_text(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        mkdir_p(parent)?;
    }
    fs::write(path, content).with_context(|| format!("failed to write '{}'", path.display()))
}

pub fn write_bytes(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        mkdir_p(parent)?;
    }
    fs::write(path, content).with_context(|| format!("failed to write '{}'", path.display()))
}

/// Copy `src` to `dst`, overwriting `dst` and creating its parent
/// directories as needed.
pub fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    if let Some(parent) = dst.parent() {
        mkdir_p(parent)?;
    }
    fs::copy(src, dst)
        .with_context(|| format!("failed to copy '{}' to '{}'", src.display(), dst.display()))?;
    Ok(())
}

/// Recursively delete `path` if it exists. A no-op if it does not.
pub fn remove_tree(path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    let result = if path.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    result.with_context(|| format!("failed to remove '{}'", path.display()))
}

/// Strip a leading `./` or `.\` and turn backslashes into forward slashes.
pub fn normalize_path(path: &str) -> String {
    let stripped = path
        .strip_prefix("./")
        .or_else(|| path.strip_prefix(".\\"))
        .unwrap_or(path);
    stripped.replace('\\', "/")
}

/// The file name of the currently running executable, if it can be
/// determined. Used to exclude the tool's own binary from traversal and
/// restoration, matching the original's exclusion of `vcs.exe`.
pub fn current_exe_name() -> Option<String> {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
}

/// True if `rel_path` (already or not yet normalized) falls under the
/// repository-internal directory or names the tool's own executable.
pub fn is_excluded(rel_path: &str) -> bool {
    let normalized = normalize_path(rel_path);
    if normalized == VCS_DIR || normalized.starts_with(&format!("{VCS_DIR}/")) {
        return true;
    }
    if let Some(exe_name) = current_exe_name() {
        if normalized == exe_name {
            return true;
        }
    }
    false
}

/// Walk `root` recursively, returning normalized repository-relative paths
/// of every regular file, excluding the repository-internal directory and
/// the tool's executable. Sorted for deterministic iteration.
pub fn walk_recursive(root: &Path) -> Result<Vec<String>> {
    let mut out = Vec::new();
    let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
        if entry.depth() == 0 {
            return true;
        }
        let rel = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let rel_str = normalize_path(&rel.to_string_lossy());
        !(entry.file_type().is_dir() && rel_str == VCS_DIR)
    });

    for entry in walker {
        let entry = entry.with_context(|| format!("failed to walk '{}'", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let rel_str = normalize_path(&rel.to_string_lossy());
        if is_excluded(&rel_str) {
            continue;
        }
        out.push(rel_str);
    }

    out.sort();
    Ok(out)
}
