//! # JSON persistence
//!
//! All persisted records go through `write_pretty`/`read` so every record
//! on disk uses the same 4-space indent, matching the original's
//! `nlohmann::json::dump(4)` byte-for-byte in spirit.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::VcsError;
use crate::fs_adapter;

pub fn write_pretty<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs_adapter::mkdir_p(parent)?;
    }
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut ser)
        .with_context(|| format!("failed to serialize '{}'", path.display()))?;
    fs::write(path, buf).with_context(|| format!("failed to write '{}'", path.display()))?;
    Ok(())
}

pub fn read<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read '{}'", path.display()))?;
    serde_json::from_str(&content).map_err(|e| {
        VcsError::MalformedRecord {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
        .into()
    })
}
