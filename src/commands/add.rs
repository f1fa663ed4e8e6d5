//! `add` — stage a single file, or every eligible file when the path is
//! literally `all`.

use anyhow::Result;

use crate::repo::Repository;
use crate::snapshot;

pub fn run(repo: &Repository, path: &str) -> Result<()> {
    snapshot::stage(repo, path)?;
    if path == "all" {
        println!("Staged all eligible files.");
    } else {
        println!("Staged '{path}'.");
    }
    Ok(())
}
