//! `init` — create the repository layout directories.

use std::path::Path;

use anyhow::Result;

use crate::repo::Repository;

pub fn run() -> Result<()> {
    let repo = Repository::init(Path::new("."))?;
    println!("Initialized empty repository in {}", repo.vcs_dir.display());
    Ok(())
}
