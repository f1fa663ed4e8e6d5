//! `graph` — print the commit history graph and write a Graphviz DOT
//! rendering of it to `commit_graph.dot`, per the original's dual text +
//! DOT output.

use anyhow::Result;

use crate::dag::CommitGraph;
use crate::fs_adapter;
use crate::repo::Repository;

pub fn run(repo: &Repository) -> Result<()> {
    let graph = CommitGraph::build(repo)?;
    graph.display();

    let dot_path = repo.root.join("commit_graph.dot");
    fs_adapter::write_text(&dot_path, &graph.export_dot())?;
    println!("Wrote Graphviz graph to '{}'.", dot_path.display());
    Ok(())
}
