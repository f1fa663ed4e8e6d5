//! # DAG view
//!
//! Builds an in-memory commit graph by scanning every branch record and
//! loading each referenced commit, inferring the second parent of merge
//! commits from the `Merged branch '<source>' into '<target>'` message
//! prefix. Read-only: errors loading individual records are reported and
//! skipped rather than aborting.

use std::collections::BTreeMap;
use std::fs;

use anyhow::Result;

use crate::commit::CommitLog;
use crate::json;
use crate::refs::{Branch, RefManager};
use crate::repo::Repository;

#[derive(Debug, Clone)]
pub struct CommitNode {
    pub commit_id: String,
    pub message: String,
    pub timestamp: String,
    pub parents: Vec<String>,
}

pub struct CommitGraph {
    nodes: BTreeMap<String, CommitNode>,
}

const MERGE_PREFIX: &str = "Merged branch '";

/// Parse the source branch name out of a merge commit's message, if any.
fn merge_source_branch(message: &str) -> Option<String> {
    let rest = message.strip_prefix(MERGE_PREFIX)?;
    let end = rest.find('\'')?;
    Some(rest[..end].to_string())
}

impl CommitGraph {
    pub fn build(repo: &Repository) -> Result<Self> {
        let mut nodes = BTreeMap::new();
        let branches_dir = repo.branches_dir();
        if !branches_dir.is_dir() {
            return Ok(Self { nodes });
        }

        let commit_log = CommitLog::new(repo);
        let refs = RefManager::new(repo);

        for entry in fs::read_dir(&branches_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let branch: Branch = match json::read(&path) {
                Ok(b) => b,
                Err(err) => {
                    eprintln!("warning: skipping unreadable branch record '{}': {err}", path.display());
                    continue;
                }
            };

            for commit_id in &branch.commits {
                if nodes.contains_key(commit_id) {
                    continue;
                }
                let commit = match commit_log.read(commit_id) {
                    Ok(c) => c,
                    Err(err) => {
                        eprintln!("warning: skipping unreadable commit '{commit_id}': {err}");
                        continue;
                    }
                };

                let mut parents = commit.parents();
                if let Some(source_name) = merge_source_branch(&commit.message) {
                    if let Ok(source_branch) = refs.read_branch(&source_name) {
                        if !source_branch.head.is_empty() && !parents.contains(&source_branch.head) {
                            parents.push(source_branch.head);
                        }
                    }
                }

                nodes.insert(
                    commit_id.clone(),
                    CommitNode {
                        commit_id: commit_id.clone(),
                        message: commit.message.clone(),
                        timestamp: commit.timestamp.clone(),
                        parents,
                    },
                );
            }
        }

        Ok(Self { nodes })
    }

    /// Print a plain-text traversal of the graph to stdout.
    pub fn display(&self) {
        println!("Commit History Graph:");
        for node in self.nodes.values() {
            println!("Commit: {}", node.commit_id);
            println!("Message: {}", node.message);
            println!("Timestamp: {}", node.timestamp);
            if !node.parents.is_empty() {
                println!("Parents: {}", node.parents.join(" "));
            }
            println!("-------------------");
        }
    }

    /// Render the graph as a Graphviz DOT document.
    pub fn export_dot(&self) -> String {
        let mut out = String::from("digraph CommitGraph {\n");
        for node in self.nodes.values() {
            out.push_str(&format!(
                "    \"{}\" [label=\"{}\\n{}\"];\n",
                node.commit_id,
                escape(&node.message),
                node.timestamp
            ));
            for parent in &node.parents {
                out.push_str(&format!("    \"{parent}\" -> \"{}\";\n", node.commit_id));
            }
        }
        out.push_str("}\n");
        out
    }
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
