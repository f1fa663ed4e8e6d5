//! # Command implementations
//!
//! One module per CLI subcommand, matching the command table in the
//! repository's external interface: `init`, `add`, `commit`, `branch`,
//! `checkout`, `revert`, `merge`, `log`, `graph`.

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod graph;
pub mod init;
pub mod log;
pub mod merge;
pub mod revert;
