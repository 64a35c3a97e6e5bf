//! # sprig-core
//!
//! Core library for Sprig: the commit graph, ancestry queries, the
//! working-tree merge and the rebase engine, plus state persistence and
//! configuration.
//!
//! Engines take the graph by reference and reach file contents only through
//! the [`sprig_fs::ContentStore`] and [`sprig_fs::WorkingTree`] traits.

pub mod ancestry;
pub mod branch_name;
pub mod checkout;
pub mod commit;
pub mod config;
pub mod error;
pub mod graph;
pub mod merge;
pub mod rebase;
pub mod staging;
pub mod state;
pub mod traits;

#[cfg(test)]
mod testing;

pub use branch_name::BranchName;
pub use commit::{Commit, CommitId, FileTable};
pub use config::Config;
pub use error::{Error, Result};
pub use graph::CommitGraph;
pub use merge::{FileAction, MergeResult};
pub use rebase::{RebaseMode, RebaseOutcome, ReplayedCommit};
pub use state::State;
pub use traits::{Decision, DecisionSource, ReplayCandidate, ScriptedDecisions, StateStore};
