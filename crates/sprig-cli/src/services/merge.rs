//! Merge service: classifies changes and writes them into the working tree.
//!
//! A merge never creates a commit, so the graph is loaded but never saved.

use anyhow::Result;
use sprig_core::{MergeResult, StateStore, merge};
use sprig_fs::{ContentStore, WorkingTree};

/// Service for merge operations with trait-based dependencies.
pub struct MergeService<'a, S: StateStore, C: ContentStore, W: WorkingTree> {
    state: &'a S,
    store: &'a C,
    tree: &'a W,
}

impl<'a, S: StateStore, C: ContentStore, W: WorkingTree> MergeService<'a, S, C, W> {
    /// Create a new merge service.
    #[must_use]
    pub const fn new(state: &'a S, store: &'a C, tree: &'a W) -> Self {
        Self { state, store, tree }
    }

    /// Merge `branch` into the working tree.
    pub fn merge(&self, branch: &str) -> Result<MergeResult> {
        let graph = self.state.load_graph()?;
        let result = merge::merge(&graph, branch, self.store)?;
        result.apply(self.tree)?;
        Ok(result)
    }
}
