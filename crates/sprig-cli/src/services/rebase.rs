//! Rebase service: replays the current branch and syncs the working tree.

use anyhow::Result;
use sprig_core::checkout::restore_commit;
use sprig_core::{RebaseMode, RebaseOutcome, StateStore, rebase};
use sprig_fs::{ContentStore, WorkingTree};

use super::transact;

/// Service for rebase operations with trait-based dependencies.
pub struct RebaseService<'a, S: StateStore, C: ContentStore, W: WorkingTree> {
    state: &'a S,
    store: &'a C,
    tree: &'a W,
}

impl<'a, S: StateStore, C: ContentStore, W: WorkingTree> RebaseService<'a, S, C, W> {
    /// Create a new rebase service.
    #[must_use]
    pub const fn new(state: &'a S, store: &'a C, tree: &'a W) -> Self {
        Self { state, store, tree }
    }

    /// Rebase the current branch onto `target`, then restore the new head.
    pub fn rebase(&self, target: &str, mode: RebaseMode<'_>) -> Result<RebaseOutcome> {
        Ok(transact(self.state, |graph| {
            let outcome = rebase::rebase(graph, target, mode, self.store)?;
            restore_commit(self.tree, graph.head_commit()?)?;
            Ok(outcome)
        })?)
    }
}
