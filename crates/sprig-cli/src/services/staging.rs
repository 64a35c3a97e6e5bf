//! Staging service for add, rm and commit.

use anyhow::Result;
use sprig_core::{CommitId, StateStore, staging};
use sprig_fs::{ContentStore, WorkingTree};

use super::transact;

/// Service for staging operations with trait-based dependencies.
pub struct StagingService<'a, S: StateStore, C: ContentStore, W: WorkingTree> {
    state: &'a S,
    store: &'a C,
    tree: &'a W,
}

impl<'a, S: StateStore, C: ContentStore, W: WorkingTree> StagingService<'a, S, C, W> {
    /// Create a new staging service.
    #[must_use]
    pub const fn new(state: &'a S, store: &'a C, tree: &'a W) -> Self {
        Self { state, store, tree }
    }

    /// Stage `path` for the next commit.
    pub fn add(&self, path: &str) -> Result<()> {
        transact(self.state, |graph| {
            staging::add(graph, self.store, self.tree, path)
        })?;
        Ok(())
    }

    /// Unstage `path` and mark it for removal.
    pub fn remove(&self, path: &str) -> Result<()> {
        transact(self.state, |graph| staging::remove(graph, path))?;
        Ok(())
    }

    /// Commit the staged changes.
    pub fn commit(&self, message: &str) -> Result<CommitId> {
        Ok(transact(self.state, |graph| {
            staging::commit(graph, self.store, self.tree, message)
        })?)
    }
}
