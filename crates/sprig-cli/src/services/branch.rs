//! Branch creation and removal.

use anyhow::Result;
use sprig_core::{BranchName, StateStore};

use super::transact;

/// Service for branch pointer operations.
pub struct BranchService<'a, S: StateStore> {
    state: &'a S,
}

impl<'a, S: StateStore> BranchService<'a, S> {
    /// Create a new branch service.
    #[must_use]
    pub const fn new(state: &'a S) -> Self {
        Self { state }
    }

    /// Create `name` at the current head. The current branch is unchanged.
    pub fn create(&self, name: &str) -> Result<()> {
        let name = BranchName::new(name)?;
        transact(self.state, |graph| graph.create_branch(name))?;
        Ok(())
    }

    /// Delete the `name` pointer. Commits are kept.
    pub fn remove(&self, name: &str) -> Result<()> {
        transact(self.state, |graph| graph.remove_branch(name))?;
        Ok(())
    }
}
