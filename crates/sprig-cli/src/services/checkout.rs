//! Checkout service: switching branches, restoring files and resetting.

use anyhow::{Result, bail};
use sprig_core::{CommitId, StateStore, checkout};
use sprig_fs::{WorkingTree, validate_path};

use super::transact;

/// What a single-argument checkout resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Switched to (or restored) a branch.
    Branch { name: String, switched: bool },
    /// Restored one file from the head.
    File { path: String },
}

/// Service for checkout operations with trait-based dependencies.
pub struct CheckoutService<'a, S: StateStore, W: WorkingTree> {
    state: &'a S,
    tree: &'a W,
}

impl<'a, S: StateStore, W: WorkingTree> CheckoutService<'a, S, W> {
    /// Create a new checkout service.
    #[must_use]
    pub const fn new(state: &'a S, tree: &'a W) -> Self {
        Self { state, tree }
    }

    /// Check out `target` as a branch, or failing that as a path in the head.
    pub fn checkout(&self, target: &str) -> Result<CheckoutOutcome> {
        let graph = self.state.load_graph()?;

        if graph.has_branch(target) {
            let switched = transact(self.state, |graph| {
                checkout::checkout_branch(graph, self.tree, target)
            })?;
            return Ok(CheckoutOutcome::Branch {
                name: target.to_string(),
                switched,
            });
        }

        let head = graph.head_commit()?;
        let Some(path) = validate_path(target).ok().filter(|p| head.tracks(p)) else {
            bail!("'{target}' is neither a branch nor a file in the current commit");
        };
        checkout::checkout_file(&graph, self.tree, None, &path)?;
        Ok(CheckoutOutcome::File { path })
    }

    /// Restore `path` from `commit`.
    pub fn checkout_file(&self, commit: CommitId, path: &str) -> Result<()> {
        let graph = self.state.load_graph()?;
        checkout::checkout_file(&graph, self.tree, Some(commit), path)?;
        Ok(())
    }

    /// Restore `commit` and move the current branch to it.
    pub fn reset(&self, commit: CommitId) -> Result<()> {
        transact(self.state, |graph| checkout::reset(graph, self.tree, commit))?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::services::test_mocks::{MemoryFs, MockStateStore};
    use crate::services::{BranchService, StagingService};
    use sprig_core::Error;

    /// master: root - 1{a=one} - 2{a=two}, feature at 1.
    fn setup() -> (MockStateStore, MemoryFs) {
        let state = MockStateStore::new();
        let fs = MemoryFs::new().with_file("a.txt", "one");
        let staging = StagingService::new(&state, &fs, &fs);
        staging.add("a.txt").unwrap();
        staging.commit("one").unwrap();
        BranchService::new(&state).create("feature").unwrap();
        fs.put_file("a.txt", "two");
        staging.add("a.txt").unwrap();
        staging.commit("two").unwrap();
        (state, fs)
    }

    #[test]
    fn test_branch_resolves_first() {
        let (state, fs) = setup();
        let service = CheckoutService::new(&state, &fs);

        let outcome = service.checkout("feature").unwrap();
        assert_eq!(
            outcome,
            CheckoutOutcome::Branch {
                name: "feature".into(),
                switched: true,
            }
        );
        assert_eq!(state.graph().current_branch(), "feature");
        assert_eq!(fs.file("a.txt").unwrap(), "one");
    }

    #[test]
    fn test_path_fallback() {
        let (state, fs) = setup();
        fs.put_file("a.txt", "scribble");
        let service = CheckoutService::new(&state, &fs);

        let outcome = service.checkout("a.txt").unwrap();
        assert!(matches!(outcome, CheckoutOutcome::File { .. }));
        assert_eq!(fs.file("a.txt").unwrap(), "two");
    }

    #[test]
    fn test_path_fallback_uses_canonical_path() {
        let (state, fs) = setup();
        fs.put_file("a.txt", "scribble");
        let service = CheckoutService::new(&state, &fs);

        let outcome = service.checkout("./a.txt").unwrap();
        assert_eq!(outcome, CheckoutOutcome::File { path: "a.txt".into() });
        assert_eq!(fs.file("a.txt").unwrap(), "two");
    }

    #[test]
    fn test_unknown_target() {
        let (state, fs) = setup();
        let service = CheckoutService::new(&state, &fs);

        let err = service.checkout("nope").unwrap_err();
        assert!(err.to_string().contains("neither a branch nor a file"));
    }

    #[test]
    fn test_checkout_file_from_commit() {
        let (state, fs) = setup();
        let service = CheckoutService::new(&state, &fs);

        service.checkout_file(CommitId::new(1), "a.txt").unwrap();
        assert_eq!(fs.file("a.txt").unwrap(), "one");

        let err = service.checkout_file(CommitId::new(7), "a.txt").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::CommitNotFound(_))
        ));
    }

    #[test]
    fn test_reset() {
        let (state, fs) = setup();
        let service = CheckoutService::new(&state, &fs);

        service.reset(CommitId::new(1)).unwrap();
        let graph = state.graph();
        assert_eq!(graph.head(), CommitId::new(1));
        assert_eq!(graph.branch_head("master").unwrap(), CommitId::new(1));
        assert_eq!(fs.file("a.txt").unwrap(), "one");
    }

    #[test]
    fn test_failed_restore_keeps_branch() {
        let (state, fs) = setup();
        fs.fail_writes();
        let service = CheckoutService::new(&state, &fs);

        let err = service.checkout("feature").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::Storage(_))
        ));
        assert_eq!(state.graph().current_branch(), "master");
    }
}
