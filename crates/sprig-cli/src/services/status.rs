//! Status service for branch and staging area overview.

use anyhow::Result;
use serde::Serialize;
use sprig_core::StateStore;

/// One branch pointer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchEntry {
    pub name: String,
    pub head: u64,
    pub current: bool,
}

/// Repository status.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    /// Branches sorted by name.
    pub branches: Vec<BranchEntry>,
    /// Staged paths, sorted.
    pub staged: Vec<String>,
    /// Paths marked for removal, sorted.
    pub removed: Vec<String>,
}

/// Service for computing repository status.
pub struct StatusService<'a, S: StateStore> {
    state: &'a S,
}

impl<'a, S: StateStore> StatusService<'a, S> {
    /// Create a new status service.
    #[must_use]
    pub const fn new(state: &'a S) -> Self {
        Self { state }
    }

    /// Compute the current status.
    pub fn compute_status(&self) -> Result<StatusReport> {
        let graph = self.state.load_graph()?;
        let current = graph.current_branch();

        let branches = graph
            .branches()
            .map(|(name, head)| BranchEntry {
                name: name.to_string(),
                head: head.get(),
                current: name == current,
            })
            .collect();

        Ok(StatusReport {
            branches,
            staged: graph.staged().iter().cloned().collect(),
            removed: graph.marked_for_removal().iter().cloned().collect(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::services::BranchService;
    use crate::services::test_mocks::MockStateStore;

    #[test]
    fn test_status_lists_sorted_branches() {
        let state = MockStateStore::new();
        let branches = BranchService::new(&state);
        branches.create("zeta").unwrap();
        branches.create("alpha").unwrap();

        let status = StatusService::new(&state).compute_status().unwrap();
        let names: Vec<&str> = status.branches.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "master", "zeta"]);
        assert!(status.branches[1].current);
        assert!(!status.branches[0].current);
    }

    #[test]
    fn test_status_staging_sets() {
        let state = MockStateStore::new();
        let mut graph = state.graph();
        graph.stage_file("b.txt");
        graph.stage_file("a.txt");
        graph.mark_removal("gone.txt");
        state.set_graph(graph);

        let status = StatusService::new(&state).compute_status().unwrap();
        assert_eq!(status.staged, vec!["a.txt", "b.txt"]);
        assert_eq!(status.removed, vec!["gone.txt"]);
    }
}
