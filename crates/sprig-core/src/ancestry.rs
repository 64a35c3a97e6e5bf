//! Ancestry queries over the commit tree.
//!
//! Every commit has at most one parent, so the history of a commit is a
//! single chain back to the root and the nearest common ancestor of two
//! heads is unique.

use std::collections::HashSet;

use crate::commit::{Commit, CommitId};
use crate::graph::CommitGraph;

/// Iterator over a commit and its ancestors, nearest first.
#[derive(Debug)]
pub struct Ancestors<'a> {
    graph: &'a CommitGraph,
    next: Option<CommitId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a Commit;

    fn next(&mut self) -> Option<Self::Item> {
        let commit = self.graph.commit(self.next?).ok()?;
        self.next = commit.parent;
        Some(commit)
    }
}

/// Walk from `start` (inclusive) to the root.
#[must_use]
pub const fn ancestors(graph: &CommitGraph, start: CommitId) -> Ancestors<'_> {
    Ancestors {
        graph,
        next: Some(start),
    }
}

/// Find the nearest common ancestor of two commits.
///
/// Collects the full ancestry of `current` into a set, then walks `other`'s
/// chain nearest-first and returns the first commit found in that set.
/// Returns `None` only when the two histories are disjoint.
#[must_use]
pub fn find_split_point(graph: &CommitGraph, current: CommitId, other: CommitId) -> Option<CommitId> {
    let seen: HashSet<CommitId> = ancestors(graph, current).map(|c| c.id).collect();
    let split = ancestors(graph, other)
        .map(|c| c.id)
        .find(|id| seen.contains(id));

    match split {
        Some(id) => tracing::debug!(%current, %other, split = %id, "found split point"),
        None => tracing::debug!(%current, %other, "histories share no ancestor"),
    }
    split
}

/// Check whether `candidate` is `head` or one of its ancestors.
#[must_use]
pub fn is_ancestor(graph: &CommitGraph, candidate: CommitId, head: CommitId) -> bool {
    ancestors(graph, head).any(|c| c.id == candidate)
}

/// Number of parent links from `descendant` back to `ancestor`.
///
/// Returns `None` if `ancestor` is not on `descendant`'s chain.
#[must_use]
pub fn distance(graph: &CommitGraph, descendant: CommitId, ancestor: CommitId) -> Option<usize> {
    ancestors(graph, descendant).position(|c| c.id == ancestor)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::BranchName;
    use crate::commit::FileTable;

    fn branch(name: &str) -> BranchName {
        BranchName::new(name).unwrap()
    }

    /// root - a - b - c        (master)
    ///         \
    ///          d - e          (feature)
    fn forked() -> (CommitGraph, [CommitId; 5]) {
        let mut graph = CommitGraph::new(branch("master"));
        let a = graph.add_commit("a", FileTable::new());
        graph.create_branch(branch("feature")).unwrap();
        let b = graph.add_commit("b", FileTable::new());
        let c = graph.add_commit("c", FileTable::new());
        graph.switch_branch("feature").unwrap();
        let d = graph.add_commit("d", FileTable::new());
        let e = graph.add_commit("e", FileTable::new());
        graph.switch_branch("master").unwrap();
        (graph, [a, b, c, d, e])
    }

    #[test]
    fn test_ancestors_walks_to_root() {
        let (graph, [a, b, c, ..]) = forked();
        let chain: Vec<CommitId> = ancestors(&graph, c).map(|c| c.id).collect();
        assert_eq!(chain, vec![c, b, a, CommitId::ROOT]);
    }

    #[test]
    fn test_split_point_of_fork() {
        let (graph, [a, _, c, _, e]) = forked();
        assert_eq!(find_split_point(&graph, c, e), Some(a));
        assert_eq!(find_split_point(&graph, e, c), Some(a));
    }

    #[test]
    fn test_split_point_is_nearest_common_ancestor() {
        let (graph, [a, b, c, d, e]) = forked();
        let split = find_split_point(&graph, c, e).unwrap();

        assert!(is_ancestor(&graph, split, c));
        assert!(is_ancestor(&graph, split, e));
        // No descendant of the split point is a common ancestor.
        for id in [b, c, d, e] {
            assert!(!(is_ancestor(&graph, id, c) && is_ancestor(&graph, id, e)));
        }
        assert_eq!(split, a);
    }

    #[test]
    fn test_split_point_on_linear_history() {
        let (graph, [a, b, c, ..]) = forked();
        assert_eq!(find_split_point(&graph, c, a), Some(a));
        assert_eq!(find_split_point(&graph, a, c), Some(a));
        assert_eq!(find_split_point(&graph, b, b), Some(b));
    }

    #[test]
    fn test_split_point_of_disjoint_histories() {
        let (graph, [_, _, c, ..]) = forked();
        // An id outside the graph has an empty ancestry.
        assert_eq!(find_split_point(&graph, c, CommitId::new(99)), None);
    }

    #[test]
    fn test_is_ancestor_and_distance() {
        let (graph, [a, b, c, _, e]) = forked();

        assert!(is_ancestor(&graph, a, c));
        assert!(is_ancestor(&graph, c, c));
        assert!(!is_ancestor(&graph, c, a));
        assert!(!is_ancestor(&graph, b, e));

        assert_eq!(distance(&graph, c, a), Some(2));
        assert_eq!(distance(&graph, c, c), Some(0));
        assert_eq!(distance(&graph, e, b), None);
    }
}
