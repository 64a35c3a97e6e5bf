//! Commit replay onto another branch.
//!
//! The commits between the split point and the current head are copied, in
//! order, on top of the target branch's head. Each copy keeps its original
//! message (unless reworded) and file table, overlaid with every file the
//! target branch changed since the split point that the current branch did
//! not also change. The originals stay in the graph; only the current
//! branch pointer moves.
//!
//! Every copy receives the same overlay. Copies are not diffed against
//! their own predecessors, so a change from the target branch appears in
//! all replayed commits, the oldest included.

use sprig_fs::ContentStore;

use crate::ancestry::{ancestors, find_split_point, is_ancestor};
use crate::commit::{Commit, CommitId, FileTable};
use crate::error::{Error, Result};
use crate::graph::CommitGraph;
use crate::merge::modified_since;
use crate::traits::{Decision, DecisionSource, ReplayCandidate};

/// How the replay decides what to do with each commit.
pub enum RebaseMode<'a> {
    /// Replay every commit unchanged.
    NonInteractive,
    /// Ask the source once per commit, newest first.
    Interactive(&'a mut dyn DecisionSource),
}

impl std::fmt::Debug for RebaseMode<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonInteractive => f.write_str("NonInteractive"),
            Self::Interactive(_) => f.write_str("Interactive"),
        }
    }
}

/// A commit copied during replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayedCommit {
    /// The commit that was copied.
    pub original: CommitId,
    /// The new copy.
    pub new: CommitId,
    /// Whether the copy got a new message.
    pub reworded: bool,
}

/// Result of a successful rebase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RebaseOutcome {
    /// The current head was an ancestor of the target: the pointer moved,
    /// no commits were created.
    FastForward { from: CommitId, to: CommitId },

    /// Commits were replayed on top of the target.
    Replayed {
        /// Target head the copies were stacked on.
        onto: CommitId,
        /// Split point of the two branches.
        split: CommitId,
        /// Copies, oldest first.
        replayed: Vec<ReplayedCommit>,
        /// Originals dropped by a skip decision, newest first.
        skipped: Vec<CommitId>,
    },
}

impl RebaseOutcome {
    /// Number of commits created.
    #[must_use]
    pub fn created(&self) -> usize {
        match self {
            Self::FastForward { .. } => 0,
            Self::Replayed { replayed, .. } => replayed.len(),
        }
    }
}

/// A copy waiting to be added to the graph.
struct PlannedCopy {
    original: CommitId,
    message: String,
    reworded: bool,
    files: FileTable,
}

/// Rebase the current branch onto `target`.
///
/// All decisions are collected before the graph is touched, so a
/// validation failure or an aborted interactive session leaves the graph
/// unchanged. The working tree is not updated here.
///
/// # Errors
/// - [`Error::BranchNotFound`] if `target` does not exist.
/// - [`Error::CannotRebaseOntoSelf`] if `target` is checked out.
/// - [`Error::AlreadyUpToDate`] if `target`'s head is already in the
///   current history.
/// - [`Error::NoCommonAncestor`] if the histories are disjoint.
/// - Content store failures and errors raised by the decision source.
pub fn rebase<C: ContentStore>(
    graph: &mut CommitGraph,
    target: &str,
    mut mode: RebaseMode<'_>,
    store: &C,
) -> Result<RebaseOutcome> {
    let target_head = graph.branch_head(target)?;
    if graph.current_branch() == target {
        return Err(Error::CannotRebaseOntoSelf);
    }

    let current_head = graph.head();
    if is_ancestor(graph, target_head, current_head) {
        return Err(Error::AlreadyUpToDate);
    }
    if is_ancestor(graph, current_head, target_head) {
        tracing::info!(from = %current_head, to = %target_head, "fast-forward");
        graph.point_current_at(target_head);
        return Ok(RebaseOutcome::FastForward {
            from: current_head,
            to: target_head,
        });
    }

    let split = find_split_point(graph, current_head, target_head)
        .ok_or(Error::NoCommonAncestor(current_head, target_head))?;
    let overlay = incoming_changes(graph, store, split, current_head, target_head)?;
    let (planned, skipped) = plan_replay(graph, current_head, split, &overlay, &mut mode)?;

    graph.point_current_at(target_head);
    let mut replayed = Vec::with_capacity(planned.len());
    for copy in planned.into_iter().rev() {
        let id = graph.allocate_id();
        graph.push_replayed(Commit::new(id, copy.message, None, copy.files));
        tracing::debug!(original = %copy.original, new = %id, "replayed commit");
        replayed.push(ReplayedCommit {
            original: copy.original,
            new: id,
            reworded: copy.reworded,
        });
    }

    tracing::info!(
        onto = %target_head,
        replayed = replayed.len(),
        skipped = skipped.len(),
        "rebase complete"
    );

    Ok(RebaseOutcome::Replayed {
        onto: target_head,
        split,
        replayed,
        skipped,
    })
}

/// Files the target changed since the split, minus those the current branch
/// also changed. The current branch's version always wins.
fn incoming_changes<C: ContentStore>(
    graph: &CommitGraph,
    store: &C,
    split: CommitId,
    current_head: CommitId,
    target_head: CommitId,
) -> Result<FileTable> {
    let split = graph.commit(split)?;
    let mut overlay = modified_since(store, Some(split), graph.commit(target_head)?)?;
    let ours = modified_since(store, Some(split), graph.commit(current_head)?)?;

    overlay.retain(|path, _| {
        let keep = !ours.contains_key(path);
        if !keep {
            tracing::debug!(%path, "keeping current branch's version");
        }
        keep
    });
    Ok(overlay)
}

/// Walk from `head` back to (excluding) `split`, deciding the fate of each
/// commit. Returns the copies newest first and the skipped originals.
fn plan_replay(
    graph: &CommitGraph,
    head: CommitId,
    split: CommitId,
    overlay: &FileTable,
    mode: &mut RebaseMode<'_>,
) -> Result<(Vec<PlannedCopy>, Vec<CommitId>)> {
    let mut planned = Vec::new();
    let mut skipped = Vec::new();

    for (position, commit) in ancestors(graph, head)
        .take_while(|c| c.id != split)
        .enumerate()
    {
        // The newest commit and the one sitting directly on the split point
        // are always replayed.
        let candidate = ReplayCandidate {
            commit,
            position,
            skippable: position != 0 && commit.parent != Some(split),
        };

        let message = match mode {
            RebaseMode::NonInteractive => Some((commit.message.clone(), false)),
            RebaseMode::Interactive(source) => decide(&mut **source, &candidate)?,
        };

        match message {
            Some((message, reworded)) => {
                let mut files = commit.files.clone();
                files.extend(overlay.iter().map(|(p, h)| (p.clone(), h.clone())));
                planned.push(PlannedCopy {
                    original: commit.id,
                    message,
                    reworded,
                    files,
                });
            }
            None => {
                tracing::debug!(commit = %commit.id, "skipped");
                skipped.push(commit.id);
            }
        }
    }

    Ok((planned, skipped))
}

/// Ask until the source gives an acceptable answer. `None` means skip.
fn decide(
    source: &mut dyn DecisionSource,
    candidate: &ReplayCandidate<'_>,
) -> Result<Option<(String, bool)>> {
    loop {
        match source.next(candidate)? {
            Decision::Continue => return Ok(Some((candidate.commit.message.clone(), false))),
            Decision::Reword(message) => return Ok(Some((message, true))),
            Decision::Skip if candidate.skippable => return Ok(None),
            Decision::Skip => {
                tracing::warn!(commit = %candidate.commit.id, "commit cannot be skipped");
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::BranchName;
    use crate::ancestry::distance;
    use crate::testing::{MemoryStore, table};
    use crate::traits::ScriptedDecisions;

    fn branch(name: &str) -> BranchName {
        BranchName::new(name).unwrap()
    }

    fn file(store: &MemoryStore, graph: &CommitGraph, id: CommitId, path: &str) -> String {
        let handle = graph.commit(id).unwrap().file(path).unwrap().clone();
        String::from_utf8(store.contents(&handle)).unwrap()
    }

    /// root(0) - A(1){f=1} - B(2){f=2}   master
    ///                \ C(3){f=1, g=x}     feature
    fn example(store: &MemoryStore) -> CommitGraph {
        let mut graph = CommitGraph::new(branch("master"));
        graph.add_commit("A", table(store, &[("f", "1")]));
        graph.create_branch(branch("feature")).unwrap();
        graph.add_commit("B", table(store, &[("f", "2")]));
        graph.switch_branch("feature").unwrap();
        graph.add_commit("C", table(store, &[("f", "1"), ("g", "x")]));
        graph.switch_branch("master").unwrap();
        graph
    }

    /// root - A{f=1} - B{f=2} - D{f=2, h=1} - E{f=3, h=1}   master
    ///          \ C{f=1, g=x}                                feature
    fn longer(store: &MemoryStore) -> CommitGraph {
        let mut graph = example(store);
        graph.add_commit("D", table(store, &[("f", "2"), ("h", "1")]));
        graph.add_commit("E", table(store, &[("f", "3"), ("h", "1")]));
        graph
    }

    #[test]
    fn test_replays_onto_target() {
        let store = MemoryStore::default();
        let mut graph = example(&store);

        let outcome = rebase(&mut graph, "feature", RebaseMode::NonInteractive, &store).unwrap();

        let RebaseOutcome::Replayed {
            onto,
            split,
            replayed,
            skipped,
        } = outcome
        else {
            panic!("expected replay");
        };
        assert_eq!(onto, CommitId::new(3));
        assert_eq!(split, CommitId::new(1));
        assert!(skipped.is_empty());
        assert_eq!(
            replayed,
            vec![ReplayedCommit {
                original: CommitId::new(2),
                new: CommitId::new(4),
                reworded: false,
            }]
        );

        let copy = graph.commit(CommitId::new(4)).unwrap();
        assert_eq!(copy.message, "B");
        assert_eq!(copy.parent, Some(CommitId::new(3)));
        assert_eq!(copy.files.len(), 2);
        assert_eq!(file(&store, &graph, copy.id, "f"), "2");
        assert_eq!(file(&store, &graph, copy.id, "g"), "x");

        assert_eq!(graph.head(), CommitId::new(4));
        assert_eq!(graph.branch_head("master").unwrap(), CommitId::new(4));
        // Originals are kept.
        assert!(graph.contains(CommitId::new(2)));
    }

    #[test]
    fn test_replay_count_and_id_order() {
        let store = MemoryStore::default();
        let mut graph = longer(&store);
        let before = graph.last_id();
        let split = CommitId::new(1);
        let expected = distance(&graph, graph.head(), split).unwrap();

        let outcome = rebase(&mut graph, "feature", RebaseMode::NonInteractive, &store).unwrap();
        assert_eq!(outcome.created(), expected);

        let RebaseOutcome::Replayed { replayed, .. } = outcome else {
            panic!("expected replay");
        };
        let originals: Vec<u64> = replayed.iter().map(|r| r.original.get()).collect();
        let ids: Vec<u64> = replayed.iter().map(|r| r.new.get()).collect();
        assert_eq!(originals, vec![2, 4, 5]);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        assert!(ids[0] > before.get());

        // Every copy carries the incoming overlay.
        for id in &ids {
            assert_eq!(file(&store, &graph, CommitId::new(*id), "g"), "x");
        }
        let messages: Vec<&str> = crate::ancestry::ancestors(&graph, graph.head())
            .take(3)
            .map(|c| c.message.as_str())
            .collect();
        assert_eq!(messages, vec!["E", "D", "B"]);
    }

    #[test]
    fn test_current_branch_changes_win() {
        let store = MemoryStore::default();
        let mut graph = example(&store);
        graph.switch_branch("feature").unwrap();
        graph.add_commit("F", table(&store, &[("f", "feature"), ("g", "x")]));
        graph.switch_branch("master").unwrap();

        rebase(&mut graph, "feature", RebaseMode::NonInteractive, &store).unwrap();
        assert_eq!(file(&store, &graph, graph.head(), "f"), "2");
        assert_eq!(file(&store, &graph, graph.head(), "g"), "x");
    }

    #[test]
    fn test_fast_forward() {
        let store = MemoryStore::default();
        let mut graph = example(&store);
        graph.create_branch(branch("behind")).unwrap();
        graph.switch_branch("behind").unwrap();
        graph.reset_pointer(CommitId::new(1)).unwrap();
        let commits_before = graph.commit_count();

        let outcome = rebase(&mut graph, "master", RebaseMode::NonInteractive, &store).unwrap();
        assert_eq!(
            outcome,
            RebaseOutcome::FastForward {
                from: CommitId::new(1),
                to: CommitId::new(2),
            }
        );
        assert_eq!(graph.commit_count(), commits_before);
        assert_eq!(graph.head(), graph.branch_head("master").unwrap());
    }

    #[test]
    fn test_already_up_to_date() {
        let store = MemoryStore::default();
        let mut graph = example(&store);
        graph.create_branch(branch("old")).unwrap();
        graph.add_commit("newer", table(&store, &[("f", "9")]));
        let before = graph.clone();

        let err = rebase(&mut graph, "old", RebaseMode::NonInteractive, &store).unwrap_err();
        assert!(matches!(err, Error::AlreadyUpToDate));
        assert_eq!(graph, before);
    }

    #[test]
    fn test_validation_errors_leave_graph_unchanged() {
        let store = MemoryStore::default();
        let mut graph = example(&store);
        let before = graph.clone();

        let err = rebase(&mut graph, "ghost", RebaseMode::NonInteractive, &store).unwrap_err();
        assert!(matches!(err, Error::BranchNotFound(_)));
        let err = rebase(&mut graph, "master", RebaseMode::NonInteractive, &store).unwrap_err();
        assert!(matches!(err, Error::CannotRebaseOntoSelf));
        assert_eq!(graph, before);
    }

    #[test]
    fn test_interactive_skip_and_reword() {
        let store = MemoryStore::default();
        let mut graph = longer(&store);
        // Walk order: E (first, unskippable), D, B (sits on split, unskippable).
        let mut source = ScriptedDecisions::new([
            Decision::Reword("E reworded".into()),
            Decision::Skip,
            Decision::Continue,
        ]);

        let outcome = rebase(
            &mut graph,
            "feature",
            RebaseMode::Interactive(&mut source),
            &store,
        )
        .unwrap();

        let RebaseOutcome::Replayed {
            replayed, skipped, ..
        } = outcome
        else {
            panic!("expected replay");
        };
        assert_eq!(skipped, vec![CommitId::new(4)]);
        assert_eq!(replayed.len(), 2);
        assert_eq!(replayed[0].original, CommitId::new(2));
        assert!(replayed[1].reworded);

        let head = graph.head_commit().unwrap();
        assert_eq!(head.message, "E reworded");
        assert_eq!(head.id, CommitId::new(5 + 2));
        let parent = graph.commit(head.parent.unwrap()).unwrap();
        assert_eq!(parent.message, "B");
        assert_eq!(parent.parent, Some(CommitId::new(3)));
        assert_eq!(graph.last_id(), CommitId::new(7));
    }

    #[test]
    fn test_unskippable_candidates_are_asked_again() {
        let store = MemoryStore::default();
        let mut graph = longer(&store);
        let mut source = ScriptedDecisions::new([
            Decision::Skip, // E: first candidate, refused
            Decision::Continue,
            Decision::Continue, // D
            Decision::Skip,     // B: parent is the split point, refused
            Decision::Continue,
        ]);

        let outcome = rebase(
            &mut graph,
            "feature",
            RebaseMode::Interactive(&mut source),
            &store,
        )
        .unwrap();

        assert_eq!(outcome.created(), 3);
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    fn test_aborted_session_leaves_graph_unchanged() {
        let store = MemoryStore::default();
        let mut graph = longer(&store);
        let before = graph.clone();
        let mut source = ScriptedDecisions::new([Decision::Continue]);

        let err = rebase(
            &mut graph,
            "feature",
            RebaseMode::Interactive(&mut source),
            &store,
        )
        .unwrap_err();

        assert!(matches!(err, Error::RebaseAborted(_)));
        assert_eq!(graph, before);
    }
}
