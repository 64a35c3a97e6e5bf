//! Trait abstractions for persistence and interactive rebase decisions.
//!
//! `StateStore` abstracts loading and saving the whole repository state;
//! `DecisionSource` abstracts the per-commit prompt of an interactive
//! rebase. Both allow the engines and services to run against in-memory
//! implementations in tests.

use std::collections::VecDeque;
use std::path::Path;

use crate::Result;
use crate::commit::Commit;
use crate::config::Config;
use crate::error::Error;
use crate::graph::CommitGraph;

/// Trait for state storage operations.
///
/// The graph is loaded wholesale before an operation and saved wholesale
/// after it.
#[allow(clippy::missing_errors_doc)]
pub trait StateStore {
    /// Check if a repository exists here.
    fn is_initialized(&self) -> bool;

    /// Create the .sprig/ directory and persist the initial graph.
    fn init(&self, graph: &CommitGraph) -> Result<()>;

    /// Get the path to the .sprig directory.
    fn sprig_dir(&self) -> &Path;

    /// Load the commit graph.
    fn load_graph(&self) -> Result<CommitGraph>;

    /// Save the commit graph.
    fn save_graph(&self, graph: &CommitGraph) -> Result<()>;

    /// Load the config, falling back to defaults when absent.
    fn load_config(&self) -> Result<Config>;

    /// Save the config.
    fn save_config(&self, config: &Config) -> Result<()>;
}

/// What to do with one commit during an interactive rebase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Replay the commit unchanged.
    Continue,
    /// Drop the commit.
    Skip,
    /// Replay the commit under a new message.
    Reword(String),
}

/// A commit awaiting a decision.
#[derive(Debug, Clone, Copy)]
pub struct ReplayCandidate<'a> {
    /// The original commit.
    pub commit: &'a Commit,
    /// Zero-based position in the walk, newest commit first.
    pub position: usize,
    /// Whether [`Decision::Skip`] will be honoured for this candidate.
    pub skippable: bool,
}

/// Supplies one decision per replay candidate, in walk order.
///
/// A source that returns [`Decision::Skip`] for a candidate that is not
/// skippable is asked again for the same candidate.
pub trait DecisionSource {
    /// Decide what to do with `candidate`.
    ///
    /// # Errors
    /// Implementations return an error to abort the rebase; the commit
    /// graph is left unchanged.
    fn next(&mut self, candidate: &ReplayCandidate<'_>) -> Result<Decision>;
}

/// A fixed sequence of decisions, consumed front to back.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDecisions {
    decisions: VecDeque<Decision>,
}

impl ScriptedDecisions {
    /// Create a source that replays `decisions` in order.
    #[must_use]
    pub fn new(decisions: impl IntoIterator<Item = Decision>) -> Self {
        Self {
            decisions: decisions.into_iter().collect(),
        }
    }

    /// Decisions not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.decisions.len()
    }
}

impl DecisionSource for ScriptedDecisions {
    fn next(&mut self, candidate: &ReplayCandidate<'_>) -> Result<Decision> {
        self.decisions.pop_front().ok_or_else(|| {
            Error::RebaseAborted(format!(
                "no decision left for commit {}",
                candidate.commit.id
            ))
        })
    }
}
