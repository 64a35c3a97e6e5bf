//! Log service for history listings and message search.
//!
//! This module turns commits into display records, separated from CLI
//! presentation concerns.

use anyhow::Result;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use sprig_core::ancestry::ancestors;
use sprig_core::config::LogConfig;
use sprig_core::{Commit, CommitId, StateStore};

/// Information about a single commit.
#[derive(Debug, Clone, Serialize)]
pub struct CommitInfo {
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<u64>,
    pub date: String,
    pub message: String,
}

impl CommitInfo {
    fn from_commit(commit: &Commit, date_format: &str) -> Self {
        Self {
            id: commit.id.get(),
            parent: commit.parent.map(CommitId::get),
            date: format_timestamp(commit.timestamp, date_format),
            message: commit.message.clone(),
        }
    }
}

/// Format `ts` in local time, falling back to the default format when
/// `format` is not a valid strftime string.
pub fn format_timestamp(ts: DateTime<Utc>, format: &str) -> String {
    let valid = !StrftimeItems::new(format).any(|item| matches!(item, Item::Error));
    let format = if valid {
        format.to_string()
    } else {
        tracing::warn!(format, "invalid date format, using default");
        LogConfig::default().date_format
    };
    ts.with_timezone(&Local).format(&format).to_string()
}

/// Service for retrieving commit logs.
pub struct LogService<'a, S: StateStore> {
    state: &'a S,
}

impl<'a, S: StateStore> LogService<'a, S> {
    /// Create a new log service.
    #[must_use]
    pub const fn new(state: &'a S) -> Self {
        Self { state }
    }

    fn date_format(&self) -> Result<String> {
        Ok(self.state.load_config()?.log.date_format)
    }

    /// Commits from the head back to the root.
    pub fn history(&self) -> Result<Vec<CommitInfo>> {
        let graph = self.state.load_graph()?;
        let format = self.date_format()?;
        Ok(ancestors(&graph, graph.head())
            .map(|c| CommitInfo::from_commit(c, &format))
            .collect())
    }

    /// Every commit ever made, ascending by id.
    pub fn all(&self) -> Result<Vec<CommitInfo>> {
        let graph = self.state.load_graph()?;
        let format = self.date_format()?;
        Ok(graph
            .commits()
            .map(|c| CommitInfo::from_commit(c, &format))
            .collect())
    }

    /// Ids of every commit whose message is exactly `message`.
    pub fn find(&self, message: &str) -> Result<Vec<CommitId>> {
        Ok(self.state.load_graph()?.find_by_message(message))
    }
}
