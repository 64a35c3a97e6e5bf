//! `sprig log` and `sprig global-log` commands - show commit history.

use anyhow::Result;

use super::utils::open_repo;
use crate::output;
use crate::services::{CommitInfo, LogService};

/// Run the log command: head back to the root.
pub fn run(json: bool) -> Result<()> {
    let repo = open_repo()?;
    let commits = LogService::new(&repo.state).history()?;
    print(&commits, json)
}

/// Run the global-log command: every commit, ascending id.
pub fn run_global(json: bool) -> Result<()> {
    let repo = open_repo()?;
    let commits = LogService::new(&repo.state).all()?;
    print(&commits, json)
}

fn print(commits: &[CommitInfo], json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(commits)?;
        println!("{json_output}");
        return Ok(());
    }

    for commit in commits {
        output::essential(&output::commit_entry(commit));
    }
    Ok(())
}
