//! `sprig add` command - Stage a file for the next commit.

use anyhow::Result;

use super::utils::open_repo;
use crate::output;
use crate::services::StagingService;

/// Run the add command.
pub fn run(path: &str) -> Result<()> {
    let repo = open_repo()?;
    let tree = repo.worktree();

    StagingService::new(&repo.state, &repo.store, &tree).add(path)?;

    output::success(&format!("Staged {path}"));
    Ok(())
}
