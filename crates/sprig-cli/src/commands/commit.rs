//! `sprig commit` command - Record the staged changes.

use anyhow::Result;

use super::utils::open_repo;
use crate::output;
use crate::services::StagingService;

/// Run the commit command.
pub fn run(message: &str) -> Result<()> {
    let repo = open_repo()?;
    let tree = repo.worktree();

    let id = StagingService::new(&repo.state, &repo.store, &tree).commit(message)?;

    output::success(&format!("Created commit {id}"));
    Ok(())
}
