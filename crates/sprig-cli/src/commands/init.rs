//! `sprig init` command - Create a repository in the current directory.

use anyhow::{Context, Result};
use sprig_core::config::Config;
use sprig_core::{BranchName, CommitGraph, State, StateStore};

use crate::output;

/// Run the init command.
pub fn run(branch: Option<&str>) -> Result<()> {
    let root = std::env::current_dir().context("Cannot read the current directory")?;
    let state = State::new(&root);

    let mut config = Config::default();
    if let Some(branch) = branch {
        config.general.default_branch = branch.to_string();
    }
    let branch = BranchName::new(config.general.default_branch.as_str())?;

    state.init(&CommitGraph::new(branch.clone()))?;
    state.save_config(&config)?;

    output::success(&format!("Initialized sprig repository on branch '{branch}'"));
    output::info(&format!("State stored in: {}", state.sprig_dir().display()));

    Ok(())
}
