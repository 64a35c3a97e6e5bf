use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use inquire::Confirm;
use sprig_core::{CommitId, State, StateStore};
use sprig_fs::{BlobStore, Worktree};

use crate::output;

/// An opened repository: state, object store and root directory.
pub struct Repo {
    root: PathBuf,
    pub state: State,
    pub store: BlobStore,
}

impl Repo {
    /// Working tree backed by this repository's object store.
    pub fn worktree(&self) -> Worktree<'_, BlobStore> {
        Worktree::new(&self.root, &self.store)
    }
}

/// Helper to open the repository in the current directory.
pub fn open_repo() -> Result<Repo> {
    let root = std::env::current_dir().context("Cannot read the current directory")?;
    let state = State::new(&root);

    if !state.is_initialized() {
        bail!("Not a sprig repository - run `sprig init` first");
    }

    let store = BlobStore::open(state.objects_dir()).context("Failed to open the object store")?;
    Ok(Repo { root, state, store })
}

/// Parse a commit id argument.
pub fn parse_commit_id(raw: &str) -> Result<CommitId> {
    raw.parse()
        .with_context(|| format!("'{raw}' is not a commit id"))
}

/// Ask before overwriting working-tree files.
///
/// Skipped when `yes` is set, when the config disables it, or when stdin is
/// not a terminal.
pub fn confirm_destructive(repo: &Repo, action: &str, yes: bool) -> Result<bool> {
    if yes || !std::io::stdin().is_terminal() {
        return Ok(true);
    }
    if !repo.state.load_config()?.general.confirm_destructive {
        return Ok(true);
    }

    let confirmed = Confirm::new(&format!("{action} may overwrite files in the working tree. Continue?"))
        .with_default(true)
        .prompt()
        .context("Confirmation cancelled")?;

    if !confirmed {
        output::info("Cancelled");
    }
    Ok(confirmed)
}
