//! State persistence for the .sprig/ directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::graph::CommitGraph;
use crate::traits::StateStore;

/// Name of the repository metadata directory.
pub const SPRIG_DIR: &str = ".sprig";

/// Manages the .sprig/ directory state.
#[derive(Debug)]
pub struct State {
    /// Path to the .sprig/ directory.
    sprig_dir: PathBuf,
}

impl State {
    /// File names within .sprig/
    const GRAPH_FILE: &'static str = "graph.json";
    const CONFIG_FILE: &'static str = "config.toml";
    const OBJECTS_DIR: &'static str = "objects";

    /// Create a new State instance for the repository rooted at `root`.
    ///
    /// Nothing is touched on disk until [`StateStore::init`].
    #[must_use]
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            sprig_dir: root.as_ref().join(SPRIG_DIR),
        }
    }

    /// Directory holding the content store's blobs.
    #[must_use]
    pub fn objects_dir(&self) -> PathBuf {
        self.sprig_dir.join(Self::OBJECTS_DIR)
    }

    fn graph_path(&self) -> PathBuf {
        self.sprig_dir.join(Self::GRAPH_FILE)
    }

    fn config_path(&self) -> PathBuf {
        self.sprig_dir.join(Self::CONFIG_FILE)
    }
}

impl StateStore for State {
    fn is_initialized(&self) -> bool {
        self.sprig_dir.exists() && self.graph_path().exists()
    }

    fn init(&self, graph: &CommitGraph) -> Result<()> {
        if self.sprig_dir.exists() {
            return Err(Error::AlreadyInitialized(self.sprig_dir.clone()));
        }

        fs::create_dir_all(self.objects_dir())?;
        self.save_graph(graph)?;
        tracing::debug!(dir = %self.sprig_dir.display(), "initialized repository");
        Ok(())
    }

    fn sprig_dir(&self) -> &Path {
        &self.sprig_dir
    }

    fn load_graph(&self) -> Result<CommitGraph> {
        if !self.is_initialized() {
            return Err(Error::NotInitialized);
        }

        let path = self.graph_path();
        let content = fs::read_to_string(&path)?;
        let graph: CommitGraph = serde_json::from_str(&content)
            .map_err(|e| e.to_string())
            .and_then(|graph: CommitGraph| graph.check().map(|()| graph))
            .map_err(|message| Error::StateParseError {
                file: path,
                message,
            })?;
        Ok(graph)
    }

    fn save_graph(&self, graph: &CommitGraph) -> Result<()> {
        let content = serde_json::to_string_pretty(graph)?;
        fs::write(self.graph_path(), content)?;
        Ok(())
    }

    fn load_config(&self) -> Result<Config> {
        Config::load(self.config_path())
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save(self.config_path())
    }
}
