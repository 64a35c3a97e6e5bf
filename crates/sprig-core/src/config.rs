//! Configuration management for Sprig.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Sprig configuration loaded from .sprig/config.toml.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// History display settings.
    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    /// Load config from a TOML file.
    ///
    /// # Errors
    /// Returns error if file can't be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to a TOML file.
    ///
    /// # Errors
    /// Returns error if serialization or write fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| std::io::Error::other(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// General Sprig settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Branch created by `sprig init`.
    #[serde(default = "default_branch")]
    pub default_branch: String,

    /// Ask before commands that overwrite working-tree files.
    #[serde(default = "default_true")]
    pub confirm_destructive: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_branch: default_branch(),
            confirm_destructive: true,
        }
    }
}

fn default_branch() -> String {
    "master".into()
}

const fn default_true() -> bool {
    true
}

/// Settings for `log` and `global-log`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// chrono format string for commit timestamps.
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
        }
    }
}

fn default_date_format() -> String {
    "%Y-%m-%d %H:%M:%S".into()
}
