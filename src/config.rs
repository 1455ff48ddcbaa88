//! Preference persistence module
//!
//! This module centralizes the persisted viewer preferences using `confy`
//! for automatic serialization and OS-specific config directory management.
//! Persistence is strictly best-effort: a missing or failing store loses
//! convenience across sessions, never correctness.

use crate::constant::{
    APP_NAME, APP_ORGANIZATION, APP_QUALIFIER, LAST_INPUT_BASE, LAST_INPUT_TARGET,
};
use crate::engine::{Granularity, ViewMode};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Confy(#[from] confy::ConfyError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub struct Config {
    pub settings: Settings,
}

impl Config {
    /// Load configuration from disk, creating default if it doesn't exist
    pub fn load() -> Result<Self, ConfigError> {
        let settings: Settings = confy::load(APP_NAME, None)?;
        info!("Load config from {:?}", Self::config_path()?);
        Ok(Self { settings })
    }

    /// Save current configuration to disk
    pub fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, None, &self.settings)?;
        info!("Save config to {:?}", Self::config_path()?);
        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(confy::get_configuration_file_path(APP_NAME, None)?)
    }

    /// Get the application data directory
    /// Falls back to a local "data" directory if platform dirs are unavailable
    pub fn data_dir(&self) -> PathBuf {
        if let Some(proj_dirs) = ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME) {
            proj_dirs.data_dir().to_path_buf()
        } else {
            PathBuf::from("data")
        }
    }

    /// Restore the last-used input texts, if both snapshots exist.
    pub fn load_last_inputs(&self) -> Option<(String, String)> {
        let dir = self.data_dir();
        let base = fs::read_to_string(dir.join(LAST_INPUT_BASE)).ok()?;
        let target = fs::read_to_string(dir.join(LAST_INPUT_TARGET)).ok()?;
        Some((base, target))
    }

    /// Snapshot the current input texts for the next session. Best-effort:
    /// failures are logged and swallowed.
    pub fn store_last_inputs(&self, base: &str, target: &str) {
        let dir = self.data_dir();
        if let Err(e) = fs::create_dir_all(&dir) {
            warn!("Failed to create data dir {:?}: {}", dir, e);
            return;
        }
        for (name, text) in [(LAST_INPUT_BASE, base), (LAST_INPUT_TARGET, target)] {
            if let Err(e) = fs::write(dir.join(name), text) {
                warn!("Failed to store input snapshot {}: {}", name, e);
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::load().unwrap_or_else(|_| Self {
            settings: Settings::default(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Which view to render: unified or split
    #[serde(default)]
    pub view: ViewMode,

    /// Token granularity for the comparison
    #[serde(default)]
    pub granularity: Granularity,

    /// Collapse unchanged context / window inline diffs to changed sentences
    #[serde(default)]
    pub only_changes: bool,

    /// Theme name, kept for the render side; the core never interprets it
    #[serde(default)]
    pub theme: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            view: ViewMode::Unified,
            granularity: Granularity::Word,
            only_changes: false,
            theme: "dark".to_string(),
        }
    }
}
