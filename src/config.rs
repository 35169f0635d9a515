//! User configuration for the board.

use crate::eligibility::DropPolicy;
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file name within the kanboard config directory.
const CONFIG_FILE: &str = "kanboard.yml";

/// Settings read from `kanboard.yml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Which columns accept a dragged task
    pub drop_policy: DropPolicy,

    /// Seed board file; the built-in seed is used when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<PathBuf>,
}

impl Config {
    /// Default location: `<config dir>/kanboard/kanboard.yml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("kanboard").join(CONFIG_FILE))
    }

    /// Load config from a file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path).with_context(|| format!("Failed to read config {}", path.display()))?;
        let mut config: Config =
            serde_yaml::from_str(&text).with_context(|| format!("Failed to parse config {}", path.display()))?;

        // Relative seed paths are relative to the config file
        if let Some(seed) = &config.seed
            && seed.is_relative()
            && let Some(parent) = path.parent()
        {
            config.seed = Some(parent.join(seed));
        }

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from the default location, or defaults if there is none.
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }
}
