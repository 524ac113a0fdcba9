//! Global showbook configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::{ShowbookError, ShowbookResult};
use crate::store::FileStore;

static DEFAULT_DATA_DIR: &str = "~/.showbook";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

/// Configuration at ~/.config/showbook/config.toml, overridable with
/// `SHOWBOOK_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ShowbookConfig {
    /// Where the JSON collections are stored
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Only list events dated today or later by default
    #[serde(default)]
    pub upcoming_only: bool,
}

impl Default for ShowbookConfig {
    fn default() -> Self {
        ShowbookConfig {
            data_dir: default_data_dir(),
            upcoming_only: false,
        }
    }
}

impl ShowbookConfig {
    pub fn config_path() -> ShowbookResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ShowbookError::Config("Could not determine config directory".into()))?
            .join("showbook");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config, writing a commented default file on first run.
    pub fn load() -> ShowbookResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> ShowbookResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("SHOWBOOK"))
            .build()
            .map_err(|e| ShowbookError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| ShowbookError::Config(e.to_string()))
    }

    /// Data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn store(&self) -> FileStore {
        FileStore::new(self.data_path())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> ShowbookResult<()> {
        let contents = format!(
            "\
# showbook configuration

# Where events, bookings and comments are stored:
# data_dir = \"{}\"

# Only list upcoming events unless --all is given:
# upcoming_only = false
",
            DEFAULT_DATA_DIR
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ShowbookError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| ShowbookError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
