use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Result, StorybookError};
use crate::store::{BookStore, FileBackend, DEFAULT_STORAGE_KEY};
use crate::viewer::{SpreadPolicy, Theme, ViewerOptions, DEFAULT_PAGE_TURN_DELAY};

/// User settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding the library file.
    pub data_dir: PathBuf,

    /// Key the library is stored under.
    pub storage_key: String,

    /// Page-turn animation length in milliseconds.
    pub page_turn_ms: u64,

    /// How far books can be turned in the viewer.
    pub spread_policy: SpreadPolicy,

    /// Start the viewer in dark mode.
    pub dark_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            page_turn_ms: DEFAULT_PAGE_TURN_DELAY.as_millis() as u64,
            spread_policy: SpreadPolicy::default(),
            dark_mode: false,
        }
    }
}

/// `<data_local_dir>/storybook`, or `./.storybook` when there is no such directory.
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("storybook"))
        .unwrap_or_else(|| PathBuf::from(".storybook"))
}

/// `<config_dir>/storybook/config.yml`, if the platform has a config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("storybook").join("config.yml"))
}

impl Settings {
    /// Load from `path`, or from the default location when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => match default_config_path() {
                Some(path) => Self::load_from(&path),
                None => Ok(Self::default()),
            },
        }
    }

    /// Load from `path`. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&content).map_err(|e| StorybookError::ConfigParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Write to `path` atomically.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(self).map_err(|e| StorybookError::ConfigParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let temp_path = path.with_extension("yml.tmp");
        fs::write(&temp_path, content)?;
        fs::rename(&temp_path, path)?;
        Ok(())
    }

    /// Page-turn animation length.
    pub fn page_turn_delay(&self) -> Duration {
        Duration::from_millis(self.page_turn_ms)
    }

    /// Viewer options derived from these settings.
    pub fn viewer_options(&self) -> ViewerOptions {
        ViewerOptions {
            page_turn_delay: self.page_turn_delay(),
            spread_policy: self.spread_policy,
            theme: if self.dark_mode {
                Theme::Dark
            } else {
                Theme::Light
            },
        }
    }

    /// File-backed store rooted at `data_dir`.
    pub fn open_store(&self) -> BookStore<FileBackend> {
        BookStore::with_key(FileBackend::new(&self.data_dir), self.storage_key.clone())
    }
}
