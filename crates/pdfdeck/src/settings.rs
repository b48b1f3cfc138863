//! Persistence for user settings.
//!
//! Only the last selected [`Mode`] survives a restart. It is stored as JSON,
//! `{"mode":"merge"}`, under the platform config directory. A missing,
//! unreadable or malformed file yields the defaults.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PdfDeckError, Result};
use crate::model::Mode;

/// Persisted settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Mode restored on start-up.
    #[serde(default)]
    pub mode: Mode,
}

/// Storage backend for [`Settings`].
pub trait SettingsStore: Send + Sync {
    /// Read the stored settings, falling back to defaults.
    fn load(&self) -> Settings;

    /// Persist `settings`.
    fn save(&self, settings: &Settings) -> Result<()>;
}

/// Settings kept in a JSON file.
#[derive(Debug, Clone)]
pub struct JsonSettingsStore {
    path: PathBuf,
}

impl JsonSettingsStore {
    /// Store at an explicit path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<config dir>/pdfdeck/settings.json`.
    ///
    /// Returns `None` if the platform has no config directory.
    pub fn in_config_dir() -> Option<Self> {
        dirs::config_dir().map(|dir| Self::new(dir.join("pdfdeck").join("settings.json")))
    }

    /// Location of the settings file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonSettingsStore {
    fn load(&self) -> Settings {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                debug!(path = %self.path.display(), "Ignoring malformed settings: {e}");
                Settings::default()
            }),
            Err(_) => Settings::default(),
        }
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| PdfDeckError::Settings {
                reason: format!("{}: {e}", parent.display()),
            })?;
        }

        let json = serde_json::to_string(settings).map_err(|e| PdfDeckError::Settings {
            reason: e.to_string(),
        })?;

        std::fs::write(&self.path, json).map_err(|e| PdfDeckError::Settings {
            reason: format!("{}: {e}", self.path.display()),
        })
    }
}

/// Settings held in memory only.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    settings: Mutex<Settings>,
}

impl MemorySettingsStore {
    /// Start from `settings`.
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Mutex::new(settings),
        }
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self) -> Settings {
        *self.settings.lock()
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        *self.settings.lock() = *settings;
        Ok(())
    }
}
