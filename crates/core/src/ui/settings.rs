//! Persisted overlay preferences.
//!
//! Settings are stored as JSON in the user's config directory
//! (e.g., `~/.config/region-select/settings.json` on Linux).

use crate::error::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Default backdrop darkness.
pub const DEFAULT_DIM_ALPHA: u8 = 110;

/// User preferences persisted between activations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Backdrop darkness outside the selection (0-255).
    pub dim_alpha: u8,
    /// Show the "drag to select" hint before the first pointer-down.
    pub show_hint: bool,
    /// Display handle used by the last activation.
    pub last_display: Option<i64>,
}

impl Settings {
    /// Returns the path to the settings file.
    ///
    /// Creates the config directory if it doesn't exist.
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "region-select").map(|dirs| {
            let config_dir = dirs.config_dir();
            if !config_dir.exists() {
                let _ = fs::create_dir_all(config_dir);
            }
            config_dir.join("settings.json")
        })
    }

    /// Loads settings from disk, falling back to defaults if missing or
    /// unreadable.
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| fs::read_to_string(&path).ok())
            .and_then(|content| Self::from_json(&content).ok())
            .unwrap_or_default()
    }

    /// Parses settings, filling absent fields with defaults.
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Persists settings to disk.
    ///
    /// # Errors
    /// Returns an error if serialization or file writing fails.
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            let json = serde_json::to_string_pretty(self)?;
            fs::write(path, json)?;
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dim_alpha: DEFAULT_DIM_ALPHA,
            show_hint: true,
            last_display: None,
        }
    }
}
