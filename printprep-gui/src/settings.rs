//! Persistent settings for the printprep GUI.
//!
//! This module handles loading and saving user preferences to a JSON5
//! configuration file. Settings are stored in `~/.config/printprep/gui.json5`
//! following XDG conventions.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::theme::ThemeMode;

/// Configuration directory name
const CONFIG_DIR: &str = "printprep";
/// Settings file name
const SETTINGS_FILE: &str = "gui.json5";

/// Persistent GUI settings.
///
/// These settings are saved to disk and restored on application startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuiSettings {
    /// Theme mode (light or dark)
    #[serde(default)]
    pub theme_mode: ThemeModeJson,

    /// Whether the printer status panel is shown
    #[serde(default = "default_true")]
    pub show_printer_panel: bool,
}

fn default_true() -> bool {
    true
}

impl Default for GuiSettings {
    fn default() -> Self {
        Self {
            theme_mode: ThemeModeJson::Light,
            show_printer_panel: true,
        }
    }
}

/// JSON-serializable theme mode
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeModeJson {
    #[default]
    Light,
    Dark,
}

impl From<ThemeMode> for ThemeModeJson {
    fn from(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => ThemeModeJson::Light,
            ThemeMode::Dark => ThemeModeJson::Dark,
        }
    }
}

impl From<ThemeModeJson> for ThemeMode {
    fn from(mode: ThemeModeJson) -> Self {
        match mode {
            ThemeModeJson::Light => ThemeMode::Light,
            ThemeModeJson::Dark => ThemeMode::Dark,
        }
    }
}

impl GuiSettings {
    /// Gets the path to the settings file.
    ///
    /// Returns `~/.config/printprep/gui.json5` on Linux.
    pub fn settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|config| config.join(CONFIG_DIR).join(SETTINGS_FILE))
    }

    /// Loads settings from the configuration file.
    ///
    /// Returns default settings if the file doesn't exist or can't be parsed.
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory, using defaults");
            return Self::default();
        };

        if !path.exists() {
            debug!("Settings file does not exist, using defaults");
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match json5::from_str(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    error!("Failed to parse settings file: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                error!("Failed to read settings file: {}", e);
                Self::default()
            }
        }
    }

    /// Saves settings to the configuration file.
    ///
    /// Creates the configuration directory if it doesn't exist.
    pub fn save(&self) -> Result<(), SettingsError> {
        let path = Self::settings_path().ok_or(SettingsError::NoConfigDir)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| SettingsError::CreateDir(e.to_string()))?;
        }

        let content = self.to_json5_string();
        fs::write(&path, content).map_err(|e| SettingsError::Write(e.to_string()))?;

        debug!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Converts settings to a pretty-printed JSON5 string.
    fn to_json5_string(&self) -> String {
        // JSON5 doesn't have a pretty-print option, so we use serde_json for
        // formatting; the output is valid JSON5 (JSON is a subset of JSON5).
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Error type for settings operations
#[derive(Debug)]
pub enum SettingsError {
    /// Could not determine config directory
    NoConfigDir,
    /// Failed to create config directory
    CreateDir(String),
    /// Failed to write settings file
    Write(String),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::NoConfigDir => write!(f, "Could not determine config directory"),
            SettingsError::CreateDir(e) => write!(f, "Failed to create config directory: {}", e),
            SettingsError::Write(e) => write!(f, "Failed to write settings file: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {}
