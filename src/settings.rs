//! User settings persistence.
//!
//! This module handles loading and saving the dashboard configuration across
//! sessions: which log to watch, where the cleaned export goes and what the
//! chart shows.

use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

use crate::dataset::SourcePaths;
use crate::export::DEFAULT_EXPORT_FILE;
use crate::parsers::{Attribute, Hive};
use crate::window::Span;

/// Default log file name written by the scale logger
pub const DEFAULT_LOG_FILE: &str = "waagen_log.csv";

/// Default auto-refresh interval (one hour)
pub const DEFAULT_REFRESH_SECS: u64 = 60 * 60;

/// Which hives and attributes are drawn
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesVisibility {
    pub hive1: bool,
    pub hive2: bool,
    pub temperature: bool,
    pub humidity: bool,
    pub weight: bool,
}

impl Default for SeriesVisibility {
    fn default() -> Self {
        Self {
            hive1: true,
            hive2: true,
            temperature: true,
            humidity: true,
            weight: true,
        }
    }
}

impl SeriesVisibility {
    pub fn hive(&self, hive: Hive) -> bool {
        match hive {
            Hive::One => self.hive1,
            Hive::Two => self.hive2,
        }
    }

    pub fn hive_mut(&mut self, hive: Hive) -> &mut bool {
        match hive {
            Hive::One => &mut self.hive1,
            Hive::Two => &mut self.hive2,
        }
    }

    pub fn attribute(&self, attribute: Attribute) -> bool {
        match attribute {
            Attribute::Temperature => self.temperature,
            Attribute::Humidity => self.humidity,
            Attribute::Weight => self.weight,
        }
    }

    pub fn attribute_mut(&mut self, attribute: Attribute) -> &mut bool {
        match attribute {
            Attribute::Temperature => &mut self.temperature,
            Attribute::Humidity => &mut self.humidity,
            Attribute::Weight => &mut self.weight,
        }
    }

    pub fn shows(&self, hive: Hive, attribute: Attribute) -> bool {
        self.hive(hive) && self.attribute(attribute)
    }
}

/// User settings that persist across sessions
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    /// Settings file version for migration support
    #[serde(default = "default_version")]
    pub version: u32,
    /// Raw log appended to by the scale logger
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,
    /// Cleaned CSV export, overwritten on every reload
    #[serde(default = "default_export_path")]
    pub export_path: PathBuf,
    /// Active preset span. An unknown value falls back to the default span
    /// instead of discarding the whole file.
    #[serde(default, deserialize_with = "lenient_span")]
    pub span: Span,
    #[serde(default)]
    pub visibility: SeriesVisibility,
    /// Seconds between automatic reloads
    #[serde(default = "default_refresh_secs")]
    pub refresh_interval_secs: u64,
    #[serde(default)]
    pub color_blind_mode: bool,
}

fn default_version() -> u32 {
    1
}

fn default_log_path() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_FILE)
}

fn default_export_path() -> PathBuf {
    PathBuf::from(DEFAULT_EXPORT_FILE)
}

fn default_refresh_secs() -> u64 {
    DEFAULT_REFRESH_SECS
}

fn lenient_span<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Span, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_else(|e| {
        tracing::warn!("Ignoring unknown span in settings: {}", e);
        Span::default()
    }))
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            version: 1,
            log_path: default_log_path(),
            export_path: default_export_path(),
            span: Span::default(),
            visibility: SeriesVisibility::default(),
            refresh_interval_secs: DEFAULT_REFRESH_SECS,
            color_blind_mode: false,
        }
    }
}

impl UserSettings {
    /// Get the config directory path for hivelog
    pub fn get_config_dir() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::data_dir().map(|p| p.join("HiveLog"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|p| p.join("HiveLog"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        {
            dirs::config_dir().map(|p| p.join("hivelog"))
        }
    }

    /// Get the path to the settings JSON file
    pub fn get_settings_path() -> Option<PathBuf> {
        Self::get_config_dir().map(|p| p.join("settings.json"))
    }

    /// Paths used for a dataset rebuild
    pub fn source_paths(&self) -> SourcePaths {
        SourcePaths {
            log: self.log_path.clone(),
            export: self.export_path.clone(),
        }
    }

    /// Refresh interval, never shorter than one minute
    pub fn refresh_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.refresh_interval_secs.max(60))
    }

    /// Load settings from disk
    pub fn load() -> Self {
        let path = match Self::get_settings_path() {
            Some(p) => p,
            None => return Self::default(),
        };

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring unreadable settings {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<(), String> {
        let path = Self::get_settings_path()
            .ok_or_else(|| "Could not determine config directory".to_string())?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;

        std::fs::write(&path, content)
            .map_err(|e| format!("Failed to write settings file: {}", e))?;

        Ok(())
    }
}
