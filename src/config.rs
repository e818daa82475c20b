//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving the site-wide
//! configuration in TOML format with platform-specific directory resolution.
//! The `[defaults]` table is the admin configuration surface: it seeds the
//! layout settings of every course that has no stored record yet.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::constants::{CONFIG_DIR_ENV, CONFIG_DIR_NAME, MAX_COLUMNS, MIN_COLUMNS};
use crate::models::{CourseDisplay, LayoutConfig, Orientation};

/// Site-wide defaults for new course layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminDefaults {
    /// Default number of columns (1-4)
    #[serde(default = "default_columns")]
    pub columns: i64,
    /// Default column orientation
    #[serde(default)]
    pub orientation: Orientation,
    /// Default course display
    #[serde(default)]
    pub course_display: CourseDisplay,
    /// Emit percentage widths for horizontal layouts instead of class buckets
    #[serde(default)]
    pub responsive: bool,
}

/// Default column count (2 columns)
fn default_columns() -> i64 {
    2
}

impl Default for AdminDefaults {
    fn default() -> Self {
        Self {
            columns: default_columns(),
            orientation: Orientation::Horizontal,
            course_display: CourseDisplay::Single,
            responsive: false,
        }
    }
}

impl AdminDefaults {
    /// Layout settings for a course without a stored record.
    #[must_use]
    pub fn layout_config(&self) -> LayoutConfig {
        LayoutConfig::new(self.columns, self.orientation).with_course_display(self.course_display)
    }
}

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Directory holding `settings.toml` and course outline files.
    /// Defaults to the config directory.
    pub data_dir: Option<PathBuf>,
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/CourseColumns/config.toml`
/// - macOS: `~/Library/Application Support/CourseColumns/config.toml`
/// - Windows: `%APPDATA%\CourseColumns\config.toml`
///
/// `COURSE_COLUMNS_CONFIG_DIR` overrides the directory.
///
/// # Validation
///
/// - `defaults.columns` must be between 1 and 4
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Admin defaults for new courses
    #[serde(default)]
    pub defaults: AdminDefaults,
    /// File system paths
    #[serde(default)]
    pub paths: PathConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if the config file exists on disk.
    #[must_use]
    pub fn exists() -> bool {
        Self::config_file_path()
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Gets the config directory path, honouring `COURSE_COLUMNS_CONFIG_DIR`.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(CONFIG_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Directory holding course settings and outlines.
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.paths.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Self::config_dir(),
        }
    }

    /// Path of the per-course settings file.
    pub fn settings_file_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join("settings.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config = Self::load_unvalidated()?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the config file without validating its values.
    ///
    /// Used to repair an invalid file without losing the settings it holds.
    pub fn load_unvalidated() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(&config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).context(format!(
            "Failed to create config directory: {}",
            config_dir.display()
        ))?;

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let config_path = Self::config_file_path()?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, &config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    ///
    /// Checks:
    /// - default column count lies in the supported range
    pub fn validate(&self) -> Result<()> {
        let range = i64::from(MIN_COLUMNS)..=i64::from(MAX_COLUMNS);
        if !range.contains(&self.defaults.columns) {
            anyhow::bail!(
                "Default columns must be between {} and {}, got {}",
                MIN_COLUMNS,
                MAX_COLUMNS,
                self.defaults.columns
            );
        }

        Ok(())
    }
}
