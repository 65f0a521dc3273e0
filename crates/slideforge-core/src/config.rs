//! Configuration management for slideforge.
//!
//! Handles loading and saving configuration from TOML files.
//! Config files are stored in platform-specific locations:
//!
//! - **macOS/Linux**: `~/.config/slideforge/config.toml`
//! - **Windows**: `%APPDATA%\slideforge\config.toml`
//!
//! # Example
//!
//! ```ignore
//! use slideforge_core::config::Config;
//!
//! let mut config = Config::load()?;
//! config.set("defaults.author", "Ada Lovelace")?;
//! config.save()?;
//! ```

use crate::catalog::DEFAULT_CODE_LANGUAGE;
use crate::types::DEFAULT_DURATION_MINUTES;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Config file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Config directory name.
const CONFIG_DIR_NAME: &str = "slideforge";

// =============================================================================
// Configuration structures
// =============================================================================

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Defaults applied when a tool call leaves a field out
    #[serde(default)]
    pub defaults: DeckDefaults,

    /// Where generated files are written
    #[serde(default)]
    pub output: OutputConfig,
}

/// Fallback values for generation requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckDefaults {
    /// Author used when a request names none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Presentation length in minutes
    #[serde(default = "default_duration")]
    pub duration_minutes: i64,
    /// Language tag for fenced code blocks
    #[serde(default = "default_code_language")]
    pub code_language: String,
}

/// Output location configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Root directory for decks and projects (defaults to the working directory)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_dir: Option<PathBuf>,
}

impl Default for DeckDefaults {
    fn default() -> Self {
        Self {
            author: None,
            duration_minutes: default_duration(),
            code_language: default_code_language(),
        }
    }
}

fn default_duration() -> i64 {
    DEFAULT_DURATION_MINUTES
}

fn default_code_language() -> String {
    DEFAULT_CODE_LANGUAGE.to_string()
}

// =============================================================================
// Config implementation
// =============================================================================

impl Config {
    /// Get the configuration directory path.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(CONFIG_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the configuration file path.
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default location.
    ///
    /// Returns a default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    ///
    /// Returns a default config if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = ?path, "Config file does not exist, using defaults");
            return Ok(Self::default());
        }

        debug!(path = ?path, "Loading config");

        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))?;

        info!(path = ?path, "Config loaded successfully");
        Ok(config)
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create config directory: {}", e)))?;
        }

        debug!(path = ?path, "Saving config");

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, contents)
            .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

        info!(path = ?path, "Config saved successfully");
        Ok(())
    }

    /// Root directory for generated output, falling back to the working directory.
    pub fn root_dir(&self) -> PathBuf {
        self.output
            .root_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Set a configuration value by key path.
    ///
    /// Key format: `section.field` (e.g., `defaults.author`, `output.root_dir`)
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let (section, field) = split_key(key)?;

        match (section, field) {
            ("defaults", "author") => self.defaults.author = Some(value.to_string()),
            ("defaults", "duration_minutes" | "duration") => {
                self.defaults.duration_minutes = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid duration '{}': expected an integer", value))
                })?;
            }
            ("defaults", "code_language" | "language") => {
                self.defaults.code_language = value.to_string()
            }
            ("output", "root_dir" | "root") => self.output.root_dir = Some(PathBuf::from(value)),
            ("defaults" | "output", _) => {
                return Err(Error::Config(format!(
                    "Unknown {} config field: {}",
                    section, field
                )))
            }
            _ => return Err(Error::Config(format!("Unknown config section: {}", section))),
        }

        Ok(())
    }

    /// Get a configuration value by key path.
    ///
    /// Key format: `section.field` (e.g., `defaults.author`, `output.root_dir`)
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let (section, field) = split_key(key)?;

        match (section, field) {
            ("defaults", "author") => Ok(self.defaults.author.clone()),
            ("defaults", "duration_minutes" | "duration") => {
                Ok(Some(self.defaults.duration_minutes.to_string()))
            }
            ("defaults", "code_language" | "language") => {
                Ok(Some(self.defaults.code_language.clone()))
            }
            ("output", "root_dir" | "root") => Ok(self
                .output
                .root_dir
                .as_ref()
                .map(|p| p.display().to_string())),
            ("defaults" | "output", _) => Err(Error::Config(format!(
                "Unknown {} config field: {}",
                section, field
            ))),
            _ => Err(Error::Config(format!("Unknown config section: {}", section))),
        }
    }
}

fn split_key(key: &str) -> Result<(&str, &str)> {
    match key.split_once('.') {
        Some((section, field)) if !field.contains('.') && !section.is_empty() => {
            Ok((section, field))
        }
        _ => Err(Error::Config(format!(
            "Invalid config key '{}'. Expected format: section.field",
            key
        ))),
    }
}

// =============================================================================
// Tests
// =============================================================================
