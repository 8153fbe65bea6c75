//! Configuration for puzzlehide.
//!
//! Settings live in `~/.puzzlehide/config.toml`. Every field is optional;
//! command-line flags take precedence over the file.
//!
//! ```toml
//! origin = "bottom-left"
//! root_marker = "svg"
//! seed = "winter-2026"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading or saving configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config directory not found. Unable to determine home directory.")]
    NoConfigDir,

    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),
}

/// Where the geometry source puts its origin.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Origin {
    /// Origin at the top-left corner, y grows downward.
    #[default]
    TopLeft,
    /// Origin at the bottom-left corner, y grows upward.
    BottomLeft,
}

/// Puzzle generation settings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PuzzleConfig {
    /// Coordinate convention of the geometry listing.
    pub origin: Origin,

    /// Objects whose id contains this string are the whole document, not pieces.
    pub root_marker: String,

    /// Seed for a reproducible chunk layout. Unset means OS entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<String>,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            origin: Origin::TopLeft,
            root_marker: "svg".to_string(),
            seed: None,
        }
    }
}

impl PuzzleConfig {
    /// Load the configuration from the default location.
    ///
    /// Returns the defaults if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load the configuration from an explicit path, which must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let config: PuzzleConfig = toml::from_str(&content)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from `path` if given, otherwise from the default location.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load_from(p),
            None => Self::load(),
        }
    }

    /// Save the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = get_config_dir()?;
        Ok(config_dir.join("config.toml"))
    }
}

/// Get the puzzlehide config directory (`~/.puzzlehide`).
pub fn get_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|home| home.join(".puzzlehide"))
        .ok_or(ConfigError::NoConfigDir)
}
