//! Settings file loader.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::render::{DEFAULT_CONF_DIR, DEFAULT_COOKBOOK, DEFAULT_TEMPLATE_ROOT};

/// Tool settings loaded from TOML file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitConfig {
    /// Directory rendered check files are written to.
    #[serde(default = "default_conf_dir")]
    pub conf_dir: PathBuf,
    /// Directory holding custom template sources, one subdirectory each.
    #[serde(default = "default_template_root")]
    pub template_root: PathBuf,
    /// Template source used when a check names no cookbook.
    #[serde(default = "default_cookbook")]
    pub default_cookbook: String,
}

fn default_conf_dir() -> PathBuf {
    PathBuf::from(DEFAULT_CONF_DIR)
}

fn default_template_root() -> PathBuf {
    PathBuf::from(DEFAULT_TEMPLATE_ROOT)
}

fn default_cookbook() -> String {
    DEFAULT_COOKBOOK.to_string()
}

impl Default for MonitConfig {
    fn default() -> Self {
        Self {
            conf_dir: default_conf_dir(),
            template_root: default_template_root(),
            default_cookbook: default_cookbook(),
        }
    }
}

/// Configuration loader that searches multiple locations.
#[derive(Debug)]
pub struct ConfigLoader {
    /// Search paths in order of priority.
    search_paths: Vec<PathBuf>,
}

impl ConfigLoader {
    /// Create a new config loader with default search paths.
    #[must_use]
    pub fn new() -> Self {
        let mut search_paths = Vec::new();

        // 1. Current directory: .monit-conf.toml
        search_paths.push(PathBuf::from(".monit-conf.toml"));

        // 2. User config directory: ~/.config/monit-conf/config.toml
        if let Some(config_dir) = dirs::config_dir() {
            search_paths.push(config_dir.join("monit-conf").join("config.toml"));
        }

        Self { search_paths }
    }

    /// Create a config loader with a specific config file path.
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            search_paths: vec![path],
        }
    }

    /// Load configuration from the first available file, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed.
    pub fn load(&self) -> Result<MonitConfig, ConfigError> {
        for path in &self.search_paths {
            if path.exists() {
                tracing::debug!(path = %path.display(), "Loading config file");
                return read_toml(path);
            }
        }

        tracing::debug!("No config file found, using defaults");
        Ok(MonitConfig::default())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads and parses a TOML file.
pub(crate) fn read_toml<T: serde::de::DeserializeOwned>(
    path: &PathBuf,
) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        source: e,
    })?;

    toml::from_str(&content).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })
}

/// Errors that can occur during configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}
