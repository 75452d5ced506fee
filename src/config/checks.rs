//! Checks file: one `[checks.<name>]` table of attributes per check.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::check::{CheckAttributes, CheckSpec};

use super::loader::read_toml;
use super::ConfigError;

/// Declared checks, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChecksFile {
    #[serde(default)]
    pub checks: BTreeMap<String, CheckAttributes>,
}

impl ChecksFile {
    /// Loads a checks file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &PathBuf) -> Result<Self, ConfigError> {
        let file: Self = read_toml(path)?;
        tracing::debug!(path = %path.display(), count = file.checks.len(), "Loaded checks");
        Ok(file)
    }

    /// Checks in name order.
    #[must_use]
    pub fn specs(&self) -> Vec<CheckSpec> {
        self.checks
            .iter()
            .map(|(name, attrs)| CheckSpec::new(name.clone(), attrs.clone()))
            .collect()
    }

    /// Looks up a single check.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<CheckSpec> {
        self.checks
            .get(name)
            .map(|attrs| CheckSpec::new(name, attrs.clone()))
    }
}
