//! Render, preview and remove commands.
//!
//! Thin wrappers that load settings and checks, drive a [`CheckRenderer`]
//! and hand results back to the CLI for display.

use std::path::PathBuf;

use crate::config::{ChecksFile, ConfigError, ConfigLoader, MonitConfig};
use crate::render::{CheckRenderer, RenderError, RenderOutcome};

/// Errors that can occur while running a command.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Settings or checks file error.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Validation, template or write error.
    #[error(transparent)]
    Render(#[from] RenderError),
    /// Requested check is not declared.
    #[error("No check named '{0}' in checks file")]
    UnknownCheck(String),
    /// Outcomes could not be printed as JSON.
    #[error("Failed to serialize outcomes: {0}")]
    Json(#[from] serde_json::Error),
}

/// Options shared by every command.
#[derive(Debug, Clone, Default)]
pub struct CommandContext {
    /// Explicit settings file; searched for when unset.
    pub config_path: Option<PathBuf>,
    /// Overrides the configured output directory.
    pub conf_dir: Option<PathBuf>,
}

impl CommandContext {
    /// Loads settings and applies command-line overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if a settings file exists but cannot be parsed.
    pub fn config(&self) -> Result<MonitConfig, ConfigError> {
        let loader = match &self.config_path {
            Some(path) => ConfigLoader::with_path(path.clone()),
            None => ConfigLoader::new(),
        };
        let mut config = loader.load()?;
        if let Some(dir) = &self.conf_dir {
            config.conf_dir.clone_from(dir);
        }
        Ok(config)
    }

    fn renderer(&self) -> Result<CheckRenderer, CommandError> {
        Ok(CheckRenderer::from_config(&self.config()?)?)
    }
}

/// Renders every check in a checks file, or only the named one.
///
/// # Errors
///
/// Returns the first configuration, validation, template or write error.
pub fn render_checks(
    ctx: &CommandContext,
    checks_path: &PathBuf,
    only: Option<&str>,
) -> Result<Vec<RenderOutcome>, CommandError> {
    let renderer = ctx.renderer()?;
    let checks = ChecksFile::load(checks_path)?;

    let specs = match only {
        Some(name) => vec![checks
            .get(name)
            .ok_or_else(|| CommandError::UnknownCheck(name.to_string()))?],
        None => checks.specs(),
    };

    tracing::info!(
        count = specs.len(),
        conf_dir = %renderer.conf_dir().display(),
        "Rendering checks"
    );
    Ok(renderer.render_all(&specs)?)
}

/// Formats render outcomes as a pretty JSON array.
///
/// # Errors
///
/// Returns `CommandError::Json` if serialization fails.
pub fn outcomes_json(outcomes: &[RenderOutcome]) -> Result<String, CommandError> {
    Ok(serde_json::to_string_pretty(outcomes)?)
}

/// Renders one check to a string without writing it.
///
/// # Errors
///
/// Returns a configuration, validation or template error, or
/// `UnknownCheck` if the name is not declared.
pub fn preview_check(
    ctx: &CommandContext,
    checks_path: &PathBuf,
    name: &str,
) -> Result<String, CommandError> {
    let renderer = ctx.renderer()?;
    let spec = ChecksFile::load(checks_path)?
        .get(name)
        .ok_or_else(|| CommandError::UnknownCheck(name.to_string()))?;
    Ok(renderer.preview(&spec)?)
}

/// Removes rendered files, returning whether each one existed.
///
/// # Errors
///
/// Returns the first invalid name or removal error.
pub fn remove_checks(
    ctx: &CommandContext,
    names: &[String],
) -> Result<Vec<(String, bool)>, CommandError> {
    let renderer = ctx.renderer()?;
    names
        .iter()
        .map(|name| -> Result<_, CommandError> { Ok((name.clone(), renderer.remove(name)?)) })
        .collect()
}
