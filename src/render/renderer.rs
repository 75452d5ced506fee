//! Check renderer.
//!
//! Validates a check, renders its stanza and writes it to
//! `<conf_dir>/<name>.conf`. Nothing touches the disk until validation and
//! rendering both succeed.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::check::{validate_name, CheckSpec};
use crate::config::MonitConfig;

use super::{template_context, RenderError, TemplateService, TemplateSources};

/// Default directory monit includes check files from.
pub const DEFAULT_CONF_DIR: &str = "/etc/monit/conf.d";

/// What a render did to the file on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderStatus {
    Created,
    Updated,
    Unchanged,
}

/// Result of rendering one check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderOutcome {
    /// Check name.
    pub name: String,
    /// Path of the rendered file.
    pub path: PathBuf,
    /// Whether the file was created, updated or left alone.
    pub status: RenderStatus,
}

impl RenderOutcome {
    /// Whether the file on disk changed.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.status != RenderStatus::Unchanged
    }
}

/// Renders checks into a monit configuration directory.
#[derive(Debug)]
pub struct CheckRenderer {
    conf_dir: PathBuf,
    sources: TemplateSources,
    templates: TemplateService,
}

impl CheckRenderer {
    /// Creates a renderer writing into `conf_dir` with default template
    /// sources.
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in templates fail to compile.
    pub fn new(conf_dir: impl Into<PathBuf>) -> Result<Self, RenderError> {
        Ok(Self {
            conf_dir: conf_dir.into(),
            sources: TemplateSources::default(),
            templates: TemplateService::new()?,
        })
    }

    /// Creates a renderer from loaded settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in templates fail to compile.
    pub fn from_config(config: &MonitConfig) -> Result<Self, RenderError> {
        Ok(Self::new(&config.conf_dir)?.with_sources(TemplateSources::new(
            &config.template_root,
            &config.default_cookbook,
        )))
    }

    /// Sets where custom templates are looked up.
    #[must_use]
    pub fn with_sources(mut self, sources: TemplateSources) -> Self {
        self.sources = sources;
        self
    }

    /// Returns the configuration directory.
    #[must_use]
    pub fn conf_dir(&self) -> &Path {
        &self.conf_dir
    }

    /// Path a check with this name renders to.
    #[must_use]
    pub fn conf_path(&self, name: &str) -> PathBuf {
        self.conf_dir.join(format!("{name}.conf"))
    }

    /// Validates and renders a check without writing it.
    ///
    /// # Errors
    ///
    /// Returns a validation error, or an error reading or evaluating the
    /// template.
    pub fn preview(&self, spec: &CheckSpec) -> Result<String, RenderError> {
        let check = spec.validate()?;
        let choice = self.sources.select(&spec.attributes);
        self.templates
            .render(&choice, &template_context(spec, &check))
    }

    /// Renders a check to `<conf_dir>/<name>.conf`.
    ///
    /// The file is replaced atomically and only when its content differs.
    ///
    /// # Errors
    ///
    /// Returns a validation or template error before anything is written,
    /// or a write error if the file cannot be stored.
    pub fn render(&self, spec: &CheckSpec) -> Result<RenderOutcome, RenderError> {
        let content = self.preview(spec)?;
        let path = self.conf_path(&spec.name);

        let status = match std::fs::read(&path) {
            Ok(existing) if existing == content.as_bytes() => RenderStatus::Unchanged,
            Ok(_) => RenderStatus::Updated,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => RenderStatus::Created,
            Err(e) => return Err(RenderError::Read { path, source: e }),
        };

        if status == RenderStatus::Unchanged {
            tracing::debug!(name = %spec.name, path = %path.display(), "Check file up to date");
        } else {
            self.write_atomic(&spec.name, &path, &content)?;
            tracing::info!(
                name = %spec.name,
                path = %path.display(),
                status = ?status,
                "Rendered check file"
            );
        }

        Ok(RenderOutcome {
            name: spec.name.clone(),
            path,
            status,
        })
    }

    /// Renders checks in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered. Files of checks before the
    /// failing one are already written.
    pub fn render_all<'a>(
        &self,
        specs: impl IntoIterator<Item = &'a CheckSpec>,
    ) -> Result<Vec<RenderOutcome>, RenderError> {
        specs.into_iter().map(|spec| self.render(spec)).collect()
    }

    /// Removes the rendered file for a check.
    ///
    /// Returns whether a file was removed; a missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is invalid or the file cannot be removed.
    pub fn remove(&self, name: &str) -> Result<bool, RenderError> {
        validate_name(name)?;
        let path = self.conf_path(name);
        match std::fs::remove_file(&path) {
            Ok(()) => {
                tracing::info!(name = %name, path = %path.display(), "Removed check file");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(name = %name, "No check file to remove");
                Ok(false)
            }
            Err(e) => Err(RenderError::Remove { path, source: e }),
        }
    }

    /// Writes to a hidden sibling file, then renames it over the target.
    ///
    /// The temporary file is removed whenever either step fails.
    fn write_atomic(&self, name: &str, path: &Path, content: &str) -> Result<(), RenderError> {
        let write_err = |source: std::io::Error| RenderError::Write {
            path: path.to_path_buf(),
            source,
        };

        std::fs::create_dir_all(&self.conf_dir).map_err(write_err)?;
        let tmp = self.conf_dir.join(format!(".{name}.conf.tmp"));
        std::fs::write(&tmp, content)
            .and_then(|()| std::fs::rename(&tmp, path))
            .map_err(|e| {
                let _ = std::fs::remove_file(&tmp);
                write_err(e)
            })
    }
}
