//! Render error types.

use std::path::PathBuf;

use crate::check::ValidationError;

/// Errors that can occur while rendering or removing a check file.
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    /// Attributes do not fit the check type.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Custom template could not be read.
    #[error("Failed to read template {path}: {source}")]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Template failed to compile or evaluate.
    #[error("Failed to render template: {0}")]
    Template(#[from] minijinja::Error),

    /// Existing check file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Rendered file could not be written.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Rendered file could not be removed.
    #[error("Failed to remove {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
