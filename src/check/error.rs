//! Check validation errors.

/// Errors raised when a check's attributes do not fit its type.
///
/// Messages are stable; operators and tests match on them.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Neither a pidfile nor a pattern was given.
    #[error("process requires a pid attribute or a regexp expression")]
    MissingProcessMatcher,

    /// Program path or timeout missing.
    #[error("program requires a path and a timeout attribute")]
    MissingProgramAttributes,

    /// File path missing.
    #[error("file requires a path attribute")]
    MissingFilePath,

    /// Filesystem path missing.
    #[error("filesystem requires a path attribute")]
    MissingFilesystemPath,

    /// A clause value would break onto a second line.
    #[error("attribute '{key}' must be a single line")]
    MultilineValue { key: String },

    /// A single quote would close the `matching '...'` pattern early.
    #[error("regexp must not contain a single quote")]
    QuoteInRegexp,

    /// Name cannot be used as a file name.
    #[error("invalid check name '{0}': use letters, digits, '.', '_' or '-'")]
    InvalidName(String),
}
