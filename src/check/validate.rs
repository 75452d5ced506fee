//! Attribute validation.
//!
//! Turns a loosely typed [`CheckSpec`] into a [`Check`] that carries only the
//! fields legal for its type. Rules run before any rendering, and the first
//! failing rule wins.

use super::{has_line_break, AttrValue, CheckAttributes, CheckSpec, CheckType, ValidationError};

/// Address used by `host` checks when none is given.
pub const DEFAULT_HOST_ADDRESS: &str = "127.0.0.1";

/// How a `process` check finds its process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessMatch {
    /// `with pidfile <path>`
    Pidfile(String),
    /// `with matching '<regexp>'`
    Matching(String),
}

/// A validated check.
#[derive(Debug, Clone, PartialEq)]
pub enum Check {
    Process { matcher: ProcessMatch },
    Program { path: String, timeout: AttrValue },
    File { path: String },
    Filesystem { path: String },
    Host { address: String },
}

impl Check {
    #[must_use]
    pub fn check_type(&self) -> CheckType {
        match self {
            Check::Process { .. } => CheckType::Process,
            Check::Program { .. } => CheckType::Program,
            Check::File { .. } => CheckType::File,
            Check::Filesystem { .. } => CheckType::Filesystem,
            Check::Host { .. } => CheckType::Host,
        }
    }
}

/// Returns the value unless it is missing or blank.
fn present(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).cloned()
}

/// Checks that a name maps onto a single file name.
///
/// # Errors
///
/// Returns `ValidationError::InvalidName` for empty names, names starting
/// with a non-alphanumeric character, or names with other characters than
/// letters, digits, `.`, `_` and `-`.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let mut chars = name.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphanumeric())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
    if valid {
        Ok(())
    } else {
        Err(ValidationError::InvalidName(name.to_string()))
    }
}

/// Checks that every value lands on a single line of the stanza.
///
/// # Errors
///
/// Returns `ValidationError::MultilineValue` naming the first attribute with
/// a line break, or `ValidationError::QuoteInRegexp` if the pattern would
/// escape its quotes.
pub fn validate_values(attrs: &CheckAttributes) -> Result<(), ValidationError> {
    let multiline = |key: &str| ValidationError::MultilineValue {
        key: key.to_string(),
    };

    let text = [
        ("pid", &attrs.pid),
        ("regexp", &attrs.regexp),
        ("path", &attrs.path),
        ("address", &attrs.address),
        ("start", &attrs.start),
        ("stop", &attrs.stop),
        ("group", &attrs.group),
    ];
    for (key, value) in text {
        if value.as_deref().is_some_and(has_line_break) {
            return Err(multiline(key));
        }
    }
    if attrs.timeout.as_ref().is_some_and(AttrValue::has_line_break) {
        return Err(multiline("timeout"));
    }
    if attrs.rules.iter().any(|r| has_line_break(r)) {
        return Err(multiline("rules"));
    }
    if let Some((key, _)) = attrs.extra.iter().find(|(_, v)| v.has_line_break()) {
        return Err(multiline(key));
    }

    if attrs.regexp.as_deref().is_some_and(|r| r.contains('\'')) {
        return Err(ValidationError::QuoteInRegexp);
    }
    Ok(())
}

impl CheckSpec {
    /// Validates the attributes against the declared type.
    ///
    /// # Errors
    ///
    /// Returns the `ValidationError` of the first rule that fails.
    pub fn validate(&self) -> Result<Check, ValidationError> {
        validate_name(&self.name)?;
        let attrs = &self.attributes;
        validate_values(attrs)?;

        let check = match attrs.check_type {
            CheckType::Process => {
                let pid = present(attrs.pid.as_ref());
                let regexp = present(attrs.regexp.as_ref());
                let matcher = match (pid, regexp) {
                    (Some(pid), Some(_)) => {
                        tracing::warn!(
                            name = %self.name,
                            "process has both pid and regexp, ignoring regexp"
                        );
                        ProcessMatch::Pidfile(pid)
                    }
                    (Some(pid), None) => ProcessMatch::Pidfile(pid),
                    (None, Some(regexp)) => ProcessMatch::Matching(regexp),
                    (None, None) => return Err(ValidationError::MissingProcessMatcher),
                };
                Check::Process { matcher }
            }
            CheckType::Program => {
                let path = present(attrs.path.as_ref());
                let timeout = attrs.timeout.clone().filter(|t| !t.is_blank());
                match (path, timeout) {
                    (Some(path), Some(timeout)) => Check::Program { path, timeout },
                    _ => return Err(ValidationError::MissingProgramAttributes),
                }
            }
            CheckType::File => Check::File {
                path: present(attrs.path.as_ref()).ok_or(ValidationError::MissingFilePath)?,
            },
            CheckType::Filesystem => Check::Filesystem {
                path: present(attrs.path.as_ref())
                    .ok_or(ValidationError::MissingFilesystemPath)?,
            },
            CheckType::Host => Check::Host {
                address: present(attrs.address.as_ref())
                    .unwrap_or_else(|| DEFAULT_HOST_ADDRESS.to_string()),
            },
        };

        tracing::debug!(name = %self.name, check_type = %check.check_type(), "Check validated");
        Ok(check)
    }
}
