//! Check attribute types.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of entity a check supervises.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckType {
    #[default]
    Process,
    Program,
    File,
    Filesystem,
    Host,
}

impl CheckType {
    /// All check types, in declaration order.
    pub const ALL: [CheckType; 5] = [
        CheckType::Process,
        CheckType::Program,
        CheckType::File,
        CheckType::Filesystem,
        CheckType::Host,
    ];

    /// Keyword used after `check` in the rendered stanza.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CheckType::Process => "process",
            CheckType::Program => "program",
            CheckType::File => "file",
            CheckType::Filesystem => "filesystem",
            CheckType::Host => "host",
        }
    }
}

impl fmt::Display for CheckType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An attribute value.
///
/// Values are rendered verbatim, so `999` and `"999 seconds"` both survive
/// unchanged into the stanza. Lists reach custom templates as sequences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<AttrValue>),
}

impl AttrValue {
    /// Whether the value carries nothing worth rendering.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            AttrValue::String(s) => s.trim().is_empty(),
            AttrValue::List(items) => items.iter().all(AttrValue::is_blank),
            _ => false,
        }
    }

    /// Whether any string in the value spans more than one line.
    #[must_use]
    pub fn has_line_break(&self) -> bool {
        match self {
            AttrValue::String(s) => has_line_break(s),
            AttrValue::List(items) => items.iter().any(AttrValue::has_line_break),
            _ => false,
        }
    }
}

/// Whether the text contains a carriage return or line feed.
#[must_use]
pub fn has_line_break(s: &str) -> bool {
    s.contains(['\n', '\r'])
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Bool(b) => write!(f, "{b}"),
            AttrValue::Integer(i) => write!(f, "{i}"),
            AttrValue::Float(x) => write!(f, "{x}"),
            AttrValue::String(s) => f.write_str(s),
            AttrValue::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::String(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::String(s)
    }
}

impl From<i64> for AttrValue {
    fn from(i: i64) -> Self {
        AttrValue::Integer(i)
    }
}

/// Declarative attributes for a single check.
///
/// Keys the built-in templates understand get their own field; anything else
/// lands in `extra` and is handed to custom templates as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckAttributes {
    /// Check type, `process` when omitted.
    #[serde(rename = "type")]
    pub check_type: CheckType,
    /// Pidfile for `process` checks.
    pub pid: Option<String>,
    /// Process table pattern for `process` checks.
    pub regexp: Option<String>,
    /// Program, file or device path.
    pub path: Option<String>,
    /// Program timeout, e.g. `"60 seconds"`.
    pub timeout: Option<AttrValue>,
    /// Host address.
    pub address: Option<String>,
    /// Start program command.
    pub start: Option<String>,
    /// Stop program command.
    pub stop: Option<String>,
    /// Service group.
    pub group: Option<String>,
    /// Raw condition lines, one clause each.
    pub rules: Vec<String>,
    /// Custom template file name.
    pub template: Option<String>,
    /// Template source the custom template is looked up in.
    pub cookbook: Option<String>,
    /// Attributes not interpreted by the built-in templates.
    #[serde(flatten)]
    pub extra: BTreeMap<String, AttrValue>,
}

impl CheckAttributes {
    /// Creates attributes for the given check type.
    #[must_use]
    pub fn new(check_type: CheckType) -> Self {
        Self {
            check_type,
            ..Self::default()
        }
    }
}

/// A named check ready for validation.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckSpec {
    /// Check name; also names the rendered file.
    pub name: String,
    /// Attribute mapping.
    pub attributes: CheckAttributes,
}

impl CheckSpec {
    #[must_use]
    pub fn new(name: impl Into<String>, attributes: CheckAttributes) -> Self {
        Self {
            name: name.into(),
            attributes,
        }
    }

    /// Shorthand for the declared check type.
    #[must_use]
    pub fn check_type(&self) -> CheckType {
        self.attributes.check_type
    }
}
