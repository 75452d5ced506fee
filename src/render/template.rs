//! Template selection and rendering.
//!
//! Built-in templates are keyed by check type. A check may name its own
//! template instead, looked up under a template source directory; it is
//! rendered against the same context and may include the built-in
//! `common.conf.j2` partial.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use minijinja::{AutoEscape, Environment, Value};

use crate::check::{Check, CheckAttributes, CheckSpec, CheckType, ProcessMatch};

use super::RenderError;

/// Default directory holding template sources.
pub const DEFAULT_TEMPLATE_ROOT: &str = "templates";

/// Template source used when a check names a template but no cookbook.
pub const DEFAULT_COOKBOOK: &str = "monit";

const COMMON_TEMPLATE: (&str, &str) = (
    "common.conf.j2",
    include_str!("templates/common.conf.j2"),
);

/// Name of the built-in template for a check type.
#[must_use]
pub fn builtin_name(check_type: CheckType) -> &'static str {
    match check_type {
        CheckType::Process => "process.conf.j2",
        CheckType::Program => "program.conf.j2",
        CheckType::File => "file.conf.j2",
        CheckType::Filesystem => "filesystem.conf.j2",
        CheckType::Host => "host.conf.j2",
    }
}

fn builtin_source(check_type: CheckType) -> &'static str {
    match check_type {
        CheckType::Process => include_str!("templates/process.conf.j2"),
        CheckType::Program => include_str!("templates/program.conf.j2"),
        CheckType::File => include_str!("templates/file.conf.j2"),
        CheckType::Filesystem => include_str!("templates/filesystem.conf.j2"),
        CheckType::Host => include_str!("templates/host.conf.j2"),
    }
}

/// Which template renders a check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateChoice {
    /// Built-in template for the type.
    Builtin(CheckType),
    /// Template file on disk.
    Custom(PathBuf),
}

/// Where custom templates are looked up.
#[derive(Debug, Clone)]
pub struct TemplateSources {
    root: PathBuf,
    default_cookbook: String,
}

impl TemplateSources {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, default_cookbook: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            default_cookbook: default_cookbook.into(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Picks the template for a check.
    ///
    /// A `template` attribute resolves to `<root>/<cookbook>/<template>`,
    /// unless it is an absolute path.
    #[must_use]
    pub fn select(&self, attrs: &CheckAttributes) -> TemplateChoice {
        let Some(template) = attrs.template.as_deref().filter(|t| !t.trim().is_empty()) else {
            return TemplateChoice::Builtin(attrs.check_type);
        };

        let template = Path::new(template);
        if template.is_absolute() {
            return TemplateChoice::Custom(template.to_path_buf());
        }

        let cookbook = attrs
            .cookbook
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(&self.default_cookbook);
        TemplateChoice::Custom(self.root.join(cookbook).join(template))
    }
}

impl Default for TemplateSources {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE_ROOT, DEFAULT_COOKBOOK)
    }
}

/// Builds the variables a template sees.
///
/// Raw attributes come first so custom templates can read anything the
/// check declared; validated values then override them.
#[must_use]
pub fn template_context(spec: &CheckSpec, check: &Check) -> BTreeMap<String, Value> {
    let attrs = &spec.attributes;
    let mut ctx: BTreeMap<String, Value> = attrs
        .extra
        .iter()
        .map(|(k, v)| (k.clone(), Value::from_serialize(v)))
        .collect();

    let text = |v: &Option<String>| Value::from(v.clone());
    ctx.insert("pid".into(), text(&attrs.pid));
    ctx.insert("regexp".into(), text(&attrs.regexp));
    ctx.insert("path".into(), text(&attrs.path));
    ctx.insert(
        "timeout".into(),
        Value::from(attrs.timeout.as_ref().map(ToString::to_string)),
    );
    ctx.insert("address".into(), text(&attrs.address));
    ctx.insert("start".into(), text(&attrs.start));
    ctx.insert("stop".into(), text(&attrs.stop));
    ctx.insert("group".into(), text(&attrs.group));
    ctx.insert("rules".into(), Value::from(attrs.rules.clone()));

    match check {
        Check::Process { matcher } => {
            let (pid, regexp) = match matcher {
                ProcessMatch::Pidfile(pid) => (Some(pid.clone()), None),
                ProcessMatch::Matching(regexp) => (None, Some(regexp.clone())),
            };
            ctx.insert("pid".into(), Value::from(pid));
            ctx.insert("regexp".into(), Value::from(regexp));
        }
        Check::Program { path, timeout } => {
            ctx.insert("path".into(), Value::from(path.clone()));
            ctx.insert("timeout".into(), Value::from(timeout.to_string()));
        }
        Check::File { path } | Check::Filesystem { path } => {
            ctx.insert("path".into(), Value::from(path.clone()));
        }
        Check::Host { address } => {
            ctx.insert("address".into(), Value::from(address.clone()));
        }
    }

    ctx.insert("name".into(), Value::from(spec.name.clone()));
    ctx.insert("type".into(), Value::from(check.check_type().as_str()));
    ctx
}

/// Renders check templates with minijinja.
pub struct TemplateService {
    env: Environment<'static>,
}

impl TemplateService {
    /// Creates a service with every built-in template registered.
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in template fails to compile.
    pub fn new() -> Result<Self, RenderError> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);

        let (name, source) = COMMON_TEMPLATE;
        env.add_template(name, source)?;
        for check_type in CheckType::ALL {
            env.add_template(builtin_name(check_type), builtin_source(check_type))?;
        }

        Ok(Self { env })
    }

    /// Renders the chosen template against a context.
    ///
    /// The result always ends with exactly one newline.
    ///
    /// # Errors
    ///
    /// Returns an error if a custom template cannot be read, or if the
    /// template fails to compile or evaluate.
    pub fn render(
        &self,
        choice: &TemplateChoice,
        context: &BTreeMap<String, Value>,
    ) -> Result<String, RenderError> {
        let rendered = match choice {
            TemplateChoice::Builtin(check_type) => {
                let name = builtin_name(*check_type);
                tracing::trace!(template = name, "Rendering built-in template");
                self.env.get_template(name)?.render(context)?
            }
            TemplateChoice::Custom(path) => {
                tracing::debug!(template = %path.display(), "Rendering custom template");
                let source =
                    std::fs::read_to_string(path).map_err(|e| RenderError::TemplateRead {
                        path: path.clone(),
                        source: e,
                    })?;
                self.env.render_str(&source, context)?
            }
        };

        let mut out = rendered.trim_end().to_string();
        out.push('\n');
        Ok(out)
    }
}

impl std::fmt::Debug for TemplateService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateService").finish_non_exhaustive()
    }
}
