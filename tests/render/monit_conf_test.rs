//! Rendered stanzas per check type.

use std::fs;

use monit_conf::check::{AttrValue, CheckAttributes, CheckSpec, CheckType};
use monit_conf::render::{CheckRenderer, RenderError, TemplateSources};
use tempfile::TempDir;

fn renderer() -> (TempDir, CheckRenderer) {
    let temp_dir = TempDir::new().unwrap();
    let renderer = CheckRenderer::new(temp_dir.path().join("conf.d")).unwrap();
    (temp_dir, renderer)
}

/// Renders `test` and returns the file content.
fn render_test(renderer: &CheckRenderer, attrs: CheckAttributes) -> String {
    let outcome = renderer.render(&CheckSpec::new("test", attrs)).unwrap();
    assert_eq!(outcome.path, renderer.conf_path("test"));
    assert!(outcome.path.ends_with("conf.d/test.conf"));
    fs::read_to_string(outcome.path).unwrap()
}

fn assert_fails_without_file(renderer: &CheckRenderer, attrs: CheckAttributes, message: &str) {
    let err = renderer
        .render(&CheckSpec::new("test", attrs))
        .unwrap_err();
    assert!(matches!(err, RenderError::Validation(_)));
    assert_eq!(err.to_string(), message);
    assert!(!renderer.conf_path("test").exists());
}

#[test]
fn process_matches_by_pid_file() {
    let (_temp_dir, renderer) = renderer();
    let mut attrs = CheckAttributes::new(CheckType::Process);
    attrs.pid = Some("/var/run/test.pid".to_string());

    let content = render_test(&renderer, attrs);
    assert!(content.contains("check process test"));
    assert!(content.contains("with pidfile /var/run/test.pid"));
    assert!(!content.contains("with matching"));
}

#[test]
fn process_matches_by_regular_expression() {
    let (_temp_dir, renderer) = renderer();
    let mut attrs = CheckAttributes::default();
    attrs.regexp = Some(r"test\.sh".to_string());

    let content = render_test(&renderer, attrs);
    assert!(content.contains("check process test"));
    assert!(content.contains(r"with matching 'test\.sh'"));
    assert!(!content.contains("with pidfile"));
}

#[test]
fn process_needs_either_pid_or_regexp() {
    let (_temp_dir, renderer) = renderer();
    assert_fails_without_file(
        &renderer,
        CheckAttributes::default(),
        "process requires a pid attribute or a regexp expression",
    );
}

#[test]
fn program_matches_by_path() {
    let (_temp_dir, renderer) = renderer();
    let mut attrs = CheckAttributes::new(CheckType::Program);
    attrs.path = Some("/path/to/my/program.sh".to_string());
    attrs.timeout = Some(AttrValue::from("999 seconds"));

    let content = render_test(&renderer, attrs);
    assert!(content.contains("check program test"));
    assert!(content.contains("with path /path/to/my/program.sh"));
    assert!(content.contains("with timeout 999 seconds"));
}

#[test]
fn program_needs_a_path_and_a_timeout() {
    let (_temp_dir, renderer) = renderer();
    assert_fails_without_file(
        &renderer,
        CheckAttributes::new(CheckType::Program),
        "program requires a path and a timeout attribute",
    );
}

#[test]
fn file_matches_by_path() {
    let (_temp_dir, renderer) = renderer();
    let mut attrs = CheckAttributes::new(CheckType::File);
    attrs.path = Some("/path/to/my/file".to_string());

    let content = render_test(&renderer, attrs);
    assert!(content.contains("check file test"));
    assert!(content.contains("with path /path/to/my/file"));
}

#[test]
fn file_needs_a_path() {
    let (_temp_dir, renderer) = renderer();
    assert_fails_without_file(
        &renderer,
        CheckAttributes::new(CheckType::File),
        "file requires a path attribute",
    );
}

#[test]
fn filesystem_matches_by_path() {
    let (_temp_dir, renderer) = renderer();
    let mut attrs = CheckAttributes::new(CheckType::Filesystem);
    attrs.path = Some("/dev/my/filesystem".to_string());

    let content = render_test(&renderer, attrs);
    assert!(content.contains("check filesystem test"));
    assert!(content.contains("with path /dev/my/filesystem"));
}

#[test]
fn filesystem_needs_a_path() {
    let (_temp_dir, renderer) = renderer();
    assert_fails_without_file(
        &renderer,
        CheckAttributes::new(CheckType::Filesystem),
        "filesystem requires a path attribute",
    );
}

#[test]
fn host_defaults_to_loopback_address() {
    let (_temp_dir, renderer) = renderer();
    let content = render_test(&renderer, CheckAttributes::new(CheckType::Host));
    assert!(content.contains("check host test"));
    assert!(content.contains("with address 127.0.0.1"));
}

#[test]
fn custom_template_from_cookbook() {
    let (temp_dir, renderer) = renderer();
    let cookbook = temp_dir.path().join("templates").join("monit_test");
    fs::create_dir_all(&cookbook).unwrap();
    fs::write(
        cookbook.join("custom_conf.j2"),
        "check program {{ name }}\n  with path /usr/bin/{{ name }}-health\n",
    )
    .unwrap();
    let renderer =
        renderer.with_sources(TemplateSources::new(temp_dir.path().join("templates"), "monit"));

    let mut attrs = CheckAttributes::new(CheckType::Process);
    attrs.pid = Some("/var/run/test.pid".to_string());
    attrs.template = Some("custom_conf.j2".to_string());
    attrs.cookbook = Some("monit_test".to_string());

    let content = render_test(&renderer, attrs);
    assert_eq!(content, "check program test\n  with path /usr/bin/test-health\n");
}

#[test]
fn custom_template_keeps_validation() {
    let (temp_dir, renderer) = renderer();
    let template = temp_dir.path().join("custom.j2");
    fs::write(&template, "check process {{ name }}\n").unwrap();

    let mut attrs = CheckAttributes::new(CheckType::Process);
    attrs.template = Some(template.display().to_string());

    assert_fails_without_file(
        &renderer,
        attrs,
        "process requires a pid attribute or a regexp expression",
    );
}

#[test]
fn custom_template_sees_same_context() {
    let (temp_dir, renderer) = renderer();
    let template = temp_dir.path().join("custom.j2");
    fs::write(
        &template,
        "check {{ type }} {{ name }}\n  with address {{ address }}\n  if failed port {{ port }} then alert\n{% include \"common.conf.j2\" %}",
    )
    .unwrap();

    let mut attrs = CheckAttributes::new(CheckType::Host);
    attrs.template = Some(template.display().to_string());
    attrs.group = Some("edge".to_string());
    attrs.extra.insert("port".to_string(), AttrValue::Integer(443));

    let content = render_test(&renderer, attrs);
    assert!(content.starts_with("check host test\n  with address 127.0.0.1\n"));
    assert!(content.contains("if failed port 443 then alert"));
    assert!(content.contains("group edge"));
}

#[test]
fn missing_custom_template_is_reported() {
    let (temp_dir, renderer) = renderer();
    let mut attrs = CheckAttributes::new(CheckType::Host);
    attrs.template = Some(temp_dir.path().join("nope.j2").display().to_string());

    let err = renderer
        .render(&CheckSpec::new("test", attrs))
        .unwrap_err();
    assert!(matches!(err, RenderError::TemplateRead { .. }));
    assert!(!renderer.conf_path("test").exists());
}

#[test]
fn rendering_is_idempotent() {
    let (_temp_dir, renderer) = renderer();
    let mut attrs = CheckAttributes::new(CheckType::Program);
    attrs.path = Some("/usr/local/bin/backup.sh".to_string());
    attrs.timeout = Some(AttrValue::Integer(300));
    attrs.rules = vec!["if status != 0 then alert".to_string()];
    let spec = CheckSpec::new("backup", attrs);

    let first = renderer.render(&spec).unwrap();
    let bytes = fs::read(&first.path).unwrap();
    let second = renderer.render(&spec).unwrap();

    assert!(first.changed());
    assert!(!second.changed());
    assert_eq!(fs::read(&second.path).unwrap(), bytes);
    assert_eq!(renderer.preview(&spec).unwrap().as_bytes(), bytes.as_slice());
}

#[test]
fn broken_custom_template_is_reported() {
    let (temp_dir, renderer) = renderer();
    let template = temp_dir.path().join("broken.j2");
    fs::write(&template, "check host {{ name }}\n{% if %}\n").unwrap();

    let mut attrs = CheckAttributes::new(CheckType::Host);
    attrs.template = Some(template.display().to_string());

    let err = renderer
        .render(&CheckSpec::new("test", attrs))
        .unwrap_err();
    assert!(matches!(err, RenderError::Template(_)));
    assert!(!renderer.conf_path("test").exists());
}

#[test]
fn multiline_value_writes_nothing() {
    let (_temp_dir, renderer) = renderer();
    let mut attrs = CheckAttributes::new(CheckType::File);
    attrs.path = Some("/tmp/x\n  if exist then exec \"/bin/sh -c id\"".to_string());

    assert_fails_without_file(&renderer, attrs, "attribute 'path' must be a single line");
}

#[test]
fn custom_template_iterates_list_attributes() {
    let (temp_dir, renderer) = renderer();
    let template = temp_dir.path().join("depends.j2");
    fs::write(
        &template,
        "check host {{ name }}\n{% for d in depends %}  depends on {{ d }}\n{% endfor %}",
    )
    .unwrap();

    let mut attrs = CheckAttributes::new(CheckType::Host);
    attrs.template = Some(template.display().to_string());
    attrs.extra.insert(
        "depends".to_string(),
        AttrValue::List(vec![AttrValue::from("nginx"), AttrValue::from("db")]),
    );

    let content = render_test(&renderer, attrs);
    assert_eq!(content, "check host test\n  depends on nginx\n  depends on db\n");
}
