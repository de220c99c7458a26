use docconf::config::{default_config, ConfigLoader};
use docconf::resolve::{ConfigMut, ParserId, SettingValue, ThemeVariant};
use docconf::{ConfigError, Resolver};
use std::path::Path;
use tempfile::TempDir;

const COURSE_CONFIG: &str = r##"
extensions = ["sphinx.ext.autodoc", "sphinx.ext.napoleon", "sphinx.ext.viewcode", "myst_parser"]
exclude_patterns = ["_build"]

[project]
name = "Java course content"
author = "Zaid kamil"

[paths]
source_root = "../../java course content"
templates = ["_templates"]

[source_suffix]
".rst" = "restructuredtext"
".md" = "restructuredtext"

[theme]
name = "furo"

[theme.options]
sidebar_hide_name = false

[theme.light_css_variables]
"color-brand-primary" = "#2962FF"
"color-brand-content" = "#2962FF"

[theme.dark_css_variables]
"color-brand-primary" = "#82B1FF"
"color-brand-content" = "#82B1FF"
"##;

fn course_tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("docs").join("source");
    std::fs::create_dir_all(&source).unwrap();
    std::fs::write(source.join("docconf.toml"), COURSE_CONFIG).unwrap();
    dir
}

#[test]
fn test_resolve_from_file() {
    let dir = course_tree();
    let path = dir.path().join("docs/source/docconf.toml");

    let loaded = ConfigLoader::load_file(&path).unwrap();
    let resolved = docconf::resolve::resolve(&loaded).unwrap();

    let root = dir.path().canonicalize().unwrap();
    assert_eq!(
        resolved.settings().get_path("source_root").unwrap(),
        root.join("java course content")
    );
    assert_eq!(
        resolved.settings().get("exclude_patterns").unwrap(),
        &SettingValue::List(vec!["_build".into()])
    );
    assert_eq!(
        resolved.extensions().list().last().map(String::as_str),
        Some("myst_parser")
    );
    assert_eq!(
        resolved
            .dispatch_table()
            .resolve_path(Path::new("lessons/arrays.md"))
            .unwrap(),
        &ParserId::ReStructuredText
    );
    assert_eq!(
        resolved
            .theme()
            .color(ThemeVariant::Light, "color-brand-content")
            .unwrap()
            .as_str(),
        "#2962FF"
    );
}

#[test]
fn test_identical_input_identical_snapshot() {
    let dir = course_tree();
    let path = dir.path().join("docs/source/docconf.toml");

    let first = docconf::resolve::resolve(&ConfigLoader::load_file(&path).unwrap()).unwrap();
    let second = docconf::resolve::resolve(&ConfigLoader::load_file(&path).unwrap()).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.to_toml().unwrap(), second.to_toml().unwrap());
}

#[test]
fn test_failed_resolution_exposes_nothing() {
    let mut raw = default_config();
    raw.theme
        .dark
        .as_mut()
        .unwrap()
        .remove("color-brand-content");

    let result = Resolver::new("/docs").resolve(&raw);
    match result {
        Err(ConfigError::AsymmetricTheme {
            missing_in_light,
            missing_in_dark,
        }) => {
            assert!(missing_in_light.is_empty());
            assert_eq!(missing_in_dark, vec!["color-brand-content".to_string()]);
        }
        other => panic!("expected asymmetric theme error, got {other:?}"),
    }
}

#[test]
fn test_resolved_config_is_frozen() {
    let mut resolved = Resolver::new("/docs").resolve(&default_config()).unwrap();

    let err = resolved.register("sphinx.ext.intersphinx").unwrap_err();
    assert!(matches!(err, ConfigError::FrozenConfig));
    assert!(!resolved.extensions().contains("sphinx.ext.intersphinx"));
}

#[test]
fn test_no_extensions_is_valid() {
    let loaded = ConfigLoader::load_str("extensions = []\n", "/docs").unwrap();
    let resolved = docconf::resolve::resolve(&loaded).unwrap();
    assert!(resolved.extensions().is_empty());
}
