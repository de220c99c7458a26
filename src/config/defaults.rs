//! Built-in starter configuration
//!
//! Written out by `docconf init` as a ready-to-edit `docconf.toml`.

use crate::config::raw::{PathsConfig, ProjectInfo, RawConfig, RawTheme, SourceSuffixes};
use std::collections::BTreeMap;

pub const DEFAULT_CONFIG_FILE: &str = "docconf.toml";

pub fn default_config() -> RawConfig {
    RawConfig {
        extensions: vec![
            "sphinx.ext.autodoc".to_string(),
            "sphinx.ext.napoleon".to_string(),
            "sphinx.ext.viewcode".to_string(),
            "myst_parser".to_string(),
        ],
        exclude_patterns: vec![],
        project: ProjectInfo {
            name: Some("Java course content".to_string()),
            copyright: Some("2025, Zaid kamil".to_string()),
            author: Some("Zaid kamil".to_string()),
        },
        paths: PathsConfig {
            source_root: Some("../../java course content".to_string()),
            templates: vec!["_templates".to_string()],
            static_files: vec!["_static".to_string()],
        },
        source_suffix: SourceSuffixes::Table(BTreeMap::from([
            (".rst".to_string(), "restructuredtext".to_string()),
            (".md".to_string(), "restructuredtext".to_string()),
        ])),
        theme: furo_theme(),
        settings: toml::Table::new(),
    }
}

fn furo_theme() -> RawTheme {
    let mut options = toml::Table::new();
    options.insert(
        "announcement".to_string(),
        toml::Value::String("Welcome to the Java Course Documentation".to_string()),
    );
    options.insert("sidebar_hide_name".to_string(), toml::Value::Boolean(false));

    RawTheme {
        name: Some("furo".to_string()),
        options,
        light: Some(brand_colors("#2962FF")),
        dark: Some(brand_colors("#82B1FF")),
    }
}

fn brand_colors(color: &str) -> BTreeMap<String, String> {
    BTreeMap::from([
        ("color-brand-primary".to_string(), color.to_string()),
        ("color-brand-content".to_string(), color.to_string()),
    ])
}
