//! Raw configuration file parsing

use serde::de::value::{MapAccessDeserializer, SeqAccessDeserializer};
use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Unvalidated configuration as read from `docconf.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    pub extensions: Vec<String>,
    pub exclude_patterns: Vec<String>,
    pub project: ProjectInfo,
    pub paths: PathsConfig,
    pub source_suffix: SourceSuffixes,
    pub theme: RawTheme,
    /// Extra settings copied verbatim into the resolved settings
    pub settings: toml::Table,
}

impl RawConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

/// Paths, relative to the directory holding the configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Root of the documented source tree
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_root: Option<String>,
    pub templates: Vec<String>,
    #[serde(rename = "static")]
    pub static_files: Vec<String>,
}

/// Suffix bindings, either as a table or as an ordered list.
///
/// The list form may repeat a suffix, which the resolver reports as a
/// conflict when the parsers differ.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SourceSuffixes {
    Table(BTreeMap<String, String>),
    List(Vec<SuffixBinding>),
}

impl Default for SourceSuffixes {
    fn default() -> Self {
        SourceSuffixes::Table(BTreeMap::new())
    }
}

// Dispatches on the input shape so errors inside an entry surface as-is
impl<'de> Deserialize<'de> for SourceSuffixes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SuffixesVisitor;

        impl<'de> Visitor<'de> for SuffixesVisitor {
            type Value = SourceSuffixes;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(
                    "a table of `suffix = parser` pairs or a list of `{ suffix, parser }` tables",
                )
            }

            fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
                BTreeMap::deserialize(MapAccessDeserializer::new(map)).map(SourceSuffixes::Table)
            }

            fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<Self::Value, A::Error> {
                Vec::deserialize(SeqAccessDeserializer::new(seq)).map(SourceSuffixes::List)
            }
        }

        deserializer.deserialize_any(SuffixesVisitor)
    }
}

impl SourceSuffixes {
    /// Bindings in declaration order (sorted by suffix for the table form)
    pub fn bindings(&self) -> Vec<(&str, &str)> {
        match self {
            SourceSuffixes::Table(table) => table
                .iter()
                .map(|(s, p)| (s.as_str(), p.as_str()))
                .collect(),
            SourceSuffixes::List(list) => list
                .iter()
                .map(|b| (b.suffix.as_str(), b.parser.as_str()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuffixBinding {
    pub suffix: String,
    pub parser: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawTheme {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub options: toml::Table,
    #[serde(alias = "light_css_variables", skip_serializing_if = "Option::is_none")]
    pub light: Option<BTreeMap<String, String>>,
    #[serde(alias = "dark_css_variables", skip_serializing_if = "Option::is_none")]
    pub dark: Option<BTreeMap<String, String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_table_suffixes() {
        let raw = RawConfig::from_toml_str(
            r#"
            extensions = ["sphinx.ext.autodoc", "myst_parser"]

            [source_suffix]
            ".rst" = "restructuredtext"
            ".md" = "restructuredtext"
            "#,
        )
        .unwrap();

        assert_eq!(raw.extensions, vec!["sphinx.ext.autodoc", "myst_parser"]);
        assert_eq!(
            raw.source_suffix.bindings(),
            vec![(".md", "restructuredtext"), (".rst", "restructuredtext")]
        );
    }

    #[test]
    fn test_parse_list_suffixes_keeps_repeats() {
        let raw = RawConfig::from_toml_str(
            r#"
            [[source_suffix]]
            suffix = ".md"
            parser = "rst-parser"

            [[source_suffix]]
            suffix = ".md"
            parser = "md-native-parser"
            "#,
        )
        .unwrap();

        assert_eq!(
            raw.source_suffix.bindings(),
            vec![(".md", "rst-parser"), (".md", "md-native-parser")]
        );
    }

    #[test]
    fn test_theme_variable_aliases() {
        let raw = RawConfig::from_toml_str(
            r##"
            [theme]
            name = "furo"

            [theme.light_css_variables]
            "color-brand-primary" = "#2962FF"
            "##,
        )
        .unwrap();

        assert_eq!(raw.theme.name.as_deref(), Some("furo"));
        assert_eq!(
            raw.theme.light.unwrap()["color-brand-primary"],
            "#2962FF"
        );
        assert!(raw.theme.dark.is_none());
    }

    #[test]
    fn test_malformed_suffix_entry_names_field() {
        let err = RawConfig::from_toml_str(
            r#"
            [[source_suffix]]
            suffix = ".md"
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("missing field `parser`"), "{err}");
    }

    #[test]
    fn test_wrong_suffix_shape_names_accepted_forms() {
        let err = RawConfig::from_toml_str("source_suffix = 3").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("a table of `suffix = parser` pairs"), "{message}");
        assert!(message.contains("a list of `{ suffix, parser }` tables"), "{message}");
    }

    #[test]
    fn test_empty_input() {
        let raw = RawConfig::from_toml_str("").unwrap();
        assert_eq!(raw, RawConfig::default());
        assert!(raw.source_suffix.bindings().is_empty());
    }

    #[test]
    fn test_unknown_field_type_rejected() {
        assert!(RawConfig::from_toml_str("extensions = \"autodoc\"").is_err());
    }
}
