//! Source suffix to markup parser dispatch

use crate::types::{ConfigError, Result};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use tracing::debug;

/// Identifier of the parser the renderer uses for a source file
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParserId {
    ReStructuredText,
    Markdown,
    /// Parser provided by an extension, named by its label
    Custom(String),
}

impl ParserId {
    pub fn label(&self) -> &str {
        match self {
            ParserId::ReStructuredText => "restructuredtext",
            ParserId::Markdown => "markdown",
            ParserId::Custom(label) => label,
        }
    }
}

impl From<&str> for ParserId {
    fn from(label: &str) -> Self {
        match label {
            "restructuredtext" => ParserId::ReStructuredText,
            "markdown" => ParserId::Markdown,
            other => ParserId::Custom(other.to_string()),
        }
    }
}

impl From<String> for ParserId {
    fn from(label: String) -> Self {
        ParserId::from(label.as_str())
    }
}

impl fmt::Display for ParserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for ParserId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Normalize a suffix to its `.ext` form
pub fn normalize_suffix(suffix: &str) -> Result<String> {
    let trimmed = suffix.trim();
    let bare = trimmed.strip_prefix('.').unwrap_or(trimmed);

    if bare.is_empty() || bare.chars().any(|c| c.is_whitespace() || c == '/' || c == '\\') {
        return Err(ConfigError::InvalidSuffix(suffix.to_string()));
    }

    Ok(format!(".{}", bare))
}

/// Many-to-one mapping from file suffix to parser
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SourceDispatchTable {
    bindings: BTreeMap<String, ParserId>,
}

impl SourceDispatchTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a suffix to a parser.
    ///
    /// Rebinding a suffix to the parser it already has is accepted; binding
    /// it to a different parser is a conflict.
    pub fn bind(&mut self, suffix: &str, parser: impl Into<ParserId>) -> Result<()> {
        let suffix = normalize_suffix(suffix)?;
        let parser = parser.into();

        if let Some(existing) = self.bindings.get(&suffix) {
            if *existing == parser {
                return Ok(());
            }
            return Err(ConfigError::Conflict {
                suffix,
                existing: existing.to_string(),
                requested: parser.to_string(),
            });
        }

        debug!("Bound {} -> {}", suffix, parser);
        self.bindings.insert(suffix, parser);
        Ok(())
    }

    pub fn resolve(&self, suffix: &str) -> Result<&ParserId> {
        let unknown = || ConfigError::UnknownSuffix(suffix.to_string());
        let suffix = normalize_suffix(suffix).map_err(|_| unknown())?;
        self.bindings.get(&suffix).ok_or_else(unknown)
    }

    /// Dispatch a file by the longest bound suffix its name ends with
    pub fn resolve_path(&self, path: &Path) -> Result<&ParserId> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ConfigError::UnknownSuffix(path.display().to_string()))?;

        self.bindings
            .iter()
            .filter(|(suffix, _)| file_name.len() > suffix.len() && file_name.ends_with(suffix.as_str()))
            .max_by_key(|(suffix, _)| suffix.len())
            .map(|(_, parser)| parser)
            .ok_or_else(|| {
                let ext = path
                    .extension()
                    .map(|e| format!(".{}", e.to_string_lossy()))
                    .unwrap_or_else(|| file_name.to_string());
                ConfigError::UnknownSuffix(ext)
            })
    }

    /// All suffixes routed to one parser, sorted
    pub fn suffixes_for(&self, parser: &ParserId) -> Vec<&str> {
        self.bindings
            .iter()
            .filter(|(_, p)| *p == parser)
            .map(|(s, _)| s.as_str())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParserId)> {
        self.bindings.iter().map(|(s, p)| (s.as_str(), p))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
