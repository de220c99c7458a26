//! Resolved key/value settings

use crate::types::{ConfigError, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A single resolved setting value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SettingValue {
    Text(String),
    Bool(bool),
    Integer(i64),
    Float(f64),
    Path(PathBuf),
    List(Vec<SettingValue>),
    Table(BTreeMap<String, SettingValue>),
}

impl SettingValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SettingValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            SettingValue::Path(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[SettingValue]> {
        match self {
            SettingValue::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<toml::Value> for SettingValue {
    fn from(value: toml::Value) -> Self {
        match value {
            toml::Value::String(s) => SettingValue::Text(s),
            toml::Value::Integer(i) => SettingValue::Integer(i),
            toml::Value::Float(f) => SettingValue::Float(f),
            toml::Value::Boolean(b) => SettingValue::Bool(b),
            toml::Value::Datetime(dt) => SettingValue::Text(dt.to_string()),
            toml::Value::Array(items) => {
                SettingValue::List(items.into_iter().map(SettingValue::from).collect())
            }
            toml::Value::Table(table) => SettingValue::Table(
                table
                    .into_iter()
                    .map(|(k, v)| (k, SettingValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for SettingValue {
    fn from(s: &str) -> Self {
        SettingValue::Text(s.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(s: String) -> Self {
        SettingValue::Text(s)
    }
}

impl From<PathBuf> for SettingValue {
    fn from(p: PathBuf) -> Self {
        SettingValue::Path(p)
    }
}

impl From<bool> for SettingValue {
    fn from(b: bool) -> Self {
        SettingValue::Bool(b)
    }
}

/// Settings keyed by name, iterated in sorted order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SettingsStore {
    values: BTreeMap<String, SettingValue>,
}

impl SettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a setting, replacing any previous value under the same name
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<SettingValue>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Result<&SettingValue> {
        self.values
            .get(name)
            .ok_or_else(|| ConfigError::NotFound(name.to_string()))
    }

    /// Get a text setting; a present value of another kind counts as absent
    pub fn get_text(&self, name: &str) -> Result<&str> {
        self.get(name)?
            .as_text()
            .ok_or_else(|| ConfigError::NotFound(name.to_string()))
    }

    pub fn get_path(&self, name: &str) -> Result<&Path> {
        self.get(name)?
            .as_path()
            .ok_or_else(|| ConfigError::NotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SettingValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}
