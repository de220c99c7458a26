//! Theme configuration with light/dark color variants

use crate::resolve::settings::SettingValue;
use crate::types::{ConfigError, Result};
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Basic CSS color keywords accepted as named colors
pub const NAMED_COLORS: &[&str] = &[
    "black", "silver", "gray", "white", "maroon", "red", "purple", "fuchsia", "green", "lime",
    "olive", "yellow", "navy", "blue", "teal", "aqua",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ThemeVariant {
    Light,
    Dark,
}

impl ThemeVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeVariant::Light => "light",
            ThemeVariant::Dark => "dark",
        }
    }
}

// Serialized as a plain string so it can key maps in every output format
impl Serialize for ThemeVariant {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for ThemeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated color token: `#RGB`, `#RRGGBB`, or a named color
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    /// Parse a color token, returning `None` when it is not recognized
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();

        if let Some(hex) = token.strip_prefix('#') {
            let valid = matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit());
            return valid.then(|| Color(token.to_string()));
        }

        let lower = token.to_ascii_lowercase();
        NAMED_COLORS
            .contains(&lower.as_str())
            .then_some(Color(lower))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ThemeConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub options: BTreeMap<String, SettingValue>,
    variants: BTreeMap<ThemeVariant, BTreeMap<String, Color>>,
}

impl ThemeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set all style variables of a variant, replacing any previous set.
    ///
    /// Every value is checked before anything is stored, so a rejected call
    /// leaves the variant unchanged.
    pub fn set_variant<K, V, I>(&mut self, variant: ThemeVariant, variables: I) -> Result<()>
    where
        K: Into<String>,
        V: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut parsed = BTreeMap::new();
        for (name, value) in variables {
            let name = name.into();
            let value = value.as_ref();
            let color = Color::parse(value).ok_or_else(|| ConfigError::InvalidColor {
                variable: name.clone(),
                value: value.to_string(),
            })?;
            parsed.insert(name, color);
        }

        self.variants.insert(variant, parsed);
        Ok(())
    }

    pub fn variant(&self, variant: ThemeVariant) -> Option<&BTreeMap<String, Color>> {
        self.variants.get(&variant)
    }

    pub fn color(&self, variant: ThemeVariant, variable: &str) -> Option<&Color> {
        self.variants.get(&variant)?.get(variable)
    }

    pub fn variants(&self) -> impl Iterator<Item = ThemeVariant> + '_ {
        self.variants.keys().copied()
    }

    /// Check that every registered variant defines the same variables
    pub fn validate(&self) -> Result<()> {
        let (Some(light), Some(dark)) = (
            self.variants.get(&ThemeVariant::Light),
            self.variants.get(&ThemeVariant::Dark),
        ) else {
            return Ok(());
        };

        let light: BTreeSet<&String> = light.keys().collect();
        let dark: BTreeSet<&String> = dark.keys().collect();
        if light == dark {
            return Ok(());
        }

        Err(ConfigError::AsymmetricTheme {
            missing_in_light: dark.difference(&light).map(|s| s.to_string()).collect(),
            missing_in_dark: light.difference(&dark).map(|s| s.to_string()).collect(),
        })
    }
}
