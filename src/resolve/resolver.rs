//! Resolution of raw input into a frozen configuration snapshot
//!
//! A [`ConfigBuilder`] moves through `Empty -> Assembling -> Validated ->
//! Frozen`. Freezing hands out a [`ResolvedConfig`]; from then on every
//! mutation, on the builder or on the snapshot, fails with
//! [`ConfigError::FrozenConfig`].

use crate::config::{LoadedConfig, RawConfig};
use crate::resolve::dispatch::{ParserId, SourceDispatchTable};
use crate::resolve::extensions::ExtensionRegistry;
use crate::resolve::settings::{SettingValue, SettingsStore};
use crate::resolve::theme::{ThemeConfig, ThemeVariant};
use crate::types::{ConfigError, Result};
use path_clean::clean;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    Empty,
    Assembling,
    Validated,
    Frozen,
}

impl BuildState {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildState::Empty => "empty",
            BuildState::Assembling => "assembling",
            BuildState::Validated => "validated",
            BuildState::Frozen => "frozen",
        }
    }
}

/// Mutations accepted while a configuration is being assembled
pub trait ConfigMut {
    fn set(&mut self, name: &str, value: SettingValue) -> Result<()>;
    fn register(&mut self, extension: &str) -> Result<()>;
    fn bind(&mut self, suffix: &str, parser: ParserId) -> Result<()>;
    fn set_variant(
        &mut self,
        variant: ThemeVariant,
        variables: &BTreeMap<String, String>,
    ) -> Result<()>;
    fn set_theme_name(&mut self, name: &str) -> Result<()>;
    fn set_theme_option(&mut self, key: &str, value: SettingValue) -> Result<()>;
}

#[derive(Debug, PartialEq, Serialize)]
struct Snapshot {
    settings: SettingsStore,
    extensions: ExtensionRegistry,
    source_suffix: SourceDispatchTable,
    theme: ThemeConfig,
}

#[derive(Debug)]
pub struct ConfigBuilder {
    state: BuildState,
    settings: SettingsStore,
    extensions: ExtensionRegistry,
    dispatch: SourceDispatchTable,
    theme: ThemeConfig,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            state: BuildState::Empty,
            settings: SettingsStore::new(),
            extensions: ExtensionRegistry::new(),
            dispatch: SourceDispatchTable::new(),
            theme: ThemeConfig::new(),
        }
    }

    pub fn state(&self) -> BuildState {
        self.state
    }

    /// Gate for every mutation. A validated builder goes back to assembling
    /// and must be validated again before it can be frozen.
    fn begin_mutation(&mut self) -> Result<()> {
        match self.state {
            BuildState::Frozen => Err(ConfigError::FrozenConfig),
            _ => {
                self.state = BuildState::Assembling;
                Ok(())
            }
        }
    }

    pub fn validate(&mut self) -> Result<()> {
        match self.state {
            BuildState::Frozen => return Err(ConfigError::FrozenConfig),
            BuildState::Validated => return Ok(()),
            BuildState::Empty | BuildState::Assembling => {}
        }

        self.theme.validate()?;
        self.state = BuildState::Validated;
        debug!("Configuration validated");
        Ok(())
    }

    /// Hand out the immutable snapshot. Only a validated builder can freeze.
    pub fn freeze(&mut self) -> Result<ResolvedConfig> {
        match self.state {
            BuildState::Validated => {}
            BuildState::Frozen => return Err(ConfigError::FrozenConfig),
            other => {
                return Err(ConfigError::InvalidState {
                    action: "freeze",
                    state: other.as_str(),
                })
            }
        }

        self.state = BuildState::Frozen;
        let snapshot = Snapshot {
            settings: std::mem::take(&mut self.settings),
            extensions: std::mem::take(&mut self.extensions),
            source_suffix: std::mem::take(&mut self.dispatch),
            theme: std::mem::take(&mut self.theme),
        };

        Ok(ResolvedConfig {
            inner: Arc::new(snapshot),
        })
    }
}

impl ConfigMut for ConfigBuilder {
    fn set(&mut self, name: &str, value: SettingValue) -> Result<()> {
        self.begin_mutation()?;
        self.settings.set(name, value);
        Ok(())
    }

    fn register(&mut self, extension: &str) -> Result<()> {
        self.begin_mutation()?;
        self.extensions.register(extension)
    }

    fn bind(&mut self, suffix: &str, parser: ParserId) -> Result<()> {
        self.begin_mutation()?;
        self.dispatch.bind(suffix, parser)
    }

    fn set_variant(
        &mut self,
        variant: ThemeVariant,
        variables: &BTreeMap<String, String>,
    ) -> Result<()> {
        self.begin_mutation()?;
        self.theme.set_variant(variant, variables)
    }

    fn set_theme_name(&mut self, name: &str) -> Result<()> {
        self.begin_mutation()?;
        self.theme.name = Some(name.to_string());
        Ok(())
    }

    fn set_theme_option(&mut self, key: &str, value: SettingValue) -> Result<()> {
        self.begin_mutation()?;
        self.theme.options.insert(key.to_string(), value);
        Ok(())
    }
}

/// Immutable, validated configuration handed to the renderer.
///
/// Clones share one snapshot and can be read from any thread.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    inner: Arc<Snapshot>,
}

impl ResolvedConfig {
    pub fn settings(&self) -> &SettingsStore {
        &self.inner.settings
    }

    pub fn extensions(&self) -> &ExtensionRegistry {
        &self.inner.extensions
    }

    pub fn dispatch_table(&self) -> &SourceDispatchTable {
        &self.inner.source_suffix
    }

    pub fn theme(&self) -> &ThemeConfig {
        &self.inner.theme
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl PartialEq for ResolvedConfig {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Serialize for ResolvedConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.inner.serialize(serializer)
    }
}

impl ConfigMut for ResolvedConfig {
    fn set(&mut self, _name: &str, _value: SettingValue) -> Result<()> {
        Err(ConfigError::FrozenConfig)
    }

    fn register(&mut self, _extension: &str) -> Result<()> {
        Err(ConfigError::FrozenConfig)
    }

    fn bind(&mut self, _suffix: &str, _parser: ParserId) -> Result<()> {
        Err(ConfigError::FrozenConfig)
    }

    fn set_variant(
        &mut self,
        _variant: ThemeVariant,
        _variables: &BTreeMap<String, String>,
    ) -> Result<()> {
        Err(ConfigError::FrozenConfig)
    }

    fn set_theme_name(&mut self, _name: &str) -> Result<()> {
        Err(ConfigError::FrozenConfig)
    }

    fn set_theme_option(&mut self, _key: &str, _value: SettingValue) -> Result<()> {
        Err(ConfigError::FrozenConfig)
    }
}

/// Turns raw input into a [`ResolvedConfig`] in one pass
pub struct Resolver {
    base_dir: PathBuf,
}

impl Resolver {
    /// `base_dir` anchors every relative path in the raw input
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Resolve raw input. Any failure aborts the whole resolution.
    pub fn resolve(&self, raw: &RawConfig) -> Result<ResolvedConfig> {
        let mut builder = ConfigBuilder::new();

        self.apply_settings(&mut builder, raw)?;

        for extension in &raw.extensions {
            builder.register(extension)?;
        }

        for (suffix, parser) in raw.source_suffix.bindings() {
            builder.bind(suffix, ParserId::from(parser))?;
        }

        Self::apply_theme(&mut builder, raw)?;

        builder.validate()?;
        let resolved = builder.freeze()?;

        info!(
            "Resolved configuration: {} settings, {} extensions, {} suffixes",
            resolved.settings().len(),
            resolved.extensions().len(),
            resolved.dispatch_table().len()
        );
        Ok(resolved)
    }

    fn apply_settings(&self, builder: &mut ConfigBuilder, raw: &RawConfig) -> Result<()> {
        // Free-form settings go first so the structured sections win on overlap
        for (name, value) in &raw.settings {
            builder.set(name, SettingValue::from(value.clone()))?;
        }

        let project = &raw.project;
        for (name, value) in [
            ("project", &project.name),
            ("copyright", &project.copyright),
            ("author", &project.author),
        ] {
            if let Some(value) = value {
                builder.set(name, SettingValue::Text(value.clone()))?;
            }
        }

        if let Some(root) = &raw.paths.source_root {
            builder.set("source_root", SettingValue::Path(self.anchor(root)))?;
        }
        builder.set("templates_path", self.path_list(&raw.paths.templates))?;
        builder.set("html_static_path", self.path_list(&raw.paths.static_files))?;
        builder.set(
            "exclude_patterns",
            SettingValue::List(
                raw.exclude_patterns
                    .iter()
                    .map(|p| SettingValue::Text(p.clone()))
                    .collect(),
            ),
        )?;

        if let Some(name) = &raw.theme.name {
            builder.set("html_theme", SettingValue::Text(name.clone()))?;
        }

        Ok(())
    }

    fn apply_theme(builder: &mut ConfigBuilder, raw: &RawConfig) -> Result<()> {
        let theme = &raw.theme;

        if let Some(name) = &theme.name {
            builder.set_theme_name(name)?;
        }
        for (key, value) in &theme.options {
            builder.set_theme_option(key, SettingValue::from(value.clone()))?;
        }
        if let Some(light) = &theme.light {
            builder.set_variant(ThemeVariant::Light, light)?;
        }
        if let Some(dark) = &theme.dark {
            builder.set_variant(ThemeVariant::Dark, dark)?;
        }

        Ok(())
    }

    fn anchor(&self, path: &str) -> PathBuf {
        clean(self.base_dir.join(path))
    }

    fn path_list(&self, paths: &[String]) -> SettingValue {
        SettingValue::List(
            paths
                .iter()
                .map(|p| SettingValue::Path(self.anchor(p)))
                .collect(),
        )
    }
}

/// Resolve loaded input against the directory it was read from
pub fn resolve(loaded: &LoadedConfig) -> Result<ResolvedConfig> {
    Resolver::new(&loaded.base_dir).resolve(&loaded.raw)
}
