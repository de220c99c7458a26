//! Raw configuration input for docconf
//!
//! Covers discovery and parsing of `docconf.toml`. Nothing here validates
//! the content; that happens in [`crate::resolve`].

mod defaults;
mod loader;
mod raw;

pub use defaults::{default_config, DEFAULT_CONFIG_FILE};
pub use loader::{ConfigLoader, LoadedConfig, CONFIG_ENV_VAR};
pub use raw::{PathsConfig, ProjectInfo, RawConfig, RawTheme, SourceSuffixes, SuffixBinding};
