//! docconf - Documentation build configuration resolver
//!
//! Loads a declarative `docconf.toml`, validates it, and produces one
//! immutable [`ResolvedConfig`] for an external documentation renderer:
//! project settings, ordered extensions, suffix-to-parser dispatch, and a
//! light/dark theme.

pub mod config;
pub mod resolve;
pub mod types;

pub use config::{ConfigLoader, LoadedConfig, RawConfig};
pub use resolve::{ResolvedConfig, Resolver};
pub use types::ConfigError;
