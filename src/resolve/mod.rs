//! Validated configuration components and the resolver that assembles them

pub mod dispatch;
pub mod extensions;
pub mod resolver;
pub mod settings;
pub mod theme;

pub use dispatch::{normalize_suffix, ParserId, SourceDispatchTable};
pub use extensions::ExtensionRegistry;
pub use resolver::{resolve, BuildState, ConfigBuilder, ConfigMut, ResolvedConfig, Resolver};
pub use settings::{SettingValue, SettingsStore};
pub use theme::{Color, ThemeConfig, ThemeVariant, NAMED_COLORS};
