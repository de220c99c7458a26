use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Setting not found: {0}")]
    NotFound(String),

    #[error("Extension already registered: {0}")]
    DuplicateExtension(String),

    #[error("Suffix '{suffix}' is bound to '{existing}', cannot rebind to '{requested}'")]
    Conflict {
        suffix: String,
        existing: String,
        requested: String,
    },

    #[error("No parser bound for suffix '{0}'")]
    UnknownSuffix(String),

    #[error("Invalid source suffix: {0:?}")]
    InvalidSuffix(String),

    #[error("Invalid color '{value}' for theme variable '{variable}'")]
    InvalidColor { variable: String, value: String },

    #[error(
        "Theme variants are asymmetric: missing in light: [{}], missing in dark: [{}]",
        .missing_in_light.join(", "),
        .missing_in_dark.join(", ")
    )]
    AsymmetricTheme {
        missing_in_light: Vec<String>,
        missing_in_dark: Vec<String>,
    },

    #[error("Configuration is frozen")]
    FrozenConfig,

    #[error("Cannot {action} while configuration is {state}")]
    InvalidState {
        action: &'static str,
        state: &'static str,
    },

    #[error("No configuration file found (searched: {})", display_paths(.searched))]
    ConfigNotFound { searched: Vec<PathBuf> },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize configuration: {0}")]
    Serialize(String),
}

impl From<toml::ser::Error> for ConfigError {
    fn from(e: toml::ser::Error) -> Self {
        ConfigError::Serialize(e.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Serialize(e.to_string())
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, ConfigError>;
