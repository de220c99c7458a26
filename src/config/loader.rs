//! Configuration file discovery and loading
//!
//! Candidates, in precedence order:
//! 1. An explicit path (`--config`)
//! 2. `$DOCCONF_CONFIG`
//! 3. `./docconf.toml`
//! 4. `~/.config/docconf/config.toml`
//!
//! An explicit path disables the search: it is the only candidate.

use crate::config::defaults::DEFAULT_CONFIG_FILE;
use crate::config::RawConfig;
use crate::types::{ConfigError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const CONFIG_ENV_VAR: &str = "DOCCONF_CONFIG";

/// Raw input together with the directory its relative paths refer to
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub raw: RawConfig,
    /// File the input was read from, if any
    pub origin: Option<PathBuf>,
    pub base_dir: PathBuf,
}

pub struct ConfigLoader {
    candidates: Vec<PathBuf>,
}

impl ConfigLoader {
    /// Build the candidate list, reading the environment once
    pub fn new(explicit: Option<PathBuf>) -> Self {
        if let Some(path) = explicit {
            return Self::with_candidates(vec![path]);
        }

        let mut candidates = Vec::new();

        if let Ok(config_path) = std::env::var(CONFIG_ENV_VAR) {
            candidates.push(PathBuf::from(config_path));
        }

        if let Ok(cwd) = std::env::current_dir() {
            candidates.push(cwd.join(DEFAULT_CONFIG_FILE));
        }

        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join("docconf").join("config.toml"));
        }

        Self::with_candidates(candidates)
    }

    pub fn with_candidates(candidates: Vec<PathBuf>) -> Self {
        Self { candidates }
    }

    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// Load the first candidate that exists
    pub fn load(&self) -> Result<LoadedConfig> {
        for path in &self.candidates {
            if path.is_file() {
                return Self::load_file(path);
            }
            debug!("No configuration at {}", path.display());
        }

        Err(ConfigError::ConfigNotFound {
            searched: self.candidates.clone(),
        })
    }

    pub fn load_file(path: &Path) -> Result<LoadedConfig> {
        let path = path.canonicalize()?;
        debug!("Loading configuration from: {}", path.display());

        let content = std::fs::read_to_string(&path)?;
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("/"));

        let mut loaded = Self::load_str(&content, base_dir)?;
        loaded.origin = Some(path);
        info!(
            "Loaded configuration with {} extensions",
            loaded.raw.extensions.len()
        );
        Ok(loaded)
    }

    /// Parse raw input held in memory
    pub fn load_str(content: &str, base_dir: impl Into<PathBuf>) -> Result<LoadedConfig> {
        let raw = RawConfig::from_toml_str(content)?;
        Ok(LoadedConfig {
            raw,
            origin: None,
            base_dir: base_dir.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_first_existing_candidate() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.toml");
        let present = dir.path().join("docconf.toml");
        std::fs::write(&present, "extensions = [\"sphinx.ext.autodoc\"]\n").unwrap();

        let loader = ConfigLoader::with_candidates(vec![missing, present]);
        let loaded = loader.load().unwrap();

        assert_eq!(loaded.raw.extensions, vec!["sphinx.ext.autodoc"]);
        assert_eq!(loaded.base_dir, dir.path().canonicalize().unwrap());
        assert!(loaded.origin.unwrap().ends_with("docconf.toml"));
    }

    #[test]
    fn test_no_candidate_found() {
        let dir = TempDir::new().unwrap();
        let loader = ConfigLoader::with_candidates(vec![dir.path().join("nope.toml")]);

        match loader.load().unwrap_err() {
            ConfigError::ConfigNotFound { searched } => assert_eq!(searched.len(), 1),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_explicit_path_is_only_candidate() {
        let loader = ConfigLoader::new(Some(PathBuf::from("custom.toml")));
        assert_eq!(loader.candidates(), &[PathBuf::from("custom.toml")]);
    }

    #[test]
    fn test_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("docconf.toml");
        std::fs::write(&path, "extensions = [").unwrap();

        assert!(matches!(
            ConfigLoader::load_file(&path),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_str() {
        let loaded = ConfigLoader::load_str("[project]\nname = \"Docs\"\n", "/docs").unwrap();
        assert_eq!(loaded.raw.project.name.as_deref(), Some("Docs"));
        assert_eq!(loaded.base_dir, PathBuf::from("/docs"));
        assert!(loaded.origin.is_none());
    }
}
