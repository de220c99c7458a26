//! Ordered registry of renderer extensions
//!
//! The renderer activates extensions in registration order, so the order
//! recorded here is part of the resolved configuration.

use crate::types::{ConfigError, Result};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExtensionRegistry {
    names: Vec<String>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an extension; a name may only be registered once
    pub fn register(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if self.contains(&name) {
            return Err(ConfigError::DuplicateExtension(name));
        }
        self.names.push(name);
        Ok(())
    }

    /// Extensions in activation order
    pub fn list(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Activation index of an extension
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
