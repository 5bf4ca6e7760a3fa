// SPDX-License-Identifier: MIT

//! Suite loader - YAML file loading and parsing

use super::types::SuiteDefinition;
use crate::error::Result;
use std::fs;
use std::path::Path;

/// Loads check suites from YAML files
pub struct SuiteLoader;

impl SuiteLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load a suite definition from a YAML file
    pub fn load_suite<P: AsRef<Path>>(&self, path: P) -> Result<SuiteDefinition> {
        let path = path.as_ref();
        log::debug!("Loading suite from {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::parse_yaml(&content)
    }

    /// Parse a suite definition from a YAML string
    pub fn parse_yaml(content: &str) -> Result<SuiteDefinition> {
        let def: SuiteDefinition = serde_yaml::from_str(content)?;
        Ok(def)
    }
}

impl Default for SuiteLoader {
    fn default() -> Self {
        Self::new()
    }
}
