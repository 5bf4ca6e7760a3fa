// SPDX-License-Identifier: MIT

//! YAML schema types for check suites

use serde::{Deserialize, Serialize};

/// Top-level suite definition
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SuiteDefinition {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub checks: Vec<CheckDefinition>,
}

/// One subject and the expectations run against it
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CheckDefinition {
    /// Label for reports; the rendered subject is used when absent
    #[serde(default)]
    pub name: Option<String>,
    /// The actual value. A missing key means nil.
    #[serde(default)]
    pub describe: serde_yaml::Value,
    /// Matcher expressions, e.g. `cmp < 133`
    pub it: Vec<String>,
}
