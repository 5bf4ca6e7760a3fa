// SPDX-License-Identifier: MIT

//! Typed error handling for cmp-check
//!
//! Comparisons themselves never fail; these errors come from parsing
//! matcher expressions, compiling patterns and loading check suites.

use thiserror::Error;

/// Top-level error type for cmp-check
#[derive(Debug, Error)]
pub enum CmpError {
    /// Malformed matcher expression or literal
    #[error("Parse error in '{input}': {message}")]
    Parse { input: String, message: String },

    /// Regex literal that does not compile
    #[error("Invalid pattern /{pattern}/: {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Operator outside ==, <, >, <=, >=, =~
    #[error("Unknown comparison operator: {0}")]
    UnknownOperator(String),

    /// Value kind the comparator cannot represent (e.g. a mapping)
    #[error("Unsupported value: {0}")]
    UnsupportedValue(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// YAML parsing errors
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl CmpError {
    /// Create a parse error
    pub fn parse(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            input: input.into(),
            message: message.into(),
        }
    }

    /// Create an unsupported value error
    pub fn unsupported(what: impl Into<String>) -> Self {
        Self::UnsupportedValue(what.into())
    }
}

pub type Result<T> = std::result::Result<T, CmpError>;
