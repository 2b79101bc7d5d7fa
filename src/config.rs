//! Configuration files for message formatting
//!
//! A config file is TOML and may carry the pattern to render plus formatter
//! options:
//!
//! ```toml
//! pattern = "[{.params.type|MessageType}] {.params.message}"
//! json_indent = 4
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::template::{FormatterRegistry, DEFAULT_JSON_INDENT};

/// Errors that can occur when loading or parsing config files
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Formatting options loaded from a config file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Pattern used when none is given on the command line
    pub pattern: Option<String>,
    /// Indent for `json` and for markers without a formatter
    pub json_indent: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pattern: None,
            json_indent: DEFAULT_JSON_INDENT,
        }
    }
}

impl Config {
    /// Load config from TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load config from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Set the pattern
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Set the JSON indent
    pub fn with_json_indent(mut self, indent: usize) -> Self {
        self.json_indent = indent;
        self
    }

    /// Build a formatter registry honoring these options
    pub fn registry(&self) -> FormatterRegistry {
        FormatterRegistry::new().with_json_indent(self.json_indent)
    }
}
