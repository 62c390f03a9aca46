//! Configuration types for envcheck (`envcheck.toml`).

use crate::check::CheckOptions;
use crate::merge::TypeMap;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration for envcheck.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Single-file check policy.
    #[serde(default)]
    pub check: CheckConfig,

    /// Explicit variable types, overriding annotation comments.
    #[serde(default)]
    pub types: TypeMap,

    /// Monorepo scan configuration.
    #[serde(default)]
    pub monorepo: MonorepoConfig,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Builds check options from this configuration.
    #[must_use]
    pub fn check_options(&self) -> CheckOptions {
        CheckOptions {
            example_path: self.check.example.clone(),
            required: self.check.required.clone(),
            no_empty: self.check.no_empty,
            no_extra: self.check.no_extra,
            strict: self.check.strict,
            types: self.types.clone(),
            validate_types: self.check.validate_types,
            detect_secrets: self.check.detect_secrets,
        }
    }
}

/// Policy switches for checking one env file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Example file (default: auto-detected next to the env file).
    #[serde(default)]
    pub example: Option<PathBuf>,

    /// Variables that must be present and non-empty.
    #[serde(default)]
    pub required: Vec<String>,

    /// Warn on empty values.
    #[serde(default)]
    pub no_empty: bool,

    /// Fail on variables not in the example.
    #[serde(default)]
    pub no_extra: bool,

    /// Fail on empty variables shared with the example.
    #[serde(default)]
    pub strict: bool,

    /// Validate types even when none are declared.
    #[serde(default)]
    pub validate_types: bool,

    /// Scan the example for committed credentials.
    #[serde(default)]
    pub detect_secrets: bool,
}

/// Monorepo scan configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonorepoConfig {
    /// Glob patterns, relative to the root, that match app directories.
    #[serde(default = "default_containers")]
    pub containers: Vec<String>,

    /// Cross-check types of variables shared between apps.
    #[serde(default = "default_true")]
    pub check_consistency: bool,

    /// Scan example files for committed credentials.
    #[serde(default)]
    pub detect_secrets: bool,

    /// Maximum number of apps checked in parallel.
    #[serde(default)]
    pub parallelism: Option<usize>,
}

impl Default for MonorepoConfig {
    fn default() -> Self {
        Self {
            containers: default_containers(),
            check_consistency: true,
            detect_secrets: false,
            parallelism: None,
        }
    }
}

fn default_containers() -> Vec<String> {
    vec!["apps/*".to_string(), "packages/*".to_string()]
}

fn default_true() -> bool {
    true
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}
