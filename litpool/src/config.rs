//!
//! # Configuration
//!
//! Settings for the `litpool` command, read from a `litpool.toml` found by
//! walking up from the path being inspected. Every field has a default, so
//! the file and each of its tables are optional.
//!
//! ## Example litpool.toml
//!
//! ```toml
//! [scan]
//! extensions = ["js", "mjs"]
//! identifiers = true
//!
//! [report]
//! format = "json"
//! ```
//!

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = "litpool.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub scan: ScanConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// File extensions `litpool check` picks up when walking a directory.
    pub extensions: Vec<String>,
    /// Whether identifiers are interned alongside string and number literals.
    pub identifiers: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["js".to_string(), "mjs".to_string()],
            identifiers: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    pub format: ReportFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the nearest `litpool.toml` above `start`, or the defaults.
    pub fn discover(start: &Path) -> Result<Self, ConfigError> {
        let start = start.canonicalize().unwrap_or_else(|_| start.to_path_buf());
        match find_config(&start) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::load(&path)
            }
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.scan.extensions.is_empty() {
            return Err(ConfigError::Invalid(
                "scan.extensions must name at least one extension".to_string(),
            ));
        }
        if let Some(ext) = self.scan.extensions.iter().find(|e| e.is_empty() || e.starts_with('.')) {
            return Err(ConfigError::Invalid(format!(
                "extension '{}' must be non-empty and written without a leading dot",
                ext
            )));
        }
        Ok(())
    }

    pub fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| self.scan.extensions.iter().any(|x| x == e))
    }
}

/// Walks up from `start` (a file or directory) looking for `litpool.toml`.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let mut current = if start.is_file() { start.parent()? } else { start };

    loop {
        let candidate = current.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }

        current = current.parent()?;
    }
}
