//! # CLI Configuration
//!
//! Optional YAML file passed with `--config`. Every field has a default, so
//! a missing flag or an empty file yields the defaults.
//!
//! ```yaml
//! log_format: json   # text | json
//! output: text       # text | json
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Format of log lines written to stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Format of drain records written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `process:<id> [<outcome>]: STATE(seq) ...`, one line per drain.
    #[default]
    Text,
    /// A JSON array of drain records.
    Json,
}

/// Settings loaded from the `--config` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LcrConfig {
    /// Log line format.
    pub log_format: LogFormat,
    /// Default output format; `--format` overrides it.
    pub output: OutputFormat,
}

/// Errors loading the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid configuration document.
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl LcrConfig {
    /// Parse a configuration document. Blank input yields the defaults.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }
}

/// Load the configuration, or the defaults when no path is given.
pub fn load(path: Option<&Path>) -> Result<LcrConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(LcrConfig::default());
    };
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    LcrConfig::from_yaml(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_path_yields_defaults() {
        let config = load(None).unwrap();
        assert_eq!(config, LcrConfig::default());
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.output, OutputFormat::Text);
    }

    #[test]
    fn test_blank_document_yields_defaults() {
        assert_eq!(LcrConfig::from_yaml("  \n").unwrap(), LcrConfig::default());
    }

    #[test]
    fn test_partial_document_keeps_other_defaults() {
        let config = LcrConfig::from_yaml("output: json\n").unwrap();
        assert_eq!(config.output, OutputFormat::Json);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(LcrConfig::from_yaml("colour: blue\n").is_err());
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(LcrConfig::from_yaml("log_format: xml\n").is_err());
    }

    #[test]
    fn test_load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");
        let err = load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("absent.yaml"));
    }

    #[test]
    fn test_load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lcr.yaml");
        std::fs::write(&path, "log_format: json\noutput: json\n").unwrap();
        let config = load(Some(&path)).unwrap();
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.output, OutputFormat::Json);
    }
}
