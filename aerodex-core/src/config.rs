//! # Configuration Management
//!
//! Handles all configuration for AeroDex components. Every section has a
//! `Default`, and a JSON file only needs to name the fields it overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub index: IndexConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    pub fn from_json(data: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(data).map_err(|e| Error::Configuration {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.index.validate()
    }
}

/// Hash table sizing and resize policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Load factor at or above which the table doubles
    pub grow_threshold: f64,
    /// Load factor at or below which the table halves
    pub shrink_threshold: f64,
    /// The table never shrinks below this many buckets
    pub min_buckets: usize,
    /// Initial buckets per loaded record
    pub initial_fill: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            grow_threshold: 0.75,
            shrink_threshold: 0.10,
            min_buckets: 2,
            initial_fill: 2,
        }
    }
}

impl IndexConfig {
    pub fn validate(&self) -> Result<()> {
        let in_unit = |v: f64| v > 0.0 && v <= 1.0;
        if !in_unit(self.grow_threshold) || !in_unit(self.shrink_threshold) {
            return Err(Error::Configuration {
                message: format!(
                    "thresholds must lie in (0, 1]: grow={}, shrink={}",
                    self.grow_threshold, self.shrink_threshold
                ),
            });
        }
        if self.shrink_threshold >= self.grow_threshold {
            return Err(Error::Configuration {
                message: format!(
                    "shrink threshold {} must be below grow threshold {}",
                    self.shrink_threshold, self.grow_threshold
                ),
            });
        }
        if self.min_buckets == 0 || self.initial_fill == 0 {
            return Err(Error::Configuration {
                message: "min_buckets and initial_fill must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// Bucket count for a table built from `records` entries
    pub fn initial_buckets(&self, records: usize) -> usize {
        records.saturating_mul(self.initial_fill).max(self.min_buckets)
    }
}

/// Data file locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_file: PathBuf,
    pub output_file: PathBuf,
    pub save_on_exit: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("data.txt"),
            output_file: PathBuf::from("outputFile.txt"),
            save_on_exit: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Warn,
            format: LogFormat::Text,
        }
    }
}

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Raise verbosity by `steps` levels, saturating at `Trace`
    pub fn raised(self, steps: u8) -> Self {
        const ORDER: [LogLevel; 5] = [
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ];
        let pos = ORDER.iter().position(|l| *l == self).unwrap_or(0);
        ORDER[(pos + steps as usize).min(ORDER.len() - 1)]
    }

    pub fn as_tracing(self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

/// Log formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.index.grow_threshold, 0.75);
        assert_eq!(config.index.shrink_threshold, 0.10);
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let json = r#"{"index": {"min_buckets": 8}, "logging": {"level": "debug"}}"#;
        let config = Config::from_json(json).unwrap();
        assert_eq!(config.index.min_buckets, 8);
        assert_eq!(config.index.grow_threshold, 0.75);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.storage, StorageConfig::default());
    }

    #[test]
    fn test_rejects_inverted_thresholds() {
        let json = r#"{"index": {"grow_threshold": 0.1, "shrink_threshold": 0.5}}"#;
        let err = Config::from_json(json).unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn test_rejects_zero_min_buckets() {
        let mut index = IndexConfig::default();
        index.min_buckets = 0;
        assert!(index.validate().is_err());
    }

    #[test]
    fn test_initial_buckets_never_below_minimum() {
        let index = IndexConfig::default();
        assert_eq!(index.initial_buckets(0), 2);
        assert_eq!(index.initial_buckets(4), 8);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aerodex.json");
        std::fs::write(&path, r#"{"storage": {"save_on_exit": false}}"#).unwrap();
        let config = Config::from_file(&path).unwrap();
        assert!(!config.storage.save_on_exit);
    }

    #[test]
    fn test_log_level_raised() {
        assert_eq!(LogLevel::Warn.raised(1), LogLevel::Info);
        assert_eq!(LogLevel::Warn.raised(9), LogLevel::Trace);
    }
}
