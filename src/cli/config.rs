//! Configuration file
//!
//! JSON object, every field optional:
//!
//! ```json
//! {
//!   "store_dir": "./dte_runs",
//!   "max_rows": 1000,
//!   "schema_sample_rows": 200,
//!   "expected_columns": { "price": "real" },
//!   "log_level": "info"
//! }
//! ```
//!
//! Detector thresholds are deliberately absent.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ingest::{ColumnType, IngestOptions};
use crate::observability::Severity;

use super::errors::{CliError, CliResult};

/// Used when `--config` is not given; may be absent
pub const DEFAULT_CONFIG_PATH: &str = "./datathought.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Run store directory
    #[serde(default = "default_store_dir")]
    pub store_dir: String,

    /// Rows ingested for analysis
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,

    /// Rows sampled for type inference
    #[serde(default = "default_schema_sample_rows")]
    pub schema_sample_rows: usize,

    /// Columns that must exist with the given type
    #[serde(default)]
    pub expected_columns: BTreeMap<String, ColumnType>,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_store_dir() -> String {
    "./dte_runs".to_string()
}
fn default_max_rows() -> usize {
    1000
}
fn default_schema_sample_rows() -> usize {
    200
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
            max_rows: default_max_rows(),
            schema_sample_rows: default_schema_sample_rows(),
            expected_columns: BTreeMap::new(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// An explicit path must exist. Without one, the default path is
    /// loaded if present and built-in defaults are used otherwise.
    pub fn resolve(explicit: Option<&Path>) -> CliResult<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn validate(&self) -> CliResult<()> {
        if self.store_dir.trim().is_empty() {
            return Err(CliError::config_error("store_dir must not be empty"));
        }

        if self.max_rows == 0 {
            return Err(CliError::config_error("max_rows must be > 0"));
        }

        if self.schema_sample_rows == 0 {
            return Err(CliError::config_error("schema_sample_rows must be > 0"));
        }

        if Severity::parse(&self.log_level).is_none() {
            return Err(CliError::config_error(format!(
                "Invalid log_level: '{}'. Expected trace, info, warn, error or fatal.",
                self.log_level
            )));
        }

        Ok(())
    }

    pub fn store_path(&self) -> PathBuf {
        PathBuf::from(&self.store_dir)
    }

    pub fn ingest_options(&self) -> IngestOptions {
        IngestOptions {
            max_rows: self.max_rows,
            sample_rows: self.schema_sample_rows,
        }
    }

    pub fn severity(&self) -> Severity {
        Severity::parse(&self.log_level).unwrap_or(Severity::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn write_config(temp_dir: &TempDir, value: serde_json::Value) -> PathBuf {
        let path = temp_dir.path().join("datathought.json");
        fs::write(&path, value.to_string()).unwrap();
        path
    }

    #[test]
    fn test_config_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, json!({}));

        let config = Config::load(&path).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.store_dir, "./dte_runs");
        assert_eq!(config.max_rows, 1000);
        assert_eq!(config.schema_sample_rows, 200);
        assert_eq!(config.severity(), Severity::Info);
    }

    #[test]
    fn test_expected_columns_parsed() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(
            &temp_dir,
            json!({"expected_columns": {"price": "real", "region": "text"}}),
        );
        let config = Config::load(&path).unwrap();
        assert_eq!(config.expected_columns.get("price"), Some(&ColumnType::Real));
        assert_eq!(config.expected_columns.get("region"), Some(&ColumnType::Text));
    }

    #[test]
    fn test_config_rejects_zero_rows() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, json!({"max_rows": 0}));
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_config_rejects_unknown_level_and_field() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, json!({"log_level": "loud"}));
        assert!(Config::load(&path).is_err());

        let path = write_config(&temp_dir, json!({"variance_threshold": 2.0}));
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_explicit_missing_config_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope.json");
        assert!(Config::resolve(Some(&missing)).is_err());
    }
}
