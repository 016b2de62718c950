//! Configuration management for flowlist
//!
//! This module handles loading, validation, and management of
//! flowlist configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use error::{ConfigError, ConfigResult};

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Data directory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to the data directory
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
    /// Name of the transaction data file inside the data directory
    #[serde(default = "default_data_file")]
    pub data_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            data_file: default_data_file(),
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("./data")
}

fn default_data_file() -> String {
    "transactions.json".to_string()
}

/// List view settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListConfig {
    /// Page title for the list view
    #[serde(default = "default_title")]
    pub title: String,
    /// Initial ordering token (bare field code = ascending, "-" prefix =
    /// descending, absent = unsorted)
    #[serde(default)]
    pub default_ordering: Option<String>,
    /// Highlight rows flagged as incomplete
    #[serde(default = "default_true")]
    pub highlight_incomplete: bool,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            default_ordering: None,
            highlight_incomplete: true,
        }
    }
}

fn default_title() -> String {
    "Transactions".to_string()
}

fn default_true() -> bool {
    true
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Data directory settings
    #[serde(default)]
    pub data: DataConfig,
    /// List view settings
    #[serde(default)]
    pub list: ListConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(&path).map_err(|_| ConfigError::FileNotFound {
            path: path.to_string_lossy().to_string(),
        })?;

        let config: Config =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::InvalidYaml {
                message: e.to_string(),
            })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if self.data.data_file.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "data.data_file".to_string(),
                reason: "Data file name must not be empty".to_string(),
            });
        }

        // An ordering token must still name a field once the direction
        // marker is stripped
        if let Some(token) = &self.list.default_ordering {
            let field = token.strip_prefix('-').unwrap_or(token);
            if field.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "list.default_ordering".to_string(),
                    reason: "Ordering token must name a field code".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Get the full path to the transaction data file
    pub fn data_path(&self) -> PathBuf {
        self.data.path.join(&self.data.data_file)
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.data.data_file, "transactions.json");
        assert!(config.list.default_ordering.is_none());
        assert!(config.list.highlight_incomplete);
    }

    #[test]
    fn test_parse_partial_yaml() {
        let yaml = "server:\n  port: 9000\nlist:\n  default_ordering: \"-issuedAt\"\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.list.default_ordering.as_deref(), Some("-issuedAt"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "server.port"
        ));
    }

    #[test]
    fn test_validate_rejects_bare_marker_token() {
        let mut config = Config::default();
        config.list.default_ordering = Some("-".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_data_path() {
        let mut config = Config::default();
        config.data.path = PathBuf::from("/srv/flowlist");
        config.data.data_file = "ledger.json".to_string();
        assert_eq!(config.data_path(), PathBuf::from("/srv/flowlist/ledger.json"));
    }
}
