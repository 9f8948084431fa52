use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config file '{path}': {source}")]
  Read {
    path: String,
    source: std::io::Error,
  },
  #[error("failed to parse config: {0}")]
  Parse(#[from] toml::de::Error),
  #[error("invalid config: {0}")]
  Invalid(String),
}

/// Log configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LogConfig {
  /// Log file path, if not set, logs will be printed to stdout
  pub file: Option<String>,
  /// Log filter directive, default is "info"
  #[serde(default = "default_log_level")]
  pub level: String,
}

fn default_log_level() -> String {
  "info".to_string()
}

impl Default for LogConfig {
  fn default() -> Self {
    Self {
      file: None,
      level: default_log_level(),
    }
  }
}

/// Supermarket service configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
  /// HTTP listening address
  #[serde(default = "default_server_addr")]
  pub server_addr: String,

  /// Log configuration
  #[serde(default)]
  pub log: LogConfig,
}

fn default_server_addr() -> String {
  "0.0.0.0:6620".to_string()
}

impl Default for Config {
  fn default() -> Self {
    Self {
      server_addr: default_server_addr(),
      log: LogConfig::default(),
    }
  }
}

impl Config {
  /// Load configuration from TOML file
  ///
  /// The result is not validated, so callers can apply overrides first.
  pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let config_str = fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.display().to_string(),
      source,
    })?;

    Self::from_toml(&config_str)
  }

  /// Parse configuration from a TOML string
  pub fn from_toml(config_str: &str) -> Result<Self, ConfigError> {
    Ok(toml::from_str(config_str)?)
  }

  /// Check that the configured values are usable
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.server_addr.trim().is_empty() {
      return Err(ConfigError::Invalid("server_addr must not be empty".to_string()));
    }

    EnvFilter::try_new(&self.log.level).map_err(|e| {
      ConfigError::Invalid(format!("log level '{}': {}", self.log.level, e))
    })?;

    Ok(())
  }
}
