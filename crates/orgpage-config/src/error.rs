use std::io;

use thiserror::Error;

/// Error type for site configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("Configuration error: {0}")]
  Config(String),

  #[error("Invalid config override format: '{0}'. Expected KEY=VALUE")]
  InvalidOverride(String),

  #[error("Unknown configuration key: '{0}'")]
  UnknownKey(String),

  #[error(
    "Invalid boolean value for '{key}': '{value}'. Expected true/false, \
     yes/no, or 1/0"
  )]
  InvalidBoolean { key: String, value: String },

  #[error("Invalid value for '{key}': '{value}'. Expected {expected}")]
  InvalidValue {
    key:      String,
    value:    String,
    expected: &'static str,
  },

  #[error("Template error: {0}")]
  Template(String),

  #[error("I/O error: {0}")]
  Io(#[from] io::Error),

  #[error("JSON error: {0}")]
  Serde(#[from] serde_json::Error),

  #[error("TOML error: {0}")]
  Toml(#[from] toml::de::Error),
}
