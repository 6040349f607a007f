use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors raised while loading and validating the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("Configuration error: {0}")]
  Config(String),

  #[error("Failed to read config file {}: {source}", path.display())]
  Read {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Unsupported config file format: {}", .0.display())]
  UnsupportedFormat(PathBuf),

  #[error("Invalid config override format: '{0}'. Expected KEY=VALUE")]
  OverrideFormat(String),

  #[error("Unknown configuration key: '{0}'")]
  UnknownKey(String),

  #[error("Invalid value for '{key}': '{value}'. Expected {expected}")]
  InvalidValue {
    key:      String,
    value:    String,
    expected: &'static str,
  },

  #[error("I/O error: {0}")]
  Io(#[from] io::Error),

  #[error("Serde error: {0}")]
  Serde(#[from] serde_json::Error),

  #[error("TOML error: {0}")]
  Toml(#[from] toml::de::Error),
}
