//! Configuration error types

use thiserror::Error;

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Reading the config file failed
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The file contents were not valid TOML for the expected schema
    #[error("Failed to parse config: {0}")]
    Parse(String),

    /// A value was outside its allowed range
    #[error("Invalid config value: {0}")]
    Validation(String),
}
