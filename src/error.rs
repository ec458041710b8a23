//! Error types for configuration resolution.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while locating, reading, or writing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Neither the user-global nor the repository-level file holds any settings.
    #[error(
        "committer is not configured: no settings found in {user_path} or the repository config. \
         Run `committer setup` to create one."
    )]
    NotSetup {
        /// The user-global path that was consulted.
        user_path: PathBuf,
    },

    /// A present file whose top level is not a key/value mapping.
    #[error("Config file must be a YAML mapping: {path}")]
    Format {
        /// Path to the offending file.
        path: PathBuf,
    },

    /// Failed to read a file that exists.
    #[error("Failed to read config file {path}: {source}")]
    Read {
        /// Path to the file that couldn't be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The file exists but is not valid YAML.
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        /// Path to the file that couldn't be parsed.
        path: PathBuf,
        /// The underlying YAML error.
        source: serde_yaml::Error,
    },

    /// Failed to create the config directory or write the default file.
    #[error("Failed to write config file {path}: {source}")]
    Write {
        /// Directory or file that couldn't be written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to emit the setup confirmation.
    #[error("Failed to write setup output: {0}")]
    Output(#[source] std::io::Error),

    /// Failed to serialize the default document.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] serde_yaml::Error),

    /// The repository-root resolver could not run.
    #[error("Repository root lookup failed: {0}")]
    Repository(String),
}

impl ConfigError {
    /// True when the caller should run the bootstrap step.
    pub fn is_not_setup(&self) -> bool {
        matches!(self, ConfigError::NotSetup { .. })
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
