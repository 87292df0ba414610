use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or checking a validation configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config '{path}': {source}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration document is not valid JSON for this schema.
    #[error("invalid config document: {0}")]
    Parse(#[from] serde_json::Error),

    /// A rule for a column is inconsistent.
    #[error("invalid {check} rule for column '{column}': {message}")]
    InvalidRule {
        /// Config key the rule belongs to.
        check: &'static str,
        /// Column the rule targets.
        column: String,
        /// What is wrong with it.
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
