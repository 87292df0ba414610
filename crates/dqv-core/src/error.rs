//! Unified error types for the dqv-core crate.
//!
//! Only the conditions that stop a validation run are errors. Absent columns,
//! unparseable values and failed conversions are recorded as issues instead.

use std::path::PathBuf;

use dqv_model::ConfigError;
use thiserror::Error;

/// Unified error type for validation and export.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DqvError {
    // =========================================================================
    // PIPELINE ERRORS
    // =========================================================================
    /// Required columns are absent from the input table.
    #[error("Missing required columns: {}", columns.join(", "))]
    MissingColumns {
        /// Absent column names, in configured order.
        columns: Vec<String>,
    },

    /// Configuration could not be loaded or is inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    // =========================================================================
    // EXPORT ERRORS
    // =========================================================================
    /// Failed to write the report file.
    #[error("Failed to write report '{path}': {source}")]
    WriteReport {
        /// Target file path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    // =========================================================================
    // WRAPPED ERRORS
    // =========================================================================
    /// Polars DataFrame operation error.
    #[error("DataFrame error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for validation operations.
pub type Result<T> = std::result::Result<T, DqvError>;

impl DqvError {
    /// Create a missing-columns error.
    pub fn missing_columns(columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self::MissingColumns {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Check if this error is recoverable (user can fix input and retry).
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::MissingColumns { .. } | Self::InvalidConfig(_))
    }

    /// Get a user-friendly suggestion for fixing this error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::MissingColumns { .. } => {
                Some("Add the columns to the input or remove them from required_columns.")
            }
            Self::InvalidConfig(_) => Some("Check the configuration file against the documented keys."),
            Self::WriteReport { .. } => Some("Check that the report directory is writable."),
            _ => None,
        }
    }
}
