//! Data quality validation: an ordered pipeline of checks over a polars
//! `DataFrame` that records issues on a [`QualityReport`](dqv_model::QualityReport).
//!
//! ```ignore
//! use dqv_core::DataQualityValidator;
//! use dqv_model::ValidationConfig;
//!
//! let config = ValidationConfig::from_json_str(r#"{"required_columns": ["id"]}"#)?;
//! let mut validator = DataQualityValidator::new();
//! let (cleaned, report) = validator.validate_and_clean(df, &config)?;
//! ```

pub mod checks;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod validator;

pub use error::{DqvError, Result};
pub use export::export_report;
pub use pipeline::{CheckPipeline, QualityCheck};
pub use validator::{DataQualityValidator, load_config};
