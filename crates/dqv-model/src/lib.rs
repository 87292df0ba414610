//! Configuration, issue and report types for the data quality validator.

pub mod config;
pub mod error;
pub mod issue;
pub mod report;

pub use config::{
    CheckKind, DEFAULT_IQR_MULTIPLIER, DEFAULT_ZSCORE_THRESHOLD, DuplicateConfig, FillValue, Keep,
    NamedStrategy, NullStrategy, OutlierMethod, OutlierRule, PatternRule, RangeAction, RangeRule,
    RowAction, TargetType, ValidationConfig,
};
pub use error::ConfigError;
pub use issue::{Issue, IssueKind, RangeViolationKind, Severity};
pub use report::QualityReport;
