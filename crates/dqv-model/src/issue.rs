//! Quality issue types.
//!
//! The Issue enum is a tagged union where each variant carries only the data
//! its check produces. Serialized with a `type` discriminator:
//! `{"type": "null_values", "column": "age", ...}`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{NullStrategy, OutlierMethod};

/// Issue severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Pipeline cannot produce a trustworthy result for the column or table
    Error,
    /// Data was flagged or repaired
    Warning,
}

impl Severity {
    /// Parse severity from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "error" => Some(Self::Error),
            "warning" => Some(Self::Warning),
            _ => None,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Warning => "Warning",
        }
    }
}

/// Which bound a range violation crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeViolationKind {
    BelowMinimum,
    AboveMaximum,
}

impl RangeViolationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BelowMinimum => "below_minimum",
            Self::AboveMaximum => "above_maximum",
        }
    }
}

/// Discriminant of [`Issue`], used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueKind {
    Duplicates,
    MissingColumns,
    NullValues,
    TypeConversionError,
    RangeViolation,
    PatternViolation,
    Outliers,
}

impl IssueKind {
    /// Value of the serialized `type` tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Duplicates => "duplicates",
            Self::MissingColumns => "missing_columns",
            Self::NullValues => "null_values",
            Self::TypeConversionError => "type_conversion_error",
            Self::RangeViolation => "range_violation",
            Self::PatternViolation => "pattern_violation",
            Self::Outliers => "outliers",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Quality issue - each variant carries only its needed data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Issue {
    /// Rows repeated over the checked columns
    Duplicates {
        count: u64,
        /// `None` when whole rows were compared
        columns_checked: Option<Vec<String>>,
    },
    /// Required columns absent from the table (fatal)
    MissingColumns { columns: Vec<String> },
    /// Missing values found before a strategy was applied
    NullValues {
        column: String,
        count: u64,
        percentage: f64,
        strategy: NullStrategy,
    },
    /// Column could not be converted to the requested type
    TypeConversionError {
        column: String,
        expected_type: String,
        error: String,
    },
    /// Values outside a configured bound
    RangeViolation {
        column: String,
        violation: RangeViolationKind,
        count: u64,
        threshold: f64,
    },
    /// Values not fully matching a pattern
    PatternViolation {
        column: String,
        count: u64,
        pattern: String,
    },
    /// Statistical outliers
    Outliers {
        column: String,
        count: u64,
        percentage: f64,
        method: OutlierMethod,
    },
}

impl Issue {
    pub fn kind(&self) -> IssueKind {
        match self {
            Issue::Duplicates { .. } => IssueKind::Duplicates,
            Issue::MissingColumns { .. } => IssueKind::MissingColumns,
            Issue::NullValues { .. } => IssueKind::NullValues,
            Issue::TypeConversionError { .. } => IssueKind::TypeConversionError,
            Issue::RangeViolation { .. } => IssueKind::RangeViolation,
            Issue::PatternViolation { .. } => IssueKind::PatternViolation,
            Issue::Outliers { .. } => IssueKind::Outliers,
        }
    }

    /// Column the issue concerns, if it is about a single column.
    pub fn column(&self) -> Option<&str> {
        match self {
            Issue::Duplicates { .. } | Issue::MissingColumns { .. } => None,
            Issue::NullValues { column, .. }
            | Issue::TypeConversionError { column, .. }
            | Issue::RangeViolation { column, .. }
            | Issue::PatternViolation { column, .. }
            | Issue::Outliers { column, .. } => Some(column),
        }
    }

    /// Number of affected values or rows.
    ///
    /// Missing columns count the absent columns; a conversion error has no count.
    pub fn count(&self) -> Option<u64> {
        match self {
            Issue::Duplicates { count, .. }
            | Issue::NullValues { count, .. }
            | Issue::RangeViolation { count, .. }
            | Issue::PatternViolation { count, .. }
            | Issue::Outliers { count, .. } => Some(*count),
            Issue::MissingColumns { columns } => Some(columns.len() as u64),
            Issue::TypeConversionError { .. } => None,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Issue::MissingColumns { .. } | Issue::TypeConversionError { .. } => Severity::Error,
            _ => Severity::Warning,
        }
    }

    /// Format a human-readable message.
    pub fn message(&self) -> String {
        match self {
            Issue::Duplicates {
                count,
                columns_checked: Some(columns),
            } => format!("{count} duplicate row(s) over [{}]", columns.join(", ")),
            Issue::Duplicates {
                count,
                columns_checked: None,
            } => format!("{count} duplicate row(s) over all columns"),
            Issue::MissingColumns { columns } => {
                format!("Missing required column(s): {}", columns.join(", "))
            }
            Issue::NullValues {
                column,
                count,
                percentage,
                strategy,
            } => format!("{count} missing value(s) in {column} ({percentage:.2}%), strategy {strategy}"),
            Issue::TypeConversionError {
                column,
                expected_type,
                error,
            } => format!("Cannot convert {column} to {expected_type}: {error}"),
            Issue::RangeViolation {
                column,
                violation: RangeViolationKind::BelowMinimum,
                count,
                threshold,
            } => format!("{count} value(s) in {column} below minimum {threshold}"),
            Issue::RangeViolation {
                column,
                violation: RangeViolationKind::AboveMaximum,
                count,
                threshold,
            } => format!("{count} value(s) in {column} above maximum {threshold}"),
            Issue::PatternViolation {
                column,
                count,
                pattern,
            } => format!("{count} value(s) in {column} do not match {pattern}"),
            Issue::Outliers {
                column,
                count,
                percentage,
                method,
            } => format!("{count} outlier(s) in {column} ({percentage:.2}%) by {method}"),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}
