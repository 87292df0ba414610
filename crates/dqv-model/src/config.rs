//! Declarative validation configuration.
//!
//! The configuration mirrors a JSON document with seven optional top-level
//! keys, one per check. A key that is absent or falsy (`null`, `false`, `0`,
//! `""`, `[]`, `{}`) disables its check. Per-column mappings keep document
//! order, which is also the order rules are applied in.
//!
//! ```json
//! {
//!   "check_duplicates": {"subset": ["user_id"], "keep": "first", "action": "remove"},
//!   "required_columns": ["user_id", "age"],
//!   "null_handling": {"age": "fill_median", "city": {"fill_value": "unknown"}},
//!   "type_validation": {"age": "int"},
//!   "range_checks": {"age": {"min": 0, "max": 120, "action": "remove"}},
//!   "pattern_validation": {"email": {"pattern": "[^@]+@[^@]+", "action": "flag"}},
//!   "outlier_detection": {"salary": {"method": "iqr", "multiplier": 1.5}}
//! }
//! ```

use std::fmt;
use std::path::Path;

use indexmap::IndexMap;
use regex::Regex;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, Result};

/// Default IQR multiplier for outlier bounds.
pub const DEFAULT_IQR_MULTIPLIER: f64 = 1.5;
/// Default z-score threshold for outliers.
pub const DEFAULT_ZSCORE_THRESHOLD: f64 = 3.0;

/// Full validation configuration for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    #[serde(
        default,
        deserialize_with = "falsy_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub check_duplicates: Option<DuplicateConfig>,

    #[serde(
        default,
        deserialize_with = "falsy_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub required_columns: Option<Vec<String>>,

    #[serde(
        default,
        deserialize_with = "falsy_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub null_handling: Option<IndexMap<String, NullStrategy>>,

    #[serde(
        default,
        deserialize_with = "falsy_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub type_validation: Option<IndexMap<String, TargetType>>,

    #[serde(
        default,
        deserialize_with = "falsy_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub range_checks: Option<IndexMap<String, RangeRule>>,

    #[serde(
        default,
        deserialize_with = "falsy_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub pattern_validation: Option<IndexMap<String, PatternRule>>,

    #[serde(
        default,
        deserialize_with = "falsy_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub outlier_detection: Option<IndexMap<String, OutlierRule>>,
}

impl ValidationConfig {
    /// Create an empty configuration (every check disabled).
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a configuration from an already-decoded JSON value.
    pub fn from_json_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Read and parse a JSON configuration file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    #[must_use]
    pub fn with_duplicates(mut self, config: DuplicateConfig) -> Self {
        self.check_duplicates = Some(config);
        self
    }

    #[must_use]
    pub fn with_required_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_null_strategy(mut self, column: impl Into<String>, strategy: NullStrategy) -> Self {
        self.null_handling
            .get_or_insert_with(IndexMap::new)
            .insert(column.into(), strategy);
        self
    }

    #[must_use]
    pub fn with_type(mut self, column: impl Into<String>, target: TargetType) -> Self {
        self.type_validation
            .get_or_insert_with(IndexMap::new)
            .insert(column.into(), target);
        self
    }

    #[must_use]
    pub fn with_range(mut self, column: impl Into<String>, rule: RangeRule) -> Self {
        self.range_checks
            .get_or_insert_with(IndexMap::new)
            .insert(column.into(), rule);
        self
    }

    #[must_use]
    pub fn with_pattern(mut self, column: impl Into<String>, rule: PatternRule) -> Self {
        self.pattern_validation
            .get_or_insert_with(IndexMap::new)
            .insert(column.into(), rule);
        self
    }

    #[must_use]
    pub fn with_outliers(mut self, column: impl Into<String>, rule: OutlierRule) -> Self {
        self.outlier_detection
            .get_or_insert_with(IndexMap::new)
            .insert(column.into(), rule);
        self
    }

    /// Checks enabled by this configuration, in pipeline order.
    ///
    /// Empty lists and maps count as disabled.
    pub fn enabled_checks(&self) -> Vec<CheckKind> {
        CheckKind::ALL
            .into_iter()
            .filter(|kind| match kind {
                CheckKind::Duplicates => self.check_duplicates.is_some(),
                CheckKind::RequiredColumns => non_empty_list(self.required_columns.as_ref()),
                CheckKind::NullHandling => non_empty_map(self.null_handling.as_ref()),
                CheckKind::TypeValidation => non_empty_map(self.type_validation.as_ref()),
                CheckKind::RangeValidation => non_empty_map(self.range_checks.as_ref()),
                CheckKind::PatternValidation => non_empty_map(self.pattern_validation.as_ref()),
                CheckKind::OutlierDetection => non_empty_map(self.outlier_detection.as_ref()),
            })
            .collect()
    }

    /// Reject rules that can never evaluate meaningfully.
    ///
    /// Runs before a pipeline so configuration mistakes surface up front
    /// instead of as skipped columns.
    pub fn validate(&self) -> Result<()> {
        if let Some(ranges) = &self.range_checks {
            for (column, rule) in ranges {
                if let (Some(min), Some(max)) = (rule.min, rule.max)
                    && min > max
                {
                    return Err(invalid_rule(
                        "range_checks",
                        column,
                        format!("min {min} is greater than max {max}"),
                    ));
                }
            }
        }
        if let Some(patterns) = &self.pattern_validation {
            for (column, rule) in patterns {
                if let Err(error) = Regex::new(&rule.pattern) {
                    return Err(invalid_rule("pattern_validation", column, error.to_string()));
                }
            }
        }
        if let Some(outliers) = &self.outlier_detection {
            for (column, rule) in outliers {
                if !rule.multiplier.is_finite() || rule.multiplier < 0.0 {
                    return Err(invalid_rule(
                        "outlier_detection",
                        column,
                        format!("multiplier must be a non-negative number, got {}", rule.multiplier),
                    ));
                }
                if !rule.threshold.is_finite() || rule.threshold <= 0.0 {
                    return Err(invalid_rule(
                        "outlier_detection",
                        column,
                        format!("threshold must be a positive number, got {}", rule.threshold),
                    ));
                }
            }
        }
        Ok(())
    }
}

fn invalid_rule(check: &'static str, column: &str, message: String) -> ConfigError {
    ConfigError::InvalidRule {
        check,
        column: column.to_string(),
        message,
    }
}

fn non_empty_list<T>(list: Option<&Vec<T>>) -> bool {
    list.is_some_and(|items| !items.is_empty())
}

fn non_empty_map<T>(map: Option<&IndexMap<String, T>>) -> bool {
    map.is_some_and(|items| !items.is_empty())
}

/// The seven checks in the fixed order the pipeline runs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckKind {
    Duplicates,
    RequiredColumns,
    NullHandling,
    TypeValidation,
    RangeValidation,
    PatternValidation,
    OutlierDetection,
}

impl CheckKind {
    /// Every check, in execution order.
    pub const ALL: [CheckKind; 7] = [
        CheckKind::Duplicates,
        CheckKind::RequiredColumns,
        CheckKind::NullHandling,
        CheckKind::TypeValidation,
        CheckKind::RangeValidation,
        CheckKind::PatternValidation,
        CheckKind::OutlierDetection,
    ];

    /// Name recorded in `checks_performed`.
    pub fn step_name(self) -> &'static str {
        match self {
            CheckKind::Duplicates => "duplicate_check",
            CheckKind::RequiredColumns => "required_columns_check",
            CheckKind::NullHandling => "null_handling",
            CheckKind::TypeValidation => "type_validation",
            CheckKind::RangeValidation => "range_validation",
            CheckKind::PatternValidation => "pattern_validation",
            CheckKind::OutlierDetection => "outlier_detection",
        }
    }

    /// Top-level configuration key enabling this check.
    pub fn config_key(self) -> &'static str {
        match self {
            CheckKind::Duplicates => "check_duplicates",
            CheckKind::RequiredColumns => "required_columns",
            CheckKind::NullHandling => "null_handling",
            CheckKind::TypeValidation => "type_validation",
            CheckKind::RangeValidation => "range_checks",
            CheckKind::PatternValidation => "pattern_validation",
            CheckKind::OutlierDetection => "outlier_detection",
        }
    }

    /// One-line description for listings.
    pub fn description(self) -> &'static str {
        match self {
            CheckKind::Duplicates => "Find duplicate rows; remove them or add `_is_duplicate`",
            CheckKind::RequiredColumns => "Abort when any required column is absent",
            CheckKind::NullHandling => "Drop or fill missing values per column",
            CheckKind::TypeValidation => "Coerce columns to int, float, string, datetime or bool",
            CheckKind::RangeValidation => "Flag, remove or cap values outside [min, max]",
            CheckKind::PatternValidation => "Full-match values against a regular expression",
            CheckKind::OutlierDetection => "Detect outliers with the IQR or z-score method",
        }
    }
}

/// Action applied to rows that fail a row-level check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowAction {
    /// Keep rows and append a boolean indicator column.
    #[default]
    Flag,
    /// Drop offending rows.
    Remove,
}

/// Which occurrence of a duplicate group is *not* marked as a duplicate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "KeepRepr", into = "KeepRepr")]
pub enum Keep {
    /// Retain the earliest row.
    #[default]
    First,
    /// Retain the latest row.
    Last,
    /// Mark every occurrence, including the first (`keep: false`).
    MarkAll,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum KeepRepr {
    Flag(bool),
    Name(String),
}

impl TryFrom<KeepRepr> for Keep {
    type Error = String;

    fn try_from(repr: KeepRepr) -> std::result::Result<Self, Self::Error> {
        match repr {
            KeepRepr::Flag(false) => Ok(Keep::MarkAll),
            KeepRepr::Flag(true) => Err("keep must be \"first\", \"last\" or false".to_string()),
            KeepRepr::Name(name) => match name.trim().to_lowercase().as_str() {
                "first" => Ok(Keep::First),
                "last" => Ok(Keep::Last),
                other => Err(format!(
                    "unknown keep value '{other}', expected \"first\", \"last\" or false"
                )),
            },
        }
    }
}

impl From<Keep> for KeepRepr {
    fn from(keep: Keep) -> Self {
        match keep {
            Keep::First => KeepRepr::Name("first".to_string()),
            Keep::Last => KeepRepr::Name("last".to_string()),
            Keep::MarkAll => KeepRepr::Flag(false),
        }
    }
}

/// Settings for the duplicate check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DuplicateConfig {
    /// Columns forming the equality key; `None` compares whole rows.
    #[serde(default)]
    pub subset: Option<Vec<String>>,
    #[serde(default)]
    pub keep: Keep,
    /// `None` records the issue without touching the table.
    #[serde(default)]
    pub action: Option<RowAction>,
}

impl DuplicateConfig {
    pub fn on_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            subset: Some(columns.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn keep(mut self, keep: Keep) -> Self {
        self.keep = keep;
        self
    }

    #[must_use]
    pub fn action(mut self, action: RowAction) -> Self {
        self.action = Some(action);
        self
    }
}

/// Literal used by the `{fill_value: X}` strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FillValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for FillValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FillValue::Bool(value) => write!(f, "{value}"),
            FillValue::Int(value) => write!(f, "{value}"),
            FillValue::Float(value) => write!(f, "{value}"),
            FillValue::Text(value) => f.write_str(value),
        }
    }
}

/// Named null-handling strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedStrategy {
    DropRows,
    FillMean,
    FillMedian,
    FillMode,
}

/// How missing values in one column are handled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NullStrategy {
    Named(NamedStrategy),
    FillValue { fill_value: FillValue },
}

impl NullStrategy {
    pub const DROP_ROWS: NullStrategy = NullStrategy::Named(NamedStrategy::DropRows);
    pub const FILL_MEAN: NullStrategy = NullStrategy::Named(NamedStrategy::FillMean);
    pub const FILL_MEDIAN: NullStrategy = NullStrategy::Named(NamedStrategy::FillMedian);
    pub const FILL_MODE: NullStrategy = NullStrategy::Named(NamedStrategy::FillMode);

    pub fn fill_value(value: FillValue) -> Self {
        NullStrategy::FillValue { fill_value: value }
    }
}

impl fmt::Display for NullStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NullStrategy::Named(NamedStrategy::DropRows) => f.write_str("drop_rows"),
            NullStrategy::Named(NamedStrategy::FillMean) => f.write_str("fill_mean"),
            NullStrategy::Named(NamedStrategy::FillMedian) => f.write_str("fill_median"),
            NullStrategy::Named(NamedStrategy::FillMode) => f.write_str("fill_mode"),
            NullStrategy::FillValue {
                fill_value: FillValue::Text(text),
            } => write!(f, "fill_value({text:?})"),
            NullStrategy::FillValue { fill_value } => write!(f, "fill_value({fill_value})"),
        }
    }
}

/// Target type for coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    Int,
    Float,
    String,
    Datetime,
    Bool,
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TargetType::Int => "int",
            TargetType::Float => "float",
            TargetType::String => "string",
            TargetType::Datetime => "datetime",
            TargetType::Bool => "bool",
        })
    }
}

/// Action applied to values outside a range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeAction {
    /// Record the issue only.
    #[default]
    Flag,
    Remove,
    /// Replace the value with the violated bound.
    Cap,
}

/// Inclusive bounds for one column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RangeRule {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub action: RangeAction,
}

impl RangeRule {
    pub fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            action: RangeAction::Flag,
        }
    }

    pub fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            ..Self::default()
        }
    }

    pub fn at_most(max: f64) -> Self {
        Self {
            max: Some(max),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn action(mut self, action: RangeAction) -> Self {
        self.action = action;
        self
    }
}

/// Regular expression every value of a column must fully match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternRule {
    pub pattern: String,
    #[serde(default)]
    pub action: RowAction,
}

impl PatternRule {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            action: RowAction::Flag,
        }
    }

    #[must_use]
    pub fn action(mut self, action: RowAction) -> Self {
        self.action = action;
        self
    }
}

/// Statistical method used to find outliers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutlierMethod {
    #[default]
    Iqr,
    Zscore,
}

impl fmt::Display for OutlierMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutlierMethod::Iqr => "iqr",
            OutlierMethod::Zscore => "zscore",
        })
    }
}

/// Outlier detection settings for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierRule {
    #[serde(default)]
    pub method: OutlierMethod,
    #[serde(default)]
    pub action: RowAction,
    /// IQR fence multiplier.
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
    /// Z-score cut-off.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl Default for OutlierRule {
    fn default() -> Self {
        Self {
            method: OutlierMethod::Iqr,
            action: RowAction::Flag,
            multiplier: DEFAULT_IQR_MULTIPLIER,
            threshold: DEFAULT_ZSCORE_THRESHOLD,
        }
    }
}

impl OutlierRule {
    pub fn iqr() -> Self {
        Self::default()
    }

    pub fn zscore() -> Self {
        Self {
            method: OutlierMethod::Zscore,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn action(mut self, action: RowAction) -> Self {
        self.action = action;
        self
    }

    #[must_use]
    pub fn multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    #[must_use]
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }
}

fn default_multiplier() -> f64 {
    DEFAULT_IQR_MULTIPLIER
}

fn default_threshold() -> f64 {
    DEFAULT_ZSCORE_THRESHOLD
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

fn falsy_as_none<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if is_falsy(&value) {
        return Ok(None);
    }
    serde_json::from_value(value).map(Some).map_err(D::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn falsy_keys_disable_checks() {
        let config = ValidationConfig::from_json_value(json!({
            "check_duplicates": {},
            "required_columns": [],
            "null_handling": null,
            "type_validation": false,
            "range_checks": {},
        }))
        .unwrap();
        assert_eq!(config, ValidationConfig::default());
        assert!(config.enabled_checks().is_empty());
    }

    #[test]
    fn enabled_checks_follow_pipeline_order() {
        let config = ValidationConfig::from_json_value(json!({
            "outlier_detection": {"salary": {"method": "zscore"}},
            "required_columns": ["id"],
            "check_duplicates": {"action": "remove"},
        }))
        .unwrap();
        assert_eq!(
            config.enabled_checks(),
            vec![
                CheckKind::Duplicates,
                CheckKind::RequiredColumns,
                CheckKind::OutlierDetection
            ]
        );
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let config = ValidationConfig::from_json_str(r#"{"schema_version": 2}"#).unwrap();
        assert!(config.enabled_checks().is_empty());
    }

    #[test]
    fn keep_accepts_names_and_false() {
        let first: DuplicateConfig = serde_json::from_value(json!({"keep": "first"})).unwrap();
        let last: DuplicateConfig = serde_json::from_value(json!({"keep": "last"})).unwrap();
        let none: DuplicateConfig = serde_json::from_value(json!({"keep": false})).unwrap();
        assert_eq!(first.keep, Keep::First);
        assert_eq!(last.keep, Keep::Last);
        assert_eq!(none.keep, Keep::MarkAll);
        assert!(serde_json::from_value::<DuplicateConfig>(json!({"keep": true})).is_err());
        assert!(serde_json::from_value::<DuplicateConfig>(json!({"keep": "middle"})).is_err());
        assert_eq!(serde_json::to_value(Keep::MarkAll).unwrap(), json!(false));
    }

    #[test]
    fn null_strategies_parse_named_and_literal() {
        let config = ValidationConfig::from_json_value(json!({
            "null_handling": {
                "b": "drop_rows",
                "a": {"fill_value": 0},
                "c": {"fill_value": 2.5},
                "d": {"fill_value": "n/a"},
                "e": "fill_mode",
            }
        }))
        .unwrap();
        let handling = config.null_handling.unwrap();
        let columns: Vec<&str> = handling.keys().map(String::as_str).collect();
        assert_eq!(columns, vec!["b", "a", "c", "d", "e"]);
        assert_eq!(handling["b"], NullStrategy::DROP_ROWS);
        assert_eq!(handling["a"], NullStrategy::fill_value(FillValue::Int(0)));
        assert_eq!(handling["c"], NullStrategy::fill_value(FillValue::Float(2.5)));
        assert_eq!(
            handling["d"],
            NullStrategy::fill_value(FillValue::Text("n/a".to_string()))
        );
        assert_eq!(handling["e"], NullStrategy::FILL_MODE);
    }

    #[test]
    fn rule_defaults() {
        let config = ValidationConfig::from_json_value(json!({
            "range_checks": {"age": {"min": 0}},
            "pattern_validation": {"email": {"pattern": ".+@.+"}},
            "outlier_detection": {"salary": {}},
        }))
        .unwrap();
        let range = &config.range_checks.as_ref().unwrap()["age"];
        assert_eq!(range.action, RangeAction::Flag);
        assert_eq!(range.max, None);
        let pattern = &config.pattern_validation.as_ref().unwrap()["email"];
        assert_eq!(pattern.action, RowAction::Flag);
        let outlier = &config.outlier_detection.as_ref().unwrap()["salary"];
        assert_eq!(outlier, &OutlierRule::default());
    }

    #[test]
    fn validate_rejects_inverted_range() {
        let config = ValidationConfig::new().with_range("age", RangeRule::between(10.0, 1.0));
        let error = config.validate().unwrap_err();
        assert!(error.to_string().contains("range_checks"));
    }

    #[test]
    fn validate_rejects_bad_regex() {
        let config = ValidationConfig::new().with_pattern("email", PatternRule::new("(unclosed"));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRule {
                check: "pattern_validation",
                ..
            })
        ));
    }

    #[test]
    fn validate_rejects_non_positive_threshold() {
        let config =
            ValidationConfig::new().with_outliers("salary", OutlierRule::zscore().threshold(0.0));
        assert!(config.validate().is_err());
        let ok = ValidationConfig::new().with_outliers("salary", OutlierRule::zscore());
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn step_names_match_report_entries() {
        let names: Vec<&str> = CheckKind::ALL.iter().map(|kind| kind.step_name()).collect();
        assert_eq!(
            names,
            vec![
                "duplicate_check",
                "required_columns_check",
                "null_handling",
                "type_validation",
                "range_validation",
                "pattern_validation",
                "outlier_detection"
            ]
        );
    }
}
