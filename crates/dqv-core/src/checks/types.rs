//! Column type coercion.
//!
//! Every value is coerced individually into a [`Coerced`] outcome. Values
//! that cannot be parsed become missing; a [`Coerced::Failed`] outcome means
//! the column as a whole cannot be converted and is left as it was.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use dqv_common::{
    any_to_display, any_to_f64, any_to_i64, any_to_string, format_numeric, is_missing, parse_i64,
};
use dqv_model::{CheckKind, Issue, QualityReport, TargetType};
use indexmap::IndexMap;
use polars::prelude::{
    AnyValue, Column, DataFrame, DataType, IntoColumn, NamedFrom, PlSmallStr, Series, TimeUnit,
};
use tracing::{debug, error, warn};

use super::has_column;
use crate::error::Result;
use crate::pipeline::QualityCheck;

/// Outcome of coercing one value.
#[derive(Debug, Clone, PartialEq)]
pub enum Coerced<T> {
    /// Converted value.
    Value(T),
    /// Missing, or unparseable and absorbed as missing.
    Missing,
    /// The conversion cannot proceed for this column.
    Failed(String),
}

impl<T> Coerced<T> {
    fn into_result(self) -> std::result::Result<Option<T>, String> {
        match self {
            Coerced::Value(value) => Ok(Some(value)),
            Coerced::Missing => Ok(None),
            Coerced::Failed(reason) => Err(reason),
        }
    }
}

/// Coerces configured columns to their target types.
pub struct TypeValidationCheck {
    rules: IndexMap<String, TargetType>,
}

impl TypeValidationCheck {
    pub fn new(rules: IndexMap<String, TargetType>) -> Self {
        Self { rules }
    }
}

impl QualityCheck for TypeValidationCheck {
    fn name(&self) -> &'static str {
        CheckKind::TypeValidation.step_name()
    }

    fn run(&self, df: DataFrame, report: &mut QualityReport) -> Result<DataFrame> {
        let mut df = df;
        for (name, target) in &self.rules {
            if !has_column(&df, name) {
                warn!(column = %name, "type validation column not found, skipping");
                continue;
            }
            let column = df.column(name)?;
            match convert_column(column, *target) {
                Ok(converted) => {
                    debug!(column = %name, target = %target, "converted column");
                    df.with_column(converted)?;
                }
                Err(reason) => {
                    error!(column = %name, target = %target, %reason, "type conversion failed");
                    report.add_issue(Issue::TypeConversionError {
                        column: name.clone(),
                        expected_type: target.to_string(),
                        error: reason,
                    });
                }
            }
        }
        Ok(df)
    }
}

/// Convert a whole column, or return why it cannot be converted.
pub fn convert_column(column: &Column, target: TargetType) -> std::result::Result<Column, String> {
    let name = column.name().clone();
    let series = match target {
        TargetType::Float => Series::new(name, coerce_all(column, coerce_float)?),
        TargetType::Int => Series::new(name, coerce_all(column, coerce_int)?),
        TargetType::Bool => Series::new(name, coerce_all(column, coerce_bool)?),
        TargetType::String => {
            let data: Vec<String> = values(column).map(any_to_display).collect();
            Series::new(name, data)
        }
        TargetType::Datetime => return convert_datetime(column, name),
    };
    Ok(series.into_column())
}

fn values(column: &Column) -> impl Iterator<Item = AnyValue<'_>> {
    (0..column.len()).map(|idx| column.get(idx).unwrap_or(AnyValue::Null))
}

fn coerce_all<T>(
    column: &Column,
    coerce: impl Fn(AnyValue<'_>) -> Coerced<T>,
) -> std::result::Result<Vec<Option<T>>, String> {
    values(column)
        .map(|value| coerce(value).into_result())
        .collect()
}

fn convert_datetime(column: &Column, name: PlSmallStr) -> std::result::Result<Column, String> {
    let target = DataType::Datetime(TimeUnit::Milliseconds, None);
    if matches!(column.dtype(), DataType::Date | DataType::Datetime(_, _)) {
        return column.cast(&target).map_err(|error| error.to_string());
    }
    let millis = coerce_all(column, coerce_datetime)?;
    Series::new(name, millis)
        .cast(&target)
        .map(IntoColumn::into_column)
        .map_err(|error| error.to_string())
}

/// Permissive float parse; unparseable values become missing.
pub fn coerce_float(value: AnyValue<'_>) -> Coerced<f64> {
    match any_to_f64(value) {
        Some(number) => Coerced::Value(number),
        None => Coerced::Missing,
    }
}

/// Permissive numeric parse that refuses to truncate.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use dqv_core::checks::Coerced;
/// use dqv_core::checks::coerce_int;
///
/// assert_eq!(coerce_int(AnyValue::String("42")), Coerced::Value(42));
/// assert_eq!(coerce_int(AnyValue::String("abc")), Coerced::Missing);
/// assert!(matches!(coerce_int(AnyValue::Float64(1.5)), Coerced::Failed(_)));
/// ```
pub fn coerce_int(value: AnyValue<'_>) -> Coerced<i64> {
    if is_missing(&value) {
        return Coerced::Missing;
    }
    if let Some(integer) = any_to_i64(value.clone()) {
        return Coerced::Value(integer);
    }
    if let AnyValue::String(text) = value
        && let Some(integer) = parse_i64(text)
    {
        return Coerced::Value(integer);
    }
    let Some(number) = any_to_f64(value) else {
        return Coerced::Missing;
    };
    if !number.is_finite() {
        return Coerced::Failed(format!("cannot convert non-finite value {number} to int"));
    }
    if number.fract() != 0.0 {
        return Coerced::Failed(format!(
            "cannot safely cast non-integral value {} to int",
            format_numeric(number)
        ));
    }
    if number < i64::MIN as f64 || number >= i64::MAX as f64 {
        return Coerced::Failed(format!("value {} is out of range for int", format_numeric(number)));
    }
    Coerced::Value(number as i64)
}

/// Truthiness: non-zero numbers and non-empty strings are true.
///
/// Null is false. A float `NaN` is non-zero and therefore true.
pub fn coerce_bool(value: AnyValue<'_>) -> Coerced<bool> {
    let flag = match value {
        AnyValue::Null => false,
        AnyValue::Float32(number) => number != 0.0,
        AnyValue::Float64(number) => number != 0.0,
        AnyValue::Boolean(flag) => flag,
        AnyValue::String(text) => !text.is_empty(),
        AnyValue::StringOwned(ref text) => !text.is_empty(),
        other => match any_to_f64(other.clone()) {
            Some(number) => number != 0.0,
            None => !any_to_string(other).is_empty(),
        },
    };
    Coerced::Value(flag)
}

fn coerce_datetime(value: AnyValue<'_>) -> Coerced<i64> {
    if is_missing(&value) {
        return Coerced::Missing;
    }
    match parse_datetime_millis(&any_to_string(value)) {
        Some(millis) => Coerced::Value(millis),
        None => Coerced::Missing,
    }
}

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];

/// Parse a timestamp into milliseconds since the Unix epoch (UTC).
///
/// Accepts RFC 3339, ISO-like date-times with optional fractional seconds
/// and a handful of common date layouts.
pub fn parse_datetime_millis(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.timestamp_millis());
    }
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(parsed.and_utc().timestamp_millis());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return date
                .and_hms_opt(0, 0, 0)
                .map(|start| start.and_utc().timestamp_millis());
        }
    }
    None
}
