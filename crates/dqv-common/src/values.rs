//! Polars `AnyValue` utility functions.
//!
//! This module provides helper functions for working with Polars `AnyValue` types,
//! including missing-value detection, textual rendering and numeric extraction.

use polars::prelude::{AnyValue, Column, DataType};

/// Text used when a missing value has to be rendered as a string.
pub const MISSING_TEXT: &str = "nan";

/// Returns true for the missing marker: `Null`, or `NaN` in a float column.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use dqv_common::is_missing;
///
/// assert!(is_missing(&AnyValue::Null));
/// assert!(is_missing(&AnyValue::Float64(f64::NAN)));
/// assert!(!is_missing(&AnyValue::Int64(0)));
/// assert!(!is_missing(&AnyValue::String("")));
/// ```
pub fn is_missing(value: &AnyValue<'_>) -> bool {
    match value {
        AnyValue::Null => true,
        AnyValue::Float32(v) => v.is_nan(),
        AnyValue::Float64(v) => v.is_nan(),
        _ => false,
    }
}

/// Converts a Polars `AnyValue` to its textual representation.
///
/// Missing values render as [`MISSING_TEXT`]; floats drop trailing zeros.
/// Used for row keys, where `1.0` and `1` must compare equal.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use dqv_common::any_to_string;
///
/// assert_eq!(any_to_string(AnyValue::Null), "nan");
/// assert_eq!(any_to_string(AnyValue::Int32(42)), "42");
/// assert_eq!(any_to_string(AnyValue::Float64(2.50)), "2.5");
/// assert_eq!(any_to_string(AnyValue::String("hello")), "hello");
/// ```
pub fn any_to_string(value: AnyValue<'_>) -> String {
    if is_missing(&value) {
        return MISSING_TEXT.to_string();
    }
    match value {
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::Boolean(b) => b.to_string(),
        other => scalar_text(other),
    }
}

/// Renders a cell the way it reads in a text column.
///
/// Whole floats keep one decimal (`1.0`), booleans are capitalized
/// (`True`/`False`) and missing values render as [`MISSING_TEXT`]. Pattern
/// matching and `string` conversion see cells through this rendering.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use dqv_common::any_to_display;
///
/// assert_eq!(any_to_display(AnyValue::Float64(1.0)), "1.0");
/// assert_eq!(any_to_display(AnyValue::Float64(2.5)), "2.5");
/// assert_eq!(any_to_display(AnyValue::Boolean(false)), "False");
/// assert_eq!(any_to_display(AnyValue::Int64(3)), "3");
/// ```
pub fn any_to_display(value: AnyValue<'_>) -> String {
    if is_missing(&value) {
        return MISSING_TEXT.to_string();
    }
    match value {
        AnyValue::Float32(v) => format_float_text(f64::from(v)),
        AnyValue::Float64(v) => format_float_text(v),
        AnyValue::Boolean(true) => "True".to_string(),
        AnyValue::Boolean(false) => "False".to_string(),
        other => scalar_text(other),
    }
}

fn scalar_text(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        // For any other type, use Display but strip outer quotes if present
        other => {
            let s = other.to_string();
            if s.starts_with('"') && s.ends_with('"') && s.len() >= 2 {
                s[1..s.len() - 1].to_string()
            } else {
                s
            }
        }
    }
}

/// Formats a float keeping a trailing `.0` on whole values.
fn format_float_text(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}

/// Converts an `AnyValue` to a hashable key, `None` for missing values.
///
/// Two missing values produce equal keys.
pub fn any_to_key(value: AnyValue<'_>) -> Option<String> {
    if is_missing(&value) {
        None
    } else {
        Some(any_to_string(value))
    }
}

/// Formats a floating-point number as a string without trailing zeros after decimal.
///
/// # Examples
///
/// ```
/// use dqv_common::format_numeric;
///
/// assert_eq!(format_numeric(1.0), "1");
/// assert_eq!(format_numeric(1.5), "1.5");
/// assert_eq!(format_numeric(40.0), "40");
/// ```
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.');
        if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    } else {
        s
    }
}

/// Converts an `AnyValue` to `f64`, returning `None` for non-numeric or missing values.
///
/// Handles integer types, floating-point types, booleans and string parsing.
pub fn any_to_f64(value: AnyValue<'_>) -> Option<f64> {
    if is_missing(&value) {
        return None;
    }
    match value {
        AnyValue::Int8(v) => Some(f64::from(v)),
        AnyValue::Int16(v) => Some(f64::from(v)),
        AnyValue::Int32(v) => Some(f64::from(v)),
        AnyValue::Int64(v) => Some(v as f64),
        AnyValue::UInt8(v) => Some(f64::from(v)),
        AnyValue::UInt16(v) => Some(f64::from(v)),
        AnyValue::UInt32(v) => Some(f64::from(v)),
        AnyValue::UInt64(v) => Some(v as f64),
        AnyValue::Float32(v) => Some(f64::from(v)),
        AnyValue::Float64(v) => Some(v),
        AnyValue::Boolean(b) => Some(if b { 1.0 } else { 0.0 }),
        AnyValue::String(s) => parse_f64(s),
        AnyValue::StringOwned(s) => parse_f64(&s),
        _ => None,
    }
}

/// Extracts an integer from integer-typed values, `None` otherwise.
///
/// Unsigned values above `i64::MAX` yield `None`.
pub fn any_to_i64(value: AnyValue<'_>) -> Option<i64> {
    match value {
        AnyValue::Int8(v) => Some(i64::from(v)),
        AnyValue::Int16(v) => Some(i64::from(v)),
        AnyValue::Int32(v) => Some(i64::from(v)),
        AnyValue::Int64(v) => Some(v),
        AnyValue::UInt8(v) => Some(i64::from(v)),
        AnyValue::UInt16(v) => Some(i64::from(v)),
        AnyValue::UInt32(v) => Some(i64::from(v)),
        AnyValue::UInt64(v) => i64::try_from(v).ok(),
        _ => None,
    }
}

/// Parses a string as `f64`, returning `None` for invalid, empty or `NaN` strings.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Parses a string as `i64`, returning `None` for invalid or empty strings.
pub fn parse_i64(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<i64>().ok()
}

/// Whether the dtype holds integers.
pub fn is_integer_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

/// Whether the dtype holds integers or floats.
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    is_integer_dtype(dtype) || matches!(dtype, DataType::Float32 | DataType::Float64)
}

/// Reads a column as optional floats, `None` where the value is missing or non-numeric.
pub fn column_f64_values(column: &Column) -> Vec<Option<f64>> {
    (0..column.len())
        .map(|idx| any_to_f64(column.get(idx).unwrap_or(AnyValue::Null)))
        .collect()
}

/// Counts missing values in a column (nulls and float `NaN`).
pub fn count_missing(column: &Column) -> usize {
    (0..column.len())
        .filter(|&idx| is_missing(&column.get(idx).unwrap_or(AnyValue::Null)))
        .count()
}

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Share of `count` in `total` as a percentage rounded to two decimals.
///
/// An empty table yields `0.0`.
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(count as f64 / total as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    #[test]
    fn test_is_missing() {
        assert!(is_missing(&AnyValue::Null));
        assert!(is_missing(&AnyValue::Float32(f32::NAN)));
        assert!(!is_missing(&AnyValue::Float64(0.0)));
        assert!(!is_missing(&AnyValue::Boolean(false)));
    }

    #[test]
    fn test_any_to_string_missing() {
        assert_eq!(any_to_string(AnyValue::Null), "nan");
        assert_eq!(any_to_string(AnyValue::Float64(f64::NAN)), "nan");
    }

    #[test]
    fn test_any_to_string_scalars() {
        assert_eq!(any_to_string(AnyValue::Int64(-100)), "-100");
        assert_eq!(any_to_string(AnyValue::Float64(1.0)), "1");
        assert_eq!(any_to_string(AnyValue::Boolean(true)), "true");
    }

    #[test]
    fn test_any_to_display_keeps_float_and_bool_text() {
        assert_eq!(any_to_display(AnyValue::Float64(1.0)), "1.0");
        assert_eq!(any_to_display(AnyValue::Float64(-40.0)), "-40.0");
        assert_eq!(any_to_display(AnyValue::Float32(2.5)), "2.5");
        assert_eq!(any_to_display(AnyValue::Float64(f64::INFINITY)), "inf");
        assert_eq!(any_to_display(AnyValue::Float64(f64::NAN)), "nan");
        assert_eq!(any_to_display(AnyValue::Boolean(true)), "True");
        assert_eq!(any_to_display(AnyValue::Boolean(false)), "False");
        assert_eq!(any_to_display(AnyValue::String("x")), "x");
        assert_eq!(any_to_display(AnyValue::Null), "nan");
    }

    #[test]
    fn test_any_to_key_treats_missing_alike() {
        assert_eq!(any_to_key(AnyValue::Null), None);
        assert_eq!(any_to_key(AnyValue::Float64(f64::NAN)), None);
        assert_eq!(any_to_key(AnyValue::String("a")), Some("a".to_string()));
    }

    #[test]
    fn test_any_to_f64() {
        assert_eq!(any_to_f64(AnyValue::Null), None);
        assert_eq!(any_to_f64(AnyValue::Int32(42)), Some(42.0));
        assert_eq!(any_to_f64(AnyValue::String(" 2.5 ")), Some(2.5));
        assert_eq!(any_to_f64(AnyValue::String("invalid")), None);
        assert_eq!(any_to_f64(AnyValue::Boolean(true)), Some(1.0));
    }

    #[test]
    fn test_any_to_i64() {
        assert_eq!(any_to_i64(AnyValue::UInt8(7)), Some(7));
        assert_eq!(any_to_i64(AnyValue::UInt64(u64::MAX)), None);
        assert_eq!(any_to_i64(AnyValue::Float64(1.0)), None);
        assert_eq!(any_to_i64(AnyValue::Null), None);
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!(parse_f64("  "), None);
        assert_eq!(parse_f64("NaN"), None);
        assert_eq!(parse_f64("3.5"), Some(3.5));
        assert_eq!(parse_i64(" -7 "), Some(-7));
        assert_eq!(parse_i64("7.5"), None);
    }

    #[test]
    fn test_dtype_predicates() {
        assert!(is_integer_dtype(&DataType::UInt16));
        assert!(!is_integer_dtype(&DataType::Float64));
        assert!(is_numeric_dtype(&DataType::Float32));
        assert!(!is_numeric_dtype(&DataType::String));
    }

    #[test]
    fn test_column_helpers() {
        let column = Series::new("age".into(), &[Some(1.0), None, Some(f64::NAN)]).into_column();
        assert_eq!(count_missing(&column), 2);
        assert_eq!(column_f64_values(&column), vec![Some(1.0), None, None]);
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(1, 3), 33.33);
        assert_eq!(percentage(2, 3), 66.67);
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(round2(12.345_6), 12.35);
    }
}
