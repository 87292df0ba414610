//! The seven quality checks, one module per check.

mod duplicates;
mod nulls;
mod outliers;
mod patterns;
mod ranges;
mod required;
mod types;

pub use duplicates::{DUPLICATE_FLAG_COLUMN, DuplicateCheck, duplicate_mask};
pub use nulls::NullHandlingCheck;
pub use outliers::{OUTLIER_SUFFIX, OutlierCheck, iqr_bounds, outlier_mask};
pub use patterns::{INVALID_FORMAT_SUFFIX, PatternCheck, full_match_regex};
pub use ranges::RangeCheck;
pub use required::RequiredColumnsCheck;
pub use types::{
    Coerced, TypeValidationCheck, coerce_bool, coerce_float, coerce_int, convert_column,
    parse_datetime_millis,
};

use polars::prelude::{BooleanChunked, DataFrame, NamedFrom, NewChunkedArray, Series};

use crate::error::Result;

/// Keep rows where `keep` is true, preserving order.
pub(crate) fn filter_rows(df: &DataFrame, keep: &[bool]) -> Result<DataFrame> {
    let mask = BooleanChunked::from_slice("keep".into(), keep);
    Ok(df.filter(&mask)?)
}

/// Drop rows where `drop` is true.
pub(crate) fn drop_rows(df: &DataFrame, drop: &[bool]) -> Result<DataFrame> {
    let keep: Vec<bool> = drop.iter().map(|flag| !flag).collect();
    filter_rows(df, &keep)
}

/// Append (or replace) a boolean indicator column.
pub(crate) fn append_flag(mut df: DataFrame, name: &str, flags: &[bool]) -> Result<DataFrame> {
    df.with_column(Series::new(name.into(), flags))?;
    Ok(df)
}

pub(crate) fn count_true(flags: &[bool]) -> usize {
    flags.iter().filter(|flag| **flag).count()
}

pub(crate) fn has_column(df: &DataFrame, name: &str) -> bool {
    df.column(name).is_ok()
}
