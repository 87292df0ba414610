//! Shared utilities for the data quality validator crates.

pub mod values;

pub use values::{
    MISSING_TEXT, any_to_display, any_to_f64, any_to_i64, any_to_key, any_to_string,
    column_f64_values, count_missing, format_numeric, is_integer_dtype, is_missing,
    is_numeric_dtype, parse_f64, parse_i64, percentage, round2,
};
