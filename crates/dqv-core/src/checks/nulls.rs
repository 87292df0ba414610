use std::cmp::Ordering;
use std::collections::BTreeMap;

use dqv_common::{
    any_to_f64, any_to_i64, any_to_string, column_f64_values, count_missing, is_integer_dtype,
    is_missing, is_numeric_dtype, percentage,
};
use dqv_model::{CheckKind, FillValue, Issue, NamedStrategy, NullStrategy, QualityReport};
use indexmap::IndexMap;
use polars::prelude::{AnyValue, Column, DataFrame, DataType, IntoColumn, NamedFrom, Series};
use tracing::{debug, info, warn};

use super::{filter_rows, has_column};
use crate::error::Result;
use crate::pipeline::QualityCheck;

/// Drops or fills missing values column by column.
pub struct NullHandlingCheck {
    rules: IndexMap<String, NullStrategy>,
}

impl NullHandlingCheck {
    pub fn new(rules: IndexMap<String, NullStrategy>) -> Self {
        Self { rules }
    }
}

impl QualityCheck for NullHandlingCheck {
    fn name(&self) -> &'static str {
        CheckKind::NullHandling.step_name()
    }

    fn run(&self, df: DataFrame, report: &mut QualityReport) -> Result<DataFrame> {
        let mut df = df;
        for (name, strategy) in &self.rules {
            if !has_column(&df, name) {
                warn!(column = %name, "null handling column not found, skipping");
                continue;
            }
            let column = df.column(name)?.clone();
            let missing = count_missing(&column);
            if missing == 0 {
                debug!(column = %name, "no missing values");
                continue;
            }

            warn!(column = %name, count = missing, "found missing values");
            report.add_issue(Issue::NullValues {
                column: name.clone(),
                count: missing as u64,
                percentage: percentage(missing, df.height()),
                strategy: strategy.clone(),
            });

            df = match strategy {
                NullStrategy::Named(NamedStrategy::DropRows) => {
                    let keep: Vec<bool> = (0..column.len())
                        .map(|idx| !is_missing(&column.get(idx).unwrap_or(AnyValue::Null)))
                        .collect();
                    let cleaned = filter_rows(&df, &keep)?;
                    info!(column = %name, removed = missing, "dropped rows with missing values");
                    cleaned
                }
                NullStrategy::Named(named) => {
                    let Some(fill) = statistic(&column, *named) else {
                        warn!(
                            column = %name,
                            strategy = %strategy,
                            "cannot compute fill statistic, column left unchanged"
                        );
                        continue;
                    };
                    debug!(column = %name, fill = %fill, "filling missing values");
                    replace_column(df, fill_missing(&column, &fill)?)?
                }
                NullStrategy::FillValue { fill_value } => {
                    replace_column(df, fill_missing(&column, fill_value)?)?
                }
            };
        }
        Ok(df)
    }
}

fn replace_column(mut df: DataFrame, column: Column) -> Result<DataFrame> {
    df.with_column(column)?;
    Ok(df)
}

/// Fill value for a statistic strategy, `None` when it cannot be computed.
fn statistic(column: &Column, strategy: NamedStrategy) -> Option<FillValue> {
    match strategy {
        NamedStrategy::FillMean => {
            numeric_values(column).and_then(|values| mean(&values).map(FillValue::Float))
        }
        NamedStrategy::FillMedian => {
            numeric_values(column).and_then(|values| median(&values).map(FillValue::Float))
        }
        NamedStrategy::FillMode => mode(column),
        NamedStrategy::DropRows => None,
    }
}

fn numeric_values(column: &Column) -> Option<Vec<f64>> {
    if !is_numeric_dtype(column.dtype()) {
        return None;
    }
    Some(column_f64_values(column).into_iter().flatten().collect())
}

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

pub(crate) fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Most frequent non-missing value; the lowest-ordered value wins ties.
fn mode(column: &Column) -> Option<FillValue> {
    let dtype = column.dtype();
    let present = (0..column.len())
        .map(|idx| column.get(idx).unwrap_or(AnyValue::Null))
        .filter(|value| !is_missing(value));

    if is_integer_dtype(dtype) {
        let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
        for value in present.filter_map(any_to_i64) {
            *counts.entry(value).or_default() += 1;
        }
        most_frequent(counts).map(FillValue::Int)
    } else if is_numeric_dtype(dtype) {
        let mut values: Vec<f64> = present.filter_map(any_to_f64).collect();
        values.sort_by(f64::total_cmp);
        let mut best: Option<(f64, usize)> = None;
        for run in values.chunk_by(|a, b| a.total_cmp(b) == Ordering::Equal) {
            if best.is_none_or(|(_, count)| run.len() > count) {
                best = Some((run[0], run.len()));
            }
        }
        best.map(|(value, _)| FillValue::Float(value))
    } else if matches!(dtype, DataType::Boolean) {
        let mut counts: BTreeMap<bool, usize> = BTreeMap::new();
        for value in present {
            if let AnyValue::Boolean(flag) = value {
                *counts.entry(flag).or_default() += 1;
            }
        }
        most_frequent(counts).map(FillValue::Bool)
    } else {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for value in present {
            *counts.entry(any_to_string(value)).or_default() += 1;
        }
        most_frequent(counts).map(FillValue::Text)
    }
}

fn most_frequent<K: Ord>(counts: BTreeMap<K, usize>) -> Option<K> {
    let mut best: Option<(K, usize)> = None;
    for (value, count) in counts {
        if best.as_ref().is_none_or(|(_, top)| count > *top) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

/// Replace missing entries with `fill`, choosing the result dtype from the
/// column and the fill value.
///
/// Integer columns stay integer only for integral fills; numeric columns
/// otherwise become `Float64`. Text columns take the fill rendered as text.
/// Any other combination renders the whole column as text.
pub(crate) fn fill_missing(column: &Column, fill: &FillValue) -> Result<Column> {
    let name = column.name().clone();
    let dtype = column.dtype();
    let values = (0..column.len()).map(|idx| column.get(idx).unwrap_or(AnyValue::Null));

    let numeric_fill = match fill {
        FillValue::Int(value) => Some(*value as f64),
        FillValue::Float(value) => Some(*value),
        FillValue::Bool(flag) => Some(f64::from(u8::from(*flag))),
        FillValue::Text(_) => None,
    };

    let filled = match (dtype, fill, numeric_fill) {
        (dtype, FillValue::Int(fill), _) if is_integer_dtype(dtype) => {
            let data: Vec<Option<i64>> = values
                .map(|value| {
                    if is_missing(&value) {
                        Some(*fill)
                    } else {
                        any_to_i64(value)
                    }
                })
                .collect();
            Series::new(name, data)
        }
        (dtype, _, Some(fill)) if is_numeric_dtype(dtype) => {
            let data: Vec<Option<f64>> = column_f64_values(column)
                .into_iter()
                .map(|value| Some(value.unwrap_or(fill)))
                .collect();
            Series::new(name, data)
        }
        (DataType::Boolean, FillValue::Bool(fill), _) => {
            let data: Vec<Option<bool>> = values
                .map(|value| match value {
                    AnyValue::Boolean(flag) => Some(flag),
                    _ => Some(*fill),
                })
                .collect();
            Series::new(name, data)
        }
        _ => {
            let text = fill.to_string();
            let data: Vec<String> = values
                .map(|value| {
                    if is_missing(&value) {
                        text.clone()
                    } else {
                        any_to_string(value)
                    }
                })
                .collect();
            Series::new(name, data)
        }
    };
    Ok(filled.into_column())
}
