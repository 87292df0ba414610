use dqv_common::{any_to_i64, column_f64_values, is_integer_dtype, is_numeric_dtype};
use dqv_model::{CheckKind, Issue, QualityReport, RangeAction, RangeRule, RangeViolationKind};
use indexmap::IndexMap;
use polars::prelude::{AnyValue, Column, DataFrame, IntoColumn, NamedFrom, Series};
use tracing::{debug, info, warn};

use super::{count_true, drop_rows, has_column};
use crate::error::Result;
use crate::pipeline::QualityCheck;

/// Checks numeric columns against inclusive bounds.
pub struct RangeCheck {
    rules: IndexMap<String, RangeRule>,
}

impl RangeCheck {
    pub fn new(rules: IndexMap<String, RangeRule>) -> Self {
        Self { rules }
    }
}

impl QualityCheck for RangeCheck {
    fn name(&self) -> &'static str {
        CheckKind::RangeValidation.step_name()
    }

    fn run(&self, df: DataFrame, report: &mut QualityReport) -> Result<DataFrame> {
        let mut df = df;
        for (name, rule) in &self.rules {
            if !has_column(&df, name) {
                warn!(column = %name, "range check column not found, skipping");
                continue;
            }
            if !is_numeric_dtype(df.column(name)?.dtype()) {
                warn!(column = %name, "range check column is not numeric, skipping");
                continue;
            }
            if let Some(min) = rule.min {
                df = apply_bound(df, name, min, RangeViolationKind::BelowMinimum, rule.action, report)?;
            }
            if let Some(max) = rule.max {
                df = apply_bound(df, name, max, RangeViolationKind::AboveMaximum, rule.action, report)?;
            }
        }
        Ok(df)
    }
}

fn apply_bound(
    df: DataFrame,
    name: &str,
    bound: f64,
    violation: RangeViolationKind,
    action: RangeAction,
    report: &mut QualityReport,
) -> Result<DataFrame> {
    let column = df.column(name)?;
    let violates: Vec<bool> = column_f64_values(column)
        .into_iter()
        .map(|value| match (value, violation) {
            (Some(value), RangeViolationKind::BelowMinimum) => value < bound,
            (Some(value), RangeViolationKind::AboveMaximum) => value > bound,
            (None, _) => false,
        })
        .collect();
    let count = count_true(&violates);
    if count == 0 {
        debug!(column = %name, bound, violation = violation.as_str(), "no range violations");
        return Ok(df);
    }

    warn!(column = %name, count, bound, violation = violation.as_str(), "found range violations");
    report.add_issue(Issue::RangeViolation {
        column: name.to_string(),
        violation,
        count: count as u64,
        threshold: bound,
    });

    match action {
        RangeAction::Flag => Ok(df),
        RangeAction::Remove => {
            let cleaned = drop_rows(&df, &violates)?;
            info!(column = %name, removed = count, "removed out-of-range rows");
            Ok(cleaned)
        }
        RangeAction::Cap => {
            let capped = cap_column(column, bound, &violates);
            let mut df = df;
            df.with_column(capped)?;
            info!(column = %name, capped = count, bound, "capped out-of-range values");
            Ok(df)
        }
    }
}

/// Replace flagged values with `bound`.
///
/// Integer columns stay integer when the bound is integral.
fn cap_column(column: &Column, bound: f64, violates: &[bool]) -> Column {
    let name = column.name().clone();
    if is_integer_dtype(column.dtype()) && bound.fract() == 0.0 {
        let bound = bound as i64;
        let data: Vec<Option<i64>> = (0..column.len())
            .map(|idx| {
                if violates[idx] {
                    Some(bound)
                } else {
                    any_to_i64(column.get(idx).unwrap_or(AnyValue::Null))
                }
            })
            .collect();
        return Series::new(name, data).into_column();
    }
    let data: Vec<Option<f64>> = column_f64_values(column)
        .into_iter()
        .zip(violates)
        .map(|(value, flagged)| if *flagged { Some(bound) } else { value })
        .collect();
    Series::new(name, data).into_column()
}
