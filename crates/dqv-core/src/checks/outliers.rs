use dqv_common::{column_f64_values, is_numeric_dtype, percentage};
use dqv_model::{CheckKind, Issue, OutlierMethod, OutlierRule, QualityReport, RowAction};
use indexmap::IndexMap;
use polars::prelude::DataFrame;
use tracing::{debug, info, warn};

use super::nulls::mean;
use super::{append_flag, count_true, drop_rows, has_column};
use crate::error::Result;
use crate::pipeline::QualityCheck;

/// Suffix of the indicator column added by the `flag` action.
pub const OUTLIER_SUFFIX: &str = "_is_outlier";

/// Detects statistical outliers in numeric columns.
pub struct OutlierCheck {
    rules: IndexMap<String, OutlierRule>,
}

impl OutlierCheck {
    pub fn new(rules: IndexMap<String, OutlierRule>) -> Self {
        Self { rules }
    }
}

impl QualityCheck for OutlierCheck {
    fn name(&self) -> &'static str {
        CheckKind::OutlierDetection.step_name()
    }

    fn run(&self, df: DataFrame, report: &mut QualityReport) -> Result<DataFrame> {
        let mut df = df;
        for (name, rule) in &self.rules {
            if !has_column(&df, name) {
                warn!(column = %name, "outlier column not found, skipping");
                continue;
            }
            let column = df.column(name)?;
            if !is_numeric_dtype(column.dtype()) {
                warn!(column = %name, "outlier column is not numeric, skipping");
                continue;
            }

            let values = column_f64_values(column);
            let outliers = outlier_mask(&values, rule);
            let count = count_true(&outliers);
            if count == 0 {
                debug!(column = %name, method = %rule.method, "no outliers");
                continue;
            }

            warn!(column = %name, count, method = %rule.method, "found outliers");
            report.add_issue(Issue::Outliers {
                column: name.clone(),
                count: count as u64,
                percentage: percentage(count, df.height()),
                method: rule.method,
            });

            df = match rule.action {
                RowAction::Remove => {
                    let cleaned = drop_rows(&df, &outliers)?;
                    info!(column = %name, removed = count, "removed outlier rows");
                    cleaned
                }
                RowAction::Flag => append_flag(df, &format!("{name}{OUTLIER_SUFFIX}"), &outliers)?,
            };
        }
        Ok(df)
    }
}

/// Marks outliers among `values`; missing entries are never outliers.
pub fn outlier_mask(values: &[Option<f64>], rule: &OutlierRule) -> Vec<bool> {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    let is_outlier: Box<dyn Fn(f64) -> bool> = match rule.method {
        OutlierMethod::Iqr => match iqr_bounds(&present, rule.multiplier) {
            Some((lower, upper)) => Box::new(move |value| value < lower || value > upper),
            None => return vec![false; values.len()],
        },
        OutlierMethod::Zscore => match mean_and_std(&present) {
            Some((mean, std)) => {
                let threshold = rule.threshold;
                Box::new(move |value| ((value - mean) / std).abs() > threshold)
            }
            None => return vec![false; values.len()],
        },
    };
    values
        .iter()
        .map(|value| value.is_some_and(|value| is_outlier(value)))
        .collect()
}

/// `[Q1 - m*IQR, Q3 + m*IQR]`, `None` for an empty sample.
pub fn iqr_bounds(values: &[f64], multiplier: f64) -> Option<(f64, f64)> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let q1 = quantile(&sorted, 0.25)?;
    let q3 = quantile(&sorted, 0.75)?;
    let iqr = q3 - q1;
    Some((q1 - multiplier * iqr, q3 + multiplier * iqr))
}

/// Linear interpolation between closest ranks on sorted input.
fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Mean and sample standard deviation; `None` when the deviation is zero or undefined.
fn mean_and_std(values: &[f64]) -> Option<(f64, f64)> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean(values)?;
    let variance =
        values.iter().map(|value| (value - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    let std = variance.sqrt();
    (std.is_finite() && std > 0.0).then_some((mean, std))
}
