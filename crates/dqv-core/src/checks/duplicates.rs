use std::collections::{HashMap, HashSet};

use dqv_common::any_to_key;
use dqv_model::{CheckKind, DuplicateConfig, Issue, Keep, QualityReport, RowAction};
use polars::prelude::{AnyValue, DataFrame};
use tracing::{debug, info, warn};

use super::{append_flag, count_true, drop_rows, has_column};
use crate::error::Result;
use crate::pipeline::QualityCheck;

/// Indicator column added by the `flag` action.
pub const DUPLICATE_FLAG_COLUMN: &str = "_is_duplicate";

type RowKey = Vec<Option<String>>;

/// Finds rows repeated over a subset of columns (or whole rows).
pub struct DuplicateCheck {
    config: DuplicateConfig,
}

impl DuplicateCheck {
    pub fn new(config: DuplicateConfig) -> Self {
        Self { config }
    }

    fn key_columns(&self, df: &DataFrame) -> Vec<String> {
        match &self.config.subset {
            None => df
                .get_column_names()
                .into_iter()
                .map(ToString::to_string)
                .collect(),
            Some(subset) => subset
                .iter()
                .filter(|name| {
                    let present = has_column(df, name);
                    if !present {
                        warn!(column = %name, "duplicate subset column not found, ignoring");
                    }
                    present
                })
                .cloned()
                .collect(),
        }
    }
}

impl QualityCheck for DuplicateCheck {
    fn name(&self) -> &'static str {
        CheckKind::Duplicates.step_name()
    }

    fn run(&self, df: DataFrame, report: &mut QualityReport) -> Result<DataFrame> {
        let columns = self.key_columns(&df);
        let mask = duplicate_mask(&df, &columns, self.config.keep)?;
        let count = count_true(&mask);
        if count == 0 {
            debug!("no duplicate rows");
            return Ok(df);
        }

        warn!(count, "found duplicate rows");
        report.add_issue(Issue::Duplicates {
            count: count as u64,
            columns_checked: self.config.subset.clone(),
        });

        match self.config.action {
            Some(RowAction::Remove) => {
                let cleaned = drop_rows(&df, &mask)?;
                info!(removed = count, "removed duplicate rows");
                Ok(cleaned)
            }
            Some(RowAction::Flag) => append_flag(df, DUPLICATE_FLAG_COLUMN, &mask),
            None => Ok(df),
        }
    }
}

/// Marks rows that duplicate another row over `columns`.
///
/// Missing values compare equal to each other. With no columns nothing is
/// a duplicate.
pub fn duplicate_mask(df: &DataFrame, columns: &[String], keep: Keep) -> Result<Vec<bool>> {
    let height = df.height();
    if columns.is_empty() {
        return Ok(vec![false; height]);
    }
    let keys = row_keys(df, columns)?;
    let mut mask = vec![false; height];
    match keep {
        Keep::First => {
            let mut seen = HashSet::with_capacity(height);
            for (idx, key) in keys.iter().enumerate() {
                mask[idx] = !seen.insert(key);
            }
        }
        Keep::Last => {
            let mut seen = HashSet::with_capacity(height);
            for (idx, key) in keys.iter().enumerate().rev() {
                mask[idx] = !seen.insert(key);
            }
        }
        Keep::MarkAll => {
            let mut counts: HashMap<&RowKey, usize> = HashMap::with_capacity(height);
            for key in &keys {
                *counts.entry(key).or_default() += 1;
            }
            for (idx, key) in keys.iter().enumerate() {
                mask[idx] = counts.get(key).is_some_and(|count| *count > 1);
            }
        }
    }
    Ok(mask)
}

fn row_keys(df: &DataFrame, columns: &[String]) -> Result<Vec<RowKey>> {
    let selected = columns
        .iter()
        .map(|name| df.column(name))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok((0..df.height())
        .map(|idx| {
            selected
                .iter()
                .map(|column| any_to_key(column.get(idx).unwrap_or(AnyValue::Null)))
                .collect()
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::test_support::{frame, int_col, str_col};

    fn users() -> DataFrame {
        frame(vec![
            int_col("id", &[Some(1), Some(1), Some(2), Some(2), None, None]),
            str_col(
                "name",
                &[Some("a"), Some("a"), Some("b"), Some("c"), None, None],
            ),
        ])
    }

    #[test]
    fn keep_first_marks_later_rows() {
        let mask = duplicate_mask(&users(), &["id".to_string()], Keep::First).unwrap();
        assert_eq!(mask, vec![false, true, false, true, false, true]);
    }

    #[test]
    fn keep_last_marks_earlier_rows() {
        let mask = duplicate_mask(&users(), &["id".to_string()], Keep::Last).unwrap();
        assert_eq!(mask, vec![true, false, true, false, true, false]);
    }

    #[test]
    fn mark_all_flags_every_member() {
        let columns = vec!["id".to_string(), "name".to_string()];
        let mask = duplicate_mask(&users(), &columns, Keep::MarkAll).unwrap();
        assert_eq!(mask, vec![true, true, false, false, true, true]);
    }

    #[test]
    fn absent_subset_finds_nothing() {
        let check = DuplicateCheck::new(DuplicateConfig::on_columns(["nope"]));
        let mut report = QualityReport::new();
        let out = check.run(users(), &mut report).unwrap();
        assert_eq!(out.height(), 6);
        assert!(report.issues_found.is_empty());
    }

    #[test]
    fn flag_action_adds_indicator() {
        let check = DuplicateCheck::new(DuplicateConfig::default().action(RowAction::Flag));
        let mut report = QualityReport::new();
        let out = check.run(users(), &mut report).unwrap();
        assert_eq!(out.height(), 6);
        let flags: Vec<Option<bool>> = out
            .column(DUPLICATE_FLAG_COLUMN)
            .unwrap()
            .bool()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(flags.iter().filter(|flag| **flag == Some(true)).count(), 2);
        assert_eq!(
            report.issues_found,
            vec![Issue::Duplicates {
                count: 2,
                columns_checked: None
            }]
        );
    }

    #[test]
    fn no_action_records_only() {
        let check = DuplicateCheck::new(DuplicateConfig::on_columns(["id"]));
        let mut report = QualityReport::new();
        let out = check.run(users(), &mut report).unwrap();
        assert_eq!(out.height(), 6);
        assert_eq!(out.width(), 2);
        assert_eq!(report.issue_count(), 1);
    }
}
