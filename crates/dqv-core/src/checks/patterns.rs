use dqv_common::any_to_display;
use dqv_model::{CheckKind, Issue, PatternRule, QualityReport, RowAction};
use indexmap::IndexMap;
use polars::prelude::{AnyValue, DataFrame};
use regex::Regex;
use tracing::{debug, error, info, warn};

use super::{append_flag, count_true, drop_rows, has_column};
use crate::error::Result;
use crate::pipeline::QualityCheck;

/// Suffix of the indicator column added by the `flag` action.
pub const INVALID_FORMAT_SUFFIX: &str = "_invalid_format";

/// Requires every value of a column to fully match a regular expression.
pub struct PatternCheck {
    rules: IndexMap<String, PatternRule>,
}

impl PatternCheck {
    pub fn new(rules: IndexMap<String, PatternRule>) -> Self {
        Self { rules }
    }
}

/// Compile `pattern` anchored at both ends.
pub fn full_match_regex(pattern: &str) -> std::result::Result<Regex, regex::Error> {
    Regex::new(&format!("^(?:{pattern})$"))
}

impl QualityCheck for PatternCheck {
    fn name(&self) -> &'static str {
        CheckKind::PatternValidation.step_name()
    }

    fn run(&self, df: DataFrame, report: &mut QualityReport) -> Result<DataFrame> {
        let mut df = df;
        for (name, rule) in &self.rules {
            if !has_column(&df, name) {
                warn!(column = %name, "pattern column not found, skipping");
                continue;
            }
            let regex = match full_match_regex(&rule.pattern) {
                Ok(regex) => regex,
                Err(err) => {
                    error!(column = %name, pattern = %rule.pattern, error = %err, "invalid pattern, skipping");
                    continue;
                }
            };

            let column = df.column(name)?;
            let invalid: Vec<bool> = (0..column.len())
                .map(|idx| {
                    let text = any_to_display(column.get(idx).unwrap_or(AnyValue::Null));
                    !regex.is_match(&text)
                })
                .collect();
            let count = count_true(&invalid);
            if count == 0 {
                debug!(column = %name, "all values match pattern");
                continue;
            }

            warn!(column = %name, count, "found values with invalid format");
            report.add_issue(Issue::PatternViolation {
                column: name.clone(),
                count: count as u64,
                pattern: rule.pattern.clone(),
            });

            df = match rule.action {
                RowAction::Remove => {
                    let cleaned = drop_rows(&df, &invalid)?;
                    info!(column = %name, removed = count, "removed rows with invalid format");
                    cleaned
                }
                RowAction::Flag => append_flag(df, &format!("{name}{INVALID_FORMAT_SUFFIX}"), &invalid)?,
            };
        }
        Ok(df)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::test_support::{bool_col, float_col, frame, str_col};

    const EMAIL: &str = r"[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+";

    fn emails() -> DataFrame {
        frame(vec![str_col(
            "email",
            &[
                Some("test@example.com"),
                Some("invalid-email"),
                Some("another@test.com"),
                None,
            ],
        )])
    }

    fn run(rule: PatternRule) -> (DataFrame, QualityReport) {
        let check = PatternCheck::new(IndexMap::from([("email".to_string(), rule)]));
        let mut report = QualityReport::new();
        let out = check.run(emails(), &mut report).unwrap();
        (out, report)
    }

    #[test]
    fn flag_counts_missing_as_invalid() {
        let (out, report) = run(PatternRule::new(EMAIL));
        let flags: Vec<Option<bool>> = out
            .column("email_invalid_format")
            .unwrap()
            .bool()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(flags, vec![Some(false), Some(true), Some(false), Some(true)]);
        assert_eq!(report.issues_found[0].count(), Some(2));
    }

    #[test]
    fn remove_drops_invalid_rows() {
        let (out, _) = run(PatternRule::new(EMAIL).action(RowAction::Remove));
        assert_eq!(out.height(), 2);
        assert_eq!(out.width(), 1);
    }

    #[test]
    fn patterns_must_match_whole_value() {
        let regex = full_match_regex("abc").unwrap();
        assert!(regex.is_match("abc"));
        assert!(!regex.is_match("xabcx"));
        let alternation = full_match_regex("a|b").unwrap();
        assert!(!alternation.is_match("ab"));
    }

    #[test]
    fn invalid_regex_is_skipped() {
        let (out, report) = run(PatternRule::new("(unclosed"));
        assert_eq!(out.width(), 1);
        assert!(report.issues_found.is_empty());
    }

    #[test]
    fn whole_floats_and_booleans_match_their_text_form() {
        let df = frame(vec![
            float_col("price", &[Some(1.0), Some(2.5)]),
            bool_col("ok", &[Some(true), Some(false)]),
        ]);
        let check = PatternCheck::new(IndexMap::from([
            ("price".to_string(), PatternRule::new(r"\d+\.\d+")),
            ("ok".to_string(), PatternRule::new("True|False")),
        ]));
        let mut report = QualityReport::new();
        let out = check.run(df, &mut report).unwrap();
        assert_eq!(out.width(), 2);
        assert!(report.issues_found.is_empty());
    }
}
