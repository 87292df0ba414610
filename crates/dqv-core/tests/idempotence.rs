//! Re-running a cleaned table through the same configuration.

use dqv_core::DataQualityValidator;
use dqv_model::{
    DuplicateConfig, NullStrategy, OutlierRule, PatternRule, RangeAction, RangeRule, RowAction,
    ValidationConfig,
};
use polars::prelude::*;
use proptest::prelude::*;

fn removing_config() -> ValidationConfig {
    ValidationConfig::new()
        .with_duplicates(DuplicateConfig::on_columns(["id"]).action(RowAction::Remove))
        .with_null_strategy("code", NullStrategy::DROP_ROWS)
        .with_range("score", RangeRule::between(0.0, 100.0).action(RangeAction::Remove))
        .with_pattern("code", PatternRule::new("[A-C][0-9]").action(RowAction::Remove))
}

fn frame(ids: &[i64], scores: &[i64], codes: &[Option<String>]) -> DataFrame {
    df![
        "id" => ids,
        "score" => scores,
        "code" => codes,
    ]
    .unwrap()
}

proptest! {
    #[test]
    fn remove_actions_are_idempotent(
        rows in prop::collection::vec(
            (0i64..8, -50i64..150, prop::option::of("[A-E][0-9]")),
            0..40,
        )
    ) {
        let ids: Vec<i64> = rows.iter().map(|row| row.0).collect();
        let scores: Vec<i64> = rows.iter().map(|row| row.1).collect();
        let codes: Vec<Option<String>> = rows.iter().map(|row| row.2.clone()).collect();
        let config = removing_config();

        let mut validator = DataQualityValidator::new();
        let (first, _) = validator.validate_and_clean(frame(&ids, &scores, &codes), &config).unwrap();
        validator.reset_report();
        let (second, report) = validator.validate_and_clean(first.clone(), &config).unwrap();

        prop_assert!(report.issues_found.is_empty());
        prop_assert!(second.equals_missing(&first));
    }

    #[test]
    fn flag_actions_are_deterministic(values in prop::collection::vec(-1_000i64..1_000, 1..40)) {
        let config = ValidationConfig::new()
            .with_outliers("value", OutlierRule::iqr())
            .with_range("value", RangeRule::between(-500.0, 500.0));
        let df = df!["value" => values].unwrap();

        let mut validator = DataQualityValidator::new();
        let (first, _) = validator.validate_and_clean(df, &config).unwrap();
        let first_issues = validator.report().issues_found.clone();
        validator.reset_report();
        let (second, report) = validator.validate_and_clean(first.clone(), &config).unwrap();

        prop_assert_eq!(&report.issues_found, &first_issues);
        prop_assert!(second.equals_missing(&first));
    }
}

#[test]
fn iqr_removal_of_salary_is_stable() {
    let df = df!["salary" => [50_000i64, 52_000, 51_000, 49_000, 1_000_000]].unwrap();
    let config = ValidationConfig::new()
        .with_outliers("salary", OutlierRule::iqr().action(RowAction::Remove));

    let mut validator = DataQualityValidator::new();
    let (first, _) = validator.validate_and_clean(df, &config).unwrap();
    validator.reset_report();
    let (second, report) = validator.validate_and_clean(first.clone(), &config).unwrap();

    assert!(report.issues_found.is_empty());
    assert_eq!(second.height(), first.height());
}
