//! Report accumulation, reset, fatal aborts and export.

use dqv_core::{DataQualityValidator, DqvError, load_config};
use dqv_model::{DuplicateConfig, Issue, IssueKind, QualityReport, RowAction, ValidationConfig};
use polars::prelude::*;

fn people() -> DataFrame {
    df![
        "id" => [1i64, 1, 2],
        "name" => ["a", "a", "b"],
    ]
    .unwrap()
}

fn dedupe_config() -> ValidationConfig {
    ValidationConfig::new()
        .with_duplicates(DuplicateConfig::on_columns(["id"]).action(RowAction::Remove))
}

#[test]
fn report_accumulates_across_calls() {
    let mut validator = DataQualityValidator::new();
    let config = dedupe_config();
    validator.validate_and_clean(people(), &config).unwrap();
    let (_, report) = validator.validate_and_clean(people(), &config).unwrap();

    assert_eq!(report.checks_performed, vec!["duplicate_check", "duplicate_check"]);
    assert_eq!(report.issues_of(IssueKind::Duplicates).count(), 2);
    assert_eq!(report.rows_processed, 3);
    assert_eq!(report.rows_cleaned, 2);
}

#[test]
fn reset_clears_everything_but_timestamp() {
    let mut validator = DataQualityValidator::new();
    validator
        .validate_and_clean(people(), &dedupe_config())
        .unwrap();
    let timestamp = validator.report().timestamp;

    validator.reset_report();
    let report = validator.report();
    assert_eq!(report.timestamp, timestamp);
    assert!(report.checks_performed.is_empty());
    assert!(report.issues_found.is_empty());
    assert_eq!(report.rows_processed, 0);
    assert_eq!(report.rows_cleaned, 0);
}

#[test]
fn missing_required_columns_abort() {
    let mut validator = DataQualityValidator::new();
    let config = dedupe_config().with_required_columns(["id", "email", "phone"]);
    let result = validator.validate_and_clean(people(), &config);

    match result {
        Err(DqvError::MissingColumns { columns }) => assert_eq!(columns, vec!["email", "phone"]),
        other => panic!("expected missing columns error, got {other:?}"),
    }
    let report = validator.into_report();
    assert_eq!(report.checks_performed, vec!["duplicate_check"]);
    assert_eq!(report.rows_processed, 3);
    assert_eq!(report.rows_cleaned, 0);
    assert_eq!(
        report.issues_found.last(),
        Some(&Issue::MissingColumns {
            columns: vec!["email".to_string(), "phone".to_string()]
        })
    );
}

#[test]
fn independent_sessions_do_not_share_reports() {
    let mut first = DataQualityValidator::new();
    let second = DataQualityValidator::new();
    first.validate_and_clean(people(), &dedupe_config()).unwrap();
    assert_eq!(first.report().issue_count(), 1);
    assert_eq!(second.report().issue_count(), 0);
}

#[test]
fn export_writes_readable_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logs").join("report.json");
    let mut validator = DataQualityValidator::new();
    validator
        .validate_and_clean(people(), &dedupe_config())
        .unwrap();
    validator.export_report(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let back: QualityReport = serde_json::from_str(&text).unwrap();
    assert_eq!(&back, validator.report());
    let raw: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(raw["issues_found"][0]["type"], "duplicates");
    assert_eq!(raw["rows_cleaned"], 2);
}

#[test]
fn load_config_rejects_inconsistent_rules() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dqv.json");
    std::fs::write(&path, r#"{"range_checks": {"age": {"min": 10, "max": 1}}}"#).unwrap();

    let error = load_config(&path).unwrap_err();
    assert!(matches!(error, DqvError::InvalidConfig(_)));
    assert!(error.is_recoverable());
    assert!(error.suggestion().is_some());

    std::fs::write(&path, r#"{"required_columns": ["id"]}"#).unwrap();
    let config = load_config(&path).unwrap();
    assert_eq!(config.required_columns, Some(vec!["id".to_string()]));
}
