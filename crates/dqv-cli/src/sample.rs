//! Bundled demonstration dataset and configuration.
//!
//! Five users with one of each common defect: a duplicated row, a missing
//! name, a missing and an impossible age, a malformed email and a salary far
//! outside the rest.

use dqv_model::{
    DuplicateConfig, NullStrategy, OutlierRule, PatternRule, RangeAction, RangeRule, RowAction,
    ValidationConfig,
};
use polars::prelude::{DataFrame, PolarsResult, df};

/// Default location of the sample report.
pub const DEFAULT_SAMPLE_REPORT: &str = "logs/sample_validation_report.json";

/// Email pattern used by the sample configuration.
pub const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

pub fn sample_frame() -> PolarsResult<DataFrame> {
    df![
        "user_id" => [1i64, 1, 2, 3, 4],
        "name" => [Some("Alice"), Some("Alice"), Some("Bob"), Some("Charlie"), None],
        "age" => [Some(25i64), Some(25), Some(35), None, Some(150)],
        "email" => [
            "alice@example.com",
            "alice@example.com",
            "invalid-email",
            "charlie@test.com",
            "david@mail.com",
        ],
        "salary" => [50_000i64, 50_000, 60_000, 55_000, 1_000_000],
    ]
}

pub fn sample_config() -> ValidationConfig {
    ValidationConfig::new()
        .with_duplicates(
            DuplicateConfig::on_columns(["user_id", "name"]).action(RowAction::Remove),
        )
        .with_null_strategy("name", NullStrategy::DROP_ROWS)
        .with_null_strategy("age", NullStrategy::FILL_MEDIAN)
        .with_range(
            "age",
            RangeRule::between(0.0, 120.0).action(RangeAction::Remove),
        )
        .with_pattern("email", PatternRule::new(EMAIL_PATTERN))
        .with_outliers("salary", OutlierRule::iqr())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_config_is_valid() {
        let config = sample_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.enabled_checks().len(), 5);
    }

    #[test]
    fn sample_frame_shape() {
        assert_eq!(sample_frame().unwrap().shape(), (5, 5));
    }
}
