//! Quality check pipeline with ordered step execution.
//!
//! Each check implements the `QualityCheck` trait and is executed in order,
//! the output table of one step feeding the next.
//!
//! # Standard Pipeline Order
//!
//! 1. **DuplicateCheck** - Detect, flag or drop repeated rows
//! 2. **RequiredColumnsCheck** - Abort when required columns are absent
//! 3. **NullHandlingCheck** - Drop or fill missing values
//! 4. **TypeValidationCheck** - Coerce columns to target types
//! 5. **RangeCheck** - Flag, drop or cap out-of-range values
//! 6. **PatternCheck** - Full-match values against regular expressions
//! 7. **OutlierCheck** - IQR or z-score outlier detection
//!
//! # Example
//!
//! ```ignore
//! use dqv_core::pipeline::CheckPipeline;
//!
//! let pipeline = CheckPipeline::from_config(&config);
//! let cleaned = pipeline.run(df, &mut report)?;
//! ```

use dqv_model::{CheckKind, QualityReport, ValidationConfig};
use polars::prelude::DataFrame;
use tracing::debug;

use crate::checks::{
    DuplicateCheck, NullHandlingCheck, OutlierCheck, PatternCheck, RangeCheck,
    RequiredColumnsCheck, TypeValidationCheck,
};
use crate::error::Result;

/// A single check in the quality pipeline.
///
/// A check may record issues on the report and returns the table the next
/// step receives. Returning an error aborts the pipeline.
pub trait QualityCheck: Send + Sync {
    /// Name recorded in `checks_performed` once the check succeeds.
    fn name(&self) -> &'static str;

    /// Run the check on `df`.
    fn run(&self, df: DataFrame, report: &mut QualityReport) -> Result<DataFrame>;
}

/// An ordered pipeline of quality checks.
pub struct CheckPipeline {
    steps: Vec<Box<dyn QualityCheck>>,
}

impl Default for CheckPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckPipeline {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Build the pipeline for every check the configuration enables.
    pub fn from_config(config: &ValidationConfig) -> Self {
        let mut pipeline = Self::new();
        for kind in config.enabled_checks() {
            let step: Box<dyn QualityCheck> = match kind {
                CheckKind::Duplicates => match &config.check_duplicates {
                    Some(settings) => Box::new(DuplicateCheck::new(settings.clone())),
                    None => continue,
                },
                CheckKind::RequiredColumns => match &config.required_columns {
                    Some(columns) => Box::new(RequiredColumnsCheck::new(columns.clone())),
                    None => continue,
                },
                CheckKind::NullHandling => match &config.null_handling {
                    Some(rules) => Box::new(NullHandlingCheck::new(rules.clone())),
                    None => continue,
                },
                CheckKind::TypeValidation => match &config.type_validation {
                    Some(rules) => Box::new(TypeValidationCheck::new(rules.clone())),
                    None => continue,
                },
                CheckKind::RangeValidation => match &config.range_checks {
                    Some(rules) => Box::new(RangeCheck::new(rules.clone())),
                    None => continue,
                },
                CheckKind::PatternValidation => match &config.pattern_validation {
                    Some(rules) => Box::new(PatternCheck::new(rules.clone())),
                    None => continue,
                },
                CheckKind::OutlierDetection => match &config.outlier_detection {
                    Some(rules) => Box::new(OutlierCheck::new(rules.clone())),
                    None => continue,
                },
            };
            pipeline = pipeline.add_step(step);
        }
        pipeline
    }

    /// Add a step to the end of the pipeline.
    pub fn add_step(mut self, step: Box<dyn QualityCheck>) -> Self {
        self.steps.push(step);
        self
    }

    /// Run all steps in order.
    ///
    /// A step's name is recorded only after it returns successfully.
    pub fn run(&self, df: DataFrame, report: &mut QualityReport) -> Result<DataFrame> {
        let mut df = df;
        for step in &self.steps {
            debug!(step = step.name(), rows = df.height(), "running check");
            df = step.run(df, report)?;
            report.record_check(step.name());
        }
        Ok(df)
    }

    /// List step names in execution order.
    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|step| step.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dqv_model::{DuplicateConfig, OutlierRule, PatternRule};
    use polars::prelude::{Column, NamedFrom, Series};

    struct Marker(&'static str);

    impl QualityCheck for Marker {
        fn name(&self) -> &'static str {
            self.0
        }

        fn run(&self, df: DataFrame, _report: &mut QualityReport) -> Result<DataFrame> {
            Ok(df)
        }
    }

    #[test]
    fn empty_config_builds_empty_pipeline() {
        let pipeline = CheckPipeline::from_config(&ValidationConfig::new());
        assert!(pipeline.is_empty());
    }

    #[test]
    fn steps_follow_fixed_order() {
        let config = ValidationConfig::new()
            .with_outliers("salary", OutlierRule::iqr())
            .with_pattern("email", PatternRule::new(".+"))
            .with_required_columns(["id"])
            .with_duplicates(DuplicateConfig::default());
        let pipeline = CheckPipeline::from_config(&config);
        assert_eq!(
            pipeline.step_names(),
            vec![
                "duplicate_check",
                "required_columns_check",
                "pattern_validation",
                "outlier_detection"
            ]
        );
    }

    #[test]
    fn run_records_each_step() {
        let df = DataFrame::new(vec![Column::from(Series::new("a".into(), &[1i64, 2]))]).unwrap();
        let pipeline = CheckPipeline::new()
            .add_step(Box::new(Marker("first")))
            .add_step(Box::new(Marker("second")));
        let mut report = QualityReport::new();
        let out = pipeline.run(df, &mut report).unwrap();
        assert_eq!(out.height(), 2);
        assert_eq!(report.checks_performed, vec!["first", "second"]);
    }
}
