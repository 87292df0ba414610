//! Validation session.
//!
//! A [`DataQualityValidator`] owns one [`QualityReport`] that accumulates
//! across calls until it is reset.

use std::path::Path;

use dqv_model::{QualityReport, ValidationConfig};
use polars::prelude::DataFrame;
use tracing::{error, info, info_span};

use crate::error::Result;
use crate::export::export_report;
use crate::pipeline::CheckPipeline;

/// Read a config file and reject inconsistent rules before any data is touched.
pub fn load_config(path: &Path) -> Result<ValidationConfig> {
    let config = ValidationConfig::from_path(path)?;
    config.validate()?;
    Ok(config)
}

#[derive(Debug, Clone, Default)]
pub struct DataQualityValidator {
    report: QualityReport,
}

impl DataQualityValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every enabled check on `df` and return the cleaned table.
    ///
    /// `rows_processed` is recorded before the first check. On a fatal error
    /// the issue stays on the report, `rows_cleaned` is left as it was and no
    /// table is returned.
    pub fn validate_and_clean(
        &mut self,
        df: DataFrame,
        config: &ValidationConfig,
    ) -> Result<(DataFrame, &QualityReport)> {
        let span = info_span!("validate", rows = df.height());
        let _guard = span.enter();

        self.report.rows_processed = df.height();
        let pipeline = CheckPipeline::from_config(config);
        info!(rows = df.height(), checks = ?pipeline.step_names(), "starting validation");

        let cleaned = match pipeline.run(df, &mut self.report) {
            Ok(cleaned) => cleaned,
            Err(err) => {
                error!(error = %err, "validation aborted");
                return Err(err);
            }
        };

        self.report.rows_cleaned = cleaned.height();
        info!(
            rows_processed = self.report.rows_processed,
            rows_cleaned = self.report.rows_cleaned,
            issues = self.report.issue_count(),
            "validation complete"
        );
        Ok((cleaned, &self.report))
    }

    pub fn report(&self) -> &QualityReport {
        &self.report
    }

    /// Clear accumulated checks, issues and counters.
    pub fn reset_report(&mut self) {
        self.report.reset();
    }

    pub fn into_report(self) -> QualityReport {
        self.report
    }

    /// Write the current report as indented JSON.
    pub fn export_report(&self, path: &Path) -> Result<()> {
        export_report(&self.report, path)
    }
}
