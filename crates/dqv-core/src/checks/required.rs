use dqv_model::{CheckKind, Issue, QualityReport};
use polars::prelude::DataFrame;
use tracing::{debug, error};

use super::has_column;
use crate::error::{DqvError, Result};
use crate::pipeline::QualityCheck;

/// Aborts the pipeline when any required column is absent.
pub struct RequiredColumnsCheck {
    columns: Vec<String>,
}

impl RequiredColumnsCheck {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }
}

impl QualityCheck for RequiredColumnsCheck {
    fn name(&self) -> &'static str {
        CheckKind::RequiredColumns.step_name()
    }

    fn run(&self, df: DataFrame, report: &mut QualityReport) -> Result<DataFrame> {
        let missing: Vec<String> = self
            .columns
            .iter()
            .filter(|name| !has_column(&df, name))
            .cloned()
            .collect();
        if missing.is_empty() {
            debug!(count = self.columns.len(), "all required columns present");
            return Ok(df);
        }

        error!(columns = ?missing, "missing required columns");
        report.add_issue(Issue::MissingColumns {
            columns: missing.clone(),
        });
        Err(DqvError::MissingColumns { columns: missing })
    }
}
