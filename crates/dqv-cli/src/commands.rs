use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::Table;
use polars::prelude::DataFrame;
use tracing::{info, info_span};

use dqv_cli::io::{read_csv, write_csv};
use dqv_cli::sample::{sample_config, sample_frame};
use dqv_core::{DataQualityValidator, load_config};
use dqv_model::{CheckKind, QualityReport, ValidationConfig};

use crate::cli::{SampleArgs, ValidateArgs};
use crate::summary::{apply_table_style, header_cell};

/// What a run produced, for the summary printout.
pub struct RunOutcome {
    pub source: String,
    pub report: QualityReport,
    pub columns: usize,
    pub output: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
}

pub fn run_validate(args: &ValidateArgs) -> Result<RunOutcome> {
    let span = info_span!("validate_file", input = %args.input.display());
    let _guard = span.enter();

    let config = load_config(&args.config)
        .with_context(|| format!("load config {}", args.config.display()))?;
    let df = read_csv(&args.input)?;

    let report_path = if args.dry_run { None } else { args.report.as_deref() };
    let (mut cleaned, validator) = run_pipeline(df, &config, report_path)?;

    let output = match (&args.output, args.dry_run) {
        (Some(path), false) => {
            write_csv(&mut cleaned, path)?;
            info!(path = %path.display(), "wrote cleaned data");
            Some(path.clone())
        }
        _ => None,
    };

    if args.json {
        println!("{}", validator.report().to_json_pretty()?);
    }

    Ok(RunOutcome {
        source: args.input.display().to_string(),
        columns: cleaned.width(),
        report: validator.into_report(),
        output,
        report_path: report_path.map(Path::to_path_buf),
    })
}

pub fn run_sample(args: &SampleArgs) -> Result<RunOutcome> {
    let span = info_span!("sample");
    let _guard = span.enter();

    let df = sample_frame().context("build sample data")?;
    let (cleaned, validator) = run_pipeline(df, &sample_config(), Some(args.report.as_path()))?;
    Ok(RunOutcome {
        source: "bundled sample".to_string(),
        columns: cleaned.width(),
        report: validator.into_report(),
        output: None,
        report_path: Some(args.report.clone()),
    })
}

/// Run the pipeline and export the report when a path is given.
///
/// The report is exported even when the pipeline aborts, so the recorded
/// issue survives the failed run.
fn run_pipeline(
    df: DataFrame,
    config: &ValidationConfig,
    report_path: Option<&Path>,
) -> Result<(DataFrame, DataQualityValidator)> {
    let mut validator = DataQualityValidator::new();
    let result = validator
        .validate_and_clean(df, config)
        .map(|(cleaned, _)| cleaned);
    if let Some(path) = report_path {
        validator
            .export_report(path)
            .with_context(|| format!("write report {}", path.display()))?;
    }
    Ok((result?, validator))
}

pub fn run_checks() {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Check"),
        header_cell("Config key"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    for (position, kind) in CheckKind::ALL.into_iter().enumerate() {
        table.add_row(vec![
            (position + 1).to_string(),
            kind.step_name().to_string(),
            kind.config_key().to_string(),
            kind.description().to_string(),
        ]);
    }
    println!("{table}");
}
