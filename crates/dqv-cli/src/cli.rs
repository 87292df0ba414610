//! CLI argument definitions for the data quality validator.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use dqv_cli::sample::DEFAULT_SAMPLE_REPORT;

#[derive(Parser)]
#[command(
    name = "dqv",
    version,
    about = "Data quality validator - check and clean tabular data",
    long_about = "Run a fixed pipeline of data quality checks over a CSV file.\n\n\
                  Checks run in order: duplicates, required columns, null handling,\n\
                  type validation, range, pattern and outlier detection."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate and clean a CSV file.
    Validate(ValidateArgs),

    /// Run the bundled sample dataset through the sample configuration.
    Sample(SampleArgs),

    /// List the checks in pipeline order with their configuration keys.
    Checks,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// CSV file with a header row.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// JSON validation configuration.
    #[arg(long = "config", short = 'c', value_name = "JSON")]
    pub config: PathBuf,

    /// Where to write the cleaned table as CSV.
    #[arg(long = "output", short = 'o', value_name = "CSV")]
    pub output: Option<PathBuf>,

    /// Where to write the quality report as JSON.
    #[arg(long = "report", value_name = "JSON")]
    pub report: Option<PathBuf>,

    /// Validate and summarize without writing any file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Print the report as JSON on stdout instead of summary tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct SampleArgs {
    /// Where to write the sample quality report.
    #[arg(long = "report", value_name = "JSON", default_value = DEFAULT_SAMPLE_REPORT)]
    pub report: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
