//! Data quality validator CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use dqv_cli::logging::{LogConfig, LogFormat, init_logging};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_checks, run_sample, run_validate};
use crate::summary::{print_report, print_run_error};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Validate(args) => match run_validate(&args) {
            Ok(outcome) => {
                if !args.json {
                    print_report(&outcome);
                }
                0
            }
            Err(error) => {
                print_run_error(&error);
                1
            }
        },
        Command::Sample(args) => match run_sample(&args) {
            Ok(outcome) => {
                print_report(&outcome);
                0
            }
            Err(error) => {
                print_run_error(&error);
                1
            }
        },
        Command::Checks => {
            run_checks();
            0
        }
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    // file logs outlive the terminal session
    config.with_timestamps = cli.log_file.is_some();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_enables_timestamps() {
        let cli = Cli::try_parse_from(["dqv", "--log-file", "logs/dqv.log", "checks"]).unwrap();
        let config = log_config_from_cli(&cli);
        assert!(config.with_timestamps);
        assert!(!config.with_ansi);

        let cli = Cli::try_parse_from(["dqv", "checks"]).unwrap();
        assert!(!log_config_from_cli(&cli).with_timestamps);
    }

    #[test]
    fn explicit_level_disables_env_filter() {
        let cli = Cli::try_parse_from(["dqv", "--log-level", "debug", "checks"]).unwrap();
        let config = log_config_from_cli(&cli);
        assert_eq!(config.level_filter, LevelFilter::DEBUG);
        assert!(!config.use_env_filter);
    }
}
