//! lendflow CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use tracing::error;
use tracing::level_filters::LevelFilter;

use lendflow_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use lendflow_cli::commands::{run_create_dataset, run_ingest, run_predict, run_process};
use lendflow_cli::logging::{LogConfig, LogFormat, init_logging};
use lendflow_cli::summary::{print_jobs, print_prediction};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let outcome = match &cli.command {
        Command::Ingest(args) => run_ingest(args).map(|reports| print_jobs(&reports)),
        Command::Process(args) => run_process(args).map(|reports| print_jobs(&reports)),
        Command::CreateDataset(args) => {
            run_create_dataset(args).map(|reports| print_jobs(&reports))
        }
        Command::Predict(args) => run_predict(args).map(|prediction| print_prediction(&prediction)),
    };
    let exit_code = match outcome {
        Ok(()) => 0,
        Err(error) => {
            error!("{error:#}");
            eprintln!("error: {error:#}");
            1
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
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
