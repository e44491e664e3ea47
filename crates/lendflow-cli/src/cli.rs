//! CLI argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

/// Settings file used when `--config-path` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "config/settings.toml";

#[derive(Parser)]
#[command(
    name = "lendflow",
    version,
    about = "Library checkout pipeline - ingest, clean, aggregate and predict",
    long_about = "Batch pipeline for library checkout data.\n\n\
                  Raw extracts are ingested into a bronze tier, cleaned into silver\n\
                  tables, joined into a gold feature dataset and scored with a stored\n\
                  logistic model."
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
    /// Normalize raw extracts into the bronze tier.
    Ingest(ConfigArgs),

    /// Clean bronze tables into the silver tier.
    Process(ProcessArgs),

    /// Join silver tables into the gold dataset.
    CreateDataset(ConfigArgs),

    /// Predict whether a customer returns a book on time.
    Predict(PredictArgs),
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Path to the TOML settings file.
    #[arg(
        short = 'p',
        long = "config-path",
        value_name = "PATH",
        default_value = DEFAULT_CONFIG_PATH
    )]
    pub config_path: PathBuf,
}

#[derive(Args)]
pub struct ProcessArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// First ingestion date to process (YYYY-MM-DD, inclusive).
    #[arg(short = 's', long = "start-date", value_name = "DATE", requires = "end_date")]
    pub start_date: Option<NaiveDate>,

    /// Ingestion date to stop at (YYYY-MM-DD, exclusive).
    #[arg(short = 'e', long = "end-date", value_name = "DATE", requires = "start_date")]
    pub end_date: Option<NaiveDate>,
}

#[derive(Args)]
pub struct PredictArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    #[arg(short = 'c', long = "customer-id", value_name = "ID")]
    pub customer_id: String,

    #[arg(short = 'b', long = "book-id", value_name = "ID")]
    pub book_id: String,
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
