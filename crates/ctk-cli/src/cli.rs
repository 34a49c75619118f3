//! CLI argument definitions for `ctk`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "ctk",
    version,
    about = "Common tasks kit - copy properties between records",
    long_about = "Copy same-named, type-compatible properties between JSON records.\n\n\
                  Also converts CSV files into JSON records and lists the properties\n\
                  inferred for a JSON object."
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
    /// Copy properties from a source JSON object (or array of objects) onto a target.
    Transfer(TransferArgs),

    /// Convert a CSV file into a JSON array of records.
    Rows(RowsArgs),

    /// List the properties inferred for a JSON object.
    Inspect(InspectArgs),
}

#[derive(Parser)]
pub struct TransferArgs {
    /// JSON object, or array of objects, supplying the property values.
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// JSON object (or array matching SOURCE) receiving the values
    /// (default: a blank copy of each source object).
    #[arg(long = "target", value_name = "TARGET")]
    pub target: Option<PathBuf>,

    /// Comma-separated property names to leave untouched (case-insensitive).
    #[arg(long = "skip", value_name = "LIST")]
    pub skip: Option<String>,

    /// Write the resulting object to a file instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct RowsArgs {
    /// CSV file with a header row.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Write the records to a file instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// JSON object to describe.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Print the descriptors as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
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
