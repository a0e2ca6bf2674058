//! CLI argument definitions for lead-insight.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;

use crate::logging::LogFormat;

/// Rows printed per result unless `--max-rows` says otherwise.
pub const DEFAULT_MAX_ROWS: usize = 50;

#[derive(Parser)]
#[command(
    name = "lead-insight",
    version,
    about = "Ask plain-English questions about a CSV or Excel lead file",
    long_about = "Load a lead file, clean its columns, and answer questions about it.\n\n\
                  Questions are translated to SQL by a chat-completion service and run\n\
                  locally against the cleaned table, registered as `leads`."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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

    /// Allow lead values and questions to appear in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Translator settings file (default: ./lead-insight.toml or $LEAD_INSIGHT_CONFIG).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show dataset metrics, column kinds and a preview.
    Overview(FileArgs),

    /// Print the schema description sent with every question.
    Schema(SchemaArgs),

    /// Ask one question about the leads.
    Ask(AskArgs),

    /// Run SQL directly against the `leads` table.
    Sql(SqlArgs),

    /// Interactive session: one question per line.
    Shell(FileArgs),
}

#[derive(Args)]
pub struct FileArgs {
    /// Lead file (.csv, .xls, .xlsx).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Args)]
pub struct SchemaArgs {
    #[command(flatten)]
    pub input: FileArgs,

    /// Print the full system prompt instead of the schema alone.
    #[arg(long = "prompt")]
    pub prompt: bool,
}

#[derive(Args)]
pub struct ResultArgs {
    /// Write the results to CSV (default name when no path is given).
    #[arg(long = "export", value_name = "PATH", num_args = 0..=1)]
    pub export: Option<Option<PathBuf>>,

    /// Maximum rows to print (all rows are exported).
    #[arg(long = "max-rows", value_name = "N", default_value_t = DEFAULT_MAX_ROWS)]
    pub max_rows: usize,
}

#[derive(Args)]
pub struct AskArgs {
    #[command(flatten)]
    pub input: FileArgs,

    /// Question in plain English.
    #[arg(value_name = "QUESTION")]
    pub question: String,

    /// Print the generated SQL.
    #[arg(long = "show-sql")]
    pub show_sql: bool,

    #[command(flatten)]
    pub results: ResultArgs,
}

#[derive(Args)]
pub struct SqlArgs {
    #[command(flatten)]
    pub input: FileArgs,

    /// SQL statement against the `leads` table.
    #[arg(value_name = "SQL")]
    pub sql: String,

    #[command(flatten)]
    pub results: ResultArgs,
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

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => Self::ERROR,
            LogLevelArg::Warn => Self::WARN,
            LogLevelArg::Info => Self::INFO,
            LogLevelArg::Debug => Self::DEBUG,
            LogLevelArg::Trace => Self::TRACE,
        }
    }
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}
