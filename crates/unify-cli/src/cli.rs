//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use unify_model::SpellingLocale;

use unify_cli::config::OutputFormat;

#[derive(Parser)]
#[command(
    name = "unify",
    version,
    about = "Reconcile country/year datasets against a canonical country directory",
    long_about = "Reconcile country/year datasets against a canonical country directory.\n\n\
                  Collates several CSV files into one long table, rewrites country\n\
                  codes, aliases and historical forms to canonical names, and drops\n\
                  rows whose country cannot be identified."
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

    /// Include cell values in log output (redacted by default).
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Configuration file (default: ./unify.toml when present).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Reference data directory (overrides the config file and UNIFY_REFERENCE_DIR).
    #[arg(long = "reference-dir", value_name = "DIR", global = true)]
    pub reference_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Collate CSV datasets and unify their country column.
    Validate(ValidateArgs),

    /// Break column headers into tokens, units and context.
    Tokenize(TokenizeArgs),

    /// Inspect the reference data.
    #[command(subcommand)]
    Reference(ReferenceCommand),
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// CSV files or folders of CSV files, in dataset order.
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Write the resolved table to this file.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Format of the resolved table.
    #[arg(long = "format", value_enum)]
    pub format: Option<OutputFormatArg>,

    /// Write a JSON validation report to this file.
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Spelling used for the header breakdown in the report.
    #[arg(long = "spelling", value_enum)]
    pub spelling: Option<SpellingArg>,

    /// Exit with an error when more rows than this are dropped.
    #[arg(long = "max-dropped", value_name = "N")]
    pub max_dropped: Option<usize>,

    /// Minimum similarity for "did you mean" suggestions (0-1).
    #[arg(long = "min-similarity", value_name = "SCORE")]
    pub min_similarity: Option<f64>,

    /// Input field delimiter.
    #[arg(long = "delimiter", value_name = "CHAR")]
    pub delimiter: Option<char>,

    /// Print the first N rows of the resolved table.
    #[arg(long = "preview", value_name = "N")]
    pub preview: Option<usize>,
}

#[derive(Parser)]
pub struct TokenizeArgs {
    /// Headers to tokenize.
    #[arg(value_name = "HEADER", required_unless_present = "from")]
    pub headers: Vec<String>,

    /// Tokenize the headers of a CSV file instead.
    #[arg(long = "from", value_name = "CSV", conflicts_with = "headers")]
    pub from: Option<PathBuf>,

    /// Target spelling.
    #[arg(long = "spelling", value_enum)]
    pub spelling: Option<SpellingArg>,

    /// Print JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum ReferenceCommand {
    /// Verify the reference manifest and print counts and conflicts.
    Doctor {
        /// Print the report as JSON.
        #[arg(long = "json")]
        json: bool,
    },

    /// List the country directory in resolution order.
    List {
        /// Only records with a historical qualifier.
        #[arg(long = "historical")]
        historical: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SpellingArg {
    Gb,
    Us,
}

impl From<SpellingArg> for SpellingLocale {
    fn from(value: SpellingArg) -> Self {
        match value {
            SpellingArg::Gb => Self::Gb,
            SpellingArg::Us => Self::Us,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Csv,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(value: OutputFormatArg) -> Self {
        match value {
            OutputFormatArg::Csv => Self::Csv,
            OutputFormatArg::Json => Self::Json,
        }
    }
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
