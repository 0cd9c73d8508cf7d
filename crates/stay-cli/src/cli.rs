//! Command line arguments for `guest-import`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use stay_cli::overrides::parse_override;
use stay_core::{MAX_IMPORT_ROWS, PREVIEW_ROWS};
use stay_model::Field;
use stay_transform::DEFAULT_NATIONALITY;

#[derive(Parser)]
#[command(
    name = "guest-import",
    version,
    about = "Import hotel guest registers from Excel workbooks",
    long_about = "Read guest registers kept as Excel workbooks (.xlsx, .xls), map their\n\
                  free-form headers onto canonical fields, and normalize each row into a\n\
                  person and stay record. Rows that cannot be imported are reported with\n\
                  their sheet and row number."
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

    /// Log output format.
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

    /// Allow guest names and documents in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the worksheets of a workbook.
    Sheets(SheetsArgs),

    /// Show how headers map and a sample of raw rows, without importing.
    Preview(PreviewArgs),

    /// Normalize every row and report valid records, errors and duplicates.
    Import(ImportArgs),

    /// List canonical fields and the header aliases that map to them.
    Fields(FieldsArgs),
}

#[derive(Args)]
pub struct SheetsArgs {
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Only list sheets named by a number (one sheet per day), in numeric order.
    #[arg(long = "numeric-only")]
    pub numeric_only: bool,
}

/// Options shared by `preview` and `import`.
#[derive(Args)]
pub struct MappingArgs {
    /// Workbook to read (.xlsx or .xls).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Only read this sheet (repeatable). Default: every sheet.
    #[arg(long = "sheet", value_name = "NAME")]
    pub sheets: Vec<String>,

    /// JSON alias dictionary replacing the built-in one.
    #[arg(long = "aliases", value_name = "FILE")]
    pub aliases: Option<PathBuf>,

    /// Bind a header to a field explicitly (repeatable), e.g. --map "Huésped=full_name".
    #[arg(long = "map", value_name = "HEADER=FIELD", value_parser = parse_override)]
    pub overrides: Vec<(String, Field)>,

    /// Raw rows kept for the preview sample.
    #[arg(long = "preview-rows", value_name = "N", default_value_t = PREVIEW_ROWS)]
    pub preview_rows: usize,
}

#[derive(Args)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub mapping: MappingArgs,
}

#[derive(Args)]
pub struct ImportArgs {
    #[command(flatten)]
    pub mapping: MappingArgs,

    /// Rows beyond this count are dropped with a warning.
    #[arg(long = "max-rows", value_name = "N", default_value_t = MAX_IMPORT_ROWS)]
    pub max_rows: usize,

    /// Nationality recorded when a row has none.
    #[arg(long = "default-nationality", value_name = "NAME", default_value = DEFAULT_NATIONALITY)]
    pub default_nationality: String,

    /// Write the full import result as JSON.
    #[arg(long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct FieldsArgs {
    /// JSON alias dictionary replacing the built-in one.
    #[arg(long = "aliases", value_name = "FILE")]
    pub aliases: Option<PathBuf>,
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
