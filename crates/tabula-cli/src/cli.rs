//! CLI argument definitions for the Tabula editor.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "tabula",
    version,
    about = "Tabula - edit and convert CSV, JSON and XML data files",
    long_about = "Edit and convert tabular and hierarchical data files.\n\n\
                  Reads delimited text, JSON and XML; writes any of those plus\n\
                  SQL export scripts, query templates and sheet-style grids."
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

    /// Field delimiter for delimited-text input and output.
    #[arg(
        long = "delimiter",
        value_name = "DELIM",
        default_value = ",",
        global = true
    )]
    pub delimiter: String,

    /// Table name used by the SQL generators.
    #[arg(
        long = "table-name",
        value_name = "NAME",
        default_value = "my_table",
        global = true
    )]
    pub table_name: String,
}

#[derive(Subcommand)]
pub enum Command {
    /// Render a file as a table in the terminal.
    Preview(PreviewArgs),

    /// Convert a file to another format.
    Convert(ConvertArgs),

    /// Generate a SQL query template from a file's columns.
    Sql(SqlArgs),

    /// Generate the full SQL export script (CREATE TABLE + INSERTs).
    ExportSql(ExportSqlArgs),

    /// Filter rows by a column predicate.
    Filter(FilterArgs),

    /// Sort rows by a column.
    Sort(SortArgs),

    /// Find/replace over one column across all rows.
    Replace(ReplaceArgs),

    /// Repair an XML file: escape stray ampersands, straighten typographic
    /// quotes, pretty-print.
    FixXml(FixXmlArgs),

    /// Apply one edit to a JSON document addressed by a slash path.
    EditJson(EditJsonArgs),

    /// Apply one edit to an XML element addressed by a slash path.
    EditXml(EditXmlArgs),
}

#[derive(Parser)]
pub struct PreviewArgs {
    /// Input file (.csv, .json or .xml).
    pub input: PathBuf,

    /// Show at most this many rows.
    #[arg(long = "limit", value_name = "N")]
    pub limit: Option<usize>,
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Input file (.csv, .json or .xml).
    pub input: PathBuf,

    /// Target format.
    #[arg(long = "to", value_enum)]
    pub to: TargetFormat,

    /// Output file (stdout when omitted).
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Delimiter for delimited-text output (defaults to --delimiter).
    #[arg(long = "output-delimiter", value_name = "DELIM")]
    pub output_delimiter: Option<String>,
}

#[derive(Parser)]
pub struct SqlArgs {
    /// Input file (.csv or .json).
    pub input: PathBuf,

    /// Query template to generate.
    #[arg(long = "kind", value_enum, default_value = "select")]
    pub kind: QueryKindArg,

    /// Row index for UPDATE/DELETE templates (0-based).
    #[arg(long = "row", value_name = "N")]
    pub row: Option<usize>,
}

#[derive(Parser)]
pub struct ExportSqlArgs {
    /// Input file (.csv or .json).
    pub input: PathBuf,

    /// Output file (stdout when omitted).
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct FilterArgs {
    /// Input file (.csv or .json).
    pub input: PathBuf,

    /// Column name to test.
    #[arg(long = "column", value_name = "NAME")]
    pub column: String,

    /// Predicate operator.
    #[arg(long = "op", value_enum)]
    pub op: FilterOpArg,

    /// Comparison value (unused by the empty/not-empty operators).
    #[arg(long = "value", value_name = "TEXT", default_value = "")]
    pub value: String,

    /// Write the filtered rows back instead of only printing them.
    #[arg(long = "apply")]
    pub apply: bool,

    /// Output file for --apply (defaults to the input file).
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct SortArgs {
    /// Input file (.csv or .json).
    pub input: PathBuf,

    /// Column name to sort by.
    #[arg(long = "column", value_name = "NAME")]
    pub column: String,

    /// Sort descending instead of ascending.
    #[arg(long = "desc")]
    pub desc: bool,

    /// Output file (defaults to the input file).
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ReplaceArgs {
    /// Input file (.csv or .json).
    pub input: PathBuf,

    /// Column name to update.
    #[arg(long = "column", value_name = "NAME")]
    pub column: String,

    /// Search text, or a regular expression with --regex.
    #[arg(long = "search", value_name = "TEXT")]
    pub search: String,

    /// Replacement text; capture-group references allowed with --regex.
    #[arg(long = "replace", value_name = "TEXT")]
    pub replacement: String,

    /// Treat the search text as a regular expression.
    #[arg(long = "regex")]
    pub regex: bool,

    /// Match case-insensitively.
    #[arg(long = "ignore-case")]
    pub ignore_case: bool,

    /// Output file (defaults to the input file).
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct FixXmlArgs {
    /// Input XML file.
    pub input: PathBuf,

    /// Output file (defaults to the input file).
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct EditJsonArgs {
    /// Input JSON file.
    pub input: PathBuf,

    /// Slash path to the target node, e.g. `items/0/qty`; empty selects the
    /// root.
    #[arg(long = "path", value_name = "PATH", default_value = "")]
    pub path: String,

    #[command(subcommand)]
    pub action: JsonEditAction,

    /// Output file (defaults to the input file).
    #[arg(short = 'o', long = "output", value_name = "PATH", global = true)]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum JsonEditAction {
    /// Replace a scalar value; re-typing follows the old value's type.
    Set {
        /// New value text.
        value: String,
    },
    /// Remove the node.
    Remove,
    /// Add a key/value entry (object target) or append a value (array target).
    Add {
        /// Entry key; required for object targets.
        #[arg(long = "key", value_name = "KEY")]
        key: Option<String>,
        /// Value as JSON text, e.g. `"text"`, `3.5`, `null`.
        value: String,
    },
    /// Add an empty object.
    AddObject {
        #[arg(long = "key", value_name = "KEY")]
        key: Option<String>,
    },
    /// Add an empty array.
    AddArray {
        #[arg(long = "key", value_name = "KEY")]
        key: Option<String>,
    },
}

#[derive(Parser)]
pub struct EditXmlArgs {
    /// Input XML file.
    pub input: PathBuf,

    /// Slash path to the target element starting at the root, e.g.
    /// `library/book/title`.
    #[arg(long = "path", value_name = "PATH")]
    pub path: String,

    /// Set an attribute, `name=value`.
    #[arg(long = "set-attr", value_name = "NAME=VALUE")]
    pub set_attr: Option<String>,

    /// Set the element's text content.
    #[arg(long = "set-text", value_name = "TEXT")]
    pub set_text: Option<String>,

    /// Output file (defaults to the input file).
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum TargetFormat {
    Csv,
    Json,
    Xml,
    Sql,
    Sheet,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum QueryKindArg {
    Select,
    Insert,
    Update,
    Delete,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FilterOpArg {
    Contains,
    Equals,
    StartsWith,
    EndsWith,
    IsEmpty,
    IsNotEmpty,
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
