//! Tabula CLI.

use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

use tabula_cli::logging::{LogConfig, LogFormat, init_logging};
use tabula_model::{Delimiter, Session};

mod cli;
mod commands;
mod render;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{
    run_convert, run_edit_json, run_edit_xml, run_export_sql, run_filter, run_fix_xml,
    run_preview, run_replace, run_sort, run_sql,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let session = Session::new()
        .with_delimiter(Delimiter::parse(&cli.delimiter))
        .with_table_name(cli.table_name.clone());
    let result = match &cli.command {
        Command::Preview(args) => run_preview(args, &session),
        Command::Convert(args) => run_convert(args, &session),
        Command::Sql(args) => run_sql(args, &session),
        Command::ExportSql(args) => run_export_sql(args, &session),
        Command::Filter(args) => run_filter(args, &session),
        Command::Sort(args) => run_sort(args, &session),
        Command::Replace(args) => run_replace(args, &session),
        Command::FixXml(args) => run_fix_xml(args),
        Command::EditJson(args) => run_edit_json(args),
        Command::EditXml(args) => run_edit_xml(args),
    };
    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => {
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
