//! lead-insight CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use lead_cli::cli::{Cli, Command, DEFAULT_MAX_ROWS};
use lead_cli::commands::{run_ask, run_overview, run_schema, run_shell, run_sql};
use lead_cli::logging::{LogConfig, LogFormat, init_logging};
use tracing::level_filters::LevelFilter;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let config_path = cli.config.as_deref();
    let result = match &cli.command {
        Command::Overview(args) => run_overview(args),
        Command::Schema(args) => run_schema(args),
        Command::Ask(args) => run_ask(args, config_path),
        Command::Sql(args) => run_sql(args),
        Command::Shell(args) => run_shell(args, config_path, DEFAULT_MAX_ROWS),
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

/// Flags win over `RUST_LOG`; `RUST_LOG` wins over the built-in default.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let explicit_level = cli.verbosity.is_present() || cli.log_level.is_some();
    let ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    LogConfig {
        level_filter: cli
            .log_level
            .map_or_else(|| cli.verbosity.tracing_level_filter(), LevelFilter::from),
        use_env_filter: !explicit_level,
        with_ansi: ansi,
        format: LogFormat::from(cli.log_format),
        log_file: cli.log_file.clone(),
        log_data: cli.log_data,
        ..LogConfig::default()
    }
}
