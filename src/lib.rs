//! exporteer - export Evernote notes and relink them into a browsable tree

pub mod backend;
pub mod cli;
pub mod domain;
pub mod export;
pub mod infra;

use anyhow::Result;
use clap::{CommandFactory, Parser, error::ErrorKind};

use backend::Osascript;
use cli::{
    Cli, Command,
    config::Config,
    exit::{EXIT_FAILURE, EXIT_SUCCESS},
    handlers::{handle_export, handle_notebooks, handle_relink, handle_sync},
};

/// Main entry point for the CLI application.
///
/// Returns the process exit status.
pub fn run() -> Result<u8> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return Ok(report_parse_error(&err)?),
    };
    setup_logging(cli.verbose);

    let Some(command) = &cli.command else {
        Cli::command().print_help()?;
        return Ok(EXIT_FAILURE);
    };

    match command {
        Command::Export(args) => {
            let config = Config::load()?;
            handle_export(args, cli.format, &config, &backend(&config))
        }
        Command::Relink(args) => handle_relink(args, cli.format),
        Command::Notebooks => {
            let config = Config::load()?;
            handle_notebooks(cli.format, &backend(&config))
        }
        Command::Sync(args) => {
            let config = Config::load()?;
            handle_sync(args, &config, &backend(&config))
        }
        Command::Completions(args) => {
            clap_complete::generate(
                args.shell,
                &mut Cli::command(),
                "exporteer",
                &mut std::io::stdout(),
            );
            Ok(EXIT_SUCCESS)
        }
    }
}

fn backend(config: &Config) -> Osascript {
    Osascript::new(config.osascript())
}

/// Prints a command-line parse error and returns the exit status.
///
/// `--help` and `--version` succeed; every usage error exits with
/// [`EXIT_FAILURE`] so it never reads as a timeout.
fn report_parse_error(err: &clap::Error) -> std::io::Result<u8> {
    err.print()?;
    Ok(parse_error_status(err.kind()))
}

fn parse_error_status(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => EXIT_SUCCESS,
        _ => EXIT_FAILURE,
    }
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
