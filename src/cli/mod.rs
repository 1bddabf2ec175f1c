//! CLI command definitions and handlers

pub mod config;
pub mod exit;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::domain::ExportFormat;
use output::OutputFormat;

/// exporteer - export Evernote notes and relink them into a browsable tree
#[derive(Parser, Debug)]
#[command(name = "exporteer", version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Output format
    #[arg(short = 'f', long, global = true, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Export notes matching a query
    Export(ExportArgs),

    /// Rewrite note links in an exported tree into relative file links
    Relink(RelinkArgs),

    /// List notebook names
    Notebooks,

    /// Synchronize the application and wait for it to finish
    Sync(SyncArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `export` command
#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Destination: a directory for HTML, a file for ENEX
    pub path: PathBuf,

    /// Search query in the application's syntax (default: all notes)
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Export as a single ENEX archive
    #[arg(short = 'E', long, conflicts_with = "html")]
    pub enex: bool,

    /// Export as HTML documents (default)
    #[arg(short = 'H', long)]
    pub html: bool,

    /// Tag documents with notebook and link so `relink` can connect them
    #[arg(short, long, conflicts_with = "by_notebook")]
    pub enhanced: bool,

    /// Export each notebook into its own directory or file
    #[arg(short = 'n', long)]
    pub by_notebook: bool,

    /// Seconds to wait for the application (per notebook with --by-notebook)
    #[arg(short, long)]
    pub timeout: Option<u64>,
}

impl ExportArgs {
    pub fn export_format(&self) -> ExportFormat {
        if self.enex {
            ExportFormat::Enex
        } else {
            ExportFormat::Html
        }
    }
}

/// Arguments for the `relink` command
#[derive(Parser, Debug)]
pub struct RelinkArgs {
    /// Root of an exported tree
    pub path: PathBuf,
}

/// Arguments for the `sync` command
#[derive(Parser, Debug)]
pub struct SyncArgs {
    /// Start synchronizing and return without waiting
    #[arg(short, long)]
    pub immediate: bool,

    /// Seconds between progress checks
    #[arg(short, long)]
    pub delay: Option<u64>,

    /// Seconds to wait before giving up
    #[arg(short, long)]
    pub timeout: Option<u64>,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
