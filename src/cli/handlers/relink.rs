//! Handler for the `relink` command.

use anyhow::{Context, Result, bail};

use super::print_paths;
use crate::cli::RelinkArgs;
use crate::cli::exit::EXIT_SUCCESS;
use crate::cli::output::{Output, OutputFormat};
use crate::export::relink;

/// Handle the `relink` command.
pub fn handle_relink(args: &RelinkArgs, format: OutputFormat) -> Result<u8> {
    if !args.path.is_dir() {
        bail!("not a directory: {}", args.path.display());
    }

    let summary = relink(&args.path)
        .with_context(|| format!("failed to relink {}", args.path.display()))?;

    match format {
        OutputFormat::Human => {
            println!(
                "Rewrote {} link(s) in {} of {} document(s) ({} indexed)",
                summary.replacements,
                summary.rewritten.len(),
                summary.scanned,
                summary.indexed
            );
        }
        OutputFormat::Json => println!("{}", Output::new(&summary).to_json()?),
        OutputFormat::Paths => print_paths(summary.rewritten.iter()),
    }
    Ok(EXIT_SUCCESS)
}
