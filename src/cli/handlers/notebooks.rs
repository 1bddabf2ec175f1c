//! Handler for the `notebooks` command.

use anyhow::{Context, Result};

use crate::backend::ExportBackend;
use crate::cli::exit::EXIT_SUCCESS;
use crate::cli::output::{NotebookListing, Output, OutputFormat};

/// Handle the `notebooks` command.
pub fn handle_notebooks<B: ExportBackend + ?Sized>(format: OutputFormat, backend: &B) -> Result<u8> {
    let names = backend
        .list_notebooks()
        .context("failed to list notebooks")?;

    print!("{}", render_notebooks(names, format)?);
    Ok(EXIT_SUCCESS)
}

/// Renders notebook names in the requested format, newline-terminated.
pub(crate) fn render_notebooks(names: Vec<String>, format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Human if names.is_empty() => "No notebooks found.\n".to_string(),
        OutputFormat::Human | OutputFormat::Paths => {
            names.iter().map(|name| format!("{name}\n")).collect()
        }
        OutputFormat::Json => {
            let listings: Vec<NotebookListing> = names
                .into_iter()
                .map(|name| NotebookListing { name })
                .collect();
            format!("{}\n", Output::new(listings).to_json()?)
        }
    };
    Ok(rendered)
}
