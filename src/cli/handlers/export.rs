//! Handler for the `export` command.

use anyhow::{Context, Result};

use super::print_paths;
use crate::backend::ExportBackend;
use crate::cli::ExportArgs;
use crate::cli::config::Config;
use crate::cli::exit::{EXIT_NO_MATCH, EXIT_SUCCESS};
use crate::cli::output::{Output, OutputFormat};
use crate::export::{ExportOutcome, ExportRequest, ExportSummary, Exporter};

/// Build the engine request from command-line arguments and config.
pub fn export_request(args: &ExportArgs, config: &Config) -> ExportRequest {
    ExportRequest {
        destination: args.path.clone(),
        format: args.export_format(),
        query: args.query.clone(),
        enhanced: args.enhanced,
        by_notebook: args.by_notebook,
        timeout: config.export_timeout(args.timeout),
    }
}

/// Handle the `export` command.
pub fn handle_export<B: ExportBackend + ?Sized>(
    args: &ExportArgs,
    format: OutputFormat,
    config: &Config,
    backend: &B,
) -> Result<u8> {
    let request = export_request(args, config);

    let outcome = Exporter::new(backend)
        .run(&request)
        .with_context(|| format!("failed to export to {}", request.destination.display()))?;

    let summary = match outcome {
        ExportOutcome::Exported(summary) => summary,
        ExportOutcome::NoMatch => {
            eprintln!("no notes matched query");
            return Ok(EXIT_NO_MATCH);
        }
    };

    print_summary(&summary, format)?;
    Ok(EXIT_SUCCESS)
}

fn print_summary(summary: &ExportSummary, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => {
            if summary.documents.is_empty() {
                for target in &summary.targets {
                    println!("Exported {}", target.display());
                }
            } else {
                println!(
                    "Exported {} tagged document(s) to {}",
                    summary.documents.len(),
                    summary
                        .targets
                        .iter()
                        .map(|t| t.display().to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                );
            }
        }
        OutputFormat::Json => println!("{}", Output::new(summary).to_json()?),
        OutputFormat::Paths => {
            if summary.documents.is_empty() {
                print_paths(summary.targets.iter());
            } else {
                print_paths(summary.documents.iter().map(|d| &d.path));
            }
        }
    }
    Ok(())
}
