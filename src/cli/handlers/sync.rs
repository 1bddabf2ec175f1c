//! Handler for the `sync` command.

use anyhow::{Context, Result};
use tracing::info;

use crate::backend::{ExportBackend, await_sync};
use crate::cli::SyncArgs;
use crate::cli::config::Config;
use crate::cli::exit::EXIT_SUCCESS;

/// Handle the `sync` command.
pub fn handle_sync<B: ExportBackend + ?Sized>(
    args: &SyncArgs,
    config: &Config,
    backend: &B,
) -> Result<u8> {
    backend.start_sync().context("failed to start sync")?;
    if args.immediate {
        info!("sync started");
        return Ok(EXIT_SUCCESS);
    }

    let options = config.sync_options(args.timeout, args.delay);
    await_sync(backend, &options)?;
    info!("sync finished");
    Ok(EXIT_SUCCESS)
}
