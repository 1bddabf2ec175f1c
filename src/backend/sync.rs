//! Waiting for the application to finish synchronizing.

use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

use super::{BackendError, ExportBackend};

/// Polling parameters for [`await_sync`].
#[derive(Debug, Clone, Copy)]
pub struct SyncOptions {
    /// Give up after this long.
    pub timeout: Duration,
    /// Pause between polls.
    pub delay: Duration,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30 * 60),
            delay: Duration::from_secs(10),
        }
    }
}

/// Blocks until the application reports it is no longer synchronizing.
///
/// # Errors
///
/// Returns `BackendError::SyncTimeout` if synchronization is still running
/// once `options.timeout` has elapsed.
pub fn await_sync<B: ExportBackend + ?Sized>(
    backend: &B,
    options: &SyncOptions,
) -> Result<(), BackendError> {
    let start = Instant::now();
    while backend.is_synchronizing()? {
        if start.elapsed() >= options.timeout {
            return Err(BackendError::SyncTimeout {
                seconds: options.timeout.as_secs(),
            });
        }
        debug!(elapsed = ?start.elapsed(), "still synchronizing");
        thread::sleep(options.delay);
    }
    Ok(())
}
