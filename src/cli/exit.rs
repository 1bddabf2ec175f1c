//! Process exit codes.

use crate::backend::BackendError;
use crate::export::ExportError;

/// Normal completion.
pub const EXIT_SUCCESS: u8 = 0;

/// Usage errors, missing subcommand, and failures without a dedicated code.
pub const EXIT_FAILURE: u8 = 1;

/// The application or a sync did not finish in time.
pub const EXIT_TIMEOUT: u8 = 2;

/// The query matched no notes.
pub const EXIT_NO_MATCH: u8 = 3;

/// Exit status for an error that reached `main`.
pub fn exit_status(err: &anyhow::Error) -> u8 {
    let timed_out = err.chain().any(|cause| {
        cause
            .downcast_ref::<BackendError>()
            .is_some_and(BackendError::is_timeout)
            || cause
                .downcast_ref::<ExportError>()
                .is_some_and(ExportError::is_timeout)
    });

    if timed_out { EXIT_TIMEOUT } else { EXIT_FAILURE }
}
