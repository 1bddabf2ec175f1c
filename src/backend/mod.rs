//! Interface to the note application that performs the actual exports.
//!
//! Everything that talks to the host application lives behind
//! [`ExportBackend`], so the export engine can be driven by the real
//! `osascript` bridge or by an in-memory fake in tests.

mod osascript;
mod sync;

#[cfg(test)]
pub(crate) mod fake;

use std::path::Path;
use std::time::Duration;

use thiserror::Error;

use crate::domain::ExportFormat;

pub use osascript::Osascript;
pub use sync::{SyncOptions, await_sync};

/// Failures reported by an export backend.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("the note application did not respond within {seconds} seconds")]
    Timeout { seconds: u64 },

    #[error("waited {seconds} seconds but sync did not finish")]
    SyncTimeout { seconds: u64 },

    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("script failed with {status}: {stderr}")]
    Script { status: String, stderr: String },

    #[error("failed to render script: {0}")]
    Template(#[from] minijinja::Error),
}

impl BackendError {
    /// Whether this failure is one of the timeout conditions.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::SyncTimeout { .. })
    }
}

/// Operations the export engine needs from the note application.
///
/// Every call blocks until the application answers. Calls that take a
/// `timeout` fail with [`BackendError::Timeout`] when it elapses.
pub trait ExportBackend {
    /// Names of all notebooks, in the application's order.
    fn list_notebooks(&self) -> Result<Vec<String>, BackendError>;

    /// Exports every note matching `query` to `dest` in one call.
    ///
    /// For HTML, `dest` is a directory; for ENEX it is a file. Returns
    /// `false` when the query matched no notes.
    fn export_notes(
        &self,
        query: &str,
        dest: &Path,
        format: ExportFormat,
        timeout: Duration,
    ) -> Result<bool, BackendError>;

    /// Exports every note matching `query` as HTML, one note per
    /// numbered subdirectory (`1`, `2`, ...) of `scratch_dir`.
    ///
    /// Returns the serialized metadata list, one `notebook~link` item per
    /// note in the same order as the subdirectories.
    fn export_batch(
        &self,
        query: &str,
        scratch_dir: &Path,
        timeout: Duration,
    ) -> Result<String, BackendError>;

    /// Asks the application to start synchronizing.
    fn start_sync(&self) -> Result<(), BackendError>;

    /// Whether a synchronization is currently running.
    fn is_synchronizing(&self) -> Result<bool, BackendError>;
}

/// Escapes a string for use inside an AppleScript string literal.
///
/// # Examples
///
/// ```
/// use exporteer::backend::escape_applescript;
///
/// assert_eq!(escape_applescript(r#"tag:"to do""#), r#"tag:\"to do\""#);
/// assert_eq!(escape_applescript(r"C:\x"), r"C:\\x");
/// ```
pub fn escape_applescript(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
