//! Command handlers for the CLI.
//!
//! Each handler returns the process exit status on success. Handlers that
//! talk to the note application are generic over [`ExportBackend`] so tests
//! can drive them with a fake.
//!
//! [`ExportBackend`]: crate::backend::ExportBackend

mod export;
mod notebooks;
mod relink;
mod sync;


use std::path::Path;

pub use export::{export_request, handle_export};
pub use notebooks::handle_notebooks;
#[cfg(test)]
pub(crate) use notebooks::render_notebooks;
pub use relink::handle_relink;
pub use sync::handle_sync;

/// Print one path per line.
pub(crate) fn print_paths<P: AsRef<Path>>(paths: impl IntoIterator<Item = P>) {
    for path in paths {
        println!("{}", path.as_ref().display());
    }
}
