//! Errors raised by the export engine.

use std::path::PathBuf;

use thiserror::Error;

use crate::backend::BackendError;
use crate::domain::{ExportFormat, ParseMetadataError};
use crate::infra::FsError;

/// Errors during export, promotion, tagging, or relinking.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("enhanced export needs a document format, not {format}")]
    UnsupportedFormat { format: ExportFormat },

    #[error("query must not contain \"notebook\" when exporting by notebook: {query}")]
    NotebookInQuery { query: String },

    #[error("backend described {expected} notes but the scratch directory holds {found}")]
    InconsistentBatch { expected: usize, found: usize },

    #[error("scratch entry is not a numbered slot directory: {path}")]
    InvalidSlot { path: PathBuf },

    #[error("scratch directory has no slot {index} for a described note: {path}")]
    MissingSlot { index: usize, path: PathBuf },

    #[error("scratch slot holds more than one document: {path}")]
    AmbiguousSlot { path: PathBuf },

    #[error("unexpected entry in scratch slot: {path}")]
    UnexpectedSlotEntry { path: PathBuf },

    #[error("no exported document in scratch slot: {path}")]
    MissingDocument { path: PathBuf },

    #[error("document has no <head> to tag: {path}")]
    MissingHeader { path: PathBuf },

    #[error("scratch directory from an interrupted export must be inspected and removed: {path}")]
    ScratchExists { path: PathBuf },

    #[error("failed to build link pattern: {0}")]
    LinkPattern(#[from] regex::Error),

    #[error(transparent)]
    Metadata(#[from] ParseMetadataError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Fs(#[from] FsError),
}

impl ExportError {
    /// Whether the underlying cause is a backend timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Backend(err) if err.is_timeout())
    }
}
