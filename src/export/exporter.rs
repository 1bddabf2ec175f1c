//! Orchestration of whole exports against an [`ExportBackend`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Serialize;
use tracing::{info, warn};

use super::promote::{PromotedDocument, SCRATCH_DIR_NAME, promote};
use super::tagging::tag_documents;
use super::ExportError;
use crate::backend::ExportBackend;
use crate::domain::{ExportFormat, parse_metadata_list};
use crate::infra::FsError;

/// Default time allowed for a single backend export call.
pub const DEFAULT_EXPORT_TIMEOUT: Duration = Duration::from_secs(60 * 60);

/// What to export and where.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    /// Target directory (HTML, by-notebook) or file (single ENEX export).
    pub destination: PathBuf,
    pub format: ExportFormat,
    /// Search query in the application's syntax; empty matches all notes.
    pub query: String,
    /// Tag documents with provenance metadata for later relinking.
    pub enhanced: bool,
    /// Export each notebook to its own file or directory.
    pub by_notebook: bool,
    /// Limit for each backend export call.
    pub timeout: Duration,
}

impl ExportRequest {
    pub fn new(destination: impl Into<PathBuf>) -> Self {
        Self {
            destination: destination.into(),
            format: ExportFormat::Html,
            query: String::new(),
            enhanced: false,
            by_notebook: false,
            timeout: DEFAULT_EXPORT_TIMEOUT,
        }
    }

    /// Rejects requests that cannot succeed, before any backend call.
    pub fn validate(&self) -> Result<(), ExportError> {
        if self.enhanced && !self.format.is_document_format() {
            return Err(ExportError::UnsupportedFormat {
                format: self.format,
            });
        }
        // Two notebook filters in one query widen the results instead of
        // narrowing them.
        if self.by_notebook && self.query.contains("notebook") {
            return Err(ExportError::NotebookInQuery {
                query: self.query.clone(),
            });
        }
        Ok(())
    }
}

/// Files produced by a successful export.
#[derive(Debug, Default, Serialize)]
pub struct ExportSummary {
    /// Paths the backend wrote to: the destination, or one per notebook.
    pub targets: Vec<PathBuf>,
    /// Tagged documents, for enhanced exports.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub documents: Vec<PromotedDocument>,
}

/// Result of an export that did not fail.
#[derive(Debug)]
pub enum ExportOutcome {
    Exported(ExportSummary),
    /// The query matched no notes; nothing was written.
    NoMatch,
}

impl ExportOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Exported(_))
    }
}

/// Drives a backend through plain, enhanced, and by-notebook exports.
pub struct Exporter<'a, B: ExportBackend + ?Sized> {
    backend: &'a B,
}

impl<'a, B: ExportBackend + ?Sized> Exporter<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Runs an export request.
    ///
    /// # Errors
    ///
    /// Validation errors are returned before the backend is contacted.
    /// Backend failures, including timeouts, are returned unchanged and
    /// never retried.
    pub fn run(&self, request: &ExportRequest) -> Result<ExportOutcome, ExportError> {
        request.validate()?;

        if request.by_notebook {
            return self.export_by_notebook(request);
        }

        let mut summary = ExportSummary::default();
        if !self.export_into(&request.destination, &request.query, request, &mut summary)? {
            info!(query = %request.query, "no notes matched");
            return Ok(ExportOutcome::NoMatch);
        }
        Ok(ExportOutcome::Exported(summary))
    }

    fn export_by_notebook(&self, request: &ExportRequest) -> Result<ExportOutcome, ExportError> {
        let notebooks = self.backend.list_notebooks()?;
        fs::create_dir_all(&request.destination)
            .map_err(|e| FsError::from_io(&request.destination, e))?;

        let mut summary = ExportSummary::default();
        for name in &notebooks {
            let target = notebook_target(&request.destination, name, request.format);
            let query = notebook_query(name, &request.query);
            if !self.export_into(&target, &query, request, &mut summary)? {
                info!(notebook = %name, "no matching notes in notebook");
            }
        }

        if summary.targets.is_empty() {
            return Ok(ExportOutcome::NoMatch);
        }
        Ok(ExportOutcome::Exported(summary))
    }

    /// Exports one query to one target. Returns false if nothing matched.
    fn export_into(
        &self,
        target: &Path,
        query: &str,
        request: &ExportRequest,
        summary: &mut ExportSummary,
    ) -> Result<bool, ExportError> {
        if request.enhanced {
            let Some(documents) = self.export_enhanced(target, query, request.timeout)? else {
                return Ok(false);
            };
            summary.documents.extend(documents);
        } else {
            if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| FsError::from_io(parent, e))?;
            }
            if !self
                .backend
                .export_notes(query, target, request.format, request.timeout)?
            {
                return Ok(false);
            }
        }

        info!(target = %target.display(), "exported notes");
        summary.targets.push(target.to_path_buf());
        Ok(true)
    }

    /// Batch export into a scratch area, then promote and tag.
    fn export_enhanced(
        &self,
        destination: &Path,
        query: &str,
        timeout: Duration,
    ) -> Result<Option<Vec<PromotedDocument>>, ExportError> {
        fs::create_dir_all(destination).map_err(|e| FsError::from_io(destination, e))?;

        let scratch = destination.join(SCRATCH_DIR_NAME);
        if let Err(err) = fs::create_dir(&scratch) {
            if err.kind() == io::ErrorKind::AlreadyExists {
                return Err(ExportError::ScratchExists { path: scratch });
            }
            return Err(FsError::from_io(&scratch, err).into());
        }

        let blob = self.backend.export_batch(query, &scratch, timeout)?;
        let metadata = parse_metadata_list(&blob)?;

        if metadata.is_empty() {
            if let Err(err) = fs::remove_dir_all(&scratch) {
                warn!(path = %scratch.display(), %err, "failed to remove empty scratch directory");
            }
            return Ok(None);
        }

        let documents = promote(&scratch, destination, &metadata)?;
        tag_documents(&documents)?;
        Ok(Some(documents))
    }
}

/// Query restricting `query` to a single notebook.
pub fn notebook_query(notebook: &str, query: &str) -> String {
    format!("notebook:\"{notebook}\" {query}").trim_end().to_string()
}

/// Where a notebook's export goes inside the destination directory.
///
/// Path separators in the name are replaced so every notebook stays a direct
/// child of `destination`.
pub fn notebook_target(destination: &Path, notebook: &str, format: ExportFormat) -> PathBuf {
    let name = notebook.replace(['/', '\\'], "-");
    match format {
        ExportFormat::Html => destination.join(name),
        ExportFormat::Enex => destination.join(format!("{name}.enex")),
    }
}
