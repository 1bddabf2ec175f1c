//! In-memory stand-in for the note application, used by unit tests.

use std::cell::{Cell, RefCell};
use std::fs;
use std::path::Path;
use std::time::Duration;

use super::{BackendError, ExportBackend};
use crate::domain::ExportFormat;

/// A note the fake application "contains".
#[derive(Debug, Clone)]
pub(crate) struct FakeNote {
    pub notebook: String,
    pub link: String,
    pub title: String,
    pub body: String,
    pub attachment: bool,
}

impl FakeNote {
    pub fn new(notebook: &str, link: &str, title: &str) -> Self {
        Self {
            notebook: notebook.to_string(),
            link: link.to_string(),
            title: title.to_string(),
            body: format!("<p>{title}</p>"),
            attachment: false,
        }
    }

    pub fn body(mut self, body: &str) -> Self {
        self.body = body.to_string();
        self
    }

    pub fn with_attachment(mut self) -> Self {
        self.attachment = true;
        self
    }

    pub fn html(&self) -> String {
        format!(
            "<!DOCTYPE html><html><head><meta charset=\"utf-8\"/><title>{}</title></head><body>{}</body></html>",
            self.title, self.body
        )
    }
}

/// Scripted backend that writes files the way the real application does.
#[derive(Debug, Default)]
pub(crate) struct FakeBackend {
    notes: Vec<FakeNote>,
    timing_out: bool,
    blob_override: Option<String>,
    syncing_polls: u32,
    polls: Cell<u32>,
    sync_started: Cell<bool>,
    queries: RefCell<Vec<String>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn note(mut self, note: FakeNote) -> Self {
        self.notes.push(note);
        self
    }

    pub fn timing_out(mut self) -> Self {
        self.timing_out = true;
        self
    }

    /// Returns this metadata blob from `export_batch` instead of the real one.
    pub fn blob(mut self, blob: &str) -> Self {
        self.blob_override = Some(blob.to_string());
        self
    }

    /// Reports "synchronizing" for this many polls.
    pub fn syncing_for(mut self, polls: u32) -> Self {
        self.syncing_polls = polls;
        self
    }

    pub fn sync_polls(&self) -> u32 {
        self.polls.get()
    }

    pub fn sync_started(&self) -> bool {
        self.sync_started.get()
    }

    /// Every query the backend was asked to export, in call order.
    pub fn queries(&self) -> Vec<String> {
        self.queries.borrow().clone()
    }

    fn matching(&self, query: &str) -> Vec<&FakeNote> {
        self.queries.borrow_mut().push(query.to_string());
        self.notes
            .iter()
            .filter(|n| match notebook_filter(query) {
                Some(notebook) => n.notebook == notebook,
                None => true,
            })
            .collect()
    }

    fn check_timeout(&self, timeout: Duration) -> Result<(), BackendError> {
        if self.timing_out {
            return Err(BackendError::Timeout {
                seconds: timeout.as_secs(),
            });
        }
        Ok(())
    }
}

fn notebook_filter(query: &str) -> Option<&str> {
    let rest = query.strip_prefix("notebook:\"")?;
    rest.split_once('"').map(|(name, _)| name)
}

fn io_error(path: &Path, err: std::io::Error) -> BackendError {
    BackendError::Script {
        status: "fake".to_string(),
        stderr: format!("{}: {err}", path.display()),
    }
}

impl ExportBackend for FakeBackend {
    fn list_notebooks(&self) -> Result<Vec<String>, BackendError> {
        let mut names: Vec<String> = Vec::new();
        for note in &self.notes {
            if !names.contains(&note.notebook) {
                names.push(note.notebook.clone());
            }
        }
        Ok(names)
    }

    fn export_notes(
        &self,
        query: &str,
        dest: &Path,
        format: ExportFormat,
        timeout: Duration,
    ) -> Result<bool, BackendError> {
        self.check_timeout(timeout)?;
        let matches = self.matching(query);
        if matches.is_empty() {
            return Ok(false);
        }

        match format {
            ExportFormat::Html => {
                fs::create_dir_all(dest).map_err(|e| io_error(dest, e))?;
                for note in matches {
                    let path = dest.join(format!("{}.html", note.title));
                    fs::write(&path, note.html()).map_err(|e| io_error(&path, e))?;
                }
            }
            ExportFormat::Enex => {
                let titles: Vec<&str> = matches.iter().map(|n| n.title.as_str()).collect();
                let enex = format!("<en-export>{}</en-export>", titles.join(","));
                fs::write(dest, enex).map_err(|e| io_error(dest, e))?;
            }
        }
        Ok(true)
    }

    fn export_batch(
        &self,
        query: &str,
        scratch_dir: &Path,
        timeout: Duration,
    ) -> Result<String, BackendError> {
        self.check_timeout(timeout)?;
        let matches = self.matching(query);

        let mut items = Vec::new();
        for (i, note) in matches.iter().enumerate() {
            let slot = scratch_dir.join((i + 1).to_string());
            fs::create_dir_all(&slot).map_err(|e| io_error(&slot, e))?;

            let path = slot.join(format!("{}.html", note.title));
            fs::write(&path, note.html()).map_err(|e| io_error(&path, e))?;

            if note.attachment {
                let bundle = slot.join(format!("{}.resources", note.title));
                fs::create_dir_all(&bundle).map_err(|e| io_error(&bundle, e))?;
                fs::write(bundle.join("image.png"), "png").map_err(|e| io_error(&bundle, e))?;
            }

            items.push(format!("\"{}~{}\"", note.notebook, note.link));
        }

        Ok(self
            .blob_override
            .clone()
            .unwrap_or_else(|| format!("{{{}}}", items.join(", "))))
    }

    fn start_sync(&self) -> Result<(), BackendError> {
        self.sync_started.set(true);
        Ok(())
    }

    fn is_synchronizing(&self) -> Result<bool, BackendError> {
        let polls = self.polls.get();
        self.polls.set(polls + 1);
        Ok(polls < self.syncing_polls)
    }
}
