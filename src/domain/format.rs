//! Output formats the note application can export to.

use serde::Serialize;
use std::fmt;

/// File format produced by the export backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// One HTML document per note, written into a target directory.
    #[default]
    Html,
    /// A single ENEX archive file.
    Enex,
}

impl ExportFormat {
    /// The format keyword the application's scripting dictionary expects.
    pub fn script_keyword(self) -> &'static str {
        match self {
            Self::Html => "HTML",
            Self::Enex => "ENEX",
        }
    }

    /// Whether exports in this format produce one document file per note.
    pub fn is_document_format(self) -> bool {
        matches!(self, Self::Html)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.script_keyword())
    }
}
