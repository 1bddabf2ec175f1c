//! Core types: NoteLink, NoteMetadata, ExportFormat

mod format;
mod metadata;
mod note_link;

pub use format::ExportFormat;
pub use metadata::{
    METADATA_SEPARATOR, NoteMetadata, ParseMetadataError, parse_metadata_list, parse_quoted_items,
};
pub use note_link::{NOTE_LINK_PREFIX, NoteLink, ParseNoteLinkError};
