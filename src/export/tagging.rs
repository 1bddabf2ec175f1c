//! Provenance tags embedded in the header of each exported document.
//!
//! Tag format, which later relink runs depend on byte for byte:
//!
//! ```text
//! <head><meta name="evernote-notebook" content="Inbox"/><meta name="evernote-url" content="evernote:///view/..."/>
//! ```

use regex::Regex;
use tracing::{debug, info, warn};

use super::{ExportError, PromotedDocument};
use crate::domain::{NoteLink, NoteMetadata};
use crate::infra::{read_document, write_document};

/// Marker opening a document's header region.
pub const HEAD_OPEN: &str = "<head>";

/// Marker closing a document's header region.
pub const HEAD_CLOSE: &str = "</head>";

/// `name` of the tag carrying the notebook's display name.
pub const NOTEBOOK_TAG: &str = "evernote-notebook";

/// `name` of the tag carrying the note's stable link.
pub const LINK_TAG: &str = "evernote-url";

/// Renders both provenance tags, notebook first.
pub fn provenance_tags(metadata: &NoteMetadata) -> String {
    format!(
        r#"<meta name="{NOTEBOOK_TAG}" content="{}"/><meta name="{LINK_TAG}" content="{}"/>"#,
        escape_attribute(metadata.notebook()),
        escape_attribute(metadata.link().as_str()),
    )
}

/// Inserts the provenance tags right after the first [`HEAD_OPEN`].
///
/// Returns `None` if the document has no header to insert into.
pub fn insert_tags(content: &str, metadata: &NoteMetadata) -> Option<String> {
    let at = content.find(HEAD_OPEN)? + HEAD_OPEN.len();
    let tags = provenance_tags(metadata);

    let mut tagged = String::with_capacity(content.len() + tags.len());
    tagged.push_str(&content[..at]);
    tagged.push_str(&tags);
    tagged.push_str(&content[at..]);
    Some(tagged)
}

/// Tags every promoted document in place.
///
/// # Errors
///
/// Returns `ExportError::MissingHeader` for a document without `<head>`.
pub fn tag_documents(documents: &[PromotedDocument]) -> Result<(), ExportError> {
    for document in documents {
        let content = read_document(&document.path)?;
        let tagged = insert_tags(&content, &document.metadata).ok_or_else(|| {
            ExportError::MissingHeader {
                path: document.path.clone(),
            }
        })?;
        write_document(&document.path, &tagged)?;
        debug!(path = %document.path.display(), notebook = document.metadata.notebook(), "tagged document");
    }
    info!(count = documents.len(), "tagged documents");
    Ok(())
}

/// Splits a document into its header region and its content region.
///
/// The header runs up to and including the first [`HEAD_CLOSE`]. A document
/// without one is all content.
pub fn split_header(content: &str) -> (&str, &str) {
    match content.find(HEAD_CLOSE) {
        Some(i) => content.split_at(i + HEAD_CLOSE.len()),
        None => ("", content),
    }
}

/// Reads the note link tag from a document's header region, if present.
pub fn read_link_tag(header: &str) -> Option<NoteLink> {
    let tag_re = Regex::new(&format!(r#"<meta name="{LINK_TAG}" content="([^"]*)"/>"#))
        .expect("link tag pattern is valid");
    let raw = unescape_attribute(tag_re.captures(header)?.get(1)?.as_str());

    match raw.parse() {
        Ok(link) => Some(link),
        Err(err) => {
            warn!(%err, "ignoring malformed link tag");
            None
        }
    }
}

fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn unescape_attribute(value: &str) -> String {
    value
        .replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
