//! Parsing of the list values the note application prints back to us.
//!
//! `osascript -ss` renders an AppleScript list of strings as
//! `{"first", "second"}`. Items are pulled out with a non-greedy quoted-string
//! match, so values containing a quotation mark are split incorrectly. The
//! per-note metadata list packs two fields into each item, joined by
//! [`METADATA_SEPARATOR`]; a notebook name containing that character is
//! likewise unsupported.

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use super::note_link::{NoteLink, ParseNoteLinkError};

/// Joins the notebook name and the note link inside one metadata item.
pub const METADATA_SEPARATOR: char = '~';

/// Provenance of one exported note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteMetadata {
    notebook: String,
    link: NoteLink,
}

impl NoteMetadata {
    pub fn new(notebook: impl Into<String>, link: NoteLink) -> Self {
        Self {
            notebook: notebook.into(),
            link,
        }
    }

    /// Display name of the notebook that owns the note.
    pub fn notebook(&self) -> &str {
        &self.notebook
    }

    /// Stable reference to the note.
    pub fn link(&self) -> &NoteLink {
        &self.link
    }
}

/// Errors while decoding a metadata list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseMetadataError {
    #[error("metadata item {position} has no '~' separator: {item}")]
    MissingSeparator { position: usize, item: String },

    #[error("metadata item {position}: {source}")]
    InvalidLink {
        position: usize,
        #[source]
        source: ParseNoteLinkError,
    },
}

/// Extracts every quoted string from an AppleScript list literal, in order.
///
/// # Examples
///
/// ```
/// use exporteer::domain::parse_quoted_items;
///
/// assert_eq!(parse_quoted_items(r#"{"Inbox", "Work"}"#), vec!["Inbox", "Work"]);
/// assert!(parse_quoted_items("{}").is_empty());
/// ```
pub fn parse_quoted_items(blob: &str) -> Vec<String> {
    let item_re = Regex::new(r#""(.+?)""#).expect("quoted item pattern is valid");
    item_re
        .captures_iter(blob)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Decodes the per-note metadata list returned by an enhanced batch export.
///
/// Items come back in the order the notes were exported, so position `n`
/// (1-based) describes scratch slot `n`. An empty list means the query
/// matched nothing and is not an error.
pub fn parse_metadata_list(blob: &str) -> Result<Vec<NoteMetadata>, ParseMetadataError> {
    parse_quoted_items(blob)
        .into_iter()
        .enumerate()
        .map(|(i, item)| parse_metadata_item(i + 1, &item))
        .collect()
}

fn parse_metadata_item(position: usize, item: &str) -> Result<NoteMetadata, ParseMetadataError> {
    let (notebook, link) =
        item.split_once(METADATA_SEPARATOR)
            .ok_or_else(|| ParseMetadataError::MissingSeparator {
                position,
                item: item.to_string(),
            })?;

    let link = link
        .parse::<NoteLink>()
        .map_err(|source| ParseMetadataError::InvalidLink { position, source })?;

    Ok(NoteMetadata::new(notebook, link))
}
