//! Stable note references (`evernote:///...` URIs).

use serde::{Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

/// Scheme prefix every stable note reference starts with.
pub const NOTE_LINK_PREFIX: &str = "evernote:///";

/// A stable, application-scheme reference to a single note.
///
/// The application embeds these URIs in note bodies whenever one note links
/// to another, and they survive re-exports unchanged, which makes them the
/// join key between a document's provenance tag and the links pointing at it.
///
/// # Examples
///
/// ```
/// use exporteer::domain::NoteLink;
///
/// let link: NoteLink = "evernote:///view/1/s1/abc/abc/".parse().unwrap();
/// assert_eq!(link.as_str(), "evernote:///view/1/s1/abc/abc/");
/// assert!("https://example.com".parse::<NoteLink>().is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoteLink(String);

impl NoteLink {
    /// Returns the reference as it appears in documents.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NoteLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for NoteLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NoteLink(\"{}\")", self.0)
    }
}

impl Borrow<str> for NoteLink {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Error returned when a string is not a stable note reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNoteLinkError {
    value: String,
    reason: &'static str,
}

impl ParseNoteLinkError {
    /// Returns the rejected value.
    pub fn invalid_value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ParseNoteLinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid note link '{}': {}", self.value, self.reason)
    }
}

impl std::error::Error for ParseNoteLinkError {}

impl FromStr for NoteLink {
    type Err = ParseNoteLinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = |reason| ParseNoteLinkError {
            value: s.to_string(),
            reason,
        };

        let Some(rest) = s.strip_prefix(NOTE_LINK_PREFIX) else {
            return Err(error("must start with evernote:///"));
        };
        if rest.is_empty() {
            return Err(error("nothing after the scheme prefix"));
        }
        if s.chars().any(|c| c.is_whitespace() || c == '"') {
            return Err(error("contains whitespace or quotation marks"));
        }

        Ok(Self(s.to_string()))
    }
}

impl Serialize for NoteLink {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}
