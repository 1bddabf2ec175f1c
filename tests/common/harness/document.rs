//! Builder for exported documents with provenance tags.

// Allow dead code since this is a test utility shared by several test crates
#![allow(dead_code)]

use exporteer::domain::NoteMetadata;
use exporteer::export::insert_tags;

/// An HTML document as an enhanced export leaves it.
#[derive(Debug)]
pub struct TestDocument {
    notebook: String,
    link: String,
    title: String,
    body: String,
    tagged: bool,
}

impl TestDocument {
    /// Creates a tagged document for the note with the given link.
    pub fn new(link: impl Into<String>, title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            notebook: "Inbox".to_string(),
            link: link.into(),
            body: format!("<p>{title}</p>"),
            title,
            tagged: true,
        }
    }

    /// Sets the notebook name written into the tags.
    pub fn notebook(mut self, notebook: impl Into<String>) -> Self {
        self.notebook = notebook.into();
        self
    }

    /// Sets the body content.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Leaves the document without provenance tags, like a plain export.
    pub fn untagged(mut self) -> Self {
        self.tagged = false;
        self
    }

    /// Renders the document.
    pub fn to_html(&self) -> String {
        let html = format!(
            "<!DOCTYPE html><html><head><meta charset=\"utf-8\"/><title>{}</title></head><body>{}</body></html>",
            self.title, self.body
        );
        if !self.tagged {
            return html;
        }

        let link = self.link.parse().expect("Invalid note link");
        let metadata = NoteMetadata::new(self.notebook.clone(), link);
        insert_tags(&html, &metadata).expect("document has a head")
    }
}
