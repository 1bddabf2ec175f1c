//! Rewriting of note links into relative file links.
//!
//! The index is rebuilt from the provenance tags on every run, so relinking
//! works on any tree this tool produced and can be repeated safely: header
//! regions are never modified, and a link already rewritten to a file path no
//! longer matches any note link.

use std::cell::Cell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use regex::{Captures, Regex, RegexBuilder};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::ExportError;
use super::tagging::{read_link_tag, split_header};
use crate::domain::NoteLink;
use crate::infra::{FsError, read_document, relative_link, scan_documents, write_document};

// Large corpora produce long alternations.
const PATTERN_SIZE_LIMIT: usize = 64 * 1024 * 1024;

/// Map from note link to the tagged document carrying it.
#[derive(Debug, Default, Clone)]
pub struct LinkIndex {
    targets: HashMap<NoteLink, PathBuf>,
}

impl LinkIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the index from the link tags of every document under `root`.
    ///
    /// Documents without a link tag are skipped. If two documents carry the
    /// same link, the one scanned last wins; scan order is sorted by path.
    pub fn build(root: &Path) -> Result<Self, FsError> {
        let mut index = Self::new();
        for relative in scan_documents(root)? {
            let content = read_document(&root.join(&relative))?;
            let (header, _) = split_header(&content);

            match read_link_tag(header) {
                Some(link) => {
                    if let Some(previous) = index.insert(link.clone(), relative.clone()) {
                        warn!(
                            %link,
                            previous = %previous.display(),
                            current = %relative.display(),
                            "duplicate note link, keeping the later document"
                        );
                    }
                }
                None => debug!(path = %relative.display(), "no link tag, skipping"),
            }
        }
        Ok(index)
    }

    /// Records `link` as living at `path`. Returns the path it replaced.
    pub fn insert(&mut self, link: NoteLink, path: PathBuf) -> Option<PathBuf> {
        self.targets.insert(link, path)
    }

    /// Looks up the document path for a link.
    pub fn get(&self, link: &str) -> Option<&Path> {
        self.targets.get(link).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Result of rewriting one content region.
#[derive(Debug)]
pub struct Rewrite {
    pub content: String,
    pub replacements: usize,
}

/// Replaces indexed note links in content regions with relative paths.
pub struct LinkRewriter<'a> {
    index: &'a LinkIndex,
    pattern: Option<Regex>,
}

impl<'a> LinkRewriter<'a> {
    /// Compiles a single matcher over all indexed links.
    ///
    /// Longer links are tried first, so a link that is a prefix of another
    /// never claims the longer one's text.
    pub fn new(index: &'a LinkIndex) -> Result<Self, regex::Error> {
        if index.is_empty() {
            return Ok(Self {
                index,
                pattern: None,
            });
        }

        let mut links: Vec<&str> = index.targets.keys().map(NoteLink::as_str).collect();
        links.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        let alternation = links
            .iter()
            .map(|link| regex::escape(link))
            .collect::<Vec<_>>()
            .join("|");

        let pattern = RegexBuilder::new(&alternation)
            .size_limit(PATTERN_SIZE_LIMIT)
            .build()?;

        Ok(Self {
            index,
            pattern: Some(pattern),
        })
    }

    /// Rewrites every indexed link in `content`.
    ///
    /// `document` is the path, relative to the corpus root, of the document
    /// the content belongs to; replacement paths are relative to its
    /// directory.
    pub fn rewrite(&self, content: &str, document: &Path) -> Rewrite {
        let Some(pattern) = &self.pattern else {
            return Rewrite {
                content: content.to_string(),
                replacements: 0,
            };
        };

        let replacements = Cell::new(0usize);
        let rewritten = pattern.replace_all(content, |caps: &Captures| {
            let link = &caps[0];
            match self.index.get(link) {
                Some(target) => {
                    replacements.set(replacements.get() + 1);
                    relative_link(document, target)
                }
                None => link.to_string(),
            }
        });

        Rewrite {
            content: rewritten.into_owned(),
            replacements: replacements.get(),
        }
    }
}

/// Outcome of a relink pass.
#[derive(Debug, Default, Serialize)]
pub struct RelinkSummary {
    /// Documents carrying a link tag.
    pub indexed: usize,
    /// Documents examined.
    pub scanned: usize,
    /// Documents that had at least one link rewritten.
    pub rewritten: Vec<PathBuf>,
    /// Total number of links rewritten.
    pub replacements: usize,
}

/// Rewrites note links across every document under `root`.
///
/// Only content regions are touched; a document is written back only when
/// at least one link changed.
pub fn relink(root: &Path) -> Result<RelinkSummary, ExportError> {
    let index = LinkIndex::build(root)?;
    let rewriter = LinkRewriter::new(&index)?;
    info!(indexed = index.len(), root = %root.display(), "built link index");

    let mut summary = RelinkSummary {
        indexed: index.len(),
        ..RelinkSummary::default()
    };

    for relative in scan_documents(root)? {
        let path = root.join(&relative);
        let content = read_document(&path)?;
        let (header, body) = split_header(&content);

        summary.scanned += 1;
        let rewrite = rewriter.rewrite(body, &relative);
        if rewrite.replacements == 0 {
            continue;
        }

        write_document(&path, &format!("{header}{}", rewrite.content))?;
        debug!(path = %relative.display(), replacements = rewrite.replacements, "rewrote links");
        summary.replacements += rewrite.replacements;
        summary.rewritten.push(relative);
    }

    info!(
        documents = summary.rewritten.len(),
        replacements = summary.replacements,
        "relink finished"
    );
    Ok(summary)
}
