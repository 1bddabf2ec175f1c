//! Promotion of index-addressed scratch slots into named, collision-free files.
//!
//! A batch export cannot name its output files per note, so the backend
//! writes note `n` into `<scratch>/<n>/`. Promotion drains those slots into
//! the destination directory, pairing each one with the metadata item at the
//! same position.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use super::ExportError;
use crate::domain::NoteMetadata;
use crate::infra::{FsError, RESOURCE_BUNDLE_SUFFIX, allocate_paired, is_document, move_path};

/// Name of the scratch directory created inside the export destination.
///
/// Hidden, so corpus scans never pick up half-promoted documents.
pub const SCRATCH_DIR_NAME: &str = ".exporteer-scratch";

/// One raw document waiting in the scratch area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScratchSlot {
    /// 1-based position of the note in the batch.
    pub index: usize,
    pub document: PathBuf,
    pub bundle: Option<PathBuf>,
}

/// A document moved to its final location and bound to its metadata.
#[derive(Debug, Clone, Serialize)]
pub struct PromotedDocument {
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle: Option<PathBuf>,
    pub metadata: NoteMetadata,
}

/// Lists the slots of a scratch directory in sequence order.
///
/// # Errors
///
/// Returns `ExportError::InvalidSlot` for any entry that is not a directory
/// named by a positive integer in canonical form, `ExportError::MissingDocument`
/// for a slot without an HTML document, `ExportError::AmbiguousSlot` for a
/// slot with more than one, and `ExportError::UnexpectedSlotEntry` for
/// anything besides the document and its bundle.
pub fn read_slots(scratch: &Path) -> Result<Vec<ScratchSlot>, ExportError> {
    let entries = fs::read_dir(scratch).map_err(|e| FsError::from_io(scratch, e))?;

    let mut slots = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| FsError::from_io(scratch, e))?;
        let path = entry.path();

        // `01` and `1` would otherwise name the same slot.
        let index = entry
            .file_name()
            .to_str()
            .and_then(|name| name.parse::<usize>().ok().filter(|i| i.to_string() == name))
            .filter(|&index| index > 0 && path.is_dir())
            .ok_or_else(|| ExportError::InvalidSlot { path: path.clone() })?;

        slots.push(read_slot(index, &path)?);
    }

    slots.sort_by_key(|slot| slot.index);
    Ok(slots)
}

fn read_slot(index: usize, slot_dir: &Path) -> Result<ScratchSlot, ExportError> {
    let entries = fs::read_dir(slot_dir).map_err(|e| FsError::from_io(slot_dir, e))?;

    let mut documents = Vec::new();
    let mut others = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| FsError::from_io(slot_dir, e))?.path();
        if path.is_file() && is_document(&path) {
            documents.push(path);
        } else {
            others.push(path);
        }
    }

    if documents.len() > 1 {
        return Err(ExportError::AmbiguousSlot {
            path: slot_dir.to_path_buf(),
        });
    }
    let document = documents
        .pop()
        .ok_or_else(|| ExportError::MissingDocument {
            path: slot_dir.to_path_buf(),
        })?;

    let bundle = bundle_name(&document).map(|name| slot_dir.join(name));
    others.sort();
    if let Some(path) = others.into_iter().find(|p| Some(p) != bundle.as_ref()) {
        return Err(ExportError::UnexpectedSlotEntry { path });
    }

    Ok(ScratchSlot {
        index,
        document,
        bundle: bundle.filter(|path| path.exists()),
    })
}

/// `Note.html` keeps its attachments in `Note.resources`.
fn bundle_name(document: &Path) -> Option<OsString> {
    let mut name = document.file_stem()?.to_os_string();
    name.push(RESOURCE_BUNDLE_SUFFIX);
    Some(name)
}

/// Moves every scratch slot into `destination` and removes the scratch root.
///
/// Slot `n` is bound to `metadata[n - 1]`. Each document (and its bundle)
/// gets a collision-free name in `destination`.
///
/// # Errors
///
/// Every slot is checked before anything moves. Returns
/// `ExportError::InconsistentBatch` when the number of slots does not match
/// the number of metadata items, and `ExportError::MissingSlot` when the slot
/// indexes are not exactly `1..=metadata.len()`. The scratch directory is
/// left untouched in both cases.
pub fn promote(
    scratch: &Path,
    destination: &Path,
    metadata: &[NoteMetadata],
) -> Result<Vec<PromotedDocument>, ExportError> {
    let slots = read_slots(scratch)?;
    if slots.len() != metadata.len() {
        return Err(ExportError::InconsistentBatch {
            expected: metadata.len(),
            found: slots.len(),
        });
    }
    // Indexes are unique and sorted, so any gap shows up as a mismatch here.
    if let Some(index) = (1..=slots.len())
        .zip(&slots)
        .find_map(|(i, slot)| (slot.index != i).then_some(i))
    {
        return Err(ExportError::MissingSlot {
            index,
            path: scratch.join(index.to_string()),
        });
    }

    let mut promoted = Vec::with_capacity(slots.len());
    for (slot, note) in slots.iter().zip(metadata) {
        promoted.push(promote_slot(slot, destination, note)?);
    }

    fs::remove_dir(scratch).map_err(|e| FsError::from_io(scratch, e))?;
    info!(count = promoted.len(), destination = %destination.display(), "promoted documents");
    Ok(promoted)
}

fn promote_slot(
    slot: &ScratchSlot,
    destination: &Path,
    metadata: &NoteMetadata,
) -> Result<PromotedDocument, ExportError> {
    let file_name = slot
        .document
        .file_name()
        .ok_or_else(|| ExportError::MissingDocument {
            path: slot.document.clone(),
        })?;
    let bundle_name = slot.bundle.as_deref().and_then(Path::file_name);

    let allocation = allocate_paired(destination, file_name, bundle_name);

    move_path(&slot.document, &allocation.document)?;
    if let (Some(from), Some(to)) = (&slot.bundle, &allocation.bundle) {
        move_path(from, to)?;
    }

    let slot_dir = slot.document.parent().unwrap_or(Path::new(""));
    fs::remove_dir(slot_dir).map_err(|e| FsError::from_io(slot_dir, e))?;

    debug!(
        index = slot.index,
        path = %allocation.document.display(),
        link = %metadata.link(),
        "promoted document"
    );

    Ok(PromotedDocument {
        path: allocation.document,
        bundle: allocation.bundle,
        metadata: metadata.clone(),
    })
}
