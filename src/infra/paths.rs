//! Destination path allocation and relative link computation.

use std::ffi::{OsStr, OsString};
use std::path::{Component, Path, PathBuf};

/// A collision-free destination for a document and its optional bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub document: PathBuf,
    pub bundle: Option<PathBuf>,
}

/// Returns a path in `target_dir` for `file_name` that does not exist yet.
///
/// The name is used unchanged when free; otherwise candidates `2-name`,
/// `3-name`, ... are tried in order. The result depends only on what already
/// exists in `target_dir`.
///
/// # Examples
///
/// ```
/// use exporteer::infra::allocate_path;
///
/// let dir = tempfile::TempDir::new().unwrap();
/// let first = allocate_path(dir.path(), "Note.html".as_ref());
/// assert_eq!(first, dir.path().join("Note.html"));
///
/// std::fs::write(&first, "").unwrap();
/// assert_eq!(allocate_path(dir.path(), "Note.html".as_ref()), dir.path().join("2-Note.html"));
/// ```
pub fn allocate_path(target_dir: &Path, file_name: &OsStr) -> PathBuf {
    allocate_paired(target_dir, file_name, None).document
}

/// Like [`allocate_path`], but keeps a companion bundle under the same prefix.
///
/// A candidate prefix is accepted only when both the document name and the
/// bundle name are free, so `2-Note.html` always travels with
/// `2-Note.resources`.
pub fn allocate_paired(
    target_dir: &Path,
    file_name: &OsStr,
    bundle_name: Option<&OsStr>,
) -> Allocation {
    let mut counter: u64 = 1;
    loop {
        let document = target_dir.join(prefixed(counter, file_name));
        let bundle = bundle_name.map(|name| target_dir.join(prefixed(counter, name)));

        if !occupied(&document) && bundle.as_deref().is_none_or(|b| !occupied(b)) {
            return Allocation { document, bundle };
        }
        counter += 1;
    }
}

fn prefixed(counter: u64, name: &OsStr) -> OsString {
    if counter == 1 {
        return name.to_os_string();
    }
    let mut candidate = OsString::from(format!("{counter}-"));
    candidate.push(name);
    candidate
}

// Dangling symlinks still occupy the name.
fn occupied(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}

/// Computes a `/`-separated link from one document to another.
///
/// Both paths are relative to the same corpus root. The result is relative
/// to the directory containing `from_document`, so it resolves correctly
/// when followed from inside that document.
///
/// # Examples
///
/// ```
/// use exporteer::infra::relative_link;
/// use std::path::Path;
///
/// assert_eq!(relative_link(Path::new("A.html"), Path::new("B.html")), "B.html");
/// assert_eq!(relative_link(Path::new("Work/A.html"), Path::new("Home/B.html")), "../Home/B.html");
/// ```
pub fn relative_link(from_document: &Path, target: &Path) -> String {
    let from_dir: Vec<_> = from_document
        .parent()
        .map(normal_components)
        .unwrap_or_default();
    let target_parts = normal_components(target);

    let shared = from_dir
        .iter()
        .zip(&target_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<String> = vec!["..".to_string(); from_dir.len() - shared];
    parts.extend(target_parts[shared..].iter().cloned());
    parts.join("/")
}

fn normal_components(path: &Path) -> Vec<String> {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}
