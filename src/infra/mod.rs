//! File I/O, destination paths, corpus scanning

mod fs;
mod paths;

pub use fs::{
    FsError, RESOURCE_BUNDLE_SUFFIX, is_document, move_path, read_document, scan_documents,
    write_document,
};
pub use paths::{Allocation, allocate_paired, allocate_path, relative_link};
