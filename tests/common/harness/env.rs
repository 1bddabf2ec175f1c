//! Isolated test environment with temp directory.

// Allow dead code since this is a test utility shared by several test crates
#![allow(dead_code)]

use super::{ExporteerCommand, TestDocument};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with an export tree and a private home.
///
/// Both live in one temp directory that is cleaned up on drop.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    /// Root of the exported tree
    export_dir: PathBuf,
    /// Home directory for config lookups
    home_dir: PathBuf,
}

impl TestEnv {
    /// Creates a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let export_dir = temp_dir.path().join("export");
        let home_dir = temp_dir.path().join("home");
        std::fs::create_dir(&export_dir).expect("Failed to create export directory");
        std::fs::create_dir(&home_dir).expect("Failed to create home directory");
        Self {
            _temp_dir: temp_dir,
            export_dir,
            home_dir,
        }
    }

    /// Returns the root of the exported tree.
    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    /// Writes a document at `rel_path` under the export tree.
    pub fn add_document(&self, rel_path: &str, document: &TestDocument) -> PathBuf {
        self.write_file(rel_path, &document.to_html())
    }

    /// Writes a file under the export tree and returns its path.
    pub fn write_file(&self, rel_path: &str, content: &str) -> PathBuf {
        let path = self.export_dir.join(rel_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Reads a file under the export tree.
    pub fn read_file(&self, rel_path: &str) -> String {
        std::fs::read_to_string(self.export_dir.join(rel_path)).expect("Failed to read file")
    }

    /// Writes the config file wherever the platform looks for it.
    pub fn write_config(&self, content: &str) {
        for config_dir in [
            self.home_dir.join(".config"),
            self.home_dir.join("Library").join("Application Support"),
        ] {
            let dir = config_dir.join("exporteer");
            std::fs::create_dir_all(&dir).expect("Failed to create config directory");
            std::fs::write(dir.join("config.toml"), content).expect("Failed to write config");
        }
    }

    /// Creates an ExporteerCommand isolated from the user's config.
    pub fn cmd(&self) -> ExporteerCommand {
        ExporteerCommand::new().home(&self.home_dir)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
