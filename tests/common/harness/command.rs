//! Fluent wrapper around assert_cmd::Command.

// Allow dead code since this is a test utility shared by several test crates
#![allow(dead_code)]

use assert_cmd::Command;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Fluent wrapper around `assert_cmd::Command` for the `exporteer` binary.
///
/// Provides a builder-style API for constructing and executing CLI commands.
pub struct ExporteerCommand {
    args: Vec<String>,
    home: Option<PathBuf>,
}

impl ExporteerCommand {
    /// Creates a new command for the `exporteer` binary.
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            home: None,
        }
    }

    /// Points `HOME` and `XDG_CONFIG_HOME` at an isolated directory so the
    /// user's config file is never read.
    pub fn home(mut self, path: &Path) -> Self {
        self.home = Some(path.to_path_buf());
        self
    }

    /// Adds arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Returns the current arguments (for testing).
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Runs the command and returns an Assert for making assertions.
    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("exporteer").expect("Failed to find exporteer binary");
        if let Some(home) = &self.home {
            cmd.env("HOME", home)
                .env("XDG_CONFIG_HOME", home.join(".config"));
        }
        cmd.args(&self.args);
        cmd.assert()
    }

    /// Runs the command, expects success, and returns stdout as a string.
    pub fn output_success(self) -> String {
        let output = self.assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("Output was not valid UTF-8")
    }

    /// Runs the command, expects success, and parses stdout as JSON.
    pub fn output_json<T: DeserializeOwned>(self) -> T {
        let output = self.output_success();
        serde_json::from_str(&output).expect("Failed to parse output as JSON")
    }

    // ===========================================
    // Command Shortcuts
    // ===========================================

    /// Configures for the `relink` command on a directory.
    pub fn relink(self, path: &Path) -> Self {
        let path = path.to_string_lossy().to_string();
        self.args(["relink".to_string(), path])
    }

    /// Configures for the `export` command to a destination.
    pub fn export(self, path: &Path) -> Self {
        let path = path.to_string_lossy().to_string();
        self.args(["export".to_string(), path])
    }

    /// Configures for the `notebooks` command.
    pub fn notebooks(self) -> Self {
        self.args(["notebooks"])
    }

    // ===========================================
    // Format Options
    // ===========================================

    /// Adds `--format json` to the command.
    pub fn format_json(self) -> Self {
        self.args(["--format", "json"])
    }

    /// Adds `--format paths` to the command.
    pub fn format_paths(self) -> Self {
        self.args(["--format", "paths"])
    }
}

impl Default for ExporteerCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_runs_binary() {
        ExporteerCommand::new().args(["--help"]).assert().success();
    }

    #[test]
    fn test_command_shortcuts() {
        let cmd = ExporteerCommand::new()
            .relink(Path::new("out"))
            .format_json();
        let args = cmd.get_args();
        assert_eq!(args, ["relink", "out", "--format", "json"]);
    }
}
