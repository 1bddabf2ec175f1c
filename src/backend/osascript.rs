//! Backend that drives the Evernote app through `osascript`.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use minijinja::{Environment, context};
use tracing::{debug, trace};

use super::{BackendError, ExportBackend, escape_applescript};
use crate::domain::{ExportFormat, parse_quoted_items};

const START_SYNC_SCRIPT: &str = r#"
tell application "Evernote"
    synchronize
end tell
"#;

const CHECK_SYNC_SCRIPT: &str = r#"
tell application "Evernote"
    isSynchronizing
end tell
"#;

const LIST_NOTEBOOKS_SCRIPT: &str = r#"
tell application "Evernote"
    name of notebooks
end tell
"#;

const EXPORT_TEMPLATE: &str = r#"
tell application "Evernote"
    with timeout of {{ timeout }} seconds
        set matches to (find notes "{{ query | applescript }}")
        if (count of matches) > 0 then
            export matches to (POSIX file "{{ dest | applescript }}") format {{ format }}
            true
        else
            false
        end if
    end timeout
end tell
"#;

const EXPORT_BATCH_TEMPLATE: &str = r#"
tell application "Evernote"
    with timeout of {{ timeout }} seconds
        set matches to (find notes "{{ query | applescript }}")
        set results to {}
        set slot to 1
        repeat with n in matches
            export {n} to (POSIX file ("{{ scratch | applescript }}/" & slot)) format HTML
            set end of results to ((name of notebook of n) & "~" & (note link of n))
            set slot to slot + 1
        end repeat
        results
    end timeout
end tell
"#;

/// AppleEvent error number for "timed out".
const APPLE_EVENT_TIMEOUT: &str = "(-1712)";

/// Runs AppleScript snippets against the Evernote app via `osascript`.
#[derive(Debug, Clone)]
pub struct Osascript {
    program: PathBuf,
}

impl Osascript {
    /// Creates a backend that invokes the given `osascript` executable.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn environment() -> Result<Environment<'static>, BackendError> {
        let mut env = Environment::new();
        env.add_filter("applescript", |value: String| escape_applescript(&value));
        env.add_template("export", EXPORT_TEMPLATE)?;
        env.add_template("export_batch", EXPORT_BATCH_TEMPLATE)?;
        Ok(env)
    }

    fn render(name: &str, ctx: minijinja::Value) -> Result<String, BackendError> {
        let env = Self::environment()?;
        let script = env.get_template(name)?.render(ctx)?;
        Ok(script)
    }

    /// Runs a script and returns its trimmed stdout.
    ///
    /// `-ss` makes osascript print results in source form, so strings come
    /// back quoted and lists come back as `{...}` literals.
    fn run(&self, script: &str, timeout: Option<Duration>) -> Result<String, BackendError> {
        trace!(script, "running osascript");
        let output = Command::new(&self.program)
            .args(["-e", script, "-ss"])
            .output()
            .map_err(|source| BackendError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            if let Some(timeout) = timeout
                && stderr.contains(APPLE_EVENT_TIMEOUT)
            {
                return Err(BackendError::Timeout {
                    seconds: timeout.as_secs(),
                });
            }
            return Err(BackendError::Script {
                status: output.status.to_string(),
                stderr,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        debug!(result = %stdout, "osascript finished");
        Ok(stdout)
    }
}

impl Default for Osascript {
    fn default() -> Self {
        Self::new("osascript")
    }
}

impl ExportBackend for Osascript {
    fn list_notebooks(&self) -> Result<Vec<String>, BackendError> {
        let out = self.run(LIST_NOTEBOOKS_SCRIPT, None)?;
        Ok(parse_quoted_items(&out))
    }

    fn export_notes(
        &self,
        query: &str,
        dest: &Path,
        format: ExportFormat,
        timeout: Duration,
    ) -> Result<bool, BackendError> {
        let script = Self::render(
            "export",
            context! {
                query => query,
                dest => dest.display().to_string(),
                format => format.script_keyword(),
                timeout => timeout.as_secs(),
            },
        )?;
        Ok(self.run(&script, Some(timeout))? == "true")
    }

    fn export_batch(
        &self,
        query: &str,
        scratch_dir: &Path,
        timeout: Duration,
    ) -> Result<String, BackendError> {
        let script = Self::render(
            "export_batch",
            context! {
                query => query,
                scratch => scratch_dir.display().to_string(),
                timeout => timeout.as_secs(),
            },
        )?;
        self.run(&script, Some(timeout))
    }

    fn start_sync(&self) -> Result<(), BackendError> {
        self.run(START_SYNC_SCRIPT, None).map(|_| ())
    }

    fn is_synchronizing(&self) -> Result<bool, BackendError> {
        Ok(self.run(CHECK_SYNC_SCRIPT, None)? == "true")
    }
}
