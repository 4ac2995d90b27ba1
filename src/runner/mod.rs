//! Traced process runner.
//!
//! Launches the JavaScript runtime with the JIT trace flags against a user
//! script, producing the log file the ingestion engine consumes. The
//! runtime is an external collaborator: this module only controls how it is
//! spawned, never what it emits.

use crate::utils::config::TRACE_FLAGS;
use crate::utils::error::RunError;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Runner for tracing a script with a JIT-enabled runtime
pub struct TraceRunner {
    runtime: String,
    log_file: PathBuf,
}

impl TraceRunner {
    /// Create a new runner
    pub fn new(runtime: impl Into<String>, log_file: impl Into<PathBuf>) -> Self {
        Self {
            runtime: runtime.into(),
            log_file: log_file.into(),
        }
    }

    /// Run the script under trace flags and ensure the log file exists
    ///
    /// **Public** - main entry point
    ///
    /// # Errors
    /// * `RunError::ScriptNotFound` - script path does not exist
    /// * `RunError::SpawnFailed` - runtime binary could not be started
    /// * `RunError::RuntimeFailed` - runtime exited unsuccessfully
    pub fn run(&self, script: &Path) -> Result<(), RunError> {
        if !script.exists() {
            return Err(RunError::ScriptNotFound(script.to_path_buf()));
        }

        let redirect = format!("--redirect-code-traces-to={}", self.log_file.display());

        info!(
            "Generating JIT trace logs for \"{}\" with {}",
            script.display(),
            self.runtime
        );

        let output = Command::new(&self.runtime)
            .args(TRACE_FLAGS)
            .arg(&redirect)
            .arg(script)
            .output()?;

        if !output.status.success() {
            return Err(RunError::RuntimeFailed {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        debug!(
            "Runtime exited successfully ({} bytes on stdout)",
            output.stdout.len()
        );

        // The optimization and deoptimization markers go to stdout, not the
        // redirect file. When the runtime left the log file missing or
        // empty, the captured stdout is the trace.
        self.backfill_log(&output.stdout)?;

        info!("Trace log ready at: {}", self.log_file.display());

        Ok(())
    }

    /// Write captured stdout to the log file if the runtime did not
    ///
    /// **Private** - keeps whatever the redirect produced when non-empty
    fn backfill_log(&self, stdout: &[u8]) -> Result<(), RunError> {
        let existing_len = std::fs::metadata(&self.log_file).map(|m| m.len()).unwrap_or(0);

        if existing_len > 0 {
            return Ok(());
        }

        if stdout.is_empty() {
            warn!(
                "Runtime produced no trace output; {} will be empty",
                self.log_file.display()
            );
        }

        std::fs::write(&self.log_file, stdout)?;
        debug!(
            "Backfilled {} from captured stdout ({} bytes)",
            self.log_file.display(),
            stdout.len()
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_script_is_rejected() {
        let runner = TraceRunner::new("node", "turbo.json");
        let err = runner.run(Path::new("/definitely/not/here.js"));
        assert!(matches!(err, Err(RunError::ScriptNotFound(_))));
    }

    #[test]
    fn test_backfill_skips_existing_log() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("turbo.json");
        std::fs::write(&log, "[existing]").unwrap();

        let runner = TraceRunner::new("node", &log);
        runner.backfill_log(b"[captured]").unwrap();

        assert_eq!(std::fs::read_to_string(&log).unwrap(), "[existing]");
    }

    #[test]
    fn test_backfill_writes_captured_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("turbo.json");

        let runner = TraceRunner::new("node", &log);
        runner.backfill_log(b"[captured]").unwrap();

        assert_eq!(std::fs::read_to_string(&log).unwrap(), "[captured]");
    }
}
