//! Run command implementation.
//!
//! The run command:
//! 1. Executes the script under the JIT trace flags
//! 2. Ingests the resulting log into a graph document
//! 3. Optionally serves the visualization

use super::ingest::{execute_ingest, IngestArgs};
use super::serve::{execute_serve, ServeArgs};
use crate::runner::TraceRunner;
use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

/// Arguments for the run command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct RunArgs {
    /// JavaScript file to trace
    pub script: PathBuf,

    /// Runtime binary to execute (must understand the V8 trace flags)
    pub runtime: String,

    /// Log file the runtime writes / the tool ingests
    pub log_file: PathBuf,

    /// Output path for the graph document JSON
    pub output: PathBuf,

    /// Serve the visualization after ingesting
    pub serve: bool,

    /// Port for the visualization server
    pub port: u16,
}

/// Execute the run command
///
/// **Public** - main entry point called from main.rs
pub fn execute_run(args: RunArgs) -> Result<()> {
    validate_args(&args)?;

    info!("Step 1/3: Running traced script...");
    let runner = TraceRunner::new(&args.runtime, &args.log_file);
    runner
        .run(&args.script)
        .context("Failed to run traced script")?;

    info!("Step 2/3: Ingesting trace log...");
    let graph = execute_ingest(IngestArgs {
        input: args.log_file.clone(),
        output: args.output.clone(),
        print_summary: false,
    })?;

    info!(
        "Ingested graph: {} nodes, {} edges",
        graph.nodes.len(),
        graph.edges.len()
    );

    if args.serve {
        info!("Step 3/3: Starting visualization server...");
        execute_serve(ServeArgs {
            log_file: args.log_file,
            port: args.port,
        })?;
    } else {
        info!("Step 3/3: Skipping server (not requested)");
    }

    Ok(())
}

/// Validate run arguments
///
/// **Public** - can be called before execute_run for early validation
pub fn validate_args(args: &RunArgs) -> Result<()> {
    if !args.script.exists() {
        anyhow::bail!("Script does not exist: {}", args.script.display());
    }

    if args.runtime.is_empty() {
        anyhow::bail!("Runtime binary cannot be empty");
    }

    if args.log_file.as_os_str().is_empty() {
        anyhow::bail!("Log file path cannot be empty");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::config::{DEFAULT_LOG_FILE, DEFAULT_PORT, DEFAULT_RUNTIME};

    fn args_with_script(script: PathBuf) -> RunArgs {
        RunArgs {
            script,
            runtime: DEFAULT_RUNTIME.to_string(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            output: PathBuf::from("graph.json"),
            serve: false,
            port: DEFAULT_PORT,
        }
    }

    #[test]
    fn test_validate_args_missing_script() {
        let args = args_with_script(PathBuf::from("/definitely/not/here.js"));
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_valid() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("bench.js");
        std::fs::write(&script, "for (let i = 0; i < 10; i++) {}").unwrap();

        let args = args_with_script(script);
        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_validate_args_empty_runtime() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("bench.js");
        std::fs::write(&script, "1 + 1").unwrap();

        let mut args = args_with_script(script);
        args.runtime = String::new();
        assert!(validate_args(&args).is_err());
    }
}
