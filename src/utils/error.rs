//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during trace ingestion
///
/// Only structurally invalid phase-JSON input is fatal. Malformed individual
/// lines in the bracketed-text format are dropped, never surfaced here.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Errors that can occur while running the traced process
#[derive(Error, Debug)]
pub enum RunError {
    #[error("Failed to spawn runtime process: {0}")]
    SpawnFailed(#[from] std::io::Error),

    #[error("Traced script not found: {0}")]
    ScriptNotFound(PathBuf),

    #[error("Runtime exited with status {code:?}: {stderr}")]
    RuntimeFailed { code: Option<i32>, stderr: String },
}

/// Errors that can occur in the visualization server
#[derive(Error, Debug)]
pub enum ServeError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to bind {addr}: {source}")]
    BindFailed {
        addr: String,
        source: std::io::Error,
    },
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
