//! Serve command implementation.

use crate::server::{serve, ServeConfig};
use crate::utils::config::DEFAULT_POLL_INTERVAL;
use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

/// Arguments for the serve command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ServeArgs {
    /// Log file to serve and ingest on request
    pub log_file: PathBuf,

    /// Port to listen on
    pub port: u16,
}

/// Execute the serve command
///
/// **Public** - blocks until the server is interrupted
pub fn execute_serve(args: ServeArgs) -> Result<()> {
    info!(
        "Serving visualization for {} on port {}",
        args.log_file.display(),
        args.port
    );

    serve(ServeConfig {
        log_file: args.log_file,
        port: args.port,
        poll_interval: DEFAULT_POLL_INTERVAL,
    })
    .context("Visualization server failed")
}
