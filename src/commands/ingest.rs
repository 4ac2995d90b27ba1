//! Ingest command implementation.
//!
//! The ingest command:
//! 1. Reads the raw log file
//! 2. Builds the event graph
//! 3. Writes the graph document
//! 4. Optionally prints a text summary

use crate::ingest::ingest;
use crate::output::{to_document, write_graph};
use crate::parser::schema::{EdgeStyle, Graph};
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;

/// Arguments for the ingest command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct IngestArgs {
    /// Path to the raw trace log
    pub input: PathBuf,

    /// Output path for the graph document JSON
    pub output: PathBuf,

    /// Print text summary to stdout
    pub print_summary: bool,
}

/// Execute the ingest command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Log file read errors
/// * Fatal ingestion errors (malformed phase-JSON)
/// * File write errors
pub fn execute_ingest(args: IngestArgs) -> Result<Graph> {
    info!("Ingesting trace log: {}", args.input.display());

    let raw = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read log file {}", args.input.display()))?;

    debug!("Read {} bytes of raw trace text", raw.len());

    let graph = ingest(&raw).context("Failed to ingest trace log")?;

    let document = to_document(graph.clone(), args.input.display().to_string());
    write_graph(&document, &args.output).context("Failed to write graph document")?;

    info!("✓ Graph written to: {}", args.output.display());

    if args.print_summary {
        print_summary(&graph);
    }

    Ok(graph)
}

/// Print a short text summary of the assembled graph
///
/// **Private** - internal helper for execute_ingest
fn print_summary(graph: &Graph) {
    let lane_edges = graph
        .edges
        .iter()
        .filter(|e| e.style() == EdgeStyle::IntraLane)
        .count();
    let global_edges = graph.edges.len() - lane_edges;

    println!("\n{}", "=".repeat(60));
    println!("GRAPH SUMMARY");
    println!("{}", "=".repeat(60));
    println!("Functions:    {}", graph.anchor_count());
    println!("Nodes:        {}", graph.nodes.len());
    println!("Lane edges:   {}", lane_edges);
    println!("Global edges: {}", global_edges);
    println!("{}", "=".repeat(60));
}
