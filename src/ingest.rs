//! Ingestion facade: raw log text in, event graph out.
//!
//! The single entry point over the tokenizer, classifier, allocator, and
//! builder. Pure and side-effect-free: every call owns a fresh set of
//! counters and maps, so identical input yields structurally identical
//! output (same ids, same positions).

use crate::graph::GraphBuilder;
use crate::parser::classifier::{classify_line, classify_phase};
use crate::parser::schema::Graph;
use crate::parser::tokenizer::{
    bracketed_records, detect_format, find_optimizing_record, parse_phase_records, LogFormat,
    PhaseRecord,
};
use crate::utils::error::ParseError;
use log::debug;

/// Build the event graph from raw log text
///
/// **Public** - main entry point for ingestion
///
/// # Arguments
/// * `raw_text` - UTF-8 log text in either supported grammar
///
/// # Returns
/// The assembled graph. Degenerate input (empty or fully unrecognized)
/// yields a single informational node and no edges.
///
/// # Errors
/// `ParseError` only for structurally invalid phase-JSON input; malformed
/// lines in bracketed-text mode are dropped, never fatal.
pub fn ingest(raw_text: &str) -> Result<Graph, ParseError> {
    let format = detect_format(raw_text);
    debug!("Detected log format: {:?}", format);

    match format {
        LogFormat::BracketedText => Ok(ingest_bracketed(raw_text)),
        LogFormat::PhaseJson => {
            let records = parse_phase_records(raw_text)?;
            Ok(ingest_phases(&records))
        }
        LogFormat::Unrecognized => Ok(GraphBuilder::new().finish()),
    }
}

/// Build the event graph from already-decoded phase records
///
/// **Public** - alternate entry point for callers that hold decoded phase
/// data. Only the first optimizing-pass record contributes to the graph;
/// its phases form a single linear chain.
pub fn ingest_phases(records: &[PhaseRecord]) -> Graph {
    let mut builder = GraphBuilder::new();

    if let Some(record) = find_optimizing_record(records) {
        debug!("Using phases of record '{}'", record.name);
        for entry in record.phases.iter().flatten() {
            builder.push_phase(&classify_phase(entry));
        }
    }

    builder.finish()
}

/// Ingest bracketed-text records in input order
///
/// **Private** - classification drives lane allocation and graph assembly
/// in lockstep with tokenization order
fn ingest_bracketed(raw_text: &str) -> Graph {
    let mut builder = GraphBuilder::new();
    let mut count = 0usize;

    for content in bracketed_records(raw_text) {
        builder.push_event(&classify_line(content));
        count += 1;
    }

    debug!("Ingested {} bracketed records", count);

    builder.finish()
}
