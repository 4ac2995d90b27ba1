//! Trace tokenization, classification, and schema definitions.
//!
//! This module handles:
//! - Detecting the log format (bracketed text vs. phase JSON)
//! - Splitting raw text into records
//! - Classifying records into typed events
//! - Defining the output graph schema

pub mod classifier;
pub mod schema;
pub mod tokenizer;

// Re-export main types
pub use classifier::{classify_line, classify_phase, ClassifiedRecord, EventKind};
pub use schema::{EdgeColor, EdgeStyle, Graph, GraphDocument, GraphEdge, GraphNode, NodeLock};
pub use tokenizer::{
    bracketed_records, detect_format, find_optimizing_record, parse_phase_records, LogFormat,
    PhaseEntry, PhaseRecord,
};
