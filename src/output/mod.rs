//! Output writers for graph documents.

pub mod json;

// Re-export main functions
pub use json::{read_graph, to_document, write_graph};
