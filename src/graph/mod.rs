//! Layout allocation and graph assembly.
//!
//! This module transforms classified trace records into:
//! - A lane-per-function two-dimensional layout
//! - A node/edge graph with chronological linkage

pub mod builder;
pub mod layout;

// Re-export main types
pub use builder::{GraphBuilder, PLACEHOLDER_LABEL};
pub use layout::{Lane, LaneAllocator};
