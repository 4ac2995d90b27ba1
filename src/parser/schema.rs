//! Output schema definitions for the event graph.
//!
//! This module defines the node/edge structures consumed by the renderer
//! (vis-network compatible field names) and the versioned document wrapper
//! written to disk. Schema is versioned to allow future evolution.

use serde::{Deserialize, Serialize};

/// The assembled event graph: ordered nodes and edges
///
/// Node ids are strictly increasing in append order, which is also the
/// chronological order of the underlying trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl Graph {
    /// Number of function-anchor nodes
    pub fn anchor_count(&self) -> usize {
        use crate::utils::config::COLOR_FUNCTION;
        self.nodes.iter().filter(|n| n.color == COLOR_FUNCTION).count()
    }
}

/// One node of the event graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Unique id from a single counter shared across anchors and events
    pub id: u64,

    /// Display label, including kind-specific extracted parameters
    pub label: String,

    /// Fill color (fixed palette, pure function of event kind)
    pub color: String,

    /// Horizontal position: 0 for anchors, lane cursor for events
    pub x: i64,

    /// Vertical position: the owning lane's row coordinate
    pub y: i64,

    /// Pinning: anchors are fully locked, events on the vertical axis only
    pub fixed: NodeLock,
}

/// Position locking for a node
///
/// Serialized the way vis-network expects it: either a plain boolean or a
/// per-axis object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeLock {
    /// Both axes locked (or neither)
    Both(bool),
    /// Per-axis lock
    Axes { x: bool, y: bool },
}

impl NodeLock {
    /// Lock used by event nodes: fixed row, free to drift horizontally
    pub fn row_only() -> Self {
        NodeLock::Axes { x: false, y: true }
    }
}

/// One directed edge of the event graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: u64,
    pub to: u64,

    /// Arrowhead placement, always "to"
    pub arrows: String,

    /// Dashed rendering marks global-chronology edges
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub dashes: bool,

    pub color: EdgeColor,
}

impl GraphEdge {
    /// Edge connecting chronologically adjacent events within one lane
    pub fn lane(from: u64, to: u64) -> Self {
        use crate::utils::config::COLOR_EDGE_LANE;
        GraphEdge {
            from,
            to,
            arrows: "to".to_string(),
            dashes: false,
            color: EdgeColor {
                color: COLOR_EDGE_LANE.to_string(),
            },
        }
    }

    /// Dashed edge connecting chronologically adjacent events across lanes
    pub fn chronology(from: u64, to: u64) -> Self {
        use crate::utils::config::COLOR_EDGE_GLOBAL;
        GraphEdge {
            from,
            to,
            arrows: "to".to_string(),
            dashes: true,
            color: EdgeColor {
                color: COLOR_EDGE_GLOBAL.to_string(),
            },
        }
    }

    /// Chronology style of this edge
    pub fn style(&self) -> EdgeStyle {
        if self.dashes {
            EdgeStyle::Global
        } else {
            EdgeStyle::IntraLane
        }
    }
}

/// Chronology style of an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeStyle {
    /// Causal within one function's lane
    IntraLane,
    /// Temporal across the whole trace
    Global,
}

/// Edge color wrapper (vis-network nests the color under an object)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeColor {
    pub color: String,
}

/// Top-level graph document written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphDocument {
    /// Schema version for compatibility checking
    pub version: String,

    /// Path or description of the trace the graph was built from
    pub source: String,

    /// The event graph itself
    pub graph: Graph,

    /// Timestamp when the document was generated
    pub generated_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_lock_serialization() {
        let both = serde_json::to_string(&NodeLock::Both(true)).unwrap();
        assert_eq!(both, "true");

        let row = serde_json::to_string(&NodeLock::row_only()).unwrap();
        assert_eq!(row, "{\"x\":false,\"y\":true}");
    }

    #[test]
    fn test_node_lock_round_trip() {
        let lock: NodeLock = serde_json::from_str("{\"x\":false,\"y\":true}").unwrap();
        assert_eq!(lock, NodeLock::row_only());
    }

    #[test]
    fn test_lane_edge_is_solid() {
        let edge = GraphEdge::lane(1, 2);
        assert_eq!(edge.style(), EdgeStyle::IntraLane);

        let json = serde_json::to_string(&edge).unwrap();
        assert!(!json.contains("dashes"));
    }

    #[test]
    fn test_chronology_edge_is_dashed() {
        let edge = GraphEdge::chronology(2, 3);
        assert_eq!(edge.style(), EdgeStyle::Global);

        let json = serde_json::to_string(&edge).unwrap();
        assert!(json.contains("\"dashes\":true"));
    }
}
