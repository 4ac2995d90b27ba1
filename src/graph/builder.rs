//! Graph assembly from classified, positioned records.
//!
//! The builder owns the shared id counter and the chronological linkage
//! maps. Nodes are appended in tokenization order, so node ids are strictly
//! increasing in trace order. All state is local to one ingestion call.

use super::layout::LaneAllocator;
use crate::parser::classifier::{ClassifiedRecord, EventKind};
use crate::parser::schema::{Graph, GraphEdge, GraphNode, NodeLock};
use crate::utils::config::{COLOR_PLACEHOLDER, LANE_START_X, LANE_STEP_X};
use log::debug;
use std::collections::HashMap;

/// Label of the informational node emitted for degenerate input
pub const PLACEHOLDER_LABEL: &str = "No optimization events found";

/// Assembles the final node/edge graph
///
/// Two entry styles: `push_event` for bracketed-text records (lane layout,
/// anchors, global chronology) and `push_phase` for phase entries (one
/// implicit lane, a single linear chain).
#[derive(Debug)]
pub struct GraphBuilder {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,

    lanes: LaneAllocator,

    /// Function identity -> anchor node id
    anchors: HashMap<String, u64>,

    /// Function identity -> last event node id in that lane
    last_in_lane: HashMap<String, u64>,

    /// Last event node appended anywhere, for global chronology
    last_global: Option<u64>,

    /// Cursor and predecessor for the phase chain
    phase_cursor: i64,
    last_phase: Option<u64>,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            lanes: LaneAllocator::new(),
            anchors: HashMap::new(),
            last_in_lane: HashMap::new(),
            last_global: None,
            phase_cursor: LANE_START_X,
            last_phase: None,
        }
    }

    /// Append one classified bracketed-text record
    ///
    /// **Public** - emits the function anchor on first sight of the
    /// function, then the event node, its intra-lane edge, and its
    /// global-chronology edge.
    pub fn push_event(&mut self, record: &ClassifiedRecord) {
        let anchor_id = self.anchor_for(&record.function);

        let (x, y) = self.lanes.lane(&record.function).place_event();
        let event_id = self.append_node(GraphNode {
            id: 0, // assigned by append_node
            label: record.label.clone(),
            color: record.kind.color().to_string(),
            x,
            y,
            fixed: NodeLock::row_only(),
        });

        // Intra-lane edge: from the lane's last event, or its anchor if this
        // is the first event in the lane.
        let lane_from = self
            .last_in_lane
            .insert(record.function.clone(), event_id)
            .unwrap_or(anchor_id);
        self.edges.push(GraphEdge::lane(lane_from, event_id));

        // Global chronology links event nodes only; the very first event in
        // the whole call has no global predecessor.
        if let Some(previous) = self.last_global.replace(event_id) {
            self.edges.push(GraphEdge::chronology(previous, event_id));
        }
    }

    /// Append one phase entry to the single linear phase chain
    ///
    /// **Public** - phases use no lane concept and no anchors; each phase
    /// links to the one before it.
    pub fn push_phase(&mut self, record: &ClassifiedRecord) {
        let x = self.phase_cursor;
        self.phase_cursor += LANE_STEP_X;

        let phase_id = self.append_node(GraphNode {
            id: 0,
            label: record.label.clone(),
            color: record.kind.color().to_string(),
            x,
            y: 0,
            fixed: NodeLock::row_only(),
        });

        if let Some(previous) = self.last_phase.replace(phase_id) {
            self.edges.push(GraphEdge::lane(previous, phase_id));
        }
    }

    /// Finish the build and return the assembled graph
    ///
    /// **Public** - degenerate input (no qualifying record) yields a single
    /// informational node and no edges, never an error.
    pub fn finish(mut self) -> Graph {
        if self.nodes.is_empty() {
            self.nodes.push(GraphNode {
                id: 1,
                label: PLACEHOLDER_LABEL.to_string(),
                color: COLOR_PLACEHOLDER.to_string(),
                x: 0,
                y: 0,
                fixed: NodeLock::Both(true),
            });
        }

        debug!(
            "Built graph: {} nodes, {} edges, {} lanes",
            self.nodes.len(),
            self.edges.len(),
            self.lanes.len()
        );

        Graph {
            nodes: self.nodes,
            edges: self.edges,
        }
    }

    /// Anchor node id for a function, emitting the anchor on first sight
    ///
    /// **Private** - exactly one anchor exists per distinct function
    fn anchor_for(&mut self, function: &str) -> u64 {
        if let Some(&id) = self.anchors.get(function) {
            return id;
        }

        let (x, y) = {
            let lane = self.lanes.lane(function);
            lane.anchor_position()
        };

        let id = self.append_node(GraphNode {
            id: 0,
            label: format!("Function:\n<b>{}</b>", function),
            color: EventKind::FunctionAnchor.color().to_string(),
            x,
            y,
            fixed: NodeLock::Both(true),
        });

        self.anchors.insert(function.to_string(), id);
        id
    }

    /// Append a node, assigning the next id from the shared counter
    ///
    /// **Private** - ids start at 1 and never reset within one call
    fn append_node(&mut self, mut node: GraphNode) -> u64 {
        let id = self.nodes.len() as u64 + 1;
        node.id = id;
        self.nodes.push(node);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::classifier::{ClassifiedRecord, EventKind};
    use crate::parser::schema::EdgeStyle;

    fn event(function: &str, kind: EventKind, label: &str) -> ClassifiedRecord {
        ClassifiedRecord {
            function: function.to_string(),
            kind,
            label: label.to_string(),
        }
    }

    #[test]
    fn test_anchor_emitted_once_per_function() {
        let mut builder = GraphBuilder::new();
        builder.push_event(&event("add", EventKind::Marked, "Marked"));
        builder.push_event(&event("add", EventKind::Optimized, "Optimized"));

        let graph = builder.finish();
        assert_eq!(graph.anchor_count(), 1);
        assert_eq!(graph.nodes.len(), 3);
    }

    #[test]
    fn test_ids_strictly_increasing_from_one() {
        let mut builder = GraphBuilder::new();
        builder.push_event(&event("add", EventKind::Marked, "Marked"));
        builder.push_event(&event("fib", EventKind::Compiling, "Compiling"));
        builder.push_event(&event("add", EventKind::Deopt, "Deopt"));

        let graph = builder.finish();
        let ids: Vec<u64> = graph.nodes.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_first_event_links_to_anchor() {
        let mut builder = GraphBuilder::new();
        builder.push_event(&event("add", EventKind::Marked, "Marked"));

        let graph = builder.finish();
        // Anchor id 1, event id 2, one lane edge, no global edge yet.
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.edges[0].from, 1);
        assert_eq!(graph.edges[0].to, 2);
        assert_eq!(graph.edges[0].style(), EdgeStyle::IntraLane);
    }

    #[test]
    fn test_global_chronology_crosses_lanes() {
        let mut builder = GraphBuilder::new();
        builder.push_event(&event("add", EventKind::Marked, "Marked"));
        builder.push_event(&event("fib", EventKind::Marked, "Marked"));

        let graph = builder.finish();
        // Nodes: anchor add (1), event (2), anchor fib (3), event (4).
        // The global edge links event 2 -> event 4, skipping the anchor.
        let global: Vec<&GraphEdge> = graph
            .edges
            .iter()
            .filter(|e| e.style() == EdgeStyle::Global)
            .collect();
        assert_eq!(global.len(), 1);
        assert_eq!((global[0].from, global[0].to), (2, 4));
    }

    #[test]
    fn test_edge_count_invariant() {
        let mut builder = GraphBuilder::new();
        for i in 0..5 {
            let function = if i % 2 == 0 { "add" } else { "fib" };
            builder.push_event(&event(function, EventKind::Compiling, "Compiling"));
        }

        let graph = builder.finish();
        // 5 intra-lane edges plus 4 global edges.
        assert_eq!(graph.edges.len(), 9);
    }

    #[test]
    fn test_phase_chain_has_no_anchor() {
        let mut builder = GraphBuilder::new();
        builder.push_phase(&event("", EventKind::Phase, "A (t1)"));
        builder.push_phase(&event("", EventKind::Phase, "B (t2)"));

        let graph = builder.finish();
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.edges.len(), 1);
        assert_eq!((graph.edges[0].from, graph.edges[0].to), (1, 2));
        assert_eq!(graph.anchor_count(), 0);
    }

    #[test]
    fn test_empty_build_yields_placeholder() {
        let graph = GraphBuilder::new().finish();
        assert_eq!(graph.nodes.len(), 1);
        assert_eq!(graph.nodes[0].id, 1);
        assert_eq!(graph.nodes[0].label, PLACEHOLDER_LABEL);
        assert!(graph.edges.is_empty());
    }
}
