//! Lane and layout allocation.
//!
//! Each distinct function gets a vertical lane (row) on first sight, plus a
//! horizontal cursor that advances a fixed step per event placed in the
//! lane. All state is local to one ingestion call.

use crate::utils::config::{ANCHOR_X, LANE_ROW_HEIGHT, LANE_START_X, LANE_STEP_X};
use std::collections::HashMap;

/// Layout state of one function's lane
#[derive(Debug, Clone)]
pub struct Lane {
    /// Row index, assigned once in first-seen order
    pub row: usize,

    /// Horizontal position for the next event in this lane
    cursor: i64,
}

impl Lane {
    /// Vertical coordinate shared by the anchor and all events of this lane
    pub fn y(&self) -> i64 {
        self.row as i64 * LANE_ROW_HEIGHT
    }

    /// Position of the lane's function anchor
    pub fn anchor_position(&self) -> (i64, i64) {
        (ANCHOR_X, self.y())
    }

    /// Claim the next event position in this lane and advance the cursor
    pub fn place_event(&mut self) -> (i64, i64) {
        let position = (self.cursor, self.y());
        self.cursor += LANE_STEP_X;
        position
    }
}

/// Per-call mapping from function identity to lane state
#[derive(Debug, Default)]
pub struct LaneAllocator {
    lanes: HashMap<String, Lane>,
}

impl LaneAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the lane for a function, allocating the next unused row on
    /// first occurrence. Rows are never reused or reassigned.
    pub fn lane(&mut self, function: &str) -> &mut Lane {
        let next_row = self.lanes.len();
        self.lanes
            .entry(function.to_string())
            .or_insert_with(|| Lane {
                row: next_row,
                cursor: LANE_START_X,
            })
    }

    /// Number of distinct lanes allocated so far
    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }
}
