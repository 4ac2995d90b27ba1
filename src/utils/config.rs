//! Configuration and constants for the CLI.

use std::time::Duration;

/// Current graph document schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Sentinel function identity for records with no extractable function
pub const UNKNOWN_FUNCTION: &str = "Global/Unknown";

// Layout geometry. Function anchors sit at x=0 in their row; events start
// to the right of the anchor and advance a fixed step per event, so a lane's
// horizontal extent reflects event count, not wall-clock time.
pub const ANCHOR_X: i64 = 0;
pub const LANE_START_X: i64 = 300;
pub const LANE_STEP_X: i64 = 250;
pub const LANE_ROW_HEIGHT: i64 = 150;

/// Maximum label length for records with no matching action prefix
pub const UNCLASSIFIED_LABEL_LIMIT: usize = 40;

/// Substring of a phase-JSON record name that marks the optimizing pass
pub const OPTIMIZING_NAME_MARKER: &str = "optimiz";

// Node palette (vis-network hex colors, kept from the original viewer)
pub const COLOR_FUNCTION: &str = "#97C2FC";
pub const COLOR_DEOPT: &str = "#FF7B7B";
pub const COLOR_COMPILED: &str = "#7BFF7B";
pub const COLOR_COMPILING: &str = "#2ed6c5ff";
pub const COLOR_UNCLASSIFIED: &str = "#FFFF00";
pub const COLOR_PHASE: &str = "#C5A3FF";
pub const COLOR_PLACEHOLDER: &str = "#D3D3D3";

// Edge palette
pub const COLOR_EDGE_LANE: &str = "#66a3ff";
pub const COLOR_EDGE_GLOBAL: &str = "#8d8d8dff";

/// Default log file written by the traced runtime
pub const DEFAULT_LOG_FILE: &str = "turbo.json";

/// Default runtime binary used to execute traced scripts
pub const DEFAULT_RUNTIME: &str = "node";

/// JIT trace flags passed to the runtime ahead of the script
pub const TRACE_FLAGS: &[&str] = &["--trace-opt", "--trace-deopt", "--redirect-code-traces"];

/// Default port for the visualization server
pub const DEFAULT_PORT: u16 = 3000;

/// Interval at which the log tailer polls the file size
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);
