//! Format detection and record tokenization.
//!
//! Splits raw log text into a sequence of records according to the active
//! grammar. Two formats are supported:
//! - bracketed text: one `[...]`-wrapped record per line (V8 --trace-opt
//!   and --trace-deopt output), interleaved diagnostic lines are skipped
//! - phase JSON: comma- or newline-separated phase records without an
//!   enclosing array (V8 --trace-turbo dumps)

use crate::utils::config::OPTIMIZING_NAME_MARKER;
use crate::utils::error::ParseError;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// Record boundary where a newline stands in for the comma separator: a
// closing brace followed (across whitespace containing a newline) by the
// next opening brace.
static NEWLINE_BOUNDARY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\}[ \t\r]*\n\s*\{").expect("newline boundary regex"));

/// Detected log format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Line-oriented records wrapped in a single pair of outer brackets
    BracketedText,
    /// Sequence of JSON phase records
    PhaseJson,
    /// Neither grammar applies (empty or free-form text)
    Unrecognized,
}

/// One record of a phase-JSON trace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseRecord {
    /// Record name; the optimizing pass is found by name
    pub name: String,

    /// Ordered compilation phases, present only on pass records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phases: Option<Vec<PhaseEntry>>,
}

/// One named stage of an optimizing compilation pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseEntry {
    pub name: String,

    #[serde(rename = "type")]
    pub kind: String,
}

/// Detect which grammar applies to the raw text
///
/// **Public** - used by the ingestion facade
///
/// Bracketed-text detection is attempted first: a single qualifying line is
/// enough to commit to that format. Phase-JSON is only assumed when the
/// trimmed input is JSON-shaped, so free-form text degenerates instead of
/// failing fatally.
pub fn detect_format(raw: &str) -> LogFormat {
    if raw.lines().any(|line| bracketed_content(line).is_some()) {
        return LogFormat::BracketedText;
    }

    let trimmed = raw.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return LogFormat::PhaseJson;
    }

    LogFormat::Unrecognized
}

/// Iterate over the bracketed records of the raw text
///
/// **Public** - yields the content between the outer brackets, in input
/// order. Lines that do not match the record shape are silently skipped.
pub fn bracketed_records(raw: &str) -> impl Iterator<Item = &str> {
    raw.lines().filter_map(bracketed_content)
}

/// Extract the content of a line fully wrapped in one pair of outer brackets
///
/// **Private** - the shape test for the bracketed-text grammar. A bracketed
/// line whose content is itself JSON-shaped is a one-line phase-JSON array,
/// not a trace record.
fn bracketed_content(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    let inner = trimmed.strip_prefix('[')?.strip_suffix(']')?.trim();

    if inner.starts_with('{') || inner.starts_with('[') {
        return None;
    }

    Some(inner)
}

/// Decode phase-JSON input into records
///
/// **Public** - used by the ingestion facade
///
/// The input is a sequence of comma- or newline-separated JSON objects
/// without an enclosing array. It is normalized by trimming a trailing
/// separator and wrapping the whole text in `[...]` before decoding.
///
/// # Errors
/// `ParseError::JsonError` if the normalized text is not a valid array of
/// records. This is the fatal tier: no partial result is produced.
pub fn parse_phase_records(raw: &str) -> Result<Vec<PhaseRecord>, ParseError> {
    let normalized = normalize_phase_json(raw);
    let records: Vec<PhaseRecord> = serde_json::from_str(&normalized)?;

    debug!("Decoded {} phase-JSON records", records.len());

    Ok(records)
}

/// Normalize raw phase-JSON into a well-formed array string
///
/// **Private** - tolerates a trailing separator before the closing bracket,
/// and accepts a bare newline between records in place of a comma
fn normalize_phase_json(raw: &str) -> String {
    let mut body = raw.trim();

    // Already an array: strip the outer brackets and rebuild, so a trailing
    // separator inside the array is handled by the same path.
    if let Some(inner) = body.strip_prefix('[').and_then(|b| b.strip_suffix(']')) {
        body = inner.trim();
    }

    let body = body.trim_end_matches(',').trim_end();
    let body = NEWLINE_BOUNDARY_RE.replace_all(body, "},{");

    format!("[{}]", body)
}

/// Find the first record that represents an optimizing compilation pass
///
/// **Public** - only this record's phase list is relevant to graph
/// construction; returns `None` when no record qualifies.
pub fn find_optimizing_record(records: &[PhaseRecord]) -> Option<&PhaseRecord> {
    records
        .iter()
        .find(|r| r.name.to_ascii_lowercase().contains(OPTIMIZING_NAME_MARKER) && r.phases.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_format_bracketed() {
        let raw = "noise\n[marking something]\nmore noise";
        assert_eq!(detect_format(raw), LogFormat::BracketedText);
    }

    #[test]
    fn test_detect_format_phase_json() {
        let raw = "{\"name\":\"optimizing\",\"phases\":[]}";
        assert_eq!(detect_format(raw), LogFormat::PhaseJson);
    }

    #[test]
    fn test_detect_format_single_line_json_array_is_not_bracketed() {
        let raw = "[{\"name\":\"optimizing\",\"phases\":[]}]";
        assert_eq!(detect_format(raw), LogFormat::PhaseJson);
    }

    #[test]
    fn test_detect_format_unrecognized() {
        assert_eq!(detect_format(""), LogFormat::Unrecognized);
        assert_eq!(detect_format("just some console output\n"), LogFormat::Unrecognized);
    }

    #[test]
    fn test_bracketed_records_skips_nonmatching() {
        let raw = "[first]\nplain line\n  [second]  \n[unterminated";
        let records: Vec<&str> = bracketed_records(raw).collect();
        assert_eq!(records, vec!["first", "second"]);
    }

    #[test]
    fn test_parse_phase_records_bare_sequence() {
        let raw = "{\"name\":\"a\"},\n{\"name\":\"b\"},";
        let records = parse_phase_records(raw).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].name, "b");
    }

    #[test]
    fn test_parse_phase_records_newline_separated() {
        let raw = "{\"name\":\"a\"}\n{\"name\":\"b\"}\n{\"name\":\"c\"}";
        let records = parse_phase_records(raw).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[2].name, "c");
    }

    #[test]
    fn test_parse_phase_records_newline_inside_record_is_not_a_boundary() {
        let raw = "{\"name\":\"a\",\n\"phases\":[]}\n{\"name\":\"b\"}";
        let records = parse_phase_records(raw).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].phases.as_ref().unwrap().len(), 0);
    }

    #[test]
    fn test_parse_phase_records_wrapped_array() {
        let raw = "[{\"name\":\"a\"},{\"name\":\"b\"},]";
        let records = parse_phase_records(raw).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_parse_phase_records_malformed_is_fatal() {
        assert!(parse_phase_records("{\"name\": }").is_err());
    }

    #[test]
    fn test_find_optimizing_record() {
        let raw = concat!(
            "{\"name\":\"disassembly\"},",
            "{\"name\":\"optimizing add\",\"phases\":[{\"name\":\"typer\",\"type\":\"graph\"}]}"
        );
        let records = parse_phase_records(raw).unwrap();
        let record = find_optimizing_record(&records).unwrap();
        assert_eq!(record.phases.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn test_find_optimizing_record_requires_phases() {
        let records = vec![PhaseRecord {
            name: "optimizing".to_string(),
            phases: None,
        }];
        assert!(find_optimizing_record(&records).is_none());
    }
}
