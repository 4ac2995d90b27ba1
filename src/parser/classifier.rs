//! Record classification.
//!
//! Turns one raw record (a bracketed log line's content, or a phase entry)
//! into a typed event: function identity, event kind, display label.
//! Pattern matching lives here so the rest of the pipeline never inspects
//! raw text again.

use super::tokenizer::PhaseEntry;
use crate::utils::config::{
    COLOR_COMPILED, COLOR_COMPILING, COLOR_DEOPT, COLOR_FUNCTION, COLOR_PHASE,
    COLOR_UNCLASSIFIED, UNCLASSIFIED_LABEL_LIMIT, UNKNOWN_FUNCTION,
};
use once_cell::sync::Lazy;
use regex::Regex;

// Marker for an embedded function object, e.g. "<JSFunction add (sfi = 0x...)>".
// The text between the marker and the parenthesis is the function identity.
static FUNCTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<JSFunction\s(.*?)\s\(").expect("function regex"));

// "reason: <text>" terminated by a bracket or parenthesis followed by a colon,
// as emitted by deopt records: "bailout (... reason: not a Smi): begin".
static DEOPT_REASON_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"reason:\s(.*?)[\]\)]:").expect("deopt reason regex"));

// "took <number[, number...]> ms" elapsed-time fragment of completion records.
static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"took\s([\d\.,\s]+?)\sms").expect("time regex"));

// "reason: <text>" running to the next comma or end-of-text (marking records).
static MARK_REASON_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"reason:\s([^,]*)").expect("marking reason regex"));

/// Semantic kind of one trace event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Fixed node representing a function's identity
    FunctionAnchor,
    /// Function marked for optimization
    Marked,
    /// Compilation started
    Compiling,
    /// Baseline compilation completed
    Compiled,
    /// Optimizing compilation completed
    Optimized,
    /// Optimized code abandoned after a violated runtime assumption
    Deopt,
    /// One stage of an optimizing compilation pipeline (phase-JSON only)
    Phase,
    /// No action prefix matched
    Unclassified,
}

impl EventKind {
    /// Node color for this kind (fixed palette)
    pub fn color(self) -> &'static str {
        match self {
            EventKind::FunctionAnchor => COLOR_FUNCTION,
            EventKind::Marked | EventKind::Compiling => COLOR_COMPILING,
            EventKind::Compiled | EventKind::Optimized => COLOR_COMPILED,
            EventKind::Deopt => COLOR_DEOPT,
            EventKind::Phase => COLOR_PHASE,
            EventKind::Unclassified => COLOR_UNCLASSIFIED,
        }
    }
}

/// One classified trace record, ready for layout and graph construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedRecord {
    /// Owning function identity, or the `Global/Unknown` sentinel
    pub function: String,

    /// Semantic event kind
    pub kind: EventKind,

    /// Human-readable label with kind-specific extracted parameters
    pub label: String,
}

/// Classify the content of one bracketed-text record
///
/// **Public** - main classification entry point
///
/// Never fails: records with no extractable function identity fall back to
/// the sentinel, records with no matching action prefix become
/// `Unclassified` with a bounded-length label.
pub fn classify_line(content: &str) -> ClassifiedRecord {
    let function = extract_function_name(content);

    // Classify on the text preceding the function-object marker, so the
    // function pointer's own text is never mistaken for an action keyword.
    let detail = content
        .split("<JSFunction")
        .next()
        .unwrap_or(content)
        .trim_start();

    let (kind, label) = classify_action(detail, content);

    ClassifiedRecord {
        function,
        kind,
        label,
    }
}

/// Classify one phase entry from a phase-JSON trace
///
/// **Public** - phase entries carry no function identity and no
/// reason/time parameters
pub fn classify_phase(entry: &PhaseEntry) -> ClassifiedRecord {
    ClassifiedRecord {
        function: UNKNOWN_FUNCTION.to_string(),
        kind: EventKind::Phase,
        label: format!("{} ({})", entry.name, entry.kind),
    }
}

/// Extract the function identity from the record content
///
/// **Private** - falls back to the sentinel, never fails
fn extract_function_name(content: &str) -> String {
    FUNCTION_RE
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| UNKNOWN_FUNCTION.to_string())
}

/// Apply the kind rules in fixed priority order
///
/// **Private** - `detail` is the pre-marker text used for prefix matching,
/// `content` the full record used for parameter extraction
fn classify_action(detail: &str, content: &str) -> (EventKind, String) {
    if detail.starts_with("bailout") {
        let reason = extract_deopt_reason(content);
        return (EventKind::Deopt, format!("Deopt\nReason: {}", reason));
    }

    if detail.starts_with("completed compiling") || detail.starts_with("completed optimizing") {
        let time = extract_elapsed_time(content)
            .map(|t| format!("\nTime: {} ms", t))
            .unwrap_or_default();

        return if detail.starts_with("completed compiling") {
            (EventKind::Compiled, format!("Compiled{}", time))
        } else {
            (EventKind::Optimized, format!("Optimized{}", time))
        };
    }

    if detail.starts_with("compiling method") {
        let target = if content.contains("TURBOFAN") {
            " (TurboFan)"
        } else {
            ""
        };
        let osr = if content.contains("OSR") { " (OSR)" } else { "" };
        return (EventKind::Compiling, format!("Compiling{}{}", target, osr));
    }

    if detail.starts_with("marking") {
        let reason = extract_marking_reason(content);
        return (
            EventKind::Marked,
            format!("Marked for Opt\nReason: {}", reason),
        );
    }

    (EventKind::Unclassified, truncated_label(content))
}

/// Extract the deopt reason, defaulting to "Unknown"
///
/// **Private** - surrounding single quotes are stripped so a quoted reason
/// reads the same as a bare one
fn extract_deopt_reason(content: &str) -> String {
    DEOPT_REASON_RE
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().trim_matches('\'').to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Extract the elapsed-time fragment of a completion record
///
/// **Private** - returns None when the record carries no timing
fn extract_elapsed_time(content: &str) -> Option<String> {
    TIME_RE
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Extract the marking reason, defaulting to "Unknown"
///
/// **Private** - runs to the next comma or end-of-text
fn extract_marking_reason(content: &str) -> String {
    MARK_REASON_RE
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Bounded-length prefix of the raw text for unclassified records
///
/// **Private** - keeps layout labels compact; never the full text
fn truncated_label(content: &str) -> String {
    let prefix: String = content.chars().take(UNCLASSIFIED_LABEL_LIMIT).collect();
    format!("{}...", prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_function_name() {
        let content = "marking 0x3e2 <JSFunction add (sfi = 0x1234)> for optimization";
        assert_eq!(extract_function_name(content), "add");
    }

    #[test]
    fn test_extract_function_name_missing() {
        assert_eq!(extract_function_name("no marker here"), UNKNOWN_FUNCTION);
    }

    #[test]
    fn test_classify_bailout_with_reason() {
        let record = classify_line(
            "bailout (kind: deopt-eager, reason: 'not same map'): begin \
             <JSFunction getX (sfi = 0xabc)>",
        );
        assert_eq!(record.kind, EventKind::Deopt);
        assert_eq!(record.function, "getX");
        assert_eq!(record.label, "Deopt\nReason: not same map");
    }

    #[test]
    fn test_classify_bailout_without_reason() {
        let record = classify_line("bailout: begin");
        assert_eq!(record.kind, EventKind::Deopt);
        assert_eq!(record.label, "Deopt\nReason: Unknown");
    }

    #[test]
    fn test_classify_completed_optimizing_with_time() {
        let record = classify_line(
            "completed optimizing <JSFunction add (sfi = 0x1)> - took 0.038, 0.123, 0.021 ms",
        );
        assert_eq!(record.kind, EventKind::Optimized);
        assert_eq!(record.label, "Optimized\nTime: 0.038, 0.123, 0.021 ms");
    }

    #[test]
    fn test_classify_completed_compiling_without_time() {
        let record = classify_line("completed compiling <JSFunction fib (sfi = 0x2)>");
        assert_eq!(record.kind, EventKind::Compiled);
        assert_eq!(record.label, "Compiled");
    }

    #[test]
    fn test_classify_compiling_method_flags() {
        let record =
            classify_line("compiling method <JSFunction fib (sfi = 0x2)> (target TURBOFAN), OSR");
        assert_eq!(record.kind, EventKind::Compiling);
        assert_eq!(record.label, "Compiling (TurboFan) (OSR)");

        let plain = classify_line("compiling method <JSFunction fib (sfi = 0x2)>");
        assert_eq!(plain.label, "Compiling");
    }

    #[test]
    fn test_classify_marking_reason_to_comma() {
        let record = classify_line(
            "marking 0x1 <JSFunction add (sfi = 0x3)> for optimization to TURBOFAN, \
             ConcurrencyMode::kConcurrent, reason: hot and stable",
        );
        assert_eq!(record.kind, EventKind::Marked);
        assert_eq!(record.label, "Marked for Opt\nReason: hot and stable");
    }

    #[test]
    fn test_classify_unclassified_truncates() {
        let long = "x".repeat(100);
        let record = classify_line(&long);
        assert_eq!(record.kind, EventKind::Unclassified);
        assert_eq!(record.function, UNKNOWN_FUNCTION);
        assert_eq!(record.label.chars().count(), UNCLASSIFIED_LABEL_LIMIT + 3);
        assert!(record.label.ends_with("..."));
    }

    #[test]
    fn test_function_pointer_text_not_mistaken_for_action() {
        // "marking" appears only inside the function name; the record must
        // not classify as Marked.
        let record = classify_line("something else <JSFunction marking (sfi = 0x4)>");
        assert_eq!(record.kind, EventKind::Unclassified);
        assert_eq!(record.function, "marking");
    }

    #[test]
    fn test_classify_phase() {
        let entry = PhaseEntry {
            name: "TyperPhase".to_string(),
            kind: "graph".to_string(),
        };
        let record = classify_phase(&entry);
        assert_eq!(record.kind, EventKind::Phase);
        assert_eq!(record.label, "TyperPhase (graph)");
    }
}
