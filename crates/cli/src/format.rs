//! Output formatting for run results.
//!
//! Measurements themselves are printed by the harness's console reporter as
//! they happen; this module formats everything around them.

use std::fmt::Display;

use xport_harness::{OutputMode, RunSummary};

/// Format the list of available backends.
pub fn format_backends(names: &[&str], mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => serde_json::json!({ "backends": names }).to_string(),
        OutputMode::Human => names.join("\n"),
    }
}

/// Format the closing line of a successful run.
pub fn format_summary(summary: &RunSummary, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => serde_json::json!({ "summary": summary }).to_string(),
        OutputMode::Human => format!(
            "(ok) {} contacts through {} backend, {} files exported (seed {})",
            summary.records, summary.backend, summary.files_exported, summary.seed
        ),
    }
}

/// Format an error.
pub fn format_error(err: &dyn Display, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => serde_json::json!({ "error": err.to_string() }).to_string(),
        OutputMode::Human => format!("(error) {}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_backends() {
        assert_eq!(
            format_backends(&["memory", "directory"], OutputMode::Human),
            "memory\ndirectory"
        );
        assert_eq!(
            format_backends(&["memory"], OutputMode::Json),
            r#"{"backends":["memory"]}"#
        );
    }

    #[test]
    fn test_format_error() {
        let err = "backend not available: 'x'";
        assert_eq!(
            format_error(&err, OutputMode::Human),
            "(error) backend not available: 'x'"
        );
        let json: serde_json::Value =
            serde_json::from_str(&format_error(&err, OutputMode::Json)).unwrap();
        assert_eq!(json["error"], "backend not available: 'x'");
    }
}
