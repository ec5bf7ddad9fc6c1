//! Diagnostics for the TSPL simulator.
//!
//! Provides [`ValidationError`], [`ErrorKind`], [`Span`], and [`LineIndex`]
//! used to report findings from the validator and interpreter. Diagnostic
//! codes are defined in the [`codes`] module.

#![warn(missing_docs)]

/// Diagnostic ID constants auto-generated from `data/diagnostics.json`.
pub mod codes;

use serde::Serialize;

// ── LineIndex ────────────────────────────────────────────────────────────

/// Maps 1-based line numbers to the byte range of each line's trimmed text.
///
/// Lines are split on `\n` exactly like the validator and interpreter split
/// them, so a `line` reported by either pass can be anchored back into the
/// source for annotated output.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Trimmed content span of each line, in source order.
    lines: Vec<Span>,
}

impl LineIndex {
    /// Build a `LineIndex` from source text.
    pub fn new(text: &str) -> Self {
        let mut lines = Vec::new();
        let mut start = 0usize;
        for raw in text.split('\n') {
            let lead = raw.len() - raw.trim_start().len();
            let trimmed = raw.trim();
            let s = start + lead;
            lines.push(Span::new(s, s + trimmed.len()));
            start += raw.len() + 1;
        }
        Self { lines }
    }

    /// Byte span of the trimmed text on the given 1-based line.
    ///
    /// Returns `None` for line 0 (whole-document findings) and for lines
    /// past the end of the input.
    pub fn line_span(&self, line: usize) -> Option<Span> {
        line.checked_sub(1).and_then(|i| self.lines.get(i)).copied()
    }

    /// Total number of lines (at least 1, even for empty input).
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// Byte span in the source input.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Span {
    /// Byte offset of the first character (0-based).
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
}

impl Span {
    /// Create a span covering `[start, end)`.
    ///
    /// Panics if `end < start`.
    pub fn new(start: usize, end: usize) -> Self {
        assert!(end >= start, "Span end ({end}) < start ({start})");
        Self { start, end }
    }
}

// ── Error taxonomy ───────────────────────────────────────────────────────

/// Category of a finding, each mapped to a stable diagnostic code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Keyword is not in the recognized command set.
    UnknownCommand,
    /// Wrong number of arguments.
    ArgumentCount,
    /// Argument is non-numeric or carries a bad unit.
    ArgumentFormat,
    /// Argument parsed but lies outside its bounds.
    RangeViolation,
    /// Two paired measurements use different units.
    UnitMismatch,
    /// Fixed-shape command does not match its field layout.
    PatternMismatch,
    /// A required command is absent from the whole document.
    MissingRequiredCommand,
}

impl ErrorKind {
    /// Diagnostic code for this kind (e.g. `"TSPL1101"`).
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::UnknownCommand => codes::UNKNOWN_COMMAND,
            ErrorKind::ArgumentCount => codes::ARGUMENT_COUNT,
            ErrorKind::ArgumentFormat => codes::ARGUMENT_FORMAT,
            ErrorKind::RangeViolation => codes::RANGE_VIOLATION,
            ErrorKind::UnitMismatch => codes::UNIT_MISMATCH,
            ErrorKind::PatternMismatch => codes::PATTERN_MISMATCH,
            ErrorKind::MissingRequiredCommand => codes::MISSING_REQUIRED_COMMAND,
        }
    }
}

// ── ValidationError ──────────────────────────────────────────────────────

/// A single line-addressed validation finding.
///
/// Serializes as `{line, command, message}`; the [`ErrorKind`] stays
/// in-process and is reachable through [`ValidationError::code`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// 1-based source line, or 0 for whole-document findings.
    pub line: usize,
    /// Uppercased command keyword the finding belongs to.
    pub command: String,
    /// Human-readable message.
    pub message: String,
    /// Finding category.
    #[serde(skip)]
    pub kind: ErrorKind,
}

impl ValidationError {
    /// Create a finding for the given line and command.
    pub fn new(
        kind: ErrorKind,
        line: usize,
        command: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            line,
            command: command.into(),
            message: message.into(),
            kind,
        }
    }

    /// Create a whole-document finding (reported on line 0).
    pub fn document(kind: ErrorKind, command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(kind, 0, command, message)
    }

    /// Diagnostic code of this finding.
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Returns the human-readable explanation for this finding's code.
    pub fn explain(&self) -> Option<&'static str> {
        explain(self.code())
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.line == 0 {
            write!(f, "error[{}] {}: {}", self.code(), self.command, self.message)
        } else {
            write!(
                f,
                "error[{}] line {} {}: {}",
                self.code(),
                self.line,
                self.command,
                self.message
            )
        }
    }
}

/// Returns the human-readable explanation for a diagnostic code, if known.
///
/// Auto-generated from `data/diagnostics.json` at build time.
pub fn explain(id: &str) -> Option<&'static str> {
    include!(concat!(env!("OUT_DIR"), "/generated_explain.rs"))
}

/// One-line summary for a diagnostic code, if known.
pub fn summary(id: &str) -> Option<&'static str> {
    include!(concat!(env!("OUT_DIR"), "/generated_summary.rs"))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── LineIndex ────────────────────────────────────────────────────────

    #[test]
    fn line_index_single_line() {
        let idx = LineIndex::new("SIZE 50 mm, 30 mm");
        assert_eq!(idx.line_count(), 1);
        assert_eq!(idx.line_span(1), Some(Span::new(0, 17)));
    }

    #[test]
    fn line_index_line_zero_is_document() {
        let idx = LineIndex::new("CLS");
        assert_eq!(idx.line_span(0), None);
    }

    #[test]
    fn line_index_trims_surrounding_whitespace() {
        let idx = LineIndex::new("CLS\n  PRINT 1\r\n");
        assert_eq!(idx.line_count(), 3);
        assert_eq!(idx.line_span(2), Some(Span::new(6, 13)));
        // Trailing empty line after the final newline.
        assert_eq!(idx.line_span(3), Some(Span::new(15, 15)));
    }

    #[test]
    fn line_index_past_end() {
        let idx = LineIndex::new("a\nb");
        assert_eq!(idx.line_span(3), None);
    }

    #[test]
    fn line_index_multibyte_utf8() {
        // '€' is 3 bytes in UTF-8
        let idx = LineIndex::new("€\nTEXT");
        assert_eq!(idx.line_span(1), Some(Span::new(0, 3)));
        assert_eq!(idx.line_span(2), Some(Span::new(4, 8)));
    }

    #[test]
    #[should_panic(expected = "Span end (3) < start (5)")]
    fn span_new_inverted_panics() {
        Span::new(5, 3);
    }

    // ── ValidationError ─────────────────────────────────────────────────

    #[test]
    fn validation_error_serializes_without_kind() {
        let e = ValidationError::new(ErrorKind::ArgumentCount, 2, "SIZE", "needs 2 arguments");
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"line": 2, "command": "SIZE", "message": "needs 2 arguments"})
        );
    }

    #[test]
    fn validation_error_display() {
        let e = ValidationError::new(ErrorKind::RangeViolation, 4, "DENSITY", "out of range");
        assert_eq!(e.to_string(), "error[TSPL1202] line 4 DENSITY: out of range");
        let d = ValidationError::document(
            ErrorKind::MissingRequiredCommand,
            "PRINT",
            "missing required PRINT command",
        );
        assert_eq!(d.line, 0);
        assert_eq!(
            d.to_string(),
            "error[TSPL2001] PRINT: missing required PRINT command"
        );
    }

    // ── explain() exhaustiveness ────────────────────────────────────────

    #[test]
    fn all_kinds_have_explanations() {
        let all = [
            ErrorKind::UnknownCommand,
            ErrorKind::ArgumentCount,
            ErrorKind::ArgumentFormat,
            ErrorKind::RangeViolation,
            ErrorKind::UnitMismatch,
            ErrorKind::PatternMismatch,
            ErrorKind::MissingRequiredCommand,
        ];
        for kind in all {
            assert!(
                explain(kind.code()).is_some(),
                "diagnostic code {} has no explain() entry",
                kind.code()
            );
            assert!(
                summary(kind.code()).is_some_and(|s| !s.is_empty()),
                "diagnostic code {} has no summary() entry",
                kind.code()
            );
        }
    }

    #[test]
    fn explain_unknown_code() {
        assert!(explain("TSPL9999").is_none());
        assert!(summary("TSPL9999").is_none());
    }

    #[test]
    fn summary_is_the_short_form() {
        let short = summary(codes::UNIT_MISMATCH).unwrap();
        let long = explain(codes::UNIT_MISMATCH).unwrap();
        assert!(short.len() < long.len());
        assert!(!short.contains('\n'));
    }
}
