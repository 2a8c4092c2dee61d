//! Error types for the diagram parser.

use std::fmt;

// ---------------------------------------------------------------------------
// Error kinds
// ---------------------------------------------------------------------------

/// Categories of parse failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A line of the input is not valid UTF-8.
    InvalidUtf8,
    /// A tag definition carries a body that is not a flat JSON object of
    /// scalar values.
    BadTagDefinition,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUtf8 => write!(f, "invalid UTF-8"),
            Self::BadTagDefinition => write!(f, "bad tag definition"),
        }
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// An error produced while parsing a diagram.
///
/// Internal inconsistencies (discontiguous point lists, re-expansion of an
/// unvisited cell) are not represented here: those cannot occur for any
/// input and are asserted with a panic instead.
#[derive(Debug, Clone)]
pub struct ParseError {
    /// Machine-readable error kind.
    pub kind: ParseErrorKind,
    /// Human-readable message.
    pub message: String,
    /// 1-based input line, when the failure is attributable to one.
    pub line: Option<usize>,
}

impl ParseError {
    /// Create a new error without a line number.
    #[must_use]
    pub fn new(kind: ParseErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            line: None,
        }
    }

    /// Attach a 1-based line number.
    #[must_use]
    pub const fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(line) = self.line {
            write!(f, "line {line}: ")?;
        }
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseError {}

/// Convenience alias for results using [`ParseError`].
pub type ParseResult<T> = Result<T, ParseError>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_with_line() {
        let err = ParseError::new(ParseErrorKind::InvalidUtf8, "bad byte 0xff").with_line(3);
        let s = format!("{err}");
        assert!(s.contains("line 3:"), "missing line: {s}");
        assert!(s.contains("bad byte 0xff"), "missing message: {s}");
    }

    #[test]
    fn error_display_without_line() {
        let err = ParseError::new(ParseErrorKind::BadTagDefinition, "not an object");
        let s = format!("{err}");
        assert!(!s.contains("line"), "should not carry a line: {s}");
        assert!(s.contains("not an object"), "missing message: {s}");
    }
}
