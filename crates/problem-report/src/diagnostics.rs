//! Diagnostics data model.
//!
//! This module holds the structured problems (errors/warnings/information/hints) a host reports
//! for its open documents. Records are plain values: they are produced by a
//! [`DiagnosticSource`](crate::host::DiagnosticSource), consumed by one report generation, and
//! dropped afterwards.

use std::cmp::Ordering;
use std::fmt;

/// Identity of a document known to the host.
///
/// Hosts typically use a URI (`file:///...`). Two records belong to the same document iff their
/// ids compare equal; the id is never re-derived from a display path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(String);

impl DocumentId {
    /// Create a document id from the host's identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for DocumentId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// A zero-based `(line, character)` coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based character offset within the line.
    pub character: usize,
}

impl Position {
    /// Create a new position.
    pub fn new(line: usize, character: usize) -> Self {
        Self { line, character }
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line
            .cmp(&other.line)
            .then_with(|| self.character.cmp(&other.character))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A `start..end` range in `(line, character)` coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    /// Range start position (inclusive).
    pub start: Position,
    /// Range end position (exclusive).
    pub end: Position,
}

impl Range {
    /// Create a new range.
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Shorthand for a range given as four coordinates.
    pub fn from_coords(
        start_line: usize,
        start_character: usize,
        end_line: usize,
        end_character: usize,
    ) -> Self {
        Self::new(
            Position::new(start_line, start_character),
            Position::new(end_line, end_character),
        )
    }
}

/// Diagnostic severity levels, ordered "worst first".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiagnosticSeverity {
    /// Error diagnostics.
    Error,
    /// Warning diagnostics.
    Warning,
    /// Informational diagnostics.
    Information,
    /// Hint diagnostics.
    Hint,
}

impl DiagnosticSeverity {
    /// All severities in report order.
    pub const ALL: [DiagnosticSeverity; 4] = [
        DiagnosticSeverity::Error,
        DiagnosticSeverity::Warning,
        DiagnosticSeverity::Information,
        DiagnosticSeverity::Hint,
    ];

    /// Singular label (`"Error"`, `"Warning"`, ...).
    pub fn label(self) -> &'static str {
        match self {
            DiagnosticSeverity::Error => "Error",
            DiagnosticSeverity::Warning => "Warning",
            DiagnosticSeverity::Information => "Information",
            DiagnosticSeverity::Hint => "Hint",
        }
    }

    /// Plural label used for section headers and summary lines.
    pub fn plural_label(self) -> &'static str {
        match self {
            DiagnosticSeverity::Error => "Errors",
            DiagnosticSeverity::Warning => "Warnings",
            DiagnosticSeverity::Information => "Information",
            DiagnosticSeverity::Hint => "Hints",
        }
    }

    /// Emoji marker, including the trailing space.
    pub fn emoji(self) -> &'static str {
        match self {
            DiagnosticSeverity::Error => "🔴 ",
            DiagnosticSeverity::Warning => "🟠 ",
            DiagnosticSeverity::Information => "🔵 ",
            DiagnosticSeverity::Hint => "⚪ ",
        }
    }
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single diagnostic as reported by the host for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Diagnostic range.
    pub range: Range,
    /// Diagnostic severity.
    pub severity: DiagnosticSeverity,
    /// Diagnostic message (may span several lines).
    pub message: String,
}

impl Diagnostic {
    /// Create a new diagnostic.
    pub fn new(range: Range, severity: DiagnosticSeverity, message: impl Into<String>) -> Self {
        Self {
            range,
            severity,
            message: message.into(),
        }
    }
}

/// A diagnostic paired with the document it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticRecord {
    /// Owning document.
    pub document: DocumentId,
    /// Diagnostic range.
    pub range: Range,
    /// Diagnostic severity.
    pub severity: DiagnosticSeverity,
    /// Diagnostic message (may span several lines).
    pub message: String,
}

impl DiagnosticRecord {
    /// Attach a diagnostic to its document.
    pub fn new(document: DocumentId, diagnostic: Diagnostic) -> Self {
        Self {
            document,
            range: diagnostic.range,
            severity: diagnostic.severity,
            message: diagnostic.message,
        }
    }

    /// The first line of the message; anything after the first newline is dropped.
    pub fn headline(&self) -> &str {
        self.message.split('\n').next().unwrap_or_default()
    }

    /// In-group ordering key: severity first, then start line.
    pub fn sort_key(&self) -> (DiagnosticSeverity, usize) {
        (self.severity, self.range.start.line)
    }
}

/// Per-severity tallies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeverityCounts {
    /// Number of errors.
    pub errors: usize,
    /// Number of warnings.
    pub warnings: usize,
    /// Number of informational diagnostics.
    pub information: usize,
    /// Number of hints.
    pub hints: usize,
}

impl SeverityCounts {
    /// Count one severity.
    pub fn add(&mut self, severity: DiagnosticSeverity) {
        match severity {
            DiagnosticSeverity::Error => self.errors += 1,
            DiagnosticSeverity::Warning => self.warnings += 1,
            DiagnosticSeverity::Information => self.information += 1,
            DiagnosticSeverity::Hint => self.hints += 1,
        }
    }

    /// The tally for one severity.
    pub fn get(&self, severity: DiagnosticSeverity) -> usize {
        match severity {
            DiagnosticSeverity::Error => self.errors,
            DiagnosticSeverity::Warning => self.warnings,
            DiagnosticSeverity::Information => self.information,
            DiagnosticSeverity::Hint => self.hints,
        }
    }

    /// Sum of all tallies.
    pub fn total(&self) -> usize {
        self.errors + self.warnings + self.information + self.hints
    }
}

impl FromIterator<DiagnosticSeverity> for SeverityCounts {
    fn from_iter<I: IntoIterator<Item = DiagnosticSeverity>>(iter: I) -> Self {
        let mut counts = Self::default();
        for severity in iter {
            counts.add(severity);
        }
        counts
    }
}
