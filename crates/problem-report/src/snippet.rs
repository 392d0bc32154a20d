//! Source snippets and enclosing-scope labels.
//!
//! Both enrichments are best-effort: if the host cannot produce a document's text, the snippet
//! becomes a bracketed placeholder and the scope label is simply omitted.

use crate::diagnostics::{DocumentId, Range};
use crate::host::DocumentStore;
use regex::Regex;
use std::sync::LazyLock;

/// How far above the diagnostic the scope scan may look.
pub const SCOPE_SCAN_LINES: usize = 10;

static SCOPE_INTRODUCER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(function|class|def|const|let|var|module|interface|impl)\s+\w+")
        .expect("scope introducer pattern is valid")
});

/// Render the lines around `range` with a gutter.
///
/// Shows `context` lines above `range.start` and below `range.end`, clamped to the document.
/// The diagnostic's start line is marked with `>`; line numbers are 1-based and right-aligned
/// to the widest number shown.
///
/// ```text
///   9: fn main() {
/// >10:     let x: u32 = "a";
///  11: }
/// ```
pub fn format_snippet(lines: &[String], range: Range, context: usize) -> String {
    let Some(last_line) = lines.len().checked_sub(1) else {
        return String::new();
    };
    let start_line = range.start.line.saturating_sub(context);
    let end_line = last_line.min(range.end.line.saturating_add(context));
    if start_line > end_line {
        return String::new();
    }

    let width = (end_line + 1).to_string().len();
    (start_line..=end_line)
        .map(|i| {
            let marker = if i == range.start.line { '>' } else { ' ' };
            format!("{marker}{:>width$}: {}", i + 1, lines[i])
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The nearest declaration line at or above `line`, trimmed.
///
/// Looks at most [`SCOPE_SCAN_LINES`] lines up. This is a keyword heuristic: it knows nothing
/// about nesting, braces or comments.
pub fn enclosing_scope(lines: &[String], line: usize) -> Option<String> {
    if line >= lines.len() {
        return None;
    }
    let lowest = line.saturating_sub(SCOPE_SCAN_LINES);
    (lowest..=line)
        .rev()
        .map(|i| lines[i].trim())
        .find(|text| SCOPE_INTRODUCER.is_match(text))
        .map(str::to_string)
}

/// [`format_snippet`] over a host document, with a placeholder on read failure.
pub fn load_snippet<D: DocumentStore + ?Sized>(
    documents: &D,
    document: &DocumentId,
    range: Range,
    context: usize,
) -> String {
    match documents.read_lines(document) {
        Ok(lines) => format_snippet(&lines, range, context),
        Err(err) => {
            log::warn!("snippet for {document} unavailable: {err}");
            format!(
                "[Unable to load code from {}: {err}]",
                documents.file_path(document).display()
            )
        }
    }
}

/// [`enclosing_scope`] over a host document; read failures yield no label.
pub fn load_scope<D: DocumentStore + ?Sized>(
    documents: &D,
    document: &DocumentId,
    line: usize,
) -> Option<String> {
    match documents.read_lines(document) {
        Ok(lines) => enclosing_scope(&lines, line),
        Err(err) => {
            log::debug!("scope for {document} unavailable: {err}");
            None
        }
    }
}
