//! Hover enrichment.
//!
//! For a diagnostic's line (or a whole document) this module probes the host's hover provider at
//! every token-looking position and keeps each distinct hover text once, together with a short
//! excerpt of the source it describes. Probes run one at a time; a failing probe contributes
//! nothing.

use crate::diagnostics::{DiagnosticRecord, DocumentId, Position, Range};
use crate::host::{DocumentStore, HoverProvider};
use crate::settings::ReportOptions;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Maximum number of positions probed when scanning a whole document.
///
/// Single-line scans are not capped.
pub const DOCUMENT_PROBE_LIMIT: usize = 500;

/// Characters of source shown on each side of a hover's range.
pub const NEIGHBORHOOD_CHARS: usize = 10;

const PUNCTUATION: &[char] = &['.', ',', ':', ';', '(', ')', '[', ']', '{', '}', '<', '>', '='];

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z_$][A-Za-z0-9_$]*").expect("identifier pattern is valid"));

/// Which part of a document to probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverScope {
    /// One zero-based line, uncapped.
    Line(usize),
    /// Every line, capped at [`DOCUMENT_PROBE_LIMIT`] positions.
    Document,
}

/// One distinct hover text and where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverContext {
    /// The hover text, trimmed.
    pub text: String,
    /// Source excerpt around the hover's range.
    pub snippet: String,
    /// 1-based `Line L, Col C` label of the hover's range start.
    pub position_label: String,
}

/// Token start positions (identifiers and punctuation) within `scope`, in document order.
pub fn token_positions(lines: &[String], scope: HoverScope) -> Vec<Position> {
    let line_numbers = match scope {
        HoverScope::Line(line) if line < lines.len() => line..line + 1,
        HoverScope::Line(_) => 0..0,
        HoverScope::Document => 0..lines.len(),
    };

    let mut positions = Vec::new();
    for line in line_numbers {
        let text = &lines[line];
        let mut columns: Vec<usize> = IDENTIFIER
            .find_iter(text)
            .map(|m| text[..m.start()].chars().count())
            .collect();
        columns.extend(
            text.chars()
                .enumerate()
                .filter(|(_, ch)| PUNCTUATION.contains(ch))
                .map(|(col, _)| col),
        );
        columns.sort_unstable();
        columns.dedup();
        positions.extend(columns.into_iter().map(|col| Position::new(line, col)));

        if scope == HoverScope::Document && positions.len() >= DOCUMENT_PROBE_LIMIT {
            positions.truncate(DOCUMENT_PROBE_LIMIT);
            break;
        }
    }
    positions
}

/// Probe every token position in `scope` and keep each distinct hover text once.
pub fn collect_hover_contexts<H: HoverProvider + ?Sized>(
    hovers: &H,
    document: &DocumentId,
    lines: &[String],
    scope: HoverScope,
) -> Vec<HoverContext> {
    let mut seen = HashSet::new();
    let mut contexts = Vec::new();

    for position in token_positions(lines, scope) {
        let answers = match hovers.hover(document, position) {
            Ok(answers) => answers,
            Err(err) => {
                log::trace!(
                    "hover at {}:{}:{} failed: {err}",
                    document,
                    position.line,
                    position.character
                );
                continue;
            }
        };

        for answer in answers {
            let range = answer.range.unwrap_or(Range::new(position, position));
            for text in &answer.contents {
                let text = text.trim();
                if text.is_empty() || !seen.insert(text.to_string()) {
                    continue;
                }
                contexts.push(HoverContext {
                    text: text.to_string(),
                    snippet: neighborhood(lines, range),
                    position_label: format!(
                        "Line {}, Col {}",
                        range.start.line + 1,
                        range.start.character + 1
                    ),
                });
            }
        }
    }
    contexts
}

fn neighborhood(lines: &[String], range: Range) -> String {
    let Some(line) = lines.get(range.start.line) else {
        return String::new();
    };
    let chars: Vec<char> = line.chars().collect();
    let end = if range.end.line == range.start.line {
        range.end.character.max(range.start.character)
    } else {
        chars.len()
    };
    let from = range.start.character.saturating_sub(NEIGHBORHOOD_CHARS).min(chars.len());
    let to = end.saturating_add(NEIGHBORHOOD_CHARS).min(chars.len());
    chars[from..to.max(from)]
        .iter()
        .collect::<String>()
        .trim()
        .to_string()
}

/// Render contexts as a Markdown list; empty input renders nothing.
pub fn render_hover_fragment(contexts: &[HoverContext]) -> String {
    if contexts.is_empty() {
        return String::new();
    }
    let mut out = String::from("**Hover Information:**\n");
    for context in contexts {
        out.push_str(&format!(
            "- {} ({}): {}\n",
            inline_code(&context.snippet),
            context.position_label,
            flatten(&context.text)
        ));
    }
    out
}

fn inline_code(text: &str) -> String {
    if text.contains('`') {
        format!("`` {text} ``")
    } else {
        format!("`{text}`")
    }
}

// Hover text is often fenced Markdown; keep it on one list line.
fn flatten(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("```"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Hover fragment for one diagnostic's line, if the document's language qualifies.
pub fn enrich_record<H>(host: &H, record: &DiagnosticRecord, options: &ReportOptions) -> Option<String>
where
    H: DocumentStore + HoverProvider + ?Sized,
{
    let wanted = options.hover_language_id.as_deref()?;
    if host.language_id(&record.document).as_deref() != Some(wanted) {
        return None;
    }
    let lines = host.read_lines(&record.document).ok()?;
    let contexts = collect_hover_contexts(
        host,
        &record.document,
        &lines,
        HoverScope::Line(record.range.start.line),
    );
    Some(render_hover_fragment(&contexts)).filter(|fragment| !fragment.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HostError;
    use crate::host::HoverContent;
    use std::cell::RefCell;

    struct Scripted {
        calls: RefCell<Vec<Position>>,
    }

    impl HoverProvider for Scripted {
        fn hover(&self, _: &DocumentId, position: Position) -> Result<Vec<HoverContent>, HostError> {
            self.calls.borrow_mut().push(position);
            match position.character {
                0 => Ok(vec![HoverContent::new(
                    vec!["let value: number".to_string(), "  ".to_string()],
                    Some(Range::from_coords(position.line, 4, position.line, 9)),
                )]),
                4 => Ok(vec![HoverContent::new(vec!["let value: number".to_string()], None)]),
                10 => Err(HostError::Hover("boom".to_string())),
                _ => Ok(Vec::new()),
            }
        }
    }

    fn lines(text: &str) -> Vec<String> {
        text.split('\n').map(str::to_string).collect()
    }

    #[test]
    fn test_token_positions_identifiers_and_punctuation() {
        let doc = lines("foo.bar(x, 1);");
        let cols: Vec<_> = token_positions(&doc, HoverScope::Line(0))
            .into_iter()
            .map(|p| p.character)
            .collect();
        assert_eq!(cols, vec![0, 3, 4, 7, 8, 9, 12, 13]);
    }

    #[test]
    fn test_token_positions_use_char_columns() {
        let doc = lines("é.x");
        let cols: Vec<_> = token_positions(&doc, HoverScope::Line(0))
            .into_iter()
            .map(|p| p.character)
            .collect();
        assert_eq!(cols, vec![1, 2]);
    }

    #[test]
    fn test_document_scan_is_capped_but_line_scan_is_not() {
        let long_line = "a,".repeat(400);
        let doc = vec![long_line.clone(), long_line];
        assert_eq!(token_positions(&doc, HoverScope::Line(0)).len(), 800);
        assert_eq!(token_positions(&doc, HoverScope::Document).len(), DOCUMENT_PROBE_LIMIT);
    }

    #[test]
    fn test_out_of_range_line_probes_nothing() {
        assert!(token_positions(&lines("x"), HoverScope::Line(3)).is_empty());
    }

    #[test]
    fn test_contexts_are_unique_and_failures_skipped() {
        let provider = Scripted {
            calls: RefCell::new(Vec::new()),
        };
        let doc = lines("let value = 1;");
        let contexts = collect_hover_contexts(
            &provider,
            &DocumentId::new("file:///a.ts"),
            &doc,
            HoverScope::Line(0),
        );
        assert_eq!(provider.calls.borrow().len(), 4);
        assert_eq!(contexts.len(), 1);
        assert_eq!(contexts[0].text, "let value: number");
        assert_eq!(contexts[0].snippet, "let value = 1;");
        assert_eq!(contexts[0].position_label, "Line 1, Col 5");
    }

    #[test]
    fn test_fragment_flattens_fenced_hover_text() {
        let fragment = render_hover_fragment(&[HoverContext {
            text: "```typescript\nconst x: number\n```\nThe answer.".to_string(),
            snippet: "const x = 42".to_string(),
            position_label: "Line 2, Col 7".to_string(),
        }]);
        assert_eq!(
            fragment,
            "**Hover Information:**\n- `const x = 42` (Line 2, Col 7): const x: number The answer.\n"
        );
        assert_eq!(render_hover_fragment(&[]), "");
    }
}
