//! Helpers for normalizing `textDocument/hover` results.
//!
//! `Hover.contents` comes in several shapes:
//! - `MarkupContent`: `{ kind, value }`
//! - `MarkedString`: a plain string, or `{ language, value }`
//! - an array of `MarkedString`
//!
//! This module flattens them into [`HoverContent`] entries. Code-like `{ language, value }`
//! entries are re-fenced so the report sees the same Markdown an editor would render.

use crate::lsp_events::lsp_range_from_value;
use problem_report::HoverContent;
use serde_json::Value;

fn marked_string(value: &Value) -> Option<String> {
    if let Some(text) = value.as_str() {
        return Some(text.to_string());
    }

    // MarkupContent: { kind, value }
    if value.get("kind").is_some() {
        return value.get("value")?.as_str().map(str::to_string);
    }

    // MarkedString: { language, value }
    let text = value.get("value")?.as_str()?;
    match value.get("language").and_then(Value::as_str) {
        Some(language) => Some(format!("```{language}\n{text}\n```")),
        None => Some(text.to_string()),
    }
}

/// Normalize a hover result (`Hover | null`).
pub fn hover_from_value(value: &Value) -> Option<HoverContent> {
    if value.is_null() {
        return None;
    }
    let contents = value.get("contents")?;
    let contents: Vec<String> = match contents.as_array() {
        Some(arr) => arr.iter().filter_map(marked_string).collect(),
        None => marked_string(contents).into_iter().collect(),
    };
    let range = value
        .get("range")
        .and_then(lsp_range_from_value)
        .map(Into::into);

    Some(HoverContent::new(contents, range))
}

/// Normalize a hover response that may be a single hover, `null`, or an array of hovers
/// (as aggregated by clients that query several servers).
pub fn hovers_from_value(value: &Value) -> Vec<HoverContent> {
    match value.as_array() {
        Some(arr) => arr.iter().filter_map(hover_from_value).collect(),
        None => hover_from_value(value).into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use problem_report::Range;
    use serde_json::json;

    #[test]
    fn test_markup_content() {
        let v = json!({
            "contents": { "kind": "markdown", "value": "```ts\nconst x: number\n```" },
            "range": { "start": { "line": 2, "character": 6 }, "end": { "line": 2, "character": 7 } }
        });
        let hover = hover_from_value(&v).unwrap();
        assert_eq!(hover.contents, vec!["```ts\nconst x: number\n```".to_string()]);
        assert_eq!(hover.range, Some(Range::from_coords(2, 6, 2, 7)));
    }

    #[test]
    fn test_marked_string_array() {
        let v = json!({
            "contents": [
                { "language": "typescript", "value": "function f(): void" },
                "Runs f."
            ]
        });
        let hover = hover_from_value(&v).unwrap();
        assert_eq!(
            hover.contents,
            vec![
                "```typescript\nfunction f(): void\n```".to_string(),
                "Runs f.".to_string()
            ]
        );
        assert_eq!(hover.range, None);
    }

    #[test]
    fn test_null_and_arrays_of_hovers() {
        assert!(hover_from_value(&Value::Null).is_none());
        assert!(hovers_from_value(&Value::Null).is_empty());
        let v = json!([{ "contents": "a" }, null, { "contents": "b" }]);
        assert_eq!(hovers_from_value(&v).len(), 2);
    }
}
