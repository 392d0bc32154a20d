use pretty_assertions::assert_eq;
use problem_report::{
    DiagnosticRegistry, DiagnosticSeverity, DiagnosticSource, DocumentId, Position, Range,
    StatusIndicator,
};
use problem_report_lsp::{DumpError, load_diagnostics_dump, load_hover_dump};
use serde_json::json;

fn range(line: u64, start: u64, end: u64) -> serde_json::Value {
    json!({
        "start": { "line": line, "character": start },
        "end": { "line": line, "character": end }
    })
}

#[test]
fn test_dump_mixes_params_and_notifications() {
    let dump = json!([
        {
            "uri": "file:///w/a.ts",
            "diagnostics": [
                { "range": range(0, 0, 3), "severity": 1, "message": "first" }
            ]
        },
        {
            "jsonrpc": "2.0",
            "method": "textDocument/publishDiagnostics",
            "params": {
                "uri": "file:///w/b.ts",
                "diagnostics": [
                    { "range": range(4, 2, 6), "severity": 3, "message": "info" },
                    { "range": range(5, 0, 1), "message": "no severity" }
                ]
            }
        },
        { "jsonrpc": "2.0", "method": "window/logMessage", "params": { "type": 3, "message": "x" } }
    ]);

    let mut registry = DiagnosticRegistry::new();
    let applied = load_diagnostics_dump(&dump, &mut registry).unwrap();
    assert_eq!(applied, 2);

    let b = registry.get(&DocumentId::new("file:///w/b.ts"));
    assert_eq!(b.len(), 2);
    assert_eq!(b[0].severity, DiagnosticSeverity::Information);
    assert_eq!(b[0].range, Range::from_coords(4, 2, 4, 6));
    assert_eq!(b[1].severity, DiagnosticSeverity::Error);

    let counts = registry.counts();
    assert_eq!((counts.errors, counts.information), (2, 1));
}

#[test]
fn test_later_publish_replaces_and_empty_publish_clears() {
    let dump = json!([
        { "uri": "file:///w/a.ts", "diagnostics": [{ "range": range(0, 0, 1), "severity": 2, "message": "old" }] },
        { "uri": "file:///w/c.ts", "diagnostics": [{ "range": range(0, 0, 1), "severity": 2, "message": "c" }] },
        { "uri": "file:///w/a.ts", "diagnostics": [{ "range": range(1, 0, 1), "severity": 1, "message": "new" }] },
        { "uri": "file:///w/c.ts", "diagnostics": [] }
    ]);

    let mut registry = DiagnosticRegistry::new();
    let indicator = StatusIndicator::attach(&mut registry);
    load_diagnostics_dump(&dump, &mut registry).unwrap();

    let documents = registry.diagnostics();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].1[0].message, "new");
    assert_eq!(
        indicator.lock().unwrap().text(),
        Some("$(error) 1 $(warning) 0")
    );
}

#[test]
fn test_dump_must_be_an_array() {
    let mut registry = DiagnosticRegistry::new();
    let err = load_diagnostics_dump(&json!({ "uri": "file:///x" }), &mut registry).unwrap_err();
    assert!(matches!(err, DumpError::NotAnArray(_)));
}

#[test]
fn test_hover_dump_entries() {
    let dump = json!([
        {
            "uri": "file:///w/a.ts",
            "position": { "line": 0, "character": 6 },
            "hover": {
                "contents": { "kind": "markdown", "value": "const a: 1" },
                "range": range(0, 6, 7)
            }
        },
        { "uri": "file:///w/a.ts" }
    ]);
    let entries = load_hover_dump(&dump).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].position, Position::new(0, 6));
    assert_eq!(entries[0].hovers[0].contents, vec!["const a: 1".to_string()]);
    assert_eq!(entries[0].hovers[0].range, Some(Range::from_coords(0, 6, 0, 7)));
}
