//! Diagnostic collection.

use crate::diagnostics::DiagnosticRecord;
use crate::host::DiagnosticSource;

/// Flatten every document's diagnostics into one list of records.
///
/// No filtering and no ordering beyond the host's own enumeration order.
pub fn collect_all<S: DiagnosticSource + ?Sized>(source: &S) -> Vec<DiagnosticRecord> {
    let records: Vec<DiagnosticRecord> = source
        .diagnostics()
        .into_iter()
        .flat_map(|(document, diagnostics)| {
            diagnostics
                .into_iter()
                .map(move |diagnostic| DiagnosticRecord::new(document.clone(), diagnostic))
        })
        .collect();
    log::debug!("collected {} diagnostics", records.len());
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{Diagnostic, DiagnosticSeverity, DocumentId, Range};

    struct Fixed(Vec<(DocumentId, Vec<Diagnostic>)>);

    impl DiagnosticSource for Fixed {
        fn diagnostics(&self) -> Vec<(DocumentId, Vec<Diagnostic>)> {
            self.0.clone()
        }
    }

    fn diag(line: usize, message: &str) -> Diagnostic {
        Diagnostic::new(
            Range::from_coords(line, 0, line, 1),
            DiagnosticSeverity::Warning,
            message,
        )
    }

    #[test]
    fn test_collect_flattens_in_host_order() {
        let source = Fixed(vec![
            (DocumentId::new("file:///b.ts"), vec![diag(3, "b1"), diag(1, "b2")]),
            (DocumentId::new("file:///a.ts"), vec![]),
            (DocumentId::new("file:///c.ts"), vec![diag(0, "c1")]),
        ]);
        let records = collect_all(&source);
        let messages: Vec<_> = records.iter().map(|r| r.message.as_str()).collect();
        assert_eq!(messages, vec!["b1", "b2", "c1"]);
        assert_eq!(records[2].document, DocumentId::new("file:///c.ts"));
    }

    #[test]
    fn test_collect_empty_registry() {
        assert!(collect_all(&Fixed(Vec::new())).is_empty());
    }
}
