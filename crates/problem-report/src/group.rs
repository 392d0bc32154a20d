//! Grouping and in-group ordering.

use crate::diagnostics::{DiagnosticRecord, DiagnosticSeverity, DocumentId};
use std::collections::HashMap;

/// What a [`Group`] shares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupKey {
    /// All records belong to this document.
    File(DocumentId),
    /// All records have this severity.
    Severity(DiagnosticSeverity),
}

/// An ordered run of records sharing a [`GroupKey`].
///
/// Records are sorted by severity (worst first), then by start line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Shared key.
    pub key: GroupKey,
    /// Records in report order.
    pub records: Vec<DiagnosticRecord>,
}

impl Group {
    fn new(key: GroupKey, mut records: Vec<DiagnosticRecord>) -> Self {
        // Stable: equal (severity, line) keep their input order.
        records.sort_by_key(DiagnosticRecord::sort_key);
        Self { key, records }
    }

    /// Number of records in the group.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the group has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Group by file (`by_file = true`) or by severity.
pub fn group(records: Vec<DiagnosticRecord>, by_file: bool) -> Vec<Group> {
    if by_file {
        group_by_file(records)
    } else {
        group_by_severity(records)
    }
}

/// One group per document, in order of each document's first record.
pub fn group_by_file(records: Vec<DiagnosticRecord>) -> Vec<Group> {
    let mut index: HashMap<DocumentId, usize> = HashMap::new();
    let mut buckets: Vec<(DocumentId, Vec<DiagnosticRecord>)> = Vec::new();

    for record in records {
        let slot = *index.entry(record.document.clone()).or_insert_with(|| {
            buckets.push((record.document.clone(), Vec::new()));
            buckets.len() - 1
        });
        buckets[slot].1.push(record);
    }

    buckets
        .into_iter()
        .map(|(document, records)| Group::new(GroupKey::File(document), records))
        .collect()
}

/// Up to four groups in the order Error, Warning, Information, Hint; empty ones are omitted.
pub fn group_by_severity(records: Vec<DiagnosticRecord>) -> Vec<Group> {
    let mut buckets: [Vec<DiagnosticRecord>; 4] = Default::default();
    for record in records {
        buckets[record.severity as usize].push(record);
    }

    DiagnosticSeverity::ALL
        .into_iter()
        .zip(buckets)
        .filter(|(_, records)| !records.is_empty())
        .map(|(severity, records)| Group::new(GroupKey::Severity(severity), records))
        .collect()
}
