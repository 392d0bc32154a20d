//! Report summary block.

use crate::diagnostics::{DiagnosticRecord, DiagnosticSeverity, DocumentId, SeverityCounts};
use crate::host::DocumentStore;
use std::collections::HashMap;

/// The document with the most problems.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotSpot {
    /// Workspace-relative path.
    pub path: String,
    /// Problems in that document.
    pub count: usize,
}

/// Tallies over the filtered record set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Per-severity counts.
    pub counts: SeverityCounts,
    /// Number of distinct documents.
    pub file_count: usize,
    /// Number of records.
    pub total: usize,
    /// Document with the most records; ties go to the first one encountered.
    pub hot_spot: Option<HotSpot>,
}

impl Summary {
    /// Compute the summary of `records`.
    pub fn compute<D: DocumentStore + ?Sized>(records: &[DiagnosticRecord], documents: &D) -> Self {
        let counts: SeverityCounts = records.iter().map(|r| r.severity).collect();

        let mut order: Vec<&DocumentId> = Vec::new();
        let mut per_file: HashMap<&DocumentId, usize> = HashMap::new();
        for record in records {
            let count = per_file.entry(&record.document).or_insert_with(|| {
                order.push(&record.document);
                0
            });
            *count += 1;
        }

        let mut hot_spot: Option<(&DocumentId, usize)> = None;
        for document in &order {
            let count = per_file[document];
            if hot_spot.is_none_or(|(_, best)| count > best) {
                hot_spot = Some((document, count));
            }
        }

        Self {
            counts,
            file_count: order.len(),
            total: records.len(),
            hot_spot: hot_spot.map(|(document, count)| HotSpot {
                path: documents.relative_path(document),
                count,
            }),
        }
    }

    /// Share of the hot spot in percent, rounded to the nearest integer.
    pub fn hot_spot_percentage(&self) -> Option<u32> {
        let hot_spot = self.hot_spot.as_ref()?;
        if self.total == 0 {
            return None;
        }
        Some((hot_spot.count as f64 / self.total as f64 * 100.0).round() as u32)
    }

    /// Render the title plus the `## Summary` list.
    pub fn render(&self, title: &str, use_emoji: bool) -> String {
        let mut out = format!("# {title}\n\n## Summary\n");
        for severity in DiagnosticSeverity::ALL {
            let emoji = if use_emoji { severity.emoji() } else { "" };
            out.push_str(&format!(
                "- {emoji}**{}:** {}\n",
                severity.plural_label(),
                self.counts.get(severity)
            ));
        }
        out.push_str(&format!("- **Total Files:** {}\n", self.file_count));
        out.push_str(&format!("- **Total Problems:** {}\n", self.total));

        if let (Some(hot_spot), Some(percentage)) = (&self.hot_spot, self.hot_spot_percentage())
            && hot_spot.count > 0
        {
            out.push_str(&format!(
                "- **Most Problems:** {} ({} problems, {}% of total)\n",
                hot_spot.path, hot_spot.count, percentage
            ));
        }
        out
    }
}
