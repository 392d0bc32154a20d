//! Markdown renderer.
//!
//! Layout of a full report (every block is optional except the groups):
//!
//! ~~~text
//! # <Host> Problems Report          <- title, or the summary block
//! Generated on: ...                 <- timestamp
//! ## System Information             <- system info
//! ## Filters Applied                <- only when a filter is active
//! ## File: src/a.ts                 <- one header per group
//! #### 🔴 Error                      <- one entry per diagnostic
//! **src/a.ts** (Line 3, Col 5) in `function f() {`: message
//! ```ts
//! ...snippet...
//! ```
//! ~~~

use crate::diagnostics::DiagnosticRecord;
use crate::filter::FilterCriteria;
use crate::group::{Group, GroupKey};
use crate::host::{DocumentStore, HostInfo, HoverProvider};
use crate::hover::enrich_record;
use crate::settings::ReportOptions;
use crate::snippet::{load_scope, load_snippet};
use crate::summary::Summary;
use chrono::{DateTime, Local};

/// The whole report when nothing survives filtering.
pub const NO_PROBLEMS_NOTICE: &str = "## No problems found matching your criteria";

/// Everything above the groups.
#[derive(Debug, Clone)]
pub struct ReportHeader<'a> {
    /// Precomputed summary over the filtered set, when enabled.
    pub summary: Option<Summary>,
    /// Host product and workspace.
    pub host_info: HostInfo,
    /// Generation time.
    pub generated_at: DateTime<Local>,
    /// Criteria the records were filtered with.
    pub criteria: &'a FilterCriteria,
}

impl ReportHeader<'_> {
    /// `"<Host> Problems Report"`.
    pub fn title(&self) -> String {
        format!("{} Problems Report", self.host_info.name)
    }
}

/// Render grouped records as Markdown.
pub fn render_markdown<H>(
    host: &H,
    groups: &[Group],
    header: &ReportHeader<'_>,
    options: &ReportOptions,
) -> String
where
    H: DocumentStore + HoverProvider + ?Sized,
{
    let mut parts: Vec<String> = Vec::new();

    match &header.summary {
        Some(summary) => parts.push(summary.render(&header.title(), options.use_emoji)),
        None => parts.push(format!("# {}\n", header.title())),
    }

    if options.include_timestamp {
        parts.push(render_timestamp(&header.generated_at));
    }

    if options.include_system_info {
        parts.push(render_system_info(&header.host_info));
    }

    if header.criteria.is_active() {
        parts.extend(render_filters(header.criteria));
    }

    for group in groups {
        parts.push(render_group_header(host, group, options));
        for record in &group.records {
            parts.push(render_entry(host, record, options));
        }
    }

    parts.join("\n")
}

fn render_timestamp(at: &DateTime<Local>) -> String {
    format!(
        "Generated on: {} at {}\n",
        at.format("%Y-%m-%d"),
        at.format("%H:%M:%S")
    )
}

fn render_system_info(info: &HostInfo) -> String {
    format!(
        "## System Information\n- {}: {}\n- OS: {} {}\n- Workspace: {}\n",
        info.name,
        info.version,
        std::env::consts::OS,
        std::env::consts::ARCH,
        info.workspace_name.as_deref().unwrap_or("No workspace")
    )
}

fn render_filters(criteria: &FilterCriteria) -> Vec<String> {
    let mut lines = vec!["## Filters Applied".to_string()];
    if let Some(severities) = criteria.active_severities() {
        let names: Vec<&str> = severities.iter().map(|s| s.label()).collect();
        lines.push(format!("- Severity: {} only", names.join(", ")));
    }
    if let Some(pattern) = &criteria.file_pattern {
        lines.push(format!("- File Pattern: `{pattern}`"));
    }
    if let Some(text) = &criteria.message_contains {
        lines.push(format!("- Message Contains: \"{text}\""));
    }
    lines.push(String::new());
    lines
}

fn render_group_header<D: DocumentStore + ?Sized>(
    documents: &D,
    group: &Group,
    options: &ReportOptions,
) -> String {
    match &group.key {
        GroupKey::File(document) => format!("## File: {}\n", documents.relative_path(document)),
        GroupKey::Severity(severity) => {
            let emoji = if options.use_emoji { severity.emoji() } else { "" };
            format!("## {emoji}{} ({})\n", severity.plural_label(), group.len())
        }
    }
}

/// Render one diagnostic entry.
pub fn render_entry<H>(host: &H, record: &DiagnosticRecord, options: &ReportOptions) -> String
where
    H: DocumentStore + HoverProvider + ?Sized,
{
    let emoji = if options.use_emoji {
        record.severity.emoji()
    } else {
        ""
    };
    let scope = load_scope(host, &record.document, record.range.start.line)
        .map(|line| format!(" in `{line}`"))
        .unwrap_or_default();

    let mut entry = format!(
        "#### {emoji}{}\n**{}** (Line {}, Col {}){scope}: {}",
        record.severity.label(),
        host.relative_path(&record.document),
        record.range.start.line + 1,
        record.range.start.character + 1,
        record.headline()
    );

    if options.compact {
        return entry;
    }

    let extension = host
        .file_path(&record.document)
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_default();
    let snippet = load_snippet(
        host,
        &record.document,
        record.range,
        options.context_line_count,
    );
    entry.push_str(&format!("\n```{extension}\n{snippet}\n```"));

    if let Some(fragment) = enrich_record(host, record, options) {
        entry.push('\n');
        entry.push_str(fragment.trim_end());
    }
    entry
}
