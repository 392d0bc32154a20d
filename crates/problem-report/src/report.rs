//! Report generation: collect → filter → group → render.

use crate::collect::collect_all;
use crate::error::ReportError;
use crate::filter::{FilterCriteria, filter};
use crate::group::group;
use crate::host::ReportHost;
use crate::html::markdown_to_html;
use crate::render::{NO_PROBLEMS_NOTICE, ReportHeader, render_markdown};
use crate::settings::ReportOptions;
use crate::summary::Summary;

/// What one report should contain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportRequest {
    /// Omit code snippets (context shrinks to one line).
    pub compact: bool,
    /// Filters to apply before grouping.
    pub criteria: FilterCriteria,
}

impl ReportRequest {
    /// The default report: standard layout, no filters.
    pub fn full() -> Self {
        Self::default()
    }

    /// Compact layout, no filters.
    pub fn compact() -> Self {
        Self {
            compact: true,
            criteria: FilterCriteria::none(),
        }
    }

    /// Standard layout with the given filters.
    pub fn filtered(criteria: FilterCriteria) -> Self {
        Self {
            compact: false,
            criteria,
        }
    }
}

/// Generate the Markdown report for `request`.
///
/// When no diagnostic survives filtering the result is exactly [`NO_PROBLEMS_NOTICE`].
pub fn generate_markdown<H: ReportHost + ?Sized>(
    host: &H,
    request: &ReportRequest,
) -> Result<String, ReportError> {
    let options = ReportOptions::from_settings(&host.settings(), request.compact);
    generate_markdown_with_options(host, request, &options)
}

/// [`generate_markdown`] with explicit options instead of host settings.
pub fn generate_markdown_with_options<H: ReportHost + ?Sized>(
    host: &H,
    request: &ReportRequest,
    options: &ReportOptions,
) -> Result<String, ReportError> {
    let records = filter(collect_all(host), &request.criteria, host)?;
    if records.is_empty() {
        log::info!("no diagnostics match the report criteria");
        return Ok(NO_PROBLEMS_NOTICE.to_string());
    }

    let summary = options
        .include_summary
        .then(|| Summary::compute(&records, host));
    let groups = group(records, options.group_by_file);
    log::debug!("rendering {} groups", groups.len());

    let header = ReportHeader {
        summary,
        host_info: host.host_info(),
        generated_at: host.now(),
        criteria: &request.criteria,
    };
    Ok(render_markdown(host, &groups, &header, options))
}

/// Generate the report as a styled HTML document.
pub fn generate_html<H: ReportHost + ?Sized>(
    host: &H,
    request: &ReportRequest,
) -> Result<String, ReportError> {
    Ok(markdown_to_html(&generate_markdown(host, request)?))
}
