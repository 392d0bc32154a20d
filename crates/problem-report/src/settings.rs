//! Report configuration.
//!
//! Hosts keep user settings under the `problemReport` namespace. In a TOML settings file this is
//! a table:
//!
//! ```toml
//! [problemReport]
//! contextLines = 2
//! groupByFile = false
//! ```
//!
//! Missing keys fall back to their defaults; unknown keys are ignored.

use crate::error::SettingsError;
use serde::Deserialize;
use std::path::Path;

/// Default number of source lines shown above and below a diagnostic.
pub const DEFAULT_CONTEXT_LINES: usize = 4;

/// Context lines used by compact reports.
pub const COMPACT_CONTEXT_LINES: usize = 1;

/// Language id for which hover enrichment runs unless configured otherwise.
pub const DEFAULT_HOVER_LANGUAGE_ID: &str = "typescript";

/// User-facing settings, as stored by the host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportSettings {
    /// Source lines shown above and below each diagnostic.
    pub context_lines: usize,
    /// Group by file (`true`) or by severity (`false`).
    pub group_by_file: bool,
    /// Emit the summary block.
    pub add_summary: bool,
    /// Prefix severities with an emoji marker.
    pub use_emoji: bool,
    /// Emit a "Generated on" line.
    pub add_timestamp: bool,
    /// Emit the system information block.
    pub add_system_info: bool,
    /// Language id whose diagnostics get hover enrichment. Empty disables hover enrichment.
    pub hover_language_id: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            context_lines: DEFAULT_CONTEXT_LINES,
            group_by_file: true,
            add_summary: true,
            use_emoji: true,
            add_timestamp: true,
            add_system_info: false,
            hover_language_id: DEFAULT_HOVER_LANGUAGE_ID.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    #[serde(rename = "problemReport", default)]
    problem_report: ReportSettings,
}

/// Load settings from a TOML file. A missing file yields the defaults.
pub fn load_settings(path: &Path) -> Result<ReportSettings, SettingsError> {
    if !path.exists() {
        log::debug!("settings file {} not found, using defaults", path.display());
        return Ok(ReportSettings::default());
    }
    let content = std::fs::read_to_string(path)?;
    load_settings_from_str(&content)
}

/// Parse settings from TOML text containing an optional `[problemReport]` table.
pub fn load_settings_from_str(content: &str) -> Result<ReportSettings, SettingsError> {
    let file: SettingsFile = toml::from_str(content)?;
    Ok(file.problem_report)
}

/// Per-invocation rendering options, derived from [`ReportSettings`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    /// Omit code snippets and hover details.
    pub compact: bool,
    /// Source lines shown above and below each diagnostic.
    pub context_line_count: usize,
    /// Group by file (`true`) or by severity (`false`).
    pub group_by_file: bool,
    /// Emit the summary block.
    pub include_summary: bool,
    /// Emit a "Generated on" line.
    pub include_timestamp: bool,
    /// Emit the system information block.
    pub include_system_info: bool,
    /// Prefix severities with an emoji marker.
    pub use_emoji: bool,
    /// Language id whose diagnostics get hover enrichment, if any.
    pub hover_language_id: Option<String>,
}

impl ReportOptions {
    /// Build options for one report. Compact reports always use a single context line.
    pub fn from_settings(settings: &ReportSettings, compact: bool) -> Self {
        let hover_language_id = Some(settings.hover_language_id.trim())
            .filter(|id| !id.is_empty())
            .map(str::to_string);

        Self {
            compact,
            context_line_count: if compact {
                COMPACT_CONTEXT_LINES
            } else {
                settings.context_lines
            },
            group_by_file: settings.group_by_file,
            include_summary: settings.add_summary,
            include_timestamp: settings.add_timestamp,
            include_system_info: settings.add_system_info,
            use_emoji: settings.use_emoji,
            hover_language_id,
        }
    }
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self::from_settings(&ReportSettings::default(), false)
    }
}
