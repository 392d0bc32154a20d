//! Filtering by severity, file pattern and message text.
//!
//! File patterns are a deliberately small glob dialect: `*` matches any run of characters
//! (including `/`), `?` matches one character, everything else is literal. Matching is anchored
//! and case-insensitive. There are no bracket classes, no `**` special case and no way to escape
//! `*` or `?`.

use crate::diagnostics::{DiagnosticRecord, DiagnosticSeverity};
use crate::error::ReportError;
use crate::host::DocumentStore;
use regex::{Regex, RegexBuilder};

/// Compiled file pattern.
#[derive(Debug, Clone)]
pub struct GlobPattern {
    source: String,
    regex: Regex,
}

impl GlobPattern {
    /// Compile a glob pattern.
    pub fn new(pattern: &str) -> Result<Self, ReportError> {
        let translated = regex::escape(pattern)
            .replace(r"\*", ".*")
            .replace(r"\?", ".");
        let regex = RegexBuilder::new(&format!("^{translated}$"))
            .case_insensitive(true)
            .build()
            .map_err(|source| ReportError::Pattern {
                pattern: pattern.to_string(),
                source,
            })?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// Whether `path` (workspace-relative, `/`-separated) matches.
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

/// Severity choices offered by the interactive filter prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeverityPreset {
    /// No severity filter.
    All,
    /// Errors only.
    ErrorsOnly,
    /// Warnings only.
    WarningsOnly,
    /// Errors and warnings.
    ErrorsAndWarnings,
    /// Information only.
    InformationOnly,
    /// Hints only.
    HintsOnly,
}

impl SeverityPreset {
    /// Presets in prompt order.
    pub const ALL: [SeverityPreset; 6] = [
        SeverityPreset::All,
        SeverityPreset::ErrorsOnly,
        SeverityPreset::WarningsOnly,
        SeverityPreset::ErrorsAndWarnings,
        SeverityPreset::InformationOnly,
        SeverityPreset::HintsOnly,
    ];

    /// Prompt label.
    pub fn label(self) -> &'static str {
        match self {
            SeverityPreset::All => "All severities",
            SeverityPreset::ErrorsOnly => "Errors only",
            SeverityPreset::WarningsOnly => "Warnings only",
            SeverityPreset::ErrorsAndWarnings => "Errors and warnings",
            SeverityPreset::InformationOnly => "Information only",
            SeverityPreset::HintsOnly => "Hints only",
        }
    }

    /// The severity set this preset selects; `None` means unfiltered.
    pub fn severities(self) -> Option<Vec<DiagnosticSeverity>> {
        match self {
            SeverityPreset::All => None,
            SeverityPreset::ErrorsOnly => Some(vec![DiagnosticSeverity::Error]),
            SeverityPreset::WarningsOnly => Some(vec![DiagnosticSeverity::Warning]),
            SeverityPreset::ErrorsAndWarnings => {
                Some(vec![DiagnosticSeverity::Error, DiagnosticSeverity::Warning])
            }
            SeverityPreset::InformationOnly => Some(vec![DiagnosticSeverity::Information]),
            SeverityPreset::HintsOnly => Some(vec![DiagnosticSeverity::Hint]),
        }
    }
}

/// Filter criteria for one report.
///
/// All three parts are optional; an absent part lets every record through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Severities to keep, in the order they were chosen.
    pub severities: Option<Vec<DiagnosticSeverity>>,
    /// Glob matched against the workspace-relative path.
    pub file_pattern: Option<String>,
    /// Case-insensitive message substring.
    pub message_contains: Option<String>,
}

impl FilterCriteria {
    /// Criteria that keep everything.
    pub fn none() -> Self {
        Self::default()
    }

    /// Keep only the given severities. An empty set means "no severity filter".
    pub fn with_severities(mut self, severities: impl IntoIterator<Item = DiagnosticSeverity>) -> Self {
        let severities: Vec<_> = severities.into_iter().collect();
        self.severities = (!severities.is_empty()).then_some(severities);
        self
    }

    /// Keep only files matching `pattern`. An empty pattern means "no file filter".
    pub fn with_file_pattern(mut self, pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        self.file_pattern = (!pattern.is_empty()).then_some(pattern);
        self
    }

    /// Keep only messages containing `text`. Empty text means "no message filter".
    pub fn with_message_contains(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.message_contains = (!text.is_empty()).then_some(text);
        self
    }

    /// Whether any part of the criteria is active.
    pub fn is_active(&self) -> bool {
        self.active_severities().is_some()
            || self.file_pattern.is_some()
            || self.message_contains.is_some()
    }

    pub(crate) fn active_severities(&self) -> Option<&[DiagnosticSeverity]> {
        self.severities.as_deref().filter(|s| !s.is_empty())
    }
}

/// Apply `criteria` to `records`, keeping their relative order.
pub fn filter<D: DocumentStore + ?Sized>(
    records: Vec<DiagnosticRecord>,
    criteria: &FilterCriteria,
    documents: &D,
) -> Result<Vec<DiagnosticRecord>, ReportError> {
    let before = records.len();
    let glob = criteria
        .file_pattern
        .as_deref()
        .filter(|p| !p.is_empty())
        .map(GlobPattern::new)
        .transpose()?;
    let needle = criteria
        .message_contains
        .as_deref()
        .filter(|m| !m.is_empty())
        .map(str::to_lowercase);
    let severities = criteria.active_severities();

    let kept: Vec<DiagnosticRecord> = records
        .into_iter()
        .filter(|record| severities.is_none_or(|set| set.contains(&record.severity)))
        .filter(|record| {
            glob.as_ref()
                .is_none_or(|glob| glob.is_match(&documents.relative_path(&record.document)))
        })
        .filter(|record| {
            needle
                .as_deref()
                .is_none_or(|needle| record.message.to_lowercase().contains(needle))
        })
        .collect();

    log::debug!("filter kept {} of {} diagnostics", kept.len(), before);
    Ok(kept)
}
