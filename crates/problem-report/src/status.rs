//! Status indicator showing live error/warning counts.

use crate::commands::Command;
use crate::diagnostics::SeverityCounts;
use crate::host::DiagnosticSource;
use crate::registry::DiagnosticRegistry;
use std::sync::{Arc, Mutex};

/// Tooltip shown on the indicator.
pub const STATUS_TOOLTIP: &str = "Click to copy problems as Markdown";

/// A single status element: `$(error) 2 $(warning) 5`, hidden when both counts are zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusIndicator {
    counts: SeverityCounts,
    text: String,
    visible: bool,
}

/// A status indicator shared with a registry subscription.
pub type SharedStatusIndicator = Arc<Mutex<StatusIndicator>>;

impl StatusIndicator {
    /// Create a hidden indicator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an indicator already reflecting `source`.
    pub fn from_source<S: DiagnosticSource + ?Sized>(source: &S) -> Self {
        let mut indicator = Self::new();
        indicator.refresh(source);
        indicator
    }

    /// Create an indicator that follows `registry`: it reflects the current contents now and is
    /// updated on every subsequent registry change.
    pub fn attach(registry: &mut DiagnosticRegistry) -> SharedStatusIndicator {
        let mut indicator = Self::new();
        indicator.update(registry.counts());
        let shared = Arc::new(Mutex::new(indicator));
        let subscriber = Arc::clone(&shared);
        registry.subscribe(move |change| match subscriber.lock() {
            Ok(mut indicator) => indicator.update(change.counts),
            Err(_) => log::warn!("status indicator lock poisoned; update skipped"),
        });
        shared
    }

    /// Recount from a diagnostic source.
    pub fn refresh<S: DiagnosticSource + ?Sized>(&mut self, source: &S) {
        let counts: SeverityCounts = source
            .diagnostics()
            .iter()
            .flat_map(|(_, diagnostics)| diagnostics.iter().map(|d| d.severity))
            .collect();
        self.update(counts);
    }

    /// Apply new counts. Only errors and warnings are displayed.
    pub fn update(&mut self, counts: SeverityCounts) {
        self.counts = counts;
        self.visible = counts.errors > 0 || counts.warnings > 0;
        self.text = if self.visible {
            format!("$(error) {} $(warning) {}", counts.errors, counts.warnings)
        } else {
            String::new()
        };
    }

    /// Displayed text, or `None` while hidden.
    pub fn text(&self) -> Option<&str> {
        self.visible.then_some(self.text.as_str())
    }

    /// Whether the indicator is shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Counts the indicator was last updated with.
    pub fn counts(&self) -> SeverityCounts {
        self.counts
    }

    /// The command triggered by clicking the indicator.
    pub fn command(&self) -> Command {
        Command::CopyAsMarkdown
    }

    /// Tooltip text.
    pub fn tooltip(&self) -> &'static str {
        STATUS_TOOLTIP
    }
}
