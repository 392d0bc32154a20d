//! Host capability traits.
//!
//! `problem-report` does not own any diagnostics, documents, clipboard or UI. A host (editor,
//! IDE, terminal tool, test harness) provides them through the traits below:
//!
//! | capability               | trait                 |
//! |--------------------------|-----------------------|
//! | enumerate diagnostics    | [`DiagnosticSource`]  |
//! | read document lines      | [`DocumentStore`]     |
//! | query hover at position  | [`HoverProvider`]     |
//! | write clipboard text     | [`Clipboard`]         |
//! | prompt the user          | [`Prompter`]          |
//! | show notifications       | [`Notifier`]          |
//! | settings, clock, product | [`Environment`]       |
//!
//! [`Host`] is implemented for every type that provides all of them.
//! [`MemoryHost`](crate::memory::MemoryHost) is a complete in-memory implementation.

use crate::diagnostics::{Diagnostic, DocumentId, Position, Range};
use crate::error::HostError;
use crate::settings::ReportSettings;
use chrono::{DateTime, Local};
use std::path::PathBuf;

/// Enumerates every document the host has diagnostics for.
pub trait DiagnosticSource {
    /// Per-document diagnostic lists, in the host's own order.
    fn diagnostics(&self) -> Vec<(DocumentId, Vec<Diagnostic>)>;
}

/// Read access to document text and naming.
pub trait DocumentStore {
    /// All lines of the document, without line terminators.
    fn read_lines(&self, document: &DocumentId) -> Result<Vec<String>, HostError>;

    /// The document's path relative to the workspace root, `/`-separated.
    ///
    /// Documents outside the workspace fall back to their full path.
    fn relative_path(&self, document: &DocumentId) -> String;

    /// The document's filesystem path (used for extensions and failure placeholders).
    fn file_path(&self, document: &DocumentId) -> PathBuf;

    /// The document's language id (`"typescript"`, `"rust"`, ...), if known.
    fn language_id(&self, document: &DocumentId) -> Option<String>;
}

/// One hover answer: its content entries and the source range it describes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HoverContent {
    /// Text entries (plain text or Markdown), in the provider's order.
    pub contents: Vec<String>,
    /// Range the hover applies to, if the provider reports one.
    pub range: Option<Range>,
}

impl HoverContent {
    /// Create hover content.
    pub fn new(contents: Vec<String>, range: Option<Range>) -> Self {
        Self { contents, range }
    }
}

/// Hover/tooltip information at a code position.
pub trait HoverProvider {
    /// All hovers the host's language tooling reports at `position`.
    fn hover(
        &self,
        document: &DocumentId,
        position: Position,
    ) -> Result<Vec<HoverContent>, HostError>;
}

/// Clipboard write access.
pub trait Clipboard {
    /// Replace the clipboard contents with `text`.
    fn write_text(&mut self, text: &str) -> Result<(), HostError>;
}

/// A named group of file extensions offered by a save dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveFilter {
    /// Display name (`"Markdown"`).
    pub name: &'static str,
    /// Extensions without the dot (`["md"]`).
    pub extensions: &'static [&'static str],
}

/// Interactive prompts. `None` always means the user cancelled.
pub trait Prompter {
    /// Let the user pick one of `options`; returns its index.
    fn pick(&mut self, placeholder: &str, options: &[&str]) -> Option<usize>;

    /// Ask for free text. An empty answer is `Some("")`, not a cancellation.
    fn input(&mut self, prompt: &str, placeholder: &str) -> Option<String>;

    /// Ask for a destination file.
    fn save_dialog(&mut self, title: &str, filters: &[SaveFilter]) -> Option<PathBuf>;
}

/// User-visible notifications.
pub trait Notifier {
    /// Show an informational message.
    fn show_info(&mut self, message: &str);

    /// Show an error message.
    fn show_error(&mut self, message: &str);
}

/// Host product and workspace description used by the system information block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostInfo {
    /// Product name (`"VS Code"`); also used in the report title.
    pub name: String,
    /// Product version.
    pub version: String,
    /// Workspace name, if a workspace is open.
    pub workspace_name: Option<String>,
}

/// Settings, clock and product information.
pub trait Environment {
    /// Current `[problemReport]` settings.
    fn settings(&self) -> ReportSettings;

    /// Host product and workspace description.
    fn host_info(&self) -> HostInfo;

    /// Wall clock used for report timestamps.
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Everything report generation reads from the host.
pub trait ReportHost: DiagnosticSource + DocumentStore + HoverProvider + Environment {}

impl<T> ReportHost for T where T: DiagnosticSource + DocumentStore + HoverProvider + Environment {}

/// The full capability set the command layer needs.
pub trait Host: ReportHost + Clipboard + Prompter + Notifier {}

impl<T> Host for T where T: ReportHost + Clipboard + Prompter + Notifier {}
