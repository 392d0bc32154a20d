//! In-memory host.
//!
//! `MemoryHost` implements every host capability over plain data: documents are strings,
//! prompts answer from scripted queues, the clipboard is a field and notifications are recorded.
//! It backs the test suite and headless tools that already hold their diagnostics in memory.

use crate::diagnostics::{Diagnostic, DocumentId, Position};
use crate::error::HostError;
use crate::host::{
    Clipboard, DiagnosticSource, DocumentStore, Environment, HostInfo, HoverContent,
    HoverProvider, Notifier, Prompter, SaveFilter,
};
use crate::registry::DiagnosticRegistry;
use crate::settings::ReportSettings;
use chrono::{DateTime, Local};
use std::cell::Cell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::PathBuf;

/// Root every [`MemoryHost`] document lives under.
pub const MEMORY_WORKSPACE_ROOT: &str = "/workspace";

const URI_PREFIX: &str = "file://";

/// A notification recorded by [`MemoryHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// `show_info`.
    Info(String),
    /// `show_error`.
    Error(String),
}

#[derive(Debug, Clone)]
struct MemoryDocument {
    lines: Vec<String>,
    language_id: Option<String>,
}

/// A complete host kept in memory.
#[derive(Debug)]
pub struct MemoryHost {
    registry: DiagnosticRegistry,
    documents: HashMap<DocumentId, MemoryDocument>,
    hovers: HashMap<(DocumentId, Position), Vec<HoverContent>>,
    failing_hovers: HashSet<(DocumentId, Position)>,
    hover_calls: Cell<usize>,
    clipboard: Option<String>,
    clipboard_failure: Option<String>,
    picks: VecDeque<Option<usize>>,
    inputs: VecDeque<Option<String>>,
    save_paths: VecDeque<Option<PathBuf>>,
    notifications: Vec<Notification>,
    settings: ReportSettings,
    host_info: HostInfo,
    now: Option<DateTime<Local>>,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryHost {
    /// Create an empty host with default settings.
    pub fn new() -> Self {
        Self {
            registry: DiagnosticRegistry::new(),
            documents: HashMap::new(),
            hovers: HashMap::new(),
            failing_hovers: HashSet::new(),
            hover_calls: Cell::new(0),
            clipboard: None,
            clipboard_failure: None,
            picks: VecDeque::new(),
            inputs: VecDeque::new(),
            save_paths: VecDeque::new(),
            notifications: Vec::new(),
            settings: ReportSettings::default(),
            host_info: HostInfo {
                name: "Memory".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                workspace_name: Some("workspace".to_string()),
            },
            now: None,
        }
    }

    /// The document id of a workspace-relative path.
    pub fn document_id(&self, relative: &str) -> DocumentId {
        DocumentId::new(format!(
            "{URI_PREFIX}{MEMORY_WORKSPACE_ROOT}/{}",
            relative.trim_start_matches('/')
        ))
    }

    /// Add (or replace) a document's text and language.
    ///
    /// `N` newlines make `N + 1` lines, as in an editor buffer.
    pub fn add_document(
        &mut self,
        relative: &str,
        text: &str,
        language_id: Option<&str>,
    ) -> DocumentId {
        let id = self.document_id(relative);
        self.documents.insert(
            id.clone(),
            MemoryDocument {
                lines: text
                    .split('\n')
                    .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
                    .collect(),
                language_id: language_id.map(str::to_string),
            },
        );
        id
    }

    /// Publish diagnostics for a workspace-relative path.
    pub fn set_diagnostics(&mut self, relative: &str, diagnostics: Vec<Diagnostic>) -> DocumentId {
        let id = self.document_id(relative);
        self.registry.set(id.clone(), diagnostics);
        id
    }

    /// The underlying registry.
    pub fn registry(&self) -> &DiagnosticRegistry {
        &self.registry
    }

    /// The underlying registry, for subscriptions and direct edits.
    pub fn registry_mut(&mut self) -> &mut DiagnosticRegistry {
        &mut self.registry
    }

    /// Answer hovers at `position` in `document` with `contents`.
    pub fn add_hover(&mut self, document: &DocumentId, position: Position, contents: HoverContent) {
        self.hovers
            .entry((document.clone(), position))
            .or_default()
            .push(contents);
    }

    /// Make hovers at `position` in `document` fail.
    pub fn fail_hover_at(&mut self, document: &DocumentId, position: Position) {
        self.failing_hovers.insert((document.clone(), position));
    }

    /// Number of hover requests answered so far.
    pub fn hover_calls(&self) -> usize {
        self.hover_calls.get()
    }

    /// Current clipboard text.
    pub fn clipboard_text(&self) -> Option<&str> {
        self.clipboard.as_deref()
    }

    /// Make every clipboard write fail with `message`.
    pub fn fail_clipboard(&mut self, message: impl Into<String>) {
        self.clipboard_failure = Some(message.into());
    }

    /// Queue the answer to the next `pick` prompt; `None` cancels.
    pub fn push_pick(&mut self, answer: Option<usize>) -> &mut Self {
        self.picks.push_back(answer);
        self
    }

    /// Queue the answer to the next `input` prompt; `None` cancels.
    pub fn push_input(&mut self, answer: Option<&str>) -> &mut Self {
        self.inputs.push_back(answer.map(str::to_string));
        self
    }

    /// Queue the answer to the next save dialog; `None` cancels.
    pub fn push_save_path(&mut self, answer: Option<PathBuf>) -> &mut Self {
        self.save_paths.push_back(answer);
        self
    }

    /// Notifications shown so far, oldest first.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Replace the settings.
    pub fn set_settings(&mut self, settings: ReportSettings) {
        self.settings = settings;
    }

    /// Replace the product description.
    pub fn set_host_info(&mut self, host_info: HostInfo) {
        self.host_info = host_info;
    }

    /// Pin the clock.
    pub fn set_now(&mut self, now: DateTime<Local>) {
        self.now = Some(now);
    }
}

impl DiagnosticSource for MemoryHost {
    fn diagnostics(&self) -> Vec<(DocumentId, Vec<Diagnostic>)> {
        self.registry.diagnostics()
    }
}

impl DocumentStore for MemoryHost {
    fn read_lines(&self, document: &DocumentId) -> Result<Vec<String>, HostError> {
        self.documents
            .get(document)
            .map(|doc| doc.lines.clone())
            .ok_or_else(|| HostError::DocumentUnavailable {
                uri: document.to_string(),
                message: "document is not loaded".to_string(),
            })
    }

    fn relative_path(&self, document: &DocumentId) -> String {
        let path = self.file_path(document);
        match path.strip_prefix(MEMORY_WORKSPACE_ROOT) {
            Ok(relative) => relative.to_string_lossy().replace('\\', "/"),
            Err(_) => path.to_string_lossy().into_owned(),
        }
    }

    fn file_path(&self, document: &DocumentId) -> PathBuf {
        let raw = document.as_str();
        PathBuf::from(raw.strip_prefix(URI_PREFIX).unwrap_or(raw))
    }

    fn language_id(&self, document: &DocumentId) -> Option<String> {
        self.documents
            .get(document)
            .and_then(|doc| doc.language_id.clone())
    }
}

impl HoverProvider for MemoryHost {
    fn hover(&self, document: &DocumentId, position: Position) -> Result<Vec<HoverContent>, HostError> {
        self.hover_calls.set(self.hover_calls.get() + 1);
        let key = (document.clone(), position);
        if self.failing_hovers.contains(&key) {
            return Err(HostError::Hover(format!(
                "no hover at {}:{}",
                position.line, position.character
            )));
        }
        Ok(self.hovers.get(&key).cloned().unwrap_or_default())
    }
}

impl Clipboard for MemoryHost {
    fn write_text(&mut self, text: &str) -> Result<(), HostError> {
        if let Some(message) = &self.clipboard_failure {
            return Err(HostError::Clipboard(message.clone()));
        }
        self.clipboard = Some(text.to_string());
        Ok(())
    }
}

impl Prompter for MemoryHost {
    fn pick(&mut self, placeholder: &str, options: &[&str]) -> Option<usize> {
        log::trace!("pick '{placeholder}' from {} options", options.len());
        self.picks.pop_front().flatten()
    }

    fn input(&mut self, prompt: &str, _placeholder: &str) -> Option<String> {
        log::trace!("input '{prompt}'");
        self.inputs.pop_front().flatten()
    }

    fn save_dialog(&mut self, title: &str, _filters: &[SaveFilter]) -> Option<PathBuf> {
        log::trace!("save dialog '{title}'");
        self.save_paths.pop_front().flatten()
    }
}

impl Notifier for MemoryHost {
    fn show_info(&mut self, message: &str) {
        self.notifications.push(Notification::Info(message.to_string()));
    }

    fn show_error(&mut self, message: &str) {
        self.notifications.push(Notification::Error(message.to_string()));
    }
}

impl Environment for MemoryHost {
    fn settings(&self) -> ReportSettings {
        self.settings.clone()
    }

    fn host_info(&self) -> HostInfo {
        self.host_info.clone()
    }

    fn now(&self) -> DateTime<Local> {
        self.now.unwrap_or_else(Local::now)
    }
}
