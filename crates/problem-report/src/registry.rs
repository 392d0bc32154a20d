//! In-memory diagnostics registry with change notifications.
//!
//! Hosts that receive diagnostics as events (for example LSP `publishDiagnostics`) can keep them
//! here. The registry enumerates them for report generation and tells subscribers after every
//! change, which is how a [`StatusIndicator`](crate::status::StatusIndicator) stays current.
//!
//! # Example
//!
//! ```rust
//! use problem_report::{Diagnostic, DiagnosticRegistry, DiagnosticSeverity, Range};
//!
//! let mut registry = DiagnosticRegistry::new();
//! registry.subscribe(|change| {
//!     println!("{} errors now", change.counts.errors);
//! });
//! registry.set(
//!     "file:///src/main.ts",
//!     vec![Diagnostic::new(Range::from_coords(0, 0, 0, 4), DiagnosticSeverity::Error, "oops")],
//! );
//! assert_eq!(registry.counts().errors, 1);
//! ```

use crate::diagnostics::{Diagnostic, DocumentId, SeverityCounts};
use crate::host::DiagnosticSource;

/// What a registry change touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryChangeKind {
    /// One document's diagnostics were replaced.
    Replaced(DocumentId),
    /// One document's diagnostics were removed.
    Cleared(DocumentId),
    /// Every document was removed.
    ClearedAll,
}

/// Notification passed to subscribers after each change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryChange {
    /// What changed.
    pub kind: RegistryChangeKind,
    /// Registry-wide severity counts after the change.
    pub counts: SeverityCounts,
    /// Registry version after the change.
    pub version: u64,
}

/// Registry change callback type.
pub type RegistryChangeCallback = Box<dyn FnMut(&RegistryChange) + Send>;

/// Per-document diagnostics, in first-publication order.
#[derive(Default)]
pub struct DiagnosticRegistry {
    documents: Vec<(DocumentId, Vec<Diagnostic>)>,
    version: u64,
    callbacks: Vec<RegistryChangeCallback>,
}

impl std::fmt::Debug for DiagnosticRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagnosticRegistry")
            .field("documents", &self.documents)
            .field("version", &self.version)
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}

impl DiagnosticRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a document's diagnostics. An empty list removes the document.
    pub fn set(&mut self, document: impl Into<DocumentId>, diagnostics: Vec<Diagnostic>) {
        let document = document.into();
        if diagnostics.is_empty() {
            self.clear(&document);
            return;
        }
        match self.documents.iter_mut().find(|(id, _)| *id == document) {
            Some((_, existing)) => *existing = diagnostics,
            None => self.documents.push((document.clone(), diagnostics)),
        }
        self.bump(RegistryChangeKind::Replaced(document));
    }

    /// Remove a document's diagnostics.
    pub fn clear(&mut self, document: &DocumentId) {
        self.documents.retain(|(id, _)| id != document);
        self.bump(RegistryChangeKind::Cleared(document.clone()));
    }

    /// Remove everything.
    pub fn clear_all(&mut self) {
        self.documents.clear();
        self.bump(RegistryChangeKind::ClearedAll);
    }

    /// Diagnostics currently stored for `document`.
    pub fn get(&self, document: &DocumentId) -> &[Diagnostic] {
        self.documents
            .iter()
            .find(|(id, _)| id == document)
            .map(|(_, diagnostics)| diagnostics.as_slice())
            .unwrap_or_default()
    }

    /// Registry-wide severity counts.
    pub fn counts(&self) -> SeverityCounts {
        self.documents
            .iter()
            .flat_map(|(_, diagnostics)| diagnostics.iter().map(|d| d.severity))
            .collect()
    }

    /// Number of changes applied so far.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Subscribe to change notifications.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&RegistryChange) + Send + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    fn bump(&mut self, kind: RegistryChangeKind) {
        self.version += 1;
        let change = RegistryChange {
            kind,
            counts: self.counts(),
            version: self.version,
        };
        for callback in &mut self.callbacks {
            callback(&change);
        }
    }
}

impl DiagnosticSource for DiagnosticRegistry {
    fn diagnostics(&self) -> Vec<(DocumentId, Vec<Diagnostic>)> {
        self.documents.clone()
    }
}
