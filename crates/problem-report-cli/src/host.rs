//! Filesystem-backed host.

use problem_report::{
    Clipboard, Diagnostic, DiagnosticRegistry, DiagnosticSource, DocumentId, DocumentStore,
    Environment, HostError, HostInfo, HoverContent, HoverProvider, Notifier, Position, Prompter,
    ReportSettings, SaveFilter,
};
use problem_report_lsp::{HoverDumpEntry, file_uri_to_path, relative_display_path};
use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Product name used in report titles.
pub const HOST_NAME: &str = "problem-report";

/// Where clipboard writes go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardTarget {
    /// The system clipboard.
    System,
    /// Standard output.
    Stdout,
}

/// Map a file extension to an LSP language id.
pub fn language_id_for_extension(ext: &str) -> Option<&'static str> {
    match ext.to_ascii_lowercase().as_str() {
        "ts" | "mts" | "cts" => Some("typescript"),
        "tsx" => Some("typescriptreact"),
        "js" | "mjs" | "cjs" => Some("javascript"),
        "jsx" => Some("javascriptreact"),
        "rs" => Some("rust"),
        "py" => Some("python"),
        "go" => Some("go"),
        "c" | "h" => Some("c"),
        "cc" | "cpp" | "cxx" | "hpp" => Some("cpp"),
        "java" => Some("java"),
        "json" => Some("json"),
        "toml" => Some("toml"),
        "md" => Some("markdown"),
        _ => None,
    }
}

/// A host over the local filesystem.
///
/// Diagnostics live in a [`DiagnosticRegistry`], documents are read from disk on demand and
/// hovers are replayed from a recorded dump.
pub struct FsHost {
    root: PathBuf,
    registry: DiagnosticRegistry,
    hovers: HashMap<(DocumentId, Position), Vec<HoverContent>>,
    settings: ReportSettings,
    clipboard: ClipboardTarget,
    prompter: Box<dyn Prompter>,
    errors_shown: usize,
}

impl FsHost {
    /// Create a host rooted at `root` (canonicalized when it exists).
    pub fn new(
        root: PathBuf,
        settings: ReportSettings,
        clipboard: ClipboardTarget,
        prompter: Box<dyn Prompter>,
    ) -> Self {
        let root = fs::canonicalize(&root).unwrap_or(root);
        Self {
            root,
            registry: DiagnosticRegistry::new(),
            hovers: HashMap::new(),
            settings,
            clipboard,
            prompter,
            errors_shown: 0,
        }
    }

    /// The diagnostics registry.
    pub fn registry(&self) -> &DiagnosticRegistry {
        &self.registry
    }

    /// The diagnostics registry, for loading.
    pub fn registry_mut(&mut self) -> &mut DiagnosticRegistry {
        &mut self.registry
    }

    /// Publish diagnostics for `document` directly.
    pub fn set_diagnostics(&mut self, document: impl Into<DocumentId>, diagnostics: Vec<Diagnostic>) {
        self.registry.set(document, diagnostics);
    }

    /// Add recorded hover answers.
    pub fn add_hovers(&mut self, entries: impl IntoIterator<Item = HoverDumpEntry>) {
        for entry in entries {
            self.hovers
                .entry((DocumentId::new(entry.uri), entry.position))
                .or_default()
                .extend(entry.hovers);
        }
    }

    /// Number of error notifications shown so far.
    pub fn errors_shown(&self) -> usize {
        self.errors_shown
    }

    fn local_path(&self, document: &DocumentId) -> Option<PathBuf> {
        file_uri_to_path(document.as_str())
    }
}

impl DiagnosticSource for FsHost {
    fn diagnostics(&self) -> Vec<(DocumentId, Vec<Diagnostic>)> {
        self.registry.diagnostics()
    }
}

impl DocumentStore for FsHost {
    fn read_lines(&self, document: &DocumentId) -> Result<Vec<String>, HostError> {
        let unavailable = |message: String| HostError::DocumentUnavailable {
            uri: document.to_string(),
            message,
        };
        let path = self
            .local_path(document)
            .ok_or_else(|| unavailable("not a file URI".to_string()))?;
        let text = fs::read_to_string(&path).map_err(|err| unavailable(err.to_string()))?;
        Ok(text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect())
    }

    fn relative_path(&self, document: &DocumentId) -> String {
        match self.local_path(document) {
            Some(path) => relative_display_path(&path, &self.root),
            None => document.to_string(),
        }
    }

    fn file_path(&self, document: &DocumentId) -> PathBuf {
        self.local_path(document)
            .unwrap_or_else(|| PathBuf::from(document.as_str()))
    }

    fn language_id(&self, document: &DocumentId) -> Option<String> {
        let path = self.local_path(document)?;
        let ext = path.extension()?.to_string_lossy();
        language_id_for_extension(&ext).map(str::to_string)
    }
}

impl HoverProvider for FsHost {
    fn hover(&self, document: &DocumentId, position: Position) -> Result<Vec<HoverContent>, HostError> {
        Ok(self
            .hovers
            .get(&(document.clone(), position))
            .cloned()
            .unwrap_or_default())
    }
}

impl Clipboard for FsHost {
    fn write_text(&mut self, text: &str) -> Result<(), HostError> {
        match self.clipboard {
            ClipboardTarget::System => {
                let mut clipboard =
                    arboard::Clipboard::new().map_err(|err| HostError::Clipboard(err.to_string()))?;
                clipboard
                    .set_text(text.to_string())
                    .map_err(|err| HostError::Clipboard(err.to_string()))
            }
            ClipboardTarget::Stdout => {
                let mut stdout = io::stdout().lock();
                writeln!(stdout, "{text}")
                    .and_then(|()| stdout.flush())
                    .map_err(|err| HostError::Clipboard(err.to_string()))
            }
        }
    }
}

impl Prompter for FsHost {
    fn pick(&mut self, placeholder: &str, options: &[&str]) -> Option<usize> {
        self.prompter.pick(placeholder, options)
    }

    fn input(&mut self, prompt: &str, placeholder: &str) -> Option<String> {
        self.prompter.input(prompt, placeholder)
    }

    fn save_dialog(&mut self, title: &str, filters: &[SaveFilter]) -> Option<PathBuf> {
        self.prompter.save_dialog(title, filters)
    }
}

impl Notifier for FsHost {
    fn show_info(&mut self, message: &str) {
        eprintln!("{message}");
    }

    fn show_error(&mut self, message: &str) {
        self.errors_shown += 1;
        eprintln!("error: {message}");
    }
}

impl Environment for FsHost {
    fn settings(&self) -> ReportSettings {
        self.settings.clone()
    }

    fn host_info(&self) -> HostInfo {
        HostInfo {
            name: HOST_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            workspace_name: workspace_name(&self.root),
        }
    }
}

fn workspace_name(root: &Path) -> Option<String> {
    root.file_name()
        .map(|name| name.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_ids() {
        assert_eq!(language_id_for_extension("TS"), Some("typescript"));
        assert_eq!(language_id_for_extension("rs"), Some("rust"));
        assert_eq!(language_id_for_extension("xyz"), None);
    }
}
