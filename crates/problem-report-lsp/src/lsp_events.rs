//! `textDocument/publishDiagnostics` parsing.
//!
//! LSP servers push diagnostics per document. This module turns the raw JSON payloads into typed
//! values and then into [`problem_report::Diagnostic`]s. Positions are kept exactly as the server
//! sent them (UTF-16 code units); report columns are therefore the server's columns.

use problem_report::{Diagnostic, DiagnosticRegistry, DiagnosticSeverity, Position, Range};
use serde_json::Value;

/// Method name of the diagnostics notification.
pub const PUBLISH_DIAGNOSTICS_METHOD: &str = "textDocument/publishDiagnostics";

/// LSP Position (0-based line, UTF-16 character offset).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LspPosition {
    /// Line number (0-based)
    pub line: u32,
    /// Character offset (UTF-16 code units, 0-based)
    pub character: u32,
}

impl LspPosition {
    /// Create a new LSP position.
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

impl From<LspPosition> for Position {
    fn from(value: LspPosition) -> Self {
        Position::new(value.line as usize, value.character as usize)
    }
}

/// LSP Range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LspRange {
    /// Range start position (inclusive).
    pub start: LspPosition,
    /// Range end position (exclusive).
    pub end: LspPosition,
}

impl LspRange {
    /// Create a new LSP range.
    pub fn new(start: LspPosition, end: LspPosition) -> Self {
        Self { start, end }
    }
}

impl From<LspRange> for Range {
    fn from(value: LspRange) -> Self {
        Range::new(value.start.into(), value.end.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Severity levels for `textDocument/publishDiagnostics`.
pub enum LspDiagnosticSeverity {
    /// Error diagnostics.
    Error,
    /// Warning diagnostics.
    Warning,
    /// Informational diagnostics.
    Information,
    /// Hint diagnostics.
    Hint,
}

impl LspDiagnosticSeverity {
    /// Convert the numeric LSP `DiagnosticSeverity` into an enum.
    pub fn from_u64(value: u64) -> Option<Self> {
        match value {
            1 => Some(Self::Error),
            2 => Some(Self::Warning),
            3 => Some(Self::Information),
            4 => Some(Self::Hint),
            _ => None,
        }
    }
}

impl From<LspDiagnosticSeverity> for DiagnosticSeverity {
    fn from(value: LspDiagnosticSeverity) -> Self {
        match value {
            LspDiagnosticSeverity::Error => DiagnosticSeverity::Error,
            LspDiagnosticSeverity::Warning => DiagnosticSeverity::Warning,
            LspDiagnosticSeverity::Information => DiagnosticSeverity::Information,
            LspDiagnosticSeverity::Hint => DiagnosticSeverity::Hint,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// A single LSP diagnostic item.
pub struct LspDiagnostic {
    /// Diagnostic range.
    pub range: LspRange,
    /// Optional severity.
    pub severity: Option<LspDiagnosticSeverity>,
    /// Optional diagnostic code (number or string).
    pub code: Option<Value>,
    /// Optional diagnostic source (e.g. "rust-analyzer").
    pub source: Option<String>,
    /// Diagnostic message.
    pub message: String,
}

impl LspDiagnostic {
    /// Convert into a report diagnostic. A missing severity is reported as an error.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let severity = self
            .severity
            .map(DiagnosticSeverity::from)
            .unwrap_or(DiagnosticSeverity::Error);
        Diagnostic::new(self.range.into(), severity, self.message.clone())
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Parameters for `textDocument/publishDiagnostics`.
pub struct LspPublishDiagnosticsParams {
    /// Document URI (e.g. `file:///...`).
    pub uri: String,
    /// Diagnostics for the document.
    pub diagnostics: Vec<LspDiagnostic>,
    /// Optional document version.
    pub version: Option<i32>,
}

impl LspPublishDiagnosticsParams {
    /// Report diagnostics for this publish, in server order.
    pub fn to_diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics
            .iter()
            .map(LspDiagnostic::to_diagnostic)
            .collect()
    }

    /// Apply this publish to `registry`, replacing the document's previous diagnostics.
    pub fn apply_to(&self, registry: &mut DiagnosticRegistry) {
        registry.set(self.uri.as_str(), self.to_diagnostics());
    }
}

pub(crate) fn lsp_position_from_value(value: &Value) -> Option<LspPosition> {
    let line = value.get("line")?.as_u64()? as u32;
    let character = value.get("character")?.as_u64()? as u32;
    Some(LspPosition { line, character })
}

pub(crate) fn lsp_range_from_value(value: &Value) -> Option<LspRange> {
    let start = lsp_position_from_value(value.get("start")?)?;
    let end = lsp_position_from_value(value.get("end")?)?;
    Some(LspRange { start, end })
}

fn lsp_diagnostic_from_value(value: &Value) -> Option<LspDiagnostic> {
    let range = lsp_range_from_value(value.get("range")?)?;
    let severity = value
        .get("severity")
        .and_then(Value::as_u64)
        .and_then(LspDiagnosticSeverity::from_u64);
    let code = value.get("code").cloned();
    let source = value
        .get("source")
        .and_then(Value::as_str)
        .map(|s| s.to_string());
    let message = value
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();

    Some(LspDiagnostic {
        range,
        severity,
        code,
        source,
        message,
    })
}

/// Parse `textDocument/publishDiagnostics` params.
///
/// Items without a usable range are skipped; a missing `uri` rejects the whole payload.
pub fn publish_diagnostics_from_value(params: &Value) -> Option<LspPublishDiagnosticsParams> {
    let uri = params.get("uri")?.as_str()?.to_string();
    let version = params
        .get("version")
        .and_then(|v| v.as_i64())
        .map(|v| v as i32);

    let diagnostics = params
        .get("diagnostics")
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(lsp_diagnostic_from_value)
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    Some(LspPublishDiagnosticsParams {
        uri,
        diagnostics,
        version,
    })
}

#[derive(Debug, Clone, PartialEq)]
/// The server->client notifications this crate understands.
pub enum LspNotification {
    /// `textDocument/publishDiagnostics`
    PublishDiagnostics(LspPublishDiagnosticsParams),
}

impl LspNotification {
    /// Parse a notification by method name and `params` payload.
    pub fn from_method_and_params(method: &str, params: &Value) -> Option<Self> {
        match method {
            PUBLISH_DIAGNOSTICS_METHOD => {
                publish_diagnostics_from_value(params).map(Self::PublishDiagnostics)
            }
            _ => None,
        }
    }

    /// Parse a raw JSON-RPC notification (`{ "jsonrpc", "method", "params" }`).
    pub fn from_json(msg: &Value) -> Option<Self> {
        let method = msg.get("method")?.as_str()?;
        let params = msg.get("params").unwrap_or(&Value::Null);
        Self::from_method_and_params(method, params)
    }
}
