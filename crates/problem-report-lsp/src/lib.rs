#![warn(missing_docs)]
//! `problem-report-lsp` - LSP integration for `problem-report`.
//!
//! This crate parses `textDocument/publishDiagnostics` notifications into a
//! [`problem_report::DiagnosticRegistry`], normalizes `textDocument/hover` results into
//! [`problem_report::HoverContent`], reads recorded diagnostics/hover dumps, and converts
//! between `file://` URIs and workspace-relative paths.

pub mod dump;
pub mod lsp_events;
pub mod lsp_hover;
pub mod lsp_uri;

pub use dump::{
    DumpError, HoverDumpEntry, load_diagnostics_dump, load_hover_dump, read_diagnostics_dump,
    read_hover_dump,
};
pub use lsp_events::{
    LspDiagnostic, LspDiagnosticSeverity, LspNotification, LspPosition, LspPublishDiagnosticsParams,
    LspRange, PUBLISH_DIAGNOSTICS_METHOD, publish_diagnostics_from_value,
};
pub use lsp_hover::{hover_from_value, hovers_from_value};
pub use lsp_uri::{
    file_uri_to_path, path_to_file_uri, percent_decode_path, percent_encode_path,
    relative_display_path,
};
