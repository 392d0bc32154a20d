//! Recorded LSP traffic.
//!
//! Offline tools build reports from JSON captured off an LSP connection.
//!
//! A diagnostics dump is an array whose items are either `publishDiagnostics` params
//! (`{ "uri", "diagnostics" }`) or complete JSON-RPC notifications carrying them. Items are
//! applied in order, so a later publish for a URI replaces an earlier one.
//!
//! A hover dump is an array of `{ "uri", "position": { "line", "character" }, "hover" }` where
//! `hover` is a raw `textDocument/hover` result.

use crate::lsp_events::{LspNotification, lsp_position_from_value, publish_diagnostics_from_value};
use crate::lsp_hover::hovers_from_value;
use problem_report::{DiagnosticRegistry, HoverContent, Position};
use serde_json::Value;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
/// Failures while reading a dump.
pub enum DumpError {
    #[error("I/O error: {0}")]
    /// The dump file could not be read.
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    /// The dump is not valid JSON.
    Json(#[from] serde_json::Error),

    #[error("expected a JSON array of {0}")]
    /// The top-level value is not an array.
    NotAnArray(&'static str),
}

/// One recorded hover answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverDumpEntry {
    /// Document URI.
    pub uri: String,
    /// Probe position, as sent to the server.
    pub position: Position,
    /// Normalized hover results at that position.
    pub hovers: Vec<HoverContent>,
}

/// Apply every publish in `value` to `registry`. Returns the number of publishes applied.
pub fn load_diagnostics_dump(
    value: &Value,
    registry: &mut DiagnosticRegistry,
) -> Result<usize, DumpError> {
    let items = value
        .as_array()
        .ok_or(DumpError::NotAnArray("publishDiagnostics params"))?;

    let mut applied = 0;
    for (index, item) in items.iter().enumerate() {
        let params = if item.get("method").is_some() {
            match LspNotification::from_json(item) {
                Some(LspNotification::PublishDiagnostics(params)) => Some(params),
                None => None,
            }
        } else {
            publish_diagnostics_from_value(item)
        };

        match params {
            Some(params) => {
                log::debug!(
                    "dump item {index}: {} diagnostics for {}",
                    params.diagnostics.len(),
                    params.uri
                );
                params.apply_to(registry);
                applied += 1;
            }
            None => log::warn!("dump item {index} is not a publishDiagnostics payload; skipped"),
        }
    }
    Ok(applied)
}

/// Read a diagnostics dump file into `registry`.
pub fn read_diagnostics_dump(
    path: &Path,
    registry: &mut DiagnosticRegistry,
) -> Result<usize, DumpError> {
    let value: Value = serde_json::from_str(&fs::read_to_string(path)?)?;
    load_diagnostics_dump(&value, registry)
}

fn hover_entry_from_value(value: &Value) -> Option<HoverDumpEntry> {
    let uri = value.get("uri")?.as_str()?.to_string();
    let position = lsp_position_from_value(value.get("position")?)?.into();
    let hovers = value
        .get("hover")
        .map(hovers_from_value)
        .unwrap_or_default();
    Some(HoverDumpEntry {
        uri,
        position,
        hovers,
    })
}

/// Parse a hover dump. Malformed items are skipped.
pub fn load_hover_dump(value: &Value) -> Result<Vec<HoverDumpEntry>, DumpError> {
    let items = value
        .as_array()
        .ok_or(DumpError::NotAnArray("hover records"))?;
    Ok(items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let entry = hover_entry_from_value(item);
            if entry.is_none() {
                log::warn!("hover dump item {index} is malformed; skipped");
            }
            entry
        })
        .collect())
}

/// Read a hover dump file.
pub fn read_hover_dump(path: &Path) -> Result<Vec<HoverDumpEntry>, DumpError> {
    let value: Value = serde_json::from_str(&fs::read_to_string(path)?)?;
    load_hover_dump(&value)
}
