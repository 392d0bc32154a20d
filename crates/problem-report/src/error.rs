//! Error types.

use thiserror::Error;

#[derive(Debug, Error)]
/// Failures reported by a host capability (document store, hover provider, clipboard, dialogs).
pub enum HostError {
    #[error("cannot read document {uri}: {message}")]
    /// A document's text could not be loaded.
    DocumentUnavailable {
        /// Document identifier.
        uri: String,
        /// Underlying failure text.
        message: String,
    },

    #[error("hover request failed: {0}")]
    /// The hover provider failed for one position.
    Hover(String),

    #[error("clipboard unavailable: {0}")]
    /// Writing to the clipboard failed.
    Clipboard(String),

    #[error("{0}")]
    /// Any other host-side failure.
    Other(String),
}

#[derive(Debug, Error)]
/// Errors produced while loading `[problemReport]` settings.
pub enum SettingsError {
    #[error("I/O error: {0}")]
    /// The settings file could not be read.
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    /// The settings file is not valid TOML or has mistyped keys.
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Error)]
/// Top-level failures of report generation and delivery.
///
/// Per-file read failures and per-position hover failures never surface here; they are absorbed
/// where they happen.
pub enum ReportError {
    #[error(transparent)]
    /// A host capability failed.
    Host(#[from] HostError),

    #[error("I/O error: {0}")]
    /// Writing the destination file failed.
    Io(#[from] std::io::Error),

    #[error("invalid file pattern '{pattern}': {source}")]
    /// A file pattern could not be turned into a matcher.
    Pattern {
        /// The pattern as entered by the user.
        pattern: String,
        /// The regex compiler error.
        source: regex::Error,
    },

    #[error(transparent)]
    /// Settings could not be loaded.
    Settings(#[from] SettingsError),
}
