//! CLI error type.

use problem_report::SettingsError;
use problem_report_lsp::DumpError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
/// Failures that stop the CLI before a command runs.
pub enum CliError {
    #[error("cannot load settings from {path}: {source}")]
    /// The settings file is unreadable or invalid.
    Settings {
        /// Settings file path.
        path: PathBuf,
        /// Underlying failure.
        source: SettingsError,
    },

    #[error("cannot load {kind} dump {path}: {source}")]
    /// A diagnostics or hover dump is unreadable or invalid.
    Dump {
        /// `"diagnostics"` or `"hover"`.
        kind: &'static str,
        /// Dump file path.
        path: PathBuf,
        /// Underlying failure.
        source: DumpError,
    },
}
