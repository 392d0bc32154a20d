#![warn(missing_docs)]
//! `problem-report-cli` - terminal host for `problem-report`.
//!
//! Diagnostics come from a recorded LSP dump, documents from disk, hovers from a recorded hover
//! dump. Reports go to the system clipboard (or stdout with `--print`) or to a file.
//!
//! ```bash
//! problem-report --root . --diagnostics diagnostics.json copy-errors-only --print
//! problem-report --diagnostics diagnostics.json save --format html -o problems
//! ```

pub mod cli;
pub mod error;
pub mod host;
pub mod prompt;

pub use cli::{Cli, CliCommand, DEFAULT_SETTINGS_FILE, build_host, run, run_command};
pub use error::CliError;
pub use host::{ClipboardTarget, FsHost, HOST_NAME, language_id_for_extension};
pub use prompt::{PresetAnswer, TerminalPrompter};
