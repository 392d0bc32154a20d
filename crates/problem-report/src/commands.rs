//! Command layer.
//!
//! The host binds [`Command`]s to its palette, keybindings or status element and runs them
//! through a [`CommandExecutor`]. The executor is the error boundary: a failing command produces
//! exactly one error notification and writes nothing.
//!
//! # Example
//!
//! ```rust
//! use problem_report::{Command, CommandExecutor, CommandResult, MemoryHost};
//!
//! let mut host = MemoryHost::new();
//! let result = CommandExecutor::new(&mut host).execute(Command::CopyAsMarkdown);
//! assert!(matches!(result, CommandResult::Copied { .. }));
//! assert_eq!(
//!     host.clipboard_text(),
//!     Some("## No problems found matching your criteria")
//! );
//! ```

use crate::diagnostics::DiagnosticSeverity;
use crate::error::ReportError;
use crate::filter::{FilterCriteria, SeverityPreset};
use crate::host::{Host, Prompter};
use crate::report::{ReportRequest, generate_html, generate_markdown};
use crate::sink::{ReportFormat, copy_to_clipboard, write_report_file};
use std::path::PathBuf;

/// Format choices offered by the interactive filter prompt.
pub const LAYOUT_OPTIONS: [&str; 2] = ["Standard (with code snippets)", "Compact (no code snippets)"];

/// Commands exposed to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Full report to the clipboard.
    CopyAsMarkdown,
    /// Report without snippets to the clipboard.
    CopyCompact,
    /// Errors-only report to the clipboard.
    CopyErrorsOnly,
    /// Prompt for layout and filters, then copy.
    CopyWithFilter,
    /// Full report as an HTML document to the clipboard.
    ExportAsHtml,
    /// Prompt for format and destination, then write a file.
    SaveToFile,
}

impl Command {
    /// Every command, in palette order.
    pub const ALL: [Command; 6] = [
        Command::CopyAsMarkdown,
        Command::CopyCompact,
        Command::CopyErrorsOnly,
        Command::CopyWithFilter,
        Command::ExportAsHtml,
        Command::SaveToFile,
    ];

    /// Namespaced command id.
    pub fn id(self) -> &'static str {
        match self {
            Command::CopyAsMarkdown => "problemReport.copyAsMarkdown",
            Command::CopyCompact => "problemReport.copyCompact",
            Command::CopyErrorsOnly => "problemReport.copyErrorsOnly",
            Command::CopyWithFilter => "problemReport.copyWithFilter",
            Command::ExportAsHtml => "problemReport.exportAsHtml",
            Command::SaveToFile => "problemReport.saveToFile",
        }
    }

    /// Look a command up by [`Command::id`].
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|command| command.id() == id)
    }

    fn failure_prefix(self) -> &'static str {
        match self {
            Command::CopyAsMarkdown | Command::CopyCompact | Command::CopyWithFilter => {
                "Failed to copy problems"
            }
            Command::CopyErrorsOnly => "Failed to copy errors",
            Command::ExportAsHtml => "Failed to export as HTML",
            Command::SaveToFile => "Failed to save to file",
        }
    }
}

/// Outcome of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// The report was placed on the clipboard.
    Copied {
        /// Clipboard content format.
        format: ReportFormat,
    },
    /// The report was written to a file.
    Saved {
        /// Final destination, extension included.
        path: PathBuf,
    },
    /// The user dismissed a prompt; nothing happened.
    Cancelled,
    /// The command failed and the user was notified.
    Failed {
        /// The notification text.
        message: String,
    },
}

/// Ask the user for layout, severity preset, file pattern and message text.
///
/// Returns `None` as soon as any prompt is dismissed.
pub fn prompt_filter_request<P: Prompter + ?Sized>(prompter: &mut P) -> Option<ReportRequest> {
    let layout = prompter.pick("Select output format", &LAYOUT_OPTIONS)?;
    let compact = match layout {
        0 => false,
        1 => true,
        _ => return None,
    };

    let preset_labels: Vec<&str> = SeverityPreset::ALL.iter().map(|p| p.label()).collect();
    let preset = *SeverityPreset::ALL.get(prompter.pick("Filter by severity", &preset_labels)?)?;

    let file_pattern = prompter.input(
        "Enter a glob pattern to filter files",
        "Filter by file pattern (e.g., *.ts, src/*.js) or leave empty for all",
    )?;
    let message = prompter.input(
        "Enter text to filter problem messages",
        "Filter by message content (case insensitive) or leave empty for all",
    )?;

    let criteria = FilterCriteria::none()
        .with_severities(preset.severities().unwrap_or_default())
        .with_file_pattern(file_pattern.trim())
        .with_message_contains(message);
    Some(ReportRequest { compact, criteria })
}

/// Runs [`Command`]s against a host.
pub struct CommandExecutor<'h, H: Host + ?Sized> {
    host: &'h mut H,
}

impl<'h, H: Host + ?Sized> CommandExecutor<'h, H> {
    /// Create an executor borrowing `host`.
    pub fn new(host: &'h mut H) -> Self {
        Self { host }
    }

    /// Run `command`, reporting success or failure to the user.
    pub fn execute(&mut self, command: Command) -> CommandResult {
        match self.try_execute(command) {
            Ok(result) => result,
            Err(err) => {
                let message = format!("{}: {err}", command.failure_prefix());
                log::error!("{} failed: {err}", command.id());
                self.host.show_error(&message);
                CommandResult::Failed { message }
            }
        }
    }

    /// Run `command` without the error notification; failures are returned instead.
    pub fn try_execute(&mut self, command: Command) -> Result<CommandResult, ReportError> {
        log::debug!("executing {}", command.id());
        match command {
            Command::CopyAsMarkdown => self.copy(
                &ReportRequest::full(),
                "Problems copied to clipboard as Markdown",
            ),
            Command::CopyCompact => self.copy(
                &ReportRequest::compact(),
                "Problems copied to clipboard in compact format",
            ),
            Command::CopyErrorsOnly => self.copy(
                &ReportRequest::filtered(
                    FilterCriteria::none().with_severities([DiagnosticSeverity::Error]),
                ),
                "Errors copied to clipboard as Markdown",
            ),
            Command::CopyWithFilter => match prompt_filter_request(&mut *self.host) {
                Some(request) => self.copy(&request, "Filtered problems copied to clipboard"),
                None => Ok(CommandResult::Cancelled),
            },
            Command::ExportAsHtml => {
                let html = generate_html(&*self.host, &ReportRequest::full())?;
                copy_to_clipboard(&mut *self.host, &html)?;
                self.host.show_info("Problems copied to clipboard as HTML");
                Ok(CommandResult::Copied {
                    format: ReportFormat::Html,
                })
            }
            Command::SaveToFile => self.save_to_file(),
        }
    }

    fn copy(&mut self, request: &ReportRequest, notice: &str) -> Result<CommandResult, ReportError> {
        let markdown = generate_markdown(&*self.host, request)?;
        copy_to_clipboard(&mut *self.host, &markdown)?;
        self.host.show_info(notice);
        Ok(CommandResult::Copied {
            format: ReportFormat::Markdown,
        })
    }

    fn save_to_file(&mut self) -> Result<CommandResult, ReportError> {
        let labels: Vec<&str> = ReportFormat::ALL.iter().map(|f| f.label()).collect();
        let Some(format) = self
            .host
            .pick("Select report format", &labels)
            .and_then(|index| ReportFormat::ALL.get(index).copied())
        else {
            return Ok(CommandResult::Cancelled);
        };
        let Some(destination) = self
            .host
            .save_dialog("Save Problems Report", &[format.save_filter()])
        else {
            return Ok(CommandResult::Cancelled);
        };

        let markdown = generate_markdown(&*self.host, &ReportRequest::full())?;
        let content = format.content_from_markdown(&markdown);
        let path = write_report_file(&destination, format, &content)?;
        self.host
            .show_info(&format!("Problems saved to {}", path.display()));
        Ok(CommandResult::Saved { path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_ids_round_trip() {
        for command in Command::ALL {
            assert_eq!(Command::from_id(command.id()), Some(command));
        }
        assert_eq!(Command::from_id("problemReport.unknown"), None);
    }
}
