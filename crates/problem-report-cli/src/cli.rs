//! Command-line surface.

use crate::error::CliError;
use crate::host::{ClipboardTarget, FsHost};
use crate::prompt::{PresetAnswer, TerminalPrompter};
use clap::{Args, Parser, Subcommand, ValueEnum};
use problem_report::{
    Command, CommandExecutor, CommandResult, Prompter, ReportFormat, SeverityPreset,
    StatusIndicator, load_settings,
};
use problem_report_lsp::{read_diagnostics_dump, read_hover_dump};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

/// Settings file looked up under `--root` when `--config` is not given.
pub const DEFAULT_SETTINGS_FILE: &str = ".problem-report.toml";

/// Build diagnostics reports from recorded LSP output.
#[derive(Debug, Parser)]
#[command(name = "problem-report", version, about)]
pub struct Cli {
    /// TOML settings file with a `[problemReport]` table.
    #[arg(long, global = true, value_name = "TOML")]
    pub config: Option<PathBuf>,

    /// Workspace root; report paths are shown relative to it.
    #[arg(long, global = true, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Recorded `textDocument/publishDiagnostics` payloads (JSON array).
    #[arg(long, global = true, value_name = "JSON")]
    pub diagnostics: Option<PathBuf>,

    /// Recorded hover answers (JSON array).
    #[arg(long, global = true, value_name = "JSON")]
    pub hovers: Option<PathBuf>,

    /// Write clipboard output to stdout instead of the system clipboard.
    #[arg(long, global = true)]
    pub print: bool,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Subcommands, one per report command plus `status`.
#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Copy the full report as Markdown.
    Copy,
    /// Copy the report without code snippets.
    CopyCompact,
    /// Copy errors only.
    CopyErrorsOnly,
    /// Copy a filtered report; prompts for anything not given as a flag.
    CopyWithFilter(FilterArgs),
    /// Copy the report as an HTML document.
    ExportHtml,
    /// Save the report to a file.
    Save(SaveArgs),
    /// Print the error/warning status line.
    Status,
}

/// Answers for `copy-with-filter`.
#[derive(Debug, Default, Args)]
pub struct FilterArgs {
    /// Omit code snippets.
    #[arg(long)]
    pub compact: bool,
    /// Severity preset.
    #[arg(long, value_enum)]
    pub severity: Option<SeverityArg>,
    /// Glob over workspace-relative paths (`*` and `?`).
    #[arg(long)]
    pub pattern: Option<String>,
    /// Case-insensitive message text.
    #[arg(long)]
    pub message: Option<String>,
}

impl FilterArgs {
    fn is_empty(&self) -> bool {
        !self.compact && self.severity.is_none() && self.pattern.is_none() && self.message.is_none()
    }

    /// Prompt answers implied by the flags. No flags means fully interactive.
    pub fn presets(&self) -> Vec<PresetAnswer> {
        if self.is_empty() {
            return Vec::new();
        }
        let preset = self.severity.map(SeverityPreset::from).unwrap_or(SeverityPreset::All);
        vec![
            PresetAnswer::Pick(usize::from(self.compact)),
            PresetAnswer::Pick(preset_index(preset)),
            PresetAnswer::Input(self.pattern.clone().unwrap_or_default()),
            PresetAnswer::Input(self.message.clone().unwrap_or_default()),
        ]
    }
}

/// Answers for `save`.
#[derive(Debug, Default, Args)]
pub struct SaveArgs {
    /// Output format.
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,
    /// Destination; the format's extension is appended when missing.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

impl SaveArgs {
    /// Prompt answers implied by the flags.
    pub fn presets(&self) -> Vec<PresetAnswer> {
        let mut presets = Vec::new();
        if let Some(format) = self.format {
            let format = ReportFormat::from(format);
            let index = ReportFormat::ALL
                .iter()
                .position(|f| *f == format)
                .unwrap_or_default();
            presets.push(PresetAnswer::Pick(index));
        }
        if let Some(output) = &self.output {
            presets.push(PresetAnswer::SavePath(output.clone()));
        }
        presets
    }
}

/// `--severity` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SeverityArg {
    /// Every severity.
    All,
    /// Errors only.
    Errors,
    /// Warnings only.
    Warnings,
    /// Errors and warnings.
    ErrorsAndWarnings,
    /// Information only.
    Information,
    /// Hints only.
    Hints,
}

impl From<SeverityArg> for SeverityPreset {
    fn from(value: SeverityArg) -> Self {
        match value {
            SeverityArg::All => SeverityPreset::All,
            SeverityArg::Errors => SeverityPreset::ErrorsOnly,
            SeverityArg::Warnings => SeverityPreset::WarningsOnly,
            SeverityArg::ErrorsAndWarnings => SeverityPreset::ErrorsAndWarnings,
            SeverityArg::Information => SeverityPreset::InformationOnly,
            SeverityArg::Hints => SeverityPreset::HintsOnly,
        }
    }
}

fn preset_index(preset: SeverityPreset) -> usize {
    SeverityPreset::ALL
        .iter()
        .position(|p| *p == preset)
        .unwrap_or_default()
}

/// `--format` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Markdown (`.md`).
    Markdown,
    /// HTML document (`.html`).
    Html,
    /// Markdown text in a `.txt` file.
    Text,
}

impl From<FormatArg> for ReportFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Markdown => ReportFormat::Markdown,
            FormatArg::Html => ReportFormat::Html,
            FormatArg::Text => ReportFormat::Text,
        }
    }
}

impl CliCommand {
    /// The report command this subcommand runs; `None` for `status`.
    pub fn report_command(&self) -> Option<Command> {
        match self {
            CliCommand::Copy => Some(Command::CopyAsMarkdown),
            CliCommand::CopyCompact => Some(Command::CopyCompact),
            CliCommand::CopyErrorsOnly => Some(Command::CopyErrorsOnly),
            CliCommand::CopyWithFilter(_) => Some(Command::CopyWithFilter),
            CliCommand::ExportHtml => Some(Command::ExportAsHtml),
            CliCommand::Save(_) => Some(Command::SaveToFile),
            CliCommand::Status => None,
        }
    }

    /// Prompt answers supplied through flags.
    pub fn presets(&self) -> Vec<PresetAnswer> {
        match self {
            CliCommand::CopyWithFilter(args) => args.presets(),
            CliCommand::Save(args) => args.presets(),
            _ => Vec::new(),
        }
    }
}

/// Build the host: settings, recorded diagnostics and recorded hovers.
pub fn build_host(cli: &Cli, prompter: Box<dyn Prompter>) -> Result<FsHost, CliError> {
    let settings_path = cli
        .config
        .clone()
        .unwrap_or_else(|| cli.root.join(DEFAULT_SETTINGS_FILE));
    let settings = load_settings(&settings_path).map_err(|source| CliError::Settings {
        path: settings_path.clone(),
        source,
    })?;

    let clipboard = if cli.print {
        ClipboardTarget::Stdout
    } else {
        ClipboardTarget::System
    };
    let mut host = FsHost::new(cli.root.clone(), settings, clipboard, prompter);

    if let Some(path) = &cli.diagnostics {
        let applied =
            read_diagnostics_dump(path, host.registry_mut()).map_err(|source| CliError::Dump {
                kind: "diagnostics",
                path: path.clone(),
                source,
            })?;
        log::info!("loaded {applied} publishes from {}", path.display());
    }

    if let Some(path) = &cli.hovers {
        let entries = read_hover_dump(path).map_err(|source| CliError::Dump {
            kind: "hover",
            path: path.clone(),
            source,
        })?;
        log::info!("loaded {} hover records from {}", entries.len(), path.display());
        host.add_hovers(entries);
    }

    Ok(host)
}

/// Run one subcommand against `host`.
pub fn run_command(host: &mut FsHost, command: &CliCommand) -> ExitCode {
    let Some(report_command) = command.report_command() else {
        let indicator = StatusIndicator::from_source(host.registry());
        println!("{}", indicator.text().unwrap_or("No errors or warnings"));
        return ExitCode::SUCCESS;
    };

    match CommandExecutor::new(host).execute(report_command) {
        CommandResult::Failed { .. } => ExitCode::FAILURE,
        CommandResult::Cancelled => {
            eprintln!("Cancelled");
            ExitCode::SUCCESS
        }
        CommandResult::Copied { .. } | CommandResult::Saved { .. } => ExitCode::SUCCESS,
    }
}

/// Run a parsed command line with terminal prompts.
pub fn run(cli: Cli) -> Result<ExitCode, CliError> {
    let prompter =
        TerminalPrompter::new(io::stdin().lock(), io::stderr()).with_presets(cli.command.presets());
    let mut host = build_host(&cli, Box::new(prompter))?;
    Ok(run_command(&mut host, &cli.command))
}
