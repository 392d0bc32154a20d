#![warn(missing_docs)]
//! Problem Report - Headless Diagnostics Report Pipeline
//!
//! # Overview
//!
//! `problem-report` turns the diagnostics an editor holds (errors, warnings, information, hints)
//! into a shareable report. It owns no UI: the host supplies diagnostics, document text, hover
//! information, a clipboard and prompts through the traits in [`host`].
//!
//! # Pipeline
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  Commands (copy / filter / export / save)    │  ← Public API
//! ├──────────────────────────────────────────────┤
//! │  Sinks (clipboard, Markdown/HTML/text file)  │  ← Delivery
//! ├──────────────────────────────────────────────┤
//! │  Render (Markdown, HTML) + enrichment        │  ← snippets, scopes, hovers
//! ├──────────────────────────────────────────────┤
//! │  Group + sort                                │  ← by file or by severity
//! ├──────────────────────────────────────────────┤
//! │  Filter                                      │  ← severity, glob, message
//! ├──────────────────────────────────────────────┤
//! │  Collect                                     │  ← DiagnosticSource
//! └──────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use problem_report::{
//!     Diagnostic, DiagnosticSeverity, MemoryHost, Range, ReportRequest, ReportSettings,
//!     generate_markdown,
//! };
//!
//! let mut host = MemoryHost::new();
//! host.set_settings(ReportSettings {
//!     add_timestamp: false,
//!     ..ReportSettings::default()
//! });
//! host.add_document("src/main.ts", "let x: number = 'a';\n", Some("typescript"));
//! host.set_diagnostics(
//!     "src/main.ts",
//!     vec![Diagnostic::new(
//!         Range::from_coords(0, 16, 0, 19),
//!         DiagnosticSeverity::Error,
//!         "Type 'string' is not assignable to type 'number'.",
//!     )],
//! );
//!
//! let report = generate_markdown(&host, &ReportRequest::compact()).unwrap();
//! assert!(report.starts_with("# Memory Problems Report"));
//! assert!(report.contains("**src/main.ts** (Line 1, Col 17)"));
//! ```
//!
//! # Module Description
//!
//! - [`diagnostics`] - Diagnostic, record and severity model
//! - [`host`] - Host capability traits
//! - [`collect`], [`filter`], [`group`] - Pipeline stages
//! - [`snippet`], [`hover`] - Per-entry enrichment
//! - [`summary`], [`render`], [`html`] - Output
//! - [`sink`] - Clipboard and file delivery
//! - [`report`] - One-call report generation
//! - [`commands`] - User-facing commands and their error boundary
//! - [`registry`], [`status`] - Live diagnostics store and status indicator
//! - [`memory`] - In-memory host

pub mod collect;
pub mod commands;
pub mod diagnostics;
pub mod error;
pub mod filter;
pub mod group;
pub mod host;
pub mod hover;
pub mod html;
pub mod memory;
pub mod registry;
pub mod render;
pub mod report;
pub mod settings;
pub mod sink;
pub mod snippet;
pub mod status;
pub mod summary;

pub use collect::collect_all;
pub use commands::{Command, CommandExecutor, CommandResult, prompt_filter_request};
pub use diagnostics::{
    Diagnostic, DiagnosticRecord, DiagnosticSeverity, DocumentId, Position, Range, SeverityCounts,
};
pub use error::{HostError, ReportError, SettingsError};
pub use filter::{FilterCriteria, GlobPattern, SeverityPreset, filter};
pub use group::{Group, GroupKey, group};
pub use host::{
    Clipboard, DiagnosticSource, DocumentStore, Environment, Host, HostInfo, HoverContent,
    HoverProvider, Notifier, Prompter, ReportHost, SaveFilter,
};
pub use hover::{HoverContext, HoverScope};
pub use html::{escape_html, markdown_to_html};
pub use memory::{MemoryHost, Notification};
pub use registry::{DiagnosticRegistry, RegistryChange, RegistryChangeCallback, RegistryChangeKind};
pub use render::{NO_PROBLEMS_NOTICE, render_markdown};
pub use report::{ReportRequest, generate_html, generate_markdown, generate_markdown_with_options};
pub use settings::{ReportOptions, ReportSettings, load_settings, load_settings_from_str};
pub use sink::{ReportFormat, copy_to_clipboard, ensure_extension, write_report_file};
pub use status::{SharedStatusIndicator, StatusIndicator};
pub use summary::{HotSpot, Summary};
