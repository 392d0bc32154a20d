use pretty_assertions::assert_eq;
use problem_report::{
    Command, CommandExecutor, CommandResult, Diagnostic, DiagnosticSeverity, MemoryHost,
    Notification, Range, ReportFormat, ReportSettings, StatusIndicator,
};
use std::fs;

fn host_with_problems() -> MemoryHost {
    let mut host = MemoryHost::new();
    host.set_settings(ReportSettings {
        add_timestamp: false,
        ..ReportSettings::default()
    });
    host.add_document("src/lib.ts", "const a = 1;\nconst b = a +;\n", Some("typescript"));
    host.add_document("README.md", "# Title\n", Some("markdown"));
    host.set_diagnostics(
        "src/lib.ts",
        vec![
            Diagnostic::new(
                Range::from_coords(1, 13, 1, 14),
                DiagnosticSeverity::Error,
                "Expression expected.",
            ),
            Diagnostic::new(
                Range::from_coords(0, 6, 0, 7),
                DiagnosticSeverity::Warning,
                "'a' is declared but never read.",
            ),
        ],
    );
    host.set_diagnostics(
        "README.md",
        vec![Diagnostic::new(
            Range::from_coords(0, 0, 0, 7),
            DiagnosticSeverity::Information,
            "Heading style",
        )],
    );
    host
}

#[test]
fn test_copy_as_markdown_fills_clipboard_and_notifies() {
    let mut host = host_with_problems();
    let result = CommandExecutor::new(&mut host).execute(Command::CopyAsMarkdown);

    assert_eq!(
        result,
        CommandResult::Copied {
            format: ReportFormat::Markdown
        }
    );
    let copied = host.clipboard_text().unwrap();
    assert!(copied.starts_with("# Memory Problems Report\n\n## Summary\n"));
    assert!(copied.contains("## File: src/lib.ts\n"));
    assert!(copied.contains("## File: README.md\n"));
    assert!(copied.contains("```ts\n"));
    assert_eq!(
        host.notifications(),
        &[Notification::Info(
            "Problems copied to clipboard as Markdown".to_string()
        )]
    );
}

#[test]
fn test_copy_compact_omits_code() {
    let mut host = host_with_problems();
    CommandExecutor::new(&mut host).execute(Command::CopyCompact);
    assert!(!host.clipboard_text().unwrap().contains("```"));
    assert_eq!(
        host.notifications(),
        &[Notification::Info(
            "Problems copied to clipboard in compact format".to_string()
        )]
    );
}

#[test]
fn test_copy_errors_only() {
    let mut host = host_with_problems();
    CommandExecutor::new(&mut host).execute(Command::CopyErrorsOnly);
    let copied = host.clipboard_text().unwrap();
    assert!(copied.contains("- Severity: Error only\n"));
    assert!(copied.contains("Expression expected."));
    assert!(!copied.contains("never read"));
    assert!(!copied.contains("README.md"));
}

#[test]
fn test_clipboard_failure_reports_once() {
    let mut host = host_with_problems();
    host.fail_clipboard("no display");
    let result = CommandExecutor::new(&mut host).execute(Command::CopyErrorsOnly);

    let message = "Failed to copy errors: clipboard unavailable: no display".to_string();
    assert_eq!(
        result,
        CommandResult::Failed {
            message: message.clone()
        }
    );
    assert_eq!(host.notifications(), &[Notification::Error(message)]);
    assert_eq!(host.clipboard_text(), None);
}

#[test]
fn test_copy_with_filter_applies_answers() {
    let mut host = host_with_problems();
    host.push_pick(Some(1))
        .push_pick(Some(2))
        .push_input(Some("src/*"))
        .push_input(Some(""));

    let result = CommandExecutor::new(&mut host).execute(Command::CopyWithFilter);
    assert!(matches!(result, CommandResult::Copied { .. }));

    let copied = host.clipboard_text().unwrap();
    assert!(copied.contains("## Filters Applied\n- Severity: Warning only\n- File Pattern: `src/*`\n\n"));
    assert!(!copied.contains("Message Contains"));
    assert!(copied.contains("'a' is declared but never read."));
    assert!(!copied.contains("Expression expected."));
    assert!(!copied.contains("```"));
    assert_eq!(
        host.notifications(),
        &[Notification::Info(
            "Filtered problems copied to clipboard".to_string()
        )]
    );
}

#[test]
fn test_copy_with_filter_cancel_does_nothing() {
    let mut host = host_with_problems();
    host.push_pick(Some(0)).push_pick(None);

    let result = CommandExecutor::new(&mut host).execute(Command::CopyWithFilter);
    assert_eq!(result, CommandResult::Cancelled);
    assert_eq!(host.clipboard_text(), None);
    assert!(host.notifications().is_empty());
}

#[test]
fn test_export_as_html() {
    let mut host = host_with_problems();
    CommandExecutor::new(&mut host).execute(Command::ExportAsHtml);
    let copied = host.clipboard_text().unwrap();
    assert!(copied.starts_with("<!DOCTYPE html>"));
    assert!(copied.contains("<h2>File: src/lib.ts</h2>"));
    assert_eq!(
        host.notifications(),
        &[Notification::Info(
            "Problems copied to clipboard as HTML".to_string()
        )]
    );
}

#[test]
fn test_save_to_file_appends_extension() {
    let dir = tempfile::tempdir().unwrap();
    let mut host = host_with_problems();
    host.push_pick(Some(0))
        .push_save_path(Some(dir.path().join("problems")));

    let result = CommandExecutor::new(&mut host).execute(Command::SaveToFile);
    let expected = dir.path().join("problems.md");
    assert_eq!(
        result,
        CommandResult::Saved {
            path: expected.clone()
        }
    );
    let content = fs::read_to_string(&expected).unwrap();
    assert!(content.starts_with("# Memory Problems Report"));
    assert_eq!(
        host.notifications(),
        &[Notification::Info(format!(
            "Problems saved to {}",
            expected.display()
        ))]
    );
    assert_eq!(host.clipboard_text(), None);
}

#[test]
fn test_save_html_keeps_existing_extension() {
    let dir = tempfile::tempdir().unwrap();
    let mut host = host_with_problems();
    host.push_pick(Some(1))
        .push_save_path(Some(dir.path().join("out.HTML")));

    CommandExecutor::new(&mut host).execute(Command::SaveToFile);
    let content = fs::read_to_string(dir.path().join("out.HTML")).unwrap();
    assert!(content.starts_with("<!DOCTYPE html>"));
}

#[test]
fn test_save_cancelled_at_dialog() {
    let mut host = host_with_problems();
    host.push_pick(Some(2)).push_save_path(None);
    let result = CommandExecutor::new(&mut host).execute(Command::SaveToFile);
    assert_eq!(result, CommandResult::Cancelled);
    assert!(host.notifications().is_empty());
}

#[test]
fn test_save_into_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut host = host_with_problems();
    host.push_pick(Some(2))
        .push_save_path(Some(dir.path().join("missing").join("report")));

    let result = CommandExecutor::new(&mut host).execute(Command::SaveToFile);
    let CommandResult::Failed { message } = result else {
        panic!("expected failure, got {result:?}");
    };
    assert!(message.starts_with("Failed to save to file: I/O error: "));
    assert!(matches!(host.notifications(), [Notification::Error(_)]));
}

#[test]
fn test_status_indicator_tracks_host_registry() {
    let mut host = host_with_problems();
    let indicator = StatusIndicator::attach(host.registry_mut());
    assert_eq!(
        indicator.lock().unwrap().text(),
        Some("$(error) 1 $(warning) 1")
    );

    host.set_diagnostics("src/lib.ts", Vec::new());
    assert!(!indicator.lock().unwrap().is_visible());
}
