use clap::Parser;
use pretty_assertions::assert_eq;
use problem_report::{
    DocumentStore, HoverProvider, Position, ReportRequest, StatusIndicator, generate_markdown,
};
use problem_report_cli::{
    Cli, CliError, FsHost, PresetAnswer, TerminalPrompter, build_host, run_command,
};
use problem_report_lsp::path_to_file_uri;
use serde_json::json;
use std::fs;
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Workspace {
    dir: TempDir,
    uri: String,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        let source = dir.path().join("src/app.ts");
        fs::write(&source, "const answer: number = \"42\";\nexport default answer;\n").unwrap();
        let uri = path_to_file_uri(&source);

        let diagnostics = json!([{
            "jsonrpc": "2.0",
            "method": "textDocument/publishDiagnostics",
            "params": {
                "uri": uri,
                "diagnostics": [
                    {
                        "range": { "start": { "line": 0, "character": 6 }, "end": { "line": 0, "character": 12 } },
                        "severity": 1,
                        "message": "Type 'string' is not assignable to type 'number'."
                    },
                    {
                        "range": { "start": { "line": 1, "character": 0 }, "end": { "line": 1, "character": 6 } },
                        "severity": 2,
                        "message": "Unexpected default export."
                    }
                ]
            }
        }]);
        fs::write(dir.path().join("diagnostics.json"), diagnostics.to_string()).unwrap();

        let hovers = json!([{
            "uri": uri,
            "position": { "line": 0, "character": 6 },
            "hover": {
                "contents": { "kind": "markdown", "value": "```ts\nconst answer: number\n```" },
                "range": { "start": { "line": 0, "character": 6 }, "end": { "line": 0, "character": 12 } }
            }
        }]);
        fs::write(dir.path().join("hovers.json"), hovers.to_string()).unwrap();

        Self { dir, uri }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn args(&self, tail: &[&str]) -> Vec<String> {
        let mut args = vec![
            "problem-report".to_string(),
            "--root".to_string(),
            self.dir.path().display().to_string(),
            "--diagnostics".to_string(),
            self.path("diagnostics.json").display().to_string(),
            "--hovers".to_string(),
            self.path("hovers.json").display().to_string(),
        ];
        args.extend(tail.iter().map(|s| s.to_string()));
        args
    }
}

fn host_for(cli: &Cli) -> FsHost {
    let prompter = TerminalPrompter::new(Cursor::new(Vec::new()), io::sink())
        .with_presets(cli.command.presets());
    build_host(cli, Box::new(prompter)).unwrap()
}

#[test]
fn test_host_reads_dump_documents_and_hovers() {
    let ws = Workspace::new();
    let cli = Cli::try_parse_from(ws.args(&["status"])).unwrap();
    let host = host_for(&cli);

    let indicator = StatusIndicator::from_source(host.registry());
    assert_eq!(indicator.text(), Some("$(error) 1 $(warning) 1"));

    let document = problem_report::DocumentId::new(ws.uri.as_str());
    assert_eq!(host.relative_path(&document), "src/app.ts");
    assert_eq!(host.language_id(&document).as_deref(), Some("typescript"));
    assert_eq!(host.read_lines(&document).unwrap().len(), 3);
    assert_eq!(host.hover(&document, Position::new(0, 6)).unwrap().len(), 1);
}

#[test]
fn test_report_uses_relative_paths_and_hovers() {
    let ws = Workspace::new();
    let cli = Cli::try_parse_from(ws.args(&["copy"])).unwrap();
    let host = host_for(&cli);

    let report = generate_markdown(&host, &ReportRequest::full()).unwrap();
    assert!(report.starts_with("# problem-report Problems Report\n"));
    assert!(report.contains("## File: src/app.ts\n"));
    assert!(report.contains(
        "**src/app.ts** (Line 1, Col 7) in `const answer: number = \"42\";`: Type 'string' is not assignable to type 'number'."
    ));
    assert!(report.contains("**Hover Information:**\n- `const answer: number =` (Line 1, Col 7): const answer: number"));
}

#[test]
fn test_save_with_flags_writes_file_without_prompting() {
    let ws = Workspace::new();
    let output = ws.path("out/report");
    fs::create_dir_all(ws.path("out")).unwrap();
    let output_arg = output.display().to_string();
    let cli = Cli::try_parse_from(ws.args(&["save", "--format", "html", "-o", &output_arg])).unwrap();
    assert_eq!(
        cli.command.presets(),
        vec![PresetAnswer::Pick(1), PresetAnswer::SavePath(output.clone())]
    );

    let mut host = host_for(&cli);
    run_command(&mut host, &cli.command);

    assert_eq!(host.errors_shown(), 0);
    let html = fs::read_to_string(ws.path("out/report.html")).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<h2>File: src/app.ts</h2>"));
}

#[test]
fn test_filter_flags_become_prompt_answers() {
    let ws = Workspace::new();
    let cli = Cli::try_parse_from(ws.args(&[
        "copy-with-filter",
        "--compact",
        "--severity",
        "warnings",
        "--pattern",
        "src/*",
    ]))
    .unwrap();
    assert_eq!(
        cli.command.presets(),
        vec![
            PresetAnswer::Pick(1),
            PresetAnswer::Pick(2),
            PresetAnswer::Input("src/*".to_string()),
            PresetAnswer::Input(String::new()),
        ]
    );

    let interactive = Cli::try_parse_from(ws.args(&["copy-with-filter"])).unwrap();
    assert!(interactive.command.presets().is_empty());
}

#[test]
fn test_settings_file_under_root_is_used() {
    let ws = Workspace::new();
    fs::write(
        ws.path(".problem-report.toml"),
        "[problemReport]\ngroupByFile = false\naddSummary = false\n",
    )
    .unwrap();
    let cli = Cli::try_parse_from(ws.args(&["copy-compact"])).unwrap();
    let host = host_for(&cli);

    let report = generate_markdown(&host, &ReportRequest::compact()).unwrap();
    assert!(report.contains("## 🔴 Errors (1)\n"));
    assert!(report.contains("## 🟠 Warnings (1)\n"));
    assert!(!report.contains("## Summary"));
}

#[test]
fn test_invalid_dump_is_reported() {
    let ws = Workspace::new();
    fs::write(ws.path("diagnostics.json"), "{ \"not\": \"an array\" }").unwrap();
    let cli = Cli::try_parse_from(ws.args(&["copy"])).unwrap();
    let prompter = TerminalPrompter::new(Cursor::new(Vec::new()), io::sink());
    let err = build_host(&cli, Box::new(prompter)).err().unwrap();
    assert!(matches!(err, CliError::Dump { kind: "diagnostics", .. }));
}

#[test]
fn test_missing_settings_path_falls_back_to_defaults() {
    let ws = Workspace::new();
    let missing = Path::new("/definitely/not/here.toml").display().to_string();
    let cli = Cli::try_parse_from(ws.args(&["--config", &missing, "copy"])).unwrap();
    let host = host_for(&cli);
    let report = generate_markdown(&host, &ReportRequest::compact()).unwrap();
    assert!(report.contains("## Summary"));
}
