use criterion::{Criterion, black_box, criterion_group, criterion_main};
use problem_report::{
    Diagnostic, DiagnosticSeverity, MemoryHost, Range, ReportRequest, ReportSettings,
    generate_markdown,
};

fn source_text(line_count: usize) -> String {
    let mut out = String::with_capacity(line_count * 48);
    for i in 0..line_count {
        out.push_str(&format!("const value{i} = compute(value{i}, {i});\n"));
    }
    out
}

fn workspace(file_count: usize, per_file: usize) -> MemoryHost {
    let mut host = MemoryHost::new();
    host.set_settings(ReportSettings {
        add_timestamp: false,
        hover_language_id: String::new(),
        ..ReportSettings::default()
    });
    let text = source_text(per_file * 4);
    let severities = DiagnosticSeverity::ALL;
    for f in 0..file_count {
        let path = format!("src/module_{f:03}.ts");
        host.add_document(&path, &text, Some("typescript"));
        let diagnostics = (0..per_file)
            .map(|i| {
                Diagnostic::new(
                    Range::from_coords(i * 4, 6, i * 4, 12),
                    severities[(f + i) % severities.len()],
                    format!("problem {i} in module {f}"),
                )
            })
            .collect();
        host.set_diagnostics(&path, diagnostics);
    }
    host
}

fn bench_full_report(c: &mut Criterion) {
    let host = workspace(50, 40);
    c.bench_function("report/full_50_files_2000_problems", |b| {
        b.iter(|| {
            let report = generate_markdown(black_box(&host), &ReportRequest::full()).unwrap();
            black_box(report.len());
        })
    });
}

fn bench_compact_report(c: &mut Criterion) {
    let host = workspace(50, 40);
    c.bench_function("report/compact_50_files_2000_problems", |b| {
        b.iter(|| {
            let report = generate_markdown(black_box(&host), &ReportRequest::compact()).unwrap();
            black_box(report.len());
        })
    });
}

criterion_group!(benches, bench_full_report, bench_compact_report);
criterion_main!(benches);
