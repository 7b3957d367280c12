//! End-to-end report generation against temporary directories.

use chrono::{Local, TimeZone};
use std::fs;
use std::path::Path;
use ual_bench_core::config::ReportSettings;
use ual_bench_report::{generate_report, generate_report_at, ReportError, REPORT_ALIAS};

const SAMPLE: &str = r#"{
    "version": "0.7.4",
    "timestamp": "2024-02-02T09:00:00",
    "correctness": {"total": 92, "iual_pass": 91},
    "benchmarks": [
        {"name": "compute_leibniz", "go_ms": 12.5, "rust_ms": 10, "iual_ms": 40},
        {"name": "compute_mandelbrot", "go_ms": 5, "rust_ms": 4, "iual_ms": 22},
        {"name": "compute_newton", "go_ms": 3, "iual_ms": 6}
    ],
    "cross_language": {
        "c": {"leibniz": 10, "mandelbrot": 4, "newton": 2},
        "rust_native": {"leibniz": 9},
        "python": {"leibniz": 800, "mandelbrot": 300, "newton": 120}
    },
    "binary_sizes": {"go_stripped": 2097152, "rust_stripped": 1048576, "iual_stripped": 524288}
}"#;

fn write(dir: &Path, name: &str, body: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(name), body).unwrap();
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn full_document_renders_every_section() {
    let tmp = tempfile::tempdir().unwrap();
    let results = tmp.path().join("results");
    let output = tmp.path().join("reports");
    write(&results, "benchmark_20240202_090000.json", SAMPLE);

    let generated = generate_report(&results, &output, &ReportSettings::default()).unwrap();
    assert!(generated
        .source
        .ends_with("benchmark_20240202_090000.json"));

    let html = fs::read_to_string(&generated.latest).unwrap();
    assert!(html.contains("Version: 0.7.4"));
    assert!(html.contains("91/92"));
    assert!(html.contains("0.98x"));
    assert!(html.contains("3.3x"));
    assert!(html.contains("Cross-Language Comparison"));
    assert!(html.contains("Analysis: Compiled ual vs C"));
    assert!(html.contains("Analysis: iual Interpreter vs Compiled"));
    assert!(html.contains("Analysis: iual vs Python"));
    assert!(html.contains("20.0x faster"));
    assert!(html.contains("2048KB"));
    assert!(!html.contains("≈"));
}

#[test]
fn newest_timestamped_results_are_used() {
    let tmp = tempfile::tempdir().unwrap();
    let results = tmp.path().join("results");
    write(&results, "benchmark_20240101_000000.json", r#"{"version": "january"}"#);
    write(&results, "benchmark_20240202_000000.json", r#"{"version": "february"}"#);

    let generated =
        generate_report(&results, &tmp.path().join("out"), &ReportSettings::default()).unwrap();
    assert!(generated.source.ends_with("benchmark_20240202_000000.json"));
    let html = fs::read_to_string(&generated.report).unwrap();
    assert!(html.contains("Version: february"));
}

#[test]
fn empty_results_directory_writes_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let results = tmp.path().join("results");
    fs::create_dir_all(&results).unwrap();
    let output = tmp.path().join("reports");

    let err = generate_report(&results, &output, &ReportSettings::default()).unwrap_err();
    assert!(matches!(err, ReportError::NoResults { .. }));
    assert!(err.to_string().contains(&results.display().to_string()));
    assert!(!output.exists());
}

#[test]
fn unparsable_results_write_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let results = tmp.path().join("results");
    write(&results, "benchmark_20240101_000000.json", r#"{"benchmarks": [{"go_ms": 1}]}"#);
    let output = tmp.path().join("reports");

    let err = generate_report(&results, &output, &ReportSettings::default()).unwrap_err();
    assert!(matches!(err, ReportError::Parse { .. }));
    assert!(!output.exists());
}

#[test]
fn consecutive_runs_keep_both_reports() {
    let tmp = tempfile::tempdir().unwrap();
    let results = tmp.path().join("results");
    let output = tmp.path().join("reports");
    write(&results, "latest.json", r#"{"version": "first"}"#);

    let now = Local.with_ymd_and_hms(2024, 2, 2, 12, 0, 0).unwrap();
    let settings = ReportSettings::default();
    let first = generate_report_at(&results, &output, &settings, now).unwrap();

    write(&results, "latest.json", r#"{"version": "second"}"#);
    let second = generate_report_at(&results, &output, &settings, now).unwrap();

    assert_ne!(first.report, second.report);
    assert_eq!(first.latest, output.join(REPORT_ALIAS));
    assert_eq!(
        file_names(&output),
        vec![
            "latest.html",
            "report_20240202_120000.html",
            "report_20240202_120000_1.html"
        ]
    );

    assert!(fs::read_to_string(&first.report).unwrap().contains("Version: first"));
    let latest = fs::read_to_string(&second.latest).unwrap();
    assert!(latest.contains("Version: second"));
    assert_eq!(latest, fs::read_to_string(&second.report).unwrap());
}

#[test]
fn missing_rust_timings_render_approximate_ratio() {
    let tmp = tempfile::tempdir().unwrap();
    let results = tmp.path().join("results");
    write(
        &results,
        "latest.json",
        r#"{"benchmarks": {"compute_newton": {"go_ms": 3, "iual_ms": 9}}}"#,
    );

    let generated =
        generate_report(&results, &tmp.path().join("out"), &ReportSettings::default()).unwrap();
    let html = fs::read_to_string(generated.report).unwrap();
    assert!(html.contains("≈1.00x"));
    assert!(html.contains("Version: unknown"));
}

#[test]
fn custom_settings_reach_the_page() {
    let tmp = tempfile::tempdir().unwrap();
    let results = tmp.path().join("results");
    write(&results, "latest.json", "{}");
    let settings = ReportSettings {
        chart_js_url: "vendor/chart.umd.js".to_string(),
        project_url: "https://example.org/ual".to_string(),
    };

    let generated = generate_report(&results, &tmp.path().join("out"), &settings).unwrap();
    let html = fs::read_to_string(generated.report).unwrap();
    assert!(html.contains(r#"<script src="vendor/chart.umd.js"></script>"#));
    assert!(html.contains(r#"<a href="https://example.org/ual">example.org/ual</a>"#));
}

#[test]
fn null_text_and_float_entries_still_render() {
    let tmp = tempfile::tempdir().unwrap();
    let results = tmp.path().join("results");
    write(
        &results,
        "latest.json",
        r#"{
            "benchmarks": {"compute_mandelbrot": {"go_ms": 6}},
            "cross_language": {
                "c": {"leibniz": null, "mandelbrot": 4, "compiler": "gcc -O2"},
                "python": "not installed"
            },
            "binary_sizes": {"go_stripped": 2097152.0, "rust_stripped": null, "note": "stripped"}
        }"#,
    );

    let generated =
        generate_report(&results, &tmp.path().join("out"), &ReportSettings::default()).unwrap();
    let html = fs::read_to_string(generated.report).unwrap();
    assert!(html.contains("Analysis: Compiled ual vs C"));
    assert!(html.contains("1.5x"));
    assert!(html.contains("2048KB"));
    assert!(!html.contains("Analysis: iual vs Python"));
}
