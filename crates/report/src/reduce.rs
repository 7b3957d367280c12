// Copyright 2025 ual Contributors
// SPDX-License-Identifier: Apache-2.0

//! Data reduction: results document to display-ready report data.
//!
//! Everything the page shows is computed here as plain strings, CSS class
//! names and numeric series, so the renderer only substitutes values and
//! the arithmetic can be tested without looking at markup.

use crate::ratio::{
    ms_str, ratio_class, ratio_str, RatioClass, COMPILED_VS_C_THRESHOLD, INTERPRETER_THRESHOLD,
    NOT_AVAILABLE,
};
use chrono::{DateTime, Local};
use ual_bench_core::{defined_ratio, Backend, BenchmarkRecord, ResultsDocument};

/// Workloads compared across languages, keyed `compute_<name>` in `benchmarks`.
pub const CROSS_LANGUAGE_WORKLOADS: [&str; 3] = ["leibniz", "mandelbrot", "newton"];

/// Cross-language tag of C timings.
pub const LANG_C: &str = "c";
/// Cross-language tag of native Rust timings.
pub const LANG_RUST: &str = "rust_native";
/// Cross-language tag of Python timings.
pub const LANG_PYTHON: &str = "python";

/// Shown when the results carry no version.
pub const UNKNOWN_VERSION: &str = "unknown";

/// iual/Compiled summary card is favorable below this ratio and a warning
/// at or above it.
pub const INTERPRETER_CARD_FAVORABLE: f64 = 5.0;

/// Mean backend time over the workloads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackendAverage {
    /// Mean over the measured entries
    Measured(f64),
    /// No entry measured; another backend's mean stands in
    Substituted(f64),
    /// No entry measured and nothing to stand in
    Missing,
}

impl BackendAverage {
    /// Numeric value, measured or substituted.
    pub fn value(&self) -> Option<f64> {
        match self {
            BackendAverage::Measured(v) | BackendAverage::Substituted(v) => Some(*v),
            BackendAverage::Missing => None,
        }
    }

    /// Whether the value is a stand-in.
    pub fn is_substituted(&self) -> bool {
        matches!(self, BackendAverage::Substituted(_))
    }
}

/// Headline numbers of the summary cards.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryMetrics {
    /// `"<passing>/<total>"` or the placeholder.
    pub examples: String,
    /// Mean Go-compiled time.
    pub avg_go: BackendAverage,
    /// Mean Rust-compiled time, substituted by the Go mean when unmeasured.
    pub avg_rust: BackendAverage,
    /// Mean interpreter time.
    pub avg_iual: BackendAverage,
    /// Go / Rust card text, `≈`-prefixed when the Rust mean is substituted.
    pub go_rust_ratio: String,
    /// iual / Compiled card text.
    pub iual_ratio: String,
    /// Class of the iual / Compiled card.
    pub iual_class: RatioClass,
    /// Stripped Go binary size in KiB.
    pub go_size_kb: u64,
    /// Stripped Rust binary size in KiB.
    pub rust_size_kb: u64,
    /// Interpreter binary size in KiB.
    pub iual_size_kb: u64,
}

/// One table cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Display text.
    pub text: String,
    /// Extra CSS class.
    pub class: Option<&'static str>,
}

impl Cell {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            class: None,
        }
    }

    fn ratio(a: Option<f64>, b: Option<f64>, good: f64) -> Self {
        let (a, b) = (a.unwrap_or(0.0), b.unwrap_or(0.0));
        Self {
            text: ratio_str(a, b),
            class: ratio_class(a, b, good).css_class(),
        }
    }

    fn ms(value: Option<f64>) -> Self {
        Self::plain(ms_str(value))
    }
}

/// One table row: a label and numeric cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// First-column label.
    pub label: String,
    /// Remaining columns.
    pub cells: Vec<Cell>,
}

/// A titled comparison table.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Card heading.
    pub title: &'static str,
    /// Column headers, label column first.
    pub headers: Vec<&'static str>,
    /// Body rows.
    pub rows: Vec<Row>,
    /// Footnote under the table.
    pub note: &'static str,
}

impl Table {
    /// Cell text at `row`, `col` (label column excluded).
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.cells.get(col).map(|c| c.text.as_str())
    }
}

/// Series of the backend execution-time chart. Unmeasured values are 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSeries {
    /// Workload labels.
    pub labels: Vec<String>,
    /// Go-compiled times.
    pub go: Vec<f64>,
    /// Rust-compiled times.
    pub rust: Vec<f64>,
    /// Interpreter times.
    pub iual: Vec<f64>,
}

/// Everything the page template needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportData {
    /// Toolchain version.
    pub version: String,
    /// Run timestamp, or the generation time when absent.
    pub timestamp: String,
    /// Summary cards.
    pub summary: SummaryMetrics,
    /// Per-workload backend table, always present.
    pub backend_table: Table,
    /// Cross-language table, when any language data exists.
    pub cross_language: Option<Table>,
    /// Analysis tables, in display order.
    pub analysis: Vec<Table>,
    /// Execution-time chart.
    pub backend_chart: ChartSeries,
    /// Binary-size chart: Go, Rust, iual in KiB.
    pub size_chart: [u64; 3],
}

/// Reduce a results document to report data.
pub fn reduce(doc: &ResultsDocument, generated_at: DateTime<Local>) -> ReportData {
    let summary = summarize(doc);
    let size_chart = [summary.go_size_kb, summary.rust_size_kb, summary.iual_size_kb];

    ReportData {
        version: doc
            .version
            .clone()
            .unwrap_or_else(|| UNKNOWN_VERSION.to_string()),
        timestamp: doc
            .timestamp
            .clone()
            .unwrap_or_else(|| generated_at.format("%Y-%m-%dT%H:%M:%S").to_string()),
        summary,
        backend_table: backend_table(doc),
        cross_language: cross_language_table(doc),
        analysis: analysis_tables(doc),
        backend_chart: backend_chart(doc),
        size_chart,
    }
}

/// Compute the summary cards.
pub fn summarize(doc: &ResultsDocument) -> SummaryMetrics {
    let avg_go = average(doc, Backend::Go);
    let avg_iual = average(doc, Backend::Iual);
    let avg_rust = match average(doc, Backend::Rust) {
        BackendAverage::Missing => match avg_go {
            BackendAverage::Measured(go) => {
                tracing::debug!("no rust timings, using the go mean for the Go/Rust card");
                BackendAverage::Substituted(go)
            }
            _ => BackendAverage::Missing,
        },
        measured => measured,
    };

    let go_rust_ratio = match (avg_go.value(), avg_rust.value()) {
        (Some(go), Some(rust)) => match defined_ratio(go, rust) {
            Some(r) if avg_rust.is_substituted() => format!("≈{r:.2}x"),
            Some(r) => format!("{r:.2}x"),
            None => NOT_AVAILABLE.to_string(),
        },
        _ => NOT_AVAILABLE.to_string(),
    };

    let iual_vs_go = match (avg_iual.value(), avg_go.value()) {
        (Some(iual), Some(go)) => defined_ratio(iual, go),
        _ => None,
    };
    let (iual_ratio, iual_class) = match iual_vs_go {
        Some(r) => (format!("{r:.1}x"), interpreter_card_class(r)),
        None => (NOT_AVAILABLE.to_string(), RatioClass::Unclassified),
    };

    SummaryMetrics {
        examples: examples_passing(doc),
        avg_go,
        avg_rust,
        avg_iual,
        go_rust_ratio,
        iual_ratio,
        iual_class,
        go_size_kb: doc.size_kib(&["go_stripped"]),
        rust_size_kb: doc.size_kib(&["rust_stripped"]),
        iual_size_kb: doc.size_kib(&["iual_stripped", "iual"]),
    }
}

// 20x and slower stays a warning rather than dropping back to unstyled.
fn interpreter_card_class(ratio: f64) -> RatioClass {
    if ratio < INTERPRETER_CARD_FAVORABLE {
        RatioClass::Favorable
    } else {
        RatioClass::Unfavorable
    }
}

fn examples_passing(doc: &ResultsDocument) -> String {
    match doc.correctness.total.filter(|t| *t > 0) {
        Some(total) => {
            let passing = doc.correctness.passed(Backend::Iual).unwrap_or(total);
            format!("{passing}/{total}")
        }
        None => NOT_AVAILABLE.to_string(),
    }
}

fn average(doc: &ResultsDocument, backend: Backend) -> BackendAverage {
    let times: Vec<f64> = doc
        .benchmarks
        .values()
        .filter_map(|record| record.time(backend))
        .collect();
    if times.is_empty() {
        BackendAverage::Missing
    } else {
        BackendAverage::Measured(times.iter().sum::<f64>() / times.len() as f64)
    }
}

/// Python-style title case: a letter is upper-cased when it follows a
/// non-letter, lower-cased otherwise.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut after_letter = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if after_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            after_letter = true;
        } else {
            out.push(ch);
            after_letter = false;
        }
    }
    out
}

/// Display label of a workload key.
pub fn workload_label(name: &str) -> String {
    title_case(&name.replace('_', " "))
}

fn compute_record<'a>(doc: &'a ResultsDocument, workload: &str) -> Option<&'a BenchmarkRecord> {
    doc.benchmarks.get(&format!("compute_{workload}"))
}

fn compute_time(doc: &ResultsDocument, workload: &str, backend: Backend) -> Option<f64> {
    compute_record(doc, workload)?.time(backend)
}

fn backend_table(doc: &ResultsDocument) -> Table {
    let rows = doc
        .benchmarks
        .iter()
        .map(|(name, record)| Row {
            label: workload_label(name),
            cells: vec![
                Cell::ms(record.time(Backend::Go)),
                Cell::ms(record.time(Backend::Rust)),
                Cell::ms(record.time(Backend::Iual)),
                Cell::ratio(
                    record.time(Backend::Iual),
                    record.time(Backend::Go),
                    INTERPRETER_THRESHOLD,
                ),
            ],
        })
        .collect();

    Table {
        title: "ual Backend Results",
        headers: vec!["Benchmark", "Go (ms)", "Rust (ms)", "iual (ms)", "iual/Go"],
        rows,
        note: "iual uses threaded code compilation for compute blocks",
    }
}

fn cross_language_table(doc: &ResultsDocument) -> Option<Table> {
    let any = [LANG_C, LANG_RUST, LANG_PYTHON]
        .iter()
        .any(|tag| doc.language(tag).is_some());
    if !any {
        return None;
    }

    let rows = CROSS_LANGUAGE_WORKLOADS
        .iter()
        .map(|w| Row {
            label: title_case(w),
            cells: vec![
                Cell::ms(doc.language_time(LANG_C, w)),
                Cell::ms(doc.language_time(LANG_RUST, w)),
                Cell::ms(doc.language_time(LANG_PYTHON, w)),
                Cell::ms(compute_time(doc, w, Backend::Go)),
                Cell::ms(compute_time(doc, w, Backend::Iual)),
            ],
        })
        .collect();

    Some(Table {
        title: "Cross-Language Comparison",
        headers: vec![
            "Benchmark",
            "C (ms)",
            "Rust (ms)",
            "Python (ms)",
            "ual-Go (ms)",
            "iual (ms)",
        ],
        rows,
        note: "C compiled with -O2, Rust with --release, Python 3.x interpreted",
    })
}

fn analysis_tables(doc: &ResultsDocument) -> Vec<Table> {
    if doc.language(LANG_C).is_none() {
        return Vec::new();
    }

    let mut tables = vec![compiled_vs_c(doc), interpreter_vs_compiled(doc)];
    if doc.language(LANG_PYTHON).is_some() {
        tables.push(interpreter_vs_python(doc));
    }
    tables
}

fn compiled_vs_c(doc: &ResultsDocument) -> Table {
    let rows = CROSS_LANGUAGE_WORKLOADS
        .iter()
        .map(|w| {
            let c = doc.language_time(LANG_C, w);
            let go = compute_time(doc, w, Backend::Go);
            let rust = compute_time(doc, w, Backend::Rust);
            Row {
                label: title_case(w),
                cells: vec![
                    Cell::ms(c),
                    Cell::ms(go),
                    Cell::ratio(go, c, COMPILED_VS_C_THRESHOLD),
                    Cell::ms(rust),
                    Cell::ratio(rust, c, COMPILED_VS_C_THRESHOLD),
                ],
            }
        })
        .collect();

    Table {
        title: "Analysis: Compiled ual vs C",
        headers: vec![
            "Benchmark",
            "C (ms)",
            "ual-Go (ms)",
            "ual-Go / C",
            "ual-Rust (ms)",
            "ual-Rust / C",
        ],
        rows,
        note: "Compiled ual should be within 1.0-2.0x of C for compute-heavy workloads",
    }
}

fn interpreter_vs_compiled(doc: &ResultsDocument) -> Table {
    let rows = CROSS_LANGUAGE_WORKLOADS
        .iter()
        .map(|w| {
            let go = compute_time(doc, w, Backend::Go);
            let iual = compute_time(doc, w, Backend::Iual);
            Row {
                label: title_case(w),
                cells: vec![
                    Cell::ms(go),
                    Cell::ms(iual),
                    Cell::ratio(iual, go, INTERPRETER_THRESHOLD),
                ],
            }
        })
        .collect();

    Table {
        title: "Analysis: iual Interpreter vs Compiled",
        headers: vec!["Benchmark", "ual-Go (ms)", "iual (ms)", "iual / ual-Go"],
        rows,
        note: "Threaded code compilation makes iual competitive on structured loops",
    }
}

fn interpreter_vs_python(doc: &ResultsDocument) -> Table {
    let rows = CROSS_LANGUAGE_WORKLOADS
        .iter()
        .map(|w| {
            let python = doc.language_time(LANG_PYTHON, w);
            let iual = compute_time(doc, w, Backend::Iual);
            let speedup = match (python, iual) {
                (Some(py), Some(iual)) => Cell {
                    text: format!("{:.1}x faster", py / iual),
                    class: RatioClass::Favorable.css_class(),
                },
                _ => Cell::plain(NOT_AVAILABLE),
            };
            Row {
                label: title_case(w),
                cells: vec![Cell::ms(python), Cell::ms(iual), speedup],
            }
        })
        .collect();

    Table {
        title: "Analysis: iual vs Python",
        headers: vec!["Benchmark", "Python (ms)", "iual (ms)", "iual Speedup"],
        rows,
        note: "iual beats Python on every benchmark through threaded code compilation",
    }
}

fn backend_chart(doc: &ResultsDocument) -> ChartSeries {
    let mut chart = ChartSeries::default();
    for (name, record) in &doc.benchmarks {
        chart.labels.push(workload_label(name));
        chart.go.push(record.time(Backend::Go).unwrap_or(0.0));
        chart.rust.push(record.time(Backend::Rust).unwrap_or(0.0));
        chart.iual.push(record.time(Backend::Iual).unwrap_or(0.0));
    }
    chart
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn generated_at() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 2, 2, 10, 30, 0).unwrap()
    }

    fn doc(json: &str) -> ResultsDocument {
        ResultsDocument::from_json_str(json).unwrap()
    }

    #[test]
    fn test_title_case() {
        assert_eq!(workload_label("compute_leibniz"), "Compute Leibniz");
        assert_eq!(workload_label("FIB_recursive"), "Fib Recursive");
        assert_eq!(title_case("fib2x"), "Fib2X");
        assert_eq!(title_case("newton"), "Newton");
    }

    #[test]
    fn test_fallback_version_and_timestamp() {
        let data = reduce(&doc("{}"), generated_at());
        assert_eq!(data.version, "unknown");
        assert_eq!(data.timestamp, "2024-02-02T10:30:00");
        assert!(data.backend_table.rows.is_empty());
        assert!(data.cross_language.is_none());
        assert!(data.analysis.is_empty());
        assert_eq!(data.summary.examples, "—");
        assert_eq!(data.summary.go_rust_ratio, "—");
        assert_eq!(data.summary.iual_ratio, "—");
        assert_eq!(data.summary.iual_class, RatioClass::Unclassified);
    }

    #[test]
    fn test_averages_ignore_unmeasured_entries() {
        let d = doc(
            r#"{"benchmarks": {
                "a": {"go_ms": 10, "rust_ms": 5, "iual_ms": 30},
                "b": {"go_ms": 30, "rust_ms": 0, "iual_ms": 90},
                "c": {"iual_ms": 0}
            }}"#,
        );
        let s = summarize(&d);
        assert_eq!(s.avg_go, BackendAverage::Measured(20.0));
        assert_eq!(s.avg_rust, BackendAverage::Measured(5.0));
        assert_eq!(s.avg_iual, BackendAverage::Measured(60.0));
        assert_eq!(s.go_rust_ratio, "4.00x");
        assert_eq!(s.iual_ratio, "3.0x");
        assert_eq!(s.iual_class, RatioClass::Favorable);
    }

    #[test]
    fn test_missing_rust_is_substituted_and_flagged() {
        let d = doc(r#"{"benchmarks": {"a": {"go_ms": 8, "iual_ms": 80}}}"#);
        let s = summarize(&d);
        assert_eq!(s.avg_rust, BackendAverage::Substituted(8.0));
        assert!(s.avg_rust.is_substituted());
        assert_eq!(s.go_rust_ratio, "≈1.00x");
        assert_eq!(s.iual_ratio, "10.0x");
        assert_eq!(s.iual_class, RatioClass::Unfavorable);
    }

    #[test]
    fn test_interpreter_card_bands() {
        let class = |iual: f64| {
            let json = format!(r#"{{"benchmarks": {{"a": {{"go_ms": 1, "iual_ms": {iual}}}}}}}"#);
            summarize(&doc(&json)).iual_class.css_class()
        };
        assert_eq!(class(4.9), Some("success"));
        assert_eq!(class(5.0), Some("warning"));
        assert_eq!(class(10.0), Some("warning"));
        assert_eq!(class(19.9), Some("warning"));
        // at 20x and beyond the card keeps warning
        assert_eq!(class(25.0), Some("warning"));
    }

    #[test]
    fn test_examples_passing() {
        let with_pass = doc(r#"{"correctness": {"total": 92, "iual_pass": 90}}"#);
        assert_eq!(summarize(&with_pass).examples, "90/92");

        let default_pass = doc(r#"{"correctness": {"total": 92}}"#);
        assert_eq!(summarize(&default_pass).examples, "92/92");

        let zero_total = doc(r#"{"correctness": {"total": 0, "iual_pass": 0}}"#);
        assert_eq!(summarize(&zero_total).examples, "—");
    }

    #[test]
    fn test_binary_sizes() {
        let d = doc(
            r#"{"binary_sizes": {"go_stripped": 2097152, "rust_stripped": 1048576, "iual": 524288}}"#,
        );
        let data = reduce(&d, generated_at());
        assert_eq!(data.summary.go_size_kb, 2048);
        assert_eq!(data.summary.rust_size_kb, 1024);
        assert_eq!(data.summary.iual_size_kb, 512);
        assert_eq!(data.size_chart, [2048, 1024, 512]);
    }

    #[test]
    fn test_backend_rows_sorted_with_placeholders() {
        let d = doc(
            r#"{"benchmarks": [
                {"name": "compute_newton", "go_ms": 2, "iual_ms": 3},
                {"name": "compute_leibniz", "go_ms": 4, "rust_ms": 3.5, "iual_ms": 20}
            ]}"#,
        );
        let data = reduce(&d, generated_at());
        let table = &data.backend_table;

        assert_eq!(table.rows[0].label, "Compute Leibniz");
        assert_eq!(table.rows[1].label, "Compute Newton");
        assert_eq!(table.cell(0, 1), Some("3.5"));
        assert_eq!(table.cell(0, 3), Some("5.0x"));
        assert_eq!(table.rows[0].cells[3].class, Some("warning"));
        assert_eq!(table.cell(1, 1), Some("—"));
        assert_eq!(table.cell(1, 3), Some("1.5x"));
        assert_eq!(table.rows[1].cells[3].class, Some("success"));

        assert_eq!(data.backend_chart.labels, vec!["Compute Leibniz", "Compute Newton"]);
        assert_eq!(data.backend_chart.rust, vec![3.5, 0.0]);
    }

    #[test]
    fn test_cross_language_only_tables() {
        let d = doc(r#"{"cross_language": {"python": {"leibniz": 900}}}"#);
        let data = reduce(&d, generated_at());
        let cross = data.cross_language.unwrap();
        assert_eq!(cross.rows.len(), 3);
        assert_eq!(cross.cell(0, 2), Some("900"));
        assert_eq!(cross.cell(0, 0), Some("—"));
        // python alone does not unlock the analysis tables
        assert!(data.analysis.is_empty());
    }

    #[test]
    fn test_analysis_tables_with_c_and_python() {
        let d = doc(
            r#"{
                "benchmarks": {
                    "compute_leibniz": {"go_ms": 12, "rust_ms": 10, "iual_ms": 40},
                    "compute_mandelbrot": {"go_ms": 5, "iual_ms": 9}
                },
                "cross_language": {
                    "c": {"leibniz": 10, "mandelbrot": 2, "newton": 1},
                    "python": {"leibniz": 400, "mandelbrot": 90}
                }
            }"#,
        );
        let data = reduce(&d, generated_at());
        let titles: Vec<&str> = data.analysis.iter().map(|t| t.title).collect();
        assert_eq!(
            titles,
            vec![
                "Analysis: Compiled ual vs C",
                "Analysis: iual Interpreter vs Compiled",
                "Analysis: iual vs Python"
            ]
        );

        let vs_c = &data.analysis[0];
        assert_eq!(vs_c.cell(0, 2), Some("1.2x"));
        assert_eq!(vs_c.rows[0].cells[2].class, Some("success"));
        assert_eq!(vs_c.cell(1, 2), Some("2.5x"));
        assert_eq!(vs_c.rows[1].cells[2].class, None);
        assert_eq!(vs_c.cell(1, 4), Some("—"));
        assert_eq!(vs_c.cell(2, 2), Some("—"));

        let vs_compiled = &data.analysis[1];
        assert_eq!(vs_compiled.cell(0, 2), Some("3.3x"));
        assert_eq!(vs_compiled.rows[0].cells[2].class, Some("warning"));

        let vs_python = &data.analysis[2];
        assert_eq!(vs_python.cell(0, 2), Some("10.0x faster"));
        assert_eq!(vs_python.rows[0].cells[2].class, Some("success"));
        assert_eq!(vs_python.cell(2, 2), Some("—"));
        assert_eq!(
            vs_python.note,
            "iual beats Python on every benchmark through threaded code compilation"
        );
    }

    #[test]
    fn test_c_without_python_omits_python_analysis() {
        let d = doc(r#"{"cross_language": {"c": {"leibniz": 10}, "python": {}}}"#);
        let data = reduce(&d, generated_at());
        assert_eq!(data.analysis.len(), 2);
    }
}
