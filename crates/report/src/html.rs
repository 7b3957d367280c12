// Copyright 2025 ual Contributors
// SPDX-License-Identifier: Apache-2.0

//! HTML rendering of reduced report data.
//!
//! The page is a single self-contained document: inline CSS with a dark
//! variant, the summary cards, two Chart.js canvases fed by JSON arrays, and
//! the comparison tables. All values arrive pre-formatted from
//! [`crate::reduce`]; nothing is recomputed here.

use crate::error::Result;
use crate::reduce::{ReportData, Table};
use serde::Serialize;
use std::fmt::Write;
use ual_bench_core::config::ReportSettings;
use ual_bench_core::CoreError;

const PAGE_STYLE: &str = r#"        * { box-sizing: border-box; }

        :root {
            --bg-primary: #f5f5f5;
            --bg-card: white;
            --text-primary: #333;
            --text-secondary: #666;
            --text-muted: #888;
            --border-color: #eee;
            --border-strong: #ddd;
            --accent-blue: #0066cc;
            --accent-green: #00aa00;
            --accent-orange: #cc6600;
            --hover-bg: #f9f9f9;
            --shadow: rgba(0,0,0,0.1);
            --link-color: #666;
        }

        @media (prefers-color-scheme: dark) {
            :root {
                --bg-primary: #1a1a1a;
                --bg-card: #2a2a2a;
                --text-primary: #e0e0e0;
                --text-secondary: #aaa;
                --text-muted: #888;
                --border-color: #3a3a3a;
                --border-strong: #4a4a4a;
                --accent-blue: #4da6ff;
                --accent-green: #00cc00;
                --accent-orange: #ff9933;
                --hover-bg: #333;
                --shadow: rgba(0,0,0,0.3);
                --link-color: #aaa;
            }
        }

        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            margin: 0; padding: 2rem;
            background: var(--bg-primary);
            color: var(--text-primary);
        }
        .container { max-width: 1400px; margin: 0 auto; }
        header { margin-bottom: 2rem; }
        h1 { margin: 0 0 0.5rem 0; }
        .subtitle { color: var(--text-secondary); font-size: 0.9rem; }
        .summary {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
            gap: 1rem; margin-bottom: 2rem;
        }
        .metric-card, .card {
            background: var(--bg-card); border-radius: 8px; padding: 1.5rem;
            box-shadow: 0 1px 3px var(--shadow);
        }
        .metric-card { text-align: center; }
        .metric-value { font-size: 2.2rem; font-weight: bold; color: var(--accent-blue); }
        .metric-value.warning { color: var(--accent-orange); }
        .metric-value.success { color: var(--accent-green); }
        .metric-label { color: var(--text-secondary); font-size: 0.85rem; margin-top: 0.5rem; }
        .dashboard, .analysis-grid {
            display: grid;
            gap: 1.5rem; margin-bottom: 2rem;
        }
        .dashboard { grid-template-columns: repeat(auto-fit, minmax(450px, 1fr)); }
        .analysis-grid { grid-template-columns: repeat(auto-fit, minmax(400px, 1fr)); row-gap: 2.5rem; }
        .card { margin-bottom: 1.5rem; }
        .card h2 { margin: 0 0 1rem 0; font-size: 1.1rem; color: var(--text-secondary); }
        .chart-container { position: relative; height: 280px; }
        table { width: 100%; border-collapse: collapse; font-size: 0.9rem; }
        th, td { padding: 0.6rem; text-align: left; border-bottom: 1px solid var(--border-color); }
        th { font-weight: 600; color: var(--text-secondary); }
        tr:hover { background: var(--hover-bg); }
        .num { text-align: right; font-family: 'SF Mono', Monaco, Consolas, monospace; }
        .num.success { color: var(--accent-green); font-weight: 600; }
        .num.warning { color: var(--accent-orange); }
        .note { color: var(--text-muted); font-size: 0.8rem; margin-top: 1rem; }
        footer {
            margin-top: 2rem; padding-top: 1rem; border-top: 1px solid var(--border-strong);
            color: var(--text-muted); font-size: 0.85rem;
        }
        footer a { color: var(--link-color); }
"#;

const CHART_SETUP: &str = r#"        const isDark = window.matchMedia('(prefers-color-scheme: dark)').matches;
        const gridColor = isDark ? 'rgba(255,255,255,0.1)' : 'rgba(0,0,0,0.1)';
        Chart.defaults.color = isDark ? '#aaa' : '#666';
        Chart.defaults.borderColor = gridColor;
        const palette = ['rgba(54, 162, 235, 0.7)', 'rgba(255, 159, 64, 0.7)', 'rgba(75, 192, 192, 0.7)'];
        const axes = (title) => ({
            y: { beginAtZero: true, title: { display: true, text: title }, grid: { color: gridColor } },
            x: { grid: { color: gridColor } }
        });
"#;

/// Escape text for element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Serialize a value for embedding inside a `<script>` element.
///
/// Every `<` is written as `\u003c`, so no string can close the element.
pub fn script_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let json = serde_json::to_string(value).map_err(CoreError::from)?;
    Ok(json.replace('<', "\\u003c"))
}

/// Render the complete page.
pub fn render(data: &ReportData, settings: &ReportSettings) -> Result<String> {
    let mut page = String::with_capacity(32 * 1024);
    let version = escape(&data.version);

    writeln!(page, "<!DOCTYPE html>")?;
    writeln!(page, "<html lang=\"en\">")?;
    writeln!(page, "<head>")?;
    writeln!(page, "    <meta charset=\"UTF-8\">")?;
    writeln!(
        page,
        "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">"
    )?;
    writeln!(page, "    <title>ual Benchmark Report</title>")?;
    writeln!(
        page,
        "    <script src=\"{}\"></script>",
        escape(&settings.chart_js_url)
    )?;
    writeln!(page, "    <style>")?;
    page.push_str(PAGE_STYLE);
    writeln!(page, "    </style>")?;
    writeln!(page, "</head>")?;
    writeln!(page, "<body>")?;
    writeln!(page, "    <div class=\"container\">")?;

    writeln!(page, "        <header>")?;
    writeln!(page, "            <h1>ual Benchmark Report</h1>")?;
    writeln!(
        page,
        "            <div class=\"subtitle\">Generated: {} | Version: {}</div>",
        escape(&data.timestamp),
        version
    )?;
    writeln!(page, "        </header>")?;

    write_summary(&mut page, data)?;
    write_dashboard(&mut page)?;

    write_table(&mut page, &data.backend_table)?;
    if let Some(table) = &data.cross_language {
        write_table(&mut page, table)?;
    }
    if !data.analysis.is_empty() {
        writeln!(page, "        <div class=\"analysis-grid\">")?;
        for table in &data.analysis {
            write_table(&mut page, table)?;
        }
        writeln!(page, "        </div>")?;
    }

    let project = escape(&settings.project_url);
    let project_label = settings
        .project_url
        .trim_start_matches("https://")
        .trim_start_matches("http://");
    writeln!(
        page,
        "        <footer>ual v{version} · <a href=\"{project}\">{}</a></footer>",
        escape(project_label)
    )?;
    writeln!(page, "    </div>")?;

    write_charts(&mut page, data)?;

    writeln!(page, "</body>")?;
    writeln!(page, "</html>")?;
    Ok(page)
}

fn write_metric(page: &mut String, value: &str, class: Option<&str>, label: &str) -> std::fmt::Result {
    let class = class.map(|c| format!(" {c}")).unwrap_or_default();
    writeln!(page, "            <div class=\"metric-card\">")?;
    writeln!(
        page,
        "                <div class=\"metric-value{class}\">{}</div>",
        escape(value)
    )?;
    writeln!(page, "                <div class=\"metric-label\">{label}</div>")?;
    writeln!(page, "            </div>")
}

fn write_summary(page: &mut String, data: &ReportData) -> std::fmt::Result {
    let s = &data.summary;
    writeln!(page, "        <div class=\"summary\">")?;
    write_metric(page, &s.examples, Some("success"), "Examples Passing")?;
    write_metric(page, &s.go_rust_ratio, None, "Go / Rust")?;
    write_metric(page, &s.iual_ratio, s.iual_class.css_class(), "iual / Compiled")?;
    write_metric(page, &format!("{}KB", s.go_size_kb), None, "Go Binary (stripped)")?;
    writeln!(page, "        </div>")
}

fn write_dashboard(page: &mut String) -> std::fmt::Result {
    writeln!(page, "        <div class=\"dashboard\">")?;
    for (title, id) in [
        ("Backend Execution Time", "backendChart"),
        ("Binary Size Comparison (stripped)", "sizeChart"),
    ] {
        writeln!(page, "            <div class=\"card\">")?;
        writeln!(page, "                <h2>{title}</h2>")?;
        writeln!(
            page,
            "                <div class=\"chart-container\"><canvas id=\"{id}\"></canvas></div>"
        )?;
        writeln!(page, "            </div>")?;
    }
    writeln!(page, "        </div>")
}

fn write_table(page: &mut String, table: &Table) -> std::fmt::Result {
    writeln!(page, "        <div class=\"card\">")?;
    writeln!(page, "            <h2>{}</h2>", escape(table.title))?;
    writeln!(page, "            <table>")?;
    writeln!(page, "                <thead>")?;
    writeln!(page, "                    <tr>")?;
    for (i, header) in table.headers.iter().enumerate() {
        if i == 0 {
            writeln!(page, "                        <th>{}</th>", escape(header))?;
        } else {
            writeln!(
                page,
                "                        <th class=\"num\">{}</th>",
                escape(header)
            )?;
        }
    }
    writeln!(page, "                    </tr>")?;
    writeln!(page, "                </thead>")?;
    writeln!(page, "                <tbody>")?;
    for row in &table.rows {
        writeln!(page, "                    <tr>")?;
        writeln!(page, "                        <td>{}</td>", escape(&row.label))?;
        for cell in &row.cells {
            let class = cell.class.map(|c| format!(" {c}")).unwrap_or_default();
            writeln!(
                page,
                "                        <td class=\"num{class}\">{}</td>",
                escape(&cell.text)
            )?;
        }
        writeln!(page, "                    </tr>")?;
    }
    writeln!(page, "                </tbody>")?;
    writeln!(page, "            </table>")?;
    writeln!(page, "            <p class=\"note\">{}</p>", escape(table.note))?;
    writeln!(page, "        </div>")
}

fn write_charts(page: &mut String, data: &ReportData) -> Result<()> {
    let chart = &data.backend_chart;
    let labels = script_json(&chart.labels)?;
    let go = script_json(&chart.go)?;
    let rust = script_json(&chart.rust)?;
    let iual = script_json(&chart.iual)?;
    let sizes = script_json(&data.size_chart)?;

    writeln!(page, "    <script>")?;
    page.push_str(CHART_SETUP);
    writeln!(
        page,
        "        new Chart(document.getElementById('backendChart'), {{"
    )?;
    writeln!(page, "            type: 'bar',")?;
    writeln!(page, "            data: {{")?;
    writeln!(page, "                labels: {labels},")?;
    writeln!(page, "                datasets: [")?;
    writeln!(
        page,
        "                    {{ label: 'Go', data: {go}, backgroundColor: palette[0] }},"
    )?;
    writeln!(
        page,
        "                    {{ label: 'Rust', data: {rust}, backgroundColor: palette[1] }},"
    )?;
    writeln!(
        page,
        "                    {{ label: 'iual', data: {iual}, backgroundColor: palette[2] }}"
    )?;
    writeln!(page, "                ]")?;
    writeln!(page, "            }},")?;
    writeln!(
        page,
        "            options: {{ responsive: true, maintainAspectRatio: false, plugins: {{ legend: {{ position: 'top' }} }}, scales: axes('Time (ms)') }}"
    )?;
    writeln!(page, "        }});")?;
    writeln!(
        page,
        "        new Chart(document.getElementById('sizeChart'), {{"
    )?;
    writeln!(page, "            type: 'bar',")?;
    writeln!(
        page,
        "            data: {{ labels: ['Go', 'Rust', 'iual'], datasets: [{{ label: 'Size (KB)', data: {sizes}, backgroundColor: palette }}] }},"
    )?;
    writeln!(
        page,
        "            options: {{ responsive: true, maintainAspectRatio: false, plugins: {{ legend: {{ display: false }} }}, scales: axes('Size (KB)') }}"
    )?;
    writeln!(page, "        }});")?;
    writeln!(page, "    </script>")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reduce::reduce;
    use chrono::Local;
    use ual_bench_core::ResultsDocument;

    fn render_json(json: &str) -> String {
        let doc = ResultsDocument::from_json_str(json).unwrap();
        render(&reduce(&doc, Local::now()), &ReportSettings::default()).unwrap()
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a<b>&\"c'"), "a&lt;b&gt;&amp;&quot;c&#39;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_script_json_cannot_close_script() {
        let labels = vec!["</script><b>".to_string()];
        let json = script_json(&labels).unwrap();
        assert!(!json.contains('<'));
        assert_eq!(json, r#"["\u003c/script>\u003cb>"]"#);
    }

    #[test]
    fn test_hostile_workload_name_is_escaped() {
        let page = render_json(r#"{"benchmarks": {"</script><img>": {"go_ms": 1}}}"#);
        assert!(!page.contains("<img>"));
        assert_eq!(page.matches("</script>").count(), 2);
    }

    #[test]
    fn test_optional_sections() {
        let bare = render_json(r#"{"version": "0.7.4"}"#);
        assert!(bare.contains("ual Backend Results"));
        assert!(bare.contains("Version: 0.7.4"));
        assert!(!bare.contains("Cross-Language Comparison"));
        assert!(!bare.contains("class=\"analysis-grid\""));

        let full = render_json(
            r#"{"cross_language": {"c": {"leibniz": 1}, "python": {"leibniz": 50}}}"#,
        );
        assert!(full.contains("Cross-Language Comparison"));
        assert!(full.contains("Analysis: Compiled ual vs C"));
        assert!(full.contains("Analysis: iual vs Python"));
    }

    #[test]
    fn test_chart_data_embedded() {
        let page = render_json(
            r#"{"benchmarks": {"compute_newton": {"go_ms": 2.5, "iual_ms": 4}},
                "binary_sizes": {"go_stripped": 4096}}"#,
        );
        assert!(page.contains(r#"labels: ["Compute Newton"],"#));
        assert!(page.contains("data: [2.5]"));
        assert!(page.contains("data: [0.0]"));
        assert!(page.contains("data: [4,0,0]"));
        assert!(page.contains("<script src=\"https://cdn.jsdelivr.net/npm/chart.js\"></script>"));
    }

    #[test]
    fn test_substituted_ratio_rendered_with_marker() {
        let page = render_json(r#"{"benchmarks": {"a": {"go_ms": 3, "iual_ms": 6}}}"#);
        assert!(page.contains("≈1.00x"));
        assert!(page.contains("<div class=\"metric-value success\">2.0x</div>"));
    }
}
