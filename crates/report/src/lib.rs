// Copyright 2025 ual Contributors
// SPDX-License-Identifier: Apache-2.0

//! Static HTML reports for ual benchmark results.
//!
//! One pass per invocation: select the newest results document, reduce it
//! to display-ready tables and chart series, render a self-contained page
//! and publish it as `report_<timestamp>.html` with `latest.html` pointing
//! at it.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use ual_bench_core::config::ReportSettings;
//! use ual_bench_report::generate_report;
//!
//! let generated = generate_report(
//!     Path::new("results"),
//!     Path::new("reports"),
//!     &ReportSettings::default(),
//! )?;
//! println!("Generated: {}", generated.report.display());
//! # Ok::<(), ual_bench_report::ReportError>(())
//! ```
//!
//! # Modules
//!
//! - [`load`] - Results file selection
//! - [`ratio`] - Ratio strings and classification
//! - [`reduce`] - Summary metrics, tables and chart series
//! - [`html`] - Page rendering

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod error;
pub mod html;
pub mod load;
pub mod ratio;
pub mod reduce;

pub use error::{ReportError, Result};
pub use ratio::{ratio_class, ratio_str, RatioClass};
pub use reduce::{reduce, ReportData};

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use ual_bench_core::config::ReportSettings;
use ual_bench_core::ArtifactStore;

/// Prefix of report files.
pub const REPORT_PREFIX: &str = "report_";

/// Alias of the newest report.
pub const REPORT_ALIAS: &str = "latest.html";

/// Paths written by [`generate_report`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedReport {
    /// Source results file.
    pub source: PathBuf,
    /// New timestamped report.
    pub report: PathBuf,
    /// `latest.html` alias.
    pub latest: PathBuf,
}

/// Generate a report from the newest results in `results_dir`.
///
/// Nothing is written to `output_dir` unless a results document was found
/// and parsed.
pub fn generate_report(
    results_dir: &Path,
    output_dir: &Path,
    settings: &ReportSettings,
) -> Result<GeneratedReport> {
    generate_report_at(results_dir, output_dir, settings, Local::now())
}

/// [`generate_report`] with an explicit generation time.
pub fn generate_report_at(
    results_dir: &Path,
    output_dir: &Path,
    settings: &ReportSettings,
    now: DateTime<Local>,
) -> Result<GeneratedReport> {
    let (source, document) = load::load_latest_results(results_dir)?;
    let data = reduce(&document, now);
    let page = html::render(&data, settings)?;

    let store = ArtifactStore::create(output_dir)?;
    let published = store.publish(REPORT_PREFIX, "html", page.as_bytes(), REPORT_ALIAS, now)?;

    Ok(GeneratedReport {
        source,
        report: published.artifact,
        latest: published.alias,
    })
}
