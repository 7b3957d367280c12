// Copyright 2025 ual Contributors
// SPDX-License-Identifier: Apache-2.0

//! Results file selection and loading.

use crate::error::{ReportError, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use ual_bench_core::ResultsDocument;

/// Alias written by the benchmark runner for its newest results.
pub const LATEST_RESULTS: &str = "latest.json";

/// Prefix of timestamped results files.
pub const RESULTS_PREFIX: &str = "benchmark_";

/// Pick the results file to report on.
///
/// `latest.json` wins when it resolves to a file. Otherwise the
/// lexicographically greatest `benchmark_*.json` is taken, which for
/// `benchmark_<YYYYMMDD_HHMMSS>.json` names is the newest run. A missing
/// directory is treated as empty.
pub fn select_results(dir: &Path) -> Result<PathBuf> {
    let latest = dir.join(LATEST_RESULTS);
    if latest.is_file() {
        return Ok(latest);
    }

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(dir = %dir.display(), "results directory does not exist");
            return Err(ReportError::NoResults {
                dir: dir.to_path_buf(),
            });
        }
        Err(e) => return Err(ReportError::io(dir, e)),
    };

    let mut newest: Option<(String, PathBuf)> = None;
    for entry in entries {
        let entry = entry.map_err(|e| ReportError::io(dir, e))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.starts_with(RESULTS_PREFIX) || !name.ends_with(".json") {
            continue;
        }
        if !entry.path().is_file() {
            continue;
        }
        if newest.as_ref().map_or(true, |(best, _)| name > *best) {
            newest = Some((name, entry.path()));
        }
    }

    newest
        .map(|(_, path)| path)
        .ok_or_else(|| ReportError::NoResults {
            dir: dir.to_path_buf(),
        })
}

/// Parse a results file.
pub fn read_results(path: &Path) -> Result<ResultsDocument> {
    let content = fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?;
    serde_json::from_str(&content).map_err(|source| ReportError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Select and parse the newest results in `dir`.
pub fn load_latest_results(dir: &Path) -> Result<(PathBuf, ResultsDocument)> {
    let path = select_results(dir)?;
    tracing::info!(path = %path.display(), "loading benchmark results");
    let document = read_results(&path)?;
    Ok((path, document))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str, body: &str) {
        fs::write(dir.join(name), body).unwrap();
    }

    #[test]
    fn test_newest_timestamp_selected() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "benchmark_20240101_000000.json", "{}");
        touch(dir.path(), "benchmark_20240202_000000.json", "{}");
        touch(dir.path(), "notes.json", "{}");

        let path = select_results(dir.path()).unwrap();
        assert_eq!(
            path.file_name().unwrap(),
            "benchmark_20240202_000000.json"
        );
    }

    #[test]
    fn test_latest_alias_preferred() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "benchmark_20990101_000000.json", "{}");
        touch(dir.path(), LATEST_RESULTS, r#"{"version": "0.7.4"}"#);

        let (path, doc) = load_latest_results(dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), LATEST_RESULTS);
        assert_eq!(doc.version.as_deref(), Some("0.7.4"));
    }

    #[test]
    fn test_empty_and_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            select_results(dir.path()),
            Err(ReportError::NoResults { .. })
        ));

        let missing = dir.path().join("nope");
        match select_results(&missing) {
            Err(ReportError::NoResults { dir }) => assert_eq!(dir, missing),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_json_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "benchmark_20240101_000000.json", "{not json");

        let err = load_latest_results(dir.path()).unwrap_err();
        match &err {
            ReportError::Parse { path, .. } => {
                assert!(path.ends_with("benchmark_20240101_000000.json"))
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert!(err.to_string().contains("benchmark_20240101_000000.json"));
    }
}
