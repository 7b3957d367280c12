// Copyright 2025 ual Contributors
// SPDX-License-Identifier: Apache-2.0

//! Results document schema.
//!
//! A [`ResultsDocument`] is the JSON file produced by one benchmark run and
//! consumed read-only by the report generator. Every field is optional and
//! falls back to an empty value, so partially populated runs still load.
//!
//! The `benchmarks` field is accepted either as a mapping keyed by workload
//! name or as a list of records carrying their own `name`; both forms are
//! normalized to a name-keyed [`BTreeMap`].

use crate::error::Result;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// An execution backend of the measured language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Backend {
    /// Ahead-of-time compiled through Go
    Go,
    /// Ahead-of-time compiled through Rust
    Rust,
    /// The iual interpreter
    Iual,
}

impl Backend {
    /// Tag used in JSON keys (`go_ms`, `go_stripped`, `go_pass`).
    pub fn tag(&self) -> &'static str {
        match self {
            Backend::Go => "go",
            Backend::Rust => "rust",
            Backend::Iual => "iual",
        }
    }
}

/// Returns the value only if it counts as measured (strictly positive).
pub fn measured(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v > 0.0)
}

/// `a / b` when both operands are strictly positive, otherwise `None`.
///
/// Never yields infinity, zero or NaN.
pub fn defined_ratio(a: f64, b: f64) -> Option<f64> {
    if a > 0.0 && b > 0.0 {
        Some(a / b)
    } else {
        None
    }
}

/// Timings of one workload across backends, in milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    /// Workload name.
    #[serde(default)]
    pub name: String,
    /// Go-compiled backend time.
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub go_ms: Option<f64>,
    /// Rust-compiled backend time.
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub rust_ms: Option<f64>,
    /// Interpreter time.
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub iual_ms: Option<f64>,
}

impl BenchmarkRecord {
    /// Create an empty record for the named workload.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the time for one backend.
    pub fn with_time(mut self, backend: Backend, ms: f64) -> Self {
        match backend {
            Backend::Go => self.go_ms = Some(ms),
            Backend::Rust => self.rust_ms = Some(ms),
            Backend::Iual => self.iual_ms = Some(ms),
        }
        self
    }

    /// Raw recorded value for a backend, including zeros.
    pub fn raw_time(&self, backend: Backend) -> Option<f64> {
        match backend {
            Backend::Go => self.go_ms,
            Backend::Rust => self.rust_ms,
            Backend::Iual => self.iual_ms,
        }
    }

    /// Measured time for a backend; zero and absent both read as `None`.
    pub fn time(&self, backend: Backend) -> Option<f64> {
        measured(self.raw_time(backend))
    }

    /// Ratio `numerator / denominator` between two backends, if defined.
    pub fn ratio(&self, numerator: Backend, denominator: Backend) -> Option<f64> {
        defined_ratio(self.time(numerator)?, self.time(denominator)?)
    }
}

/// Correctness counts of the example suite.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Correctness {
    /// Number of examples in the suite.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    /// Per-backend `<backend>_pass` counts and any additive fields.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Correctness {
    /// Number of passing examples for a backend, if recorded.
    pub fn passed(&self, backend: Backend) -> Option<u64> {
        self.extra
            .get(&format!("{}_pass", backend.tag()))
            .and_then(Value::as_u64)
    }
}

/// Root object of a results file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultsDocument {
    /// Version of the measured toolchain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// ISO-8601 time of the run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Example-suite correctness counts.
    #[serde(default)]
    pub correctness: Correctness,
    /// Per-workload backend timings keyed by workload name.
    #[serde(default, deserialize_with = "deserialize_benchmarks")]
    pub benchmarks: BTreeMap<String, BenchmarkRecord>,
    /// Language tag -> workload -> milliseconds. Non-numeric entries are dropped.
    #[serde(default, deserialize_with = "deserialize_cross_language")]
    pub cross_language: BTreeMap<String, BTreeMap<String, f64>>,
    /// Backend size key -> bytes. Fractional counts are truncated.
    #[serde(default, deserialize_with = "deserialize_sizes")]
    pub binary_sizes: BTreeMap<String, u64>,
}

impl ResultsDocument {
    /// Parse a document from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the document as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Insert a record under its own name, replacing any previous one.
    pub fn insert_benchmark(&mut self, record: BenchmarkRecord) {
        self.benchmarks.insert(record.name.clone(), record);
    }

    /// Cross-language timings of one language, empty when absent.
    pub fn language(&self, tag: &str) -> Option<&BTreeMap<String, f64>> {
        self.cross_language.get(tag).filter(|times| !times.is_empty())
    }

    /// Measured cross-language time for a workload.
    pub fn language_time(&self, tag: &str, workload: &str) -> Option<f64> {
        measured(self.language(tag)?.get(workload).copied())
    }

    /// Size in KiB (truncating) of the first key present, 0 when none is.
    pub fn size_kib(&self, keys: &[&str]) -> u64 {
        keys.iter()
            .find_map(|key| self.binary_sizes.get(*key))
            .map(|bytes| bytes / 1024)
            .unwrap_or(0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BenchmarkSet {
    Keyed(BTreeMap<String, BenchmarkRecord>),
    Listed(Vec<BenchmarkRecord>),
}

fn deserialize_benchmarks<'de, D>(
    deserializer: D,
) -> std::result::Result<BTreeMap<String, BenchmarkRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<BenchmarkSet>::deserialize(deserializer)? {
        None => Ok(BTreeMap::new()),
        Some(BenchmarkSet::Keyed(map)) => Ok(map
            .into_iter()
            .map(|(key, mut record)| {
                record.name = key.clone();
                (key, record)
            })
            .collect()),
        Some(BenchmarkSet::Listed(records)) => index_by_name(records).map_err(|index| {
            D::Error::custom(format!("benchmark record #{index} has no name"))
        }),
    }
}

/// A number, or `None` for null, text, or any other non-numeric value.
fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_f64())
}

fn deserialize_cross_language<'de, D>(
    deserializer: D,
) -> std::result::Result<BTreeMap<String, BTreeMap<String, f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, Value>>::deserialize(deserializer)?.unwrap_or_default();
    let mut languages = BTreeMap::new();
    for (language, times) in raw {
        let Value::Object(times) = times else {
            tracing::debug!(%language, "cross-language entry is not an object, ignoring");
            continue;
        };
        let numeric = times
            .into_iter()
            .filter_map(|(workload, ms)| match ms.as_f64() {
                Some(ms) => Some((workload, ms)),
                None => {
                    tracing::debug!(
                        %language,
                        %workload,
                        "non-numeric timing, treating as unmeasured"
                    );
                    None
                }
            })
            .collect();
        languages.insert(language, numeric);
    }
    Ok(languages)
}

fn deserialize_sizes<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<String, u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .filter_map(|(key, bytes)| {
            let bytes = bytes.as_u64().or_else(|| {
                bytes
                    .as_f64()
                    .filter(|b| b.is_finite() && *b >= 0.0)
                    .map(|b| b as u64)
            });
            if bytes.is_none() {
                tracing::debug!(%key, "non-numeric binary size, ignoring");
            }
            bytes.map(|b| (key, b))
        })
        .collect())
}

/// Key list-form records by name. The last record wins on a repeated name.
fn index_by_name(
    records: Vec<BenchmarkRecord>,
) -> std::result::Result<BTreeMap<String, BenchmarkRecord>, usize> {
    let mut indexed = BTreeMap::new();
    for (index, record) in records.into_iter().enumerate() {
        if record.name.is_empty() {
            return Err(index);
        }
        if indexed.contains_key(&record.name) {
            tracing::warn!(name = %record.name, "duplicate benchmark name, keeping last record");
        }
        indexed.insert(record.name.clone(), record);
    }
    Ok(indexed)
}
