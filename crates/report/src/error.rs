// Copyright 2025 ual Contributors
// SPDX-License-Identifier: Apache-2.0

//! Report generation errors.

use std::path::PathBuf;
use thiserror::Error;
use ual_bench_core::CoreError;

/// Errors raised while selecting, reading or rendering a results document.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Neither `latest.json` nor any `benchmark_*.json` exists
    #[error("No benchmark results found in {}", dir.display())]
    NoResults {
        /// Directory that was searched
        dir: PathBuf,
    },

    /// The selected file is not a valid results document
    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        /// Selected results file
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Directory listing or file read failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Writing into the page buffer failed
    #[error("Render error: {0}")]
    Render(#[from] std::fmt::Error),

    /// Artifact storage failure
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ReportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReportError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;
