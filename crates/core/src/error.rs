// Copyright 2025 ual Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types shared by the benchmark tooling.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Filesystem operation failed
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// JSON (de)serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// Alias target must be a plain file name inside the alias directory
    #[error("Alias target {0} is not a file name inside the artifact directory")]
    AliasOutsideDir(PathBuf),
}

impl CoreError {
    /// Attach a path to an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CoreError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<config::ConfigError> for CoreError {
    fn from(err: config::ConfigError) -> Self {
        CoreError::Config(err.to_string())
    }
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
