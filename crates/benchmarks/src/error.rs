//! Harness error type.

use thiserror::Error;
use ual_bench_core::CoreError;

/// Errors that can occur while configuring or running the harness.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// A workload was asked to run zero timed iterations
    #[error("iteration count must be positive")]
    ZeroIterations,

    /// A name filter matched no registered workload
    #[error("Unknown workload '{name}' (available: {available})")]
    UnknownWorkload {
        /// Requested name
        name: String,
        /// Comma-separated registered names
        available: String,
    },

    /// Storage or configuration failure
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Output stream failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for harness operations.
pub type Result<T> = std::result::Result<T, HarnessError>;
