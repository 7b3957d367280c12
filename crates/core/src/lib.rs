// Copyright 2025 ual Contributors
// SPDX-License-Identifier: Apache-2.0

//! Shared building blocks for the ual benchmark tools.
//!
//! # Modules
//!
//! - [`results`] - The `ResultsDocument` schema exchanged between a benchmark
//!   run and the report generator
//! - [`artifact`] - Append-only timestamped files with an atomic "latest" alias
//! - [`config`] - Layered configuration (defaults, TOML file, environment)
//! - [`error`] - Error type shared by the above

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod artifact;
pub mod config;
pub mod error;
pub mod results;

pub use artifact::{ArtifactStore, Published};
pub use config::BenchConfig;
pub use error::{CoreError, Result};
pub use results::{defined_ratio, measured, Backend, BenchmarkRecord, ResultsDocument};
