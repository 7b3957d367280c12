//! Reference compute benchmarks for ual backend comparisons.
//!
//! This crate times seven fixed numeric kernels (Mandelbrot, trapezoidal
//! integration, Leibniz series, Newton-Raphson, array sum, DP Fibonacci and
//! transcendental math calls) under a single warm-up/measure protocol and
//! reports nanoseconds per operation. The numbers serve as the native baseline
//! the compiled and interpreted ual backends are compared against.
//!
//! # Quick Start
//!
//! ```no_run
//! use ual_bench_core::config::HarnessSettings;
//! use ual_benchmarks::run_all_benchmarks;
//!
//! let run = run_all_benchmarks(&HarnessSettings::default(), &mut std::io::stdout())?;
//! for m in &run.measurements {
//!     println!("{}: {:.2} ns/op", m.name, m.ns_per_op);
//! }
//! # Ok::<(), ual_benchmarks::HarnessError>(())
//! ```
//!
//! # Modules
//!
//! - [`workloads`] - The kernels and their fixed arguments
//! - [`measure`] - The timing primitive and reliability check
//! - [`harness`] - Sequential runner and console output
//! - [`result`] - Serializable run results
//! - [`io`] - Reading, writing and saving runs
//! - [`markdown`] - Markdown summary generation

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod error;
pub mod harness;
pub mod io;
pub mod markdown;
pub mod measure;
pub mod result;
pub mod workloads;

pub use error::{HarnessError, Result};
pub use harness::Harness;
pub use measure::{measure, Timing};
pub use result::{HarnessRun, Measurement};
pub use workloads::{default_workloads, Kernel, Workload};

use std::path::Path;
use ual_bench_core::config::HarnessSettings;
use ual_bench_core::Published;

/// Run all default workloads, printing progress to `out`.
pub fn run_all_benchmarks(
    settings: &HarnessSettings,
    out: &mut dyn std::io::Write,
) -> Result<HarnessRun> {
    Harness::new(settings).run(out)
}

/// Run all default workloads and save the run under `dir`.
///
/// # Errors
///
/// Returns an error if writing the progress output or the run file fails.
pub fn run_and_save_all(
    settings: &HarnessSettings,
    out: &mut dyn std::io::Write,
    dir: impl AsRef<Path>,
) -> Result<(HarnessRun, Published)> {
    let run = run_all_benchmarks(settings, out)?;
    let published = io::save_run(&run, dir)?;
    Ok((run, published))
}
