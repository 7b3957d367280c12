//! Harness driver: runs the registered workloads one after another on the
//! calling thread and prints one progress line per workload.

use crate::error::{HarnessError, Result};
use crate::measure::{is_reliable, timer_resolution, Protocol};
use crate::result::{HarnessRun, Measurement};
use crate::workloads::{default_workloads, Workload};
use std::io::Write;
use ual_bench_core::config::HarnessSettings;

/// Width of the `=` banner.
pub const BANNER_WIDTH: usize = 78;

/// Default banner title.
pub const DEFAULT_TITLE: &str = "RUST REFERENCE BENCHMARKS (cargo --release)";

/// Banner block printed before the first workload.
pub fn banner(title: &str) -> String {
    let rule = "=".repeat(BANNER_WIDTH);
    format!("{rule}\n{title}\n{rule}\n")
}

/// One `name  ns/op` line, padded like the other reference harnesses.
pub fn progress_line(measurement: &Measurement) -> String {
    let mut line = format!("{:<30} {:>12.2} ns/op", measurement.name, measurement.ns_per_op);
    if !measurement.reliable {
        line.push_str("  (unreliable)");
    }
    line
}

/// Sequential runner over a set of workloads.
pub struct Harness {
    title: String,
    protocol: Protocol,
    iteration_scale: f64,
    min_resolution_ratio: f64,
    workloads: Vec<Box<dyn Workload>>,
}

impl Harness {
    /// Harness over the default workloads.
    pub fn new(settings: &HarnessSettings) -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            protocol: Protocol::from(settings),
            iteration_scale: settings.iteration_scale,
            min_resolution_ratio: settings.min_resolution_ratio,
            workloads: default_workloads(),
        }
    }

    /// Replace the workload set.
    pub fn with_workloads(mut self, workloads: Vec<Box<dyn Workload>>) -> Self {
        self.workloads = workloads;
        self
    }

    /// Replace the banner title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Keep only the named workloads (case-insensitive), in registry order.
    pub fn select(mut self, names: &[String]) -> Result<Self> {
        if names.is_empty() {
            return Ok(self);
        }

        for name in names {
            if !self
                .workloads
                .iter()
                .any(|w| w.name().eq_ignore_ascii_case(name))
            {
                return Err(HarnessError::UnknownWorkload {
                    name: name.clone(),
                    available: self.workload_names().join(", "),
                });
            }
        }

        self.workloads
            .retain(|w| names.iter().any(|n| w.name().eq_ignore_ascii_case(n)));
        Ok(self)
    }

    /// Registered workload names.
    pub fn workload_names(&self) -> Vec<&'static str> {
        self.workloads.iter().map(|w| w.name()).collect()
    }

    /// Timed iteration count after scaling, never below one.
    pub fn scaled_iterations(&self, base: u64) -> u64 {
        ((base as f64 * self.iteration_scale).round() as u64).max(1)
    }

    /// Run every workload, writing the banner and progress lines to `out`.
    pub fn run(&self, out: &mut dyn Write) -> Result<HarnessRun> {
        let resolution = timer_resolution();
        let mut run = HarnessRun::new(self.title.clone(), resolution.as_nanos() as u64);

        write!(out, "{}", banner(&self.title))?;
        writeln!(out)?;

        for workload in &self.workloads {
            let iterations = self.scaled_iterations(workload.iterations());
            let timing = workload.measure(&self.protocol, iterations)?;
            let reliable = is_reliable(timing.ns_per_op, resolution, self.min_resolution_ratio);
            let measurement = Measurement::new(workload.name(), &timing, reliable);

            tracing::debug!(
                workload = workload.name(),
                iterations,
                warmup = timing.warmup_iterations,
                ns_per_op = timing.ns_per_op,
                "workload measured"
            );
            if !reliable {
                tracing::warn!(
                    workload = workload.name(),
                    ns_per_op = timing.ns_per_op,
                    resolution_ns = run.timer_resolution_ns,
                    "per-op cost too close to timer resolution"
                );
            }

            writeln!(out, "{}", progress_line(&measurement))?;
            out.flush()?;
            run.measurements.push(measurement);
        }

        writeln!(out)?;
        Ok(run)
    }
}
