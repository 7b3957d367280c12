//! Harness result types.
//!
//! A [`HarnessRun`] is the serializable outcome of one harness invocation:
//! one [`Measurement`] per timed workload plus the clock resolution the
//! reliability check was made against.

use crate::measure::Timing;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timing of a single workload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Workload name.
    pub name: String,
    /// Timed calls.
    pub iterations: u64,
    /// Untimed warm-up calls.
    pub warmup_iterations: u64,
    /// Mean nanoseconds per call.
    pub ns_per_op: f64,
    /// False when the per-op cost is too close to the timer resolution.
    pub reliable: bool,
    /// When the measurement finished.
    pub timestamp: DateTime<Utc>,
}

impl Measurement {
    /// Create a measurement from a timing.
    pub fn new(name: impl Into<String>, timing: &Timing, reliable: bool) -> Self {
        Self {
            name: name.into(),
            iterations: timing.iterations,
            warmup_iterations: timing.warmup_iterations,
            ns_per_op: timing.ns_per_op,
            reliable,
            timestamp: Utc::now(),
        }
    }
}

/// Outcome of one harness invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarnessRun {
    /// Banner title.
    pub title: String,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Measured monotonic clock resolution.
    pub timer_resolution_ns: u64,
    /// Measurements in execution order.
    pub measurements: Vec<Measurement>,
}

impl HarnessRun {
    /// Start an empty run.
    pub fn new(title: impl Into<String>, timer_resolution_ns: u64) -> Self {
        Self {
            title: title.into(),
            started_at: Utc::now(),
            timer_resolution_ns,
            measurements: Vec::new(),
        }
    }

    /// Measurement of a workload by name.
    pub fn get(&self, name: &str) -> Option<&Measurement> {
        self.measurements.iter().find(|m| m.name == name)
    }

    /// Measurements flagged unreliable.
    pub fn unreliable(&self) -> impl Iterator<Item = &Measurement> {
        self.measurements.iter().filter(|m| !m.reliable)
    }
}
