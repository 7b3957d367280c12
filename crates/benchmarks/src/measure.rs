//! Timing protocol.
//!
//! A measurement runs `min(warmup_cap, iterations / warmup_divisor)` untimed
//! warm-up calls, then times exactly `iterations` sequential calls between two
//! monotonic timestamps and reports the mean cost per call. Arguments and
//! results go through [`black_box`] so the calls cannot be folded away.

use crate::error::{HarnessError, Result};
use std::hint::black_box;
use std::time::{Duration, Instant};
use ual_bench_core::config::HarnessSettings;

/// Warm-up policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Protocol {
    /// Upper bound on warm-up calls.
    pub warmup_cap: u64,
    /// Warm-up calls are `iterations / warmup_divisor`, capped.
    pub warmup_divisor: u64,
}

impl Default for Protocol {
    fn default() -> Self {
        Self {
            warmup_cap: 1000,
            warmup_divisor: 10,
        }
    }
}

impl From<&HarnessSettings> for Protocol {
    fn from(settings: &HarnessSettings) -> Self {
        Self {
            warmup_cap: settings.warmup_cap,
            warmup_divisor: settings.warmup_divisor.max(1),
        }
    }
}

impl Protocol {
    /// Number of warm-up calls for a run of `iterations` timed calls.
    pub fn warmup_for(&self, iterations: u64) -> u64 {
        (iterations / self.warmup_divisor.max(1)).min(self.warmup_cap)
    }
}

/// Outcome of one timed run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    /// Timed calls.
    pub iterations: u64,
    /// Untimed warm-up calls.
    pub warmup_iterations: u64,
    /// Wall-clock time of the timed phase.
    pub elapsed: Duration,
    /// `elapsed / iterations` in nanoseconds.
    pub ns_per_op: f64,
}

/// Time `workload(args)` under the default protocol.
pub fn measure<A, R>(workload: impl Fn(A) -> R, args: A, iterations: u64) -> Result<Timing>
where
    A: Copy,
{
    measure_with(&Protocol::default(), workload, args, iterations)
}

/// Time `workload(args)` under an explicit protocol.
pub fn measure_with<A, R>(
    protocol: &Protocol,
    workload: impl Fn(A) -> R,
    args: A,
    iterations: u64,
) -> Result<Timing>
where
    A: Copy,
{
    if iterations == 0 {
        return Err(HarnessError::ZeroIterations);
    }

    let warmup_iterations = protocol.warmup_for(iterations);
    for _ in 0..warmup_iterations {
        black_box(workload(black_box(args)));
    }

    let start = Instant::now();
    for _ in 0..iterations {
        black_box(workload(black_box(args)));
    }
    let elapsed = start.elapsed();

    Ok(Timing {
        iterations,
        warmup_iterations,
        elapsed,
        ns_per_op: elapsed.as_nanos() as f64 / iterations as f64,
    })
}

/// Smallest observable step of the monotonic clock.
///
/// Returns [`Duration::ZERO`] if the clock never advanced while sampling.
pub fn timer_resolution() -> Duration {
    const SAMPLES: usize = 32;
    const MAX_SPINS: usize = 1_000_000;

    let mut best: Option<Duration> = None;
    for _ in 0..SAMPLES {
        let t0 = Instant::now();
        for _ in 0..MAX_SPINS {
            let step = Instant::now().duration_since(t0);
            if step > Duration::ZERO {
                best = Some(best.map_or(step, |b| b.min(step)));
                break;
            }
        }
    }

    best.unwrap_or_else(|| {
        tracing::warn!("monotonic clock did not advance while sampling its resolution");
        Duration::ZERO
    })
}

/// Whether a per-op cost is large enough relative to the timer resolution.
pub fn is_reliable(ns_per_op: f64, resolution: Duration, min_ratio: f64) -> bool {
    ns_per_op >= resolution.as_nanos() as f64 * min_ratio
}
