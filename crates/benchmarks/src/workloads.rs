//! Reference compute kernels.
//!
//! Each kernel is a pure function of its arguments, so repeated calls with the
//! same arguments cost the same and return the same value. The registry pairs
//! every kernel with a fixed argument tuple and a default iteration count sized
//! for roughly a second of wall-clock time on a release build.

use crate::error::Result;
use crate::measure::{measure_with, Protocol, Timing};

/// Slots in the fixed buffers used by [`array_sum`] and [`dp_fib`].
pub const BUFFER_LEN: usize = 100;

const MANDELBROT_MAX_ITER: f64 = 1000.0;
const MANDELBROT_ESCAPE: f64 = 4.0;
const NEWTON_STEPS: usize = 20;

/// Escape iteration count of `z -> z² + c` for one point, capped at 1000.
pub fn mandelbrot(cr: f64, ci: f64) -> f64 {
    let (mut zr, mut zi) = (0.0_f64, 0.0_f64);
    let mut iter = 0.0;
    while iter < MANDELBROT_MAX_ITER {
        let zr2 = zr * zr;
        let zi2 = zi * zi;
        if zr2 + zi2 > MANDELBROT_ESCAPE {
            return iter;
        }
        zi = 2.0 * zr * zi + ci;
        zr = zr2 - zi2 + cr;
        iter += 1.0;
    }
    MANDELBROT_MAX_ITER
}

/// Trapezoidal integral of `x²` over `[a, b]` with `n` panels.
pub fn integrate(a: f64, b: f64, n: f64) -> f64 {
    let h = (b - a) / n;
    let mut sum = (a * a) / 2.0;
    let mut i = 1.0;
    while i < n {
        let x = a + i * h;
        sum += x * x;
        i += 1.0;
    }
    sum += (b * b) / 2.0;
    h * sum
}

/// π from the first `terms` terms of the Leibniz series.
pub fn leibniz(terms: f64) -> f64 {
    let mut sum = 0.0;
    let mut sign = 1.0;
    let mut denom = 1.0;
    let mut i = 0.0;
    while i < terms {
        sum += sign / denom;
        sign = -sign;
        denom += 2.0;
        i += 1.0;
    }
    4.0 * sum
}

/// Square root of `x` after 20 Newton-Raphson steps from `x / 2`.
pub fn newton(x: f64) -> f64 {
    let mut guess = x / 2.0;
    for _ in 0..NEWTON_STEPS {
        guess = (guess + x / guess) / 2.0;
    }
    guess
}

/// Fill a local buffer with `1..=n` and sum it back.
///
/// # Panics
///
/// If `n` is negative or not below [`BUFFER_LEN`].
pub fn array_sum(n: i64) -> i64 {
    let n = buffer_index(n);
    let mut buf = [0_i64; BUFFER_LEN];
    for (i, slot) in buf.iter_mut().enumerate().take(n) {
        *slot = i as i64 + 1;
    }
    buf[..n].iter().sum()
}

/// `n`-th Fibonacci number by bottom-up dynamic programming.
///
/// # Panics
///
/// If `n` is negative or not below [`BUFFER_LEN`].
pub fn dp_fib(n: i64) -> i64 {
    let n = buffer_index(n);
    let mut dp = [0_i64; BUFFER_LEN];
    dp[1] = 1;
    for i in 2..=n {
        dp[i] = dp[i - 1] + dp[i - 2];
    }
    dp[n]
}

/// `sqrt(x) + sin(x) + cos(x) + ln(x + 1)`.
pub fn math_ops(x: f64) -> f64 {
    x.sqrt() + x.sin() + x.cos() + (x + 1.0).ln()
}

fn buffer_index(n: i64) -> usize {
    match usize::try_from(n) {
        Ok(n) if n < BUFFER_LEN => n,
        _ => panic!("buffer kernels need 0 <= n < {BUFFER_LEN}, got {n}"),
    }
}

/// A named workload the harness can time.
pub trait Workload {
    /// Display name, also used by name filters.
    fn name(&self) -> &'static str;

    /// Default timed iteration count.
    fn iterations(&self) -> u64;

    /// Time `iterations` calls under the given protocol.
    fn measure(&self, protocol: &Protocol, iterations: u64) -> Result<Timing>;
}

/// A pure function bound to a fixed argument tuple.
#[derive(Debug, Clone, Copy)]
pub struct Kernel<A, R> {
    /// Display name.
    pub name: &'static str,
    /// Arguments passed on every call.
    pub args: A,
    /// Default timed iteration count.
    pub iterations: u64,
    /// The kernel.
    pub func: fn(A) -> R,
}

impl<A: Copy, R> Workload for Kernel<A, R> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn iterations(&self) -> u64 {
        self.iterations
    }

    fn measure(&self, protocol: &Protocol, iterations: u64) -> Result<Timing> {
        measure_with(protocol, self.func, self.args, iterations)
    }
}

/// The seven reference workloads in reporting order.
pub fn default_workloads() -> Vec<Box<dyn Workload>> {
    vec![
        Box::new(Kernel {
            name: "Mandelbrot",
            args: (0.25, 0.5),
            iterations: 300_000,
            func: |(cr, ci): (f64, f64)| mandelbrot(cr, ci),
        }),
        Box::new(Kernel {
            name: "Integrate",
            args: (0.0, 1.0, 1000.0),
            iterations: 1_000_000,
            func: |(a, b, n): (f64, f64, f64)| integrate(a, b, n),
        }),
        Box::new(Kernel {
            name: "Leibniz",
            args: 100_000.0,
            iterations: 10_000,
            func: leibniz,
        }),
        Box::new(Kernel {
            name: "Newton",
            args: 2.0,
            iterations: 100_000_000,
            func: newton,
        }),
        Box::new(Kernel {
            name: "ArraySum",
            args: 50,
            iterations: 30_000_000,
            func: array_sum,
        }),
        Box::new(Kernel {
            name: "DPFib",
            args: 40,
            iterations: 20_000_000,
            func: dp_fib,
        }),
        Box::new(Kernel {
            name: "MathOps",
            args: 2.0,
            iterations: 40_000_000,
            func: math_ops,
        }),
    ]
}
