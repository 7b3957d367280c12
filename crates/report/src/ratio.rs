// Copyright 2025 ual Contributors
// SPDX-License-Identifier: Apache-2.0

//! Ratio formatting and classification.

use ual_bench_core::defined_ratio;

/// Placeholder shown for any value that is not available.
pub const NOT_AVAILABLE: &str = "—";

/// Threshold for compiled ual against C.
pub const COMPILED_VS_C_THRESHOLD: f64 = 1.5;

/// Threshold for the interpreter against compiled ual.
pub const INTERPRETER_THRESHOLD: f64 = 2.0;

/// Ratios above this are unfavorable regardless of the favorable threshold.
pub const UNFAVORABLE_ABOVE: f64 = 3.0;

/// Display bucket of a ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatioClass {
    /// At or below the favorable threshold
    Favorable,
    /// Between the favorable threshold and [`UNFAVORABLE_ABOVE`]
    Neutral,
    /// Above [`UNFAVORABLE_ABOVE`]
    Unfavorable,
    /// Ratio undefined
    Unclassified,
}

impl RatioClass {
    /// CSS class attached to the cell, if any.
    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            RatioClass::Favorable => Some("success"),
            RatioClass::Unfavorable => Some("warning"),
            RatioClass::Neutral | RatioClass::Unclassified => None,
        }
    }
}

/// `a / b` as `"N.Nx"`, or the placeholder when either side is not positive.
pub fn ratio_str(a: f64, b: f64) -> String {
    match defined_ratio(a, b) {
        Some(r) => format!("{r:.1}x"),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Bucket `a / b` against a favorable threshold.
pub fn ratio_class(a: f64, b: f64, good: f64) -> RatioClass {
    match defined_ratio(a, b) {
        None => RatioClass::Unclassified,
        Some(r) if r <= good => RatioClass::Favorable,
        Some(r) if r <= UNFAVORABLE_ABOVE => RatioClass::Neutral,
        Some(_) => RatioClass::Unfavorable,
    }
}

/// Milliseconds as recorded, or the placeholder when unmeasured.
pub fn ms_str(value: Option<f64>) -> String {
    match value {
        Some(ms) => ms.to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}
