// Copyright 2025 ual Contributors
// SPDX-License-Identifier: Apache-2.0

//! Layered configuration for the benchmark tools.
//!
//! Sources, lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. An optional TOML file (`ualbench.toml` unless a path is given)
//! 3. Environment variables prefixed with `UALBENCH_`, nested with `__`
//!
//! # Example
//!
//! ```no_run
//! use ual_bench_core::config::BenchConfig;
//!
//! // UALBENCH_HARNESS__ITERATION_SCALE=0.1 shortens every workload tenfold
//! let config = BenchConfig::load(None)?;
//! println!("scale = {}", config.harness.iteration_scale);
//! # Ok::<(), ual_bench_core::CoreError>(())
//! ```

use crate::error::{CoreError, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "ualbench.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "UALBENCH";

/// Harness tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessSettings {
    /// Multiplier applied to every workload's default iteration count.
    pub iteration_scale: f64,
    /// Upper bound on warm-up calls.
    pub warmup_cap: u64,
    /// Warm-up calls are `iterations / warmup_divisor`, capped.
    pub warmup_divisor: u64,
    /// A per-op cost below `timer resolution * ratio` is flagged unreliable.
    pub min_resolution_ratio: f64,
}

impl Default for HarnessSettings {
    fn default() -> Self {
        Self {
            iteration_scale: 1.0,
            warmup_cap: 1000,
            warmup_divisor: 10,
            min_resolution_ratio: 100.0,
        }
    }
}

/// Report rendering settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Chart.js script URL embedded in the page.
    pub chart_js_url: String,
    /// Project link shown in the footer.
    pub project_url: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            chart_js_url: "https://cdn.jsdelivr.net/npm/chart.js".to_string(),
            project_url: "https://github.com/ha1tch/ual".to_string(),
        }
    }
}

/// Complete tool configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Harness settings.
    pub harness: HarnessSettings,
    /// Report settings.
    pub report: ReportSettings,
}

impl BenchConfig {
    /// Load configuration from defaults, a file and the environment.
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).format(FileFormat::Toml).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE)
                .format(FileFormat::Toml)
                .required(false),
        };

        let config: BenchConfig = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }

    /// Parse configuration from TOML text layered over the defaults.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let config: BenchConfig = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        let harness = &self.harness;
        if !harness.iteration_scale.is_finite() || harness.iteration_scale <= 0.0 {
            return Err(CoreError::Config(format!(
                "harness.iteration_scale must be a positive number, got {}",
                harness.iteration_scale
            )));
        }
        if harness.warmup_divisor == 0 {
            return Err(CoreError::Config(
                "harness.warmup_divisor must be > 0".to_string(),
            ));
        }
        if harness.min_resolution_ratio.is_nan() || harness.min_resolution_ratio < 0.0 {
            return Err(CoreError::Config(format!(
                "harness.min_resolution_ratio must be >= 0, got {}",
                harness.min_resolution_ratio
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BenchConfig::default();
        assert_eq!(config.harness.iteration_scale, 1.0);
        assert_eq!(config.harness.warmup_cap, 1000);
        assert_eq!(config.harness.warmup_divisor, 10);
        assert_eq!(config.harness.min_resolution_ratio, 100.0);
        assert!(config.report.chart_js_url.contains("chart.js"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_overrides_only_given_keys() {
        let config = BenchConfig::from_toml_str(
            r#"
            [harness]
            iteration_scale = 0.5

            [report]
            project_url = "https://example.org/ual"
            "#,
        )
        .unwrap();

        assert_eq!(config.harness.iteration_scale, 0.5);
        assert_eq!(config.harness.warmup_cap, 1000);
        assert_eq!(config.report.project_url, "https://example.org/ual");
        assert_eq!(
            config.report.chart_js_url,
            ReportSettings::default().chart_js_url
        );
    }

    #[test]
    fn test_invalid_scale_rejected() {
        let err = BenchConfig::from_toml_str("[harness]\niteration_scale = 0.0\n");
        assert!(matches!(err, Err(CoreError::Config(_))));
    }

    #[test]
    fn test_zero_divisor_rejected() {
        let err = BenchConfig::from_toml_str("[harness]\nwarmup_divisor = 0\n");
        assert!(matches!(err, Err(CoreError::Config(_))));
    }

    #[test]
    fn test_explicit_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(BenchConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bench.toml");
        std::fs::write(&path, "[harness]\nwarmup_cap = 5\n").unwrap();

        let config = BenchConfig::load(Some(&path)).unwrap();
        assert_eq!(config.harness.warmup_cap, 5);
    }
}
