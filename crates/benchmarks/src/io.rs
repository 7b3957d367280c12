//! I/O operations for harness runs.
//!
//! Runs are stored as pretty-printed JSON. Saved runs go through the
//! append-only [`ArtifactStore`], so every run gets its own timestamped file
//! and `harness_latest.json` always points at the newest one.

use crate::error::Result;
use crate::result::HarnessRun;
use chrono::Local;
use std::fs;
use std::path::Path;
use ual_bench_core::{ArtifactStore, CoreError, Published};

/// Prefix of saved run files.
pub const RUN_PREFIX: &str = "harness_";

/// Alias of the newest saved run.
pub const RUN_ALIAS: &str = "harness_latest.json";

/// Serialize a run as pretty JSON.
pub fn to_json(run: &HarnessRun) -> Result<String> {
    Ok(serde_json::to_string_pretty(run)?)
}

/// Write a run to a JSON file.
pub fn write_run_json(run: &HarnessRun, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = to_json(run)?;
    fs::write(path, json).map_err(|e| CoreError::io(path, e))?;
    Ok(())
}

/// Read a run from a JSON file.
pub fn read_run_json(path: impl AsRef<Path>) -> Result<HarnessRun> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| CoreError::io(path, e))?;
    Ok(serde_json::from_str(&content)?)
}

/// Save a run as a new timestamped file in `dir` and repoint the alias.
pub fn save_run(run: &HarnessRun, dir: impl AsRef<Path>) -> Result<Published> {
    let store = ArtifactStore::create(dir.as_ref())?;
    let json = to_json(run)?;
    Ok(store.publish(RUN_PREFIX, "json", json.as_bytes(), RUN_ALIAS, Local::now())?)
}
