//! Saving and reloading harness runs.

use std::fs;
use ual_bench_core::config::HarnessSettings;
use ual_benchmarks::{io, run_and_save_all, Harness};

fn tiny() -> HarnessSettings {
    HarnessSettings {
        iteration_scale: 0.00005,
        ..HarnessSettings::default()
    }
}

#[test]
fn saved_run_round_trips_through_latest_alias() {
    let dir = tempfile::tempdir().unwrap();
    let (run, published) = run_and_save_all(&tiny(), &mut std::io::sink(), dir.path()).unwrap();

    assert!(published
        .artifact
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with(io::RUN_PREFIX));
    assert_eq!(published.alias, dir.path().join(io::RUN_ALIAS));

    let reloaded = io::read_run_json(&published.alias).unwrap();
    assert_eq!(reloaded, run);
}

#[test]
fn repeated_saves_keep_every_run() {
    let dir = tempfile::tempdir().unwrap();
    let harness = Harness::new(&tiny())
        .select(&["newton".to_string()])
        .unwrap();

    let first_run = harness.run(&mut std::io::sink()).unwrap();
    let first = io::save_run(&first_run, dir.path()).unwrap();
    let second_run = harness.run(&mut std::io::sink()).unwrap();
    let second = io::save_run(&second_run, dir.path()).unwrap();

    assert_ne!(first.artifact, second.artifact);
    assert_eq!(io::read_run_json(&first.artifact).unwrap(), first_run);
    assert_eq!(io::read_run_json(&second.alias).unwrap(), second_run);

    let saved = fs::read_dir(dir.path())
        .unwrap()
        .filter(|e| {
            e.as_ref()
                .unwrap()
                .file_name()
                .to_string_lossy()
                .starts_with(io::RUN_PREFIX)
        })
        .count();
    // two timestamped runs plus the alias
    assert_eq!(saved, 3);
}

#[test]
fn write_and_read_explicit_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run.json");
    let run = Harness::new(&tiny())
        .select(&["MathOps".to_string()])
        .unwrap()
        .run(&mut std::io::sink())
        .unwrap();

    io::write_run_json(&run, &path).unwrap();
    let json = fs::read_to_string(&path).unwrap();
    assert!(json.contains("\"name\": \"MathOps\""));
    assert!(json.contains("\"ns_per_op\""));
    assert_eq!(io::read_run_json(&path).unwrap(), run);
}
