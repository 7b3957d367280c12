//! CLI for the ual benchmark tools.
//!
//! `ualbench run` times the reference kernels; `ualbench report` turns the
//! newest results document into a static HTML page.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use ual_bench_core::BenchConfig;
use ual_bench_report::generate_report;
use ual_benchmarks::{io as run_io, markdown, Harness};

/// ual benchmark CLI.
#[derive(Parser, Debug)]
#[command(name = "ualbench")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (TOML). Defaults to ./ualbench.toml when present.
    #[arg(long, global = true, env = "UALBENCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log at info level instead of warn (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the reference benchmarks.
    ///
    /// Text output streams one line per workload to stdout. With the json
    /// or markdown formats the progress lines go to stderr and stdout only
    /// carries the finished document.
    Run {
        /// Output format.
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Only run the named workloads (repeatable, case-insensitive).
        #[arg(long, value_name = "NAME", value_delimiter = ',')]
        only: Vec<String>,

        /// Multiply every workload's iteration count.
        #[arg(long, value_name = "FACTOR")]
        scale: Option<f64>,

        /// Also save the run as a timestamped JSON file in this directory.
        #[arg(long, value_name = "DIR")]
        save: Option<PathBuf>,
    },

    /// Generate an HTML report from the newest benchmark results.
    Report {
        /// Directory holding latest.json or benchmark_*.json files.
        #[arg(long, value_name = "DIR")]
        results: PathBuf,

        /// Directory the report is written to.
        #[arg(long, value_name = "DIR")]
        output: PathBuf,
    },

    /// List the registered workloads.
    List,
}

/// Harness output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Console lines
    Text,
    /// Pretty-printed run document
    Json,
    /// Markdown summary table
    Markdown,
}

/// Install the stderr tracing subscriber.
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn init_tracing(verbose: bool, json: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if json {
        registry
            .with(fmt::layer().json().with_writer(io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_writer(io::stderr))
            .try_init()
    };
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

/// Parse the process arguments and run the CLI.
pub fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);
    execute(cli)
}

/// Run a parsed command line.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let mut config = BenchConfig::load(cli.config.as_deref()).context("loading configuration")?;

    match cli.command {
        Commands::Run {
            format,
            only,
            scale,
            save,
        } => {
            if let Some(scale) = scale {
                config.harness.iteration_scale = scale;
                config.validate()?;
            }
            let harness = Harness::new(&config.harness).select(&only)?;
            tracing::info!(workloads = ?harness.workload_names(), ?format, "starting harness");

            let stdout = io::stdout();
            let run = match format {
                OutputFormat::Text => harness.run(&mut stdout.lock())?,
                OutputFormat::Json | OutputFormat::Markdown => {
                    let run = harness.run(&mut io::stderr().lock())?;
                    let document = match format {
                        OutputFormat::Json => run_io::to_json(&run)?,
                        _ => markdown::generate_summary(&run),
                    };
                    let mut out = stdout.lock();
                    writeln!(out, "{}", document.trim_end())?;
                    out.flush()?;
                    run
                }
            };

            let unreliable = run.unreliable().count();
            if unreliable > 0 {
                eprintln!(
                    "{unreliable} workload(s) ran too close to the timer resolution; \
                     raise --scale for stable numbers"
                );
            }

            if let Some(dir) = save {
                let published = run_io::save_run(&run, &dir)?;
                eprintln!("Saved: {}", published.artifact.display());
            }
            Ok(())
        }
        Commands::Report { results, output } => {
            let generated = generate_report(&results, &output, &config.report)?;
            println!("Generated: {}", generated.report.display());
            println!("Latest: {}", generated.latest.display());
            Ok(())
        }
        Commands::List => {
            let harness = Harness::new(&config.harness);
            let mut out = io::stdout().lock();
            for name in harness.workload_names() {
                writeln!(out, "{name}")?;
            }
            Ok(())
        }
    }
}
