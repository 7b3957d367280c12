//! ualbench entry point.

fn main() {
    if let Err(e) = ual_bench_cli::run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
