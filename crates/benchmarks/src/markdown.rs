//! Markdown output for harness runs.

use crate::result::HarnessRun;
use std::fmt::Write;

/// Generate a markdown summary table of a run.
pub fn generate_summary(run: &HarnessRun) -> String {
    let mut output = String::new();
    // writing into a String cannot fail
    let _ = write_summary(&mut output, run);
    output
}

fn write_summary(output: &mut String, run: &HarnessRun) -> std::fmt::Result {
    writeln!(output, "# {}", run.title)?;
    writeln!(output)?;
    writeln!(output, "Started: {}", run.started_at.to_rfc3339())?;
    writeln!(output, "Timer resolution: {} ns", run.timer_resolution_ns)?;
    writeln!(output)?;
    writeln!(output, "| Workload | Iterations | Warm-up | ns/op | Reliable |")?;
    writeln!(output, "|----------|-----------:|--------:|------:|----------|")?;

    for m in &run.measurements {
        writeln!(
            output,
            "| {} | {} | {} | {:.2} | {} |",
            m.name,
            m.iterations,
            m.warmup_iterations,
            m.ns_per_op,
            if m.reliable { "yes" } else { "no" }
        )?;
    }

    writeln!(output)?;
    writeln!(output, "---")?;
    writeln!(output, "Total workloads: {}", run.measurements.len())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::Timing;
    use crate::result::Measurement;
    use std::time::Duration;

    #[test]
    fn test_summary_lists_every_measurement() {
        let mut run = HarnessRun::new("REFERENCE", 25);
        let timing = Timing {
            iterations: 1_000,
            warmup_iterations: 100,
            elapsed: Duration::from_micros(12),
            ns_per_op: 12.0,
        };
        run.measurements.push(Measurement::new("Newton", &timing, false));
        run.measurements.push(Measurement::new("Leibniz", &timing, true));

        let summary = generate_summary(&run);
        assert!(summary.starts_with("# REFERENCE\n"));
        assert!(summary.contains("Timer resolution: 25 ns"));
        assert!(summary.contains("| Newton | 1000 | 100 | 12.00 | no |"));
        assert!(summary.contains("| Leibniz | 1000 | 100 | 12.00 | yes |"));
        assert!(summary.contains("Total workloads: 2"));
    }
}
