use std::time::Duration;

use crate::estimate::Estimate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Sequential,
    Parallel,
}

/// Outcome of one benchmark configuration.
#[derive(Debug, Clone, Copy)]
pub struct EstimateReport {
    pub mode: Mode,
    pub workers: usize,
    pub estimate: Estimate,
    pub elapsed: Duration,
}

impl EstimateReport {
    pub fn sequential(estimate: Estimate, elapsed: Duration) -> Self {
        EstimateReport {
            mode: Mode::Sequential,
            workers: 1,
            estimate,
            elapsed,
        }
    }

    pub fn parallel(workers: usize, estimate: Estimate, elapsed: Duration) -> Self {
        EstimateReport {
            mode: Mode::Parallel,
            workers,
            estimate,
            elapsed,
        }
    }

    fn workers_label(&self) -> String {
        match self.mode {
            Mode::Sequential => format!("{} (sequential)", self.workers),
            Mode::Parallel => self.workers.to_string(),
        }
    }
}

/// Elapsed time in milliseconds at microsecond resolution.
pub fn millis(elapsed: Duration) -> f64 {
    elapsed.as_micros() as f64 / 1000.0
}

/// Reports in the order the runs were executed.
#[derive(Debug, Default)]
pub struct Report {
    entries: Vec<EstimateReport>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: EstimateReport) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[EstimateReport] {
        &self.entries
    }

    /// Markdown summary table, one row per run.
    pub fn render_table(&self) -> String {
        let mut output = String::new();

        output.push_str("| Workers | π estimate | Time (ms) |\n");
        output.push_str("|---|---|---|\n");

        for entry in self.entries() {
            output.push_str(&format!(
                "| {} | {:.6} | {:.2} |\n",
                entry.workers_label(),
                entry.estimate.pi(),
                millis(entry.elapsed)
            ));
        }

        output
    }
}

/// Block printed right after a run completes.
pub fn format_run(entry: &EstimateReport) -> String {
    let mut output = String::new();

    if entry.mode == Mode::Parallel {
        output.push_str(&format!("Workers: {}\n", entry.workers));
    }
    output.push_str(&format!("Pi estimate: {:.6}\n", entry.estimate.pi()));
    output.push_str(&format!("Error: {:.6}\n", entry.estimate.error()));
    output.push_str(&format!("Elapsed: {:?}\n", entry.elapsed));

    output
}
