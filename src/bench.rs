use std::time::Instant;

use tracing::info;

use crate::config::{BenchConfig, Runtime};
use crate::error::Result;
use crate::parallel::{self, ParallelRun};
use crate::parallel_async;
use crate::report::{format_run, millis, EstimateReport, Report};
use crate::sampler::SampleGenerator;
use crate::sequential;

/// Runs the sequential configuration, then every worker count in ascending
/// order, printing each result as it lands.
pub fn run(config: &BenchConfig) -> Result<Report> {
    let mut report = Report::new();

    println!("Monte Carlo estimation of pi");
    println!("Total points: {}", config.samples);
    println!("Backend: {}, seed: {}", config.runtime.name(), config.seed);

    println!("\n--- Sequential (single thread) ---");
    let start = Instant::now();
    let mut generator = SampleGenerator::from_seed(config.seed);
    let estimate = sequential::estimate(config.samples, &mut generator);
    let entry = EstimateReport::sequential(estimate, start.elapsed());
    record(&mut report, entry);

    println!("\n--- Parallel ({} backend) ---", config.runtime.name());
    for &workers in &config.workers {
        let run = run_parallel(config, workers)?;
        let entry = EstimateReport::parallel(workers, run.estimate, run.elapsed);
        record(&mut report, entry);
    }

    Ok(report)
}

fn run_parallel(config: &BenchConfig, workers: usize) -> Result<ParallelRun> {
    match config.runtime {
        Runtime::Threads => parallel::estimate(
            config.samples,
            workers,
            config.parallelism_for(workers),
            config.seed,
        ),
        Runtime::Tokio => parallel_async::estimate(
            config.samples,
            workers,
            config.parallelism_for(workers),
            config.seed,
        ),
    }
}

fn record(report: &mut Report, entry: EstimateReport) {
    info!(
        workers = entry.workers,
        pi = entry.estimate.pi(),
        elapsed_ms = millis(entry.elapsed),
        "run finished"
    );
    print!("{}", format_run(&entry));
    report.push(entry);
}
