use clap::{Parser, ValueEnum};

use crate::error::{Error, Result};
use crate::sampler::time_seed;

pub const TOTAL_POINTS: u64 = 1_000_000;
pub const WORKER_COUNTS: [usize; 6] = [2, 4, 8, 16, 32, 64];

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Runtime {
    /// Scoped OS threads
    Threads,
    /// Blocking tasks on a tokio runtime
    Tokio,
}

impl Runtime {
    pub fn name(self) -> &'static str {
        match self {
            Runtime::Threads => "threads",
            Runtime::Tokio => "tokio",
        }
    }
}

/// Monte Carlo estimation of pi, sequential versus parallel
#[derive(Parser, Debug)]
#[command(name = "rust_pi", version)]
pub struct Cli {
    /// Total number of random points per run
    #[arg(short = 'n', long, default_value_t = TOTAL_POINTS)]
    pub samples: u64,

    /// Comma separated worker counts to compare against the sequential run
    #[arg(short, long, value_delimiter = ',', default_values_t = WORKER_COUNTS)]
    pub workers: Vec<usize>,

    /// Base seed; defaults to the current time
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Parallel backend
    #[arg(short, long, value_enum, default_value_t = Runtime::Threads)]
    pub runtime: Runtime,

    /// Most threads running at once; defaults to each run's worker count
    #[arg(short, long)]
    pub parallelism: Option<usize>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Validated benchmark settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    pub samples: u64,
    /// Ascending, without duplicates.
    pub workers: Vec<usize>,
    pub seed: u64,
    pub runtime: Runtime,
    pub parallelism: Option<usize>,
}

impl BenchConfig {
    pub fn new(
        samples: u64,
        mut workers: Vec<usize>,
        seed: u64,
        runtime: Runtime,
        parallelism: Option<usize>,
    ) -> Result<Self> {
        if samples == 0 {
            return Err(Error::InvalidSamples);
        }
        if let Some(&bad) = workers.iter().find(|&&w| w == 0) {
            return Err(Error::InvalidWorkers(bad));
        }
        if parallelism == Some(0) {
            return Err(Error::InvalidParallelism);
        }

        workers.sort_unstable();
        workers.dedup();

        Ok(BenchConfig {
            samples,
            workers,
            seed,
            runtime,
            parallelism,
        })
    }

    /// Thread budget for a run with `workers` workers.
    pub fn parallelism_for(&self, workers: usize) -> usize {
        self.parallelism.unwrap_or(workers)
    }
}

impl TryFrom<&Cli> for BenchConfig {
    type Error = Error;

    fn try_from(cli: &Cli) -> Result<Self> {
        BenchConfig::new(
            cli.samples,
            cli.workers.clone(),
            cli.seed.unwrap_or_else(time_seed),
            cli.runtime,
            cli.parallelism,
        )
    }
}
