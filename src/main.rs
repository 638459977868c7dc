mod bench;
mod config;
mod error;
mod estimate;
mod parallel;
mod parallel_async;
mod partition;
mod report;
mod sampler;
mod sequential;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::{BenchConfig, Cli};

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "rust_pi=debug" } else { "rust_pi=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = BenchConfig::try_from(&cli)?;
    let report = bench::run(&config)?;

    println!("\n--- Summary ---");
    print!("{}", report.render_table());

    Ok(())
}
