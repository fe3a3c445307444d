use std::{num::ParseIntError, time::Instant};

use anyhow::{Context, Result};
use clap::Parser;
use hashpower_sim::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Runs every built-in strategy many times and reports how often each one
/// finishes above the threshold.
#[derive(Parser, Debug)]
#[command(name = "compare")]
#[command(version)]
struct Args {
    /// The simulated amount of hashpower, in hashes per round
    #[arg(long, default_value_t = SimulationBuilder::DEFAULT_HASHPOWER)]
    hashpower: usize,

    /// Number of samples of each strategy
    #[arg(long, default_value_t = SimulationBuilder::DEFAULT_SAMPLES)]
    samples: usize,

    /// Rounds per sample, including the seeding round
    #[arg(long, default_value_t = DEFAULT_ROUNDS)]
    rounds: usize,

    /// Reporting threshold, decimal or 0x-prefixed hex
    #[arg(long, value_parser = parse_u64, default_value = "0xffff000000000000")]
    threshold: u64,

    /// Master seed, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Also print a side-by-side comparison of all strategies
    #[arg(long)]
    compare: bool,

    /// Print the comparison table as CSV
    #[arg(long)]
    csv: bool,
}

fn parse_u64(s: &str) -> Result<u64, ParseIntError> {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(&hex.replace('_', ""), 16),
        None => s.replace('_', "").parse(),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let start = Instant::now();

    let mut builder = SimulationBuilder::new()
        .hashpower(args.hashpower)
        .samples(args.samples)
        .rounds(args.rounds)
        .add_strategies(catalog(args.threshold));
    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }

    let simulation = builder.build().context("invalid simulation settings")?;
    info!(seed = simulation.seed(), "built simulation");

    let results = simulation.run_all().threshold(args.threshold);

    println!("{}", results.submission_log());

    if args.compare {
        let format = if args.csv { Format::CSV } else { Format::PrettyPrint };
        println!();
        println!("{}", results.all().format(format).build());
    }

    info!(elapsed_secs = start.elapsed().as_secs_f64(), "done");
    Ok(())
}
