//! Co-location mining CLI.
//!
//! Loads a key=value configuration file (CLI flags override individual
//! values), runs the mining pipeline, prints a summary report to stdout.
//! Exit code 0 iff the run completed; load/config failures exit 1.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use log::{error, info};

use colomine::builder::MinerBuilder;
use colomine::{config, loader};

/// Prevalent spatial co-location pattern miner.
#[derive(Parser)]
#[command(name = "colomine", version, about)]
struct Cli {
    /// Path to a key=value configuration file.
    #[arg(default_value = "config/config.txt")]
    config: PathBuf,

    /// Verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Override the dataset path from the config file.
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// Override the neighbor distance ε.
    #[arg(long)]
    neighbor_distance: Option<f64>,

    /// Override the prevalence threshold.
    #[arg(long)]
    min_prevalence: Option<f64>,

    /// Run the plane sweep on a single thread.
    #[arg(long)]
    sequential: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Config is read before logger init so debug_mode can raise the
    // default filter; explicit -v flags always win.
    let config = match config::load(&cli.config) {
        Ok(config) => config,
        Err(err) => {
            init_logger(cli.verbose, false);
            error!("{err}");
            return ExitCode::FAILURE;
        }
    };
    init_logger(cli.verbose, config.debug_mode);

    let dataset = cli.dataset.unwrap_or_else(|| config.dataset_path.clone());
    let eps = cli.neighbor_distance.unwrap_or(config.neighbor_distance);
    let min_prev = cli.min_prevalence.unwrap_or(config.min_prevalence);

    info!(
        "Run configuration: dataset={}, ε={}, min_prev={}",
        dataset.display(),
        eps,
        min_prev
    );

    let started = Instant::now();

    let instances = match loader::load_csv(&dataset) {
        Ok(instances) => instances,
        Err(err) => {
            error!("{err}");
            return ExitCode::FAILURE;
        }
    };
    println!(
        "Dataset: {} | {} instances",
        dataset.display(),
        instances.len()
    );

    let summary = MinerBuilder::new()
        .with_neighbor_distance(eps)
        .with_min_prevalence(min_prev)
        .with_sequential_sweep(cli.sequential)
        .mine(&instances);

    let elapsed = started.elapsed().as_secs_f64();

    println!("\n{}", "=".repeat(40));
    println!("SUMMARY REPORT");
    println!("Time:     {elapsed:.3} s");
    println!("Cliques:  {}", summary.clique_count);
    println!("Found:    {} patterns", summary.prevalent.len());
    println!("{}", "=".repeat(40));

    if summary.prevalent.is_empty() {
        println!("No patterns found.");
    } else {
        for (idx, pattern) in summary.prevalent.iter().enumerate() {
            println!("[{}] {pattern}", idx + 1);
        }
    }

    ExitCode::SUCCESS
}

fn init_logger(verbose: u8, debug_mode: bool) {
    let level = match (verbose, debug_mode) {
        (0, false) => "warn",
        (0, true) | (2, _) => "debug",
        (1, _) => "info",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}
