//! fleet-workload - time single-threaded versus partitioned fleet fills.

use anyhow::Result;
use clap::Parser;
use fleet_telemetry::app::run_workload;
use fleet_telemetry::{init_logging, Config};
use std::io;
use std::path::PathBuf;

/// Workload comparison
#[derive(Parser, Debug)]
#[command(name = "fleet-workload")]
#[command(version)]
#[command(about = "Compare single-threaded and partitioned fleet updates", long_about = None)]
struct Cli {
    /// Number of vehicles to update
    #[arg(short = 'n', long)]
    vehicles: Option<usize>,

    /// Number of worker threads
    #[arg(short, long)]
    workers: Option<usize>,

    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = Config::load_user(cli.config.as_deref())?;
    let mut workload = config.workload;
    workload.apply_overrides(cli.vehicles, cli.workers);

    let stdout = io::stdout();
    run_workload(&mut stdout.lock(), &workload)?;
    Ok(())
}
