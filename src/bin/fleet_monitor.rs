//! fleet-monitor - load a telemetry file, print averages and alerts.
//!
//! Run: `fleet-monitor fleet.csv` or `fleet-monitor --profile triplet readings.txt`

use anyhow::{Context, Result};
use clap::Parser as _;
use fleet_telemetry::app::run_monitor;
use fleet_telemetry::parser::{FormatErrorPolicy, FormatProfile};
use fleet_telemetry::{init_logging, Config};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Fleet telemetry reader
#[derive(clap::Parser, Debug)]
#[command(name = "fleet-monitor")]
#[command(version)]
#[command(about = "Averages and threshold alerts for vehicle telemetry files", long_about = None)]
struct Cli {
    /// Telemetry file; prompted for on stdin when omitted
    file: Option<PathBuf>,

    /// Line format: triplet (speed,temp,fuel) or quadruplet (id,speed,temp,fuel)
    #[arg(short, long)]
    profile: Option<FormatProfile>,

    /// Malformed-line policy: abort or skip
    #[arg(long)]
    on_format_error: Option<FormatErrorPolicy>,

    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print a status line for every vehicle
    #[arg(long)]
    status: bool,

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

fn prompt_for_file() -> Result<PathBuf> {
    let mut stdout = io::stdout();
    write!(stdout, "Enter CSV filename: ")?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line).context("failed to read filename from stdin")?;
    Ok(PathBuf::from(line.trim()))
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = Config::load_user(cli.config.as_deref())?;
    config.apply_overrides(cli.profile, cli.on_format_error);

    let path = match &cli.file {
        Some(path) => path.clone(),
        None => prompt_for_file()?,
    };

    let stdout = io::stdout();
    run_monitor(&mut stdout.lock(), &path, &config, cli.status)?;
    Ok(())
}
