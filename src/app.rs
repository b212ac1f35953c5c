//! Run paths behind the two binaries.
//!
//! The binaries only parse arguments, resolve the config and map an `Err`
//! to exit code 1. Everything they print goes through here.

use crate::alert::evaluate_fleet;
use crate::config::Config;
use crate::error::Result;
use crate::fleet::Fleet;
use crate::parser::Parser;
use crate::report;
use crate::workload::{Comparison, WorkloadConfig};
use std::io::Write;
use std::path::Path;

/// Loads `path` with the configured profile and writes averages then alerts.
///
/// With `status` set, every record's status line is written first.
///
/// # Errors
///
/// Fails with `Open` when the file cannot be opened, `Format` under the
/// abort policy, and `EmptyCollection` when no record was accepted.
pub fn run_monitor<W: Write>(out: &mut W, path: &Path, config: &Config, status: bool) -> Result<()> {
    let options = config.input.parse_options();
    log::info!("reading {} as {} ({})", path.display(), options.profile, options.on_format_error);

    let outcome = Parser::new(options).load_path(path)?;
    if outcome.skipped > 0 {
        log::warn!("{} malformed lines skipped in {}", outcome.skipped, path.display());
    }
    let fleet = Fleet::from(outcome.records);

    // An empty fleet fails before any status line is written.
    let summary = fleet.summary()?;
    if status {
        report::write_status(out, &fleet.snapshot(), &config.thresholds)?;
    }
    report::write_averages(out, &summary)?;
    report::write_alerts(out, &evaluate_fleet(&fleet, &config.thresholds))?;
    out.flush()?;
    Ok(())
}

/// Runs the single versus partitioned comparison and writes its timings.
///
/// # Errors
///
/// Fails with `ConfigInvalid` for zero vehicles or zero workers.
pub fn run_workload<W: Write>(out: &mut W, config: &WorkloadConfig) -> Result<()> {
    let comparison = Comparison::run(config)?;
    report::write_comparison(out, &comparison)?;
    out.flush()?;
    Ok(())
}
