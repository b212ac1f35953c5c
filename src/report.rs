//! Plain-text rendering of fleet results.
//!
//! Writers take any [`Write`] so the binaries print to stdout and tests
//! render into a `Vec<u8>`.

use crate::alert::{alerts_for, Alert, Thresholds};
use crate::error::Result;
use crate::fleet::FleetSummary;
use crate::record::Record;
use crate::workload::Comparison;
use std::io::Write;

/// Formats `value` the way `%g` does: six significant digits, trailing zeros
/// removed, scientific notation below `1e-4` or from `1e6` up.
#[must_use]
pub fn format_reading(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{value}");
    }
    // Rounding to six digits first decides the exponent, so 999999.7 is 1e+06.
    let scientific = format!("{value:.5e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    if !(-4..6).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{}e{sign}{:02}", trim_fraction(mantissa), exponent.abs());
    }
    let decimals = (5 - exponent) as usize;
    trim_fraction(&format!("{value:.decimals$}")).to_string()
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

/// Writes each record's status line followed by its alerts.
pub fn write_status<W: Write>(out: &mut W, records: &[Record], thresholds: &Thresholds) -> Result<()> {
    for record in records {
        writeln!(out, "{record}")?;
        for alert in alerts_for(record, thresholds) {
            writeln!(out, "{alert}")?;
        }
    }
    Ok(())
}

/// Writes the three average lines.
pub fn write_averages<W: Write>(out: &mut W, summary: &FleetSummary) -> Result<()> {
    writeln!(out, "Average Speed: {} km/h", format_reading(summary.mean_speed()))?;
    writeln!(out, "Average Temperature: {} °C", format_reading(summary.mean_temperature()))?;
    writeln!(out, "Average Fuel: {}%", format_reading(summary.mean_fuel()))?;
    Ok(())
}

/// Writes one line per alert.
pub fn write_alerts<W: Write>(out: &mut W, alerts: &[Alert]) -> Result<()> {
    for alert in alerts {
        writeln!(out, "{alert}")?;
    }
    Ok(())
}

/// Writes the single versus partitioned timing lines.
pub fn write_comparison<W: Write>(out: &mut W, comparison: &Comparison) -> Result<()> {
    writeln!(
        out,
        "Single-threaded: Average Speed = {}, Time = {} ms",
        format_reading(comparison.single.mean_speed),
        comparison.single.elapsed.as_millis()
    )?;
    writeln!(
        out,
        "Multi-threaded:  Average Speed = {}, Time = {} ms",
        format_reading(comparison.partitioned.mean_speed),
        comparison.partitioned.elapsed.as_millis()
    )?;
    match comparison.speedup() {
        Some(speedup) => writeln!(out, "Speedup: {}x", format_reading(speedup))?,
        None => writeln!(out, "Speedup: N/A (multi-threaded time too fast to measure)")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::Signal;
    use crate::fleet::Fleet;
    use crate::workload::PassReport;
    use std::time::Duration;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_format_reading() {
        assert_eq!(format_reading(90.0), "90");
        assert_eq!(format_reading(93.333_333_333), "93.3333");
        assert_eq!(format_reading(0.5), "0.5");
        assert_eq!(format_reading(-12.25), "-12.25");
        assert_eq!(format_reading(0.0), "0");
    }

    #[test]
    fn test_format_reading_switches_to_scientific() {
        assert_eq!(format_reading(1_234_567.0), "1.23457e+06");
        assert_eq!(format_reading(999_999.7), "1e+06");
        assert_eq!(format_reading(123_456.0), "123456");
        assert_eq!(format_reading(0.000_012_34), "1.234e-05");
        assert_eq!(format_reading(-0.000_012_34), "-1.234e-05");
        assert_eq!(format_reading(0.0001), "0.0001");
    }

    #[test]
    fn test_write_averages() {
        let fleet = Fleet::new();
        fleet.append(Record::new(1, 80.0, 70.0, 50.0));
        fleet.append(Record::new(2, 100.0, 80.0, 40.0));
        let summary = fleet.summary().unwrap();

        let text = render(|out| write_averages(out, &summary));
        assert_eq!(
            text,
            "Average Speed: 90 km/h\nAverage Temperature: 75 °C\nAverage Fuel: 45%\n"
        );
    }

    #[test]
    fn test_write_status_interleaves_alerts() {
        let records = [Record::new(1, 60.0, 120.0, 50.0), Record::new(2, 60.0, 80.0, 50.0)];
        let text = render(|out| write_status(out, &records, &Thresholds::default()));

        assert_eq!(
            text,
            "Vehicle 1 Speed:60 Temp:120 Fuel:50\n\
             Vehicle 1: Critical Overheating\n\
             Vehicle 2 Speed:60 Temp:80 Fuel:50\n"
        );
    }

    #[test]
    fn test_write_alerts() {
        let alerts = [Alert { id: 3, signal: Signal::LowFuel }];
        assert_eq!(render(|out| write_alerts(out, &alerts)), "Vehicle 3: Low Fuel Warning\n");
    }

    #[test]
    fn test_write_comparison_too_fast() {
        let pass = |mean_speed| PassReport {
            records: 1,
            mean_speed,
            elapsed: Duration::ZERO,
            fleet: Fleet::new(),
        };
        let comparison = Comparison { single: pass(80.0), partitioned: pass(81.5) };

        let text = render(|out| write_comparison(out, &comparison));
        assert!(text.contains("Single-threaded: Average Speed = 80, Time = 0 ms"));
        assert!(text.contains("Multi-threaded:  Average Speed = 81.5, Time = 0 ms"));
        assert!(text.contains("Speedup: N/A"));
    }

    #[test]
    fn test_write_comparison_speedup() {
        let pass = |ms| PassReport {
            records: 1,
            mean_speed: 80.0,
            elapsed: Duration::from_millis(ms),
            fleet: Fleet::new(),
        };
        let comparison = Comparison { single: pass(30), partitioned: pass(10) };

        let text = render(|out| write_comparison(out, &comparison));
        assert!(text.contains("Speedup: 3x"), "got: {text}");
    }
}
