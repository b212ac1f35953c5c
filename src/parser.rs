//! Line-oriented loader for vehicle telemetry files.
//!
//! Two line formats are supported and kept apart:
//!
//! - [`FormatProfile::Triplet`]: `speed temperature fuel`, each number
//!   followed by one optional `,` or space. Ids are assigned from 0.
//! - [`FormatProfile::Quadruplet`]: `id,speed,temperature,fuel`, exactly
//!   four comma-separated fields.
//!
//! What happens on a malformed line is a separate choice,
//! [`FormatErrorPolicy`]. Each profile has the default its file format was
//! written for (triplet files abort, quadruplet files skip), and either can
//! be overridden through [`ParseOptions`].
//!
//! # Example
//!
//! ```rust,ignore
//! use fleet_telemetry::parser::{FormatProfile, Parser};
//!
//! let parser = Parser::for_profile(FormatProfile::Quadruplet);
//! let outcome = parser.load_str("1,80,70,50\nbadline\n3,100,70,50")?;
//! assert_eq!(outcome.records.len(), 2);
//! assert_eq!(outcome.skipped, 1);
//! ```

use crate::error::{FleetError, Result};
use crate::record::Record;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

/// Line format of an input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatProfile {
    /// `speed, temperature, fuel` with auto-assigned ids.
    Triplet,
    /// `id,speed,temperature,fuel`.
    #[default]
    Quadruplet,
}

impl FormatProfile {
    /// Policy used when none is configured explicitly.
    #[must_use]
    pub const fn default_policy(self) -> FormatErrorPolicy {
        match self {
            Self::Triplet => FormatErrorPolicy::Abort,
            Self::Quadruplet => FormatErrorPolicy::Skip,
        }
    }

    /// Number of numeric fields per line.
    #[must_use]
    pub const fn field_count(self) -> usize {
        match self {
            Self::Triplet => 3,
            Self::Quadruplet => 4,
        }
    }

    /// Returns the configuration name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Triplet => "triplet",
            Self::Quadruplet => "quadruplet",
        }
    }
}

impl fmt::Display for FormatProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatProfile {
    type Err = FleetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "triplet" => Ok(Self::Triplet),
            "quadruplet" => Ok(Self::Quadruplet),
            other => Err(FleetError::ConfigInvalid {
                key: "profile".to_string(),
                message: format!("unknown format profile '{other}' (expected triplet or quadruplet)"),
            }),
        }
    }
}

/// What to do with a line that does not match the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatErrorPolicy {
    /// Fail the whole load on the first malformed line.
    Abort,
    /// Drop the line and continue.
    Skip,
}

impl fmt::Display for FormatErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Abort => "abort",
            Self::Skip => "skip",
        })
    }
}

impl FromStr for FormatErrorPolicy {
    type Err = FleetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "abort" => Ok(Self::Abort),
            "skip" => Ok(Self::Skip),
            other => Err(FleetError::ConfigInvalid {
                key: "on_format_error".to_string(),
                message: format!("unknown policy '{other}' (expected abort or skip)"),
            }),
        }
    }
}

/// Profile plus malformed-line policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Line format.
    pub profile: FormatProfile,
    /// Malformed-line handling.
    pub on_format_error: FormatErrorPolicy,
}

impl ParseOptions {
    /// Options for `profile` with its default policy.
    #[must_use]
    pub const fn new(profile: FormatProfile) -> Self {
        Self { profile, on_format_error: profile.default_policy() }
    }

    /// Overrides the malformed-line policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: FormatErrorPolicy) -> Self {
        self.on_format_error = policy;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::new(FormatProfile::default())
    }
}

/// Records produced by a load together with the number of dropped lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadOutcome {
    /// Accepted records in file order.
    pub records: Vec<Record>,
    /// Malformed lines dropped under [`FormatErrorPolicy::Skip`].
    pub skipped: usize,
}

/// Telemetry file loader.
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser {
    options: ParseOptions,
}

impl Parser {
    /// Creates a parser with explicit options.
    #[must_use]
    pub const fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Creates a parser for `profile` with its default policy.
    #[must_use]
    pub const fn for_profile(profile: FormatProfile) -> Self {
        Self::new(ParseOptions::new(profile))
    }

    /// Returns the active options.
    #[must_use]
    pub const fn options(&self) -> ParseOptions {
        self.options
    }

    /// Parses one line.
    ///
    /// Returns `Ok(None)` for blank lines. `next_id` is the id given to a
    /// triplet record; quadruplet lines carry their own.
    pub fn parse_line(&self, line: &str, line_no: usize, next_id: u32) -> Result<Option<Record>> {
        if line.trim().is_empty() {
            return Ok(None);
        }

        let record = match self.options.profile {
            FormatProfile::Triplet => parse_triplet(line, next_id),
            FormatProfile::Quadruplet => parse_quadruplet(line),
        };

        record.map(Some).map_err(|message| FleetError::format(line_no, message))
    }

    /// Loads every record from a buffered reader.
    pub fn load_reader<R: BufRead>(&self, reader: R) -> Result<LoadOutcome> {
        let mut outcome = LoadOutcome::default();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = idx + 1;
            let next_id = u32::try_from(outcome.records.len())
                .map_err(|_| FleetError::format(line_no, "record id space exhausted"))?;

            match self.parse_line(&line, line_no, next_id) {
                Ok(Some(record)) => outcome.records.push(record),
                Ok(None) => {}
                Err(err) => match self.options.on_format_error {
                    FormatErrorPolicy::Abort => return Err(err),
                    FormatErrorPolicy::Skip => {
                        log::debug!("skipping line {line_no}: {err}");
                        outcome.skipped += 1;
                    }
                },
            }
        }

        log::info!(
            "loaded {} records ({} profile, {} skipped)",
            outcome.records.len(),
            self.options.profile,
            outcome.skipped
        );
        Ok(outcome)
    }

    /// Loads every record from an in-memory string.
    pub fn load_str(&self, input: &str) -> Result<LoadOutcome> {
        self.load_reader(input.as_bytes())
    }

    /// Opens `path` and loads every record from it.
    pub fn load_path(&self, path: impl AsRef<Path>) -> Result<LoadOutcome> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|source| FleetError::Open { path: path.to_path_buf(), source })?;
        self.load_reader(BufReader::new(file))
    }

    /// Opens `path` and returns only the records.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Vec<Record>> {
        self.load_path(path).map(|outcome| outcome.records)
    }
}

/// Parses a finite reading. `NaN`, `inf` and overflowing exponents are not
/// numbers in either profile.
fn finite(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Reads a leading number, skipping whitespace before it.
fn take_number(input: &str) -> Option<(f64, &str)> {
    let s = input.trim_start();
    let end = s
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')))
        .unwrap_or(s.len());
    let value = finite(&s[..end])?;
    Some((value, &s[end..]))
}

/// Consumes at most one `,` or space.
fn skip_delimiter(input: &str) -> &str {
    input.strip_prefix([',', ' ']).unwrap_or(input)
}

fn parse_triplet(line: &str, id: u32) -> std::result::Result<Record, String> {
    let (speed, rest) = take_number(line).ok_or("invalid speed value")?;
    let (temperature, rest) = take_number(skip_delimiter(rest)).ok_or("invalid temperature value")?;
    // Anything after the fuel reading is ignored.
    let (fuel, _) = take_number(skip_delimiter(rest)).ok_or("invalid fuel value")?;
    Ok(Record::new(id, speed, temperature, fuel))
}

fn parse_quadruplet(line: &str) -> std::result::Result<Record, String> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != FormatProfile::Quadruplet.field_count() {
        return Err(format!("expected 4 comma-separated fields, found {}", fields.len()));
    }

    let id = fields[0].parse::<u32>().map_err(|_| "invalid id value")?;
    let number =
        |value: &str, name: &str| finite(value).ok_or_else(|| format!("invalid {name} value"));

    Ok(Record::new(
        id,
        number(fields[1], "speed")?,
        number(fields[2], "temperature")?,
        number(fields[3], "fuel")?,
    ))
}
