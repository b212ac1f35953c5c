//! Threshold alerts over vehicle records.
//!
//! Both comparisons are strict: a temperature of exactly 110 °C does not
//! overheat and a fuel level of exactly 15 % is not low.

use crate::fleet::Fleet;
use crate::record::Record;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default overheat threshold in °C.
pub const OVERHEAT_CELSIUS: f64 = 110.0;

/// Default low-fuel threshold in percent.
pub const LOW_FUEL_PERCENT: f64 = 15.0;

/// An alert condition derived from a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Signal {
    /// Temperature above the overheat threshold.
    Overheating,
    /// Fuel below the low-fuel threshold.
    LowFuel,
}

impl Signal {
    /// All signals in reporting order.
    pub const ALL: [Self; 2] = [Self::Overheating, Self::LowFuel];

    /// User-facing alert text.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Overheating => "Critical Overheating",
            Self::LowFuel => "Low Fuel Warning",
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Self::Overheating => 0b01,
            Self::LowFuel => 0b10,
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Set of signals raised by one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Signals(u8);

impl Signals {
    /// The empty set.
    pub const NONE: Self = Self(0);

    /// Returns true if `signal` is in the set.
    #[must_use]
    pub const fn contains(self, signal: Signal) -> bool {
        self.0 & signal.bit() != 0
    }

    /// Adds `signal` to the set.
    pub fn insert(&mut self, signal: Signal) {
        self.0 |= signal.bit();
    }

    /// Returns true if no signal is raised.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of raised signals.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterates raised signals, overheating first.
    pub fn iter(self) -> impl Iterator<Item = Signal> {
        Signal::ALL.into_iter().filter(move |s| self.contains(*s))
    }
}

impl FromIterator<Signal> for Signals {
    fn from_iter<I: IntoIterator<Item = Signal>>(iter: I) -> Self {
        let mut set = Self::NONE;
        for signal in iter {
            set.insert(signal);
        }
        set
    }
}

/// Alert limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Temperatures strictly above this overheat.
    #[serde(default = "default_overheat")]
    pub overheat_celsius: f64,

    /// Fuel levels strictly below this are low.
    #[serde(default = "default_low_fuel")]
    pub low_fuel_percent: f64,
}

fn default_overheat() -> f64 {
    OVERHEAT_CELSIUS
}
fn default_low_fuel() -> f64 {
    LOW_FUEL_PERCENT
}

impl Default for Thresholds {
    fn default() -> Self {
        Self { overheat_celsius: OVERHEAT_CELSIUS, low_fuel_percent: LOW_FUEL_PERCENT }
    }
}

impl Thresholds {
    /// Signals raised by `record` under these limits.
    #[must_use]
    pub fn evaluate(&self, record: &Record) -> Signals {
        let mut signals = Signals::NONE;
        if record.temperature() > self.overheat_celsius {
            signals.insert(Signal::Overheating);
        }
        if record.fuel() < self.low_fuel_percent {
            signals.insert(Signal::LowFuel);
        }
        signals
    }
}

/// Signals raised by `record` under the default limits.
#[must_use]
pub fn evaluate(record: &Record) -> Signals {
    Thresholds::default().evaluate(record)
}

/// One signal attributed to a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alert {
    /// Vehicle identifier.
    pub id: u32,
    /// Raised signal.
    pub signal: Signal,
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vehicle {}: {}", self.id, self.signal)
    }
}

/// Alerts for one record in reporting order.
pub fn alerts_for(record: &Record, thresholds: &Thresholds) -> impl Iterator<Item = Alert> {
    let id = record.id();
    thresholds.evaluate(record).iter().map(move |signal| Alert { id, signal })
}

/// Alerts for every record of one snapshot, in insertion order.
#[must_use]
pub fn evaluate_fleet(fleet: &Fleet, thresholds: &Thresholds) -> Vec<Alert> {
    evaluate_records(&fleet.snapshot(), thresholds)
}

/// Alerts for a slice of records, in slice order.
#[must_use]
pub fn evaluate_records(records: &[Record], thresholds: &Thresholds) -> Vec<Alert> {
    records.iter().flat_map(|r| alerts_for(r, thresholds)).collect()
}
