//! Vehicle telemetry records.
//!
//! A [`Record`] is one vehicle's point-in-time reading. Values are stored
//! as parsed: nothing checks that a speed is positive or that fuel stays
//! within 0-100.

use crate::report::format_reading;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One vehicle's telemetry: identifier plus speed, temperature and fuel.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Record {
    /// Vehicle identifier. Not required to be unique.
    id: u32,
    /// Current speed (unit-less).
    speed: f64,
    /// Engine temperature in degrees Celsius.
    temperature: f64,
    /// Fuel level as a percentage.
    fuel: f64,
}

impl Record {
    /// Creates a record from its four readings.
    #[must_use]
    pub const fn new(id: u32, speed: f64, temperature: f64, fuel: f64) -> Self {
        Self { id, speed, temperature, fuel }
    }

    /// Returns the vehicle identifier.
    #[must_use]
    pub const fn id(&self) -> u32 {
        self.id
    }

    /// Returns the speed.
    #[must_use]
    pub const fn speed(&self) -> f64 {
        self.speed
    }

    /// Returns the engine temperature in °C.
    #[must_use]
    pub const fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Returns the fuel percentage.
    #[must_use]
    pub const fn fuel(&self) -> f64 {
        self.fuel
    }

    /// Sets the vehicle identifier.
    pub fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    /// Sets the speed.
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
    }

    /// Sets the engine temperature in °C.
    pub fn set_temperature(&mut self, temperature: f64) {
        self.temperature = temperature;
    }

    /// Sets the fuel percentage.
    pub fn set_fuel(&mut self, fuel: f64) {
        self.fuel = fuel;
    }
}

/// Renders the per-vehicle status line.
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Vehicle {} Speed:{} Temp:{} Fuel:{}",
            self.id,
            format_reading(self.speed),
            format_reading(self.temperature),
            format_reading(self.fuel)
        )
    }
}
