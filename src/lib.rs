//! # Fleet Telemetry
//!
//! Reads vehicle telemetry (id, speed, temperature, fuel) from delimited
//! text files, aggregates averages in a synchronized store and raises
//! threshold alerts.
//!
//! ## Features
//!
//! - **Two line formats**: `speed,temperature,fuel` with generated ids, or
//!   `id,speed,temperature,fuel`, each with an explicit abort/skip policy
//! - **One lock**: [`Fleet`] guards every read and write with a single mutex
//! - **Strict thresholds**: overheating above 110 °C, low fuel below 15 %
//! - **Workload comparison**: single-threaded versus partitioned fills
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fleet_telemetry::prelude::*;
//!
//! let records = Parser::for_profile(FormatProfile::Quadruplet).load("fleet.csv")?;
//! let fleet = Fleet::from(records);
//!
//! println!("Average Speed: {}", fleet.mean_speed()?);
//! for alert in evaluate_fleet(&fleet, &Thresholds::default()) {
//!     println!("{alert}");
//! }
//! ```

#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Vehicle telemetry records.
pub mod record;

/// Line-oriented file loader with format profiles.
pub mod parser;

/// Synchronized record store and aggregates.
pub mod fleet;

/// Threshold alerts.
pub mod alert;

// ============================================================================
// Demonstration and Output
// ============================================================================

/// Single-threaded versus partitioned workload comparison.
pub mod workload;

/// Plain-text report rendering.
pub mod report;

/// Run paths shared by the binaries.
pub mod app;

// ============================================================================
// Configuration and Error Types
// ============================================================================

/// YAML configuration.
pub mod config;

/// Error types for fleet telemetry operations.
pub mod error;

pub use config::Config;
pub use error::{FleetError, Result};
pub use fleet::Fleet;
pub use record::Record;

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and functions for convenient imports.
///
/// ```rust,ignore
/// use fleet_telemetry::prelude::*;
/// ```
pub mod prelude {
    pub use crate::alert::{evaluate, evaluate_fleet, Alert, Signal, Signals, Thresholds};
    pub use crate::config::Config;
    pub use crate::error::{FleetError, Result};
    pub use crate::fleet::{FieldStats, Fleet, FleetSummary};
    pub use crate::parser::{FormatErrorPolicy, FormatProfile, LoadOutcome, ParseOptions, Parser};
    pub use crate::record::Record;
    pub use crate::workload::{Comparison, PassReport, WorkloadConfig};
}

/// Initialises `env_logger` for the binaries.
///
/// `verbosity` counts `-v` flags on top of the default `warn` level.
/// `RUST_LOG`, when set, takes precedence.
pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .try_init();
}

// ============================================================================
// Tests
// ============================================================================
