//! Single-threaded versus partitioned workload comparison.
//!
//! A fixed array of records is refreshed with random readings and appended
//! to a [`Fleet`], once on the calling thread and once split across
//! `workers` scoped threads. Each worker owns a disjoint sub-slice, so the
//! records themselves need no locking; the only shared state is the fleet.
//!
//! Timings are informational. Nothing here promises a speedup.

use crate::error::{FleetError, Result};
use crate::fleet::Fleet;
use crate::record::Record;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::{Range, RangeInclusive};
use std::thread;
use std::time::{Duration, Instant};

/// Generated speed bounds.
pub const SPEED_RANGE: RangeInclusive<f64> = 40.0..=120.0;
/// Generated temperature bounds in °C.
pub const TEMPERATURE_RANGE: RangeInclusive<f64> = 60.0..=130.0;
/// Generated fuel bounds in percent.
pub const FUEL_RANGE: RangeInclusive<f64> = 5.0..=100.0;

/// Size of the comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadConfig {
    /// Number of records in the array.
    #[serde(default = "default_vehicles")]
    pub vehicles: usize,

    /// Number of worker threads for the partitioned pass.
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_vehicles() -> usize {
    100
}
fn default_workers() -> usize {
    4
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self { vehicles: default_vehicles(), workers: default_workers() }
    }
}

impl WorkloadConfig {
    /// Replaces the sizes given on the command line.
    pub fn apply_overrides(&mut self, vehicles: Option<usize>, workers: Option<usize>) {
        if let Some(vehicles) = vehicles {
            self.vehicles = vehicles;
        }
        if let Some(workers) = workers {
            self.workers = workers;
        }
    }

    /// Rejects sizes the comparison cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.vehicles == 0 {
            return Err(FleetError::ConfigInvalid {
                key: "workload.vehicles".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.workers == 0 {
            return Err(FleetError::ConfigInvalid {
                key: "workload.workers".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Splits `0..len` into `workers` contiguous ranges.
///
/// Every range holds `len / workers` indices except the last, which also
/// takes the remainder. A worker count of 0 is treated as 1.
#[must_use]
pub fn partition(len: usize, workers: usize) -> Vec<Range<usize>> {
    let workers = workers.max(1);
    let per_worker = len / workers;

    (0..workers)
        .map(|w| {
            let start = w * per_worker;
            let end = if w == workers - 1 { len } else { start + per_worker };
            start..end
        })
        .collect()
}

/// Overwrites the readings of `record` with uniform random values.
pub fn randomize<R: Rng>(record: &mut Record, rng: &mut R) {
    record.set_speed(rng.gen_range(SPEED_RANGE));
    record.set_temperature(rng.gen_range(TEMPERATURE_RANGE));
    record.set_fuel(rng.gen_range(FUEL_RANGE));
}

/// Builds `vehicles` records with ids `1..=vehicles` and zeroed readings.
#[must_use]
pub fn seed_records(vehicles: usize) -> Vec<Record> {
    (1..=vehicles).map(|id| Record::new(id as u32, 0.0, 0.0, 0.0)).collect()
}

/// Outcome of one timed pass.
#[derive(Debug)]
pub struct PassReport {
    /// Records appended to the fleet.
    pub records: usize,
    /// Mean speed of the filled fleet.
    pub mean_speed: f64,
    /// Time to fill the fleet and compute the mean.
    pub elapsed: Duration,
    /// The filled fleet.
    pub fleet: Fleet,
}

impl PassReport {
    fn finish(fleet: Fleet, start: Instant) -> Result<Self> {
        let mean_speed = fleet.mean_speed()?;
        let elapsed = start.elapsed();
        Ok(Self { records: fleet.len(), mean_speed, elapsed, fleet })
    }
}

/// Refreshes and appends every record on the calling thread, in order.
pub fn run_single(records: &mut [Record]) -> Result<PassReport> {
    let fleet = Fleet::with_capacity(records.len());
    let mut rng = rand::thread_rng();
    let start = Instant::now();

    for record in records.iter_mut() {
        randomize(record, &mut rng);
        fleet.append(*record);
    }

    let report = PassReport::finish(fleet, start)?;
    log::info!("single pass: {} records in {:?}", report.records, report.elapsed);
    Ok(report)
}

/// Refreshes and appends records from `workers` scoped threads.
///
/// Append order across workers is whatever order they reach the fleet lock.
pub fn run_partitioned(records: &mut [Record], workers: usize) -> Result<PassReport> {
    let ranges = partition(records.len(), workers);
    let fleet = Fleet::with_capacity(records.len());
    let start = Instant::now();

    thread::scope(|scope| {
        let mut rest = records;
        for range in &ranges {
            let (chunk, tail) = std::mem::take(&mut rest).split_at_mut(range.len());
            rest = tail;
            let fleet = &fleet;
            scope.spawn(move || {
                let mut rng = rand::thread_rng();
                for record in chunk.iter_mut() {
                    randomize(record, &mut rng);
                    fleet.append(*record);
                }
            });
        }
    });

    let report = PassReport::finish(fleet, start)?;
    log::info!(
        "partitioned pass: {} records on {} workers in {:?}",
        report.records,
        ranges.len(),
        report.elapsed
    );
    Ok(report)
}

/// Single and partitioned passes over the same array.
#[derive(Debug)]
pub struct Comparison {
    /// Calling-thread pass.
    pub single: PassReport,
    /// Multi-threaded pass.
    pub partitioned: PassReport,
}

impl Comparison {
    /// Seeds `config.vehicles` records and runs both passes over them.
    pub fn run(config: &WorkloadConfig) -> Result<Self> {
        config.validate()?;
        let mut records = seed_records(config.vehicles);
        let single = run_single(&mut records)?;
        let partitioned = run_partitioned(&mut records, config.workers)?;
        Ok(Self { single, partitioned })
    }

    /// Ratio of single to partitioned time, or `None` when the partitioned
    /// pass finished in under a millisecond.
    #[must_use]
    pub fn speedup(&self) -> Option<f64> {
        (self.partitioned.elapsed.as_millis() > 0)
            .then(|| self.single.elapsed.as_secs_f64() / self.partitioned.elapsed.as_secs_f64())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Ranges are contiguous, disjoint and cover `0..len` exactly.
        #[test]
        fn prop_partition_covers_exactly(len in 0usize..10_000, workers in 1usize..64) {
            let ranges = partition(len, workers);
            prop_assert_eq!(ranges.len(), workers);

            let mut next = 0;
            for r in &ranges {
                prop_assert_eq!(r.start, next);
                prop_assert!(r.end >= r.start);
                next = r.end;
            }
            prop_assert_eq!(next, len);
        }
    }
}
