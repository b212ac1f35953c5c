//! Synchronized record store with aggregate queries.
//!
//! [`Fleet`] owns an append-only list of [`Record`]s behind a single mutex.
//! Every accessor takes the lock for the length of the call, so any
//! snapshot or aggregate describes some fully appended prefix of the
//! insertion history.
//!
//! # Example
//!
//! ```rust,ignore
//! use fleet_telemetry::{Fleet, Record};
//!
//! let fleet = Fleet::new();
//! fleet.append(Record::new(1, 80.0, 70.0, 50.0));
//! fleet.append(Record::new(2, 100.0, 70.0, 50.0));
//! assert_eq!(fleet.mean_speed()?, 90.0);
//! ```

use crate::error::{FleetError, Result};
use crate::record::Record;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Running statistics for one numeric field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldStats {
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
    /// Sum of all values.
    pub sum: f64,
    /// Count of values.
    pub count: u64,
}

impl FieldStats {
    /// Creates new empty statistics.
    #[must_use]
    pub const fn new() -> Self {
        Self { min: f64::MAX, max: f64::MIN, sum: 0.0, count: 0 }
    }

    /// Updates statistics with a single value.
    #[inline]
    pub fn update(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        self.sum += value;
        self.count += 1;
    }

    /// Returns the arithmetic mean, or `None` when no values were seen.
    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

impl Default for FieldStats {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<f64> for FieldStats {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut stats = Self::new();
        for value in iter {
            stats.update(value);
        }
        stats
    }
}

/// Per-field statistics taken under one lock acquisition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FleetSummary {
    /// Speed statistics.
    pub speed: FieldStats,
    /// Temperature statistics.
    pub temperature: FieldStats,
    /// Fuel statistics.
    pub fuel: FieldStats,
}

impl FleetSummary {
    fn of(records: &[Record]) -> Result<Self> {
        if records.is_empty() {
            return Err(FleetError::EmptyCollection);
        }
        Ok(Self {
            speed: records.iter().map(Record::speed).collect(),
            temperature: records.iter().map(Record::temperature).collect(),
            fuel: records.iter().map(Record::fuel).collect(),
        })
    }

    /// Number of records summarized.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.speed.count
    }

    /// Mean speed.
    #[must_use]
    pub fn mean_speed(&self) -> f64 {
        self.speed.mean().unwrap_or_default()
    }

    /// Mean temperature.
    #[must_use]
    pub fn mean_temperature(&self) -> f64 {
        self.temperature.mean().unwrap_or_default()
    }

    /// Mean fuel level.
    #[must_use]
    pub fn mean_fuel(&self) -> f64 {
        self.fuel.mean().unwrap_or_default()
    }
}

/// Thread-safe, append-only collection of vehicle records.
#[derive(Debug, Default)]
pub struct Fleet {
    records: Mutex<Vec<Record>>,
}

impl Fleet {
    /// Creates an empty fleet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty fleet with room for `capacity` records.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { records: Mutex::new(Vec::with_capacity(capacity)) }
    }

    /// Acquires the lock, recovering the list if a holder panicked.
    ///
    /// The list is only ever pushed to, so a poisoned guard still holds a
    /// consistent prefix.
    fn lock(&self) -> MutexGuard<'_, Vec<Record>> {
        self.records.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
            log::warn!("fleet lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Appends a record at the end.
    pub fn append(&self, record: Record) {
        self.lock().push(record);
    }

    /// Appends a batch of records under one lock acquisition.
    pub fn extend(&self, records: impl IntoIterator<Item = Record>) {
        self.lock().extend(records);
    }

    /// Returns a copy of every record in insertion order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Record> {
        self.lock().clone()
    }

    /// Returns the number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if no records are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn mean_of(&self, field: fn(&Record) -> f64) -> Result<f64> {
        let records = self.lock();
        records
            .iter()
            .map(field)
            .collect::<FieldStats>()
            .mean()
            .ok_or(FleetError::EmptyCollection)
    }

    /// Mean speed over all records.
    pub fn mean_speed(&self) -> Result<f64> {
        self.mean_of(Record::speed)
    }

    /// Mean temperature over all records.
    pub fn mean_temperature(&self) -> Result<f64> {
        self.mean_of(Record::temperature)
    }

    /// Mean fuel level over all records.
    pub fn mean_fuel(&self) -> Result<f64> {
        self.mean_of(Record::fuel)
    }

    /// Statistics for all three readings from one consistent view.
    pub fn summary(&self) -> Result<FleetSummary> {
        FleetSummary::of(&self.lock())
    }

    /// Consumes the fleet and returns its records.
    #[must_use]
    pub fn into_records(self) -> Vec<Record> {
        self.records.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl From<Vec<Record>> for Fleet {
    fn from(records: Vec<Record>) -> Self {
        Self { records: Mutex::new(records) }
    }
}

impl FromIterator<Record> for Fleet {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::sync::Arc;
    use std::thread;

    fn sample() -> Fleet {
        let fleet = Fleet::new();
        fleet.append(Record::new(1, 80.0, 70.0, 50.0));
        fleet.append(Record::new(2, 90.0, 115.0, 10.0));
        fleet.append(Record::new(3, 100.0, 95.0, 30.0));
        fleet
    }

    #[test]
    fn test_mean_speed_exact() {
        assert_eq!(sample().mean_speed().unwrap(), 90.0);
    }

    #[test]
    fn test_mean_temperature_and_fuel() {
        let fleet = sample();
        assert_relative_eq!(fleet.mean_temperature().unwrap(), 280.0 / 3.0);
        assert_eq!(fleet.mean_fuel().unwrap(), 30.0);
    }

    #[test]
    fn test_empty_fleet_means_fail() {
        let fleet = Fleet::new();

        assert!(matches!(fleet.mean_speed(), Err(FleetError::EmptyCollection)));
        assert!(matches!(fleet.mean_temperature(), Err(FleetError::EmptyCollection)));
        assert!(matches!(fleet.mean_fuel(), Err(FleetError::EmptyCollection)));
        assert!(matches!(fleet.summary(), Err(FleetError::EmptyCollection)));
    }

    #[test]
    fn test_lock_released_after_error() {
        let fleet = Fleet::new();
        assert!(fleet.mean_speed().is_err());

        // A held guard would deadlock here.
        fleet.append(Record::new(1, 60.0, 0.0, 0.0));
        assert_eq!(fleet.mean_speed().unwrap(), 60.0);
    }

    #[test]
    fn test_snapshot_preserves_insertion_order() {
        let ids: Vec<u32> = sample().snapshot().iter().map(Record::id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let fleet = sample();
        let before = fleet.snapshot();
        fleet.append(Record::new(4, 0.0, 0.0, 0.0));

        assert_eq!(before.len(), 3);
        assert_eq!(fleet.len(), 4);
    }

    #[test]
    fn test_summary_matches_individual_means() {
        let fleet = sample();
        let summary = fleet.summary().unwrap();

        assert_eq!(summary.count(), 3);
        assert_eq!(summary.mean_speed(), fleet.mean_speed().unwrap());
        assert_eq!(summary.mean_fuel(), fleet.mean_fuel().unwrap());
        assert_eq!(summary.temperature.min, 70.0);
        assert_eq!(summary.temperature.max, 115.0);
    }

    #[test]
    fn test_extend_and_from_iter() {
        let fleet: Fleet = (0..5).map(|i| Record::new(i, f64::from(i), 0.0, 0.0)).collect();
        fleet.extend([Record::new(5, 5.0, 0.0, 0.0)]);

        assert_eq!(fleet.len(), 6);
        assert_eq!(fleet.mean_speed().unwrap(), 2.5);
    }

    #[test]
    fn test_concurrent_appends_lose_nothing() {
        let fleet = Arc::new(Fleet::new());
        let handles: Vec<_> = (0..8u32)
            .map(|t| {
                let fleet = Arc::clone(&fleet);
                thread::spawn(move || {
                    for i in 0..250 {
                        fleet.append(Record::new(t * 1000 + i, 1.0, 1.0, 1.0));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let mut ids: Vec<u32> = fleet.snapshot().iter().map(Record::id).collect();
        assert_eq!(ids.len(), 2000);
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 2000, "no duplicates");
    }

    #[test]
    fn test_poisoned_lock_recovers() {
        let fleet = Arc::new(sample());
        let poisoner = Arc::clone(&fleet);
        let _ = thread::spawn(move || {
            let _guard = poisoner.records.lock().unwrap();
            panic!("poison the fleet lock");
        })
        .join();

        assert_eq!(fleet.len(), 3);
        fleet.append(Record::new(4, 0.0, 0.0, 0.0));
        assert_eq!(fleet.len(), 4);
    }

    #[test]
    fn test_field_stats_empty_mean_is_none() {
        assert_eq!(FieldStats::new().mean(), None);
    }

    #[test]
    fn test_fleet_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Fleet>();
    }
}

// ============================================================================
// Property-based tests with proptest
// ============================================================================
