//! Injectable day-granularity clock.
//!
//! Every "today" read in the engine goes through [`DayProvider`] so that
//! streak and trend computations are deterministic in tests and day
//! rollover can be exercised without waiting for midnight.

use std::sync::Mutex;

use chrono::{Local, NaiveDate};

/// Supplies the current calendar date at device-local day granularity.
pub trait DayProvider: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Production clock backed by the device-local wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl DayProvider for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Settable clock for tests and simulations.
///
/// Shared via `Arc` so a test can advance the day while the engine holds
/// the same clock.
#[derive(Debug)]
pub struct ManualClock {
    day: Mutex<NaiveDate>,
}

impl ManualClock {
    pub fn new(day: NaiveDate) -> Self {
        Self {
            day: Mutex::new(day),
        }
    }

    /// Move the clock to an arbitrary date.
    pub fn set(&self, day: NaiveDate) {
        *self.day.lock().unwrap() = day;
    }

    /// Advance the clock by whole days (negative moves backward).
    pub fn advance_days(&self, days: i64) {
        let mut guard = self.day.lock().unwrap();
        *guard = *guard + chrono::Duration::days(days);
    }
}

impl DayProvider for ManualClock {
    fn today(&self) -> NaiveDate {
        *self.day.lock().unwrap()
    }
}
