//! Date-indexed metrics history over the key-value collaborator.
//!
//! The store keeps the full history in memory (one record per calendar
//! day, ordered by date) and persists each day under `metrics/<date>`.
//! Loads are tolerant: absent or malformed values resolve to absent days
//! rather than failing the caller.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::Domain;
use crate::error::{Result, StoreError};
use crate::metrics::model::DailyMetric;
use crate::storage::KvStore;

const KEY_PREFIX: &str = "metrics/";

fn day_key(date: NaiveDate) -> String {
    format!("{KEY_PREFIX}{}", date.format("%Y-%m-%d"))
}

impl DailyMetric {
    /// Key-value entry for this record.
    pub(crate) fn entry(&self) -> Result<(String, String), StoreError> {
        Ok((day_key(self.date), serde_json::to_string(self)?))
    }
}

/// In-memory metrics history backed by the key-value store.
pub struct MetricsStore {
    kv: Arc<dyn KvStore>,
    days: BTreeMap<NaiveDate, DailyMetric>,
}

impl MetricsStore {
    /// Load the history from the key-value store.
    ///
    /// Malformed records are skipped. A read failure from the collaborator
    /// surfaces as `StoreError`; callers may fall back to an empty history.
    pub fn load(kv: Arc<dyn KvStore>) -> Result<Self, StoreError> {
        let mut days = BTreeMap::new();
        for key in kv.keys_with_prefix(KEY_PREFIX)? {
            let Some(value) = kv.get(&key)? else {
                continue;
            };
            let Ok(metric) = serde_json::from_str::<DailyMetric>(&value) else {
                continue;
            };
            days.insert(metric.date, metric);
        }
        Ok(Self { kv, days })
    }

    /// An empty history over the given store (bootstrap fallback).
    pub fn empty(kv: Arc<dyn KvStore>) -> Self {
        Self {
            kv,
            days: BTreeMap::new(),
        }
    }

    /// The record for a date, if one exists.
    pub fn get_day(&self, date: NaiveDate) -> Option<&DailyMetric> {
        self.days.get(&date)
    }

    /// Full history, oldest first.
    pub fn history(&self) -> Vec<&DailyMetric> {
        self.days.values().collect()
    }

    /// Trailing `window` records, oldest first (fewer if the history is
    /// shorter).
    pub fn recent(&self, window: usize) -> Vec<&DailyMetric> {
        let skip = self.days.len().saturating_sub(window);
        self.days.values().skip(skip).collect()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Replace (or create) the record for a date and persist it.
    ///
    /// Used for synthetic backfill; interactive updates go through the
    /// completion tracker.
    ///
    /// # Errors
    /// `MetricError` for malformed counts; `StoreError` if persistence
    /// fails, in which case the in-memory history is left unchanged.
    pub fn upsert_day(
        &mut self,
        date: NaiveDate,
        total_tasks: u32,
        completed_tasks: u32,
        domains: BTreeMap<Domain, (u32, u32)>,
    ) -> Result<()> {
        let metric = DailyMetric::new(date, total_tasks, completed_tasks, domains)?;
        let previous = self.apply_day(metric);
        if let Err(e) = self.commit_day(date) {
            self.restore_day(date, previous);
            return Err(e.into());
        }
        Ok(())
    }

    /// Apply a record in memory, returning the previous record for
    /// rollback.
    pub(crate) fn apply_day(&mut self, metric: DailyMetric) -> Option<DailyMetric> {
        self.days.insert(metric.date, metric)
    }

    /// Undo an `apply_day`, restoring the previous record (or absence).
    pub(crate) fn restore_day(&mut self, date: NaiveDate, previous: Option<DailyMetric>) {
        match previous {
            Some(metric) => {
                self.days.insert(date, metric);
            }
            None => {
                self.days.remove(&date);
            }
        }
    }

    /// Persist the current record for a date to the key-value store.
    pub(crate) fn commit_day(&self, date: NaiveDate) -> Result<(), StoreError> {
        if let Some(metric) = self.days.get(&date) {
            let (key, value) = metric.entry()?;
            self.kv.set(&key, &value)?;
        }
        Ok(())
    }
}
