//! Daily metric records.
//!
//! One [`DailyMetric`] exists per calendar day. It carries the day's task
//! totals and completions, an integer success rate, and a per-domain
//! breakdown under the same invariants. Counts are unsigned by type;
//! `completed <= total` is validated on construction.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Domain;
use crate::error::MetricError;

/// Integer percentage `round(completed / total * 100)`, 0 when total is 0.
pub fn percent(completed: u64, total: u64) -> u8 {
    if total == 0 {
        0
    } else {
        ((completed as f64 / total as f64) * 100.0).round() as u8
    }
}

/// Task counts for a single domain on a single day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainSlice {
    pub total: u32,
    pub completed: u32,
    /// Integer percentage, derived from the counts above.
    pub rate: u8,
}

/// One day's metrics record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyMetric {
    /// Calendar date, unique key within the history.
    pub date: NaiveDate,
    pub total_tasks: u32,
    pub completed_tasks: u32,
    /// Integer percentage, derived from the counts above.
    pub success_rate: u8,
    /// Per-domain breakdown; only domains with data appear.
    #[serde(default)]
    pub domains: BTreeMap<Domain, DomainSlice>,
    /// Habits counted in `total_tasks` for this day. Registration is
    /// sticky: undoing a completion does not remove the task slot.
    #[serde(default)]
    pub(crate) registered: BTreeSet<Uuid>,
}

/// Display projection of a day's record: the counts, rates, and domain
/// breakdown without the task-slot bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub total_tasks: u32,
    pub completed_tasks: u32,
    pub success_rate: u8,
    pub domains: BTreeMap<Domain, DomainSlice>,
}

impl DaySummary {
    /// Success rate for one domain, if the domain has data on this day.
    pub fn domain_rate(&self, domain: Domain) -> Option<u8> {
        self.domains.get(&domain).map(|slice| slice.rate)
    }
}

impl DailyMetric {
    /// Build a validated record.
    ///
    /// # Errors
    /// Returns `MetricError` if any completed count exceeds its total.
    pub fn new(
        date: NaiveDate,
        total_tasks: u32,
        completed_tasks: u32,
        domains: BTreeMap<Domain, (u32, u32)>,
    ) -> Result<Self, MetricError> {
        if completed_tasks > total_tasks {
            return Err(MetricError::InvalidCounts {
                date,
                total: total_tasks,
                completed: completed_tasks,
            });
        }

        let mut breakdown = BTreeMap::new();
        for (domain, (total, completed)) in domains {
            if completed > total {
                return Err(MetricError::InvalidDomainCounts {
                    date,
                    domain: domain.to_string(),
                    total,
                    completed,
                });
            }
            breakdown.insert(
                domain,
                DomainSlice {
                    total,
                    completed,
                    rate: percent(completed as u64, total as u64),
                },
            );
        }

        Ok(Self {
            date,
            total_tasks,
            completed_tasks,
            success_rate: percent(completed_tasks as u64, total_tasks as u64),
            domains: breakdown,
            registered: BTreeSet::new(),
        })
    }

    /// An empty record for the given date.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            total_tasks: 0,
            completed_tasks: 0,
            success_rate: 0,
            domains: BTreeMap::new(),
            registered: BTreeSet::new(),
        }
    }

    /// Success rate for one domain, if the domain has data on this day.
    pub fn domain_rate(&self, domain: Domain) -> Option<u8> {
        self.domains.get(&domain).map(|slice| slice.rate)
    }

    /// The display projection of this record.
    pub fn summary(&self) -> DaySummary {
        DaySummary {
            date: self.date,
            total_tasks: self.total_tasks,
            completed_tasks: self.completed_tasks,
            success_rate: self.success_rate,
            domains: self.domains.clone(),
        }
    }

    /// Register a habit's task slot for this day. The first registration
    /// grows `total_tasks` (and the domain total) by one; re-registration
    /// after an undo is a no-op.
    pub(crate) fn register(&mut self, habit_id: Uuid, domain: Domain) {
        if self.registered.insert(habit_id) {
            self.total_tasks += 1;
            self.domains.entry(domain).or_default().total += 1;
            self.recompute();
        }
    }

    /// Count one completion toward the day and the domain.
    pub(crate) fn add_completion(&mut self, domain: Domain) {
        self.completed_tasks += 1;
        self.domains.entry(domain).or_default().completed += 1;
        self.recompute();
    }

    /// Undo one completion, flooring all counts at 0.
    pub(crate) fn remove_completion(&mut self, domain: Domain) {
        self.completed_tasks = self.completed_tasks.saturating_sub(1);
        if let Some(slice) = self.domains.get_mut(&domain) {
            slice.completed = slice.completed.saturating_sub(1);
        }
        self.recompute();
    }

    fn recompute(&mut self) {
        self.success_rate = percent(self.completed_tasks as u64, self.total_tasks as u64);
        for slice in self.domains.values_mut() {
            slice.rate = percent(slice.completed as u64, slice.total as u64);
        }
    }
}
