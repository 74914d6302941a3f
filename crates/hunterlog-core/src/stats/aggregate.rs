//! Windowed success-rate aggregation.
//!
//! Rates are weighted by task volume: the window's completions are summed
//! against the window's totals, so days with more tasks count
//! proportionally more. This is not an average of daily percentages.

use crate::domain::Domain;
use crate::metrics::{percent, DailyMetric};

/// Weighted success rate across the given days, as an integer percentage.
///
/// Returns 0 when the window holds no tasks.
pub fn success_rate<'a, I>(days: I) -> u8
where
    I: IntoIterator<Item = &'a DailyMetric>,
{
    let mut total: u64 = 0;
    let mut completed: u64 = 0;
    for day in days {
        total += day.total_tasks as u64;
        completed += day.completed_tasks as u64;
    }
    percent(completed, total)
}

/// Weighted success rate for one domain across the given days.
///
/// Only days where the domain has data (a non-zero total) contribute.
pub fn domain_success_rate<'a, I>(domain: Domain, days: I) -> u8
where
    I: IntoIterator<Item = &'a DailyMetric>,
{
    let mut total: u64 = 0;
    let mut completed: u64 = 0;
    for day in days {
        if let Some(slice) = day.domains.get(&domain) {
            if slice.total > 0 {
                total += slice.total as u64;
                completed += slice.completed as u64;
            }
        }
    }
    percent(completed, total)
}
