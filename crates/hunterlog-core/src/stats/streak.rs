//! Day-level streak evaluation.
//!
//! A day counts toward a streak iff its success rate meets the threshold.
//! Runs are contiguous by calendar date: a day with no record breaks a run
//! and is never synthesized as a vacuous pass.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::metrics::DailyMetric;

/// Derived streak state; never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakState {
    /// Consecutive trailing qualifying days ending at the most recent day.
    pub current: u32,
    /// Longest qualifying run anywhere in history.
    pub best: u32,
}

/// Evaluates streaks against a success-rate threshold.
#[derive(Debug, Clone, Copy)]
pub struct StreakEvaluator {
    /// Minimum success rate (percentage) for a day to count.
    pub threshold: u8,
}

impl Default for StreakEvaluator {
    fn default() -> Self {
        Self { threshold: 80 }
    }
}

impl StreakEvaluator {
    pub fn new(threshold: u8) -> Self {
        Self { threshold }
    }

    /// Evaluate current and best streaks over a history ordered oldest
    /// first.
    ///
    /// The current streak walks backward from the most recent record; it
    /// is 0 when the most recent day does not qualify, and also when the
    /// most recent record is older than yesterday relative to `today`
    /// (the gap up to today has already broken the run).
    pub fn evaluate(&self, history: &[&DailyMetric], today: NaiveDate) -> StreakState {
        let mut best: u32 = 0;
        let mut run: u32 = 0;
        let mut prev_date: Option<NaiveDate> = None;

        for day in history {
            let contiguous = prev_date
                .map(|prev| day.date == prev + chrono::Duration::days(1))
                .unwrap_or(true);
            if day.success_rate >= self.threshold {
                run = if contiguous { run + 1 } else { 1 };
            } else {
                run = 0;
            }
            best = best.max(run);
            prev_date = Some(day.date);
        }

        // `run` now holds the qualifying run ending at the most recent
        // record; it only counts as current if that record is fresh.
        let current = match history.last() {
            Some(last) if last.date + chrono::Duration::days(1) >= today => run,
            _ => 0,
        };

        StreakState { current, best }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    /// Consecutive days starting June 1 with the given success rates.
    fn history(rates: &[u8]) -> Vec<DailyMetric> {
        rates
            .iter()
            .enumerate()
            .map(|(i, &rate)| {
                DailyMetric::new(date(1 + i as u32), 100, rate as u32, BTreeMap::new()).unwrap()
            })
            .collect()
    }

    fn evaluate(rates: &[u8], today: NaiveDate) -> StreakState {
        let days = history(rates);
        let refs: Vec<&DailyMetric> = days.iter().collect();
        StreakEvaluator::default().evaluate(&refs, today)
    }

    #[test]
    fn empty_history_is_zero() {
        let state = StreakEvaluator::default().evaluate(&[], date(10));
        assert_eq!(state, StreakState { current: 0, best: 0 });
    }

    #[test]
    fn separate_runs_do_not_merge() {
        // [90, 85, 60, 95, 100], threshold 80: current 2, best 2
        let state = evaluate(&[90, 85, 60, 95, 100], date(5));
        assert_eq!(state.current, 2);
        assert_eq!(state.best, 2);
    }

    #[test]
    fn current_zero_when_last_day_fails() {
        let state = evaluate(&[90, 90, 50], date(3));
        assert_eq!(state.current, 0);
        assert_eq!(state.best, 2);
    }

    #[test]
    fn full_history_qualifies() {
        let state = evaluate(&[80, 85, 95, 100], date(4));
        assert_eq!(state.current, 4);
        assert_eq!(state.best, 4);
    }

    #[test]
    fn calendar_gap_breaks_runs() {
        let days = vec![
            DailyMetric::new(date(1), 10, 10, BTreeMap::new()).unwrap(),
            DailyMetric::new(date(2), 10, 10, BTreeMap::new()).unwrap(),
            // June 3 missing
            DailyMetric::new(date(4), 10, 10, BTreeMap::new()).unwrap(),
        ];
        let refs: Vec<&DailyMetric> = days.iter().collect();
        let state = StreakEvaluator::default().evaluate(&refs, date(4));
        assert_eq!(state.current, 1);
        assert_eq!(state.best, 2);
    }

    #[test]
    fn stale_history_has_no_current_streak() {
        // Last record three days before today
        let state = evaluate(&[90, 95], date(5));
        assert_eq!(state.current, 0);
        assert_eq!(state.best, 2);
    }

    #[test]
    fn yesterday_still_counts_as_current() {
        // Last record is yesterday: streak survives until today's first
        // interaction
        let state = evaluate(&[90, 95], date(3));
        assert_eq!(state.current, 2);
    }

    #[test]
    fn threshold_is_inclusive() {
        let state = StreakEvaluator::new(80).evaluate(
            &history(&[80]).iter().collect::<Vec<_>>(),
            date(1),
        );
        assert_eq!(state.current, 1);
    }

    #[test]
    fn best_never_below_current() {
        for rates in [&[90u8, 85, 60, 95, 100][..], &[100][..], &[10, 95, 96, 97][..]] {
            let today = date(rates.len() as u32);
            let state = evaluate(rates, today);
            assert!(state.best >= state.current);
        }
    }
}
