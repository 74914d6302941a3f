//! The growth engine: completion tracking plus the read contract.
//!
//! `GrowthEngine` owns the metrics history, habit catalog, and profile,
//! and is the only writer of any of them. Completion toggles are two-phase:
//! the in-memory delta is applied first (so UI feedback is immediate),
//! then committed to the key-value store as a single atomic batch; a
//! failed commit applies the inverse delta and surfaces the store error,
//! leaving neither memory nor disk partially updated. All other
//! operations are pure reads, safe to call on every render.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock::{DayProvider, SystemClock};
use crate::domain::Domain;
use crate::error::{CoreError, Result};
use crate::habit::{Habit, HabitBook};
use crate::metrics::{DailyMetric, DaySummary, MetricsStore};
use crate::profile::{Profile, ProfileReport};
use crate::stats::{self, StreakEvaluator, StreakState, Trend, TrendAnalyzer};
use crate::storage::{Database, EngineConfig, KvStore};

/// Outcome of a completion toggle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResult {
    pub habit_id: Uuid,
    pub name: String,
    pub domain: Domain,
    /// New completion state for today.
    pub completed: bool,
    /// The habit's streak counter after the toggle.
    pub habit_streak: u32,
    /// XP applied to the domain and global totals (negative on undo).
    pub xp_delta: i64,
    /// Today's metrics after the toggle, projected for display.
    pub today: DaySummary,
}

/// One day's entry in the week report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayRate {
    pub date: NaiveDate,
    pub total: u32,
    pub completed: u32,
    pub rate: u8,
}

/// Trailing-week view: per-day rates, the weighted weekly rate, and the
/// trend classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekReport {
    pub days: Vec<DayRate>,
    pub weekly_rate: u8,
    pub trend: Trend,
}

/// The Progress & Streak Analytics Engine.
pub struct GrowthEngine {
    kv: Arc<dyn KvStore>,
    clock: Arc<dyn DayProvider>,
    config: EngineConfig,
    metrics: MetricsStore,
    habits: HabitBook,
    profile: Profile,
}

impl GrowthEngine {
    /// Open the engine over the on-disk database with the saved
    /// configuration and the system clock.
    ///
    /// # Errors
    /// Returns an error only if the database cannot be opened; unreadable
    /// stored state degrades to empty history/catalog/profile.
    pub fn open() -> Result<Self> {
        let kv: Arc<dyn KvStore> = Arc::new(Database::open()?);
        Ok(Self::with_parts(
            kv,
            Arc::new(SystemClock),
            EngineConfig::load(),
        ))
    }

    /// Assemble an engine from explicit collaborators.
    ///
    /// State that cannot be read back from the store falls back to empty
    /// defaults rather than failing.
    pub fn with_parts(
        kv: Arc<dyn KvStore>,
        clock: Arc<dyn DayProvider>,
        config: EngineConfig,
    ) -> Self {
        let metrics = MetricsStore::load(Arc::clone(&kv))
            .unwrap_or_else(|_| MetricsStore::empty(Arc::clone(&kv)));
        let habits =
            HabitBook::load(Arc::clone(&kv)).unwrap_or_else(|_| HabitBook::empty(Arc::clone(&kv)));
        let profile = Profile::load(kv.as_ref()).unwrap_or_default();
        Self {
            kv,
            clock,
            config,
            metrics,
            habits,
            profile,
        }
    }

    // --- read contract -------------------------------------------------

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn metrics(&self) -> &MetricsStore {
        &self.metrics
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn profile_report(&self) -> ProfileReport {
        self.profile.report()
    }

    pub fn habit(&self, id: Uuid) -> Option<&Habit> {
        self.habits.get(id)
    }

    pub fn habits(&self) -> Vec<&Habit> {
        self.habits.list()
    }

    pub fn habits_in_domain(&self, domain: Domain) -> Vec<&Habit> {
        self.habits.list_by_domain(domain)
    }

    /// Weighted success rate over the trailing `window` recorded days.
    pub fn success_rate_for_window(&self, window: usize) -> u8 {
        stats::success_rate(self.metrics.recent(window))
    }

    /// Weighted success rate for one domain over the trailing `window`
    /// recorded days.
    pub fn domain_success_rate_for_window(&self, domain: Domain, window: usize) -> u8 {
        stats::domain_success_rate(domain, self.metrics.recent(window))
    }

    /// Current and best streaks under the configured threshold.
    pub fn streaks(&self) -> StreakState {
        StreakEvaluator::new(self.config.streak_threshold)
            .evaluate(&self.metrics.history(), self.clock.today())
    }

    /// Trend direction over the trailing `window` daily rates.
    pub fn trend(&self, window: usize) -> Trend {
        let rates: Vec<u8> = self
            .metrics
            .recent(window)
            .iter()
            .map(|day| day.success_rate)
            .collect();
        TrendAnalyzer::new(self.config.trend_deadzone).classify(&rates)
    }

    /// Trend over the configured default window.
    pub fn default_trend(&self) -> Trend {
        self.trend(self.config.trend_window)
    }

    /// Per-day rates for the trailing week plus the weighted weekly rate
    /// and trend.
    pub fn week_report(&self) -> WeekReport {
        let recent = self.metrics.recent(self.config.week_window);
        let days: Vec<DayRate> = recent
            .iter()
            .map(|day| DayRate {
                date: day.date,
                total: day.total_tasks,
                completed: day.completed_tasks,
                rate: day.success_rate,
            })
            .collect();
        let rates: Vec<u8> = days.iter().map(|d| d.rate).collect();
        WeekReport {
            weekly_rate: stats::success_rate(recent),
            trend: TrendAnalyzer::new(self.config.trend_deadzone).classify(&rates),
            days,
        }
    }

    // --- writes --------------------------------------------------------

    /// Add a habit to the catalog.
    ///
    /// # Errors
    /// Validation errors for an empty name or zero reward; store errors if
    /// the bundle cannot be persisted.
    pub fn add_habit(&mut self, name: &str, domain: Domain, xp_reward: u32) -> Result<Uuid> {
        let habit = Habit::new(name, domain, xp_reward)?;
        let id = habit.id;
        self.habits.insert(habit)?;
        Ok(id)
    }

    /// Remove a habit from the catalog. Accumulated XP and past metrics
    /// are kept.
    pub fn remove_habit(&mut self, id: Uuid) -> Result<()> {
        match self.habits.remove(id)? {
            Some(_) => Ok(()),
            None => Err(CoreError::UnknownHabit(id)),
        }
    }

    /// Toggle today's completion state for a habit.
    ///
    /// Completing awards the XP reward and counts the task in today's
    /// metrics; undoing reverses the award and the completion counts
    /// (floored at 0). The flag, streak, XP, and metrics move together:
    /// on a failed commit every in-memory change is rolled back.
    ///
    /// # Errors
    /// `UnknownHabit` if the id is not in the catalog; `Store` if the
    /// batched commit fails (neither memory nor the store changes in that
    /// case).
    pub fn toggle_completion(&mut self, id: Uuid) -> Result<CompletionResult> {
        let today = self.clock.today();
        let habit = self
            .habits
            .get(id)
            .cloned()
            .ok_or(CoreError::UnknownHabit(id))?;

        let completing = !habit.completed_on(today);
        let xp = habit.xp_reward as u64;

        let mut next_habit = habit.clone();
        let mut next_metric = self
            .metrics
            .get_day(today)
            .cloned()
            .unwrap_or_else(|| DailyMetric::empty(today));
        let mut next_profile = self.profile.clone();

        if completing {
            next_habit.complete(today);
            next_metric.register(habit.id, habit.domain);
            next_metric.add_completion(habit.domain);
            next_profile.award(habit.domain, xp);
        } else {
            next_habit.undo();
            next_metric.remove_completion(habit.domain);
            next_profile.revoke(habit.domain, xp);
        }
        let habit_streak = next_habit.streak;

        // Serialize the post-toggle bundle up front; a serialization
        // failure aborts before any state changes.
        let entries = [
            next_habit.entry()?,
            next_metric.entry()?,
            next_profile.entry()?,
        ];

        // Phase 1: apply optimistically, keeping rollback state.
        let prev_habit = self.habits.apply(next_habit);
        let prev_metric = self.metrics.apply_day(next_metric);
        let prev_profile = std::mem::replace(&mut self.profile, next_profile);

        // Phase 2: one batched write, so a failure leaves no key behind.
        if let Err(e) = self.kv.set_many(&entries) {
            self.habits.restore(id, prev_habit);
            self.metrics.restore_day(today, prev_metric);
            self.profile = prev_profile;
            return Err(e.into());
        }

        let today_metric = self
            .metrics
            .get_day(today)
            .map(DailyMetric::summary)
            .unwrap_or_else(|| DailyMetric::empty(today).summary());
        Ok(CompletionResult {
            habit_id: id,
            name: habit.name,
            domain: habit.domain,
            completed: completing,
            habit_streak,
            xp_delta: if completing { xp as i64 } else { -(xp as i64) },
            today: today_metric,
        })
    }

    /// Backfill (or replace) a day's record with synthetic counts.
    ///
    /// # Errors
    /// `MetricError` for malformed counts, `Store` if persistence fails.
    pub fn backfill_day(
        &mut self,
        date: NaiveDate,
        total_tasks: u32,
        completed_tasks: u32,
        domains: BTreeMap<Domain, (u32, u32)>,
    ) -> Result<()> {
        self.metrics
            .upsert_day(date, total_tasks, completed_tasks, domains)
    }
}
