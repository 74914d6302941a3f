//! # Hunterlog Core Library
//!
//! Core business logic for Hunterlog, a gamified personal-growth tracker:
//! habits and quests across six life domains feed a per-day metrics
//! history, from which success rates, streaks, and trend direction are
//! derived. The CLI binary (and any GUI shell) is a thin consumer of this
//! library's read contract.
//!
//! ## Architecture
//!
//! - **Metrics Store**: date-deduplicated per-day task totals and
//!   completions, persisted through an opaque key-value store
//! - **Analytics**: windowed weighted success rates, threshold-based
//!   streak evaluation, and half-window trend classification, all as
//!   pure reads
//! - **Completion Tracker**: the single write path; toggling a habit moves
//!   the flag, streak, XP, and today's metrics together, with an explicit
//!   rollback if persistence fails
//! - **Storage**: SQLite key-value table and TOML configuration
//!
//! ## Key Components
//!
//! - [`GrowthEngine`]: completion tracking and the read facade
//! - [`MetricsStore`]: the per-day metrics history
//! - [`StreakEvaluator`] / [`TrendAnalyzer`]: derived analytics
//! - [`DayProvider`]: injectable day-granularity clock

pub mod clock;
pub mod domain;
pub mod engine;
pub mod error;
pub mod habit;
pub mod metrics;
pub mod profile;
pub mod stats;
pub mod storage;

pub use clock::{DayProvider, ManualClock, SystemClock};
pub use domain::{rank_progress, Domain, Rank};
pub use engine::{CompletionResult, DayRate, GrowthEngine, WeekReport};
pub use error::{ConfigError, CoreError, MetricError, Result, StoreError, ValidationError};
pub use habit::{Habit, HabitBook};
pub use metrics::{DailyMetric, DaySummary, DomainSlice, MetricsStore};
pub use profile::{DomainProgress, Profile, ProfileReport};
pub use stats::{StreakEvaluator, StreakState, Trend, TrendAnalyzer};
pub use storage::{Database, EngineConfig, KvStore, MemoryStore};
