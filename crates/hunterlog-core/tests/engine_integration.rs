//! Integration tests for the growth engine.
//!
//! Exercises the full workflow against a real SQLite store: habit
//! completion, day rollover, backfilled history, and the derived
//! aggregates, streaks, and trends the UI reads.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use hunterlog_core::{
    Database, DayProvider, Domain, EngineConfig, GrowthEngine, ManualClock, Trend,
};

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
}

fn sqlite_engine(today: NaiveDate) -> (GrowthEngine, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(today));
    let engine = GrowthEngine::with_parts(
        Arc::new(Database::open_memory().unwrap()),
        Arc::clone(&clock) as Arc<dyn DayProvider>,
        EngineConfig::default(),
    );
    (engine, clock)
}

#[test]
fn full_week_workflow() {
    let (mut engine, clock) = sqlite_engine(date(1));

    let run = engine.add_habit("Morning run", Domain::Physical, 25).unwrap();
    let read = engine.add_habit("Read 20 pages", Domain::Mental, 10).unwrap();
    let save = engine.add_habit("Track spending", Domain::Financial, 15).unwrap();

    // Days 1-4: everything done
    for _ in 0..4 {
        engine.toggle_completion(run).unwrap();
        engine.toggle_completion(read).unwrap();
        engine.toggle_completion(save).unwrap();
        clock.advance_days(1);
    }
    // Day 5: only one of three done
    engine.toggle_completion(read).unwrap();
    clock.advance_days(1);
    // Days 6-7: everything done again
    for _ in 0..2 {
        engine.toggle_completion(run).unwrap();
        engine.toggle_completion(read).unwrap();
        engine.toggle_completion(save).unwrap();
        clock.advance_days(1);
    }

    // Task slots only register when touched, so day 5 holds a single
    // 1/1 record and every day sits at 100%
    assert_eq!(engine.metrics().len(), 7);
    assert_eq!(engine.success_rate_for_window(7), 100);

    // Per-domain rates: mental was done all 7 days, physical 6 of 6
    // registered days
    assert_eq!(engine.domain_success_rate_for_window(Domain::Mental, 7), 100);
    assert_eq!(engine.domain_success_rate_for_window(Domain::Physical, 7), 100);
    assert_eq!(engine.domain_success_rate_for_window(Domain::Emotional, 7), 0);

    // Streaks: every recorded day sits at 100%, so the week is one run
    let streaks = engine.streaks();
    assert_eq!(streaks.current, 7);
    assert_eq!(streaks.best, 7);

    // Habit streaks: read is at 7, run broke on day 5 and rebuilt to 2
    assert_eq!(engine.habit(read).unwrap().streak, 7);
    assert_eq!(engine.habit(run).unwrap().streak, 2);

    // XP: run 6*25 + read 7*10 + save 6*15 = 310
    assert_eq!(engine.profile().total_xp(), 310);
    assert_eq!(engine.profile().domain_xp(Domain::Physical), 150);
    assert_eq!(engine.profile().domain_xp(Domain::Mental), 70);
    assert_eq!(engine.profile().domain_xp(Domain::Financial), 90);
}

#[test]
fn undone_day_breaks_the_streak() {
    let (mut engine, clock) = sqlite_engine(date(1));
    let habit = engine.add_habit("Journal", Domain::Emotional, 10).unwrap();

    engine.toggle_completion(habit).unwrap();
    clock.advance_days(1);
    engine.toggle_completion(habit).unwrap();
    // Undo today's completion: the day drops to 0% and the current streak
    // collapses
    engine.toggle_completion(habit).unwrap();

    let streaks = engine.streaks();
    assert_eq!(streaks.current, 0);
    assert_eq!(streaks.best, 1);
    assert_eq!(engine.habit(habit).unwrap().streak, 1);
}

#[test]
fn backfilled_history_drives_trend_and_streaks() {
    let (mut engine, _clock) = sqlite_engine(date(11));

    // June 5-10: success rates 60, 65, 70, 85, 90, 95
    for (i, completed) in [60u32, 65, 70, 85, 90, 95].iter().enumerate() {
        engine
            .backfill_day(date(5 + i as u32), 100, *completed, BTreeMap::new())
            .unwrap();
    }

    assert_eq!(engine.trend(6), Trend::Up);
    let streaks = engine.streaks();
    assert_eq!(streaks.current, 3); // 85, 90, 95 ending yesterday
    assert_eq!(streaks.best, 3);
}

#[test]
fn backfill_replaces_a_day_in_place() {
    let (mut engine, _clock) = sqlite_engine(date(11));

    engine.backfill_day(date(5), 10, 2, BTreeMap::new()).unwrap();
    engine.backfill_day(date(5), 10, 9, BTreeMap::new()).unwrap();

    assert_eq!(engine.metrics().len(), 1);
    assert_eq!(engine.metrics().get_day(date(5)).unwrap().success_rate, 90);
}

#[test]
fn custom_threshold_changes_what_counts() {
    let clock = Arc::new(ManualClock::new(date(8)));
    let mut config = EngineConfig::default();
    config.streak_threshold = 60;
    let mut engine = GrowthEngine::with_parts(
        Arc::new(Database::open_memory().unwrap()),
        clock as Arc<dyn DayProvider>,
        config,
    );

    for (i, completed) in [60u32, 70, 55, 65].iter().enumerate() {
        engine
            .backfill_day(date(4 + i as u32), 100, *completed, BTreeMap::new())
            .unwrap();
    }

    let streaks = engine.streaks();
    assert_eq!(streaks.current, 1); // only the 65 after the 55 break
    assert_eq!(streaks.best, 2); // 60, 70
}

#[test]
fn undo_after_reopening_restores_the_prior_date() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hunterlog.db");
    let clock = Arc::new(ManualClock::new(date(5)));

    let id = {
        let mut engine = GrowthEngine::with_parts(
            Arc::new(Database::open_at(&path).unwrap()),
            Arc::clone(&clock) as Arc<dyn DayProvider>,
            EngineConfig::default(),
        );
        let id = engine.add_habit("Run", Domain::Physical, 25).unwrap();
        engine.toggle_completion(id).unwrap();
        // Gap: the June 10 completion restarts the streak
        clock.set(date(10));
        engine.toggle_completion(id).unwrap();
        id
    };

    let mut engine = GrowthEngine::with_parts(
        Arc::new(Database::open_at(&path).unwrap()),
        clock as Arc<dyn DayProvider>,
        EngineConfig::default(),
    );
    engine.toggle_completion(id).unwrap();

    // The June 5 completion is back, not a synthesized yesterday
    let habit = engine.habit(id).unwrap();
    assert_eq!(habit.last_completed, Some(date(5)));
    assert_eq!(habit.streak, 1);
}

#[test]
fn engine_state_survives_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hunterlog.db");
    let clock = Arc::new(ManualClock::new(date(1)));

    let id = {
        let mut engine = GrowthEngine::with_parts(
            Arc::new(Database::open_at(&path).unwrap()),
            Arc::clone(&clock) as Arc<dyn DayProvider>,
            EngineConfig::default(),
        );
        let id = engine.add_habit("Run", Domain::Physical, 25).unwrap();
        engine.toggle_completion(id).unwrap();
        id
    };

    let engine = GrowthEngine::with_parts(
        Arc::new(Database::open_at(&path).unwrap()),
        clock as Arc<dyn DayProvider>,
        EngineConfig::default(),
    );
    assert_eq!(engine.profile().total_xp(), 25);
    assert_eq!(engine.habit(id).unwrap().streak, 1);
    assert_eq!(engine.metrics().get_day(date(1)).unwrap().success_rate, 100);
}
