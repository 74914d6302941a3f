//! Habits and quests: discrete units of work with an XP reward.
//!
//! A habit's per-day completion flag is derived from its `last_completed`
//! date, so it resets implicitly at day rollover. The streak counter
//! resets when a calendar day is skipped, matching the day-level streak
//! rule.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Domain;
use crate::error::{StoreError, ValidationError};
use crate::storage::KvStore;

const KEY_PREFIX: &str = "habit/";

fn habit_key(id: Uuid) -> String {
    format!("{KEY_PREFIX}{id}")
}

/// A discrete habit or quest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: Uuid,
    pub name: String,
    /// The life domain this habit's XP feeds.
    pub domain: Domain,
    /// XP awarded on completion (always positive).
    pub xp_reward: u32,
    /// Consecutive days completed.
    pub streak: u32,
    pub last_completed: Option<NaiveDate>,
    /// Streak value from before the most recent completion, carried in the
    /// bundle so an undo restores it exactly.
    #[serde(default)]
    prev_streak: u32,
    /// `last_completed` from before the most recent completion.
    #[serde(default)]
    prev_completed: Option<NaiveDate>,
}

impl Habit {
    /// Create a habit.
    ///
    /// # Errors
    /// Rejects an empty name or a zero XP reward.
    pub fn new(name: &str, domain: Domain, xp_reward: u32) -> Result<Self, ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "name".into(),
                message: "must not be empty".into(),
            });
        }
        if xp_reward == 0 {
            return Err(ValidationError::InvalidValue {
                field: "xp_reward".into(),
                message: "must be positive".into(),
            });
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            domain,
            xp_reward,
            streak: 0,
            last_completed: None,
            prev_streak: 0,
            prev_completed: None,
        })
    }

    /// Whether the habit is complete for the given day.
    pub fn completed_on(&self, today: NaiveDate) -> bool {
        self.last_completed == Some(today)
    }

    /// Mark complete for `today`, returning the new streak value.
    ///
    /// A completion the day after the previous one extends the streak; a
    /// skipped day restarts it at 1.
    pub(crate) fn complete(&mut self, today: NaiveDate) -> u32 {
        let consecutive = self.last_completed == Some(today - chrono::Duration::days(1));
        self.prev_streak = self.streak;
        self.prev_completed = self.last_completed;
        self.streak = if consecutive { self.streak + 1 } else { 1 };
        self.last_completed = Some(today);
        self.streak
    }

    /// Undo today's completion, restoring the pre-completion streak and
    /// date exactly (a completion after a gap undoes back to the old
    /// date, not to yesterday). Returns the restored streak value.
    pub(crate) fn undo(&mut self) -> u32 {
        self.streak = self.prev_streak;
        self.last_completed = self.prev_completed;
        self.streak
    }

    /// Key-value entry for this habit's bundle.
    pub(crate) fn entry(&self) -> Result<(String, String), StoreError> {
        Ok((habit_key(self.id), serde_json::to_string(self)?))
    }
}

/// The habit catalog, persisted one bundle per habit.
pub struct HabitBook {
    kv: Arc<dyn KvStore>,
    habits: BTreeMap<Uuid, Habit>,
}

impl HabitBook {
    /// Load all habit bundles, skipping malformed ones.
    pub fn load(kv: Arc<dyn KvStore>) -> Result<Self, StoreError> {
        let mut habits = BTreeMap::new();
        for key in kv.keys_with_prefix(KEY_PREFIX)? {
            let Some(value) = kv.get(&key)? else {
                continue;
            };
            let Ok(habit) = serde_json::from_str::<Habit>(&value) else {
                continue;
            };
            habits.insert(habit.id, habit);
        }
        Ok(Self { kv, habits })
    }

    /// An empty catalog over the given store (bootstrap fallback).
    pub fn empty(kv: Arc<dyn KvStore>) -> Self {
        Self {
            kv,
            habits: BTreeMap::new(),
        }
    }

    pub fn get(&self, id: Uuid) -> Option<&Habit> {
        self.habits.get(&id)
    }

    /// All habits, ordered by id.
    pub fn list(&self) -> Vec<&Habit> {
        self.habits.values().collect()
    }

    /// Habits belonging to one domain.
    pub fn list_by_domain(&self, domain: Domain) -> Vec<&Habit> {
        self.habits.values().filter(|h| h.domain == domain).collect()
    }

    pub fn len(&self) -> usize {
        self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }

    /// Insert a habit and persist it.
    pub(crate) fn insert(&mut self, habit: Habit) -> Result<(), StoreError> {
        let (key, value) = habit.entry()?;
        self.kv.set(&key, &value)?;
        self.habits.insert(habit.id, habit);
        Ok(())
    }

    /// Remove a habit and its persisted bundle. Returns the removed habit.
    pub(crate) fn remove(&mut self, id: Uuid) -> Result<Option<Habit>, StoreError> {
        let removed = self.habits.remove(&id);
        if removed.is_some() {
            self.kv.delete(&habit_key(id))?;
        }
        Ok(removed)
    }

    /// Apply an updated habit in memory, returning the previous state for
    /// rollback.
    pub(crate) fn apply(&mut self, habit: Habit) -> Option<Habit> {
        self.habits.insert(habit.id, habit)
    }

    /// Undo an `apply`, restoring the previous state.
    pub(crate) fn restore(&mut self, id: Uuid, previous: Option<Habit>) {
        match previous {
            Some(habit) => {
                self.habits.insert(id, habit);
            }
            None => {
                self.habits.remove(&id);
            }
        }
    }
}
