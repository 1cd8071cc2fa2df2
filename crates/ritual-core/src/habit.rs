//! Habit, completion, snapshot, and vacation records.
//!
//! These are thin typed rows; all behaviour (visibility, completion
//! resolution, toggling) lives in the engine crate. Timestamps are
//! store-assigned and never accepted from callers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Habit ───────────────────────────────────────────────────────────────────

/// A tracked habit.
///
/// `name` is unique per owner, compared case-insensitively. `order_index`
/// defines display order; ties are broken by `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habit {
  pub habit_id:    Uuid,
  pub owner_id:    Uuid,
  pub name:        String,
  pub emoji:       Option<String>,
  /// Paused habits (`active == false`) stay visible but cannot be toggled.
  pub active:      bool,
  pub order_index: i64,
  /// Store-assigned creation instant; decides which days show the habit.
  pub created_at:  DateTime<Utc>,
}

/// Input to [`crate::store::HabitStore::create_habit`].
/// `created_at` and `order_index` are always assigned by the store.
#[derive(Debug, Clone)]
pub struct NewHabit {
  pub owner_id: Uuid,
  pub name:     String,
  pub emoji:    Option<String>,
}

impl NewHabit {
  pub fn new(owner_id: Uuid, name: impl Into<String>) -> Self {
    Self { owner_id, name: name.into(), emoji: None }
  }

  pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
    self.emoji = Some(emoji.into());
    self
  }
}

// ─── Completion ──────────────────────────────────────────────────────────────

/// Per-day completion state for one habit.
///
/// At most one record exists per (habit, day) pair; writes are upserts on
/// that key, so concurrent toggles converge to last-write-wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRecord {
  pub habit_id:  Uuid,
  pub owner_id:  Uuid,
  /// Reference-timezone calendar day this record belongs to.
  pub day:       NaiveDate,
  pub completed: bool,
}

// ─── Snapshot ────────────────────────────────────────────────────────────────

/// One habit's state as frozen in a [`DaySnapshot`].
///
/// Carries its own copy of the name and active flag so later edits to the
/// live habit can never rewrite history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotEntry {
  pub habit_id:  Uuid,
  pub name:      String,
  pub active:    bool,
  pub completed: bool,
}

/// An immutable capture of all habits' state for one past calendar day.
/// Written once per (owner, day) by the rollover job, never updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySnapshot {
  pub snapshot_id: Uuid,
  pub owner_id:    Uuid,
  pub day:         NaiveDate,
  pub entries:     Vec<SnapshotEntry>,
  pub created_at:  DateTime<Utc>,
}

// ─── Vacation ────────────────────────────────────────────────────────────────

/// A closed date interval during which habits are not togglable.
/// Periods may overlap; membership is the union over all stored periods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VacationPeriod {
  pub period_id: Uuid,
  pub owner_id:  Uuid,
  pub start:     NaiveDate,
  pub end:       NaiveDate,
}

impl VacationPeriod {
  /// Both bounds are inclusive.
  pub fn contains(&self, day: NaiveDate) -> bool {
    self.start <= day && day <= self.end
  }
}

/// True if `day` falls inside any of `periods`.
pub fn in_vacation(periods: &[VacationPeriod], day: NaiveDate) -> bool {
  periods.iter().any(|p| p.contains(day))
}
