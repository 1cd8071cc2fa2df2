//! Day view resolution: which habits a calendar day shows, and in what
//! completion state.
//!
//! Three paths, picked by where the day sits relative to "today":
//! future days are never fetched, today merges live completion records
//! into the habit list, and past days render exclusively from their
//! frozen snapshot when one exists — falling back to live records only
//! for the window before the rollover job has run.

use std::collections::HashMap;

use chrono::NaiveDate;
use ritual_core::{
  Result,
  calendar::Calendar,
  habit::{DaySnapshot, in_vacation},
  store::HabitStore,
};
use serde::Serialize;
use uuid::Uuid;

use crate::store_err;

// ─── View types ──────────────────────────────────────────────────────────────

/// Where a day's displayed state came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DaySource {
  /// Mutable records — today, or a past day whose snapshot has not been
  /// written yet.
  Live,
  /// A frozen [`DaySnapshot`]; immune to later habit edits.
  Snapshot,
  /// Future days carry no state and are never queried.
  Future,
}

/// One habit row in a resolved day.
#[derive(Debug, Clone, Serialize)]
pub struct DayEntry {
  pub habit_id:   Uuid,
  pub name:       String,
  /// Absent on snapshot-sourced rows: the glyph is not frozen.
  pub emoji:      Option<String>,
  pub active:     bool,
  pub completed:  bool,
  /// True only on today's live view, outside vacations, for active
  /// habits. Historical rows are always read-only.
  pub can_toggle: bool,
}

/// The resolved state of one calendar day.
#[derive(Debug, Clone, Serialize)]
pub struct DayView {
  pub day:     NaiveDate,
  pub source:  DaySource,
  pub entries: Vec<DayEntry>,
}

impl DayView {
  pub fn entry(&self, habit_id: Uuid) -> Option<&DayEntry> {
    self.entries.iter().find(|e| e.habit_id == habit_id)
  }

  pub(crate) fn entry_mut(&mut self, habit_id: Uuid) -> Option<&mut DayEntry> {
    self.entries.iter_mut().find(|e| e.habit_id == habit_id)
  }
}

// ─── Resolution ──────────────────────────────────────────────────────────────

/// Resolve the displayed state of `day` for `owner_id`.
///
/// A habit is visible on `day` iff it was created before the start of
/// the following reference-timezone day. Entries come back in display
/// order (the store orders by `order_index`, then creation).
pub async fn resolve_day<S: HabitStore>(
  store: &S,
  calendar: &Calendar,
  owner_id: Uuid,
  day: NaiveDate,
) -> Result<DayView> {
  let today = calendar.today();

  if day > today {
    return Ok(DayView { day, source: DaySource::Future, entries: Vec::new() });
  }

  if day < today {
    if let Some(snapshot) =
      store.get_snapshot(owner_id, day).await.map_err(store_err)?
    {
      return Ok(from_snapshot(day, snapshot));
    }
    // The rollover job has not frozen this day yet; read the live
    // records the same way as for today. Read-only either way.
  }

  let vacations = store.list_vacations(owner_id).await.map_err(store_err)?;
  let habits = store
    .list_habits(owner_id, calendar.next_day_boundary(day))
    .await
    .map_err(store_err)?;
  let completions =
    store.get_completions(owner_id, day).await.map_err(store_err)?;

  let completed_by_habit: HashMap<Uuid, bool> = completions
    .into_iter()
    .map(|c| (c.habit_id, c.completed))
    .collect();

  let togglable_day = day == today && !in_vacation(&vacations, day);

  let entries = habits
    .into_iter()
    .map(|habit| DayEntry {
      habit_id:   habit.habit_id,
      completed:  completed_by_habit
        .get(&habit.habit_id)
        .copied()
        .unwrap_or(false),
      can_toggle: togglable_day && habit.active,
      name:       habit.name,
      emoji:      habit.emoji,
      active:     habit.active,
    })
    .collect();

  Ok(DayView { day, source: DaySource::Live, entries })
}

/// Render a past day from its frozen capture. Nothing here is togglable
/// and later habit edits are invisible.
fn from_snapshot(day: NaiveDate, snapshot: DaySnapshot) -> DayView {
  let entries = snapshot
    .entries
    .into_iter()
    .map(|entry| DayEntry {
      habit_id:   entry.habit_id,
      name:       entry.name,
      emoji:      None,
      active:     entry.active,
      completed:  entry.completed,
      can_toggle: false,
    })
    .collect();

  DayView { day, source: DaySource::Snapshot, entries }
}
