//! Daily snapshot rollover.
//!
//! Freezes yesterday's habit state into an immutable [`DaySnapshot`] so
//! later renames, pauses, and deletions cannot rewrite history. The
//! trigger is external — a scheduler or an admin call — never a user
//! action.

use std::collections::HashMap;

use chrono::NaiveDate;
use ritual_core::{
  Error, Result,
  calendar::Calendar,
  habit::SnapshotEntry,
  store::HabitStore,
};
use tracing::info;
use uuid::Uuid;

use crate::store_err;

/// What a rollover run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RolloverOutcome {
  /// A snapshot for `day` was written.
  Captured { day: NaiveDate, habit_count: usize },
  /// `day` is already frozen; nothing was written.
  AlreadyCaptured { day: NaiveDate },
}

/// Freeze yesterday (reference timezone) for `owner_id`. Idempotent:
/// a second run for the same day reports [`RolloverOutcome::AlreadyCaptured`].
pub async fn run_rollover<S: HabitStore>(
  store: &S,
  calendar: &Calendar,
  owner_id: Uuid,
) -> Result<RolloverOutcome> {
  match calendar.today().pred_opt() {
    Some(day) => capture_day(store, calendar, owner_id, day).await,
    // The calendar origin has no predecessor; unreachable with a real
    // clock.
    None => Ok(RolloverOutcome::AlreadyCaptured { day: calendar.today() }),
  }
}

/// Freeze a specific past day. Fails for today and future days — an
/// open day's completions are still changing.
pub async fn capture_day<S: HabitStore>(
  store: &S,
  calendar: &Calendar,
  owner_id: Uuid,
  day: NaiveDate,
) -> Result<RolloverOutcome> {
  if day >= calendar.today() {
    return Err(Error::DayStillOpen(day));
  }

  if store.get_snapshot(owner_id, day).await.map_err(store_err)?.is_some() {
    return Ok(RolloverOutcome::AlreadyCaptured { day });
  }

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

  let entries: Vec<SnapshotEntry> = habits
    .into_iter()
    .map(|habit| SnapshotEntry {
      habit_id:  habit.habit_id,
      completed: completed_by_habit
        .get(&habit.habit_id)
        .copied()
        .unwrap_or(false),
      name:      habit.name,
      active:    habit.active,
    })
    .collect();

  let habit_count = entries.len();
  match store.put_snapshot(owner_id, day, entries).await.map_err(store_err) {
    Ok(_) => {
      info!(owner = %owner_id, %day, habit_count, "froze daily snapshot");
      Ok(RolloverOutcome::Captured { day, habit_count })
    }
    // Lost a race against another trigger; the day is frozen either way.
    Err(Error::SnapshotExists(_)) => {
      Ok(RolloverOutcome::AlreadyCaptured { day })
    }
    Err(e) => Err(e),
  }
}
