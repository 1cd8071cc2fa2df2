//! Weekly and monthly completion statistics.
//!
//! Both passes count only active habits, and only the days a habit
//! actually existed count toward its denominator — a habit created
//! mid-month is not penalised for the days before it.

use std::collections::{BTreeSet, HashMap};

use chrono::{Datelike, Duration, Months, NaiveDate};
use ritual_core::{Result, calendar::Calendar, store::HabitStore};
use serde::Serialize;
use uuid::Uuid;

use crate::store_err;

// ─── Week ────────────────────────────────────────────────────────────────────

/// Aggregate completion for one day of a week.
#[derive(Debug, Clone, Serialize)]
pub struct DayCompletion {
  pub day:              NaiveDate,
  /// Active habits that existed on this day.
  pub total_habits:     usize,
  pub completed_habits: usize,
  /// Rounded to whole percent; 0 when no habits existed.
  pub percent:          u8,
}

/// Per-day completion for the Sunday-started week containing `day`.
pub async fn week_overview<S: HabitStore>(
  store: &S,
  calendar: &Calendar,
  owner_id: Uuid,
  day: NaiveDate,
) -> Result<Vec<DayCompletion>> {
  let week_start =
    day - Duration::days(i64::from(day.weekday().num_days_from_sunday()));
  let week_end = week_start + Duration::days(6);

  let habits = store
    .list_habits(owner_id, calendar.next_day_boundary(week_end))
    .await
    .map_err(store_err)?;
  let completions = store
    .get_completions_range(owner_id, week_start, week_end)
    .await
    .map_err(store_err)?;

  // (day -> habits completed that day), completed records only.
  let mut completed_by_day: HashMap<NaiveDate, BTreeSet<Uuid>> = HashMap::new();
  for record in completions.into_iter().filter(|c| c.completed) {
    completed_by_day.entry(record.day).or_default().insert(record.habit_id);
  }

  let overview = (0..7)
    .map(|offset| {
      let current = week_start + Duration::days(offset);
      let boundary = calendar.next_day_boundary(current);

      let existing: Vec<Uuid> = habits
        .iter()
        .filter(|h| h.active && h.created_at < boundary)
        .map(|h| h.habit_id)
        .collect();

      let completed = completed_by_day
        .get(&current)
        .map_or(0, |done| {
          existing.iter().filter(|id| done.contains(*id)).count()
        });

      DayCompletion {
        day:              current,
        total_habits:     existing.len(),
        completed_habits: completed,
        percent:          percent_of(completed, existing.len()),
      }
    })
    .collect();

  Ok(overview)
}

// ─── Month ───────────────────────────────────────────────────────────────────

/// One habit's completion record for a month.
#[derive(Debug, Clone, Serialize)]
pub struct HabitMonthStats {
  pub habit_id:        Uuid,
  pub name:            String,
  pub emoji:           Option<String>,
  /// Days-of-month (1-based) on which the habit was completed.
  pub completed_days:  Vec<u32>,
  pub completed_count: usize,
  /// Completed share of the days the habit existed within the month,
  /// rounded to whole percent.
  pub percent:         u8,
}

/// Per-habit statistics for the month containing `day`.
pub async fn month_overview<S: HabitStore>(
  store: &S,
  calendar: &Calendar,
  owner_id: Uuid,
  day: NaiveDate,
) -> Result<Vec<HabitMonthStats>> {
  let month_start = day.with_day(1).unwrap_or(day);
  let month_end =
    (month_start + Months::new(1)).pred_opt().unwrap_or(month_start);
  let days_in_month = month_end.day();

  let habits = store
    .list_habits(owner_id, calendar.next_day_boundary(month_end))
    .await
    .map_err(store_err)?;
  let completions = store
    .get_completions_range(owner_id, month_start, month_end)
    .await
    .map_err(store_err)?;

  let mut completed_by_habit: HashMap<Uuid, BTreeSet<u32>> = HashMap::new();
  for record in completions.into_iter().filter(|c| c.completed) {
    completed_by_habit
      .entry(record.habit_id)
      .or_default()
      .insert(record.day.day());
  }

  let stats = habits
    .into_iter()
    .filter(|h| h.active)
    .map(|habit| {
      let completed: Vec<u32> = completed_by_habit
        .get(&habit.habit_id)
        .map(|days| days.iter().copied().collect())
        .unwrap_or_default();

      // Days the habit existed within the month, capped at its length.
      let created_day = calendar.day_of(habit.created_at);
      let effective_start = created_day.max(month_start);
      let existed_days = if effective_start > month_end {
        0
      } else {
        ((month_end - effective_start).num_days() + 1) as u32
      };
      let existed_days = existed_days.min(days_in_month) as usize;

      HabitMonthStats {
        habit_id:        habit.habit_id,
        name:            habit.name,
        emoji:           habit.emoji,
        completed_count: completed.len(),
        percent:         percent_of(completed.len(), existed_days),
        completed_days:  completed,
      }
    })
    .collect();

  Ok(stats)
}

// ─── Shared ──────────────────────────────────────────────────────────────────

fn percent_of(completed: usize, total: usize) -> u8 {
  if total == 0 {
    return 0;
  }
  (completed as f64 / total as f64 * 100.0).round() as u8
}
