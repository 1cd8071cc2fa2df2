//! Integration tests for `SqliteStore` against an in-memory database.

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use ritual_core::{
  calendar::FixedClock,
  habit::{NewHabit, SnapshotEntry},
  store::HabitStore,
};
use uuid::Uuid;

use crate::{Error, SqliteStore};

fn utc(s: &str) -> DateTime<Utc> {
  s.parse().unwrap()
}

fn day(s: &str) -> NaiveDate {
  s.parse().unwrap()
}

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
    .with_clock(Arc::new(FixedClock(utc("2025-08-05T17:00:00Z"))))
}

fn far_future() -> DateTime<Utc> {
  utc("2100-01-01T00:00:00Z")
}

// ─── Habits ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_list_habits() {
  let s = store().await;
  let owner = Uuid::new_v4();

  let first = s
    .create_habit(NewHabit::new(owner, "Drink water").with_emoji("💧"))
    .await
    .unwrap();
  let second = s.create_habit(NewHabit::new(owner, "Meditate")).await.unwrap();

  assert!(first.active);
  assert_eq!(first.order_index, 0);
  assert_eq!(second.order_index, 1);

  let habits = s.list_habits(owner, far_future()).await.unwrap();
  assert_eq!(habits.len(), 2);
  assert_eq!(habits[0].name, "Drink water");
  assert_eq!(habits[0].emoji.as_deref(), Some("💧"));
  assert_eq!(habits[1].name, "Meditate");
  assert_eq!(habits[1].emoji, None);
}

#[tokio::test]
async fn habits_are_scoped_to_their_owner() {
  let s = store().await;
  let alice = Uuid::new_v4();
  let bob = Uuid::new_v4();

  s.create_habit(NewHabit::new(alice, "Run")).await.unwrap();
  // Same name under a different owner is fine.
  s.create_habit(NewHabit::new(bob, "Run")).await.unwrap();

  assert_eq!(s.list_habits(alice, far_future()).await.unwrap().len(), 1);
  assert_eq!(s.list_habits(bob, far_future()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn duplicate_names_are_rejected_case_insensitively() {
  let s = store().await;
  let owner = Uuid::new_v4();

  s.create_habit(NewHabit::new(owner, "Read")).await.unwrap();
  let err = s.create_habit(NewHabit::new(owner, "read")).await.unwrap_err();
  assert!(matches!(err, Error::DuplicateHabitName(name) if name == "read"));
}

#[tokio::test]
async fn empty_and_blank_names_are_rejected() {
  let s = store().await;
  let owner = Uuid::new_v4();

  let err = s.create_habit(NewHabit::new(owner, "")).await.unwrap_err();
  assert!(matches!(err, Error::EmptyHabitName));

  let err = s.create_habit(NewHabit::new(owner, "   ")).await.unwrap_err();
  assert!(matches!(err, Error::EmptyHabitName));
}

#[tokio::test]
async fn created_before_bound_is_strict() {
  let s = store().await;
  let owner = Uuid::new_v4();

  let habit = s.create_habit(NewHabit::new(owner, "Journal")).await.unwrap();

  let at_creation = s.list_habits(owner, habit.created_at).await.unwrap();
  assert!(at_creation.is_empty());

  let just_after = s
    .list_habits(owner, habit.created_at + Duration::seconds(1))
    .await
    .unwrap();
  assert_eq!(just_after.len(), 1);
}

#[tokio::test]
async fn rename_updates_name_and_emoji() {
  let s = store().await;
  let owner = Uuid::new_v4();

  let habit = s
    .create_habit(NewHabit::new(owner, "Walk").with_emoji("🌿"))
    .await
    .unwrap();

  let renamed = s
    .rename_habit(habit.habit_id, owner, "Evening walk".into(), None)
    .await
    .unwrap();
  assert_eq!(renamed.name, "Evening walk");
  assert_eq!(renamed.emoji, None);
  assert_eq!(renamed.created_at, habit.created_at);
}

#[tokio::test]
async fn rename_respects_name_uniqueness() {
  let s = store().await;
  let owner = Uuid::new_v4();

  s.create_habit(NewHabit::new(owner, "Read")).await.unwrap();
  let other = s.create_habit(NewHabit::new(owner, "Write")).await.unwrap();

  let err = s
    .rename_habit(other.habit_id, owner, "READ".into(), None)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::DuplicateHabitName(_)));
}

#[tokio::test]
async fn rename_missing_habit_is_an_error() {
  let s = store().await;
  let err = s
    .rename_habit(Uuid::new_v4(), Uuid::new_v4(), "Ghost".into(), None)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::HabitNotFound(_)));
}

#[tokio::test]
async fn pause_resume_and_missing_habit_noop() {
  let s = store().await;
  let owner = Uuid::new_v4();

  let habit = s.create_habit(NewHabit::new(owner, "Stretch")).await.unwrap();

  s.set_habit_active(habit.habit_id, owner, false).await.unwrap();
  let habits = s.list_habits(owner, far_future()).await.unwrap();
  assert!(!habits[0].active, "paused habit stays listed");

  s.set_habit_active(habit.habit_id, owner, true).await.unwrap();
  let habits = s.list_habits(owner, far_future()).await.unwrap();
  assert!(habits[0].active);

  // Updating a habit that is gone is a no-op success.
  s.set_habit_active(Uuid::new_v4(), owner, false).await.unwrap();
}

#[tokio::test]
async fn delete_cascades_completions_and_is_idempotent() {
  let s = store().await;
  let owner = Uuid::new_v4();
  let today = day("2025-08-05");

  let habit = s.create_habit(NewHabit::new(owner, "Floss")).await.unwrap();
  s.upsert_completion(owner, habit.habit_id, today, true).await.unwrap();
  assert_eq!(s.get_completions(owner, today).await.unwrap().len(), 1);

  s.delete_habit(habit.habit_id, owner).await.unwrap();
  assert!(s.list_habits(owner, far_future()).await.unwrap().is_empty());
  assert!(s.get_completions(owner, today).await.unwrap().is_empty());

  // Second delete: already gone, still success.
  s.delete_habit(habit.habit_id, owner).await.unwrap();
}

#[tokio::test]
async fn reorder_assigns_positions_and_ignores_unknown_ids() {
  let s = store().await;
  let owner = Uuid::new_v4();

  let a = s.create_habit(NewHabit::new(owner, "A")).await.unwrap();
  let b = s.create_habit(NewHabit::new(owner, "B")).await.unwrap();
  let c = s.create_habit(NewHabit::new(owner, "C")).await.unwrap();

  s.reorder_habits(owner, vec![c.habit_id, Uuid::new_v4(), a.habit_id, b.habit_id])
    .await
    .unwrap();

  let names: Vec<String> = s
    .list_habits(owner, far_future())
    .await
    .unwrap()
    .into_iter()
    .map(|h| h.name)
    .collect();
  assert_eq!(names, ["C", "A", "B"]);
}

// ─── Completions ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn upsert_completion_keeps_one_record_per_key() {
  let s = store().await;
  let owner = Uuid::new_v4();
  let today = day("2025-08-05");

  let habit = s.create_habit(NewHabit::new(owner, "Hydrate")).await.unwrap();

  s.upsert_completion(owner, habit.habit_id, today, true).await.unwrap();
  s.upsert_completion(owner, habit.habit_id, today, true).await.unwrap();

  let records = s.get_completions(owner, today).await.unwrap();
  assert_eq!(records.len(), 1);
  assert!(records[0].completed);

  // Flipping the value still replaces the same row.
  s.upsert_completion(owner, habit.habit_id, today, false).await.unwrap();
  let records = s.get_completions(owner, today).await.unwrap();
  assert_eq!(records.len(), 1);
  assert!(!records[0].completed);
}

#[tokio::test]
async fn upsert_for_unknown_habit_reports_not_found() {
  let s = store().await;
  let err = s
    .upsert_completion(Uuid::new_v4(), Uuid::new_v4(), day("2025-08-05"), true)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::HabitNotFound(_)));
}

#[tokio::test]
async fn completion_range_is_inclusive() {
  let s = store().await;
  let owner = Uuid::new_v4();

  let habit = s.create_habit(NewHabit::new(owner, "Log")).await.unwrap();
  for d in ["2025-08-01", "2025-08-03", "2025-08-07"] {
    s.upsert_completion(owner, habit.habit_id, day(d), true).await.unwrap();
  }

  let records = s
    .get_completions_range(owner, day("2025-08-01"), day("2025-08-03"))
    .await
    .unwrap();
  assert_eq!(records.len(), 2);
  assert_eq!(records[0].day, day("2025-08-01"));
  assert_eq!(records[1].day, day("2025-08-03"));
}

// ─── Snapshots ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn snapshot_roundtrip_and_immutability() {
  let s = store().await;
  let owner = Uuid::new_v4();
  let frozen_day = day("2025-08-04");

  let entries = vec![SnapshotEntry {
    habit_id:  Uuid::new_v4(),
    name:      "Drink water".into(),
    active:    true,
    completed: true,
  }];

  let snapshot = s.put_snapshot(owner, frozen_day, entries.clone()).await.unwrap();
  assert_eq!(snapshot.day, frozen_day);

  let fetched = s.get_snapshot(owner, frozen_day).await.unwrap().unwrap();
  assert_eq!(fetched.snapshot_id, snapshot.snapshot_id);
  assert_eq!(fetched.entries.len(), 1);
  assert_eq!(fetched.entries[0].name, "Drink water");
  assert!(fetched.entries[0].completed);

  // Snapshots are written once.
  let err = s.put_snapshot(owner, frozen_day, entries).await.unwrap_err();
  assert!(matches!(err, Error::SnapshotExists(d) if d == frozen_day));
}

#[tokio::test]
async fn missing_snapshot_is_none() {
  let s = store().await;
  let found = s.get_snapshot(Uuid::new_v4(), day("2025-08-04")).await.unwrap();
  assert!(found.is_none());
}

// ─── Vacations ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn vacation_crud_and_idempotent_delete() {
  let s = store().await;
  let owner = Uuid::new_v4();

  s.add_vacation(owner, day("2025-09-01"), day("2025-09-05"))
    .await
    .unwrap();
  let first = s
    .add_vacation(owner, day("2025-08-10"), day("2025-08-15"))
    .await
    .unwrap();

  let listed = s.list_vacations(owner).await.unwrap();
  assert_eq!(listed.len(), 2);
  assert_eq!(listed[0].period_id, first.period_id, "sorted by start day");

  let updated = s
    .update_vacation(first.period_id, owner, day("2025-08-11"), day("2025-08-16"))
    .await
    .unwrap();
  assert_eq!(updated.start, day("2025-08-11"));

  s.delete_vacation(first.period_id, owner).await.unwrap();
  s.delete_vacation(first.period_id, owner).await.unwrap();
  assert_eq!(s.list_vacations(owner).await.unwrap().len(), 1);
}

#[tokio::test]
async fn inverted_vacation_period_is_rejected() {
  let s = store().await;
  let owner = Uuid::new_v4();

  let err = s
    .add_vacation(owner, day("2025-08-15"), day("2025-08-10"))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::InvertedVacationPeriod { .. }));

  let period = s
    .add_vacation(owner, day("2025-08-10"), day("2025-08-10"))
    .await
    .unwrap();
  let err = s
    .update_vacation(period.period_id, owner, day("2025-08-12"), day("2025-08-11"))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::InvertedVacationPeriod { .. }));
}

#[tokio::test]
async fn update_missing_vacation_is_an_error() {
  let s = store().await;
  let err = s
    .update_vacation(Uuid::new_v4(), Uuid::new_v4(), day("2025-08-10"), day("2025-08-12"))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::VacationNotFound(_)));
}
