//! The `HabitStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `ritual-store-sqlite`). Higher layers (`ritual-engine`, `ritual-api`)
//! depend on this abstraction, not on any concrete backend.

use std::future::Future;

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::habit::{
  CompletionRecord, DaySnapshot, Habit, NewHabit, SnapshotEntry,
  VacationPeriod,
};

/// Abstraction over a ritual habit store backend.
///
/// Deletes are idempotent: removing an entity that is already gone is a
/// no-op success, so retried and raced deletions never surface errors.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait HabitStore: Send + Sync {
  /// Backend error type. Must convert into the core taxonomy so callers
  /// can classify failures (duplicate name, not found, …) without
  /// knowing the backend.
  type Error: std::error::Error + Into<crate::Error> + Send + Sync + 'static;

  // ── Habits ────────────────────────────────────────────────────────────

  /// All habits — paused included — created strictly before
  /// `created_before`, ordered by `order_index` then `created_at`.
  fn list_habits(
    &self,
    owner_id: Uuid,
    created_before: DateTime<Utc>,
  ) -> impl Future<Output = Result<Vec<Habit>, Self::Error>> + Send + '_;

  /// Create and persist a new habit. The store assigns `habit_id`,
  /// `created_at`, and the next free `order_index`.
  ///
  /// Fails with a duplicate-name error if the owner already has a habit
  /// with the same name (case-insensitive), and rejects empty names.
  fn create_habit(
    &self,
    input: NewHabit,
  ) -> impl Future<Output = Result<Habit, Self::Error>> + Send + '_;

  /// Replace a habit's name and emoji. `emoji = None` clears the glyph.
  /// Subject to the same name-uniqueness rule as creation.
  fn rename_habit(
    &self,
    habit_id: Uuid,
    owner_id: Uuid,
    name: String,
    emoji: Option<String>,
  ) -> impl Future<Output = Result<Habit, Self::Error>> + Send + '_;

  /// Pause (`false`) or resume (`true`) a habit. No-op if the habit is
  /// gone.
  fn set_habit_active(
    &self,
    habit_id: Uuid,
    owner_id: Uuid,
    active: bool,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Hard-delete a habit and all its completion records. Idempotent.
  fn delete_habit(
    &self,
    habit_id: Uuid,
    owner_id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Batch-reassign display order: each listed habit gets its position
  /// in `ordered_ids` as `order_index`. Unknown ids are ignored and
  /// omitted habits keep their index.
  fn reorder_habits(
    &self,
    owner_id: Uuid,
    ordered_ids: Vec<Uuid>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Completions ───────────────────────────────────────────────────────

  fn get_completions(
    &self,
    owner_id: Uuid,
    day: NaiveDate,
  ) -> impl Future<Output = Result<Vec<CompletionRecord>, Self::Error>> + Send + '_;

  /// Completion records with `from <= day <= to`.
  fn get_completions_range(
    &self,
    owner_id: Uuid,
    from: NaiveDate,
    to: NaiveDate,
  ) -> impl Future<Output = Result<Vec<CompletionRecord>, Self::Error>> + Send + '_;

  /// Atomic insert-or-update keyed on (habit, day). Never produces a
  /// second row for the same key, even under concurrent toggles.
  fn upsert_completion(
    &self,
    owner_id: Uuid,
    habit_id: Uuid,
    day: NaiveDate,
    completed: bool,
  ) -> impl Future<Output = Result<CompletionRecord, Self::Error>> + Send + '_;

  // ── Snapshots ─────────────────────────────────────────────────────────

  fn get_snapshot(
    &self,
    owner_id: Uuid,
    day: NaiveDate,
  ) -> impl Future<Output = Result<Option<DaySnapshot>, Self::Error>> + Send + '_;

  /// Write the frozen capture for `day`. Snapshots are immutable: a
  /// second write for the same (owner, day) fails.
  fn put_snapshot(
    &self,
    owner_id: Uuid,
    day: NaiveDate,
    entries: Vec<SnapshotEntry>,
  ) -> impl Future<Output = Result<DaySnapshot, Self::Error>> + Send + '_;

  // ── Vacations ─────────────────────────────────────────────────────────

  /// All vacation periods for the owner, ordered by start day.
  fn list_vacations(
    &self,
    owner_id: Uuid,
  ) -> impl Future<Output = Result<Vec<VacationPeriod>, Self::Error>> + Send + '_;

  /// Add a period. Overlap with existing periods is allowed; `end`
  /// before `start` is not.
  fn add_vacation(
    &self,
    owner_id: Uuid,
    start: NaiveDate,
    end: NaiveDate,
  ) -> impl Future<Output = Result<VacationPeriod, Self::Error>> + Send + '_;

  fn update_vacation(
    &self,
    period_id: Uuid,
    owner_id: Uuid,
    start: NaiveDate,
    end: NaiveDate,
  ) -> impl Future<Output = Result<VacationPeriod, Self::Error>> + Send + '_;

  /// Idempotent: deleting a period that is already gone succeeds.
  fn delete_vacation(
    &self,
    period_id: Uuid,
    owner_id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
