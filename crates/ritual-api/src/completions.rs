//! Handler for `/completions/:habit_id` — the durable half of a toggle.

use axum::{
  Json,
  extract::{Path, State},
};
use chrono::NaiveDate;
use ritual_core::{habit::CompletionRecord, store::HabitStore};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
  AppState,
  error::{ApiError, store_err},
};

#[derive(Debug, Deserialize)]
pub struct UpsertBody {
  pub owner_id:  Uuid,
  pub day:       NaiveDate,
  pub completed: bool,
}

/// `PUT /completions/:habit_id`
///
/// Upserts on the (habit, day) key. Only the current reference-timezone
/// day is writable — past days belong to snapshots and future days do
/// not exist yet.
pub async fn upsert<S>(
  State(state): State<AppState<S>>,
  Path(habit_id): Path<Uuid>,
  Json(body): Json<UpsertBody>,
) -> Result<Json<CompletionRecord>, ApiError>
where
  S: HabitStore,
{
  let today = state.calendar.today();
  if body.day != today {
    return Err(ApiError::Unprocessable(format!(
      "completions can only be written for the current day ({today})"
    )));
  }

  let record = state
    .store
    .upsert_completion(body.owner_id, habit_id, body.day, body.completed)
    .await
    .map_err(store_err)?;
  Ok(Json(record))
}
