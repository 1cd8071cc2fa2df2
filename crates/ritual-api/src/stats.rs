//! Handlers for `/stats` endpoints.

use axum::{
  Json,
  extract::{Path, Query, State},
};
use chrono::NaiveDate;
use ritual_core::store::HabitStore;
use ritual_engine::stats::{
  DayCompletion, HabitMonthStats, month_overview, week_overview,
};

use crate::{AppState, OwnerParams, error::ApiError};

/// `GET /stats/week/:date?owner_id=<id>` — the Sunday-started week
/// containing `date`, one aggregate per day.
pub async fn week<S>(
  State(state): State<AppState<S>>,
  Path(date): Path<NaiveDate>,
  Query(params): Query<OwnerParams>,
) -> Result<Json<Vec<DayCompletion>>, ApiError>
where
  S: HabitStore,
{
  let overview = week_overview(
    state.store.as_ref(),
    &state.calendar,
    params.owner_id,
    date,
  )
  .await?;
  Ok(Json(overview))
}

/// `GET /stats/month/:date?owner_id=<id>` — per-habit statistics for the
/// month containing `date`.
pub async fn month<S>(
  State(state): State<AppState<S>>,
  Path(date): Path<NaiveDate>,
  Query(params): Query<OwnerParams>,
) -> Result<Json<Vec<HabitMonthStats>>, ApiError>
where
  S: HabitStore,
{
  let overview = month_overview(
    state.store.as_ref(),
    &state.calendar,
    params.owner_id,
    date,
  )
  .await?;
  Ok(Json(overview))
}
