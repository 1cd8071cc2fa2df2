//! Handler for `/day/:date` — the resolved day view.

use axum::{
  Json,
  extract::{Path, Query, State},
};
use chrono::NaiveDate;
use ritual_core::store::HabitStore;
use ritual_engine::{DayView, resolve_day};

use crate::{AppState, OwnerParams, error::ApiError};

/// `GET /day/:date?owner_id=<id>`
///
/// Today resolves from live records; past days from their snapshot when
/// one exists; future days come back empty.
pub async fn get_day<S>(
  State(state): State<AppState<S>>,
  Path(date): Path<NaiveDate>,
  Query(params): Query<OwnerParams>,
) -> Result<Json<DayView>, ApiError>
where
  S: HabitStore,
{
  let view = resolve_day(
    state.store.as_ref(),
    &state.calendar,
    params.owner_id,
    date,
  )
  .await?;
  Ok(Json(view))
}
