//! Handlers for `/vacations` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/vacations` | `?owner_id` required; ordered by start |
//! | `POST`   | `/vacations` | Body: [`PeriodBody`]; 201; overlap allowed |
//! | `PUT`    | `/vacations/:id` | Body: [`PeriodBody`] |
//! | `DELETE` | `/vacations/:id` | `?owner_id` required; idempotent, always 204 |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::NaiveDate;
use ritual_core::{habit::VacationPeriod, store::HabitStore};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
  AppState, OwnerParams,
  error::{ApiError, store_err},
};

#[derive(Debug, Deserialize)]
pub struct PeriodBody {
  pub owner_id: Uuid,
  pub start:    NaiveDate,
  pub end:      NaiveDate,
}

/// `GET /vacations?owner_id=<id>`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<OwnerParams>,
) -> Result<Json<Vec<VacationPeriod>>, ApiError>
where
  S: HabitStore,
{
  let periods =
    state.store.list_vacations(params.owner_id).await.map_err(store_err)?;
  Ok(Json(periods))
}

/// `POST /vacations`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<PeriodBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: HabitStore,
{
  let period = state
    .store
    .add_vacation(body.owner_id, body.start, body.end)
    .await
    .map_err(store_err)?;
  Ok((StatusCode::CREATED, Json(period)))
}

/// `PUT /vacations/:id`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  Path(period_id): Path<Uuid>,
  Json(body): Json<PeriodBody>,
) -> Result<Json<VacationPeriod>, ApiError>
where
  S: HabitStore,
{
  let period = state
    .store
    .update_vacation(period_id, body.owner_id, body.start, body.end)
    .await
    .map_err(store_err)?;
  Ok(Json(period))
}

/// `DELETE /vacations/:id?owner_id=<id>` — cancelling a cancelled
/// vacation is still a success.
pub async fn remove<S>(
  State(state): State<AppState<S>>,
  Path(period_id): Path<Uuid>,
  Query(params): Query<OwnerParams>,
) -> Result<StatusCode, ApiError>
where
  S: HabitStore,
{
  state
    .store
    .delete_vacation(period_id, params.owner_id)
    .await
    .map_err(store_err)?;
  Ok(StatusCode::NO_CONTENT)
}
