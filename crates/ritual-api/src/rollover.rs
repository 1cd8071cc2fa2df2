//! Handler for `/rollover` — the scheduled snapshot job's entry point.

use axum::{Json, extract::State};
use ritual_core::store::HabitStore;
use ritual_engine::{RolloverOutcome, run_rollover};
use serde::Deserialize;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct RolloverBody {
  pub owner_id: Uuid,
}

/// `POST /rollover` — freeze yesterday for the given owner. Safe to call
/// repeatedly; a frozen day reports `already_captured`.
pub async fn run<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<RolloverBody>,
) -> Result<Json<RolloverOutcome>, ApiError>
where
  S: HabitStore,
{
  let outcome =
    run_rollover(state.store.as_ref(), &state.calendar, body.owner_id).await?;
  Ok(Json(outcome))
}
