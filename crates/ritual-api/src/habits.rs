//! Handlers for `/habits` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/habits` | `?owner_id` required; paused habits included |
//! | `POST`   | `/habits` | Body: [`CreateBody`]; 201 + stored habit; 409 on duplicate name |
//! | `PUT`    | `/habits/:id` | Body: [`RenameBody`]; replaces name and emoji |
//! | `PUT`    | `/habits/:id/active` | Body: `{"owner_id":..,"active":bool}` |
//! | `DELETE` | `/habits/:id` | `?owner_id` required; idempotent, always 204 |
//! | `POST`   | `/habits/reorder` | Body: [`ReorderBody`]; always 204 |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use ritual_core::{
  emoji::auto_emoji,
  habit::{Habit, NewHabit},
  store::HabitStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
  AppState, OwnerParams,
  error::{ApiError, store_err},
};

// ─── List ────────────────────────────────────────────────────────────────────

/// `GET /habits?owner_id=<id>` — every habit, paused included, in
/// display order.
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<OwnerParams>,
) -> Result<Json<Vec<Habit>>, ApiError>
where
  S: HabitStore,
{
  let bound = state.calendar.next_day_boundary(state.calendar.today());
  let habits = state
    .store
    .list_habits(params.owner_id, bound)
    .await
    .map_err(store_err)?;
  Ok(Json(habits))
}

// ─── Create ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub owner_id: Uuid,
  pub name:     String,
  pub emoji:    Option<String>,
}

/// `POST /habits` — assigns an emoji from the keyword table when the
/// body does not carry one.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: HabitStore,
{
  let emoji = body
    .emoji
    .or_else(|| Some(auto_emoji(&body.name).to_owned()));

  let habit = state
    .store
    .create_habit(NewHabit { owner_id: body.owner_id, name: body.name, emoji })
    .await
    .map_err(store_err)?;
  Ok((StatusCode::CREATED, Json(habit)))
}

// ─── Rename ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RenameBody {
  pub owner_id: Uuid,
  pub name:     String,
  /// Omitting the field clears the glyph.
  pub emoji:    Option<String>,
}

/// `PUT /habits/:id`
pub async fn rename<S>(
  State(state): State<AppState<S>>,
  Path(habit_id): Path<Uuid>,
  Json(body): Json<RenameBody>,
) -> Result<Json<Habit>, ApiError>
where
  S: HabitStore,
{
  let habit = state
    .store
    .rename_habit(habit_id, body.owner_id, body.name, body.emoji)
    .await
    .map_err(store_err)?;
  Ok(Json(habit))
}

// ─── Pause / resume ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SetActiveBody {
  pub owner_id: Uuid,
  pub active:   bool,
}

/// `PUT /habits/:id/active`
pub async fn set_active<S>(
  State(state): State<AppState<S>>,
  Path(habit_id): Path<Uuid>,
  Json(body): Json<SetActiveBody>,
) -> Result<StatusCode, ApiError>
where
  S: HabitStore,
{
  state
    .store
    .set_habit_active(habit_id, body.owner_id, body.active)
    .await
    .map_err(store_err)?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Delete ──────────────────────────────────────────────────────────────────

/// `DELETE /habits/:id?owner_id=<id>` — idempotent; completions cascade.
pub async fn remove<S>(
  State(state): State<AppState<S>>,
  Path(habit_id): Path<Uuid>,
  Query(params): Query<OwnerParams>,
) -> Result<StatusCode, ApiError>
where
  S: HabitStore,
{
  state
    .store
    .delete_habit(habit_id, params.owner_id)
    .await
    .map_err(store_err)?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Reorder ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ReorderBody {
  pub owner_id:    Uuid,
  pub ordered_ids: Vec<Uuid>,
}

/// `POST /habits/reorder` — batch reassignment of display order.
pub async fn reorder<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<ReorderBody>,
) -> Result<StatusCode, ApiError>
where
  S: HabitStore,
{
  state
    .store
    .reorder_habits(body.owner_id, body.ordered_ids)
    .await
    .map_err(store_err)?;
  Ok(StatusCode::NO_CONTENT)
}
