//! JSON REST API for ritual.
//!
//! Exposes an axum [`Router`] backed by any
//! [`ritual_core::store::HabitStore`]. Owner identity arrives as an
//! explicit `owner_id` field; authentication, TLS, and transport
//! concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! axum::serve(listener, ritual_api::router(state)).await?;
//! ```

pub mod completions;
pub mod day;
pub mod error;
pub mod habits;
pub mod rollover;
pub mod stats;
pub mod vacations;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post, put},
};
use ritual_core::{calendar::Calendar, store::HabitStore};
use serde::Deserialize;
use uuid::Uuid;

pub use error::ApiError;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  /// IANA name of the reference timezone, e.g. `"America/Los_Angeles"`.
  pub timezone:   String,
}

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S: HabitStore> {
  pub store:    Arc<S>,
  pub calendar: Calendar,
}

impl<S: HabitStore> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      store:    Arc::clone(&self.store),
      calendar: self.calendar.clone(),
    }
  }
}

/// Query parameters shared by the owner-scoped GET/DELETE endpoints.
#[derive(Debug, Deserialize)]
pub struct OwnerParams {
  pub owner_id: Uuid,
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router
/// regardless of its own state type.
pub fn router<S>(state: AppState<S>) -> Router<()>
where
  S: HabitStore + 'static,
{
  Router::new()
    // Habits
    .route("/habits", get(habits::list::<S>).post(habits::create::<S>))
    .route("/habits/reorder", post(habits::reorder::<S>))
    .route(
      "/habits/{id}",
      put(habits::rename::<S>).delete(habits::remove::<S>),
    )
    .route("/habits/{id}/active", put(habits::set_active::<S>))
    // Day view + completions
    .route("/day/{date}", get(day::get_day::<S>))
    .route("/completions/{habit_id}", put(completions::upsert::<S>))
    // Vacations
    .route(
      "/vacations",
      get(vacations::list::<S>).post(vacations::create::<S>),
    )
    .route(
      "/vacations/{id}",
      put(vacations::update::<S>).delete(vacations::remove::<S>),
    )
    // Statistics
    .route("/stats/week/{date}", get(stats::week::<S>))
    .route("/stats/month/{date}", get(stats::month::<S>))
    // Scheduled snapshot job
    .route("/rollover", post(rollover::run::<S>))
    .with_state(state)
}

// ─── Integration tests ───────────────────────────────────────────────────────
