//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  /// A rule violation the client can fix, e.g. writing a completion for
  /// a day that is not today.
  #[error("unprocessable: {0}")]
  Unprocessable(String),

  #[error(transparent)]
  Core(#[from] ritual_core::Error),
}

/// Collapse a backend error into the API error via the core taxonomy.
pub fn store_err<E: Into<ritual_core::Error>>(e: E) -> ApiError {
  ApiError::Core(e.into())
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    use ritual_core::Error as Core;

    let status = match &self {
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
      ApiError::Core(core) => match core {
        Core::HabitNotFound(_) | Core::VacationNotFound(_) => {
          StatusCode::NOT_FOUND
        }
        Core::DuplicateHabitName(_) | Core::SnapshotExists(_) => {
          StatusCode::CONFLICT
        }
        Core::EmptyHabitName
        | Core::InvertedVacationPeriod { .. }
        | Core::DayStillOpen(_)
        | Core::UnknownTimezone(_) => StatusCode::UNPROCESSABLE_ENTITY,
        Core::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
      },
    };

    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}
