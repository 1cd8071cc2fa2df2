//! Error type for `ritual-store-sqlite`.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] ritual_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("habit not found: {0}")]
  HabitNotFound(Uuid),

  #[error("habit name cannot be empty")]
  EmptyHabitName,

  #[error("a habit named {0:?} already exists")]
  DuplicateHabitName(String),

  #[error("snapshot for {0} already exists")]
  SnapshotExists(NaiveDate),

  #[error("vacation period not found: {0}")]
  VacationNotFound(Uuid),

  #[error("vacation period ends ({end}) before it starts ({start})")]
  InvertedVacationPeriod { start: NaiveDate, end: NaiveDate },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Collapse into the core taxonomy so generic callers can classify
/// failures without naming this backend.
impl From<Error> for ritual_core::Error {
  fn from(e: Error) -> Self {
    use ritual_core::Error as Core;
    match e {
      Error::Core(core) => core,
      Error::HabitNotFound(id) => Core::HabitNotFound(id),
      Error::EmptyHabitName => Core::EmptyHabitName,
      Error::DuplicateHabitName(name) => Core::DuplicateHabitName(name),
      Error::SnapshotExists(d) => Core::SnapshotExists(d),
      Error::VacationNotFound(id) => Core::VacationNotFound(id),
      Error::InvertedVacationPeriod { start, end } => {
        Core::InvertedVacationPeriod { start, end }
      }
      other => Core::Storage(Box::new(other)),
    }
  }
}
