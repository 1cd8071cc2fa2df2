//! Error types for `ritual-core`.
//!
//! This enum is the failure taxonomy every layer classifies against:
//! store backends convert their own errors into it, so callers can tell
//! a duplicate habit name apart from a generic storage failure without
//! knowing which backend they are talking to.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("habit not found: {0}")]
  HabitNotFound(Uuid),

  #[error("habit name cannot be empty")]
  EmptyHabitName,

  #[error("a habit named {0:?} already exists")]
  DuplicateHabitName(String),

  #[error("vacation period not found: {0}")]
  VacationNotFound(Uuid),

  #[error("vacation period ends ({end}) before it starts ({start})")]
  InvertedVacationPeriod { start: NaiveDate, end: NaiveDate },

  #[error("snapshot for {0} already exists")]
  SnapshotExists(NaiveDate),

  #[error("cannot freeze {0}: the day has not ended yet")]
  DayStillOpen(NaiveDate),

  #[error("unknown timezone: {0:?}")]
  UnknownTimezone(String),

  /// Backend-specific failure with no domain meaning (I/O, transport, …).
  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
