//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, calendar days as
//! `YYYY-MM-DD`, snapshot entries as compact JSON, and UUIDs as
//! hyphenated lowercase strings.

use chrono::{DateTime, NaiveDate, Utc};
use ritual_core::habit::{CompletionRecord, DaySnapshot, Habit, SnapshotEntry, VacationPeriod};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String {
  id.hyphenated().to_string()
}

pub fn decode_uuid(s: &str) -> Result<Uuid> {
  Ok(Uuid::parse_str(s)?)
}

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339()
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_day(day: NaiveDate) -> String {
  day.to_string()
}

pub fn decode_day(s: &str) -> Result<NaiveDate> {
  s.parse()
    .map_err(|e: chrono::ParseError| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `habits` row.
pub struct RawHabit {
  pub habit_id:    String,
  pub owner_id:    String,
  pub name:        String,
  pub emoji:       Option<String>,
  pub active:      bool,
  pub order_index: i64,
  pub created_at:  String,
}

impl RawHabit {
  pub fn into_habit(self) -> Result<Habit> {
    Ok(Habit {
      habit_id:    decode_uuid(&self.habit_id)?,
      owner_id:    decode_uuid(&self.owner_id)?,
      name:        self.name,
      emoji:       self.emoji,
      active:      self.active,
      order_index: self.order_index,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from a `completions` row.
pub struct RawCompletion {
  pub habit_id:  String,
  pub owner_id:  String,
  pub day:       String,
  pub completed: bool,
}

impl RawCompletion {
  pub fn into_completion(self) -> Result<CompletionRecord> {
    Ok(CompletionRecord {
      habit_id:  decode_uuid(&self.habit_id)?,
      owner_id:  decode_uuid(&self.owner_id)?,
      day:       decode_day(&self.day)?,
      completed: self.completed,
    })
  }
}

/// Raw strings read directly from a `snapshots` row.
pub struct RawSnapshot {
  pub snapshot_id: String,
  pub owner_id:    String,
  pub day:         String,
  pub entries:     String,
  pub created_at:  String,
}

impl RawSnapshot {
  pub fn into_snapshot(self) -> Result<DaySnapshot> {
    let entries: Vec<SnapshotEntry> = serde_json::from_str(&self.entries)?;
    Ok(DaySnapshot {
      snapshot_id: decode_uuid(&self.snapshot_id)?,
      owner_id:    decode_uuid(&self.owner_id)?,
      day:         decode_day(&self.day)?,
      entries,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from a `vacations` row.
pub struct RawVacation {
  pub period_id: String,
  pub owner_id:  String,
  pub start_day: String,
  pub end_day:   String,
}

impl RawVacation {
  pub fn into_vacation(self) -> Result<VacationPeriod> {
    Ok(VacationPeriod {
      period_id: decode_uuid(&self.period_id)?,
      owner_id:  decode_uuid(&self.owner_id)?,
      start:     decode_day(&self.start_day)?,
      end:       decode_day(&self.end_day)?,
    })
  }
}
