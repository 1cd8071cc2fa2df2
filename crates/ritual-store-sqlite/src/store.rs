//! [`SqliteStore`] — the SQLite implementation of [`HabitStore`].

use std::{path::Path, sync::Arc};

use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use chrono::{DateTime, NaiveDate, Utc};
use ritual_core::{
  calendar::{Clock, SystemClock},
  habit::{
    CompletionRecord, DaySnapshot, Habit, NewHabit, SnapshotEntry,
    VacationPeriod,
  },
  store::HabitStore,
};

use crate::{
  Error, Result,
  encode::{
    RawCompletion, RawHabit, RawSnapshot, RawVacation, encode_day, encode_dt,
    encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Constraint classification ───────────────────────────────────────────────

fn is_unique_violation(e: &tokio_rusqlite::Error) -> bool {
  matches!(
    e,
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(err, _))
      if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
  )
}

fn is_foreign_key_violation(e: &tokio_rusqlite::Error) -> bool {
  matches!(
    e,
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(err, _))
      if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY
  )
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A ritual habit store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
/// Timestamps are assigned through the store's [`Clock`], so tests can
/// pin creation instants instead of racing the wall clock.
#[derive(Clone)]
pub struct SqliteStore {
  conn:  tokio_rusqlite::Connection,
  clock: Arc<dyn Clock>,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn, clock: Arc::new(SystemClock) };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn, clock: Arc::new(SystemClock) };
    store.init_schema().await?;
    Ok(store)
  }

  /// Replace the clock used for store-assigned timestamps. The returned
  /// handle shares the underlying connection.
  pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
    self.clock = clock;
    self
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Fetch one habit row scoped to its owner.
  async fn get_habit(
    &self,
    habit_id: Uuid,
    owner_id: Uuid,
  ) -> Result<Option<Habit>> {
    let id_str = encode_uuid(habit_id);
    let owner_str = encode_uuid(owner_id);

    let raw: Option<RawHabit> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT habit_id, owner_id, name, emoji, active, order_index, created_at
               FROM habits WHERE habit_id = ?1 AND owner_id = ?2",
              rusqlite::params![id_str, owner_str],
              |row| {
                Ok(RawHabit {
                  habit_id:    row.get(0)?,
                  owner_id:    row.get(1)?,
                  name:        row.get(2)?,
                  emoji:       row.get(3)?,
                  active:      row.get(4)?,
                  order_index: row.get(5)?,
                  created_at:  row.get(6)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawHabit::into_habit).transpose()
  }
}

// ─── HabitStore impl ─────────────────────────────────────────────────────────

impl HabitStore for SqliteStore {
  type Error = Error;

  // ── Habits ────────────────────────────────────────────────────────────────

  async fn list_habits(
    &self,
    owner_id: Uuid,
    created_before: DateTime<Utc>,
  ) -> Result<Vec<Habit>> {
    let owner_str = encode_uuid(owner_id);
    let before_str = encode_dt(created_before);

    let raws: Vec<RawHabit> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT habit_id, owner_id, name, emoji, active, order_index, created_at
           FROM habits
           WHERE owner_id = ?1 AND created_at < ?2
           ORDER BY order_index ASC, created_at ASC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![owner_str, before_str], |row| {
            Ok(RawHabit {
              habit_id:    row.get(0)?,
              owner_id:    row.get(1)?,
              name:        row.get(2)?,
              emoji:       row.get(3)?,
              active:      row.get(4)?,
              order_index: row.get(5)?,
              created_at:  row.get(6)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawHabit::into_habit).collect()
  }

  async fn create_habit(&self, input: NewHabit) -> Result<Habit> {
    let name = input.name.trim().to_owned();
    if name.is_empty() {
      return Err(Error::EmptyHabitName);
    }

    let habit_id = Uuid::new_v4();
    let created_at = self.clock.now();

    let id_str = encode_uuid(habit_id);
    let owner_str = encode_uuid(input.owner_id);
    let name_col = name.clone();
    let emoji = input.emoji.clone();
    let at_str = encode_dt(created_at);

    // MAX + INSERT run on the single writer connection, so the index
    // cannot be handed out twice.
    let order_index: i64 = match self
      .conn
      .call(move |conn| {
        let next: i64 = conn.query_row(
          "SELECT COALESCE(MAX(order_index) + 1, 0) FROM habits WHERE owner_id = ?1",
          rusqlite::params![owner_str],
          |r| r.get(0),
        )?;
        conn.execute(
          "INSERT INTO habits (habit_id, owner_id, name, emoji, active, order_index, created_at)
           VALUES (?1, ?2, ?3, ?4, 1, ?5, ?6)",
          rusqlite::params![id_str, owner_str, name_col, emoji, next, at_str],
        )?;
        Ok(next)
      })
      .await
    {
      Ok(next) => next,
      Err(e) if is_unique_violation(&e) => {
        return Err(Error::DuplicateHabitName(name));
      }
      Err(e) => return Err(e.into()),
    };

    Ok(Habit {
      habit_id,
      owner_id: input.owner_id,
      name,
      emoji: input.emoji,
      active: true,
      order_index,
      created_at,
    })
  }

  async fn rename_habit(
    &self,
    habit_id: Uuid,
    owner_id: Uuid,
    name: String,
    emoji: Option<String>,
  ) -> Result<Habit> {
    let name = name.trim().to_owned();
    if name.is_empty() {
      return Err(Error::EmptyHabitName);
    }

    let id_str = encode_uuid(habit_id);
    let owner_str = encode_uuid(owner_id);
    let name_col = name.clone();

    let updated = match self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE habits SET name = ?3, emoji = ?4
           WHERE habit_id = ?1 AND owner_id = ?2",
          rusqlite::params![id_str, owner_str, name_col, emoji],
        )?)
      })
      .await
    {
      Ok(n) => n,
      Err(e) if is_unique_violation(&e) => {
        return Err(Error::DuplicateHabitName(name));
      }
      Err(e) => return Err(e.into()),
    };

    if updated == 0 {
      return Err(Error::HabitNotFound(habit_id));
    }

    self
      .get_habit(habit_id, owner_id)
      .await?
      .ok_or(Error::HabitNotFound(habit_id))
  }

  async fn set_habit_active(
    &self,
    habit_id: Uuid,
    owner_id: Uuid,
    active: bool,
  ) -> Result<()> {
    let id_str = encode_uuid(habit_id);
    let owner_str = encode_uuid(owner_id);

    // Zero rows updated means the habit is gone; treated as success.
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE habits SET active = ?3 WHERE habit_id = ?1 AND owner_id = ?2",
          rusqlite::params![id_str, owner_str, active],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn delete_habit(&self, habit_id: Uuid, owner_id: Uuid) -> Result<()> {
    let id_str = encode_uuid(habit_id);
    let owner_str = encode_uuid(owner_id);

    // Completions follow via ON DELETE CASCADE.
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM habits WHERE habit_id = ?1 AND owner_id = ?2",
          rusqlite::params![id_str, owner_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn reorder_habits(
    &self,
    owner_id: Uuid,
    ordered_ids: Vec<Uuid>,
  ) -> Result<()> {
    let owner_str = encode_uuid(owner_id);
    let ids: Vec<String> = ordered_ids.into_iter().map(encode_uuid).collect();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        for (position, id) in ids.iter().enumerate() {
          tx.execute(
            "UPDATE habits SET order_index = ?3
             WHERE habit_id = ?1 AND owner_id = ?2",
            rusqlite::params![id, owner_str, position as i64],
          )?;
        }
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Completions ───────────────────────────────────────────────────────────

  async fn get_completions(
    &self,
    owner_id: Uuid,
    day: NaiveDate,
  ) -> Result<Vec<CompletionRecord>> {
    let owner_str = encode_uuid(owner_id);
    let day_str = encode_day(day);

    let raws: Vec<RawCompletion> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT habit_id, owner_id, day, completed
           FROM completions WHERE owner_id = ?1 AND day = ?2",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![owner_str, day_str], |row| {
            Ok(RawCompletion {
              habit_id:  row.get(0)?,
              owner_id:  row.get(1)?,
              day:       row.get(2)?,
              completed: row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCompletion::into_completion).collect()
  }

  async fn get_completions_range(
    &self,
    owner_id: Uuid,
    from: NaiveDate,
    to: NaiveDate,
  ) -> Result<Vec<CompletionRecord>> {
    let owner_str = encode_uuid(owner_id);
    let from_str = encode_day(from);
    let to_str = encode_day(to);

    let raws: Vec<RawCompletion> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT habit_id, owner_id, day, completed
           FROM completions
           WHERE owner_id = ?1 AND day >= ?2 AND day <= ?3
           ORDER BY day ASC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![owner_str, from_str, to_str], |row| {
            Ok(RawCompletion {
              habit_id:  row.get(0)?,
              owner_id:  row.get(1)?,
              day:       row.get(2)?,
              completed: row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCompletion::into_completion).collect()
  }

  async fn upsert_completion(
    &self,
    owner_id: Uuid,
    habit_id: Uuid,
    day: NaiveDate,
    completed: bool,
  ) -> Result<CompletionRecord> {
    let owner_str = encode_uuid(owner_id);
    let habit_str = encode_uuid(habit_id);
    let day_str = encode_day(day);

    match self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO completions (habit_id, owner_id, day, completed)
           VALUES (?1, ?2, ?3, ?4)
           ON CONFLICT (habit_id, day) DO UPDATE SET completed = excluded.completed",
          rusqlite::params![habit_str, owner_str, day_str, completed],
        )?;
        Ok(())
      })
      .await
    {
      Ok(()) => Ok(CompletionRecord { habit_id, owner_id, day, completed }),
      Err(e) if is_foreign_key_violation(&e) => {
        Err(Error::HabitNotFound(habit_id))
      }
      Err(e) => Err(e.into()),
    }
  }

  // ── Snapshots ─────────────────────────────────────────────────────────────

  async fn get_snapshot(
    &self,
    owner_id: Uuid,
    day: NaiveDate,
  ) -> Result<Option<DaySnapshot>> {
    let owner_str = encode_uuid(owner_id);
    let day_str = encode_day(day);

    let raw: Option<RawSnapshot> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT snapshot_id, owner_id, day, entries, created_at
               FROM snapshots WHERE owner_id = ?1 AND day = ?2",
              rusqlite::params![owner_str, day_str],
              |row| {
                Ok(RawSnapshot {
                  snapshot_id: row.get(0)?,
                  owner_id:    row.get(1)?,
                  day:         row.get(2)?,
                  entries:     row.get(3)?,
                  created_at:  row.get(4)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawSnapshot::into_snapshot).transpose()
  }

  async fn put_snapshot(
    &self,
    owner_id: Uuid,
    day: NaiveDate,
    entries: Vec<SnapshotEntry>,
  ) -> Result<DaySnapshot> {
    let snapshot = DaySnapshot {
      snapshot_id: Uuid::new_v4(),
      owner_id,
      day,
      entries,
      created_at: self.clock.now(),
    };

    let id_str = encode_uuid(snapshot.snapshot_id);
    let owner_str = encode_uuid(owner_id);
    let day_str = encode_day(day);
    let entries_json = serde_json::to_string(&snapshot.entries)?;
    let at_str = encode_dt(snapshot.created_at);

    match self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO snapshots (snapshot_id, owner_id, day, entries, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, owner_str, day_str, entries_json, at_str],
        )?;
        Ok(())
      })
      .await
    {
      Ok(()) => Ok(snapshot),
      Err(e) if is_unique_violation(&e) => Err(Error::SnapshotExists(day)),
      Err(e) => Err(e.into()),
    }
  }

  // ── Vacations ─────────────────────────────────────────────────────────────

  async fn list_vacations(&self, owner_id: Uuid) -> Result<Vec<VacationPeriod>> {
    let owner_str = encode_uuid(owner_id);

    let raws: Vec<RawVacation> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT period_id, owner_id, start_day, end_day
           FROM vacations WHERE owner_id = ?1
           ORDER BY start_day ASC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![owner_str], |row| {
            Ok(RawVacation {
              period_id: row.get(0)?,
              owner_id:  row.get(1)?,
              start_day: row.get(2)?,
              end_day:   row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawVacation::into_vacation).collect()
  }

  async fn add_vacation(
    &self,
    owner_id: Uuid,
    start: NaiveDate,
    end: NaiveDate,
  ) -> Result<VacationPeriod> {
    if end < start {
      return Err(Error::InvertedVacationPeriod { start, end });
    }

    let period = VacationPeriod {
      period_id: Uuid::new_v4(),
      owner_id,
      start,
      end,
    };

    let id_str = encode_uuid(period.period_id);
    let owner_str = encode_uuid(owner_id);
    let start_str = encode_day(start);
    let end_str = encode_day(end);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO vacations (period_id, owner_id, start_day, end_day)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![id_str, owner_str, start_str, end_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(period)
  }

  async fn update_vacation(
    &self,
    period_id: Uuid,
    owner_id: Uuid,
    start: NaiveDate,
    end: NaiveDate,
  ) -> Result<VacationPeriod> {
    if end < start {
      return Err(Error::InvertedVacationPeriod { start, end });
    }

    let id_str = encode_uuid(period_id);
    let owner_str = encode_uuid(owner_id);
    let start_str = encode_day(start);
    let end_str = encode_day(end);

    let updated = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE vacations SET start_day = ?3, end_day = ?4
           WHERE period_id = ?1 AND owner_id = ?2",
          rusqlite::params![id_str, owner_str, start_str, end_str],
        )?)
      })
      .await?;

    if updated == 0 {
      return Err(Error::VacationNotFound(period_id));
    }

    Ok(VacationPeriod { period_id, owner_id, start, end })
  }

  async fn delete_vacation(&self, period_id: Uuid, owner_id: Uuid) -> Result<()> {
    let id_str = encode_uuid(period_id);
    let owner_str = encode_uuid(owner_id);

    // Zero rows deleted is fine: cancelling a cancelled vacation.
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM vacations WHERE period_id = ?1 AND owner_id = ?2",
          rusqlite::params![id_str, owner_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
