//! SQL schema for the ritual SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated
//! on the `PRAGMA user_version` number.

/// Full schema DDL; idempotent thanks to `CREATE ... IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS habits (
    habit_id    TEXT PRIMARY KEY,
    owner_id    TEXT NOT NULL,
    name        TEXT NOT NULL,
    emoji       TEXT,
    active      INTEGER NOT NULL DEFAULT 1,
    order_index INTEGER NOT NULL,
    created_at  TEXT NOT NULL    -- ISO 8601 UTC; store-assigned
);

-- Habit names are unique per owner, ignoring case.
CREATE UNIQUE INDEX IF NOT EXISTS habits_owner_name_idx
    ON habits(owner_id, lower(name));

-- One row per (habit, day); toggle writes upsert on this key.
-- Rows vanish with their habit.
CREATE TABLE IF NOT EXISTS completions (
    habit_id  TEXT NOT NULL REFERENCES habits(habit_id) ON DELETE CASCADE,
    owner_id  TEXT NOT NULL,
    day       TEXT NOT NULL,   -- YYYY-MM-DD, reference-timezone day
    completed INTEGER NOT NULL,
    PRIMARY KEY (habit_id, day)
);

CREATE INDEX IF NOT EXISTS completions_owner_day_idx
    ON completions(owner_id, day);

-- Frozen per-day capture of habit state; written once, never updated.
-- Deliberately not referencing habits: history outlives deletion.
CREATE TABLE IF NOT EXISTS snapshots (
    snapshot_id TEXT PRIMARY KEY,
    owner_id    TEXT NOT NULL,
    day         TEXT NOT NULL,
    entries     TEXT NOT NULL,  -- JSON array of SnapshotEntry
    created_at  TEXT NOT NULL,
    UNIQUE (owner_id, day)
);

CREATE TABLE IF NOT EXISTS vacations (
    period_id TEXT PRIMARY KEY,
    owner_id  TEXT NOT NULL,
    start_day TEXT NOT NULL,
    end_day   TEXT NOT NULL,
    CHECK (start_day <= end_day)
);

CREATE INDEX IF NOT EXISTS vacations_owner_idx ON vacations(owner_id);

PRAGMA user_version = 1;
";
