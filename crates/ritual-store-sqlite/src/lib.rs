//! SQLite backend for the ritual habit store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated
//! thread without blocking the async runtime. Carries in-schema the
//! constraints the domain relies on: case-insensitive name uniqueness
//! per owner, one completion row per (habit, day) with upsert-on-conflict
//! writes, completion cascade on habit delete, and one immutable
//! snapshot per (owner, day).

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
