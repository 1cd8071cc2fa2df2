//! The day-resolution engine.
//!
//! Decides, for any calendar day, which habits are shown and in what
//! completion state ([`resolve`]); owns the viewed-day state container
//! with optimistic toggling and fetch supersession ([`session`]); and
//! carries the two batch passes over the store: the nightly snapshot
//! rollover ([`rollover`]) and completion statistics ([`stats`]).
//!
//! Everything here is generic over [`ritual_core::store::HabitStore`] —
//! no HTTP, no database.

pub mod resolve;
pub mod rollover;
pub mod session;
pub mod stats;

pub use resolve::{DayEntry, DaySource, DayView, resolve_day};
pub use rollover::{RolloverOutcome, run_rollover};
pub use session::{
  DaySession, FetchOutcome, FetchTicket, PendingToggle, ToggleOutcome,
};


/// Collapse a backend error into the core taxonomy.
pub(crate) fn store_err<E: Into<ritual_core::Error>>(e: E) -> ritual_core::Error {
  e.into()
}
