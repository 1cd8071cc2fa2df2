//! The state container for the currently viewed day.
//!
//! [`DaySession`] owns the only mutable copy of the displayed habit
//! list. Two disciplines protect it:
//!
//! - every fetch is tagged with a generation counter, and a result is
//!   applied only if its tag is still current — a response for a
//!   superseded selection can never overwrite newer state, regardless of
//!   network arrival order;
//! - a toggle flips the local flag before the durable write is issued,
//!   and reverts it if the write fails. The flip itself is the only
//!   user-visible intermediate state.

use chrono::NaiveDate;
use ritual_core::{Result, calendar::Calendar, store::HabitStore};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
  resolve::{DaySource, DayView, resolve_day},
  store_err,
};

// ─── Fetch tagging ───────────────────────────────────────────────────────────

/// Tag for one issued fetch. Valid until the next [`DaySession::select_day`]
/// call, which supersedes every earlier ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
  generation: u64,
  day:        NaiveDate,
}

impl FetchTicket {
  pub fn generation(&self) -> u64 {
    self.generation
  }

  pub fn day(&self) -> NaiveDate {
    self.day
  }
}

/// What became of a committed fetch result.
#[derive(Debug)]
pub enum FetchOutcome {
  /// The result was current and is now displayed.
  Applied,
  /// A newer fetch was issued after this one; the result was discarded
  /// without touching displayed state.
  Superseded,
  /// The fetch failed; the previous view is left on screen.
  Failed(ritual_core::Error),
}

// ─── Toggle state machine ────────────────────────────────────────────────────

/// An optimistic toggle whose durable write has not resolved yet.
///
/// Created by [`DaySession::begin_toggle`] (which flips the in-memory
/// flag) and consumed by [`DaySession::resolve_toggle`].
#[derive(Debug)]
#[must_use = "resolve the toggle against the write result or the flag will never roll back"]
pub struct PendingToggle {
  habit_id:  Uuid,
  day:       NaiveDate,
  previous:  bool,
  new_value: bool,
}

impl PendingToggle {
  pub fn habit_id(&self) -> Uuid {
    self.habit_id
  }

  pub fn day(&self) -> NaiveDate {
    self.day
  }

  /// The flag value before the optimistic flip.
  pub fn previous(&self) -> bool {
    self.previous
  }

  /// The flag value the durable write must persist.
  pub fn new_value(&self) -> bool {
    self.new_value
  }
}

/// Terminal state of a toggle.
#[derive(Debug)]
pub enum ToggleOutcome {
  /// Preconditions failed (not today's live view, habit missing or not
  /// togglable); nothing changed.
  Ignored,
  /// The durable write landed; the optimistic flag stands.
  Committed,
  /// The write failed; the flag was reverted to its pre-toggle value.
  RolledBack(ritual_core::Error),
}

// ─── Session ─────────────────────────────────────────────────────────────────

/// Single-owner container for the habit list of the currently viewed
/// day. Only the session itself mutates the view: fetch commits and
/// toggle flips, nothing else.
pub struct DaySession {
  calendar:   Calendar,
  owner_id:   Uuid,
  generation: u64,
  selected:   NaiveDate,
  view:       Option<DayView>,
}

impl DaySession {
  /// Start a session viewing today, with nothing fetched yet.
  pub fn new(calendar: Calendar, owner_id: Uuid) -> Self {
    let selected = calendar.today();
    Self { calendar, owner_id, generation: 0, selected, view: None }
  }

  pub fn owner_id(&self) -> Uuid {
    self.owner_id
  }

  pub fn selected_day(&self) -> NaiveDate {
    self.selected
  }

  /// The currently displayed view, if any fetch has been applied.
  pub fn view(&self) -> Option<&DayView> {
    self.view.as_ref()
  }

  // ── Fetch discipline ──────────────────────────────────────────────────────

  /// Select `day` and issue a fetch tag for it.
  ///
  /// Every ticket issued earlier — for any day — is superseded from this
  /// point on, whether or not its fetch is still in flight.
  pub fn select_day(&mut self, day: NaiveDate) -> FetchTicket {
    self.generation += 1;
    self.selected = day;
    FetchTicket { generation: self.generation, day }
  }

  /// Apply a fetch result if its ticket is still current.
  ///
  /// Supersession is decided by comparing generations, never arrival
  /// order: for a fixed day, the last-issued fetch is authoritative even
  /// when an earlier one resolves later.
  pub fn commit_fetch(
    &mut self,
    ticket: FetchTicket,
    result: Result<DayView>,
  ) -> FetchOutcome {
    if ticket.generation != self.generation {
      debug!(
        stale = ticket.generation,
        current = self.generation,
        day = %ticket.day,
        "discarding superseded fetch result"
      );
      return FetchOutcome::Superseded;
    }

    match result {
      Ok(view) => {
        self.view = Some(view);
        FetchOutcome::Applied
      }
      Err(e) => {
        warn!(day = %ticket.day, error = %e, "day fetch failed; keeping previous view");
        FetchOutcome::Failed(e)
      }
    }
  }

  /// Fetch and display `day` in one step.
  pub async fn refresh<S: HabitStore>(
    &mut self,
    store: &S,
    day: NaiveDate,
  ) -> FetchOutcome {
    let ticket = self.select_day(day);
    let result =
      resolve_day(store, &self.calendar, self.owner_id, day).await;
    self.commit_fetch(ticket, result)
  }

  // ── Toggle state machine ──────────────────────────────────────────────────

  /// Optimistically flip `habit_id`'s completed flag in the displayed
  /// view.
  ///
  /// Returns `None` — leaving all state untouched — unless the session
  /// is on today's live view and the habit is present and togglable.
  /// The UI should never offer the toggle in those cases; this check is
  /// the controller's own enforcement.
  pub fn begin_toggle(&mut self, habit_id: Uuid) -> Option<PendingToggle> {
    if self.selected != self.calendar.today() {
      return None;
    }
    let view = self.view.as_mut()?;
    if view.source != DaySource::Live || view.day != self.selected {
      return None;
    }
    let entry = view.entry_mut(habit_id)?;
    if !entry.can_toggle {
      return None;
    }

    let previous = entry.completed;
    entry.completed = !previous;
    Some(PendingToggle {
      habit_id,
      day: view.day,
      previous,
      new_value: !previous,
    })
  }

  /// Settle a pending toggle against its durable-write result.
  ///
  /// On failure the in-memory flag is restored to its pre-toggle value
  /// before the outcome is returned — no half-applied state survives
  /// this call.
  pub fn resolve_toggle(
    &mut self,
    pending: PendingToggle,
    written: Result<()>,
  ) -> ToggleOutcome {
    match written {
      Ok(()) => ToggleOutcome::Committed,
      Err(e) => {
        if let Some(view) = self.view.as_mut() {
          if view.day == pending.day {
            if let Some(entry) = view.entry_mut(pending.habit_id) {
              entry.completed = pending.previous;
            }
          }
        }
        warn!(habit = %pending.habit_id, error = %e, "toggle write failed; rolled back");
        ToggleOutcome::RolledBack(e)
      }
    }
  }

  /// Toggle `habit_id` for the displayed day: optimistic flip, durable
  /// upsert keyed on (habit, day), rollback on failure.
  pub async fn toggle<S: HabitStore>(
    &mut self,
    store: &S,
    habit_id: Uuid,
  ) -> ToggleOutcome {
    let Some(pending) = self.begin_toggle(habit_id) else {
      return ToggleOutcome::Ignored;
    };

    let written = store
      .upsert_completion(
        self.owner_id,
        habit_id,
        pending.day(),
        pending.new_value(),
      )
      .await
      .map(|_| ())
      .map_err(store_err);

    self.resolve_toggle(pending, written)
  }
}
