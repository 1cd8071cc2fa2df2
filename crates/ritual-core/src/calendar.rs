//! Calendar-day normalisation in the fixed reference timezone.
//!
//! Every day comparison in the system — habit creation cutoffs,
//! completion keys, "is today", "is future" — goes through [`Calendar`],
//! so all viewers see the same day boundaries regardless of their local
//! clock. The UTC offset is resolved per instant, never fixed, so day
//! labels stay stable across daylight-saving transitions.

use std::{str::FromStr, sync::Arc};

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::{Error, Result};

// ─── Clock ───────────────────────────────────────────────────────────────────

/// Source of the current instant. Injectable so tests can pin "now"
/// instead of depending on the wall clock.
pub trait Clock: Send + Sync {
  fn now(&self) -> DateTime<Utc>;
}

/// The wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Utc> {
    Utc::now()
  }
}

/// A clock frozen at one instant, for tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
  fn now(&self) -> DateTime<Utc> {
    self.0
  }
}

// ─── Calendar ────────────────────────────────────────────────────────────────

/// Normalises instants to calendar days in one fixed reference timezone.
///
/// Cheap to clone — the clock is reference-counted.
#[derive(Clone)]
pub struct Calendar {
  tz:    Tz,
  clock: Arc<dyn Clock>,
}

impl Calendar {
  pub fn new(tz: Tz) -> Self {
    Self { tz, clock: Arc::new(SystemClock) }
  }

  /// Resolve a zone by IANA name, e.g. `"America/Los_Angeles"`.
  pub fn from_zone_name(name: &str) -> Result<Self> {
    let tz =
      Tz::from_str(name).map_err(|_| Error::UnknownTimezone(name.to_owned()))?;
    Ok(Self::new(tz))
  }

  pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
    self.clock = clock;
    self
  }

  pub fn zone(&self) -> Tz {
    self.tz
  }

  /// The reference-timezone calendar day containing `instant`.
  pub fn day_of(&self, instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&self.tz).date_naive()
  }

  /// The current reference-timezone calendar day.
  pub fn today(&self) -> NaiveDate {
    self.day_of(self.clock.now())
  }

  pub fn is_today(&self, instant: DateTime<Utc>) -> bool {
    self.day_of(instant) == self.today()
  }

  /// Whether `day` starts after the current reference-timezone day.
  pub fn is_future_day(&self, day: NaiveDate) -> bool {
    day > self.today()
  }

  /// The absolute instant at which the day after `day` begins.
  ///
  /// Habits created strictly before this instant existed on `day`; it is
  /// the bound used for "created on or before `day`" queries against a
  /// store that holds absolute timestamps.
  pub fn next_day_boundary(&self, day: NaiveDate) -> DateTime<Utc> {
    self.start_of_day(day + Duration::days(1))
  }

  /// Absolute instant of local midnight on `day`.
  ///
  /// Midnight can be doubled or skipped by a DST transition in zones
  /// that shift at 00:00: an ambiguous midnight resolves to its earlier
  /// instant, and a skipped one to the first valid local time after the
  /// gap.
  fn start_of_day(&self, day: NaiveDate) -> DateTime<Utc> {
    let midnight = day.and_time(NaiveTime::MIN);
    for minutes in [0i64, 30, 60, 90, 120] {
      let candidate = midnight + Duration::minutes(minutes);
      if let Some(local) = self.tz.from_local_datetime(&candidate).earliest() {
        return local.with_timezone(&Utc);
      }
    }
    // No zone on earth skips more than two hours at once.
    Utc.from_utc_datetime(&midnight)
  }
}
