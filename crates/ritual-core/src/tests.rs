//! Unit tests for the calendar normaliser, emoji table, and vacation
//! membership.

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::America::Los_Angeles;
use uuid::Uuid;

use crate::{
  calendar::{Calendar, FixedClock},
  emoji::auto_emoji,
  habit::{VacationPeriod, in_vacation},
};

fn utc(s: &str) -> DateTime<Utc> {
  s.parse().unwrap()
}

fn day(s: &str) -> NaiveDate {
  s.parse().unwrap()
}

// ─── Calendar ────────────────────────────────────────────────────────────────

#[test]
fn day_labels_follow_the_reference_zone() {
  let cal = Calendar::new(Los_Angeles);
  // 06:30 UTC is still the previous evening in Los Angeles.
  assert_eq!(cal.day_of(utc("2025-06-10T06:30:00Z")), day("2025-06-09"));
  assert_eq!(cal.day_of(utc("2025-06-10T18:00:00Z")), day("2025-06-10"));
}

#[test]
fn spring_forward_keeps_days_consecutive() {
  let cal = Calendar::new(Los_Angeles);
  // 01:00 PST on Mar 9 2025; 24 hours later is 02:00 PDT on Mar 10.
  let before = utc("2025-03-09T09:00:00Z");
  let after = before + Duration::hours(24);
  assert_eq!(cal.day_of(before), day("2025-03-09"));
  assert_eq!(cal.day_of(after), day("2025-03-10"));
}

#[test]
fn fall_back_keeps_days_consecutive() {
  let cal = Calendar::new(Los_Angeles);
  // 23:00 PDT on Nov 1 2025; 24 hours later is 22:00 PST on Nov 2.
  let before = utc("2025-11-02T06:00:00Z");
  let after = before + Duration::hours(24);
  assert_eq!(cal.day_of(before), day("2025-11-01"));
  assert_eq!(cal.day_of(after), day("2025-11-02"));
}

#[test]
fn next_day_boundary_resolves_offsets_per_instant() {
  let cal = Calendar::new(Los_Angeles);

  // Mar 9 2025 is 23 hours long in Los Angeles.
  let b1 = cal.next_day_boundary(day("2025-03-08"));
  let b2 = cal.next_day_boundary(day("2025-03-09"));
  assert_eq!(b1, utc("2025-03-09T08:00:00Z"));
  assert_eq!(b2 - b1, Duration::hours(23));

  // Nov 2 2025 is 25 hours long.
  let b3 = cal.next_day_boundary(day("2025-11-01"));
  let b4 = cal.next_day_boundary(day("2025-11-02"));
  assert_eq!(b4 - b3, Duration::hours(25));
}

#[test]
fn today_and_future_use_the_injected_clock() {
  // 23:30 in Los Angeles on Aug 5 is already Aug 6 in UTC.
  let now = utc("2025-08-06T06:30:00Z");
  let cal = Calendar::new(Los_Angeles).with_clock(Arc::new(FixedClock(now)));

  assert_eq!(cal.today(), day("2025-08-05"));
  assert!(cal.is_today(now));
  assert!(!cal.is_future_day(day("2025-08-05")));
  assert!(cal.is_future_day(day("2025-08-06")));
}

#[test]
fn zone_names_resolve_or_fail_loudly() {
  assert!(Calendar::from_zone_name("America/Los_Angeles").is_ok());
  assert!(Calendar::from_zone_name("Atlantis/Sunken_City").is_err());
}

// ─── Emoji ───────────────────────────────────────────────────────────────────

#[test]
fn emoji_keywords_match_anywhere_in_the_name() {
  assert_eq!(auto_emoji("Drink water"), "💧");
  assert_eq!(auto_emoji("GYM session"), "💪");
  assert_eq!(auto_emoji("evening reading"), "📚");
  assert_eq!(auto_emoji("practice scales"), "🎸");
}

#[test]
fn emoji_falls_back_to_sparkle() {
  assert_eq!(auto_emoji("inscrutable"), "✨");
}

// ─── Vacations ───────────────────────────────────────────────────────────────

#[test]
fn vacation_membership_is_inclusive_and_unions_periods() {
  let owner_id = Uuid::new_v4();
  let periods = vec![
    VacationPeriod {
      period_id: Uuid::new_v4(),
      owner_id,
      start: day("2025-08-10"),
      end: day("2025-08-15"),
    },
    // Overlapping periods are allowed; membership is their union.
    VacationPeriod {
      period_id: Uuid::new_v4(),
      owner_id,
      start: day("2025-08-14"),
      end: day("2025-08-20"),
    },
  ];

  assert!(in_vacation(&periods, day("2025-08-10")));
  assert!(in_vacation(&periods, day("2025-08-15")));
  assert!(in_vacation(&periods, day("2025-08-20")));
  assert!(!in_vacation(&periods, day("2025-08-09")));
  assert!(!in_vacation(&periods, day("2025-08-21")));
}
