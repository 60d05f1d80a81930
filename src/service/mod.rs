//! Store-backed query layer
//!
//! Thin async functions that assemble snapshots from the persistent store
//! and hand them to the pure analytics core. All functions are read-only
//! except the session lifecycle and set logging in [`workout`].

pub mod catalog;
pub mod schedule;
pub mod stats;
pub mod trends;
pub mod workout;

use chrono::{DateTime, Days, Local, NaiveDate, NaiveTime, Utc};

/// UTC bounds of a local calendar day: [start of day, start of next day)
pub(crate) fn local_day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
  (local_midnight(date), local_midnight(date + Days::new(1)))
}

fn local_midnight(date: NaiveDate) -> DateTime<Utc> {
  let midnight = date.and_time(NaiveTime::MIN);
  midnight
    .and_local_timezone(Local)
    .earliest()
    .map(|dt| dt.with_timezone(&Utc))
    // DST gap at midnight: fall back to the UTC reading of the same instant
    .unwrap_or_else(|| midnight.and_utc())
}
