//! Weekly schedule resolution
//!
//! Maps host-calendar weekdays into the domain convention and decides which
//! program template is "up next" for a user. Everything here is pure and
//! total; the service layer resolves "today" and hands in snapshots.

use chrono::{Datelike, NaiveDate};

use crate::models::ProgramTemplate;

/// ---------------------------------------------------------------------------
/// Calendar Mapping
/// ---------------------------------------------------------------------------

/// Convert a host calendar weekday (1 = Sunday .. 7 = Saturday) into the
/// domain weekday (1 = Monday .. 7 = Sunday)
pub fn domain_weekday(host_weekday: u32) -> u32 {
  if host_weekday == 1 {
    7
  } else {
    host_weekday - 1
  }
}

/// Domain weekday for a calendar date
pub fn weekday_for_date(date: NaiveDate) -> u32 {
  domain_weekday(date.weekday().number_from_sunday())
}

/// ---------------------------------------------------------------------------
/// Next-Session Selector
/// ---------------------------------------------------------------------------

/// Pick the template considered "next" for the user
///
/// `templates` must already be filtered to the user's active gym. Selection
/// priority, first match wins:
/// 1. A template scheduled exactly on today's domain weekday.
/// 2. The earliest template scheduled later in the current week.
/// 3. Cyclic fallback: the sorted list indexed by `(pass_number - 1) % count`,
///    or the first element when that index is out of range.
pub fn next_template<'a>(
  templates: &'a [ProgramTemplate],
  pass_number: i64,
  today_weekday: u32,
) -> Option<&'a ProgramTemplate> {
  if templates.is_empty() {
    return None;
  }

  // Sorted base ordering: day_of_week ascending (unscheduled sorts as 0),
  // then name ascending, case-sensitive.
  let mut sorted: Vec<&ProgramTemplate> = templates.iter().collect();
  sorted.sort_by(|a, b| {
    let day_a = a.day_of_week.unwrap_or(0);
    let day_b = b.day_of_week.unwrap_or(0);
    day_a.cmp(&day_b).then_with(|| a.name.cmp(&b.name))
  });

  let today = i64::from(today_weekday);

  // Priority 1: scheduled for today
  if let Some(t) = sorted.iter().find(|t| t.day_of_week == Some(today)) {
    return Some(t);
  }

  // Priority 2: earliest template later this week
  if let Some(t) = sorted
    .iter()
    .filter(|t| t.day_of_week.is_some_and(|d| d > today))
    .min_by_key(|t| t.day_of_week)
  {
    return Some(t);
  }

  // Priority 3: cyclic fallback via pass number
  let count = sorted.len() as i64;
  let index = (pass_number - 1) % count;
  if (0..count).contains(&index) {
    Some(sorted[index as usize])
  } else {
    Some(sorted[0])
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
