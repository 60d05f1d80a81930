//! Live workout progress
//!
//! Computes how far through today's planned session the user is, as the
//! ratio of logged completed reps to planned reps. The ratio is deliberately
//! unclamped: extra sets push it past 1.0 and render as over-achievement.

use chrono::{DateTime, Utc};

use crate::models::{ExerciseLog, ProgramTemplateExercise, WorkoutSession};

/// ---------------------------------------------------------------------------
/// Reps Parser
/// ---------------------------------------------------------------------------

/// Fallback when a rep target cannot be parsed
pub const DEFAULT_TARGET_REPS: i64 = 10;

/// Parse a free-text rep target into a representative integer
///
/// "8-12" averages the range (truncating), "10" parses directly, anything
/// else degrades to [`DEFAULT_TARGET_REPS`]. Malformed input is not an error.
pub fn parse_target_reps(spec: &str) -> i64 {
  let trimmed = spec.trim();

  if let Some((low, high)) = trimmed.split_once('-') {
    if let (Ok(low), Ok(high)) = (low.trim().parse::<i64>(), high.trim().parse::<i64>()) {
      return (low + high) / 2;
    }
  }

  trimmed.parse().unwrap_or(DEFAULT_TARGET_REPS)
}

/// Total planned reps across a template's exercises
pub fn planned_reps(exercises: &[ProgramTemplateExercise]) -> i64 {
  exercises
    .iter()
    .map(|e| e.target_sets * parse_target_reps(&e.target_reps))
    .sum()
}

/// ---------------------------------------------------------------------------
/// Workout Progress Calculator
/// ---------------------------------------------------------------------------

/// Completion ratio for today's session against a template
///
/// Returns `None` when the template has no planned reps (no numeric meaning),
/// `Some(0.0)` when planning exists but no session has started today, and the
/// unclamped ratio otherwise. `day_start`/`day_end` bound "today" in the
/// user's local time zone; the first matching session in iteration order wins
/// when duplicates exist.
pub fn workout_progress(
  template_id: i64,
  exercises: &[ProgramTemplateExercise],
  sessions: &[WorkoutSession],
  logs: &[ExerciseLog],
  day_start: DateTime<Utc>,
  day_end: DateTime<Utc>,
) -> Option<f64> {
  let total_planned = planned_reps(exercises);
  if total_planned == 0 {
    return None;
  }

  let todays_session = sessions.iter().find(|s| {
    s.template_id == Some(template_id)
      && s.counts_for_progress()
      && s.started_at >= day_start
      && s.started_at < day_end
  });

  let session = match todays_session {
    Some(s) => s,
    None => return Some(0.0),
  };

  let completed_reps: i64 = logs
    .iter()
    .filter(|l| l.session_id == session.id && l.completed)
    .filter_map(|l| l.reps)
    .sum();

  Some(completed_reps as f64 / total_planned as f64)
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
