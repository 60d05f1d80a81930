use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// ---------------------------------------------------------------------------
/// Session Status
/// ---------------------------------------------------------------------------

/// Lifecycle status of a workout session
///
/// A session is created `Active` and transitions exactly once to either
/// `Completed` or `Cancelled`; it is immutable after that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
  Active,
  Completed,
  Cancelled,
}

impl std::fmt::Display for SessionStatus {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Active => write!(f, "active"),
      Self::Completed => write!(f, "completed"),
      Self::Cancelled => write!(f, "cancelled"),
    }
  }
}

impl std::str::FromStr for SessionStatus {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "active" => Ok(Self::Active),
      "completed" => Ok(Self::Completed),
      "cancelled" => Ok(Self::Cancelled),
      _ => Err(format!("Unknown session status: {}", s)),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Workout Session
/// ---------------------------------------------------------------------------

/// One concrete occurrence of performing a template (or ad hoc training)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutSession {
  pub id: i64,
  pub user_id: i64,
  /// None for ad hoc sessions not started from a template
  pub template_id: Option<i64>,
  pub status: SessionStatus,
  pub started_at: DateTime<Utc>,
  /// Set only when the session transitions to completed
  pub completed_at: Option<DateTime<Utc>>,
}

impl WorkoutSession {
  /// Whether the session still counts toward today's progress
  pub fn counts_for_progress(&self) -> bool {
    matches!(self.status, SessionStatus::Active | SessionStatus::Completed)
  }
}

/// ---------------------------------------------------------------------------
/// Exercise Log
/// ---------------------------------------------------------------------------

/// One recorded set within a session, appended as the user logs
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ExerciseLog {
  pub id: i64,
  pub session_id: i64,
  pub exercise_id: i64,
  pub completed: bool,
  pub reps: Option<i64>,
  pub weight: Option<f64>,
  pub logged_at: DateTime<Utc>,
}

/// For inserting new logs (without id)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExerciseLog {
  pub session_id: i64,
  pub exercise_id: i64,
  pub completed: bool,
  pub reps: Option<i64>,
  pub weight: Option<f64>,
}
