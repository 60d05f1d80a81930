use chrono::{DateTime, Local, Utc};
use sqlx::Row;
use tracing::{debug, info};

use crate::db::DbPool;
use crate::error::ServiceError;
use crate::models::{ExerciseLog, NewExerciseLog, SessionStatus, WorkoutSession};
use crate::progress::workout_progress;
use crate::service::local_day_bounds;
use crate::service::schedule::load_template_exercises;

/// ---------------------------------------------------------------------------
/// Session Lifecycle
/// ---------------------------------------------------------------------------

/// Create a new active session for the user
///
/// `template_id` is `None` for ad hoc training. This is the single write the
/// engine performs adjacent to its read-only core.
pub async fn start_session(
  pool: &DbPool,
  user_id: i64,
  template_id: Option<i64>,
) -> Result<WorkoutSession, ServiceError> {
  let started_at = Utc::now();

  let result = sqlx::query(
    r#"
    INSERT INTO workout_sessions (user_id, template_id, status, started_at)
    VALUES (?1, ?2, ?3, ?4)
    "#,
  )
  .bind(user_id)
  .bind(template_id)
  .bind(SessionStatus::Active.to_string())
  .bind(started_at)
  .execute(pool)
  .await?;

  let id = result.last_insert_rowid();
  info!(user_id, session_id = id, "session started");

  Ok(WorkoutSession {
    id,
    user_id,
    template_id,
    status: SessionStatus::Active,
    started_at,
    completed_at: None,
  })
}

/// Mark an active session completed, setting `completed_at`
pub async fn complete_session(pool: &DbPool, session_id: i64) -> Result<(), ServiceError> {
  transition_session(pool, session_id, SessionStatus::Completed).await
}

/// Cancel an active session; `completed_at` stays unset
pub async fn cancel_session(pool: &DbPool, session_id: i64) -> Result<(), ServiceError> {
  transition_session(pool, session_id, SessionStatus::Cancelled).await
}

async fn transition_session(
  pool: &DbPool,
  session_id: i64,
  to: SessionStatus,
) -> Result<(), ServiceError> {
  let session = load_session(pool, session_id).await?;

  // A session leaves Active exactly once and is immutable after that
  if session.status != SessionStatus::Active {
    return Err(ServiceError::InvalidTransition {
      session_id,
      status: session.status.to_string(),
    });
  }

  let completed_at = match to {
    SessionStatus::Completed => Some(Utc::now()),
    _ => None,
  };

  sqlx::query("UPDATE workout_sessions SET status = ?1, completed_at = ?2 WHERE id = ?3")
    .bind(to.to_string())
    .bind(completed_at)
    .bind(session_id)
    .execute(pool)
    .await?;

  info!(session_id, status = %to, "session transitioned");
  Ok(())
}

/// Append a logged set to an active session
pub async fn log_set(pool: &DbPool, log: &NewExerciseLog) -> Result<ExerciseLog, ServiceError> {
  let session = load_session(pool, log.session_id).await?;

  if session.status != SessionStatus::Active {
    return Err(ServiceError::InvalidTransition {
      session_id: log.session_id,
      status: session.status.to_string(),
    });
  }

  let logged_at = Utc::now();
  let result = sqlx::query(
    r#"
    INSERT INTO exercise_logs (session_id, exercise_id, completed, reps, weight, logged_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
    "#,
  )
  .bind(log.session_id)
  .bind(log.exercise_id)
  .bind(log.completed)
  .bind(log.reps)
  .bind(log.weight)
  .bind(logged_at)
  .execute(pool)
  .await?;

  Ok(ExerciseLog {
    id: result.last_insert_rowid(),
    session_id: log.session_id,
    exercise_id: log.exercise_id,
    completed: log.completed,
    reps: log.reps,
    weight: log.weight,
    logged_at,
  })
}

/// ---------------------------------------------------------------------------
/// Today's Progress
/// ---------------------------------------------------------------------------

/// Completion ratio for today's session against a template
///
/// `None` means the template plans no reps; `Some(0.0)` means no session has
/// started today. The ratio is unclamped.
pub async fn today_progress(
  pool: &DbPool,
  user_id: i64,
  template_id: i64,
) -> Result<Option<f64>, ServiceError> {
  let exercises = load_template_exercises(pool, template_id).await?;

  let (day_start, day_end) = local_day_bounds(Local::now().date_naive());
  let sessions = load_sessions_between(pool, user_id, day_start, day_end).await?;
  let logs = load_logs_for_day(pool, user_id, day_start, day_end).await?;

  debug!(
    user_id,
    template_id,
    sessions = sessions.len(),
    logs = logs.len(),
    "computing today's progress"
  );

  Ok(workout_progress(
    template_id,
    &exercises,
    &sessions,
    &logs,
    day_start,
    day_end,
  ))
}

/// ---------------------------------------------------------------------------
/// Row Loading
/// ---------------------------------------------------------------------------

pub async fn load_session(pool: &DbPool, session_id: i64) -> Result<WorkoutSession, ServiceError> {
  let row = sqlx::query(
    r#"
    SELECT id, user_id, template_id, status, started_at, completed_at
    FROM workout_sessions
    WHERE id = ?1
    "#,
  )
  .bind(session_id)
  .fetch_optional(pool)
  .await?
  .ok_or(ServiceError::NotFound("workout session"))?;

  session_from_row(&row)
}

async fn load_sessions_between(
  pool: &DbPool,
  user_id: i64,
  start: DateTime<Utc>,
  end: DateTime<Utc>,
) -> Result<Vec<WorkoutSession>, ServiceError> {
  let rows = sqlx::query(
    r#"
    SELECT id, user_id, template_id, status, started_at, completed_at
    FROM workout_sessions
    WHERE user_id = ?1 AND started_at >= ?2 AND started_at < ?3
    ORDER BY started_at, id
    "#,
  )
  .bind(user_id)
  .bind(start)
  .bind(end)
  .fetch_all(pool)
  .await?;

  rows.iter().map(session_from_row).collect()
}

async fn load_logs_for_day(
  pool: &DbPool,
  user_id: i64,
  start: DateTime<Utc>,
  end: DateTime<Utc>,
) -> Result<Vec<ExerciseLog>, ServiceError> {
  let logs = sqlx::query_as::<_, ExerciseLog>(
    r#"
    SELECT l.id, l.session_id, l.exercise_id, l.completed, l.reps, l.weight, l.logged_at
    FROM exercise_logs l
    JOIN workout_sessions s ON s.id = l.session_id
    WHERE s.user_id = ?1 AND s.started_at >= ?2 AND s.started_at < ?3
    ORDER BY l.id
    "#,
  )
  .bind(user_id)
  .bind(start)
  .bind(end)
  .fetch_all(pool)
  .await?;

  Ok(logs)
}

fn session_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<WorkoutSession, ServiceError> {
  let status_str: String = row.get("status");
  let status = status_str.parse::<SessionStatus>().map_err(ServiceError::InvalidData)?;

  Ok(WorkoutSession {
    id: row.get("id"),
    user_id: row.get("user_id"),
    template_id: row.get("template_id"),
    status,
    started_at: row.get("started_at"),
    completed_at: row.get("completed_at"),
  })
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
