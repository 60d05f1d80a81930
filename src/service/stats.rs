use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::db::DbPool;
use crate::error::ServiceError;
use crate::service::schedule::load_profile;
use crate::stats::{
  weight_progression, ExerciseStats, LoggedSet, MuscleBalance, PlannedSets, WeightPoint,
};

/// ---------------------------------------------------------------------------
/// Exercise Statistics
/// ---------------------------------------------------------------------------

/// Aggregate statistics for one exercise, optionally over the last N days
pub async fn exercise_stats(
  pool: &DbPool,
  user_id: i64,
  exercise_id: i64,
  window_days: Option<i64>,
) -> Result<ExerciseStats, ServiceError> {
  let sets = load_completed_sets(pool, user_id, exercise_id).await?;
  debug!(user_id, exercise_id, sets = sets.len(), "aggregating exercise stats");
  Ok(ExerciseStats::compute(&sets, window_cutoff(window_days)))
}

/// Weight-over-time series for one exercise, ascending by date
pub async fn exercise_weight_progression(
  pool: &DbPool,
  user_id: i64,
  exercise_id: i64,
  window_days: Option<i64>,
) -> Result<Vec<WeightPoint>, ServiceError> {
  let sets = load_completed_sets(pool, user_id, exercise_id).await?;
  Ok(weight_progression(&sets, window_cutoff(window_days)))
}

fn window_cutoff(window_days: Option<i64>) -> Option<DateTime<Utc>> {
  window_days.map(|days| Utc::now() - Duration::days(days))
}

/// Completed sets for (user, exercise), joined to session timestamps
async fn load_completed_sets(
  pool: &DbPool,
  user_id: i64,
  exercise_id: i64,
) -> Result<Vec<LoggedSet>, ServiceError> {
  let rows: Vec<(i64, DateTime<Utc>, Option<i64>, Option<f64>)> = sqlx::query_as(
    r#"
    SELECT l.session_id, s.started_at, l.reps, l.weight
    FROM exercise_logs l
    JOIN workout_sessions s ON s.id = l.session_id
    WHERE s.user_id = ?1 AND l.exercise_id = ?2 AND l.completed = 1
    ORDER BY s.started_at, l.id
    "#,
  )
  .bind(user_id)
  .bind(exercise_id)
  .fetch_all(pool)
  .await?;

  Ok(
    rows
      .into_iter()
      .map(|(session_id, performed_at, reps, weight)| LoggedSet {
        session_id,
        performed_at,
        reps,
        weight,
      })
      .collect(),
  )
}

/// ---------------------------------------------------------------------------
/// Muscle Balance
/// ---------------------------------------------------------------------------

/// Planned-set distribution across muscle groups for the user's active gym
pub async fn muscle_balance(pool: &DbPool, user_id: i64) -> Result<MuscleBalance, ServiceError> {
  let profile = load_profile(pool, user_id).await?;

  let rows: Vec<(String, i64)> = sqlx::query_as(
    r#"
    SELECT e.muscle_group, pte.target_sets
    FROM program_template_exercises pte
    JOIN program_templates t ON t.id = pte.template_id
    JOIN exercises e ON e.id = pte.exercise_id
    WHERE t.user_id = ?1 AND t.gym_id = ?2
    "#,
  )
  .bind(user_id)
  .bind(profile.gym_id)
  .fetch_all(pool)
  .await?;

  let planned: Vec<PlannedSets> = rows
    .into_iter()
    .map(|(muscle_group, target_sets)| PlannedSets {
      muscle_group,
      target_sets,
    })
    .collect();

  Ok(MuscleBalance::compute(&planned))
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
