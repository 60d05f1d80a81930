//! Test utilities and helpers for integration and unit testing
//!
//! Database setup/teardown, seed helpers, and mock data factories shared by
//! the store-backed tests.

use chrono::{DateTime, Duration, Utc};
use sqlx::SqlitePool;

use crate::models::{MetricType, ProgramTemplate, ProgramTemplateExercise};

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// Close a test database pool
pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

/// ---------------------------------------------------------------------------
/// Seed Helpers
/// ---------------------------------------------------------------------------

pub async fn seed_profile(pool: &SqlitePool, user_id: i64, gym_id: i64, pass_number: i64) {
  sqlx::query(
    r#"
    INSERT INTO user_profiles (user_id, gym_id, current_pass_number)
    VALUES (?1, ?2, ?3)
    ON CONFLICT(user_id) DO UPDATE SET
      gym_id = excluded.gym_id,
      current_pass_number = excluded.current_pass_number
    "#,
  )
  .bind(user_id)
  .bind(gym_id)
  .bind(pass_number)
  .execute(pool)
  .await
  .expect("Failed to seed profile");
}

pub async fn seed_exercise(pool: &SqlitePool, name: &str, muscle_group: &str) -> i64 {
  sqlx::query(
    r#"
    INSERT INTO exercises (name, muscle_group, difficulty, is_compound)
    VALUES (?1, ?2, 'intermediate', 1)
    "#,
  )
  .bind(name)
  .bind(muscle_group)
  .execute(pool)
  .await
  .expect("Failed to seed exercise")
  .last_insert_rowid()
}

pub async fn seed_template(
  pool: &SqlitePool,
  user_id: i64,
  gym_id: i64,
  name: &str,
  day_of_week: Option<i64>,
) -> i64 {
  sqlx::query(
    r#"
    INSERT INTO program_templates (user_id, gym_id, name, day_of_week)
    VALUES (?1, ?2, ?3, ?4)
    "#,
  )
  .bind(user_id)
  .bind(gym_id)
  .bind(name)
  .bind(day_of_week)
  .execute(pool)
  .await
  .expect("Failed to seed template")
  .last_insert_rowid()
}

pub async fn seed_template_exercise(
  pool: &SqlitePool,
  template_id: i64,
  exercise_id: i64,
  target_sets: i64,
  target_reps: &str,
  order_index: i64,
) -> i64 {
  sqlx::query(
    r#"
    INSERT INTO program_template_exercises
      (template_id, exercise_id, target_sets, target_reps, order_index)
    VALUES (?1, ?2, ?3, ?4, ?5)
    "#,
  )
  .bind(template_id)
  .bind(exercise_id)
  .bind(target_sets)
  .bind(target_reps)
  .bind(order_index)
  .execute(pool)
  .await
  .expect("Failed to seed template exercise")
  .last_insert_rowid()
}

pub async fn seed_metric(
  pool: &SqlitePool,
  user_id: i64,
  metric_type: MetricType,
  value: f64,
  days_ago: i64,
) -> i64 {
  sqlx::query(
    r#"
    INSERT INTO health_metrics (user_id, metric_type, value, recorded_at)
    VALUES (?1, ?2, ?3, ?4)
    "#,
  )
  .bind(user_id)
  .bind(metric_type.as_str())
  .bind(value)
  .bind(datetime_days_ago(days_ago))
  .execute(pool)
  .await
  .expect("Failed to seed metric")
  .last_insert_rowid()
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

pub fn mock_template(id: i64, name: &str, day_of_week: Option<i64>) -> ProgramTemplate {
  ProgramTemplate {
    id,
    user_id: 1,
    gym_id: 1,
    name: name.to_string(),
    day_of_week,
  }
}

pub fn mock_planned_exercise(target_sets: i64, target_reps: &str) -> ProgramTemplateExercise {
  ProgramTemplateExercise {
    id: 1,
    template_id: 1,
    exercise_id: 1,
    target_sets,
    target_reps: target_reps.to_string(),
    target_weight: None,
    required_equipment_json: None,
    order_index: 0,
  }
}

/// ---------------------------------------------------------------------------
/// Time Helpers
/// ---------------------------------------------------------------------------

/// Create a DateTime N days ago from now
pub fn datetime_days_ago(days: i64) -> DateTime<Utc> {
  Utc::now() - Duration::days(days)
}

/// ---------------------------------------------------------------------------
/// Test Macros
/// ---------------------------------------------------------------------------

/// Assert two floats are approximately equal within a tolerance
#[macro_export]
macro_rules! assert_approx_eq {
  ($left:expr, $right:expr, $tolerance:expr) => {
    let diff = ($left - $right).abs();
    assert!(
      diff < $tolerance,
      "Values not approximately equal: {} vs {} (diff: {}, tolerance: {})",
      $left,
      $right,
      diff,
      $tolerance
    );
  };
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_setup_db_creates_schema() {
    let pool = setup_test_db().await;

    let tables: Vec<(String,)> = sqlx::query_as(
      "SELECT name FROM sqlite_master WHERE type='table' AND name IN \
       ('program_templates', 'workout_sessions', 'exercise_logs', 'health_metrics')",
    )
    .fetch_all(&pool)
    .await
    .expect("Failed to query tables");

    assert_eq!(tables.len(), 4, "Expected 4 tables, got {}", tables.len());

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_seed_helpers_insert_rows() {
    let pool = setup_test_db().await;

    seed_profile(&pool, 1, 1, 3).await;
    let exercise_id = seed_exercise(&pool, "Bench Press", "Chest").await;
    let template_id = seed_template(&pool, 1, 1, "Push", Some(1)).await;
    seed_template_exercise(&pool, template_id, exercise_id, 3, "8-12", 0).await;
    seed_metric(&pool, 1, MetricType::Steps, 8000.0, 1).await;

    let planned: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM program_template_exercises")
      .fetch_one(&pool)
      .await
      .expect("Failed to count");
    assert_eq!(planned, 1);

    teardown_test_db(pool).await;
  }

  #[test]
  fn test_mock_factories_create_valid_data() {
    let template = mock_template(1, "Push", Some(2));
    assert_eq!(template.day_of_week, Some(2));

    let planned = mock_planned_exercise(3, "8-12");
    assert_eq!(planned.target_sets, 3);
  }

  #[test]
  fn test_datetime_helper_produces_past_dates() {
    let past = datetime_days_ago(7);
    let diff = Utc::now() - past;
    assert!(diff.num_days() >= 6 && diff.num_days() <= 8);
  }
}
