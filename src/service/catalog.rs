use tracing::info;

use crate::db::DbPool;
use crate::error::ServiceError;
use crate::models::{Exercise, NewExercise};

/// Add an exercise to the shared catalog
pub async fn create_exercise(pool: &DbPool, new: &NewExercise) -> Result<Exercise, ServiceError> {
  let result = sqlx::query(
    r#"
    INSERT INTO exercises (name, muscle_group, difficulty, is_compound, demo_media_url)
    VALUES (?1, ?2, ?3, ?4, ?5)
    "#,
  )
  .bind(&new.name)
  .bind(&new.muscle_group)
  .bind(&new.difficulty)
  .bind(new.is_compound)
  .bind(&new.demo_media_url)
  .execute(pool)
  .await?;

  let id = result.last_insert_rowid();
  info!(exercise_id = id, name = %new.name, "exercise created");

  get_exercise(pool, id).await
}

/// Load one catalog entry by id
pub async fn get_exercise(pool: &DbPool, exercise_id: i64) -> Result<Exercise, ServiceError> {
  sqlx::query_as::<_, Exercise>(
    r#"
    SELECT id, name, muscle_group, difficulty, is_compound, demo_media_url, created_at
    FROM exercises
    WHERE id = ?1
    "#,
  )
  .bind(exercise_id)
  .fetch_optional(pool)
  .await?
  .ok_or(ServiceError::NotFound("exercise"))
}

/// List the full catalog, alphabetically
pub async fn list_exercises(pool: &DbPool) -> Result<Vec<Exercise>, ServiceError> {
  let exercises = sqlx::query_as::<_, Exercise>(
    r#"
    SELECT id, name, muscle_group, difficulty, is_compound, demo_media_url, created_at
    FROM exercises
    ORDER BY name
    "#,
  )
  .fetch_all(pool)
  .await?;

  Ok(exercises)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils;

  fn new_exercise(name: &str, muscle_group: &str) -> NewExercise {
    NewExercise {
      name: name.to_string(),
      muscle_group: muscle_group.to_string(),
      difficulty: "intermediate".to_string(),
      is_compound: true,
      demo_media_url: None,
    }
  }

  #[tokio::test]
  async fn test_create_exercise_roundtrips_fields() {
    let pool = test_utils::setup_test_db().await;

    let created = create_exercise(&pool, &new_exercise("Deadlift", "Back"))
      .await
      .expect("should create");
    assert_eq!(created.name, "Deadlift");
    assert_eq!(created.muscle_group, "Back");
    assert!(created.is_compound);

    let loaded = get_exercise(&pool, created.id).await.expect("should load");
    assert_eq!(loaded.name, "Deadlift");

    test_utils::teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_get_missing_exercise_is_not_found() {
    let pool = test_utils::setup_test_db().await;

    let result = get_exercise(&pool, 999).await;
    assert!(matches!(result, Err(ServiceError::NotFound(_))));

    test_utils::teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_list_exercises_sorted_by_name() {
    let pool = test_utils::setup_test_db().await;

    create_exercise(&pool, &new_exercise("Squat", "Legs")).await.expect("should create");
    create_exercise(&pool, &new_exercise("Bench Press", "Chest")).await.expect("should create");

    let all = list_exercises(&pool).await.expect("should list");
    let names: Vec<&str> = all.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Bench Press", "Squat"]);

    test_utils::teardown_test_db(pool).await;
  }
}
