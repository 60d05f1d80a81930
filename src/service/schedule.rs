use chrono::Local;
use tracing::debug;

use crate::db::DbPool;
use crate::error::ServiceError;
use crate::models::{ProgramTemplate, ProgramTemplateExercise, TemplateWithExercises, UserProfile};
use crate::schedule::{next_template, weekday_for_date};

/// Load the user's scheduling profile
pub async fn load_profile(pool: &DbPool, user_id: i64) -> Result<UserProfile, ServiceError> {
  sqlx::query_as::<_, UserProfile>(
    "SELECT user_id, gym_id, current_pass_number FROM user_profiles WHERE user_id = ?1",
  )
  .bind(user_id)
  .fetch_optional(pool)
  .await?
  .ok_or(ServiceError::NotFound("user profile"))
}

/// Load the user's templates at one gym
pub async fn load_templates(
  pool: &DbPool,
  user_id: i64,
  gym_id: i64,
) -> Result<Vec<ProgramTemplate>, ServiceError> {
  let templates = sqlx::query_as::<_, ProgramTemplate>(
    r#"
    SELECT id, user_id, gym_id, name, day_of_week
    FROM program_templates
    WHERE user_id = ?1 AND gym_id = ?2
    ORDER BY id
    "#,
  )
  .bind(user_id)
  .bind(gym_id)
  .fetch_all(pool)
  .await?;

  Ok(templates)
}

/// Load a template's exercises in plan order
pub async fn load_template_exercises(
  pool: &DbPool,
  template_id: i64,
) -> Result<Vec<ProgramTemplateExercise>, ServiceError> {
  let exercises = sqlx::query_as::<_, ProgramTemplateExercise>(
    r#"
    SELECT id, template_id, exercise_id, target_sets, target_reps,
           target_weight, required_equipment_json, order_index
    FROM program_template_exercises
    WHERE template_id = ?1
    ORDER BY order_index
    "#,
  )
  .bind(template_id)
  .fetch_all(pool)
  .await?;

  Ok(exercises)
}

/// Resolve which template is "up next" for the user
///
/// Filters templates to the user's active gym, resolves today in local time,
/// and runs the selector. Returns `None` when the user has no templates.
pub async fn next_session(
  pool: &DbPool,
  user_id: i64,
) -> Result<Option<TemplateWithExercises>, ServiceError> {
  let profile = load_profile(pool, user_id).await?;
  let templates = load_templates(pool, user_id, profile.gym_id).await?;

  let today = weekday_for_date(Local::now().date_naive());
  debug!(user_id, today, templates = templates.len(), "selecting next session");

  let selected = match next_template(&templates, profile.current_pass_number, today) {
    Some(t) => t.clone(),
    None => return Ok(None),
  };

  let exercises = load_template_exercises(pool, selected.id).await?;
  Ok(Some(TemplateWithExercises {
    template: selected,
    exercises,
  }))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils;

  #[tokio::test]
  async fn test_next_session_without_profile_is_not_found() {
    let pool = test_utils::setup_test_db().await;

    let result = next_session(&pool, 999).await;
    assert!(matches!(result, Err(ServiceError::NotFound(_))));

    test_utils::teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_next_session_with_no_templates() {
    let pool = test_utils::setup_test_db().await;
    test_utils::seed_profile(&pool, 1, 1, 1).await;

    let next = next_session(&pool, 1).await.expect("query should succeed");
    assert!(next.is_none());

    test_utils::teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_next_session_ignores_other_gyms() {
    let pool = test_utils::setup_test_db().await;
    test_utils::seed_profile(&pool, 1, 1, 1).await;

    // Only template belongs to a different gym
    test_utils::seed_template(&pool, 1, 2, "Push", None).await;

    let next = next_session(&pool, 1).await.expect("query should succeed");
    assert!(next.is_none());

    test_utils::teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_next_session_returns_template_with_exercises() {
    let pool = test_utils::setup_test_db().await;
    test_utils::seed_profile(&pool, 1, 1, 1).await;

    let exercise_id = test_utils::seed_exercise(&pool, "Bench Press", "Chest").await;
    let template_id = test_utils::seed_template(&pool, 1, 1, "Push", None).await;
    test_utils::seed_template_exercise(&pool, template_id, exercise_id, 3, "8-12", 0).await;

    let next = next_session(&pool, 1)
      .await
      .expect("query should succeed")
      .expect("should select the only template");

    assert_eq!(next.template.id, template_id);
    assert_eq!(next.exercises.len(), 1);
    assert_eq!(next.exercises[0].target_reps, "8-12");

    test_utils::teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_next_session_surfaces_required_equipment() {
    let pool = test_utils::setup_test_db().await;
    test_utils::seed_profile(&pool, 1, 1, 1).await;

    let bench = test_utils::seed_exercise(&pool, "Bench Press", "Chest").await;
    let fly = test_utils::seed_exercise(&pool, "Dumbbell Fly", "Chest").await;
    let template_id = test_utils::seed_template(&pool, 1, 1, "Push", None).await;
    let row_a = test_utils::seed_template_exercise(&pool, template_id, bench, 3, "8-12", 0).await;
    let row_b = test_utils::seed_template_exercise(&pool, template_id, fly, 3, "10", 1).await;

    sqlx::query("UPDATE program_template_exercises SET required_equipment_json = ?1 WHERE id = ?2")
      .bind(r#"["barbell","bench"]"#)
      .bind(row_a)
      .execute(&pool)
      .await
      .expect("should set equipment");
    sqlx::query("UPDATE program_template_exercises SET required_equipment_json = ?1 WHERE id = ?2")
      .bind(r#"["dumbbells","bench"]"#)
      .bind(row_b)
      .execute(&pool)
      .await
      .expect("should set equipment");

    let next = next_session(&pool, 1)
      .await
      .expect("query should succeed")
      .expect("should select the only template");

    assert_eq!(next.required_equipment(), vec!["barbell", "bench", "dumbbells"]);

    test_utils::teardown_test_db(pool).await;
  }
}
