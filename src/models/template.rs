use serde::{Deserialize, Serialize};

/// A reusable plan for one training day
///
/// `day_of_week` uses the domain convention (1 = Monday .. 7 = Sunday).
/// Templates with no fixed day carry `None` and are only reachable through
/// the cyclic pass-number fallback.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProgramTemplate {
  pub id: i64,
  pub user_id: i64,
  pub gym_id: i64,
  pub name: String,
  pub day_of_week: Option<i64>,
}

/// One planned exercise inside a template, strictly ordered by `order_index`
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProgramTemplateExercise {
  pub id: i64,
  pub template_id: i64,
  pub exercise_id: i64,
  pub target_sets: i64,
  /// Free-text rep target, e.g. "8-12" or "10"
  pub target_reps: String,
  pub target_weight: Option<f64>,
  /// JSON array of equipment names, stored denormalized
  pub required_equipment_json: Option<String>,
  pub order_index: i64,
}

impl ProgramTemplateExercise {
  /// Equipment names required for this exercise
  ///
  /// Malformed or absent JSON degrades to an empty list.
  pub fn required_equipment(&self) -> Vec<String> {
    self
      .required_equipment_json
      .as_deref()
      .and_then(|json| serde_json::from_str(json).ok())
      .unwrap_or_default()
  }
}

/// A template joined with its ordered exercises
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateWithExercises {
  pub template: ProgramTemplate,
  pub exercises: Vec<ProgramTemplateExercise>,
}

impl TemplateWithExercises {
  /// Distinct equipment needed across the whole session, in plan order
  pub fn required_equipment(&self) -> Vec<String> {
    let mut equipment: Vec<String> = Vec::new();
    for exercise in &self.exercises {
      for name in exercise.required_equipment() {
        if !equipment.contains(&name) {
          equipment.push(name);
        }
      }
    }
    equipment
  }
}
