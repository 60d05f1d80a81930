use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Catalog entry describing a single exercise
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Exercise {
  pub id: i64,
  pub name: String,
  pub muscle_group: String,
  pub difficulty: String,
  pub is_compound: bool,
  pub demo_media_url: Option<String>,
  pub created_at: Option<DateTime<Utc>>,
}

/// For inserting new catalog entries (without id, created_at)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExercise {
  pub name: String,
  pub muscle_group: String,
  pub difficulty: String,
  pub is_compound: bool,
  pub demo_media_url: Option<String>,
}
