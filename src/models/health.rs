use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// ---------------------------------------------------------------------------
/// Metric Type
/// ---------------------------------------------------------------------------

/// Closed set of tracked health metric kinds
///
/// Stored as snake_case text; parsing an unknown key is an error rather than
/// a silent passthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricType {
  Steps,
  CaloriesBurned,
  SleepDurationMinutes,
  BodyWeightKg,
  RestingHeartRate,
}

impl MetricType {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Steps => "steps",
      Self::CaloriesBurned => "calories_burned",
      Self::SleepDurationMinutes => "sleep_duration_minutes",
      Self::BodyWeightKg => "body_weight_kg",
      Self::RestingHeartRate => "resting_heart_rate",
    }
  }
}

impl std::fmt::Display for MetricType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl std::str::FromStr for MetricType {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "steps" => Ok(Self::Steps),
      "calories_burned" => Ok(Self::CaloriesBurned),
      "sleep_duration_minutes" => Ok(Self::SleepDurationMinutes),
      "body_weight_kg" => Ok(Self::BodyWeightKg),
      "resting_heart_rate" => Ok(Self::RestingHeartRate),
      _ => Err(format!("Unknown metric type: {}", s)),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Health Metric
/// ---------------------------------------------------------------------------

/// One timestamped health measurement, append-only
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthMetric {
  pub id: i64,
  pub user_id: i64,
  pub metric_type: MetricType,
  pub value: f64,
  pub recorded_at: DateTime<Utc>,
}

/// For inserting new metrics (without id)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewHealthMetric {
  pub user_id: i64,
  pub metric_type: MetricType,
  pub value: f64,
  pub recorded_at: DateTime<Utc>,
}
