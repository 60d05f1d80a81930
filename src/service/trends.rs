use chrono::{DateTime, Duration, Local, Utc};
use tracing::debug;

use crate::db::DbPool;
use crate::error::ServiceError;
use crate::models::{HealthMetric, MetricType};
use crate::service::local_day_bounds;
use crate::trends::{HealthTrend, WeeklySummary};

/// Trend for one metric over the last `window_days` days
pub async fn health_trend(
  pool: &DbPool,
  user_id: i64,
  metric_type: MetricType,
  window_days: i64,
) -> Result<HealthTrend, ServiceError> {
  let now = Utc::now();
  let records = load_metrics(pool, user_id, Some(metric_type), now - Duration::days(window_days)).await?;

  debug!(user_id, metric = %metric_type, records = records.len(), "computing health trend");
  Ok(HealthTrend::compute(metric_type, &records, window_days, now))
}

/// Activity summary over the most recent 7 local calendar days
///
/// The window runs from the start of the local day six days ago through the
/// end of the local today, so records never spill in from an eighth date.
pub async fn weekly_summary(pool: &DbPool, user_id: i64) -> Result<WeeklySummary, ServiceError> {
  let today = Local::now().date_naive();
  let (_, day_end) = local_day_bounds(today);
  let week_start = day_end - Duration::days(7);

  let records = load_metrics(pool, user_id, None, week_start).await?;
  Ok(WeeklySummary::compute(&records, day_end))
}

/// Load a user's metrics since a cutoff, optionally for one type
///
/// Rows with a metric type outside the closed enum are skipped rather than
/// failing the whole query.
async fn load_metrics(
  pool: &DbPool,
  user_id: i64,
  metric_type: Option<MetricType>,
  since: DateTime<Utc>,
) -> Result<Vec<HealthMetric>, ServiceError> {
  let rows: Vec<(i64, String, f64, DateTime<Utc>)> = sqlx::query_as(
    r#"
    SELECT id, metric_type, value, recorded_at
    FROM health_metrics
    WHERE user_id = ?1
      AND recorded_at >= ?2
      AND (?3 IS NULL OR metric_type = ?3)
    ORDER BY recorded_at, id
    "#,
  )
  .bind(user_id)
  .bind(since)
  .bind(metric_type.map(|m| m.as_str()))
  .fetch_all(pool)
  .await?;

  Ok(
    rows
      .into_iter()
      .filter_map(|(id, type_str, value, recorded_at)| {
        type_str.parse::<MetricType>().ok().map(|metric_type| HealthMetric {
          id,
          user_id,
          metric_type,
          value,
          recorded_at,
        })
      })
      .collect(),
  )
}
