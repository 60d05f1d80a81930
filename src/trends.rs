//! Health metric trends
//!
//! Windowed direction and change analysis for a single metric series, plus
//! the rolling 7-day activity summary. Snapshots come in pre-filtered by
//! user (and metric type for trends); `now` is passed explicitly so the
//! computations stay deterministic.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::models::{HealthMetric, MetricType};

/// Symmetric percent band around zero treated as no meaningful change
///
/// A half-window average moving less than this in either direction reports
/// `Stable` rather than a direction.
pub const STABLE_BAND_PCT: f64 = 1.0;

/// ---------------------------------------------------------------------------
/// Trend Direction
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
  Increasing,
  Decreasing,
  Stable,
}

impl TrendDirection {
  fn from_change_percent(change: f64) -> Self {
    if change > STABLE_BAND_PCT {
      Self::Increasing
    } else if change < -STABLE_BAND_PCT {
      Self::Decreasing
    } else {
      Self::Stable
    }
  }
}

/// ---------------------------------------------------------------------------
/// Health Trend Calculator
/// ---------------------------------------------------------------------------

/// Trend of one metric over an N-day window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthTrend {
  pub metric_type: MetricType,
  /// Most recent value in the window, 0 when the window is empty
  pub current: f64,
  /// Mean of all values in the window, 0 when empty
  pub average: f64,
  /// Percent change between the two contiguous half-windows, 0 when the
  /// prior half has no data
  pub change_percent: f64,
  pub direction: TrendDirection,
}

impl HealthTrend {
  /// Compute the trend for `metric_type` over the last `window_days` days
  ///
  /// `records` must already be filtered to the user and metric type. The
  /// window splits into two contiguous halves; the recent half is compared
  /// against the prior half for direction.
  pub fn compute(
    metric_type: MetricType,
    records: &[HealthMetric],
    window_days: i64,
    now: DateTime<Utc>,
  ) -> Self {
    let window_start = now - Duration::days(window_days);
    let half_start = now - Duration::days(window_days / 2);

    let in_window: Vec<&HealthMetric> = records
      .iter()
      .filter(|m| m.recorded_at >= window_start && m.recorded_at <= now)
      .collect();

    let current = in_window
      .iter()
      .max_by_key(|m| m.recorded_at)
      .map(|m| m.value)
      .unwrap_or(0.0);

    let average = mean(in_window.iter().map(|m| m.value));

    let recent_half: Vec<f64> = in_window
      .iter()
      .filter(|m| m.recorded_at >= half_start)
      .map(|m| m.value)
      .collect();
    let prior_half: Vec<f64> = in_window
      .iter()
      .filter(|m| m.recorded_at < half_start)
      .map(|m| m.value)
      .collect();

    let prior_avg = mean(prior_half.iter().copied());
    let change_percent = if prior_half.is_empty() || prior_avg == 0.0 {
      0.0
    } else {
      (mean(recent_half.iter().copied()) - prior_avg) / prior_avg * 100.0
    };

    Self {
      metric_type,
      current,
      average,
      change_percent,
      direction: TrendDirection::from_change_percent(change_percent),
    }
  }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
  let collected: Vec<f64> = values.collect();
  if collected.is_empty() {
    0.0
  } else {
    collected.iter().sum::<f64>() / collected.len() as f64
  }
}

/// ---------------------------------------------------------------------------
/// Weekly Summary
/// ---------------------------------------------------------------------------

/// Rolling 7-day activity summary across metric types
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklySummary {
  pub total_steps: f64,
  pub total_calories_burned: f64,
  /// Average sleep per record, converted from minutes to hours
  pub avg_sleep_hours: f64,
  /// Distinct days with at least one positive-value steps record
  pub active_days: i64,
}

impl WeeklySummary {
  /// Summarize the most recent 7 calendar days of a user's metrics
  ///
  /// `day_end` is the exclusive upper bound of the window and must sit on a
  /// day boundary (the start of the local tomorrow, as the service layer
  /// resolves it); the window is then exactly the 7 calendar days before it.
  pub fn compute(records: &[HealthMetric], day_end: DateTime<Utc>) -> Self {
    let week_start = day_end - Duration::days(7);

    let in_week: Vec<&HealthMetric> = records
      .iter()
      .filter(|m| m.recorded_at >= week_start && m.recorded_at < day_end)
      .collect();

    let total_steps: f64 = in_week
      .iter()
      .filter(|m| m.metric_type == MetricType::Steps)
      .map(|m| m.value)
      .sum();

    let total_calories_burned: f64 = in_week
      .iter()
      .filter(|m| m.metric_type == MetricType::CaloriesBurned)
      .map(|m| m.value)
      .sum();

    let avg_sleep_hours = mean(
      in_week
        .iter()
        .filter(|m| m.metric_type == MetricType::SleepDurationMinutes)
        .map(|m| m.value / 60.0),
    );

    // Bucket by whole-day offset from the window start so the count is
    // bounded by the window length regardless of timezone skew
    let active_offsets: HashSet<i64> = in_week
      .iter()
      .filter(|m| m.metric_type == MetricType::Steps && m.value > 0.0)
      .map(|m| (m.recorded_at - week_start).num_days())
      .collect();

    Self {
      total_steps,
      total_calories_burned,
      avg_sleep_hours,
      active_days: active_offsets.len() as i64,
    }
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
