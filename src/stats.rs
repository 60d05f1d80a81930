//! Historical performance aggregation
//!
//! Per-exercise statistics and weight-over-time series, plus the planned-set
//! distribution across muscle groups. Inputs are snapshots already joined by
//! the service layer; every computation here is pure and idempotent.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// ---------------------------------------------------------------------------
/// Logged Set (query join of log + owning session)
/// ---------------------------------------------------------------------------

/// One qualifying (completed) set joined to its session timestamp
#[derive(Debug, Clone)]
pub struct LoggedSet {
  pub session_id: i64,
  pub performed_at: DateTime<Utc>,
  pub reps: Option<i64>,
  pub weight: Option<f64>,
}

/// ---------------------------------------------------------------------------
/// Exercise Statistics Aggregator
/// ---------------------------------------------------------------------------

/// Aggregate statistics for one exercise over a user's logged sets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseStats {
  pub max_weight: Option<f64>,
  pub avg_weight: Option<f64>,
  /// Weight of the chronologically most recent set carrying a weight
  pub last_weight: Option<f64>,
  /// Sum of reps x weight, missing values contributing 0
  pub total_volume: f64,
  pub total_sets: i64,
  /// Distinct sessions the sets belong to
  pub total_sessions: i64,
}

impl ExerciseStats {
  /// Compute statistics over qualifying sets, optionally windowed
  ///
  /// `since` is the inclusive lower bound of the day window; `None` means
  /// all history. Sets are assumed pre-filtered to completed logs for one
  /// (user, exercise) pair.
  pub fn compute(sets: &[LoggedSet], since: Option<DateTime<Utc>>) -> Self {
    let qualifying: Vec<&LoggedSet> = sets
      .iter()
      .filter(|s| since.is_none_or(|cutoff| s.performed_at >= cutoff))
      .collect();

    let weights: Vec<f64> = qualifying.iter().filter_map(|s| s.weight).collect();

    let max_weight = weights.iter().copied().fold(None, |acc: Option<f64>, w| {
      Some(acc.map_or(w, |m| m.max(w)))
    });

    let avg_weight = if weights.is_empty() {
      None
    } else {
      Some(weights.iter().sum::<f64>() / weights.len() as f64)
    };

    let last_weight = qualifying
      .iter()
      .filter(|s| s.weight.is_some())
      .max_by_key(|s| s.performed_at)
      .and_then(|s| s.weight);

    let total_volume: f64 = qualifying
      .iter()
      .map(|s| s.reps.unwrap_or(0) as f64 * s.weight.unwrap_or(0.0))
      .sum();

    let sessions: HashSet<i64> = qualifying.iter().map(|s| s.session_id).collect();

    Self {
      max_weight,
      avg_weight,
      last_weight,
      total_volume,
      total_sets: qualifying.len() as i64,
      total_sessions: sessions.len() as i64,
    }
  }
}

/// ---------------------------------------------------------------------------
/// Weight Progression Series
/// ---------------------------------------------------------------------------

/// One point of the weight-over-time series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightPoint {
  pub date: NaiveDate,
  pub weight: f64,
}

/// Weight used per distinct training date, ascending by date
///
/// Multiple weighted sets on one date collapse to the maximum, reflecting
/// the top working set of that day.
pub fn weight_progression(sets: &[LoggedSet], since: Option<DateTime<Utc>>) -> Vec<WeightPoint> {
  let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();

  for set in sets {
    if since.is_some_and(|cutoff| set.performed_at < cutoff) {
      continue;
    }
    let weight = match set.weight {
      Some(w) => w,
      None => continue,
    };
    let date = set.performed_at.date_naive();
    by_date
      .entry(date)
      .and_modify(|top| *top = top.max(weight))
      .or_insert(weight);
  }

  by_date
    .into_iter()
    .map(|(date, weight)| WeightPoint { date, weight })
    .collect()
}

/// ---------------------------------------------------------------------------
/// Muscle Balance Analyzer
/// ---------------------------------------------------------------------------

/// Planned sets for one exercise, tagged with its catalog muscle group
#[derive(Debug, Clone)]
pub struct PlannedSets {
  pub muscle_group: String,
  pub target_sets: i64,
}

/// Share of planned sets going to one muscle group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MuscleGroupShare {
  pub muscle_group: String,
  pub total_sets: i64,
  /// Full-precision percentage; rounding is a rendering concern
  pub percentage: f64,
}

/// Ranked distribution of planned sets across muscle groups
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MuscleBalance {
  /// Sorted descending by total sets, group name breaking ties
  pub groups: Vec<MuscleGroupShare>,
}

impl MuscleBalance {
  /// Aggregate planned sets across all active templates
  ///
  /// Zero total sets yields an empty report, and callers suppress insight
  /// text for it.
  pub fn compute(planned: &[PlannedSets]) -> Self {
    let mut sets_by_group: HashMap<&str, i64> = HashMap::new();
    for p in planned {
      *sets_by_group.entry(p.muscle_group.as_str()).or_insert(0) += p.target_sets;
    }

    let total: i64 = sets_by_group.values().sum();
    if total == 0 {
      return Self { groups: Vec::new() };
    }

    let mut groups: Vec<MuscleGroupShare> = sets_by_group
      .into_iter()
      .map(|(group, sets)| MuscleGroupShare {
        muscle_group: group.to_string(),
        total_sets: sets,
        percentage: sets as f64 / total as f64 * 100.0,
      })
      .collect();

    groups.sort_by(|a, b| {
      b.total_sets
        .cmp(&a.total_sets)
        .then_with(|| a.muscle_group.cmp(&b.muscle_group))
    });

    Self { groups }
  }

  /// The least-trained group, present only when more than one group exists
  pub fn least_trained(&self) -> Option<&MuscleGroupShare> {
    if self.groups.len() > 1 {
      self.groups.last()
    } else {
      None
    }
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
