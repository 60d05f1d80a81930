//! Background sync coordination
//!
//! The analytics core only reads snapshots; fresh health-sensor data arrives
//! through provider-driven syncs that run as background tasks. The
//! coordinator enforces single-flight per (user, resource): a second sync
//! request for the same pair while one is outstanding is rejected instead of
//! running concurrently, which would risk duplicate writes into the store.

use std::collections::HashSet;
use std::sync::Mutex;

use tracing::{info, warn};

use crate::db::DbPool;
use crate::models::NewHealthMetric;

/// ---------------------------------------------------------------------------
/// Errors
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
  #[error("sync already in flight for user {user_id} / {resource:?}")]
  AlreadyInFlight { user_id: i64, resource: SyncResource },

  #[error("provider error: {0}")]
  Provider(String),

  #[error("database error: {0}")]
  Database(#[from] sqlx::Error),
}

/// ---------------------------------------------------------------------------
/// Provider Boundary
/// ---------------------------------------------------------------------------

/// Source of freshly fetched health metrics (sensor bridge, remote sync)
///
/// Implementations own transport and authentication; the coordinator only
/// sees the resolved records.
pub trait MetricProvider {
  fn fetch_metrics(
    &self,
    user_id: i64,
  ) -> impl std::future::Future<Output = Result<Vec<NewHealthMetric>, String>> + Send;
}

/// ---------------------------------------------------------------------------
/// Coordinator
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncResource {
  HealthMetrics,
}

/// Enforces single-flight syncs per (user, resource)
#[derive(Default)]
pub struct SyncCoordinator {
  in_flight: Mutex<HashSet<(i64, SyncResource)>>,
}

impl SyncCoordinator {
  pub fn new() -> Self {
    Self::default()
  }

  /// Fetch metrics from the provider and append them to the store
  ///
  /// Returns the number of inserted records. The in-flight slot is released
  /// on completion and on failure.
  pub async fn sync_health_metrics<P: MetricProvider>(
    &self,
    pool: &DbPool,
    user_id: i64,
    provider: &P,
  ) -> Result<usize, SyncError> {
    let _slot = self.claim(user_id, SyncResource::HealthMetrics)?;

    let metrics = provider
      .fetch_metrics(user_id)
      .await
      .map_err(SyncError::Provider)?;

    let mut inserted = 0;
    for metric in &metrics {
      sqlx::query(
        r#"
        INSERT INTO health_metrics (user_id, metric_type, value, recorded_at)
        VALUES (?1, ?2, ?3, ?4)
        "#,
      )
      .bind(metric.user_id)
      .bind(metric.metric_type.as_str())
      .bind(metric.value)
      .bind(metric.recorded_at)
      .execute(pool)
      .await?;
      inserted += 1;
    }

    info!(user_id, inserted, "health metric sync finished");
    Ok(inserted)
  }

  fn claim(&self, user_id: i64, resource: SyncResource) -> Result<FlightSlot<'_>, SyncError> {
    let mut slots = lock_slots(&self.in_flight);
    if !slots.insert((user_id, resource)) {
      warn!(user_id, ?resource, "rejecting concurrent sync request");
      return Err(SyncError::AlreadyInFlight { user_id, resource });
    }
    Ok(FlightSlot {
      slots: &self.in_flight,
      key: (user_id, resource),
    })
  }
}

/// RAII handle releasing the in-flight slot when the sync ends
struct FlightSlot<'a> {
  slots: &'a Mutex<HashSet<(i64, SyncResource)>>,
  key: (i64, SyncResource),
}

impl Drop for FlightSlot<'_> {
  fn drop(&mut self) {
    lock_slots(self.slots).remove(&self.key);
  }
}

fn lock_slots<'a>(
  slots: &'a Mutex<HashSet<(i64, SyncResource)>>,
) -> std::sync::MutexGuard<'a, HashSet<(i64, SyncResource)>> {
  // The critical sections never panic, but recover the set if one did
  slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
