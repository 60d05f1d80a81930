//! Training schedule and progress analytics engine
//!
//! The pure core (schedule, progress, stats, trends) decides which session
//! is next, measures live completion, and aggregates history; the service
//! layer feeds it snapshots from the SQLite store. Sensor and remote data
//! arrives through the single-flight sync coordinator.

pub mod db;
pub mod error;
pub mod models;
pub mod progress;
pub mod schedule;
pub mod service;
pub mod stats;
pub mod sync;
pub mod trends;

#[cfg(test)]
pub mod test_utils;

pub use db::{AppState, DbPool};
pub use error::ServiceError;
