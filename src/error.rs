use serde::Serialize;

/// Errors surfaced by the store-backed service layer
///
/// The pure analytics core is total and never returns these; they cover
/// query failures and lifecycle misuse only.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
  #[error("database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("{0} not found")]
  NotFound(&'static str),

  #[error("invalid session transition: session {session_id} is {status}")]
  InvalidTransition { session_id: i64, status: String },

  #[error("invalid stored value: {0}")]
  InvalidData(String),
}

impl Serialize for ServiceError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}
