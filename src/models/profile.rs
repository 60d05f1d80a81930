use serde::{Deserialize, Serialize};

/// Per-user scheduling state
///
/// `current_pass_number` is a sequential counter used as a cyclic pointer
/// into the template list when no day-based match applies.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserProfile {
  pub user_id: i64,
  pub gym_id: i64,
  pub current_pass_number: i64,
}
