// codec.rs: Text encoding of the goal list for the persistence backend.
//
// The whole list is stored as one JSON array under a single key:
//   [{"id":"...","text":"...","completed":false,"date":"01/06/2025"}, ...]
// Array order is the canonical order.

use crate::error::GoalError;
use crate::goal::Goal;

/// Serialize the full goal list.
pub fn encode(goals: &[Goal]) -> Result<String, GoalError> {
    Ok(serde_json::to_string(goals)?)
}

/// Deserialize a goal list previously produced by [`encode`].
///
/// Unknown fields are ignored; missing or mistyped required fields are an
/// error.
pub fn decode(blob: &str) -> Result<Vec<Goal>, GoalError> {
    Ok(serde_json::from_str(blob)?)
}
