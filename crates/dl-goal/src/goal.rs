// goal.rs: Goal, the single tracked item.
//
// A Goal is created once and never edited or deleted. Only `completed`
// changes after creation, and only through the store's toggle operation.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque, stable identifier for a Goal.
///
/// New ids are UUID v4 strings, but any string read back from storage is
/// accepted as-is. `#[serde(transparent)]` keeps it a plain JSON string on
/// the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GoalId(String);

impl GoalId {
    /// Generate a fresh, unique id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GoalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for GoalId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for GoalId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A user-tracked goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    /// Unique identifier, assigned at creation.
    pub id: GoalId,

    /// What the user wants to achieve (trimmed, never empty).
    pub text: String,

    /// Whether the user has marked this goal done.
    pub completed: bool,

    /// Creation date, already rendered in the display format.
    /// Used for grouping only, never parsed back.
    pub date: String,
}

impl Goal {
    /// Create a new, incomplete goal with a fresh id.
    pub fn new(text: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            id: GoalId::generate(),
            text: text.into(),
            completed: false,
            date: date.into(),
        }
    }

    /// Flip the completion flag and return the new value.
    pub fn toggle(&mut self) -> bool {
        self.completed = !self.completed;
        self.completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_goal_starts_incomplete() {
        let goal = Goal::new("Run 5k", "01/06/2025");
        assert!(!goal.completed);
        assert_eq!(goal.text, "Run 5k");
        assert_eq!(goal.date, "01/06/2025");
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = Goal::new("a", "x");
        let b = Goal::new("b", "x");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn toggle_flips_and_reports() {
        let mut goal = Goal::new("Read", "x");
        assert!(goal.toggle());
        assert!(goal.completed);
        assert!(!goal.toggle());
        assert!(!goal.completed);
    }

    #[test]
    fn id_serializes_as_plain_string() {
        let goal = Goal {
            id: GoalId::from("1718000000000"),
            text: "Legacy".to_string(),
            completed: true,
            date: "10/06/2024".to_string(),
        };
        let json = serde_json::to_value(&goal).unwrap();
        assert_eq!(json["id"], "1718000000000");
        assert_eq!(json["completed"], true);
    }
}
