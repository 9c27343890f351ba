// ordering.rs: The canonical-order policy for the goal list.
//
// Two historical behaviours exist: new goals go first or last, and toggling
// may or may not sink completed goals to the bottom. Both are captured in one
// OrderingPolicy value so a store applies a single policy uniformly to the
// in-memory list and to what it persists.

use serde::{Deserialize, Serialize};

use crate::goal::Goal;

/// Where newly added goals are placed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Insertion {
    /// New goal becomes the first element (newest first).
    #[default]
    Prepend,
    /// New goal becomes the last element (oldest first).
    Append,
}

/// How the canonical order of the goal list is maintained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderingPolicy {
    #[serde(default)]
    pub insertion: Insertion,

    /// Re-sort after every toggle so incomplete goals come first.
    ///
    /// This can split a run of same-date goals, so the date view may then
    /// show the same date separator more than once.
    #[serde(default)]
    pub completed_last: bool,
}

impl OrderingPolicy {
    /// Newest first, no re-sorting.
    pub fn newest_first() -> Self {
        Self::default()
    }

    /// Oldest first, completed goals sink to the bottom.
    pub fn oldest_first_completed_last() -> Self {
        Self {
            insertion: Insertion::Append,
            completed_last: true,
        }
    }

    /// Place a new goal according to the insertion rule and return its index.
    pub fn insert(&self, goals: &mut Vec<Goal>, goal: Goal) -> usize {
        match self.insertion {
            Insertion::Prepend => {
                goals.insert(0, goal);
                0
            }
            Insertion::Append => {
                goals.push(goal);
                goals.len() - 1
            }
        }
    }

    /// Restore order after a toggle.
    ///
    /// `sort_by_key` is stable: goals with the same `completed` value keep
    /// their relative order.
    pub fn after_toggle(&self, goals: &mut [Goal]) {
        if self.completed_last {
            goals.sort_by_key(|g| g.completed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(goals: &[Goal]) -> Vec<&str> {
        goals.iter().map(|g| g.text.as_str()).collect()
    }

    #[test]
    fn prepend_puts_newest_first() {
        let policy = OrderingPolicy::newest_first();
        let mut goals = Vec::new();
        assert_eq!(policy.insert(&mut goals, Goal::new("A", "d")), 0);
        assert_eq!(policy.insert(&mut goals, Goal::new("B", "d")), 0);
        assert_eq!(texts(&goals), vec!["B", "A"]);
    }

    #[test]
    fn append_keeps_oldest_first() {
        let policy = OrderingPolicy::oldest_first_completed_last();
        let mut goals = Vec::new();
        assert_eq!(policy.insert(&mut goals, Goal::new("A", "d")), 0);
        assert_eq!(policy.insert(&mut goals, Goal::new("B", "d")), 1);
        assert_eq!(texts(&goals), vec!["A", "B"]);
    }

    #[test]
    fn completed_last_is_a_stable_sort() {
        let policy = OrderingPolicy::oldest_first_completed_last();
        let mut goals: Vec<Goal> = ["A", "B", "C", "D"]
            .iter()
            .map(|t| Goal::new(*t, "d"))
            .collect();
        goals[0].completed = true;
        goals[2].completed = true;
        policy.after_toggle(&mut goals);
        assert_eq!(texts(&goals), vec!["B", "D", "A", "C"]);
    }

    #[test]
    fn without_completed_last_toggle_keeps_order() {
        let policy = OrderingPolicy::newest_first();
        let mut goals: Vec<Goal> = ["A", "B"].iter().map(|t| Goal::new(*t, "d")).collect();
        goals[0].completed = true;
        policy.after_toggle(&mut goals);
        assert_eq!(texts(&goals), vec!["A", "B"]);
    }

    #[test]
    fn policy_reads_from_toml() {
        let policy: OrderingPolicy =
            toml::from_str("insertion = \"append\"\ncompleted_last = true\n").unwrap();
        assert_eq!(policy, OrderingPolicy::oldest_first_completed_last());

        let policy: OrderingPolicy = toml::from_str("").unwrap();
        assert_eq!(policy, OrderingPolicy::default());
    }
}
