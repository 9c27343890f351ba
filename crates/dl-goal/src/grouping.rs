// grouping.rs: Date-grouped display rows derived from the canonical order.
//
// A separator row precedes the first goal and every goal whose date differs
// from the goal right before it. Only adjacent goals are compared, so if
// re-sorting interleaves dates, the same date can get several separators.
// The rows borrow from the goal list and are rebuilt on every read.

use crate::goal::Goal;

/// One row of the presentation-facing goal list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayRow<'a> {
    /// Marks the start of a run of goals created on `date`.
    DateSeparator { date: &'a str },

    /// A goal, with its position in the canonical order.
    Goal { index: usize, goal: &'a Goal },
}

impl<'a> DisplayRow<'a> {
    pub fn as_goal(&self) -> Option<&'a Goal> {
        match self {
            DisplayRow::Goal { goal, .. } => Some(goal),
            DisplayRow::DateSeparator { .. } => None,
        }
    }

    pub fn is_separator(&self) -> bool {
        matches!(self, DisplayRow::DateSeparator { .. })
    }
}

/// Build display rows for `goals` in canonical order.
pub fn group_by_date(goals: &[Goal]) -> Vec<DisplayRow<'_>> {
    let mut rows = Vec::with_capacity(goals.len() * 2);
    let mut previous: Option<&str> = None;

    for (index, goal) in goals.iter().enumerate() {
        if previous != Some(goal.date.as_str()) {
            rows.push(DisplayRow::DateSeparator {
                date: goal.date.as_str(),
            });
        }
        rows.push(DisplayRow::Goal { index, goal });
        previous = Some(goal.date.as_str());
    }

    rows
}
