// screen.rs: Rendering the countdown and goal list, and reading user intents.
//
// Rendering is plain text so it can be tested without a terminal. Goals are
// numbered from 1 in canonical order; `done <n>` refers to those numbers.

use std::fmt::Write;

use dl_goal::DisplayRow;

const RULE_WIDTH: usize = 40;

/// Something the user asked for at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Add a goal with this raw text.
    Add(String),
    /// Toggle the goal shown with this number.
    Toggle(usize),
    /// Redraw the screen.
    Refresh,
    Help,
    Quit,
    /// Input that matched nothing, kept for the error message.
    Unknown(String),
}

impl Intent {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "" | "list" | "ls" => Intent::Refresh,
            // Blank text is passed on as-is; the store ignores it.
            "add" | "a" => Intent::Add(rest.to_string()),
            "done" | "toggle" | "d" => match rest.parse::<usize>() {
                Ok(n) if n > 0 => Intent::Toggle(n),
                _ => Intent::Unknown(line.to_string()),
            },
            "help" | "?" => Intent::Help,
            "quit" | "exit" | "q" => Intent::Quit,
            _ => Intent::Unknown(line.to_string()),
        }
    }
}

pub const HELP: &str = "\
Commands:
  add <text>    add a goal
  done <n>      mark goal n done (or not done)
  list          redraw
  quit          leave";

/// The full screen: countdown header followed by the grouped list.
pub fn render(days_left: i64, rows: &[DisplayRow<'_>]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:^width$}", "NO. OF DAYS LEFT", width = RULE_WIDTH);
    let _ = writeln!(out, "{:^width$}", days_left, width = RULE_WIDTH);
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));

    if rows.is_empty() {
        let _ = writeln!(out, "No goals yet. Type `add <text>` to create one.");
        return out;
    }

    for row in rows {
        match row {
            DisplayRow::DateSeparator { date } => {
                let _ = writeln!(out);
                let _ = writeln!(out, "{:^width$}", date, width = RULE_WIDTH);
                let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
            }
            DisplayRow::Goal { index, goal } => {
                let mark = if goal.completed { "x" } else { " " };
                let _ = writeln!(out, "{:>3}. [{}] {}", index + 1, mark, goal.text);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use dl_goal::{group_by_date, Goal};

    #[test]
    fn parse_add_keeps_text() {
        assert_eq!(
            Intent::parse("add Run 5k  "),
            Intent::Add("Run 5k".to_string())
        );
        assert_eq!(Intent::parse("add"), Intent::Add(String::new()));
    }

    #[test]
    fn parse_done_needs_a_positive_number() {
        assert_eq!(Intent::parse("done 2"), Intent::Toggle(2));
        assert_eq!(Intent::parse("d 1"), Intent::Toggle(1));
        assert!(matches!(Intent::parse("done 0"), Intent::Unknown(_)));
        assert!(matches!(Intent::parse("done two"), Intent::Unknown(_)));
    }

    #[test]
    fn parse_misc_commands() {
        assert_eq!(Intent::parse(""), Intent::Refresh);
        assert_eq!(Intent::parse("list"), Intent::Refresh);
        assert_eq!(Intent::parse("?"), Intent::Help);
        assert_eq!(Intent::parse("quit"), Intent::Quit);
        assert_eq!(
            Intent::parse("frobnicate"),
            Intent::Unknown("frobnicate".to_string())
        );
    }

    #[test]
    fn render_empty_list_shows_hint() {
        let screen = render(74, &[]);
        assert!(screen.contains("NO. OF DAYS LEFT"));
        assert!(screen.contains("74"));
        assert!(screen.contains("No goals yet"));
    }

    #[test]
    fn render_numbers_goals_under_their_dates() {
        let mut done = Goal::new("Stretch", "01/06/2025");
        done.completed = true;
        let goals = vec![
            Goal::new("Run 5k", "02/06/2025"),
            done,
            Goal::new("Read", "01/06/2025"),
        ];
        let screen = render(3, &group_by_date(&goals));

        let lines: Vec<&str> = screen.lines().collect();
        let first_date = lines.iter().position(|l| l.contains("02/06/2025")).unwrap();
        let second_date = lines.iter().position(|l| l.contains("01/06/2025")).unwrap();
        assert!(first_date < second_date);
        assert!(screen.contains("  1. [ ] Run 5k"));
        assert!(screen.contains("  2. [x] Stretch"));
        assert!(screen.contains("  3. [ ] Read"));
        assert_eq!(screen.matches("01/06/2025").count(), 1);
    }
}
