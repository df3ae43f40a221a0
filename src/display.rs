//! Human-readable rendering of tasks and columns.

use chrono::{DateTime, Utc};

use crate::board::Board;
use crate::model::{Priority, Status, Task};

/// Due date in the configured chrono format, e.g. "Nov 25".
pub fn format_due(due: &DateTime<Utc>, format: &str) -> String {
    due.format(format).to_string()
}

/// Only urgent, unfinished work gets a countdown.
pub fn shows_time_remaining(task: &Task) -> bool {
    matches!(task.priority, Priority::High | Priority::Medium) && task.status != Status::Completed
}

/// "due in 3d", "due in 5h", "overdue by 2d".
pub fn time_remaining(due: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let delta = *due - *now;
    let overdue = delta < chrono::Duration::zero();
    let span = if overdue { -delta } else { delta };

    let amount = if span.num_days() > 0 {
        format!("{}d", span.num_days())
    } else if span.num_hours() > 0 {
        format!("{}h", span.num_hours())
    } else {
        format!("{}m", span.num_minutes().max(1))
    };

    if overdue {
        format!("overdue by {amount}")
    } else {
        format!("due in {amount}")
    }
}

/// One line per task: `[High] a1b2c3d4 Design Landing Page (John Doe, Nov 25, overdue by 3d)`.
pub fn task_line(task: &Task, date_format: &str, now: &DateTime<Utc>) -> String {
    let mut line = format!(
        "[{}] {} {} ({}, {}",
        task.priority,
        task.id,
        task.title,
        task.assignee.name,
        format_due(&task.due_date, date_format)
    );
    if shows_time_remaining(task) {
        line.push_str(", ");
        line.push_str(&time_remaining(&task.due_date, now));
    }
    line.push(')');
    line
}

/// Column header: `Todo (3)`.
pub fn column_header(title: &str, count: usize) -> String {
    format!("{title} ({count})")
}

/// The whole board as text, columns in definition order.
pub fn render_board(board: &Board, date_format: &str, now: &DateTime<Utc>) -> Vec<String> {
    let mut lines = Vec::new();
    for column in board.columns() {
        lines.push(column_header(&column.title, column.task_ids.len()));
        let tasks = board.column_tasks(&column.id);
        if tasks.is_empty() {
            lines.push("  (empty)".to_string());
        }
        for task in tasks {
            lines.push(format!("  {}", task_line(task, date_format, now)));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::project;
    use crate::seed::default_snapshot;

    fn at(raw: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(raw).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn due_dates_use_short_month_format() {
        assert_eq!(format_due(&at("2024-11-05T18:30:00Z"), "%b %-d"), "Nov 5");
    }

    #[test]
    fn remaining_time_counts_down_and_overdue() {
        let now = at("2024-11-20T18:30:00Z");
        assert_eq!(time_remaining(&at("2024-11-25T18:30:00Z"), &now), "due in 5d");
        assert_eq!(time_remaining(&at("2024-11-20T21:30:00Z"), &now), "due in 3h");
        assert_eq!(time_remaining(&at("2024-11-18T18:30:00Z"), &now), "overdue by 2d");
    }

    #[test]
    fn completed_and_low_priority_tasks_skip_countdown() {
        let snapshot = default_snapshot();
        let report = snapshot.task("i9j0k1l2").unwrap();
        let agenda = snapshot.task("q7r8s9t0").unwrap();
        let landing = snapshot.task("a1b2c3d4").unwrap();
        assert!(!shows_time_remaining(report));
        assert!(!shows_time_remaining(agenda));
        assert!(shows_time_remaining(landing));
    }

    #[test]
    fn board_renders_every_column() {
        let snapshot = default_snapshot();
        let board = project(&snapshot.tasks, &snapshot.columns);
        let lines = render_board(&board, "%b %-d", &at("2024-11-20T18:30:00Z"));

        assert_eq!(lines[0], "Todo (3)");
        assert!(lines[1].contains("e5f6g7h8 Database Schema Review"));
        assert!(lines[1].contains("due in 10d"));
        assert!(lines.iter().any(|line| line == "In Progress (2)"));
        assert!(lines.iter().any(|line| line == "Completed (1)"));
    }
}
