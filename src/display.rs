// Human-readable rendering of task lists

use crate::task::Task;
use chrono::{DateTime, Utc};
use std::fmt::Write;

/// Describe how long ago `then` was, relative to `now`
///
/// Anything under a minute (or in the future) is "just now".
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then);

    if elapsed.num_minutes() < 1 {
        "just now".to_string()
    } else if elapsed.num_hours() < 1 {
        plural(elapsed.num_minutes(), "minute")
    } else if elapsed.num_days() < 1 {
        plural(elapsed.num_hours(), "hour")
    } else {
        plural(elapsed.num_days(), "day")
    }
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}

/// Render tasks as the `list` table
pub fn render_table(tasks: &[Task], now: DateTime<Utc>) -> String {
    if tasks.is_empty() {
        return "No todos found!\n".to_string();
    }

    let mut out = String::from("ID  STATUS  TASK\n--  ------  ----\n");
    for task in tasks {
        let _ = write!(out, "{:2}  {}  {}", task.id, task.status(), task.description);
        if let Some(completed_at) = task.completed_at.filter(|_| task.done) {
            let _ = write!(out, " (completed {})", time_ago(completed_at, now));
        }
        out.push('\n');
    }
    out
}
