// Task entity as stored in the todos table

use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::Serialize;

/// A single todo item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    pub id: i64,
    pub description: String,
    pub done: bool,
    pub created_at: DateTime<Utc>,
    /// Present exactly when `done` is true
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Open,
    Done,
}

impl Task {
    /// Column order expected by `from_row`
    pub(crate) const COLUMNS: &'static str = "id, task, done, created_at, done_at";

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            description: row.get(1)?,
            done: row.get(2)?,
            created_at: row.get(3)?,
            completed_at: row.get(4)?,
        })
    }

    pub fn status(&self) -> TaskStatus {
        if self.done { TaskStatus::Done } else { TaskStatus::Open }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Open => write!(f, "[ ]"),
            TaskStatus::Done => write!(f, "[✓]"),
        }
    }
}
