// SQLite-backed task store with transactional renumbering

use crate::error::{Result, StoreError};
use crate::task::Task;
use chrono::Utc;
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, Transaction, TransactionBehavior};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

const CURRENT_VERSION: u32 = 1;

/// Default wait for a lock held by another process
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// Persistent, ordered collection of todos identified by sequential IDs
pub struct Store {
    db: Connection,
}

/// A row captured during reindexing, without its ID
struct StagedTask {
    description: String,
    done: bool,
    created_at: Value,
    completed_at: Value,
}

impl Store {
    /// Open or create the database file at `path`
    ///
    /// Missing parent directories are created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_timeout(path, DEFAULT_BUSY_TIMEOUT)
    }

    /// Open or create the database file, waiting up to `busy_timeout` on locks
    pub fn open_with_timeout<P: AsRef<Path>>(path: P, busy_timeout: Duration) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        debug!(path = %path.display(), "Opening database");
        let db = Connection::open(path)?;
        db.busy_timeout(busy_timeout)?;

        let store = Self { db };
        store.create_schema()?;
        Ok(store)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let store = Self {
            db: Connection::open_in_memory()?,
        };
        store.create_schema()?;
        Ok(store)
    }

    /// Get a reference to the SQLite database connection
    pub fn db(&self) -> &Connection {
        &self.db
    }

    fn create_schema(&self) -> Result<()> {
        let found: u32 = self.db.query_row("PRAGMA user_version", [], |row| row.get(0))?;
        if found > CURRENT_VERSION {
            return Err(StoreError::UnsupportedSchema {
                found,
                supported: CURRENT_VERSION,
            });
        }

        debug!(version = found, "Creating database schema");
        self.db.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS todos (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                task TEXT NOT NULL,
                done BOOLEAN NOT NULL DEFAULT 0,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                done_at TIMESTAMP NULL,
                CHECK ((done = 0) = (done_at IS NULL))
            );
            "#,
        )?;

        if found < CURRENT_VERSION {
            self.db
                .execute_batch(&format!("PRAGMA user_version = {}", CURRENT_VERSION))?;
        }

        Ok(())
    }

    /// Begin a write transaction that rolls back when dropped uncommitted
    fn write_tx(&mut self) -> Result<Transaction<'_>> {
        Ok(self.db.transaction_with_behavior(TransactionBehavior::Immediate)?)
    }

    // ========================================================================
    // Task operations
    // ========================================================================

    /// Add a new open task and return its ID
    pub fn create(&mut self, description: &str) -> Result<i64> {
        let description = description.trim();
        if description.is_empty() {
            warn!("Rejected empty task description");
            return Err(StoreError::invalid_input("Task cannot be empty"));
        }

        let tx = self.write_tx()?;
        tx.execute(
            "INSERT INTO todos (task, done, created_at) VALUES (?1, 0, ?2)",
            rusqlite::params![description, Utc::now()],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        info!(id, "Created task");
        Ok(id)
    }

    /// Get a task by ID
    pub fn get(&self, id: i64) -> Result<Option<Task>> {
        let sql = format!("SELECT {} FROM todos WHERE id = ?1", Task::COLUMNS);
        let task = self.db.query_row(&sql, [id], Task::from_row).optional()?;
        Ok(task)
    }

    /// Number of stored tasks, done or not
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self.db.query_row("SELECT COUNT(*) FROM todos", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// List tasks, open ones first, each group ordered by ID
    ///
    /// Completed tasks are left out unless `include_completed` is set.
    pub fn list(&self, include_completed: bool) -> Result<Vec<Task>> {
        let mut sql = format!("SELECT {} FROM todos", Task::COLUMNS);
        if !include_completed {
            sql.push_str(" WHERE done = 0");
        }
        sql.push_str(" ORDER BY done, id");

        let mut stmt = self.db.prepare(&sql)?;
        let tasks = stmt
            .query_map([], Task::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        debug!(count = tasks.len(), include_completed, "Listed tasks");
        Ok(tasks)
    }

    /// Mark a task as done, stamping the completion time
    ///
    /// Completing an already-done task moves `completed_at` to now.
    pub fn complete(&mut self, id: i64) -> Result<()> {
        let tx = self.write_tx()?;
        let affected = tx.execute(
            "UPDATE todos SET done = 1, done_at = ?1 WHERE id = ?2",
            rusqlite::params![Utc::now(), id],
        )?;

        if affected == 0 {
            warn!(id, "Complete: no such task");
            return Err(StoreError::NotFound(id));
        }

        tx.commit()?;
        info!(id, "Completed task");
        Ok(())
    }

    /// Remove a task and renumber the rest in the same transaction
    pub fn delete(&mut self, id: i64) -> Result<()> {
        let tx = self.write_tx()?;
        let affected = tx.execute("DELETE FROM todos WHERE id = ?1", [id])?;

        if affected == 0 {
            warn!(id, "Delete: no such task");
            return Err(StoreError::NotFound(id));
        }

        Self::reindex_tx(&tx)?;
        tx.commit()?;

        info!(id, "Deleted task");
        Ok(())
    }

    /// Renumber every task to 1..=N keeping the current ID order
    pub fn reindex_all(&mut self) -> Result<()> {
        let tx = self.write_tx()?;
        let count = Self::reindex_tx(&tx)?;
        tx.commit()?;

        info!(count, "Reindexed tasks");
        Ok(())
    }

    /// Stage all rows in ID order, clear the table, reset the counter and
    /// reinsert so the engine hands out fresh sequential IDs.
    fn reindex_tx(tx: &Transaction<'_>) -> Result<usize> {
        let staged: Vec<StagedTask> = {
            let mut stmt = tx.prepare("SELECT task, done, created_at, done_at FROM todos ORDER BY id")?;
            let rows = stmt
                .query_map([], |row| {
                    Ok(StagedTask {
                        description: row.get(0)?,
                        done: row.get(1)?,
                        created_at: row.get(2)?,
                        completed_at: row.get(3)?,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            rows
        };
        debug!(count = staged.len(), "reindex_tx: staged rows");

        tx.execute("DELETE FROM todos", [])?;
        tx.execute("DELETE FROM sqlite_sequence WHERE name = 'todos'", [])?;

        let mut insert = tx.prepare("INSERT INTO todos (task, done, created_at, done_at) VALUES (?1, ?2, ?3, ?4)")?;
        for task in &staged {
            insert.execute(rusqlite::params![
                task.description,
                task.done,
                task.created_at,
                task.completed_at
            ])?;
        }

        Ok(staged.len())
    }
}
