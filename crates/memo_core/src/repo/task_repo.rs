//! Task repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the abstract row-storage contract the task store consumes:
//!   insert, query-all, update-completed, delete.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Ids are assigned by storage (`AUTOINCREMENT`), never by callers, so
//!   they survive restarts and are never reused after deletion.
//! - `query_all` returns rows ordered newest-first with a descending-id
//!   tie-break, which keeps ordering deterministic under fast inserts.
//! - Read paths must reject invalid persisted state instead of masking it.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::task::{Task, TaskId};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for task persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; run migrations first"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "connection is missing required table `{table}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Abstract persistence contract for task rows.
///
/// Mutating operations take `&mut self`: the store serializes them behind
/// its collection lock, and the signatures keep that discipline visible.
/// `update_completed` and `delete` return affected row counts; mapping a
/// zero count to a not-found error is the store's decision.
pub trait TaskRepository {
    fn insert(&mut self, text: &str, completed: bool, created_at: i64) -> RepoResult<TaskId>;
    fn query_all(&self) -> RepoResult<Vec<Task>>;
    fn update_completed(&mut self, id: TaskId, new_value: bool) -> RepoResult<usize>;
    fn delete(&mut self, id: TaskId) -> RepoResult<usize>;
}

/// SQLite-backed task repository owning its connection.
pub struct SqliteTaskRepository {
    conn: Connection,
}

impl SqliteTaskRepository {
    /// Wraps a connection after verifying its schema is usable.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `PRAGMA user_version` does not
    ///   match the migrations this binary knows.
    /// - `MissingRequiredTable` when the `tasks` table is absent.
    pub fn try_new(conn: Connection) -> RepoResult<Self> {
        let expected = latest_version();
        let actual: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        if actual != expected {
            return Err(RepoError::UninitializedConnection {
                expected_version: expected,
                actual_version: actual,
            });
        }

        let has_tasks: bool = conn.query_row(
            "SELECT EXISTS (
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'tasks'
             );",
            [],
            |row| row.get(0),
        )?;
        if !has_tasks {
            return Err(RepoError::MissingRequiredTable("tasks"));
        }

        Ok(Self { conn })
    }
}

impl TaskRepository for SqliteTaskRepository {
    fn insert(&mut self, text: &str, completed: bool, created_at: i64) -> RepoResult<TaskId> {
        self.conn.execute(
            "INSERT INTO tasks (text, completed, created_at) VALUES (?1, ?2, ?3);",
            params![text, completed as i64, created_at],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn query_all(&self) -> RepoResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, text, completed, created_at
             FROM tasks
             ORDER BY created_at DESC, id DESC;",
        )?;

        let mut rows = stmt.query([])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        Ok(tasks)
    }

    fn update_completed(&mut self, id: TaskId, new_value: bool) -> RepoResult<usize> {
        let changed = self.conn.execute(
            "UPDATE tasks SET completed = ?1 WHERE id = ?2;",
            params![new_value as i64, id],
        )?;
        Ok(changed)
    }

    fn delete(&mut self, id: TaskId) -> RepoResult<usize> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1;", params![id])?;
        Ok(changed)
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let id: TaskId = row.get("id")?;
    if id <= 0 {
        return Err(RepoError::InvalidData(format!(
            "non-positive id `{id}` in tasks.id"
        )));
    }

    let completed = match row.get::<_, i64>("completed")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid completed value `{other}` in tasks.completed"
            )));
        }
    };

    Ok(Task {
        id,
        text: row.get("text")?,
        completed,
        created_at: row.get("created_at")?,
    })
}
