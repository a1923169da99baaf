//! Task store: the single authority over the task collection.
//!
//! # Responsibility
//! - Validate all input before any mutation.
//! - Serialize collection access so concurrent callers never observe a
//!   torn or partially applied state.
//! - Return immutable snapshot copies on read.
//!
//! # Invariants
//! - Validation failures (`Validation`, `InvalidId`) happen before the
//!   collection lock is taken and carry no side effect.
//! - Storage failures surface as `Storage`, never collapsed into
//!   `NotFound` or silently dropped.
//! - Ids come from durably observed state (storage autoincrement), so a
//!   failed insert can leave a gap but never causes reuse.

use crate::model::task::{Task, TaskId, TaskValidationError};
use crate::repo::task_repo::{RepoError, TaskRepository};
use log::{debug, error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

pub type StoreResult<T> = Result<T, StoreError>;

/// Operation-level error for the task store.
///
/// All four kinds stay distinguishable for the caller; the transport layer
/// decides how each maps to user-visible behavior.
#[derive(Debug)]
pub enum StoreError {
    /// Caller-input problem, detected before any mutation.
    Validation(TaskValidationError),
    /// Structurally invalid identifier (non-positive), detected before lookup.
    InvalidId(i64),
    /// Well-formed identifier with no matching task.
    NotFound(TaskId),
    /// The persistence collaborator failed.
    Storage(RepoError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::InvalidId(id) => write!(f, "invalid task id: {id}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::InvalidId(_) | Self::NotFound(_) => None,
        }
    }
}

impl From<TaskValidationError> for StoreError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Storage(value)
    }
}

/// Concurrency-safe store over an injected repository.
///
/// One lock guards the whole collection: mutations hold it for their full
/// duration, reads take a consistent snapshot under it, so operations are
/// linearizable. A SQLite connection is not shareable across threads
/// anyway, which makes a single whole-collection lock the honest primitive
/// at this scale.
pub struct TaskStore<R: TaskRepository> {
    repo: Mutex<R>,
}

impl<R: TaskRepository> TaskStore<R> {
    /// Creates a store using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self {
            repo: Mutex::new(repo),
        }
    }

    /// Adds a task and returns the fully populated record.
    ///
    /// # Contract
    /// - Text is validated (trim, non-empty, <=500 chars) before the lock
    ///   is taken; failure mutates nothing.
    /// - `completed` starts `false`; `created_at` is stamped here.
    /// - The id is whatever storage durably assigned, never an in-memory
    ///   counter.
    pub fn add(&self, text: &str) -> StoreResult<Task> {
        let text = Task::validate_text(text)?;
        let created_at = now_epoch_ms();

        let mut repo = self.lock_repo();
        let id = repo.insert(&text, false, created_at).inspect_err(|err| {
            error!("event=task_add module=store status=error error={err}");
        })?;

        info!("event=task_add module=store status=ok id={id}");
        Ok(Task {
            id,
            text,
            completed: false,
            created_at,
        })
    }

    /// Returns a snapshot of all tasks, newest first.
    ///
    /// The returned vector is a copy; neither caller mutations nor later
    /// store mutations affect the other.
    pub fn list(&self) -> StoreResult<Vec<Task>> {
        let repo = self.lock_repo();
        let tasks = repo.query_all().inspect_err(|err| {
            error!("event=task_list module=store status=error error={err}");
        })?;

        debug!("event=task_list module=store status=ok count={}", tasks.len());
        Ok(tasks)
    }

    /// Flips the completion flag of one task.
    ///
    /// Not idempotent: repeated calls alternate state. Callers must not
    /// assume a "set to true" semantic.
    pub fn toggle(&self, id: i64) -> StoreResult<()> {
        let id = validate_id(id)?;

        let mut repo = self.lock_repo();
        // The target value derives from the durably stored row, read under
        // the same lock that guards the update.
        let current = repo
            .query_all()?
            .into_iter()
            .find(|task| task.id == id)
            .ok_or(StoreError::NotFound(id))?;

        let changed = repo.update_completed(id, !current.completed).inspect_err(|err| {
            error!("event=task_toggle module=store status=error id={id} error={err}");
        })?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }

        info!(
            "event=task_toggle module=store status=ok id={id} completed={}",
            !current.completed
        );
        Ok(())
    }

    /// Permanently removes one task. Its id is never reassigned.
    pub fn delete(&self, id: i64) -> StoreResult<()> {
        let id = validate_id(id)?;

        let mut repo = self.lock_repo();
        let changed = repo.delete(id).inspect_err(|err| {
            error!("event=task_delete module=store status=error id={id} error={err}");
        })?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }

        info!("event=task_delete module=store status=ok id={id}");
        Ok(())
    }

    fn lock_repo(&self) -> std::sync::MutexGuard<'_, R> {
        // A poisoned lock means another thread panicked mid-operation; the
        // collection itself lives in storage and stays consistent, so
        // continuing with the inner repository is sound.
        match self.repo.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

fn validate_id(id: i64) -> StoreResult<TaskId> {
    if id <= 0 {
        return Err(StoreError::InvalidId(id));
    }
    Ok(id)
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}
