//! Task record and text validation policy.
//!
//! # Responsibility
//! - Define the single entity this application stores.
//! - Enforce the text input policy: trim, reject empty, cap length.
//!
//! # Invariants
//! - `id` is assigned by storage, is strictly positive, and is never reused.
//! - `text` is stored post-trim and never exceeds [`TASK_TEXT_MAX_CHARS`].
//! - `created_at` is immutable and is the sole ordering key (newest first,
//!   ties broken by descending `id`).

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable row identifier assigned by the persistence layer.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = i64;

/// Maximum task text length in characters, counted after trimming.
pub const TASK_TEXT_MAX_CHARS: usize = 500;

/// A single to-do entry.
///
/// Instances returned from the store are snapshot copies; mutating them has
/// no effect on stored state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Storage-assigned identity. Monotonic in creation order.
    pub id: TaskId,
    /// Trimmed task text. Immutable once created.
    pub text: String,
    /// Completion flag. Starts `false`, flipped only by toggle.
    pub completed: bool,
    /// Creation time in unix epoch milliseconds.
    pub created_at: i64,
}

/// Rejection reasons for task text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Text was empty or whitespace-only after trimming.
    EmptyText,
    /// Text exceeded [`TASK_TEXT_MAX_CHARS`] after trimming.
    TextTooLong { chars: usize },
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "task text cannot be empty"),
            Self::TextTooLong { chars } => write!(
                f,
                "task text cannot exceed {TASK_TEXT_MAX_CHARS} characters, got {chars}"
            ),
        }
    }
}

impl Error for TaskValidationError {}

impl Task {
    /// Validates raw task text and returns the trimmed form to persist.
    ///
    /// # Contract
    /// - Leading/trailing whitespace is not part of the stored text.
    /// - Length is counted in `char`s, not bytes, so multi-byte input is
    ///   not penalized.
    pub fn validate_text(raw: &str) -> Result<String, TaskValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskValidationError::EmptyText);
        }
        let chars = trimmed.chars().count();
        if chars > TASK_TEXT_MAX_CHARS {
            return Err(TaskValidationError::TextTooLong { chars });
        }
        Ok(trimmed.to_string())
    }
}
