//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the row-level persistence contract the task store consumes.
//! - Isolate SQLite query details from store orchestration.
//!
//! # Invariants
//! - Repository reads reject invalid persisted state instead of masking it.
//! - Repository APIs report affected row counts; semantic not-found
//!   decisions belong to the store.

pub mod task_repo;
