//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record used by core business logic.
//! - Own text validation so every write path shares one policy.
//!
//! # Invariants
//! - Every task is identified by a stable, strictly positive `TaskId`.
//! - Task text is validated (trimmed, non-empty, capped) before persistence.

pub mod task;
