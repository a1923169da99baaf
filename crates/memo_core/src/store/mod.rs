//! Concurrency-safe task collection store.
//!
//! # Responsibility
//! - Orchestrate repository calls into the four task operations.
//! - Serialize all access to the shared collection.
//!
//! # Invariants
//! - Store APIs never bypass text/id validation before persistence.
//! - The store layer remains storage-agnostic: it only speaks the
//!   `TaskRepository` contract.

pub mod task_store;
