//! HTTP transport for the memo task list.
//!
//! Thin plumbing over `memo_core`: each route invokes one store operation
//! and re-renders the task-list fragment for hypermedia partial swaps. All
//! business invariants live in the core crate.

pub mod config;
pub mod handlers;
pub mod routes;

pub use config::ServerConfig;
pub use routes::{build_router, AppState};
