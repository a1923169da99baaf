//! Router assembly and shared application state.

use crate::handlers::{add_task, delete_task, index, list_tasks, toggle_task};
use axum::routing::{delete, get, post, put};
use axum::Router;
use memo_core::{SqliteTaskRepository, TaskStore};
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;

/// Shared state handed to every handler.
///
/// The store serializes access internally, so handlers just clone the Arc.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<TaskStore<SqliteTaskRepository>>,
}

/// Builds the full application router.
pub fn build_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/todos", get(list_tasks))
        .route("/todos/add", post(add_task))
        .route("/todos/toggle/:id", put(toggle_task))
        .route("/todos/delete/:id", delete(delete_task))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .with_state(state)
}
