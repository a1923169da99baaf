//! Route handlers: store operation in, rendered fragment out.
//!
//! # Responsibility
//! - Map each request to exactly one store operation.
//! - Re-render the task-list fragment after every mutation so the front
//!   end can swap it in place.
//! - Translate store errors into HTTP status codes; message wording stays
//!   here, never in core.

use crate::routes::AppState;
use askama::Template;
use axum::extract::{Form, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::warn;
use memo_core::{StoreError, Task};
use serde::Deserialize;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub tasks: Vec<Task>,
}

/// The `#task-list` fragment swapped in after every mutation.
#[derive(Template)]
#[template(path = "todos.html")]
pub struct TaskListTemplate {
    pub tasks: Vec<Task>,
}

#[derive(Debug, Deserialize)]
pub struct AddTaskForm {
    #[serde(default)]
    pub text: String,
}

/// Store error carried out of a handler, mapped to a status on the way out.
pub struct AppError(StoreError);

impl From<StoreError> for AppError {
    fn from(value: StoreError) -> Self {
        Self(value)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            StoreError::Validation(_) | StoreError::InvalidId(_) => StatusCode::BAD_REQUEST,
            StoreError::NotFound(_) => StatusCode::NOT_FOUND,
            StoreError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            warn!("event=request_failed module=server status=error error={}", self.0);
        }
        (status, self.0.to_string()).into_response()
    }
}

pub async fn index(State(state): State<AppState>) -> Result<IndexTemplate, AppError> {
    let tasks = state.store.list()?;
    Ok(IndexTemplate { tasks })
}

pub async fn list_tasks(State(state): State<AppState>) -> Result<TaskListTemplate, AppError> {
    let tasks = state.store.list()?;
    Ok(TaskListTemplate { tasks })
}

pub async fn add_task(
    State(state): State<AppState>,
    Form(form): Form<AddTaskForm>,
) -> Result<TaskListTemplate, AppError> {
    state.store.add(&form.text)?;
    let tasks = state.store.list()?;
    Ok(TaskListTemplate { tasks })
}

pub async fn toggle_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<TaskListTemplate, AppError> {
    state.store.toggle(id)?;
    let tasks = state.store.list()?;
    Ok(TaskListTemplate { tasks })
}

pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<TaskListTemplate, AppError> {
    state.store.delete(id)?;
    let tasks = state.store.list()?;
    Ok(TaskListTemplate { tasks })
}
