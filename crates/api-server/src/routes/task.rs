//! Task API endpoints
//!
//! RESTful API for task CRUD operations.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use todo_core::task::{NewTask, Task, TaskUpdate};
use todo_core::Error;

use crate::state::AppState;

const TASK_NOT_FOUND: &str = "Task not found";

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Full replacement of a task's mutable fields; absent fields fall back
/// to empty strings and `false`.
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

fn not_found() -> ApiError {
    api_error(StatusCode::NOT_FOUND, TASK_NOT_FOUND)
}

fn bad_body(rejection: JsonRejection) -> ApiError {
    api_error(StatusCode::BAD_REQUEST, rejection.body_text())
}

fn store_error(err: Error) -> ApiError {
    match err {
        Error::InvalidInput(msg) => api_error(StatusCode::BAD_REQUEST, msg),
        other => {
            tracing::error!("Task store failure: {}", other);
            api_error(StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
        }
    }
}

/// Ids are positive integers; any other path segment names no task.
fn parse_task_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(not_found)
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/tasks - List all tasks, newest first
async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = state.task_store().list().await.map_err(store_error)?;
    Ok(Json(tasks))
}

/// GET /api/tasks/{id} - Get a single task
async fn get_task(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Task>, ApiError> {
    let id = parse_task_id(&raw_id)?;

    match state.task_store().get(id).await.map_err(store_error)? {
        Some(task) => Ok(Json(task)),
        None => Err(not_found()),
    }
}

/// POST /api/tasks - Create a new task
async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let Json(req) = payload.map_err(bad_body)?;

    let task = NewTask::new(req.title.unwrap_or_default())
        .with_description(req.description.unwrap_or_default());
    task.validate().map_err(store_error)?;

    let created = state.task_store().create(task).await.map_err(store_error)?;
    tracing::info!(task_id = created.id, "Task created");

    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/tasks/{id} - Overwrite a task's title, description and completion flag
async fn update_task(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_task_id(&raw_id)?;
    let Json(req) = payload.map_err(bad_body)?;

    let update = TaskUpdate::new(req.title.unwrap_or_default())
        .with_description(req.description.unwrap_or_default())
        .with_completed(req.completed.unwrap_or(false));
    update.validate().map_err(store_error)?;

    if !state.task_store().update(id, update).await.map_err(store_error)? {
        return Err(not_found());
    }
    tracing::debug!(task_id = id, "Task updated");

    Ok(Json(MessageResponse {
        message: "Task updated successfully".to_string(),
    }))
}

/// DELETE /api/tasks/{id} - Delete a task
async fn delete_task(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_task_id(&raw_id)?;

    if !state.task_store().delete(id).await.map_err(store_error)? {
        return Err(not_found());
    }
    tracing::info!(task_id = id, "Task deleted");

    Ok(Json(MessageResponse {
        message: "Task deleted successfully".to_string(),
    }))
}

// ============================================================================
// Router
// ============================================================================

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route(
            "/api/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
}
