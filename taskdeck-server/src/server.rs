//! Task API server core: shared state, routes, and handlers.
//!
//! A small axum REST surface over [`TaskTable`]:
//!
//! | Method   | Route                          | Body                |
//! |----------|--------------------------------|---------------------|
//! | `GET`    | `/api/tasks`                   | —                   |
//! | `POST`   | `/api/tasks`                   | task draft          |
//! | `PATCH`  | `/api/tasks/{id}/status`       | `{"status": ...}`   |
//! | `PATCH`  | `/api/tasks/{id}/description`  | `{"description":…}` |
//! | `DELETE` | `/api/tasks/{id}`              | —                   |
//!
//! Unknown ids answer 404, rejected drafts 422, both with a JSON
//! `{"error": ...}` body.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch},
};
use taskdeck_proto::{DescriptionPatch, DraftError, StatusPatch, Task, TaskDraft, TaskId};
use tokio::sync::RwLock;

use crate::store::TaskTable;

/// Shared server state holding the task table.
#[derive(Default)]
pub struct ApiState {
    table: RwLock<TaskTable>,
}

impl ApiState {
    /// Creates state over an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates state over a pre-filled table.
    #[must_use]
    pub fn with_table(table: TaskTable) -> Self {
        Self {
            table: RwLock::new(table),
        }
    }
}

/// Errors a handler can answer with.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No task with the requested id.
    #[error("no task with id {0}")]
    NotFound(TaskId),

    /// The submitted draft failed validation.
    #[error(transparent)]
    InvalidDraft(#[from] DraftError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidDraft(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

/// Builds the API router over `state`.
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route("/api/tasks/{id}/status", patch(patch_status))
        .route("/api/tasks/{id}/description", patch(patch_description))
        .route("/api/tasks/{id}", axum::routing::delete(delete_task))
        .with_state(state)
}

async fn list_tasks(State(state): State<Arc<ApiState>>) -> Json<Vec<Task>> {
    let table = state.table.read().await;
    Json(table.list())
}

async fn create_task(
    State(state): State<Arc<ApiState>>,
    Json(draft): Json<TaskDraft>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let mut table = state.table.write().await;
    let task = table.create(&draft)?;
    tracing::info!(id = %task.id, title = %task.title, "task created");
    Ok((StatusCode::CREATED, Json(task)))
}

async fn patch_status(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<TaskId>,
    Json(body): Json<StatusPatch>,
) -> Result<Json<Task>, ApiError> {
    let mut table = state.table.write().await;
    let task = table
        .set_status(id, body.status)
        .ok_or(ApiError::NotFound(id))?;
    tracing::debug!(id = %id, status = %task.status, "status updated");
    Ok(Json(task))
}

async fn patch_description(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<TaskId>,
    Json(body): Json<DescriptionPatch>,
) -> Result<Json<Task>, ApiError> {
    let mut table = state.table.write().await;
    let task = table
        .set_description(id, &body.description)
        .ok_or(ApiError::NotFound(id))?;
    tracing::debug!(id = %id, "description updated");
    Ok(Json(task))
}

async fn delete_task(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<TaskId>,
) -> Result<StatusCode, ApiError> {
    let mut table = state.table.write().await;
    if table.remove(id) {
        tracing::info!(id = %id, "task removed");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(id))
    }
}

/// Starts the server on the given address and returns the bound address
/// and a join handle.
///
/// This is the primary entry point used by both `main.rs` and test code.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server(
    addr: &str,
) -> Result<(std::net::SocketAddr, tokio::task::JoinHandle<()>), std::io::Error> {
    start_server_with_state(addr, Arc::new(ApiState::new())).await
}

/// Starts the server with a pre-configured [`ApiState`].
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server_with_state(
    addr: &str,
    state: Arc<ApiState>,
) -> Result<(std::net::SocketAddr, tokio::task::JoinHandle<()>), std::io::Error> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "task server error");
        }
    });

    Ok((bound_addr, handle))
}
