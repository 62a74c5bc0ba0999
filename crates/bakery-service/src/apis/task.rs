//! Baking task board endpoints.

use axum::{
	extract::{Path, State},
	response::Json,
};
use bakery_core::tasks::SyncReport;
use bakery_types::{BakingTask, TaskStatus};
use serde::Deserialize;
use tracing::warn;

use crate::apis::{task_error, ApiError};
use crate::server::AppState;

/// Request body for moving a task.
#[derive(Debug, Deserialize)]
pub struct TaskStatusRequest {
	pub status: TaskStatus,
}

/// Handles GET /api/tasks requests.
pub async fn list_tasks(
	State(state): State<AppState>,
) -> Result<Json<Vec<BakingTask>>, ApiError> {
	let tasks = state.engine.tasks().list_tasks().await.map_err(task_error)?;
	Ok(Json(tasks))
}

/// Handles POST /api/tasks/{id}/status requests.
pub async fn set_status(
	Path(id): Path<String>,
	State(state): State<AppState>,
	Json(request): Json<TaskStatusRequest>,
) -> Result<Json<BakingTask>, ApiError> {
	let task = state
		.engine
		.tasks()
		.transition_task(&id, request.status)
		.await
		.map_err(|e| {
			warn!("Task transition failed: {}", e);
			task_error(e)
		})?;
	Ok(Json(task))
}

/// Handles POST /api/tasks/sync requests.
///
/// Runs one board sync immediately instead of waiting for the next tick.
pub async fn sync_now(State(state): State<AppState>) -> Result<Json<SyncReport>, ApiError> {
	let report = state.engine.tasks().sync_once().await.map_err(task_error)?;
	Ok(Json(report))
}
