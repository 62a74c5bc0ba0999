//! HTTP endpoint implementations.
//!
//! Each submodule covers one page of the shop: orders, kitchen, delivery,
//! and the baking task board. Errors from the workflow layer are mapped
//! to status codes and a JSON payload the pages can show as a toast; a
//! rejected action never changes any state.

pub mod delivery;
pub mod kitchen;
pub mod order;
pub mod task;

use axum::http::StatusCode;
use axum::response::Json;
use bakery_core::tasks::TaskError;
use bakery_core::OrderStateError;
use bakery_types::ErrorResponse;

/// Error shape returned by every endpoint.
pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Maps a workflow error onto a status code and response payload.
///
/// Policy violations carry the redirect hint as structured details so the
/// page can point the operator at the right workflow.
pub(crate) fn order_error(e: OrderStateError) -> ApiError {
	let (status_code, error_code) = match &e {
		OrderStateError::OrderNotFound(_) => (StatusCode::NOT_FOUND, "ORDER_NOT_FOUND"),
		OrderStateError::InvalidTransition { .. } => (StatusCode::CONFLICT, "INVALID_TRANSITION"),
		OrderStateError::NotInKitchen { .. } => (StatusCode::CONFLICT, "NOT_IN_KITCHEN"),
		OrderStateError::MissingAssignment(_) => (StatusCode::CONFLICT, "MISSING_ASSIGNMENT"),
		OrderStateError::AssignmentLocked { .. } => (StatusCode::CONFLICT, "ASSIGNMENT_LOCKED"),
		OrderStateError::LockedForEditing { .. } => (StatusCode::CONFLICT, "ORDER_LOCKED"),
		OrderStateError::Storage(_) | OrderStateError::TimeError(_) => {
			(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
		},
	};

	let details = match &e {
		OrderStateError::InvalidTransition {
			hint: Some(hint), ..
		}
		| OrderStateError::LockedForEditing {
			hint: Some(hint), ..
		} => Some(serde_json::json!({ "hint": hint })),
		_ => None,
	};

	(
		status_code,
		Json(ErrorResponse {
			error: error_code.to_string(),
			message: e.to_string(),
			details,
		}),
	)
}

/// Maps a task board error onto a status code and response payload.
pub(crate) fn task_error(e: TaskError) -> ApiError {
	let (status_code, error_code) = match &e {
		TaskError::TaskNotFound(_) => (StatusCode::NOT_FOUND, "TASK_NOT_FOUND"),
		TaskError::InvalidTransition { .. } => (StatusCode::CONFLICT, "INVALID_TRANSITION"),
		TaskError::Storage(_) | TaskError::TimeError(_) => {
			(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
		},
	};

	(
		status_code,
		Json(ErrorResponse {
			error: error_code.to_string(),
			message: e.to_string(),
			details: None,
		}),
	)
}
