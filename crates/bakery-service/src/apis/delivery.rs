//! Delivery endpoints: driver assignment, the delivery board, hand-over,
//! and feedback.

use axum::{
	extract::{Path, State},
	response::Json,
};
use bakery_core::state::views::TimeStatus;
use bakery_types::{AssignmentRequest, Order};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::apis::{order_error, ApiError};
use crate::server::AppState;

/// One row on the delivery board.
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryBoardEntry {
	#[serde(flatten)]
	pub order: Order,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub time_status: Option<TimeStatus>,
}

/// Request body for assigning or confirming a driver.
#[derive(Debug, Deserialize)]
pub struct DriverRequest {
	#[serde(flatten)]
	pub assignment: AssignmentRequest,
	#[serde(default)]
	pub user: Option<String>,
}

/// Request body for recording customer feedback.
#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
	pub feedback: String,
	#[serde(default)]
	pub user: Option<String>,
}

/// Request body for recording the actual hand-over time.
#[derive(Debug, Deserialize)]
pub struct DeliveryTimeRequest {
	/// Unix seconds; the current time when absent.
	#[serde(default)]
	pub timestamp: Option<u64>,
	#[serde(default)]
	pub user: Option<String>,
}

/// Handles GET /api/delivery requests.
pub async fn board(
	State(state): State<AppState>,
) -> Result<Json<Vec<DeliveryBoardEntry>>, ApiError> {
	let now = chrono::Local::now().naive_local();
	let entries = state
		.engine
		.delivery()
		.board(now)
		.await
		.map_err(order_error)?;
	Ok(Json(
		entries
			.into_iter()
			.map(|(order, time_status)| DeliveryBoardEntry { order, time_status })
			.collect(),
	))
}

/// Handles POST /api/orders/{id}/delivery/assignment requests.
pub async fn assign_driver(
	Path(id): Path<String>,
	State(state): State<AppState>,
	Json(request): Json<DriverRequest>,
) -> Result<Json<Order>, ApiError> {
	let order = state
		.engine
		.delivery()
		.assign_driver(&id, request.assignment, request.user.as_deref())
		.await
		.map_err(|e| {
			warn!("Driver assignment failed: {}", e);
			order_error(e)
		})?;
	Ok(Json(order))
}

/// Handles POST /api/orders/{id}/delivery/start requests.
pub async fn start_delivery(
	Path(id): Path<String>,
	State(state): State<AppState>,
) -> Result<Json<Order>, ApiError> {
	let order = state
		.engine
		.delivery()
		.start_delivery(&id, None)
		.await
		.map_err(|e| {
			warn!("Delivery start failed: {}", e);
			order_error(e)
		})?;
	Ok(Json(order))
}

/// Handles POST /api/orders/{id}/delivery/confirm requests.
pub async fn confirm_delivery(
	Path(id): Path<String>,
	State(state): State<AppState>,
) -> Result<Json<Order>, ApiError> {
	let order = state
		.engine
		.delivery()
		.confirm_delivery(&id, None)
		.await
		.map_err(|e| {
			warn!("Delivery confirmation failed: {}", e);
			order_error(e)
		})?;
	Ok(Json(order))
}

/// Handles POST /api/orders/{id}/delivery/time requests.
pub async fn record_delivery_time(
	Path(id): Path<String>,
	State(state): State<AppState>,
	Json(request): Json<DeliveryTimeRequest>,
) -> Result<Json<Order>, ApiError> {
	let order = state
		.engine
		.delivery()
		.record_delivery_time(&id, request.timestamp, request.user.as_deref())
		.await
		.map_err(|e| {
			warn!("Recording delivery time failed: {}", e);
			order_error(e)
		})?;
	Ok(Json(order))
}

/// Handles POST /api/orders/{id}/feedback requests.
pub async fn record_feedback(
	Path(id): Path<String>,
	State(state): State<AppState>,
	Json(request): Json<FeedbackRequest>,
) -> Result<Json<Order>, ApiError> {
	let order = state
		.engine
		.delivery()
		.record_feedback(&id, request.feedback, request.user.as_deref())
		.await
		.map_err(|e| {
			warn!("Recording feedback failed: {}", e);
			order_error(e)
		})?;
	Ok(Json(order))
}
