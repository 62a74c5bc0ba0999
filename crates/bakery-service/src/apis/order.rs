//! Order endpoints: intake, listing, details, and the generic status
//! workflow.

use axum::{
	extract::{Path, State},
	http::StatusCode,
	response::Json,
};
use bakery_core::state::views::{derive_kitchen_status, order_time_status, TimeStatus};
use bakery_types::{KitchenStatus, NewOrder, Order, OrderDetails, OrderStatus};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::apis::{order_error, ApiError};
use crate::server::AppState;

/// An order as the pages see it: the stored record plus the derived
/// kitchen stage and the time pressure flag.
#[derive(Debug, Clone, Serialize)]
pub struct OrderView {
	#[serde(flatten)]
	pub order: Order,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub kitchen_stage: Option<KitchenStatus>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub time_status: Option<TimeStatus>,
}

impl OrderView {
	pub(crate) fn build(order: Order) -> Self {
		let now = chrono::Local::now().naive_local();
		let kitchen_stage = derive_kitchen_status(&order);
		let time_status = order_time_status(&order, now);
		Self {
			order,
			kitchen_stage,
			time_status,
		}
	}
}

/// Request body for the generic status dropdown.
#[derive(Debug, Deserialize)]
pub struct StatusRequest {
	pub status: OrderStatus,
	#[serde(default)]
	pub user: Option<String>,
	#[serde(default)]
	pub note: Option<String>,
}

/// Request body for logging a print.
#[derive(Debug, Deserialize)]
pub struct PrintRequest {
	pub template: String,
	#[serde(default)]
	pub user: Option<String>,
}

/// Handles POST /api/orders requests.
pub async fn create_order(
	State(state): State<AppState>,
	Json(request): Json<NewOrder>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
	let order = state
		.engine
		.intake()
		.create_order(request)
		.await
		.map_err(|e| {
			warn!("Order intake failed: {}", e);
			order_error(e)
		})?;
	Ok((StatusCode::CREATED, Json(order)))
}

/// Handles GET /api/orders requests.
pub async fn list_orders(
	State(state): State<AppState>,
) -> Result<Json<Vec<OrderView>>, ApiError> {
	let orders = state
		.engine
		.state_machine()
		.list_orders()
		.await
		.map_err(order_error)?;
	Ok(Json(orders.into_iter().map(OrderView::build).collect()))
}

/// Handles GET /api/orders/{id} requests.
pub async fn get_order(
	Path(id): Path<String>,
	State(state): State<AppState>,
) -> Result<Json<OrderView>, ApiError> {
	let order = state
		.engine
		.state_machine()
		.get_order(&id)
		.await
		.map_err(order_error)?;
	Ok(Json(OrderView::build(order)))
}

/// Handles PATCH /api/orders/{id} requests.
pub async fn update_order(
	Path(id): Path<String>,
	State(state): State<AppState>,
	Json(details): Json<OrderDetails>,
) -> Result<Json<Order>, ApiError> {
	let order = state
		.engine
		.intake()
		.update_details(&id, details)
		.await
		.map_err(|e| {
			warn!("Order revision failed: {}", e);
			order_error(e)
		})?;
	Ok(Json(order))
}

/// Handles POST /api/orders/{id}/status requests.
pub async fn set_status(
	Path(id): Path<String>,
	State(state): State<AppState>,
	Json(request): Json<StatusRequest>,
) -> Result<Json<Order>, ApiError> {
	let order = state
		.engine
		.intake()
		.set_status(&id, request.status, request.user.as_deref(), request.note)
		.await
		.map_err(|e| {
			warn!("Status change failed: {}", e);
			order_error(e)
		})?;
	Ok(Json(order))
}

/// Handles POST /api/orders/{id}/restore requests.
pub async fn restore_order(
	Path(id): Path<String>,
	State(state): State<AppState>,
) -> Result<Json<Order>, ApiError> {
	let order = state
		.engine
		.intake()
		.restore(&id, None)
		.await
		.map_err(|e| {
			warn!("Restore failed: {}", e);
			order_error(e)
		})?;
	Ok(Json(order))
}

/// Handles POST /api/orders/{id}/print requests.
pub async fn print_order(
	Path(id): Path<String>,
	State(state): State<AppState>,
	Json(request): Json<PrintRequest>,
) -> Result<Json<Order>, ApiError> {
	let order = state
		.engine
		.intake()
		.record_print(&id, request.template, request.user.as_deref())
		.await
		.map_err(|e| {
			warn!("Print logging failed: {}", e);
			order_error(e)
		})?;
	Ok(Json(order))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn status_request_accepts_wire_statuses() {
		let request: StatusRequest =
			serde_json::from_str(r#"{"status": "in-queue", "user": "vera"}"#).unwrap();
		assert_eq!(request.status, OrderStatus::InQueue);
		assert_eq!(request.user.as_deref(), Some("vera"));
		assert!(request.note.is_none());
	}

	#[test]
	fn new_order_defaults_to_a_draft() {
		let request: NewOrder = serde_json::from_str(
			r#"{
				"customer_name": "Maja",
				"description": "Two-tier lemon",
				"delivery_date": "2025-06-14",
				"delivery_slot": "slot1"
			}"#,
		)
		.unwrap();
		assert!(!request.submit);
	}
}
