//! Kitchen endpoints: the production board and stage tracking.

use axum::{
	extract::{Path, State},
	response::Json,
};
use bakery_types::{KitchenStatus, Order};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::apis::{order_error, ApiError};
use crate::server::AppState;

/// One row on the kitchen board.
#[derive(Debug, Clone, Serialize)]
pub struct KitchenBoardEntry {
	#[serde(flatten)]
	pub order: Order,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub kitchen_stage: Option<KitchenStatus>,
}

/// Request body for setting the production stage.
#[derive(Debug, Deserialize)]
pub struct StageRequest {
	pub stage: KitchenStatus,
	#[serde(default)]
	pub user: Option<String>,
}

/// Handles GET /api/kitchen requests.
pub async fn board(
	State(state): State<AppState>,
) -> Result<Json<Vec<KitchenBoardEntry>>, ApiError> {
	let entries = state.engine.kitchen().board().await.map_err(order_error)?;
	Ok(Json(
		entries
			.into_iter()
			.map(|(order, kitchen_stage)| KitchenBoardEntry {
				order,
				kitchen_stage,
			})
			.collect(),
	))
}

/// Handles POST /api/orders/{id}/kitchen/start requests.
pub async fn start_production(
	Path(id): Path<String>,
	State(state): State<AppState>,
) -> Result<Json<Order>, ApiError> {
	let order = state
		.engine
		.kitchen()
		.start_production(&id, None)
		.await
		.map_err(|e| {
			warn!("Production start failed: {}", e);
			order_error(e)
		})?;
	Ok(Json(order))
}

/// Handles POST /api/orders/{id}/kitchen/stage requests.
pub async fn set_stage(
	Path(id): Path<String>,
	State(state): State<AppState>,
	Json(request): Json<StageRequest>,
) -> Result<Json<Order>, ApiError> {
	let order = state
		.engine
		.kitchen()
		.set_stage(&id, request.stage, request.user.as_deref())
		.await
		.map_err(|e| {
			warn!("Stage change failed: {}", e);
			order_error(e)
		})?;
	Ok(Json(order))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn stage_request_accepts_wire_stages() {
		let request: StageRequest =
			serde_json::from_str(r#"{"stage": "done-waiting-approval"}"#).unwrap();
		assert_eq!(request.stage, KitchenStatus::DoneWaitingApproval);
	}
}
