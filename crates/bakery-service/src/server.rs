//! HTTP server for the bakery operations API.
//!
//! This module provides a minimal HTTP server infrastructure exposing the
//! order, kitchen, delivery, and task workflows to the shop pages.

use axum::{
	routing::{get, post},
	Router,
};
use bakery_config::ApiConfig;
use bakery_core::ShopEngine;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

/// Shared application state for the API server.
#[derive(Clone)]
pub struct AppState {
	/// Reference to the workflow engine for processing requests.
	pub engine: Arc<ShopEngine>,
}

/// Starts the HTTP server for the API.
///
/// This function creates and configures the HTTP server with routing,
/// middleware, and error handling for the endpoints.
pub async fn start_server(
	api_config: ApiConfig,
	engine: Arc<ShopEngine>,
) -> Result<(), Box<dyn std::error::Error>> {
	let app_state = AppState { engine };

	let app = Router::new()
		.nest(
			"/api",
			Router::new()
				.route(
					"/orders",
					post(crate::apis::order::create_order).get(crate::apis::order::list_orders),
				)
				.route(
					"/orders/{id}",
					get(crate::apis::order::get_order).patch(crate::apis::order::update_order),
				)
				.route("/orders/{id}/status", post(crate::apis::order::set_status))
				.route(
					"/orders/{id}/restore",
					post(crate::apis::order::restore_order),
				)
				.route("/orders/{id}/print", post(crate::apis::order::print_order))
				.route("/kitchen", get(crate::apis::kitchen::board))
				.route(
					"/orders/{id}/kitchen/start",
					post(crate::apis::kitchen::start_production),
				)
				.route(
					"/orders/{id}/kitchen/stage",
					post(crate::apis::kitchen::set_stage),
				)
				.route("/delivery", get(crate::apis::delivery::board))
				.route(
					"/orders/{id}/delivery/assignment",
					post(crate::apis::delivery::assign_driver),
				)
				.route(
					"/orders/{id}/delivery/start",
					post(crate::apis::delivery::start_delivery),
				)
				.route(
					"/orders/{id}/delivery/confirm",
					post(crate::apis::delivery::confirm_delivery),
				)
				.route(
					"/orders/{id}/delivery/time",
					post(crate::apis::delivery::record_delivery_time),
				)
				.route(
					"/orders/{id}/feedback",
					post(crate::apis::delivery::record_feedback),
				)
				.route("/tasks", get(crate::apis::task::list_tasks))
				.route("/tasks/{id}/status", post(crate::apis::task::set_status))
				.route("/tasks/sync", post(crate::apis::task::sync_now)),
		)
		.layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
		.with_state(app_state);

	let bind_address = format!("{}:{}", api_config.host, api_config.port);
	let listener = TcpListener::bind(&bind_address).await?;

	tracing::info!("Bakery API server starting on {}", bind_address);

	axum::serve(listener, app).await?;

	Ok(())
}
