//! Intake handler for order creation and the generic status workflow.
//!
//! Covers what the orders page does: taking new orders in (as a draft or
//! straight into the queue), revising details, the generic status
//! dropdown, cancellation, restoring from the archive, and print logging.

use crate::engine::event_bus::EventBus;
use crate::state::{unix_now, OrderStateError, OrderStateMachine};
use crate::utils::truncate_id;
use bakery_types::{NewOrder, Order, OrderDetails, OrderEvent, OrderStatus, ShopEvent};
use std::sync::Arc;
use tracing::instrument;

/// Handler for order intake and generic status changes.
pub struct IntakeHandler {
	state_machine: Arc<OrderStateMachine>,
	event_bus: EventBus,
}

impl IntakeHandler {
	pub fn new(state_machine: Arc<OrderStateMachine>, event_bus: EventBus) -> Self {
		Self {
			state_machine,
			event_bus,
		}
	}

	/// Takes a new order in.
	///
	/// A submitted order lands in the queue; otherwise it stays an
	/// editable draft.
	#[instrument(skip_all, fields(customer = %request.customer_name))]
	pub async fn create_order(&self, request: NewOrder) -> Result<Order, OrderStateError> {
		let now = unix_now()?;
		let order = Order {
			id: uuid::Uuid::new_v4().to_string(),
			created_at: now,
			updated_at: now,
			status: if request.submit {
				OrderStatus::InQueue
			} else {
				OrderStatus::Incomplete
			},
			kitchen_status: None,
			customer_name: request.customer_name,
			description: request.description,
			notes: request.notes,
			delivery_date: request.delivery_date,
			delivery_slot: request.delivery_slot,
			delivery_assignment: None,
			revision_count: 0,
			archived_date: None,
			actual_delivery_time: None,
			customer_feedback: None,
			logs: Vec::new(),
		};

		self.state_machine.store_order(&order).await?;
		tracing::info!(order_id = %truncate_id(&order.id), status = %order.status, "Order created");

		self.event_bus
			.publish(ShopEvent::Order(OrderEvent::Created {
				order: order.clone(),
			}))
			.ok();

		Ok(order)
	}

	/// Moves an order to a new status via the generic dropdown.
	#[instrument(skip_all, fields(order_id = %truncate_id(order_id), target = %target))]
	pub async fn set_status(
		&self,
		order_id: &str,
		target: OrderStatus,
		user: Option<&str>,
		note: Option<String>,
	) -> Result<Order, OrderStateError> {
		let previous = self.state_machine.get_order(order_id).await?.status;
		let order = self
			.state_machine
			.transition(order_id, target, user, note)
			.await?;

		if order.status != previous {
			self.event_bus
				.publish(ShopEvent::Order(OrderEvent::StatusChanged {
					order_id: order.id.clone(),
					previous,
					new: order.status,
				}))
				.ok();
		}

		Ok(order)
	}

	/// Cancels an order; allowed from nearly everywhere.
	pub async fn cancel(
		&self,
		order_id: &str,
		user: Option<&str>,
		note: Option<String>,
	) -> Result<Order, OrderStateError> {
		self.set_status(order_id, OrderStatus::Cancelled, user, note)
			.await
	}

	/// Restores an archived order back to finished.
	pub async fn restore(
		&self,
		order_id: &str,
		user: Option<&str>,
	) -> Result<Order, OrderStateError> {
		self.set_status(order_id, OrderStatus::Finished, user, None)
			.await
	}

	/// Revises the editable details of an order.
	pub async fn update_details(
		&self,
		order_id: &str,
		details: OrderDetails,
	) -> Result<Order, OrderStateError> {
		let order = self.state_machine.update_details(order_id, details).await?;

		self.event_bus
			.publish(ShopEvent::Order(OrderEvent::Revised {
				order_id: order.id.clone(),
				revision: order.revision_count,
			}))
			.ok();

		Ok(order)
	}

	/// Logs a print of a label or order sheet.
	pub async fn record_print(
		&self,
		order_id: &str,
		template: String,
		user: Option<&str>,
	) -> Result<Order, OrderStateError> {
		let order = self
			.state_machine
			.record_print(order_id, template.clone(), user)
			.await?;

		self.event_bus
			.publish(ShopEvent::Order(OrderEvent::Printed {
				order_id: order.id.clone(),
				template,
			}))
			.ok();

		Ok(order)
	}
}
