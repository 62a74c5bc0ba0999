//! Delivery handler for the driver workflow.
//!
//! Covers what the delivery page does: assigning and confirming drivers,
//! sending an order on the road, recording the hand-over, collecting
//! feedback, and serving the board of everything ready or out.

use crate::engine::event_bus::EventBus;
use crate::state::views::{order_time_status, TimeStatus};
use crate::state::{OrderStateError, OrderStateMachine};
use crate::utils::truncate_id;
use bakery_types::{AssignmentRequest, DeliveryEvent, Order, OrderEvent, OrderStatus, ShopEvent};
use chrono::NaiveDateTime;
use std::sync::Arc;
use tracing::instrument;

/// Handler for the delivery workflow.
pub struct DeliveryHandler {
	state_machine: Arc<OrderStateMachine>,
	event_bus: EventBus,
}

impl DeliveryHandler {
	pub fn new(state_machine: Arc<OrderStateMachine>, event_bus: EventBus) -> Self {
		Self {
			state_machine,
			event_bus,
		}
	}

	/// Creates, revises, or confirms the driver assignment of an order.
	#[instrument(skip_all, fields(order_id = %truncate_id(order_id)))]
	pub async fn assign_driver(
		&self,
		order_id: &str,
		request: AssignmentRequest,
		user: Option<&str>,
	) -> Result<Order, OrderStateError> {
		let preliminary = request.preliminary;
		let order = self
			.state_machine
			.assign_driver(order_id, request, user)
			.await?;

		self.event_bus
			.publish(ShopEvent::Delivery(DeliveryEvent::DriverAssigned {
				order_id: order.id.clone(),
				preliminary,
			}))
			.ok();

		Ok(order)
	}

	/// Sends a ready order on the road.
	#[instrument(skip_all, fields(order_id = %truncate_id(order_id)))]
	pub async fn start_delivery(
		&self,
		order_id: &str,
		user: Option<&str>,
	) -> Result<Order, OrderStateError> {
		let order = self.state_machine.start_delivery(order_id, user).await?;

		self.event_bus
			.publish(ShopEvent::Delivery(DeliveryEvent::Started {
				order_id: order.id.clone(),
			}))
			.ok();
		self.event_bus
			.publish(ShopEvent::Order(OrderEvent::StatusChanged {
				order_id: order.id.clone(),
				previous: OrderStatus::ReadyToDeliver,
				new: order.status,
			}))
			.ok();

		Ok(order)
	}

	/// Records the driver's hand-over confirmation.
	#[instrument(skip_all, fields(order_id = %truncate_id(order_id)))]
	pub async fn confirm_delivery(
		&self,
		order_id: &str,
		user: Option<&str>,
	) -> Result<Order, OrderStateError> {
		let previous = self.state_machine.get_order(order_id).await?.status;
		let order = self.state_machine.confirm_delivery(order_id, user).await?;

		self.event_bus
			.publish(ShopEvent::Delivery(DeliveryEvent::Confirmed {
				order_id: order.id.clone(),
			}))
			.ok();
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

	/// Records customer feedback; the order may auto-finish.
	#[instrument(skip_all, fields(order_id = %truncate_id(order_id)))]
	pub async fn record_feedback(
		&self,
		order_id: &str,
		feedback: String,
		user: Option<&str>,
	) -> Result<Order, OrderStateError> {
		let previous = self.state_machine.get_order(order_id).await?.status;
		let order = self
			.state_machine
			.record_feedback(order_id, feedback, user)
			.await?;

		self.event_bus
			.publish(ShopEvent::Order(OrderEvent::FeedbackRecorded {
				order_id: order.id.clone(),
			}))
			.ok();
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

	/// Records when the order was actually handed over.
	pub async fn record_delivery_time(
		&self,
		order_id: &str,
		timestamp: Option<u64>,
		user: Option<&str>,
	) -> Result<Order, OrderStateError> {
		let previous = self.state_machine.get_order(order_id).await?.status;
		let order = self
			.state_machine
			.record_delivery_time(order_id, timestamp, user)
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

	/// Returns every order the delivery page cares about, with its time
	/// pressure relative to `now`.
	pub async fn board(
		&self,
		now: NaiveDateTime,
	) -> Result<Vec<(Order, Option<TimeStatus>)>, OrderStateError> {
		let orders = self.state_machine.list_orders().await?;

		Ok(orders
			.into_iter()
			.filter(|o| {
				matches!(
					o.status,
					OrderStatus::ReadyToDeliver
						| OrderStatus::InDelivery
						| OrderStatus::DeliveryConfirmed
				)
			})
			.map(|o| {
				let time_status = order_time_status(&o, now);
				(o, time_status)
			})
			.collect())
	}
}
