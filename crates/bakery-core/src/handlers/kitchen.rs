//! Kitchen handler for the production workflow.
//!
//! Covers what the kitchen page does: starting production on queued
//! orders, advancing the stage of a cake, and serving the board of
//! everything currently in production.

use crate::engine::event_bus::EventBus;
use crate::state::views::derive_kitchen_status;
use crate::state::{OrderStateError, OrderStateMachine};
use crate::utils::truncate_id;
use bakery_types::{KitchenEvent, KitchenStatus, Order, OrderEvent, OrderStatus, ShopEvent};
use std::sync::Arc;
use tracing::instrument;

/// Handler for the kitchen production workflow.
pub struct KitchenHandler {
	state_machine: Arc<OrderStateMachine>,
	event_bus: EventBus,
}

impl KitchenHandler {
	pub fn new(state_machine: Arc<OrderStateMachine>, event_bus: EventBus) -> Self {
		Self {
			state_machine,
			event_bus,
		}
	}

	/// Starts production on a queued order.
	#[instrument(skip_all, fields(order_id = %truncate_id(order_id)))]
	pub async fn start_production(
		&self,
		order_id: &str,
		user: Option<&str>,
	) -> Result<Order, OrderStateError> {
		let order = self.state_machine.start_production(order_id, user).await?;

		self.event_bus
			.publish(ShopEvent::Kitchen(KitchenEvent::ProductionStarted {
				order_id: order.id.clone(),
			}))
			.ok();
		self.event_bus
			.publish(ShopEvent::Order(OrderEvent::StatusChanged {
				order_id: order.id.clone(),
				previous: OrderStatus::InQueue,
				new: order.status,
			}))
			.ok();

		Ok(order)
	}

	/// Advances the production stage of an order.
	#[instrument(skip_all, fields(order_id = %truncate_id(order_id), stage = %stage))]
	pub async fn set_stage(
		&self,
		order_id: &str,
		stage: KitchenStatus,
		user: Option<&str>,
	) -> Result<Order, OrderStateError> {
		let previous = self.state_machine.get_order(order_id).await?.status;
		let order = self
			.state_machine
			.set_kitchen_status(order_id, stage, user)
			.await?;

		self.event_bus
			.publish(ShopEvent::Kitchen(KitchenEvent::StageChanged {
				order_id: order.id.clone(),
				stage,
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

	/// Returns every order currently in production, with the stage the
	/// board should show (stored, or derived for legacy records).
	pub async fn board(&self) -> Result<Vec<(Order, Option<KitchenStatus>)>, OrderStateError> {
		let orders = self.state_machine.list_orders().await?;

		Ok(orders
			.into_iter()
			.filter(|o| {
				matches!(
					o.status,
					OrderStatus::InQueue | OrderStatus::InKitchen | OrderStatus::WaitingPhoto
				)
			})
			.map(|o| {
				let stage = derive_kitchen_status(&o);
				(o, stage)
			})
			.collect())
	}
}
