//! Event types for inter-service communication.
//!
//! Events flow through an event bus allowing parts of the system to react
//! to workflow changes elsewhere, and give the engine loop a single place
//! to observe and log everything that happens to orders and tasks.

use serde::{Deserialize, Serialize};

use crate::{BakingTask, KitchenStatus, Order, OrderStatus, TaskStatus};

/// Main event type encompassing all workflow events.
///
/// Events are categorized by the workflow that produces them, allowing
/// consumers to filter and handle specific event types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ShopEvent {
	/// Events from order intake and the generic status workflow.
	Order(OrderEvent),
	/// Events from the kitchen workflow.
	Kitchen(KitchenEvent),
	/// Events from the delivery workflow.
	Delivery(DeliveryEvent),
	/// Events from the baking task board.
	Task(TaskEvent),
}

/// Events related to order intake and status changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OrderEvent {
	/// A new order has been taken in.
	Created { order: Order },
	/// An order moved to a new status.
	StatusChanged {
		order_id: String,
		previous: OrderStatus,
		new: OrderStatus,
	},
	/// Order details were revised after intake.
	Revised { order_id: String, revision: u32 },
	/// The customer left feedback.
	FeedbackRecorded { order_id: String },
	/// A label or order sheet was printed.
	Printed { order_id: String, template: String },
}

/// Events related to kitchen production.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum KitchenEvent {
	/// Production started on an order.
	ProductionStarted { order_id: String },
	/// The production stage advanced.
	StageChanged {
		order_id: String,
		stage: KitchenStatus,
	},
}

/// Events related to delivery handling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DeliveryEvent {
	/// A driver was assigned, preliminarily or not.
	DriverAssigned {
		order_id: String,
		preliminary: bool,
	},
	/// The order left the shop.
	Started { order_id: String },
	/// The driver confirmed the hand-over.
	Confirmed { order_id: String },
}

/// Events related to the baking task board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TaskEvent {
	/// The sync derived a new task from an order.
	Created { task: BakingTask },
	/// A task moved to a new status.
	StatusChanged {
		task_id: String,
		previous: TaskStatus,
		new: TaskStatus,
	},
}
