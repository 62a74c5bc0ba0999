//! Baking task board derived from orders.
//!
//! The board carries one task per order that needs a bake. A periodic
//! sync scans the orders and keeps the board consistent: re-running it is
//! idempotent, so a missed or doubled tick never duplicates or loses
//! tasks. Task statuses form their own small taxonomy, independent of the
//! order lifecycle.

use crate::engine::event_bus::EventBus;
use crate::state::views::derive_kitchen_status;
use crate::state::unix_now;
use crate::utils::truncate_id;
use bakery_storage::{StorageError, StorageService};
use bakery_types::{
	BakingTask, KitchenStatus, Order, OrderStatus, ShopEvent, StorageKey, TaskEvent, TaskStatus,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::instrument;

/// Errors that can occur on the task board.
#[derive(Debug, Error)]
pub enum TaskError {
	#[error("Storage error: {0}")]
	Storage(String),
	#[error("Task not found: {0}")]
	TaskNotFound(String),
	#[error("Invalid task transition from {from} to {to}")]
	InvalidTransition { from: TaskStatus, to: TaskStatus },
	#[error("Time error: {0}")]
	TimeError(String),
}

/// Checks whether a task status change is allowed.
///
/// Self-transitions are no-ops; completed and cancelled are terminal.
pub fn can_task_transition(current: TaskStatus, target: TaskStatus) -> bool {
	if current == target {
		return true;
	}
	match current {
		TaskStatus::Pending => matches!(target, TaskStatus::InProgress | TaskStatus::Cancelled),
		TaskStatus::InProgress => matches!(target, TaskStatus::Completed | TaskStatus::Cancelled),
		TaskStatus::Completed | TaskStatus::Cancelled => false,
	}
}

/// Whether an order still needs its bake.
fn needs_baking(order: &Order) -> bool {
	match order.status {
		OrderStatus::InQueue => true,
		OrderStatus::InKitchen => {
			derive_kitchen_status(order) == Some(KitchenStatus::WaitingBaker)
		},
		_ => false,
	}
}

/// Whether an order has moved past the bake.
fn baked(order: &Order) -> bool {
	match order.status {
		OrderStatus::InKitchen => {
			derive_kitchen_status(order) != Some(KitchenStatus::WaitingBaker)
		},
		OrderStatus::WaitingPhoto
		| OrderStatus::ReadyToDeliver
		| OrderStatus::InDelivery
		| OrderStatus::DeliveryConfirmed
		| OrderStatus::WaitingFeedback
		| OrderStatus::Finished
		| OrderStatus::Archived => true,
		OrderStatus::Incomplete | OrderStatus::InQueue | OrderStatus::Cancelled => false,
	}
}

/// What one sync pass changed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct SyncReport {
	pub created: usize,
	pub completed: usize,
	pub cancelled: usize,
}

impl SyncReport {
	pub fn changed(&self) -> bool {
		self.created + self.completed + self.cancelled > 0
	}
}

/// The baking task board and its order sync.
pub struct TaskBoard {
	storage: Arc<StorageService>,
	event_bus: EventBus,
}

impl TaskBoard {
	pub fn new(storage: Arc<StorageService>, event_bus: EventBus) -> Self {
		Self { storage, event_bus }
	}

	/// Gets a task by ID.
	pub async fn get_task(&self, task_id: &str) -> Result<BakingTask, TaskError> {
		self.storage
			.retrieve(StorageKey::Tasks.as_str(), task_id)
			.await
			.map_err(|e| match e {
				StorageError::NotFound => TaskError::TaskNotFound(task_id.to_string()),
				other => TaskError::Storage(other.to_string()),
			})
	}

	/// Lists every task on the board.
	pub async fn list_tasks(&self) -> Result<Vec<BakingTask>, TaskError> {
		self.storage
			.retrieve_all(StorageKey::Tasks.as_str())
			.await
			.map_err(|e| TaskError::Storage(e.to_string()))
	}

	/// Moves a task to a new status with validation.
	pub async fn transition_task(
		&self,
		task_id: &str,
		target: TaskStatus,
	) -> Result<BakingTask, TaskError> {
		let mut task = self.get_task(task_id).await?;

		if task.status == target {
			return Ok(task);
		}
		if !can_task_transition(task.status, target) {
			return Err(TaskError::InvalidTransition {
				from: task.status,
				to: target,
			});
		}

		let previous = task.status;
		task.status = target;
		task.updated_at = unix_now().map_err(|e| TaskError::TimeError(e.to_string()))?;

		self.storage
			.update(StorageKey::Tasks.as_str(), task_id, &task)
			.await
			.map_err(|e| TaskError::Storage(e.to_string()))?;

		self.event_bus
			.publish(ShopEvent::Task(TaskEvent::StatusChanged {
				task_id: task.id.clone(),
				previous,
				new: target,
			}))
			.ok();

		Ok(task)
	}

	/// Re-derives the board from the orders.
	///
	/// One task per order, keyed by the order id: orders awaiting their
	/// bake get a pending task, orders past the bake complete theirs, and
	/// cancelled orders cancel theirs. Tasks an operator already moved to
	/// a terminal status are left alone.
	#[instrument(skip_all)]
	pub async fn sync_once(&self) -> Result<SyncReport, TaskError> {
		let orders: Vec<Order> = self
			.storage
			.retrieve_all(StorageKey::Orders.as_str())
			.await
			.map_err(|e| TaskError::Storage(e.to_string()))?;

		let mut report = SyncReport::default();
		for order in orders {
			let existing = match self.get_task(&order.id).await {
				Ok(task) => Some(task),
				Err(TaskError::TaskNotFound(_)) => None,
				Err(e) => return Err(e),
			};

			match existing {
				None if needs_baking(&order) => {
					self.create_task(&order).await?;
					report.created += 1;
				},
				None => {},
				Some(task) if task.status.is_terminal() => {},
				Some(task) if order.status == OrderStatus::Cancelled => {
					self.finish_task(task, TaskStatus::Cancelled, order.status).await?;
					report.cancelled += 1;
				},
				Some(task) if baked(&order) => {
					self.finish_task(task, TaskStatus::Completed, order.status).await?;
					report.completed += 1;
				},
				Some(_) => {},
			}
		}

		if report.changed() {
			tracing::info!(
				created = report.created,
				completed = report.completed,
				cancelled = report.cancelled,
				"Task board synced"
			);
		}
		Ok(report)
	}

	async fn create_task(&self, order: &Order) -> Result<(), TaskError> {
		let now = unix_now().map_err(|e| TaskError::TimeError(e.to_string()))?;
		let task = BakingTask {
			id: order.id.clone(),
			order_id: order.id.clone(),
			description: order.description.clone(),
			due_date: order.delivery_date,
			status: TaskStatus::Pending,
			order_status: order.status,
			created_at: now,
			updated_at: now,
		};

		self.storage
			.store(StorageKey::Tasks.as_str(), &task.id, &task)
			.await
			.map_err(|e| TaskError::Storage(e.to_string()))?;

		tracing::info!(order_id = %truncate_id(&order.id), "Baking task created");
		self.event_bus
			.publish(ShopEvent::Task(TaskEvent::Created { task }))
			.ok();
		Ok(())
	}

	async fn finish_task(
		&self,
		mut task: BakingTask,
		target: TaskStatus,
		order_status: OrderStatus,
	) -> Result<(), TaskError> {
		let previous = task.status;
		task.status = target;
		task.order_status = order_status;
		task.updated_at = unix_now().map_err(|e| TaskError::TimeError(e.to_string()))?;

		let task_id = task.id.clone();
		self.storage
			.update(StorageKey::Tasks.as_str(), &task_id, &task)
			.await
			.map_err(|e| TaskError::Storage(e.to_string()))?;

		self.event_bus
			.publish(ShopEvent::Task(TaskEvent::StatusChanged {
				task_id: task.id,
				previous,
				new: target,
			}))
			.ok();
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use bakery_storage::implementations::memory::MemoryStorage;
	use bakery_types::DeliverySlot;
	use chrono::NaiveDate;

	fn board() -> (TaskBoard, Arc<StorageService>) {
		let storage = Arc::new(StorageService::new(Box::new(MemoryStorage::new())));
		(
			TaskBoard::new(storage.clone(), EventBus::new(16)),
			storage,
		)
	}

	fn sample_order(id: &str, status: OrderStatus) -> Order {
		Order {
			id: id.to_string(),
			created_at: 1,
			updated_at: 1,
			status,
			kitchen_status: None,
			customer_name: "Maja".to_string(),
			description: "Two-tier lemon".to_string(),
			notes: None,
			delivery_date: NaiveDate::from_ymd_opt(2025, 6, 14).unwrap(),
			delivery_slot: DeliverySlot::Slot1,
			delivery_assignment: None,
			revision_count: 0,
			archived_date: None,
			actual_delivery_time: None,
			customer_feedback: None,
			logs: Vec::new(),
		}
	}

	async fn store_order(storage: &StorageService, order: &Order) {
		storage
			.store(StorageKey::Orders.as_str(), &order.id, order)
			.await
			.unwrap();
	}

	#[test]
	fn task_transitions_follow_the_taxonomy() {
		assert!(can_task_transition(TaskStatus::Pending, TaskStatus::Pending));
		assert!(can_task_transition(
			TaskStatus::Pending,
			TaskStatus::InProgress
		));
		assert!(can_task_transition(
			TaskStatus::InProgress,
			TaskStatus::Completed
		));
		assert!(can_task_transition(
			TaskStatus::Pending,
			TaskStatus::Cancelled
		));
		assert!(!can_task_transition(
			TaskStatus::Pending,
			TaskStatus::Completed
		));
		assert!(!can_task_transition(
			TaskStatus::Completed,
			TaskStatus::Pending
		));
		assert!(!can_task_transition(
			TaskStatus::Cancelled,
			TaskStatus::InProgress
		));
	}

	#[tokio::test]
	async fn sync_is_idempotent() {
		let (board, storage) = board();
		store_order(&storage, &sample_order("order-1", OrderStatus::InQueue)).await;
		store_order(&storage, &sample_order("order-2", OrderStatus::Incomplete)).await;

		let report = board.sync_once().await.unwrap();
		assert_eq!(report.created, 1);

		// A second pass changes nothing
		let report = board.sync_once().await.unwrap();
		assert!(!report.changed());
		assert_eq!(board.list_tasks().await.unwrap().len(), 1);
	}

	#[tokio::test]
	async fn progressed_orders_complete_their_task() {
		let (board, storage) = board();
		let mut order = sample_order("order-1", OrderStatus::InQueue);
		store_order(&storage, &order).await;
		board.sync_once().await.unwrap();

		order.status = OrderStatus::InKitchen;
		order.kitchen_status = Some(KitchenStatus::WaitingCrumbcoat);
		store_order(&storage, &order).await;

		let report = board.sync_once().await.unwrap();
		assert_eq!(report.completed, 1);
		assert_eq!(
			board.get_task("order-1").await.unwrap().status,
			TaskStatus::Completed
		);
	}

	#[tokio::test]
	async fn cancelled_orders_cancel_their_task() {
		let (board, storage) = board();
		let mut order = sample_order("order-1", OrderStatus::InQueue);
		store_order(&storage, &order).await;
		board.sync_once().await.unwrap();

		order.status = OrderStatus::Cancelled;
		store_order(&storage, &order).await;

		let report = board.sync_once().await.unwrap();
		assert_eq!(report.cancelled, 1);
		assert_eq!(
			board.get_task("order-1").await.unwrap().status,
			TaskStatus::Cancelled
		);
	}

	#[tokio::test]
	async fn operator_moves_survive_the_sync() {
		let (board, storage) = board();
		store_order(&storage, &sample_order("order-1", OrderStatus::InQueue)).await;
		board.sync_once().await.unwrap();

		board
			.transition_task("order-1", TaskStatus::InProgress)
			.await
			.unwrap();

		let report = board.sync_once().await.unwrap();
		assert!(!report.changed());
		assert_eq!(
			board.get_task("order-1").await.unwrap().status,
			TaskStatus::InProgress
		);
	}

	#[tokio::test]
	async fn illegal_task_transition_is_rejected() {
		let (board, storage) = board();
		store_order(&storage, &sample_order("order-1", OrderStatus::InQueue)).await;
		board.sync_once().await.unwrap();

		let err = board
			.transition_task("order-1", TaskStatus::Completed)
			.await
			.unwrap_err();
		assert!(matches!(err, TaskError::InvalidTransition { .. }));
	}

	#[tokio::test]
	async fn kitchen_orders_still_waiting_for_the_baker_get_a_task() {
		let (board, storage) = board();
		let mut order = sample_order("order-1", OrderStatus::InKitchen);
		order.kitchen_status = Some(KitchenStatus::WaitingBaker);
		store_order(&storage, &order).await;

		let report = board.sync_once().await.unwrap();
		assert_eq!(report.created, 1);
	}
}
