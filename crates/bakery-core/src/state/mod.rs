//! Order state machine implementation.
//!
//! Manages order status transitions with validation, ensuring orders move
//! through the documented lifecycle, and attaches the side effects that
//! belong to specific transitions (archive date, actual delivery time,
//! kitchen stage bookkeeping, the append-only order log) atomically with
//! the status write. Illegal transitions are rejected before any
//! persistence call, so a failed attempt leaves the stored order as it was.

pub mod policy;
pub mod views;

use bakery_storage::{StorageError, StorageService};
use bakery_types::{
	AssignmentRequest, DeliveryAssignment, KitchenStatus, LogEvent, Order, OrderDetails,
	OrderLogEntry, OrderStatus, StorageKey,
};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Errors that can occur during order state management.
#[derive(Debug, Error)]
pub enum OrderStateError {
	#[error("Storage error: {0}")]
	Storage(String),
	#[error("Invalid status transition from {from} to {to}")]
	InvalidTransition {
		from: OrderStatus,
		to: OrderStatus,
		/// Advisory pointer at the page that owns the workflow, if any.
		hint: Option<&'static str>,
	},
	#[error("Order not found: {0}")]
	OrderNotFound(String),
	#[error("Order {order_id} is not in the kitchen phase (status {status})")]
	NotInKitchen {
		order_id: String,
		status: OrderStatus,
	},
	#[error("Order {0} has no driver assignment")]
	MissingAssignment(String),
	#[error("Driver assignment for order {order_id} can no longer change (status {status})")]
	AssignmentLocked {
		order_id: String,
		status: OrderStatus,
	},
	#[error("Order {order_id} is locked for editing (status {status})")]
	LockedForEditing {
		order_id: String,
		status: OrderStatus,
		hint: Option<&'static str>,
	},
	#[error("Time error: {0}")]
	TimeError(String),
}

/// Manages order state transitions and persistence.
pub struct OrderStateMachine {
	storage: Arc<StorageService>,
}

pub(crate) fn unix_now() -> Result<u64, OrderStateError> {
	SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.map(|d| d.as_secs())
		.map_err(|e| OrderStateError::TimeError(e.to_string()))
}

/// Statuses before the order has left the shop; a preliminary driver
/// assignment is only meaningful here.
fn precedes_delivery(status: OrderStatus) -> bool {
	matches!(
		status,
		OrderStatus::Incomplete
			| OrderStatus::InQueue
			| OrderStatus::InKitchen
			| OrderStatus::WaitingPhoto
			| OrderStatus::ReadyToDeliver
	)
}

/// Appends one entry to the order log.
fn append_log(order: &mut Order, now: u64, event: LogEvent, user: Option<&str>) {
	order.logs.push(OrderLogEntry {
		id: uuid::Uuid::new_v4().to_string(),
		timestamp: now,
		event,
		note: None,
		user: user.map(str::to_string),
	});
}

/// Moves the order to `target` and attaches the transition's side effects.
///
/// Does not consult the policy; callers validate first. The kitchen stage
/// is cleared whenever the order leaves the kitchen phase so contradictory
/// combinations never persist.
fn apply_status(order: &mut Order, target: OrderStatus, now: u64, user: Option<&str>) {
	let previous = order.status;
	order.status = target;

	if !matches!(target, OrderStatus::InKitchen | OrderStatus::WaitingPhoto) {
		order.kitchen_status = None;
	}

	match target {
		OrderStatus::Archived => {
			order.archived_date = Some(now);
		},
		OrderStatus::WaitingFeedback => {
			if order.actual_delivery_time.is_none() {
				order.actual_delivery_time = Some(now);
			}
		},
		_ => {},
	}

	append_log(
		order,
		now,
		LogEvent::StatusChange {
			previous_status: previous,
			new_status: target,
		},
		user,
	);
}

/// Finishes a delivered order once both feedback and the actual delivery
/// time are present.
///
/// Evaluated synchronously inside the same update that set either field,
/// so the finish cannot be lost to the operator navigating away.
fn maybe_auto_finish(order: &mut Order, now: u64, user: Option<&str>) {
	let has_feedback = order
		.customer_feedback
		.as_deref()
		.is_some_and(|f| !f.is_empty());
	if order.status == OrderStatus::WaitingFeedback
		&& has_feedback
		&& order.actual_delivery_time.is_some()
	{
		apply_status(order, OrderStatus::Finished, now, user);
	}
}

impl OrderStateMachine {
	pub fn new(storage: Arc<StorageService>) -> Self {
		Self { storage }
	}

	/// Gets an order by ID.
	pub async fn get_order(&self, order_id: &str) -> Result<Order, OrderStateError> {
		self.storage
			.retrieve(StorageKey::Orders.as_str(), order_id)
			.await
			.map_err(|e| match e {
				StorageError::NotFound => OrderStateError::OrderNotFound(order_id.to_string()),
				other => OrderStateError::Storage(other.to_string()),
			})
	}

	/// Stores a new order.
	pub async fn store_order(&self, order: &Order) -> Result<(), OrderStateError> {
		self.storage
			.store(StorageKey::Orders.as_str(), &order.id, order)
			.await
			.map_err(|e| OrderStateError::Storage(e.to_string()))
	}

	/// Lists every stored order.
	pub async fn list_orders(&self) -> Result<Vec<Order>, OrderStateError> {
		self.storage
			.retrieve_all(StorageKey::Orders.as_str())
			.await
			.map_err(|e| OrderStateError::Storage(e.to_string()))
	}

	/// Updates an order with a closure and persists it.
	pub async fn update_order_with<F>(
		&self,
		order_id: &str,
		updater: F,
	) -> Result<Order, OrderStateError>
	where
		F: FnOnce(&mut Order),
	{
		let mut order = self.get_order(order_id).await?;

		// Apply the update
		updater(&mut order);

		// Automatically set updated_at timestamp
		order.updated_at = unix_now()?;

		self.storage
			.update(StorageKey::Orders.as_str(), order_id, &order)
			.await
			.map_err(|e| OrderStateError::Storage(e.to_string()))?;

		Ok(order)
	}

	/// Transitions an order to a new status with validation.
	///
	/// This is the generic dropdown path: a self-transition short-circuits
	/// without side effects, and anything the policy denies is rejected
	/// before storage is touched.
	pub async fn transition(
		&self,
		order_id: &str,
		target: OrderStatus,
		user: Option<&str>,
		note: Option<String>,
	) -> Result<Order, OrderStateError> {
		let order = self.get_order(order_id).await?;

		if order.status == target {
			return Ok(order);
		}

		if !policy::can_transition(order.status, target) {
			return Err(OrderStateError::InvalidTransition {
				from: order.status,
				to: target,
				hint: policy::redirect_hint(order.status),
			});
		}

		let now = unix_now()?;
		self.update_order_with(order_id, |o| {
			apply_status(o, target, now, user);
			if let Some(note) = note {
				if let Some(entry) = o.logs.last_mut() {
					entry.note = Some(note);
				}
			}
		})
		.await
	}

	/// Starts production on a queued order.
	///
	/// Moves the order into the kitchen and opens the stage tracking at
	/// the baker.
	pub async fn start_production(
		&self,
		order_id: &str,
		user: Option<&str>,
	) -> Result<Order, OrderStateError> {
		let order = self.get_order(order_id).await?;

		if order.status != OrderStatus::InQueue {
			return Err(OrderStateError::InvalidTransition {
				from: order.status,
				to: OrderStatus::InKitchen,
				hint: policy::redirect_hint(order.status),
			});
		}

		let now = unix_now()?;
		self.update_order_with(order_id, |o| {
			apply_status(o, OrderStatus::InKitchen, now, user);
			o.kitchen_status = Some(KitchenStatus::WaitingBaker);
			append_log(
				o,
				now,
				LogEvent::KitchenStatusChange {
					previous_stage: None,
					new_stage: KitchenStatus::WaitingBaker,
				},
				user,
			);
		})
		.await
	}

	/// Sets the kitchen stage of an order in production.
	///
	/// The stage maps forward into the order status: approval readiness
	/// moves the order on to `waiting-photo`. Moving a stage backwards out
	/// of `waiting-photo` is denied like any other backwards transition.
	pub async fn set_kitchen_status(
		&self,
		order_id: &str,
		stage: KitchenStatus,
		user: Option<&str>,
	) -> Result<Order, OrderStateError> {
		let order = self.get_order(order_id).await?;

		if !matches!(
			order.status,
			OrderStatus::InKitchen | OrderStatus::WaitingPhoto
		) {
			return Err(OrderStateError::NotInKitchen {
				order_id: order_id.to_string(),
				status: order.status,
			});
		}

		if order.kitchen_status == Some(stage) {
			return Ok(order);
		}

		let mapped = policy::kitchen_to_order_status(stage);
		if mapped != order.status && !policy::can_transition(order.status, mapped) {
			return Err(OrderStateError::InvalidTransition {
				from: order.status,
				to: mapped,
				hint: policy::redirect_hint(order.status),
			});
		}

		let now = unix_now()?;
		let previous_stage = order.kitchen_status;
		let status = order.status;
		self.update_order_with(order_id, |o| {
			if mapped != status {
				apply_status(o, mapped, now, user);
			}
			o.kitchen_status = Some(stage);
			append_log(
				o,
				now,
				LogEvent::KitchenStatusChange {
					previous_stage,
					new_stage: stage,
				},
				user,
			);
		})
		.await
	}

	/// Creates, revises, or confirms the driver assignment of an order.
	///
	/// Assignments can only change before the order leaves the shop, and a
	/// preliminary assignment is only a plan made during that window.
	pub async fn assign_driver(
		&self,
		order_id: &str,
		request: AssignmentRequest,
		user: Option<&str>,
	) -> Result<Order, OrderStateError> {
		let order = self.get_order(order_id).await?;

		if !precedes_delivery(order.status) {
			return Err(OrderStateError::AssignmentLocked {
				order_id: order_id.to_string(),
				status: order.status,
			});
		}

		let now = unix_now()?;
		self.update_order_with(order_id, |o| {
			o.delivery_assignment = Some(DeliveryAssignment {
				driver_type: request.driver_type,
				driver_name: request.driver_name,
				notes: request.notes,
				is_preliminary: request.preliminary,
				assigned_at: now,
			});
			append_log(
				o,
				now,
				LogEvent::DeliveryUpdate {
					driver_type: request.driver_type,
					preliminary: request.preliminary,
				},
				user,
			);
		})
		.await
	}

	/// Starts the delivery of a ready order.
	///
	/// This is the dedicated workflow edge out of `ready-to-deliver`: it
	/// requires a driver assignment and confirms a preliminary one before
	/// the order goes on the road.
	pub async fn start_delivery(
		&self,
		order_id: &str,
		user: Option<&str>,
	) -> Result<Order, OrderStateError> {
		let order = self.get_order(order_id).await?;

		if order.status != OrderStatus::ReadyToDeliver {
			return Err(OrderStateError::InvalidTransition {
				from: order.status,
				to: OrderStatus::InDelivery,
				hint: policy::redirect_hint(order.status),
			});
		}

		let Some(assignment) = order.delivery_assignment.as_ref() else {
			return Err(OrderStateError::MissingAssignment(order_id.to_string()));
		};
		let confirm = assignment.is_preliminary;
		let driver_type = assignment.driver_type;

		let now = unix_now()?;
		self.update_order_with(order_id, |o| {
			if confirm {
				if let Some(assignment) = o.delivery_assignment.as_mut() {
					assignment.is_preliminary = false;
				}
				append_log(
					o,
					now,
					LogEvent::DeliveryUpdate {
						driver_type,
						preliminary: false,
					},
					user,
				);
			}
			apply_status(o, OrderStatus::InDelivery, now, user);
		})
		.await
	}

	/// Records the driver's hand-over confirmation.
	pub async fn confirm_delivery(
		&self,
		order_id: &str,
		user: Option<&str>,
	) -> Result<Order, OrderStateError> {
		self.transition(order_id, OrderStatus::DeliveryConfirmed, user, None)
			.await
	}

	/// Records customer feedback.
	///
	/// A delivered order finishes automatically once both the feedback and
	/// the actual delivery time are present.
	pub async fn record_feedback(
		&self,
		order_id: &str,
		feedback: String,
		user: Option<&str>,
	) -> Result<Order, OrderStateError> {
		let now = unix_now()?;
		self.update_order_with(order_id, |o| {
			o.customer_feedback = Some(feedback);
			maybe_auto_finish(o, now, user);
		})
		.await
	}

	/// Records when the order was actually handed over.
	pub async fn record_delivery_time(
		&self,
		order_id: &str,
		timestamp: Option<u64>,
		user: Option<&str>,
	) -> Result<Order, OrderStateError> {
		let now = unix_now()?;
		self.update_order_with(order_id, |o| {
			o.actual_delivery_time = Some(timestamp.unwrap_or(now));
			maybe_auto_finish(o, now, user);
		})
		.await
	}

	/// Records that a label or order sheet was printed.
	pub async fn record_print(
		&self,
		order_id: &str,
		template: String,
		user: Option<&str>,
	) -> Result<Order, OrderStateError> {
		let now = unix_now()?;
		self.update_order_with(order_id, |o| {
			append_log(o, now, LogEvent::Printed { template }, user);
		})
		.await
	}

	/// Revises the editable order details.
	///
	/// Orders in a workflow-owned status are locked against edits; every
	/// accepted revision bumps the revision counter.
	pub async fn update_details(
		&self,
		order_id: &str,
		details: OrderDetails,
	) -> Result<Order, OrderStateError> {
		let order = self.get_order(order_id).await?;

		if policy::is_locked(order.status) {
			return Err(OrderStateError::LockedForEditing {
				order_id: order_id.to_string(),
				status: order.status,
				hint: policy::redirect_hint(order.status),
			});
		}

		self.update_order_with(order_id, |o| {
			if let Some(customer_name) = details.customer_name {
				o.customer_name = customer_name;
			}
			if let Some(description) = details.description {
				o.description = description;
			}
			if let Some(notes) = details.notes {
				o.notes = Some(notes);
			}
			if let Some(delivery_date) = details.delivery_date {
				o.delivery_date = delivery_date;
			}
			if let Some(delivery_slot) = details.delivery_slot {
				o.delivery_slot = delivery_slot;
			}
			o.revision_count += 1;
		})
		.await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use bakery_storage::implementations::memory::MemoryStorage;
	use bakery_types::{DeliverySlot, DriverType};
	use chrono::NaiveDate;

	fn machine() -> OrderStateMachine {
		OrderStateMachine::new(Arc::new(StorageService::new(Box::new(
			MemoryStorage::new(),
		))))
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

	async fn seeded(status: OrderStatus) -> (OrderStateMachine, String) {
		let machine = machine();
		let order = sample_order("order-1", status);
		machine.store_order(&order).await.unwrap();
		(machine, order.id)
	}

	fn assignment(preliminary: bool) -> AssignmentRequest {
		AssignmentRequest {
			driver_type: DriverType::Staff,
			driver_name: Some("Jonas".to_string()),
			notes: None,
			preliminary,
		}
	}

	#[tokio::test]
	async fn rejected_transition_leaves_the_order_untouched() {
		let (machine, id) = seeded(OrderStatus::InQueue).await;

		let err = machine
			.transition(&id, OrderStatus::WaitingPhoto, None, None)
			.await
			.unwrap_err();
		assert!(matches!(
			err,
			OrderStateError::InvalidTransition {
				from: OrderStatus::InQueue,
				to: OrderStatus::WaitingPhoto,
				hint: None,
			}
		));

		let stored = machine.get_order(&id).await.unwrap();
		assert_eq!(stored.status, OrderStatus::InQueue);
		assert!(stored.logs.is_empty());
	}

	#[tokio::test]
	async fn self_transition_is_a_silent_no_op() {
		let (machine, id) = seeded(OrderStatus::InQueue).await;

		let order = machine
			.transition(&id, OrderStatus::InQueue, None, None)
			.await
			.unwrap();
		assert!(order.logs.is_empty());

		let stored = machine.get_order(&id).await.unwrap();
		assert_eq!(stored.updated_at, 1);
		assert!(stored.logs.is_empty());
	}

	#[tokio::test]
	async fn transition_appends_one_log_entry() {
		let (machine, id) = seeded(OrderStatus::Incomplete).await;

		let order = machine
			.transition(&id, OrderStatus::InQueue, Some("vera"), None)
			.await
			.unwrap();
		assert_eq!(order.logs.len(), 1);
		assert_eq!(
			order.logs[0].event,
			LogEvent::StatusChange {
				previous_status: OrderStatus::Incomplete,
				new_status: OrderStatus::InQueue,
			}
		);
		assert_eq!(order.logs[0].user.as_deref(), Some("vera"));
	}

	#[tokio::test]
	async fn archiving_stamps_the_archive_date() {
		let (machine, id) = seeded(OrderStatus::Finished).await;
		let before = unix_now().unwrap();

		let order = machine
			.transition(&id, OrderStatus::Archived, None, None)
			.await
			.unwrap();
		assert!(order.archived_date.unwrap() >= before);
	}

	#[tokio::test]
	async fn restore_returns_an_archived_order_to_finished() {
		let (machine, id) = seeded(OrderStatus::Archived).await;

		let order = machine
			.transition(&id, OrderStatus::Finished, None, None)
			.await
			.unwrap();
		assert_eq!(order.status, OrderStatus::Finished);
	}

	#[tokio::test]
	async fn waiting_feedback_stamps_delivery_time_only_once() {
		let (machine, id) = seeded(OrderStatus::DeliveryConfirmed).await;
		let before = unix_now().unwrap();

		let order = machine
			.transition(&id, OrderStatus::WaitingFeedback, None, None)
			.await
			.unwrap();
		assert!(order.actual_delivery_time.unwrap() >= before);

		// A pre-existing hand-over time survives the transition
		let (machine, id) = seeded(OrderStatus::DeliveryConfirmed).await;
		machine
			.record_delivery_time(&id, Some(42), None)
			.await
			.unwrap();
		let order = machine
			.transition(&id, OrderStatus::WaitingFeedback, None, None)
			.await
			.unwrap();
		assert_eq!(order.actual_delivery_time, Some(42));
	}

	#[tokio::test]
	async fn start_production_opens_the_stage_tracking() {
		let (machine, id) = seeded(OrderStatus::InQueue).await;

		let order = machine.start_production(&id, Some("baker")).await.unwrap();
		assert_eq!(order.status, OrderStatus::InKitchen);
		assert_eq!(order.kitchen_status, Some(KitchenStatus::WaitingBaker));
		assert_eq!(order.logs.len(), 2);
	}

	#[tokio::test]
	async fn start_production_requires_a_queued_order() {
		let (machine, id) = seeded(OrderStatus::Incomplete).await;

		let err = machine.start_production(&id, None).await.unwrap_err();
		assert!(matches!(err, OrderStateError::InvalidTransition { .. }));
	}

	#[tokio::test]
	async fn approval_stage_moves_the_order_to_waiting_photo() {
		let (machine, id) = seeded(OrderStatus::InQueue).await;
		machine.start_production(&id, None).await.unwrap();

		machine
			.set_kitchen_status(&id, KitchenStatus::Decorating, None)
			.await
			.unwrap();
		let order = machine
			.set_kitchen_status(&id, KitchenStatus::DoneWaitingApproval, None)
			.await
			.unwrap();

		assert_eq!(order.status, OrderStatus::WaitingPhoto);
		assert_eq!(
			order.kitchen_status,
			Some(KitchenStatus::DoneWaitingApproval)
		);
	}

	#[tokio::test]
	async fn stage_cannot_regress_out_of_waiting_photo() {
		let (machine, id) = seeded(OrderStatus::WaitingPhoto).await;

		let err = machine
			.set_kitchen_status(&id, KitchenStatus::Decorating, None)
			.await
			.unwrap_err();
		assert!(matches!(err, OrderStateError::InvalidTransition { .. }));
	}

	#[tokio::test]
	async fn stage_tracking_requires_the_kitchen_phase() {
		let (machine, id) = seeded(OrderStatus::Finished).await;

		let err = machine
			.set_kitchen_status(&id, KitchenStatus::Decorating, None)
			.await
			.unwrap_err();
		assert!(matches!(err, OrderStateError::NotInKitchen { .. }));
	}

	#[tokio::test]
	async fn leaving_the_kitchen_clears_the_stage() {
		let (machine, id) = seeded(OrderStatus::WaitingPhoto).await;
		machine
			.update_order_with(&id, |o| {
				o.kitchen_status = Some(KitchenStatus::DoneWaitingApproval)
			})
			.await
			.unwrap();

		let order = machine
			.transition(&id, OrderStatus::ReadyToDeliver, None, None)
			.await
			.unwrap();
		assert_eq!(order.kitchen_status, None);
	}

	#[tokio::test]
	async fn delivery_start_needs_the_delivery_workflow() {
		let (machine, id) = seeded(OrderStatus::ReadyToDeliver).await;

		let err = machine
			.transition(&id, OrderStatus::InDelivery, None, None)
			.await
			.unwrap_err();
		match err {
			OrderStateError::InvalidTransition { hint, .. } => {
				assert_eq!(hint, Some("Manage from Delivery page"));
			},
			other => panic!("unexpected error: {other:?}"),
		}
	}

	#[tokio::test]
	async fn start_delivery_confirms_a_preliminary_assignment() {
		let (machine, id) = seeded(OrderStatus::ReadyToDeliver).await;
		machine
			.assign_driver(&id, assignment(true), None)
			.await
			.unwrap();

		let order = machine.start_delivery(&id, None).await.unwrap();
		assert_eq!(order.status, OrderStatus::InDelivery);
		assert!(!order.delivery_assignment.unwrap().is_preliminary);
	}

	#[tokio::test]
	async fn start_delivery_requires_an_assignment() {
		let (machine, id) = seeded(OrderStatus::ReadyToDeliver).await;

		let err = machine.start_delivery(&id, None).await.unwrap_err();
		assert!(matches!(err, OrderStateError::MissingAssignment(_)));
	}

	#[tokio::test]
	async fn assignments_lock_once_the_order_is_on_the_road() {
		let (machine, id) = seeded(OrderStatus::InDelivery).await;

		let err = machine
			.assign_driver(&id, assignment(true), None)
			.await
			.unwrap_err();
		assert!(matches!(err, OrderStateError::AssignmentLocked { .. }));
	}

	#[tokio::test]
	async fn auto_finish_waits_for_both_feedback_and_delivery_time() {
		let (machine, id) = seeded(OrderStatus::WaitingFeedback).await;

		// Empty feedback and no hand-over time: nothing happens
		let order = machine
			.record_feedback(&id, String::new(), None)
			.await
			.unwrap();
		assert_eq!(order.status, OrderStatus::WaitingFeedback);

		let order = machine
			.record_delivery_time(&id, None, None)
			.await
			.unwrap();
		assert_eq!(order.status, OrderStatus::WaitingFeedback);

		let order = machine
			.record_feedback(&id, "Great cake!".to_string(), None)
			.await
			.unwrap();
		assert_eq!(order.status, OrderStatus::Finished);
	}

	#[tokio::test]
	async fn feedback_outside_waiting_feedback_does_not_finish() {
		let (machine, id) = seeded(OrderStatus::InDelivery).await;

		machine
			.record_delivery_time(&id, Some(42), None)
			.await
			.unwrap();
		let order = machine
			.record_feedback(&id, "Lovely".to_string(), None)
			.await
			.unwrap();
		assert_eq!(order.status, OrderStatus::InDelivery);
	}

	#[tokio::test]
	async fn detail_revisions_bump_the_counter_and_respect_locks() {
		let (machine, id) = seeded(OrderStatus::Incomplete).await;

		let order = machine
			.update_details(
				&id,
				OrderDetails {
					customer_name: None,
					description: Some("Three-tier chocolate".to_string()),
					notes: None,
					delivery_date: None,
					delivery_slot: None,
				},
			)
			.await
			.unwrap();
		assert_eq!(order.revision_count, 1);
		assert_eq!(order.description, "Three-tier chocolate");

		let (machine, id) = seeded(OrderStatus::InKitchen).await;
		let err = machine
			.update_details(
				&id,
				OrderDetails {
					customer_name: None,
					description: None,
					notes: None,
					delivery_date: None,
					delivery_slot: None,
				},
			)
			.await
			.unwrap_err();
		assert!(matches!(err, OrderStateError::LockedForEditing { .. }));
	}

	#[tokio::test]
	async fn print_is_logged_without_touching_the_status() {
		let (machine, id) = seeded(OrderStatus::ReadyToDeliver).await;

		let order = machine
			.record_print(&id, "delivery-label".to_string(), Some("vera"))
			.await
			.unwrap();
		assert_eq!(order.status, OrderStatus::ReadyToDeliver);
		assert_eq!(order.logs.len(), 1);
		assert_eq!(
			order.logs[0].event,
			LogEvent::Printed {
				template: "delivery-label".to_string()
			}
		);
	}

	#[tokio::test]
	async fn missing_orders_surface_as_not_found() {
		let machine = machine();

		let err = machine.get_order("nope").await.unwrap_err();
		assert!(matches!(err, OrderStateError::OrderNotFound(_)));
	}
}
