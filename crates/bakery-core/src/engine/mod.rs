//! Core engine that ties the workflows together.
//!
//! This module contains the main ShopEngine struct which wires the state
//! machine, the workflow handlers, and the task board onto one storage
//! service and event bus, and runs the main loop: the periodic task sync
//! tick, event observation, and graceful shutdown.

pub mod event_bus;

use crate::handlers::{DeliveryHandler, IntakeHandler, KitchenHandler};
use crate::state::OrderStateMachine;
use crate::tasks::TaskBoard;
use crate::utils::truncate_id;
use bakery_config::Config;
use bakery_storage::{StorageInterface, StorageService};
use bakery_types::{DeliveryEvent, KitchenEvent, OrderEvent, ShopEvent, TaskEvent};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
	#[error("Configuration error: {0}")]
	Config(String),
	#[error("Service error: {0}")]
	Service(String),
}

/// Main engine that carries the shop's workflows.
///
/// The ShopEngine coordinates between the components:
/// - Intake: order creation and the generic status workflow
/// - Kitchen: production tracking
/// - Delivery: driver assignment and hand-over
/// - Tasks: the baking board derived from orders
/// - Storage: persists orders and tasks
pub struct ShopEngine {
	/// Service configuration.
	config: Config,
	/// Storage service for persisting state.
	storage: Arc<StorageService>,
	/// Order state machine shared by the handlers.
	state_machine: Arc<OrderStateMachine>,
	/// Intake handler.
	intake: Arc<IntakeHandler>,
	/// Kitchen handler.
	kitchen: Arc<KitchenHandler>,
	/// Delivery handler.
	delivery: Arc<DeliveryHandler>,
	/// Baking task board.
	tasks: Arc<TaskBoard>,
	/// Event bus for inter-service communication.
	event_bus: event_bus::EventBus,
}

impl ShopEngine {
	/// Creates a new engine on top of the given storage backend.
	pub fn new(config: Config, backend: Box<dyn StorageInterface>) -> Self {
		let storage = Arc::new(StorageService::new(backend));
		let event_bus = event_bus::EventBus::new(1000);
		let state_machine = Arc::new(OrderStateMachine::new(storage.clone()));

		let intake = Arc::new(IntakeHandler::new(
			state_machine.clone(),
			event_bus.clone(),
		));
		let kitchen = Arc::new(KitchenHandler::new(
			state_machine.clone(),
			event_bus.clone(),
		));
		let delivery = Arc::new(DeliveryHandler::new(
			state_machine.clone(),
			event_bus.clone(),
		));
		let tasks = Arc::new(TaskBoard::new(storage.clone(), event_bus.clone()));

		Self {
			config,
			storage,
			state_machine,
			intake,
			kitchen,
			delivery,
			tasks,
			event_bus,
		}
	}

	/// Main loop: ticks the task sync, observes events, and shuts down on
	/// ctrl-c. The first tick fires immediately so the board is consistent
	/// right after startup.
	pub async fn run(&self) -> Result<(), EngineError> {
		let mut events = self.event_bus.subscribe();
		let mut sync_tick =
			tokio::time::interval(Duration::from_secs(self.config.tasks.sync_interval_seconds));

		loop {
			tokio::select! {
				_ = sync_tick.tick() => {
					if let Err(e) = self.tasks.sync_once().await {
						tracing::error!(error = %e, "Task sync failed");
					}
				}

				Ok(event) = events.recv() => {
					self.observe(event);
				}

				_ = tokio::signal::ctrl_c() => {
					tracing::info!("Shutting down engine");
					break;
				}
			}
		}

		Ok(())
	}

	/// Logs workflow events as they happen.
	fn observe(&self, event: ShopEvent) {
		match event {
			ShopEvent::Order(OrderEvent::Created { order }) => {
				tracing::info!(order_id = %truncate_id(&order.id), status = %order.status, "Order taken in");
			},
			ShopEvent::Order(OrderEvent::StatusChanged {
				order_id,
				previous,
				new,
			}) => {
				tracing::info!(order_id = %truncate_id(&order_id), %previous, %new, "Order status changed");
			},
			ShopEvent::Order(OrderEvent::Revised { order_id, revision }) => {
				tracing::info!(order_id = %truncate_id(&order_id), revision, "Order revised");
			},
			ShopEvent::Order(OrderEvent::FeedbackRecorded { order_id }) => {
				tracing::info!(order_id = %truncate_id(&order_id), "Feedback recorded");
			},
			ShopEvent::Order(OrderEvent::Printed { order_id, template }) => {
				tracing::info!(order_id = %truncate_id(&order_id), %template, "Printed");
			},
			ShopEvent::Kitchen(KitchenEvent::ProductionStarted { order_id }) => {
				tracing::info!(order_id = %truncate_id(&order_id), "Production started");
			},
			ShopEvent::Kitchen(KitchenEvent::StageChanged { order_id, stage }) => {
				tracing::info!(order_id = %truncate_id(&order_id), %stage, "Stage changed");
			},
			ShopEvent::Delivery(DeliveryEvent::DriverAssigned {
				order_id,
				preliminary,
			}) => {
				tracing::info!(order_id = %truncate_id(&order_id), preliminary, "Driver assigned");
			},
			ShopEvent::Delivery(DeliveryEvent::Started { order_id }) => {
				tracing::info!(order_id = %truncate_id(&order_id), "Delivery started");
			},
			ShopEvent::Delivery(DeliveryEvent::Confirmed { order_id }) => {
				tracing::info!(order_id = %truncate_id(&order_id), "Delivery confirmed");
			},
			ShopEvent::Task(TaskEvent::Created { task }) => {
				tracing::info!(task_id = %truncate_id(&task.id), "Task created");
			},
			ShopEvent::Task(TaskEvent::StatusChanged {
				task_id,
				previous,
				new,
			}) => {
				tracing::info!(task_id = %truncate_id(&task_id), %previous, %new, "Task status changed");
			},
		}
	}

	/// Returns a reference to the configuration.
	pub fn config(&self) -> &Config {
		&self.config
	}

	/// Returns a reference to the storage service.
	pub fn storage(&self) -> &Arc<StorageService> {
		&self.storage
	}

	/// Returns a reference to the order state machine.
	pub fn state_machine(&self) -> &Arc<OrderStateMachine> {
		&self.state_machine
	}

	/// Returns a reference to the intake handler.
	pub fn intake(&self) -> &Arc<IntakeHandler> {
		&self.intake
	}

	/// Returns a reference to the kitchen handler.
	pub fn kitchen(&self) -> &Arc<KitchenHandler> {
		&self.kitchen
	}

	/// Returns a reference to the delivery handler.
	pub fn delivery(&self) -> &Arc<DeliveryHandler> {
		&self.delivery
	}

	/// Returns a reference to the baking task board.
	pub fn tasks(&self) -> &Arc<TaskBoard> {
		&self.tasks
	}

	/// Returns a reference to the event bus.
	pub fn event_bus(&self) -> &event_bus::EventBus {
		&self.event_bus
	}
}
