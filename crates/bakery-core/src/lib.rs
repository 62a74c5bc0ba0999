//! Core workflow engine for the bakery operations system.
//!
//! This module provides the order lifecycle logic: the transition policy
//! and executor, the derived read-side views, the intake/kitchen/delivery
//! handlers that the pages drive, the baking task board, and the engine
//! that ties them together with an event bus and the periodic task sync.

/// Engine orchestration and the event bus.
pub mod engine;
/// Workflow handlers for intake, kitchen, and delivery actions.
pub mod handlers;
/// Order status policy, executor, and derived views.
pub mod state;
/// Baking task board and the periodic order-to-task sync.
pub mod tasks;
/// Utility functions shared across the engine.
pub mod utils;

pub use engine::{EngineError, ShopEngine};
pub use state::{OrderStateError, OrderStateMachine};
