//! Baking task types for the production board.
//!
//! Baking tasks are derived from orders by a periodic sync and carry their
//! own small status taxonomy, independent of the order lifecycle.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::OrderStatus;

/// A baking task on the production board.
///
/// Exactly one task exists per order that needs baking; the task id is
/// derived from the order id so re-running the sync never duplicates work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BakingTask {
	/// Unique identifier, derived from the order id.
	pub id: String,
	/// The order this task was derived from.
	pub order_id: String,
	/// What to bake, copied from the order description.
	pub description: String,
	/// Date the bake must be done by.
	pub due_date: NaiveDate,
	/// Current task status.
	pub status: TaskStatus,
	/// Order status observed when the task was last synced.
	pub order_status: OrderStatus,
	/// Timestamp when this task was created.
	pub created_at: u64,
	/// Timestamp when this task was last updated.
	pub updated_at: u64,
}

/// Status of a baking task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
	/// Not started.
	Pending,
	/// A baker picked it up.
	InProgress,
	/// Bake done. Terminal.
	Completed,
	/// Task cancelled, usually because the order was. Terminal.
	Cancelled,
}

impl TaskStatus {
	pub fn as_str(&self) -> &'static str {
		match self {
			TaskStatus::Pending => "pending",
			TaskStatus::InProgress => "in-progress",
			TaskStatus::Completed => "completed",
			TaskStatus::Cancelled => "cancelled",
		}
	}

	/// Whether no further transitions are possible.
	pub fn is_terminal(&self) -> bool {
		matches!(self, TaskStatus::Completed | TaskStatus::Cancelled)
	}
}

impl fmt::Display for TaskStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.as_str())
	}
}
