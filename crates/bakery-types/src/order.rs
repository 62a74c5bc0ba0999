//! Order types for the bakery operations system.
//!
//! This module defines the central order entity, its lifecycle statuses,
//! the kitchen sub-statuses used during production, and the append-only
//! order log written alongside every workflow action.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{DeliveryAssignment, DeliverySlot, DriverType};

/// A cake order with its full workflow state.
///
/// An order is created from an intake request and carries all information
/// needed by the kitchen, delivery, and archive workflows, including the
/// side-effect fields written by specific status transitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
	/// Unique identifier for this order, immutable after creation.
	pub id: String,
	/// Timestamp when this order was created.
	pub created_at: u64,
	/// Timestamp when this order was last updated.
	pub updated_at: u64,
	/// Current lifecycle status of the order.
	pub status: OrderStatus,
	/// Production sub-status, meaningful only while the order is in the
	/// kitchen phase. Cleared when the order leaves that phase.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub kitchen_status: Option<KitchenStatus>,
	/// Name of the ordering customer.
	pub customer_name: String,
	/// Free-form description of the cake (tiers, flavors, decoration).
	pub description: String,
	/// Intake notes for the kitchen or driver.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub notes: Option<String>,
	/// Date the order is due for delivery.
	pub delivery_date: NaiveDate,
	/// Time slot the order is due in.
	pub delivery_slot: DeliverySlot,
	/// Driver assignment, preliminary or confirmed.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub delivery_assignment: Option<DeliveryAssignment>,
	/// Number of times the order details were revised after intake.
	#[serde(default)]
	pub revision_count: u32,
	/// Timestamp set when the order was archived.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub archived_date: Option<u64>,
	/// Timestamp of the actual hand-over to the customer.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub actual_delivery_time: Option<u64>,
	/// Feedback left by the customer after delivery.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub customer_feedback: Option<String>,
	/// Append-only log of everything that happened to this order.
	#[serde(default)]
	pub logs: Vec<OrderLogEntry>,
}

/// Intake request for a new order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrder {
	pub customer_name: String,
	pub description: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub notes: Option<String>,
	pub delivery_date: NaiveDate,
	pub delivery_slot: DeliverySlot,
	/// When false the order is kept as an editable draft.
	#[serde(default)]
	pub submit: bool,
}

/// Editable order details; a revision of these bumps the revision counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetails {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub customer_name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub notes: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub delivery_date: Option<NaiveDate>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub delivery_slot: Option<DeliverySlot>,
}

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
	/// Draft order that is still being filled in.
	Incomplete,
	/// Submitted order waiting for the kitchen to pick it up.
	InQueue,
	/// Order in production.
	InKitchen,
	/// Production done, waiting for the result photo and approval.
	WaitingPhoto,
	/// Approved and boxed, waiting for a driver.
	ReadyToDeliver,
	/// On the road.
	InDelivery,
	/// Hand-over confirmed by the driver.
	DeliveryConfirmed,
	/// Waiting for customer feedback.
	WaitingFeedback,
	/// Order complete.
	Finished,
	/// Finished order moved out of the active views.
	Archived,
	/// Order cancelled. Terminal.
	Cancelled,
}

impl OrderStatus {
	/// Returns the wire representation of the status.
	pub fn as_str(&self) -> &'static str {
		match self {
			OrderStatus::Incomplete => "incomplete",
			OrderStatus::InQueue => "in-queue",
			OrderStatus::InKitchen => "in-kitchen",
			OrderStatus::WaitingPhoto => "waiting-photo",
			OrderStatus::ReadyToDeliver => "ready-to-deliver",
			OrderStatus::InDelivery => "in-delivery",
			OrderStatus::DeliveryConfirmed => "delivery-confirmed",
			OrderStatus::WaitingFeedback => "waiting-feedback",
			OrderStatus::Finished => "finished",
			OrderStatus::Archived => "archived",
			OrderStatus::Cancelled => "cancelled",
		}
	}

	/// Returns an iterator over all status variants.
	pub fn all() -> impl Iterator<Item = Self> {
		[
			Self::Incomplete,
			Self::InQueue,
			Self::InKitchen,
			Self::WaitingPhoto,
			Self::ReadyToDeliver,
			Self::InDelivery,
			Self::DeliveryConfirmed,
			Self::WaitingFeedback,
			Self::Finished,
			Self::Archived,
			Self::Cancelled,
		]
		.into_iter()
	}
}

impl fmt::Display for OrderStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

/// Production sub-status while an order is in the kitchen.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum KitchenStatus {
	/// Sponge not yet baked.
	WaitingBaker,
	/// Baked, waiting for the crumb coat.
	WaitingCrumbcoat,
	/// Crumb-coated, waiting for the final cover.
	WaitingCover,
	/// Being decorated.
	Decorating,
	/// Decorated, waiting for the photo and approval.
	DoneWaitingApproval,
}

impl KitchenStatus {
	pub fn as_str(&self) -> &'static str {
		match self {
			KitchenStatus::WaitingBaker => "waiting-baker",
			KitchenStatus::WaitingCrumbcoat => "waiting-crumbcoat",
			KitchenStatus::WaitingCover => "waiting-cover",
			KitchenStatus::Decorating => "decorating",
			KitchenStatus::DoneWaitingApproval => "done-waiting-approval",
		}
	}
}

impl fmt::Display for KitchenStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

/// A single entry in an order's append-only log.
///
/// Entries are written alongside every transition, print, or delivery
/// update, ordered by timestamp at write time, and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLogEntry {
	/// Unique identifier for this entry.
	pub id: String,
	/// Timestamp when the entry was written.
	pub timestamp: u64,
	/// What happened.
	#[serde(flatten)]
	pub event: LogEvent,
	/// Optional free-form note attached by the operator.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub note: Option<String>,
	/// Operator that drove the action, when known.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub user: Option<String>,
}

/// The event recorded by a log entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum LogEvent {
	/// The order status changed.
	StatusChange {
		previous_status: OrderStatus,
		new_status: OrderStatus,
	},
	/// The kitchen sub-status changed.
	KitchenStatusChange {
		previous_stage: Option<KitchenStatus>,
		new_stage: KitchenStatus,
	},
	/// A driver assignment was created, revised, or confirmed.
	DeliveryUpdate {
		driver_type: DriverType,
		preliminary: bool,
	},
	/// A label or order sheet was printed.
	Printed { template: String },
}
