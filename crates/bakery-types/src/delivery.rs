//! Delivery assignment and time-slot types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Who carries the order to the customer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DriverType {
	/// One of the shop's own drivers.
	Staff,
	/// A hired courier.
	Courier,
	/// The customer picks the order up at the shop.
	Pickup,
}

impl fmt::Display for DriverType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			DriverType::Staff => write!(f, "staff"),
			DriverType::Courier => write!(f, "courier"),
			DriverType::Pickup => write!(f, "pickup"),
		}
	}
}

/// A driver assignment for an order.
///
/// An assignment made before the order is ready to leave is preliminary;
/// confirming it keeps the same record and flips `is_preliminary`. An
/// order must not enter delivery with a preliminary assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryAssignment {
	pub driver_type: DriverType,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub driver_name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub notes: Option<String>,
	/// True while the assignment is only a plan.
	pub is_preliminary: bool,
	/// Timestamp when the assignment was made.
	pub assigned_at: u64,
}

/// Request payload for creating, revising, or confirming an assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentRequest {
	pub driver_type: DriverType,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub driver_name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub notes: Option<String>,
	#[serde(default)]
	pub preliminary: bool,
}

/// The delivery window an order is due in.
///
/// The shop plans around three canonical slots; anything else is kept as
/// the free-form `"HH:MM-HH:MM"` string the operator typed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum DeliverySlot {
	/// Morning window, ends at 13:00.
	Slot1,
	/// Afternoon window, ends at 17:00.
	Slot2,
	/// Evening window, ends at 20:00.
	Slot3,
	/// Operator-typed custom window.
	Custom(String),
}

impl From<String> for DeliverySlot {
	fn from(value: String) -> Self {
		match value.as_str() {
			"slot1" => DeliverySlot::Slot1,
			"slot2" => DeliverySlot::Slot2,
			"slot3" => DeliverySlot::Slot3,
			_ => DeliverySlot::Custom(value),
		}
	}
}

impl From<DeliverySlot> for String {
	fn from(slot: DeliverySlot) -> Self {
		match slot {
			DeliverySlot::Slot1 => "slot1".to_string(),
			DeliverySlot::Slot2 => "slot2".to_string(),
			DeliverySlot::Slot3 => "slot3".to_string(),
			DeliverySlot::Custom(value) => value,
		}
	}
}

impl fmt::Display for DeliverySlot {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			DeliverySlot::Slot1 => write!(f, "slot1"),
			DeliverySlot::Slot2 => write!(f, "slot2"),
			DeliverySlot::Slot3 => write!(f, "slot3"),
			DeliverySlot::Custom(value) => write!(f, "{}", value),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn slot_round_trips_through_strings() {
		let canonical: DeliverySlot = "slot2".to_string().into();
		assert_eq!(canonical, DeliverySlot::Slot2);

		let custom: DeliverySlot = "14:00-16:30".to_string().into();
		assert_eq!(custom, DeliverySlot::Custom("14:00-16:30".to_string()));
		assert_eq!(String::from(custom), "14:00-16:30");
	}
}
