//! Derived read-side views over orders.
//!
//! These projections are computed from the stored order rather than kept
//! as state of their own: the kitchen stage fallback for legacy records
//! and the time-pressure flag the delivery board sorts by.

use bakery_types::{DeliverySlot, KitchenStatus, Order, OrderStatus};
use chrono::{Duration, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Returns the kitchen stage for an order.
///
/// Prefers the stored stage. Records written before the stage field
/// existed fall back to a best-effort guess from the order status; the
/// guess is lossy (`in-kitchen` could be any of four stages) but keeps
/// the kitchen board usable for old data. The executor always populates
/// the field nowadays, so the fallback only fires for legacy records.
pub fn derive_kitchen_status(order: &Order) -> Option<KitchenStatus> {
	if let Some(stage) = order.kitchen_status {
		return Some(stage);
	}
	match order.status {
		OrderStatus::InQueue => Some(KitchenStatus::WaitingBaker),
		OrderStatus::InKitchen => Some(KitchenStatus::WaitingCover),
		OrderStatus::WaitingPhoto => Some(KitchenStatus::DoneWaitingApproval),
		_ => None,
	}
}

/// Time pressure on an order relative to its delivery window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimeStatus {
	/// The delivery window has already closed.
	#[serde(rename = "late")]
	Late,
	/// The delivery window closes within the next two hours.
	#[serde(rename = "within-2-hours")]
	WithinTwoHours,
}

/// Matches operator-typed windows like "14:00-16:30"; only the end of the
/// window matters here.
static CUSTOM_SLOT: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r"^\s*\d{1,2}[:.]\d{2}\s*-\s*(\d{1,2})[:.](\d{2})\s*$").unwrap()
});

/// Returns the end-of-window time for a delivery slot.
///
/// The three canonical slots have fixed ends; custom slots are parsed and
/// yield nothing when they don't look like a time range.
pub fn slot_end_time(slot: &DeliverySlot) -> Option<NaiveTime> {
	match slot {
		DeliverySlot::Slot1 => NaiveTime::from_hms_opt(13, 0, 0),
		DeliverySlot::Slot2 => NaiveTime::from_hms_opt(17, 0, 0),
		DeliverySlot::Slot3 => NaiveTime::from_hms_opt(20, 0, 0),
		DeliverySlot::Custom(raw) => {
			let caps = CUSTOM_SLOT.captures(raw)?;
			let hour: u32 = caps[1].parse().ok()?;
			let minute: u32 = caps[2].parse().ok()?;
			NaiveTime::from_hms_opt(hour, minute, 0)
		},
	}
}

/// Flags orders whose delivery window is closing or closed.
///
/// Future-dated orders are never flagged; orders due today are flagged
/// inside the final two hours of their window and late past its end.
pub fn order_time_status(order: &Order, now: NaiveDateTime) -> Option<TimeStatus> {
	if order.delivery_date > now.date() {
		return None;
	}

	let end = order.delivery_date.and_time(slot_end_time(&order.delivery_slot)?);
	if now > end {
		return Some(TimeStatus::Late);
	}
	if end.signed_duration_since(now) <= Duration::hours(2) {
		return Some(TimeStatus::WithinTwoHours);
	}
	None
}

#[cfg(test)]
mod tests {
	use super::*;
	use bakery_types::DeliverySlot;
	use chrono::NaiveDate;

	fn order_due(date: NaiveDate, slot: DeliverySlot) -> Order {
		Order {
			id: "order-1".to_string(),
			created_at: 0,
			updated_at: 0,
			status: OrderStatus::ReadyToDeliver,
			kitchen_status: None,
			customer_name: "Maja".to_string(),
			description: "Two-tier lemon".to_string(),
			notes: None,
			delivery_date: date,
			delivery_slot: slot,
			delivery_assignment: None,
			revision_count: 0,
			archived_date: None,
			actual_delivery_time: None,
			customer_feedback: None,
			logs: Vec::new(),
		}
	}

	fn at(date: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
		date.and_time(NaiveTime::from_hms_opt(hour, minute, 0).unwrap())
	}

	#[test]
	fn slot1_flags_inside_the_final_two_hours() {
		let today = NaiveDate::from_ymd_opt(2025, 6, 14).unwrap();
		let order = order_due(today, DeliverySlot::Slot1);

		assert_eq!(
			order_time_status(&order, at(today, 11, 30)),
			Some(TimeStatus::WithinTwoHours)
		);
		assert_eq!(
			order_time_status(&order, at(today, 14, 0)),
			Some(TimeStatus::Late)
		);
		// Still comfortably early
		assert_eq!(order_time_status(&order, at(today, 9, 0)), None);
	}

	#[test]
	fn future_orders_are_never_flagged() {
		let today = NaiveDate::from_ymd_opt(2025, 6, 14).unwrap();
		let order = order_due(today.succ_opt().unwrap(), DeliverySlot::Slot1);

		assert_eq!(order_time_status(&order, at(today, 14, 0)), None);
	}

	#[test]
	fn overdue_from_a_previous_day_is_late() {
		let today = NaiveDate::from_ymd_opt(2025, 6, 14).unwrap();
		let order = order_due(today.pred_opt().unwrap(), DeliverySlot::Slot3);

		assert_eq!(
			order_time_status(&order, at(today, 9, 0)),
			Some(TimeStatus::Late)
		);
	}

	#[test]
	fn custom_slots_are_parsed() {
		let today = NaiveDate::from_ymd_opt(2025, 6, 14).unwrap();
		let order = order_due(today, DeliverySlot::Custom("14:00-16:30".to_string()));

		assert_eq!(
			order_time_status(&order, at(today, 15, 0)),
			Some(TimeStatus::WithinTwoHours)
		);
		assert_eq!(
			order_time_status(&order, at(today, 17, 0)),
			Some(TimeStatus::Late)
		);

		// Unparseable windows yield no flag instead of a wrong one
		let odd = order_due(today, DeliverySlot::Custom("whenever works".to_string()));
		assert_eq!(order_time_status(&odd, at(today, 23, 0)), None);
	}

	#[test]
	fn stored_stage_wins_over_the_fallback() {
		let today = NaiveDate::from_ymd_opt(2025, 6, 14).unwrap();
		let mut order = order_due(today, DeliverySlot::Slot1);
		order.status = OrderStatus::InKitchen;
		order.kitchen_status = Some(KitchenStatus::Decorating);

		assert_eq!(
			derive_kitchen_status(&order),
			Some(KitchenStatus::Decorating)
		);
	}

	#[test]
	fn legacy_records_fall_back_by_status() {
		let today = NaiveDate::from_ymd_opt(2025, 6, 14).unwrap();
		let mut order = order_due(today, DeliverySlot::Slot1);
		order.kitchen_status = None;

		order.status = OrderStatus::InQueue;
		assert_eq!(
			derive_kitchen_status(&order),
			Some(KitchenStatus::WaitingBaker)
		);

		order.status = OrderStatus::InKitchen;
		assert_eq!(
			derive_kitchen_status(&order),
			Some(KitchenStatus::WaitingCover)
		);

		order.status = OrderStatus::WaitingPhoto;
		assert_eq!(
			derive_kitchen_status(&order),
			Some(KitchenStatus::DoneWaitingApproval)
		);

		order.status = OrderStatus::Finished;
		assert_eq!(derive_kitchen_status(&order), None);
	}
}
