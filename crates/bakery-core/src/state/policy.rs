//! Transition policy for the order lifecycle.
//!
//! Pure rules governing which status changes are allowed. The kitchen and
//! delivery phases are driven by dedicated workflows with richer side
//! effects (stage tracking, driver assignment), so those statuses are
//! locked against arbitrary jumps from the generic status dropdown while
//! still permitting cancellation as a universal escape hatch.

use bakery_types::{KitchenStatus, OrderStatus};

/// Statuses owned by a dedicated workflow page.
///
/// Orders in these statuses cannot be moved around freely; the generic
/// dropdown only offers what [`allowed_targets`] returns, and the UI shows
/// the [`redirect_hint`] for everything else.
pub fn is_locked(status: OrderStatus) -> bool {
	matches!(
		status,
		OrderStatus::InKitchen
			| OrderStatus::WaitingPhoto
			| OrderStatus::ReadyToDeliver
			| OrderStatus::InDelivery
			| OrderStatus::Archived
	)
}

/// The statuses an order may move to from `current`.
///
/// Delivery start is absent from `ready-to-deliver` on purpose: it must go
/// through the delivery workflow, which confirms the driver assignment.
pub fn allowed_targets(current: OrderStatus) -> &'static [OrderStatus] {
	match current {
		OrderStatus::Incomplete => &[OrderStatus::InQueue, OrderStatus::Cancelled],
		OrderStatus::InQueue => &[OrderStatus::InKitchen, OrderStatus::Cancelled],
		OrderStatus::InKitchen => &[OrderStatus::WaitingPhoto, OrderStatus::Cancelled],
		OrderStatus::WaitingPhoto => &[OrderStatus::ReadyToDeliver, OrderStatus::Cancelled],
		OrderStatus::ReadyToDeliver => &[OrderStatus::Cancelled],
		OrderStatus::InDelivery => &[OrderStatus::DeliveryConfirmed, OrderStatus::Cancelled],
		OrderStatus::DeliveryConfirmed => &[OrderStatus::WaitingFeedback, OrderStatus::Cancelled],
		OrderStatus::WaitingFeedback => &[OrderStatus::Finished, OrderStatus::Cancelled],
		OrderStatus::Finished => &[OrderStatus::Archived, OrderStatus::Cancelled],
		// Restore is the only way out of the archive
		OrderStatus::Archived => &[OrderStatus::Finished],
		OrderStatus::Cancelled => &[],
	}
}

/// Checks whether a status change is allowed.
///
/// A self-transition is always a no-op, never an error, and the draft
/// status can never be re-entered once left.
pub fn can_transition(current: OrderStatus, target: OrderStatus) -> bool {
	if current == target {
		return true;
	}
	if target == OrderStatus::Incomplete {
		return false;
	}
	allowed_targets(current).contains(&target)
}

/// Advisory hint shown when a disallowed change is attempted on a locked
/// status, pointing the operator at the page that owns the workflow.
pub fn redirect_hint(current: OrderStatus) -> Option<&'static str> {
	match current {
		OrderStatus::InKitchen | OrderStatus::WaitingPhoto => Some("Manage from Kitchen page"),
		OrderStatus::ReadyToDeliver | OrderStatus::InDelivery => {
			Some("Manage from Delivery page")
		},
		OrderStatus::Archived => Some("Manage from Archived page"),
		_ => None,
	}
}

/// Maps a kitchen stage forward into the order status it implies.
///
/// Everything before approval keeps the order in the kitchen; a decorated
/// cake waiting for its photo moves the order on.
pub fn kitchen_to_order_status(stage: KitchenStatus) -> OrderStatus {
	match stage {
		KitchenStatus::WaitingBaker
		| KitchenStatus::WaitingCrumbcoat
		| KitchenStatus::WaitingCover
		| KitchenStatus::Decorating => OrderStatus::InKitchen,
		KitchenStatus::DoneWaitingApproval => OrderStatus::WaitingPhoto,
	}
}
