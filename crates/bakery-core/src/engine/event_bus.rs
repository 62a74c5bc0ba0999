//! Event bus for inter-service communication.
//!
//! A thin wrapper over a tokio broadcast channel. Publishers do not care
//! whether anyone is listening; slow subscribers may lag and simply miss
//! events, which is acceptable because every consumer re-reads workflow
//! state from storage rather than reconstructing it from events.

use bakery_types::ShopEvent;
use tokio::sync::broadcast;

/// Broadcast bus carrying [`ShopEvent`]s between workflow components.
#[derive(Clone)]
pub struct EventBus {
	sender: broadcast::Sender<ShopEvent>,
}

impl EventBus {
	/// Creates a new event bus with the given channel capacity.
	pub fn new(capacity: usize) -> Self {
		let (sender, _) = broadcast::channel(capacity);
		Self { sender }
	}

	/// Publishes an event to all current subscribers.
	///
	/// Returns the number of subscribers that received the event, or an
	/// error when there are none; callers treat both as fire-and-forget.
	pub fn publish(
		&self,
		event: ShopEvent,
	) -> Result<usize, broadcast::error::SendError<ShopEvent>> {
		self.sender.send(event)
	}

	/// Creates a new subscription to the bus.
	pub fn subscribe(&self) -> broadcast::Receiver<ShopEvent> {
		self.sender.subscribe()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use bakery_types::{OrderEvent, OrderStatus};

	#[tokio::test]
	async fn subscribers_receive_published_events() {
		let bus = EventBus::new(16);
		let mut receiver = bus.subscribe();

		bus.publish(ShopEvent::Order(OrderEvent::StatusChanged {
			order_id: "order-1".to_string(),
			previous: OrderStatus::InQueue,
			new: OrderStatus::InKitchen,
		}))
		.unwrap();

		match receiver.recv().await.unwrap() {
			ShopEvent::Order(OrderEvent::StatusChanged { order_id, .. }) => {
				assert_eq!(order_id, "order-1");
			},
			other => panic!("unexpected event: {other:?}"),
		}
	}

	#[test]
	fn publishing_without_subscribers_is_an_error_not_a_panic() {
		let bus = EventBus::new(16);
		assert!(bus
			.publish(ShopEvent::Order(OrderEvent::FeedbackRecorded {
				order_id: "order-1".to_string(),
			}))
			.is_err());
	}
}
