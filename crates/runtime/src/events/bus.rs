//! Broadcast event bus for control notifications.

use arena_core::{Notification, NotificationSink};
use tokio::sync::broadcast;

/// Fan-out channel for [`Notification`]s.
///
/// Every subscriber sees every notification. Publishing never blocks and
/// never fails; with no subscribers the notification is dropped. Slow
/// subscribers lag (see [`broadcast::error::RecvError::Lagged`]) rather than
/// stall the tick.
#[derive(Clone, Debug)]
pub struct EventBus {
    sender: broadcast::Sender<Notification>,
}

impl EventBus {
    /// Creates a new event bus with default capacity
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Creates a new event bus with specified capacity
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish a notification to all current subscribers
    pub fn publish(&self, notification: Notification) {
        if self.sender.send(notification).is_err() {
            // No subscribers - this is normal, not an error
            tracing::trace!("No subscribers for control notifications");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationSink for EventBus {
    fn notify(&self, notification: Notification) {
        self.publish(notification);
    }
}

#[cfg(test)]
mod tests {
    use arena_core::{EntityId, StateKind};

    use super::*;

    #[test]
    fn every_subscriber_receives_notifications() {
        let bus = EventBus::with_capacity(8);
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();

        let entered = Notification::StateEntered {
            entity: EntityId(4),
            state: StateKind::Dash,
        };
        bus.notify(entered.clone());

        assert_eq!(first.try_recv().unwrap(), entered);
        assert_eq!(second.try_recv().unwrap(), entered);
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let bus = EventBus::new();
        bus.publish(Notification::CooldownEnded {
            entity: EntityId(1),
            ability: arena_core::AbilityId(2),
        });
        assert_eq!(bus.subscriber_count(), 0);
    }
}
