use tokio::sync::broadcast;

use super::types::SiteEvent;

/// In-process event bus backed by `tokio::broadcast`. The persister and
/// any embedding application subscribe; publishing never blocks and having
/// zero subscribers is not an error.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<SiteEvent>,
}

impl EventBus {
    /// Create a new event bus with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers. Returns how many
    /// received it.
    pub fn publish(&self, event: SiteEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    /// Subscribe to the event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<SiteEvent> {
        self.sender.subscribe()
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::model::SiteDocument;
    use crate::events::types::CommittedEvent;

    fn committed(revision: u64) -> SiteEvent {
        SiteEvent::Committed(CommittedEvent {
            revision,
            document: SiteDocument::default(),
        })
    }

    #[tokio::test]
    async fn publish_and_receive() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        assert_eq!(bus.publish(committed(1)), 1);

        let SiteEvent::Committed(event) = rx.recv().await.unwrap();
        assert_eq!(event.revision, 1);
    }

    #[tokio::test]
    async fn multiple_subscribers_all_receive() {
        let bus = EventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        assert_eq!(bus.subscriber_count(), 2);
        bus.publish(committed(7));

        let SiteEvent::Committed(a) = rx1.recv().await.unwrap();
        let SiteEvent::Committed(b) = rx2.recv().await.unwrap();
        assert_eq!(a.revision, 7);
        assert_eq!(b.revision, 7);
    }

    #[tokio::test]
    async fn publishing_without_subscribers_is_fine() {
        let bus = EventBus::new(16);
        assert_eq!(bus.publish(committed(1)), 0);
    }
}
