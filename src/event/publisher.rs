use super::{Subscriber, SubscriberError};

/// Handle returned by [`ChangePublisher::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Synchronous publisher notifying subscribers in subscription order
pub struct ChangePublisher<E> {
    subscribers: Vec<(SubscriptionId, Box<dyn Subscriber<E>>)>,
    next_id: u64,
}

impl<E> Clone for ChangePublisher<E> {
    fn clone(&self) -> Self {
        // Subscriptions are not shared between copies
        Self::new()
    }
}

impl<E> std::fmt::Debug for ChangePublisher<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangePublisher")
            .field("subscribers", &format!("<{} subscribers>", self.subscribers.len()))
            .finish()
    }
}

impl<E> Default for ChangePublisher<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> ChangePublisher<E> {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    /// Adds a subscriber at the end of the notification order
    pub fn subscribe(&mut self, subscriber: Box<dyn Subscriber<E>>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, subscriber));
        id
    }

    /// Returns false if the subscription was already gone
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Notifies every subscriber once, in order.
    ///
    /// A failing subscriber is logged and skipped; the failures are returned.
    pub fn notify(&mut self, event: &E) -> Vec<SubscriberError> {
        let mut failures = Vec::new();
        for (id, subscriber) in &mut self.subscribers {
            if let Err(err) = subscriber.on_change(event) {
                log::warn!("Subscriber {:?} failed: {}", id, err);
                failures.push(err);
            }
        }
        failures
    }
}
