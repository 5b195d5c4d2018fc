mod events;
mod publisher;

use thiserror::Error;

pub use events::RegistryEvent;
pub use publisher::{ChangePublisher, SubscriptionId};

/// Failure reported by a subscriber; it never stops the other subscribers
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct SubscriberError(pub String);

impl SubscriberError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

pub trait Subscriber<E>: Send {
    fn on_change(&mut self, event: &E) -> Result<(), SubscriberError>;
}

impl<E, F> Subscriber<E> for F
where
    F: FnMut(&E) -> Result<(), SubscriberError> + Send,
{
    fn on_change(&mut self, event: &E) -> Result<(), SubscriberError> {
        self(event)
    }
}
