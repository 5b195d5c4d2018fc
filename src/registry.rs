use crate::error::{PipelineError, PipelineResult};
use crate::event::{ChangePublisher, RegistryEvent, Subscriber, SubscriptionId};

/// Insertion-ordered collection of named entries with one current entry.
///
/// The first entry added becomes current. Every mutation is published
/// synchronously, after the registry is back in a consistent state.
#[derive(Debug)]
pub struct NamedRegistry<T> {
    label: &'static str,
    entries: Vec<(String, T)>,
    current: Option<usize>,
    publisher: ChangePublisher<RegistryEvent>,
}

impl<T> NamedRegistry<T> {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            entries: Vec::new(),
            current: None,
            publisher: ChangePublisher::new(),
        }
    }

    /// What this registry holds, e.g. "driver"
    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn subscribe(&mut self, subscriber: Box<dyn Subscriber<RegistryEvent>>) -> SubscriptionId {
        self.publisher.subscribe(subscriber)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.publisher.unsubscribe(id)
    }

    /// Registers `item` under `name`, replacing and returning any previous
    /// entry of that name in place.
    pub fn add(&mut self, name: impl Into<String>, item: T) -> Option<T> {
        let name = name.into();
        let (previous, event) = match self.position(&name) {
            Some(index) => {
                let previous = std::mem::replace(&mut self.entries[index].1, item);
                let event = RegistryEvent::Replaced { registry: self.label, name };
                (Some(previous), event)
            }
            None => {
                self.entries.push((name.clone(), item));
                if self.current.is_none() {
                    self.current = Some(self.entries.len() - 1);
                }
                (None, RegistryEvent::Added { registry: self.label, name })
            }
        };
        log::debug!("{} registry: {:?}", self.label, event);
        self.publisher.notify(&event);
        previous
    }

    pub fn remove(&mut self, name: &str) -> PipelineResult<T> {
        let index = self.require(name)?;
        let (name, item) = self.entries.remove(index);
        self.current = match self.current {
            Some(current) if current == index => None,
            Some(current) if current > index => Some(current - 1),
            other => other,
        };
        self.publisher.notify(&RegistryEvent::Removed { registry: self.label, name });
        Ok(item)
    }

    pub fn set_current(&mut self, name: &str) -> PipelineResult<()> {
        let index = self.require(name)?;
        self.current = Some(index);
        log::info!("Current {} set to {:?}", self.label, name);
        self.publisher.notify(&RegistryEvent::CurrentChanged {
            registry: self.label,
            name: name.to_string(),
        });
        Ok(())
    }

    pub fn current(&self) -> Option<(&str, &T)> {
        self.current
            .and_then(|index| self.entries.get(index))
            .map(|(name, item)| (name.as_str(), item))
    }

    pub fn current_mut(&mut self) -> Option<(&str, &mut T)> {
        let index = self.current?;
        self.entries
            .get_mut(index)
            .map(|(name, item)| (name.as_str(), item))
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current().map(|(name, _)| name)
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.position(name).map(|index| &self.entries[index].1)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        self.position(name).map(move |index| &mut self.entries[index].1)
    }

    /// Registered names in insertion order
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(entry, _)| entry == name)
    }

    fn require(&self, name: &str) -> PipelineResult<usize> {
        self.position(name).ok_or_else(|| PipelineError::UnknownEntry {
            registry: self.label,
            name: name.to_string(),
        })
    }
}
