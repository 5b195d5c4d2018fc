/// Change to a named registry, published after the mutation is done
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    Added { registry: &'static str, name: String },
    Replaced { registry: &'static str, name: String },
    Removed { registry: &'static str, name: String },
    CurrentChanged { registry: &'static str, name: String },
}

impl RegistryEvent {
    /// Entry the event is about
    pub fn name(&self) -> &str {
        match self {
            RegistryEvent::Added { name, .. }
            | RegistryEvent::Replaced { name, .. }
            | RegistryEvent::Removed { name, .. }
            | RegistryEvent::CurrentChanged { name, .. } => name,
        }
    }

    pub fn registry(&self) -> &'static str {
        match self {
            RegistryEvent::Added { registry, .. }
            | RegistryEvent::Replaced { registry, .. }
            | RegistryEvent::Removed { registry, .. }
            | RegistryEvent::CurrentChanged { registry, .. } => registry,
        }
    }
}
