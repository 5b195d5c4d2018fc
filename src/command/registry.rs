use super::{Command, CommandImporter};
use crate::error::PipelineResult;
use crate::registry::NamedRegistry;

/// Named commands with one current command.
///
/// Setting the current command publishes a
/// [`RegistryEvent::CurrentChanged`](crate::event::RegistryEvent) to every
/// subscriber, e.g. a manager window.
pub type CommandRegistry = NamedRegistry<Command>;

impl CommandRegistry {
    pub fn for_commands() -> Self {
        NamedRegistry::new("command")
    }

    pub fn current_command(&self) -> Option<&Command> {
        self.current().map(|(_, command)| command)
    }

    /// Registers `command` and makes it current
    pub fn add_and_select(&mut self, name: &str, command: Command) -> PipelineResult<()> {
        self.add(name, command);
        self.set_current(name)
    }

    /// Builds a command with an external importer and registers it as current.
    ///
    /// Nothing is registered when the importer fails.
    pub fn import_with(&mut self, importer: &dyn CommandImporter, name: &str, source: &str) -> PipelineResult<()> {
        let command = importer.import(name, source)?;
        log::info!("Imported command {:?} with {} importer", name, importer.format());
        self.add_and_select(name, command)
    }
}
