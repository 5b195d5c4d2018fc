use super::{run_job, JobDriver};
use crate::command::Command;
use crate::error::{PipelineError, PipelineResult};
use crate::registry::NamedRegistry;

/// Named drivers in insertion order, one of them current
pub type DriverRegistry = NamedRegistry<Box<dyn JobDriver>>;

impl DriverRegistry {
    pub fn for_drivers() -> Self {
        NamedRegistry::new("driver")
    }

    pub fn add_driver(&mut self, name: impl Into<String>, driver: impl JobDriver + 'static) {
        self.add(name, Box::new(driver));
    }

    /// Runs `command` as one job on the current driver and returns the
    /// registry name of that driver.
    pub fn run_on_current(&mut self, command: &Command) -> PipelineResult<String> {
        let label = self.label();
        let (name, driver) = self.current_mut().ok_or(PipelineError::UnknownEntry {
            registry: label,
            name: "<current>".to_string(),
        })?;
        let name = name.to_string();
        run_job(command, driver)?;
        Ok(name)
    }
}
