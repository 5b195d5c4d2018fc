use super::JobDriver;
use crate::command::{Command, Operation};
use crate::error::PipelineResult;

/// Captures the stream it receives so it can be registered as a
/// recorded command afterwards.
#[derive(Debug, Clone, Default)]
pub struct RecordingDriver {
    operations: Vec<Operation>,
}

impl RecordingDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Turns everything captured so far into a recorded command and starts over
    pub fn take_command(&mut self, name: impl Into<String>) -> Command {
        let operations = std::mem::take(&mut self.operations);
        log::info!("Recorded {} operations", operations.len());
        Command::recorded(name, operations)
    }

    pub fn clear(&mut self) {
        self.operations.clear();
    }
}

impl JobDriver for RecordingDriver {
    fn name(&self) -> String {
        "Recorder".to_string()
    }

    fn start(&mut self) -> PipelineResult<()> {
        Ok(())
    }

    fn operate(&mut self, operation: Operation) -> PipelineResult<()> {
        self.operations.push(operation);
        Ok(())
    }

    fn finish(&mut self) -> PipelineResult<()> {
        Ok(())
    }
}
