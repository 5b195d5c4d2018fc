use egui::Pos2;
use log::info;

use super::JobDriver;
use crate::command::Operation;
use crate::error::PipelineResult;

/// Writes every operation to the log
#[derive(Debug, Clone)]
pub struct LoggerDriver {
    detailed: bool,
    position: Pos2,
    operations: usize,
}

impl LoggerDriver {
    /// One line per operation
    pub fn simple() -> Self {
        Self::new(false)
    }

    /// Also logs the pen position the operation starts from and its index
    pub fn detailed() -> Self {
        Self::new(true)
    }

    pub fn new(detailed: bool) -> Self {
        Self {
            detailed,
            position: Pos2::ZERO,
            operations: 0,
        }
    }

    pub fn is_detailed(&self) -> bool {
        self.detailed
    }
}

impl JobDriver for LoggerDriver {
    fn name(&self) -> String {
        if self.detailed {
            "Detailed logger".to_string()
        } else {
            "Simple logger".to_string()
        }
    }

    fn start(&mut self) -> PipelineResult<()> {
        self.operations = 0;
        info!("{}: job started", self.name());
        Ok(())
    }

    fn operate(&mut self, operation: Operation) -> PipelineResult<()> {
        if self.detailed {
            info!(
                "#{} {} (from {}, {})",
                self.operations, operation, self.position.x, self.position.y
            );
        } else {
            info!("{}", operation);
        }
        self.position = operation.position();
        self.operations += 1;
        Ok(())
    }

    fn finish(&mut self) -> PipelineResult<()> {
        info!("{}: job finished after {} operations", self.name(), self.operations);
        Ok(())
    }
}
