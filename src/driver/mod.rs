//! Job drivers: sinks for the primitive operation stream.
//!
//! Adapter drivers ([`LoggerDriver`], [`LineDriverAdapter`],
//! [`RecordingDriver`]) produce the actual effect. Decorators wrap any other
//! driver and enforce the `start` / `operate*` / `finish` bracket before
//! forwarding; [`DriverComposite`] fans the stream out to several drivers.

mod canvas_aware;
mod composite;
mod line;
mod logger;
mod realtime;
mod recorder;
mod registry;
mod transforming;
mod usage;

use crate::command::{flatten, Command, Operation};
use crate::error::{PipelineError, PipelineResult};

pub use canvas_aware::{CanvasAwareDriver, CanvasSlot};
pub use composite::DriverComposite;
pub use line::{LineDriverAdapter, LineKind, LineStyle, ShapeSurface};
pub use logger::LoggerDriver;
pub use realtime::{CancelToken, Pacer, RealTimeDriver, SleepPacer};
pub use recorder::RecordingDriver;
pub use registry::DriverRegistry;
pub use transforming::TransformingDriver;
pub use usage::{UsageHandle, UsageMonitorDriver, UsageStats};

/// A sink for primitive drawing operations.
///
/// `start` is called once before the first operation of a job and `finish`
/// once after the last one.
pub trait JobDriver: Send {
    /// Display name used in logs and error reports
    fn name(&self) -> String;

    fn start(&mut self) -> PipelineResult<()>;

    fn operate(&mut self, operation: Operation) -> PipelineResult<()>;

    fn finish(&mut self) -> PipelineResult<()>;
}

impl<D: JobDriver + ?Sized> JobDriver for Box<D> {
    fn name(&self) -> String {
        (**self).name()
    }

    fn start(&mut self) -> PipelineResult<()> {
        (**self).start()
    }

    fn operate(&mut self, operation: Operation) -> PipelineResult<()> {
        (**self).operate(operation)
    }

    fn finish(&mut self) -> PipelineResult<()> {
        (**self).finish()
    }
}

/// Where a driver is within the start/finish bracket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JobPhase {
    #[default]
    Idle,
    Running,
}

/// Bracket bookkeeping shared by the decorators
#[derive(Debug, Clone, Default)]
pub struct JobBracket {
    phase: JobPhase,
}

impl JobBracket {
    pub fn phase(&self) -> JobPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == JobPhase::Running
    }

    /// Opens the bracket around `start_inner`. The phase only becomes
    /// `Running` if the wrapped driver started, so a failed start leaves the
    /// decorator ready for the next job.
    pub fn enter(&mut self, driver: &str, start_inner: impl FnOnce() -> PipelineResult<()>) -> PipelineResult<()> {
        if self.is_running() {
            return Err(violation(driver, "start called while a job is running"));
        }
        start_inner()?;
        self.phase = JobPhase::Running;
        Ok(())
    }

    pub fn check_operate(&self, driver: &str, operation: &Operation) -> PipelineResult<()> {
        if !self.is_running() {
            return Err(violation(driver, &format!("{} outside of start/finish", operation)));
        }
        Ok(())
    }

    pub fn finish(&mut self, driver: &str) -> PipelineResult<()> {
        if !self.is_running() {
            return Err(violation(driver, "finish called without start"));
        }
        self.phase = JobPhase::Idle;
        Ok(())
    }
}

fn violation(driver: &str, detail: &str) -> PipelineError {
    PipelineError::ProtocolViolation {
        driver: driver.to_string(),
        detail: detail.to_string(),
    }
}

/// Runs `command` as one job on `driver`.
///
/// The whole flattened stream is offered even if some operations fail, and
/// `finish` is always called once `start` succeeded. The first error wins.
pub fn run_job<D: JobDriver + ?Sized>(command: &Command, driver: &mut D) -> PipelineResult<()> {
    let operations = flatten(command);
    log::info!(
        "Running {:?} ({} operations) on {}",
        command.name(),
        operations.len(),
        driver.name()
    );

    driver.start()?;
    let mut first_error = None;
    for operation in operations {
        if let Err(err) = driver.operate(operation) {
            log::warn!("{} rejected {}: {}", driver.name(), operation, err);
            first_error.get_or_insert(err);
        }
    }
    let finished = driver.finish();

    match first_error {
        Some(err) => Err(err),
        None => finished,
    }
}
