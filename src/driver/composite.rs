use super::JobDriver;
use crate::command::Operation;
use crate::error::{AggregatedDriverError, MemberFailure, PipelineResult};

/// Fans every call out to its members in registration order.
///
/// A failing member never silences the others: failures are collected over
/// the whole sweep and reported together afterwards.
#[derive(Default)]
pub struct DriverComposite {
    label: String,
    drivers: Vec<Box<dyn JobDriver>>,
}

impl DriverComposite {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            drivers: Vec::new(),
        }
    }

    pub fn add_driver(&mut self, driver: Box<dyn JobDriver>) {
        log::debug!("{}: adding member {}", self.label, driver.name());
        self.drivers.push(driver);
    }

    /// Builder form of [`DriverComposite::add_driver`]
    pub fn with_driver(mut self, driver: impl JobDriver + 'static) -> Self {
        self.add_driver(Box::new(driver));
        self
    }

    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }

    pub fn member_names(&self) -> Vec<String> {
        self.drivers.iter().map(|driver| driver.name()).collect()
    }

    fn sweep(&mut self, mut call: impl FnMut(&mut dyn JobDriver) -> PipelineResult<()>) -> PipelineResult<()> {
        let mut aggregated = AggregatedDriverError::default();
        for (index, driver) in self.drivers.iter_mut().enumerate() {
            if let Err(error) = call(driver.as_mut()) {
                log::warn!("{}: member #{} ({}) failed: {}", self.label, index, driver.name(), error);
                aggregated.failures.push(MemberFailure {
                    index,
                    driver: driver.name(),
                    error,
                });
            }
        }

        if aggregated.is_empty() {
            Ok(())
        } else {
            Err(aggregated.into())
        }
    }
}

impl std::fmt::Debug for DriverComposite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DriverComposite")
            .field("label", &self.label)
            .field("members", &self.member_names())
            .finish()
    }
}

impl JobDriver for DriverComposite {
    fn name(&self) -> String {
        if self.label.is_empty() {
            format!("Composite of {}", self.member_names().join(", "))
        } else {
            self.label.clone()
        }
    }

    /// Starts every member. If any refuses, the members that did start are
    /// finished again before the refusals are reported, so the whole
    /// composite is back at rest and ready for the next job.
    fn start(&mut self) -> PipelineResult<()> {
        let mut started = Vec::with_capacity(self.drivers.len());
        let result = self.sweep(|driver| {
            let outcome = driver.start();
            started.push(outcome.is_ok());
            outcome
        });
        if result.is_err() {
            for (driver, _) in self.drivers.iter_mut().zip(started).filter(|(_, ok)| *ok) {
                if let Err(error) = driver.finish() {
                    log::warn!("{}: closing {} after a refused start failed: {}", self.label, driver.name(), error);
                }
            }
        }
        result
    }

    fn operate(&mut self, operation: Operation) -> PipelineResult<()> {
        self.sweep(|driver| driver.operate(operation))
    }

    fn finish(&mut self) -> PipelineResult<()> {
        self.sweep(|driver| driver.finish())
    }
}
