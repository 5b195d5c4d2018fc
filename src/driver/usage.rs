use std::sync::Arc;
use std::time::{Duration, Instant};

use egui::Pos2;
use parking_lot::Mutex;

use super::{JobBracket, JobDriver};
use crate::command::Operation;
use crate::error::PipelineResult;

/// Counters accumulated by a [`UsageMonitorDriver`] over every job it saw
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UsageStats {
    pub operations: usize,
    pub moves: usize,
    pub lines: usize,
    /// Total pen travel, drawn or not
    pub head_distance: f32,
    /// Travel while drawing
    pub ink_distance: f32,
    pub elapsed: Duration,
    pub jobs: usize,
}

impl std::fmt::Display for UsageStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} jobs, {} operations ({} moves, {} lines), head {:.1}, ink {:.1}, {:?}",
            self.jobs,
            self.operations,
            self.moves,
            self.lines,
            self.head_distance,
            self.ink_distance,
            self.elapsed
        )
    }
}

/// Read side of the usage counters; clones observe the same monitor
#[derive(Debug, Clone, Default)]
pub struct UsageHandle {
    stats: Arc<Mutex<UsageStats>>,
}

impl UsageHandle {
    pub fn snapshot(&self) -> UsageStats {
        *self.stats.lock()
    }

    pub fn reset(&self) {
        *self.stats.lock() = UsageStats::default();
    }
}

/// Counts what passes through without touching it
#[derive(Debug)]
pub struct UsageMonitorDriver<D> {
    inner: D,
    handle: UsageHandle,
    bracket: JobBracket,
    position: Pos2,
    started_at: Option<Instant>,
}

impl<D: JobDriver> UsageMonitorDriver<D> {
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            handle: UsageHandle::default(),
            bracket: JobBracket::default(),
            position: Pos2::ZERO,
            started_at: None,
        }
    }

    pub fn handle(&self) -> UsageHandle {
        self.handle.clone()
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }
}

impl<D: JobDriver> JobDriver for UsageMonitorDriver<D> {
    fn name(&self) -> String {
        format!("{} (usage monitored)", self.inner.name())
    }

    fn start(&mut self) -> PipelineResult<()> {
        let name = self.name();
        self.bracket.enter(&name, || self.inner.start())?;
        self.started_at = Some(Instant::now());
        self.position = Pos2::ZERO;
        Ok(())
    }

    fn operate(&mut self, operation: Operation) -> PipelineResult<()> {
        self.bracket.check_operate(&self.name(), &operation)?;

        let target = operation.position();
        let distance = self.position.distance(target);
        {
            let mut stats = self.handle.stats.lock();
            stats.operations += 1;
            stats.head_distance += distance;
            if operation.is_line() {
                stats.lines += 1;
                stats.ink_distance += distance;
            } else {
                stats.moves += 1;
            }
        }
        self.position = target;

        self.inner.operate(operation)
    }

    fn finish(&mut self) -> PipelineResult<()> {
        self.bracket.finish(&self.name())?;
        {
            let mut stats = self.handle.stats.lock();
            if let Some(started_at) = self.started_at.take() {
                stats.elapsed += started_at.elapsed();
            }
            stats.jobs += 1;
            log::info!("{}: {}", self.name(), *stats);
        }
        self.inner.finish()
    }
}
