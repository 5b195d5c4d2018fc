use std::sync::Arc;

use egui::Pos2;
use parking_lot::Mutex;

use super::{JobBracket, JobDriver};
use crate::canvas::Canvas;
use crate::command::Operation;
use crate::error::PipelineResult;

/// Canvas shared between a [`CanvasAwareDriver`] and whoever tracks the
/// current canvas
#[derive(Debug, Clone)]
pub struct CanvasSlot(Arc<Mutex<Canvas>>);

impl CanvasSlot {
    pub fn new(canvas: Canvas) -> Self {
        Self(Arc::new(Mutex::new(canvas)))
    }

    pub fn get(&self) -> Canvas {
        *self.0.lock()
    }

    pub fn set(&self, canvas: Canvas) {
        *self.0.lock() = canvas;
    }
}

/// Lifts the pen for segments that leave the canvas.
///
/// A `LineTo` with an endpoint outside the canvas is forwarded as a `MoveTo`
/// to the same target, so the pen position downstream stays in sync. The
/// canvas is read from a [`CanvasSlot`] when a job starts.
#[derive(Debug)]
pub struct CanvasAwareDriver<D> {
    inner: D,
    slot: CanvasSlot,
    canvas: Canvas,
    bracket: JobBracket,
    position: Pos2,
    lifted: usize,
}

impl<D: JobDriver> CanvasAwareDriver<D> {
    pub fn new(inner: D, canvas: Canvas) -> Self {
        Self::following(inner, CanvasSlot::new(canvas))
    }

    /// Checks against whatever canvas `slot` holds at the start of each job
    pub fn following(inner: D, slot: CanvasSlot) -> Self {
        Self {
            inner,
            canvas: slot.get(),
            slot,
            bracket: JobBracket::default(),
            position: Pos2::ZERO,
            lifted: 0,
        }
    }

    /// Canvas of the running job, or of the next one when idle
    pub fn canvas(&self) -> Canvas {
        if self.bracket.is_running() {
            self.canvas
        } else {
            self.slot.get()
        }
    }

    /// Takes effect when the next job starts
    pub fn set_canvas(&mut self, canvas: Canvas) {
        self.slot.set(canvas);
    }

    pub fn slot(&self) -> CanvasSlot {
        self.slot.clone()
    }

    /// Segments turned into moves during the last job
    pub fn lifted(&self) -> usize {
        self.lifted
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }
}

impl<D: JobDriver> JobDriver for CanvasAwareDriver<D> {
    fn name(&self) -> String {
        format!("{} (canvas aware)", self.inner.name())
    }

    fn start(&mut self) -> PipelineResult<()> {
        let name = self.name();
        self.bracket.enter(&name, || self.inner.start())?;
        self.canvas = self.slot.get();
        self.position = Pos2::ZERO;
        self.lifted = 0;
        Ok(())
    }

    fn operate(&mut self, operation: Operation) -> PipelineResult<()> {
        self.bracket.check_operate(&self.name(), &operation)?;

        let target = operation.position();
        let from = std::mem::replace(&mut self.position, target);
        let forwarded = match operation {
            Operation::LineTo(_) if !(self.canvas.contains(from) && self.canvas.contains(target)) => {
                log::warn!("{}: {} leaves the canvas, pen lifted", self.name(), operation);
                self.lifted += 1;
                Operation::MoveTo(target)
            }
            other => other,
        };
        self.inner.operate(forwarded)
    }

    fn finish(&mut self) -> PipelineResult<()> {
        self.bracket.finish(&self.name())?;
        if self.lifted > 0 {
            log::info!("{}: {} segments outside the canvas", self.name(), self.lifted);
        }
        self.inner.finish()
    }
}
