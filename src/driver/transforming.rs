use super::{JobBracket, JobDriver};
use crate::command::Operation;
use crate::error::PipelineResult;
use crate::geometry::Transformation;

/// Applies a fixed transformation to every coordinate before forwarding.
///
/// `TransformingDriver::new(TransformingDriver::new(d, a), b)` hands `a(b(p))`
/// to `d`.
#[derive(Debug)]
pub struct TransformingDriver<D> {
    inner: D,
    transformation: Transformation,
    bracket: JobBracket,
}

impl<D: JobDriver> TransformingDriver<D> {
    /// Fails with a configuration error for invalid transformations,
    /// e.g. a non-positive scale factor
    pub fn new(inner: D, transformation: Transformation) -> PipelineResult<Self> {
        transformation.validate()?;
        Ok(Self {
            inner,
            transformation,
            bracket: JobBracket::default(),
        })
    }

    pub fn transformation(&self) -> &Transformation {
        &self.transformation
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }

    pub fn into_inner(self) -> D {
        self.inner
    }
}

impl<D: JobDriver> JobDriver for TransformingDriver<D> {
    fn name(&self) -> String {
        format!("{} with {}", self.inner.name(), self.transformation.describe())
    }

    fn start(&mut self) -> PipelineResult<()> {
        let name = self.name();
        self.bracket.enter(&name, || self.inner.start())
    }

    fn operate(&mut self, operation: Operation) -> PipelineResult<()> {
        self.bracket.check_operate(&self.name(), &operation)?;
        let target = self.transformation.apply(operation.position());
        self.inner.operate(operation.with_position(target))
    }

    fn finish(&mut self) -> PipelineResult<()> {
        self.bracket.finish(&self.name())?;
        self.inner.finish()
    }
}
