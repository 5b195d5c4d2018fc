use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::{JobBracket, JobDriver};
use crate::command::Operation;
use crate::error::PipelineResult;

/// Cancellation flag shared between a running job and whoever wants to stop it
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.cancelled.store(false, Ordering::SeqCst);
    }
}

/// Suspension point between two forwarded operations
pub trait Pacer: Send {
    /// Returns early once `cancel` is triggered
    fn pause(&mut self, cancel: &CancelToken);
}

/// Sleeps the calling thread, waking up regularly to check for cancellation.
///
/// A paced job blocks whoever runs it for the whole drawing. Hosts with a
/// single UI loop run the chain on a worker thread and keep the
/// [`CancelToken`] on the UI side.
#[derive(Debug, Clone)]
pub struct SleepPacer {
    interval: Duration,
}

impl SleepPacer {
    const SLICE: Duration = Duration::from_millis(5);

    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Pacer for SleepPacer {
    fn pause(&mut self, cancel: &CancelToken) {
        let deadline = Instant::now() + self.interval;
        loop {
            if cancel.is_cancelled() {
                return;
            }
            let now = Instant::now();
            if now >= deadline {
                return;
            }
            std::thread::sleep((deadline - now).min(Self::SLICE));
        }
    }
}

/// Slows the stream down so a viewer can watch the drawing appear.
///
/// Cancelling only stops the pauses: every operation is still forwarded in
/// order and `finish` still reaches the wrapped driver.
pub struct RealTimeDriver<D> {
    inner: D,
    pacer: Box<dyn Pacer>,
    cancel: CancelToken,
    bracket: JobBracket,
    forwarded: usize,
}

impl<D: JobDriver> RealTimeDriver<D> {
    pub fn new(inner: D, interval: Duration) -> Self {
        Self::with_pacer(inner, SleepPacer::new(interval))
    }

    pub fn with_pacer(inner: D, pacer: impl Pacer + 'static) -> Self {
        Self {
            inner,
            pacer: Box::new(pacer),
            cancel: CancelToken::new(),
            bracket: JobBracket::default(),
            forwarded: 0,
        }
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }
}

impl<D: JobDriver> std::fmt::Debug for RealTimeDriver<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealTimeDriver")
            .field("inner", &self.inner.name())
            .field("cancelled", &self.cancel.is_cancelled())
            .field("bracket", &self.bracket)
            .finish_non_exhaustive()
    }
}

impl<D: JobDriver> JobDriver for RealTimeDriver<D> {
    fn name(&self) -> String {
        format!("{} (real time)", self.inner.name())
    }

    fn start(&mut self) -> PipelineResult<()> {
        let name = self.name();
        self.bracket.enter(&name, || self.inner.start())?;
        self.forwarded = 0;
        Ok(())
    }

    fn operate(&mut self, operation: Operation) -> PipelineResult<()> {
        self.bracket.check_operate(&self.name(), &operation)?;
        if self.forwarded > 0 && !self.cancel.is_cancelled() {
            self.pacer.pause(&self.cancel);
        }
        self.forwarded += 1;
        self.inner.operate(operation)
    }

    fn finish(&mut self) -> PipelineResult<()> {
        self.bracket.finish(&self.name())?;
        if self.cancel.is_cancelled() {
            log::info!("{}: job was cancelled, pacing skipped", self.name());
            self.cancel.reset();
        }
        self.inner.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;
    use crate::driver::{run_job, RecordingDriver};
    use parking_lot::Mutex;

    /// Cancels the job on the n-th pause and counts pauses
    struct CancellingPacer {
        cancel_at: usize,
        pauses: Arc<Mutex<usize>>,
        token: CancelToken,
    }

    impl Pacer for CancellingPacer {
        fn pause(&mut self, _cancel: &CancelToken) {
            let mut pauses = self.pauses.lock();
            *pauses += 1;
            if *pauses == self.cancel_at {
                self.token.cancel();
            }
        }
    }

    fn square() -> Command {
        Command::leaf(
            "square",
            [
                Operation::move_to(0.0, 0.0),
                Operation::line_to(1.0, 0.0),
                Operation::line_to(1.0, 1.0),
                Operation::line_to(0.0, 1.0),
                Operation::line_to(0.0, 0.0),
            ],
        )
    }

    #[test]
    fn test_pauses_between_operations() {
        let pauses = Arc::new(Mutex::new(0));
        let token = CancelToken::new();
        let pacer = CancellingPacer { cancel_at: usize::MAX, pauses: pauses.clone(), token };
        let mut driver = RealTimeDriver::with_pacer(RecordingDriver::new(), pacer);

        run_job(&square(), &mut driver).unwrap();
        assert_eq!(*pauses.lock(), 4);
        assert_eq!(driver.inner().operations().len(), 5);
    }

    #[test]
    fn test_cancellation_still_forwards_everything() {
        let pauses = Arc::new(Mutex::new(0));
        let mut driver = RealTimeDriver::with_pacer(RecordingDriver::new(), SleepPacer::from_millis(0));
        let pacer = CancellingPacer { cancel_at: 2, pauses: pauses.clone(), token: driver.cancel_token() };
        driver.pacer = Box::new(pacer);

        run_job(&square(), &mut driver).unwrap();

        assert_eq!(*pauses.lock(), 2);
        assert_eq!(driver.inner().operations(), crate::command::flatten(&square()).as_slice());
        assert!(!driver.cancel_token().is_cancelled());
        assert!(!driver.bracket.is_running());
    }

    #[test]
    fn test_sleep_pacer_returns_on_cancel() {
        let token = CancelToken::new();
        token.cancel();
        let mut pacer = SleepPacer::from_millis(10_000);

        let started = Instant::now();
        pacer.pause(&token);
        assert!(started.elapsed() < Duration::from_secs(1));
    }
}
