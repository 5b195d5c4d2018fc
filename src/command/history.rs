use std::collections::VecDeque;

use super::{deep_copy, Command};
use crate::driver::{run_job, JobDriver};
use crate::error::{PipelineError, PipelineResult};
use crate::util::time;

/// One executed job
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// Snapshot of the command as it was run
    pub command: Command,
    /// Name of the driver that ran it
    pub driver: String,
    /// Seconds since the UNIX epoch
    pub timestamp: u64,
}

/// Bounded log of executed jobs, oldest first
#[derive(Debug, Clone)]
pub struct JobHistory {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl Default for JobHistory {
    fn default() -> Self {
        Self::new(JobHistory::DEFAULT_CAPACITY)
    }
}

impl JobHistory {
    pub const DEFAULT_CAPACITY: usize = 32;

    /// A capacity of zero keeps nothing
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(Self::DEFAULT_CAPACITY)),
            capacity,
        }
    }

    /// Stores a deep copy of `command`, evicting the oldest entry when full
    pub fn record(&mut self, command: &Command, driver: &str) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(HistoryEntry {
            command: deep_copy(command),
            driver: driver.to_string(),
            timestamp: time::timestamp_secs(),
        });
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Runs the command stored at `index` again on `driver`
    pub fn replay<D: JobDriver + ?Sized>(&self, index: usize, driver: &mut D) -> PipelineResult<()> {
        let entry = self.entries.get(index).ok_or_else(|| PipelineError::UnknownEntry {
            registry: "history",
            name: index.to_string(),
        })?;
        log::info!("Replaying {:?} from history on {}", entry.command.name(), driver.name());
        run_job(&entry.command, driver)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Operation;
    use crate::driver::RecordingDriver;

    fn job(name: &str) -> Command {
        Command::leaf(name, [Operation::move_to(0.0, 0.0), Operation::line_to(1.0, 1.0)])
    }

    #[test]
    fn test_record_keeps_snapshot() {
        let mut history = JobHistory::default();
        let mut command = job("first");
        history.record(&command, "logger");
        command.set_name("renamed");

        let entry = history.last().unwrap();
        assert_eq!(entry.command.name(), "first");
        assert_ne!(entry.command.id(), command.id());
        assert_eq!(entry.driver, "logger");
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut history = JobHistory::new(2);
        history.record(&job("a"), "d");
        history.record(&job("b"), "d");
        history.record(&job("c"), "d");

        let names: Vec<_> = history.iter().map(|entry| entry.command.name().to_string()).collect();
        assert_eq!(names, vec!["b", "c"]);
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let mut history = JobHistory::new(0);
        history.record(&job("a"), "d");
        assert!(history.is_empty());
    }

    #[test]
    fn test_replay_runs_stored_job() {
        let mut history = JobHistory::default();
        history.record(&job("a"), "d");

        let mut recorder = RecordingDriver::new();
        history.replay(0, &mut recorder).unwrap();
        assert_eq!(
            recorder.operations(),
            &[Operation::move_to(0.0, 0.0), Operation::line_to(1.0, 1.0)]
        );

        assert!(matches!(
            history.replay(5, &mut recorder),
            Err(PipelineError::UnknownEntry { registry: "history", .. })
        ));
    }
}
