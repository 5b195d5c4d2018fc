use std::fmt;

use thiserror::Error;

use crate::command::NodeId;

/// Errors raised by the command model, the drivers and the registries.
///
/// Exceeding the canvas is not an error; see
/// [`BoundaryReport`](crate::command::visitors::BoundaryReport).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PipelineError {
    /// A command node is already attached to a composite, or attaching it
    /// would make the tree cyclic.
    #[error("Command {node} is already owned by {owner}")]
    OwnershipConflict { node: NodeId, owner: NodeId },

    /// Children can only be attached to composite commands.
    #[error("Command {0} is not a composite")]
    NotComposite(NodeId),

    /// An operation arrived outside of the start/finish bracket.
    #[error("Protocol violation in {driver}: {detail}")]
    ProtocolViolation { driver: String, detail: String },

    /// Invalid construction parameters, e.g. a non-positive scale factor.
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// One or more members of a composite driver failed.
    #[error(transparent)]
    AggregatedDriver(#[from] AggregatedDriverError),

    /// An adapter driver could not produce its effect.
    #[error("Driver {driver} failed: {message}")]
    Driver { driver: String, message: String },

    /// A registry lookup found nothing under the given name.
    #[error("No {registry} registered under {name:?}")]
    UnknownEntry { registry: &'static str, name: String },

    /// An external importer rejected its source.
    #[error("Import failed: {0}")]
    Import(String),
}

/// Result type for pipeline operations
pub type PipelineResult<T = ()> = Result<T, PipelineError>;

/// A single failed member of a fan-out.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberFailure {
    /// Registration index of the member inside the composite
    pub index: usize,
    /// Display name of the member driver
    pub driver: String,
    pub error: PipelineError,
}

/// Every failure collected during one sweep over a composite driver.
#[derive(Debug, Clone, Default, Error, PartialEq)]
pub struct AggregatedDriverError {
    pub failures: Vec<MemberFailure>,
}

impl AggregatedDriverError {
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Indices of the members that failed, in registration order
    pub fn failed_indices(&self) -> Vec<usize> {
        self.failures.iter().map(|failure| failure.index).collect()
    }
}

impl fmt::Display for AggregatedDriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} driver(s) failed", self.failures.len())?;
        for failure in &self.failures {
            write!(f, "; #{} {}: {}", failure.index, failure.driver, failure.error)?;
        }
        Ok(())
    }
}
