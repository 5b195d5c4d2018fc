//! Traversals over command trees.
//!
//! Read-only visitors implement [`CommandVisitor`](super::CommandVisitor);
//! the transform visitor rewrites coordinates through
//! [`CommandVisitorMut`](super::CommandVisitorMut).

mod boundary;
mod copy;
mod flatten;
mod stats;
mod summary;
mod transform;

pub use boundary::{BoundaryReport, BoundsViolation, CanvasBoundaryVisitor};
pub use copy::{deep_copy, DeepCopyVisitor};
pub use flatten::{flatten, FlattenVisitor};
pub use stats::{CommandStats, StatisticsVisitor};
pub use summary::{summarize, SummaryVisitor};
pub use transform::TransformVisitor;
