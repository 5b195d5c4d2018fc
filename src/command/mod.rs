//! Command model: primitive operations, command trees and their traversals.

mod commands;
mod history;
mod importer;
mod operation;
pub mod presets;
mod registry;
mod visitor;
pub mod visitors;

pub use commands::{Command, CommandKind, NodeId};
pub use history::{HistoryEntry, JobHistory};
pub use importer::CommandImporter;
pub use operation::Operation;
pub use registry::CommandRegistry;
pub use visitor::{CommandVisitor, CommandVisitorMut};
pub use visitors::{deep_copy, flatten};
