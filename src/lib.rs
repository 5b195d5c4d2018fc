#![warn(clippy::all, rust_2018_idioms)]

pub mod canvas;
pub mod command;
pub mod context;
pub mod driver;
pub mod error;
pub mod event;
pub mod geometry;
pub mod logging;
pub mod registry;
pub mod settings;
pub mod util;

pub use canvas::{Canvas, CanvasRegistry};
pub use command::presets;
pub use command::visitors::{BoundaryReport, BoundsViolation, CanvasBoundaryVisitor, CommandStats};
pub use command::{Command, CommandKind, CommandRegistry, CommandVisitor, JobHistory, NodeId, Operation};
pub use context::{DefaultDriverHandles, PlotterContext};
pub use driver::{run_job, DriverComposite, DriverRegistry, JobDriver, ShapeSurface};
pub use error::{AggregatedDriverError, PipelineError, PipelineResult};
pub use event::{ChangePublisher, RegistryEvent, Subscriber, SubscriberError};
pub use geometry::Transformation;
pub use logging::{init_logging, LoggingConfig};
pub use settings::{PipelineSettings, SettingsError};
