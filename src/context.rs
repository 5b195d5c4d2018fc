//! Application-scoped owner of the registries.
//!
//! A [`PlotterContext`] replaces the process-wide "current command / driver /
//! canvas" state: whoever needs one of them gets the context by reference.
//!
//! # Example
//!
//! ```rust,no_run
//! use jobs2d::{presets, Canvas, PipelineSettings, PlotterContext, ShapeSurface};
//!
//! let mut context = PlotterContext::new(PipelineSettings::default());
//! context.canvases.add("A4", Canvas::rectangle(105.0, 148.5).unwrap());
//! context.install_default_drivers(ShapeSurface::new()).unwrap();
//! context.commands.add_and_select("Compound rectangle", presets::compound_rectangle().unwrap()).unwrap();
//!
//! if let Some(report) = context.check_current_command() {
//!     println!("{} violations", report.violations.len());
//! }
//! context.run_current_job().unwrap();
//! ```

use std::fmt;

use crate::canvas::CanvasRegistry;
use crate::command::visitors::{BoundaryReport, CanvasBoundaryVisitor};
use crate::command::{CommandRegistry, JobHistory};
use crate::driver::{
    CancelToken, CanvasAwareDriver, CanvasSlot, DriverComposite, DriverRegistry, JobDriver, LineDriverAdapter, LoggerDriver,
    RealTimeDriver, RecordingDriver, ShapeSurface, TransformingDriver, UsageHandle, UsageMonitorDriver,
};
use crate::error::{PipelineError, PipelineResult};
use crate::geometry::Transformation;
use crate::settings::PipelineSettings;

/// Side channels of the drivers registered by
/// [`PlotterContext::install_default_drivers`]
#[derive(Debug, Clone)]
pub struct DefaultDriverHandles {
    /// Counters of the "Usage monitored line" driver
    pub usage: UsageHandle,
    /// Stops the pacing of the "Real-time line" driver
    pub cancel: CancelToken,
}

/// Registries, job history and settings of one plotter session
pub struct PlotterContext {
    pub commands: CommandRegistry,
    pub drivers: DriverRegistry,
    pub canvases: CanvasRegistry,
    pub history: JobHistory,
    pub settings: PipelineSettings,
    canvas_slot: Option<CanvasSlot>,
}

impl PlotterContext {
    pub fn new(settings: PipelineSettings) -> Self {
        Self {
            commands: CommandRegistry::for_commands(),
            drivers: DriverRegistry::for_drivers(),
            canvases: CanvasRegistry::for_canvases(),
            history: JobHistory::new(settings.history_capacity),
            settings,
            canvas_slot: None,
        }
    }

    /// Registers the stock driver set, all drawing onto `surface`.
    ///
    /// The canvas-aware driver is only added when a canvas is current. It
    /// follows later canvas switches: every job run through the context
    /// checks against the canvas current at that time.
    pub fn install_default_drivers(&mut self, surface: ShapeSurface) -> PipelineResult<DefaultDriverHandles> {
        let basic = self.settings.basic_line_style();
        let special = self.settings.special_line_style();
        let line = |label: &str| LineDriverAdapter::new(surface.clone(), basic, label);

        self.drivers.add_driver("Simple logger", LoggerDriver::simple());
        self.drivers.add_driver("Detailed logger", LoggerDriver::detailed());
        self.drivers.add_driver("Basic line", line("basic"));
        self.drivers
            .add_driver("Special line", LineDriverAdapter::new(surface.clone(), special, "special"));

        let usage = UsageMonitorDriver::new(line("monitored"));
        let usage_handle = usage.handle();
        self.drivers.add_driver("Usage monitored line", usage);

        let realtime = RealTimeDriver::new(line("real time"), self.settings.real_time_interval());
        let cancel = realtime.cancel_token();
        self.drivers.add_driver("Real-time line", realtime);

        self.drivers.add_driver(
            "Line and logger",
            DriverComposite::new("Line and logger")
                .with_driver(line("composite"))
                .with_driver(LoggerDriver::simple()),
        );
        self.drivers.add_driver(
            "Vertically flipped",
            TransformingDriver::new(line("flipped"), Transformation::VerticalFlip)?,
        );
        self.drivers.add_driver(
            "Shifted and flipped",
            TransformingDriver::new(
                TransformingDriver::new(line("shifted"), Transformation::shift(20.0, 20.0))?,
                Transformation::HorizontalFlip,
            )?,
        );
        self.drivers.add_driver(
            "Scaled and rotated",
            TransformingDriver::new(
                TransformingDriver::new(line("scaled"), Transformation::rotate(90.0))?,
                Transformation::scale(1.5)?,
            )?,
        );
        if let Some(canvas) = self.canvases.current_canvas() {
            let slot = CanvasSlot::new(canvas);
            self.drivers
                .add_driver("Canvas aware line", CanvasAwareDriver::following(line("canvas aware"), slot.clone()));
            self.canvas_slot = Some(slot);
        }

        log::info!("Installed {} drivers", self.drivers.len());
        Ok(DefaultDriverHandles {
            usage: usage_handle,
            cancel,
        })
    }

    /// Runs the current command on the current driver and records it in the
    /// job history when it succeeds.
    pub fn run_current_job(&mut self) -> PipelineResult<()> {
        self.sync_canvas();
        let command = self.commands.current_command().ok_or(PipelineError::UnknownEntry {
            registry: self.commands.label(),
            name: "<current>".to_string(),
        })?;
        let driver = self.drivers.run_on_current(command)?;
        self.history.record(command, &driver);
        Ok(())
    }

    /// Checks the current command against the current canvas
    pub fn check_current_command(&self) -> Option<BoundaryReport> {
        let command = self.commands.current_command()?;
        let canvas = self.canvases.current_canvas()?;
        Some(CanvasBoundaryVisitor::check(canvas, command))
    }

    /// Replays a history entry on the current driver
    pub fn replay(&mut self, index: usize) -> PipelineResult<()> {
        self.sync_canvas();
        let (_, driver) = self.drivers.current_mut().ok_or(PipelineError::UnknownEntry {
            registry: "driver",
            name: "<current>".to_string(),
        })?;
        self.history.replay(index, driver)
    }

    /// Turns what `recorder` captured into a recorded command and makes it
    /// the current command
    pub fn register_recording(&mut self, recorder: &mut RecordingDriver, name: &str) -> PipelineResult<()> {
        let command = recorder.take_command(name);
        self.commands.add_and_select(name, command)
    }

    fn sync_canvas(&self) {
        if let (Some(slot), Some(canvas)) = (&self.canvas_slot, self.canvases.current_canvas()) {
            slot.set(canvas);
        }
    }

    pub fn current_driver_name(&self) -> Option<String> {
        self.drivers.current().map(|(_, driver)| driver.name())
    }
}

impl Default for PlotterContext {
    fn default() -> Self {
        Self::new(PipelineSettings::default())
    }
}

impl fmt::Debug for PlotterContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlotterContext")
            .field("commands", &self.commands.names())
            .field("drivers", &self.drivers.names())
            .field("canvases", &self.canvases.names())
            .field("history", &self.history.len())
            .field("settings", &self.settings)
            .finish()
    }
}
