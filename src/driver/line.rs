use std::sync::Arc;

use egui::{Color32, Pos2, Shape, Stroke};
use parking_lot::Mutex;

use super::JobDriver;
use crate::command::Operation;
use crate::error::PipelineResult;

/// Shapes produced by line drivers, waiting for an external painter.
///
/// Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct ShapeSurface {
    shapes: Arc<Mutex<Vec<Shape>>>,
}

impl ShapeSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, shapes: impl IntoIterator<Item = Shape>) {
        self.shapes.lock().extend(shapes);
    }

    /// Takes every pending shape, leaving the surface empty
    pub fn drain(&self) -> Vec<Shape> {
        std::mem::take(&mut *self.shapes.lock())
    }

    pub fn len(&self) -> usize {
        self.shapes.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.lock().is_empty()
    }

    pub fn clear(&self) {
        self.shapes.lock().clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineKind {
    Solid,
    Dashed { dash: f32, gap: f32 },
}

/// How segments are painted
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub kind: LineKind,
    pub stroke: Stroke,
}

impl LineStyle {
    pub fn basic() -> Self {
        Self {
            kind: LineKind::Solid,
            stroke: Stroke::new(1.0, Color32::BLACK),
        }
    }

    pub fn special() -> Self {
        Self {
            kind: LineKind::Dashed { dash: 6.0, gap: 3.0 },
            stroke: Stroke::new(3.0, Color32::RED),
        }
    }

    fn segment(&self, from: Pos2, to: Pos2) -> Vec<Shape> {
        match self.kind {
            LineKind::Solid => vec![Shape::line_segment([from, to], self.stroke)],
            LineKind::Dashed { dash, gap } => Shape::dashed_line(&[from, to], self.stroke, dash, gap),
        }
    }
}

/// Turns the operation stream into line shapes on a [`ShapeSurface`]
#[derive(Debug, Clone)]
pub struct LineDriverAdapter {
    label: String,
    style: LineStyle,
    surface: ShapeSurface,
    position: Pos2,
}

impl LineDriverAdapter {
    pub fn new(surface: ShapeSurface, style: LineStyle, label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            style,
            surface,
            position: Pos2::ZERO,
        }
    }

    pub fn style(&self) -> &LineStyle {
        &self.style
    }

    pub fn position(&self) -> Pos2 {
        self.position
    }
}

impl JobDriver for LineDriverAdapter {
    fn name(&self) -> String {
        format!("Line driver ({})", self.label)
    }

    fn start(&mut self) -> PipelineResult<()> {
        Ok(())
    }

    fn operate(&mut self, operation: Operation) -> PipelineResult<()> {
        let target = operation.position();
        if operation.is_line() {
            self.surface.push(self.style.segment(self.position, target));
        }
        self.position = target;
        Ok(())
    }

    fn finish(&mut self) -> PipelineResult<()> {
        log::debug!("{}: {} shapes pending", self.name(), self.surface.len());
        Ok(())
    }
}
