use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, PipelineResult};
use crate::registry::NamedRegistry;

/// Legal drawing region, centred on the origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Canvas {
    Rectangle { half_width: f32, half_height: f32 },
    Circle { radius: f32 },
}

impl Canvas {
    pub fn rectangle(half_width: f32, half_height: f32) -> PipelineResult<Self> {
        if !(half_width > 0.0 && half_height > 0.0) {
            return Err(PipelineError::Configuration(format!(
                "canvas extents must be positive, got {}x{}",
                half_width, half_height
            )));
        }
        Ok(Canvas::Rectangle { half_width, half_height })
    }

    pub fn circle(radius: f32) -> PipelineResult<Self> {
        if !(radius > 0.0) {
            return Err(PipelineError::Configuration(format!(
                "canvas radius must be positive, got {}",
                radius
            )));
        }
        Ok(Canvas::Circle { radius })
    }

    /// Containment test, boundary inclusive
    pub fn contains(&self, pos: Pos2) -> bool {
        match *self {
            Canvas::Rectangle { .. } => self.bounds().contains(pos),
            Canvas::Circle { radius } => pos.distance(Pos2::ZERO) <= radius,
        }
    }

    /// Axis-aligned box enclosing the canvas
    pub fn bounds(&self) -> Rect {
        let size = match *self {
            Canvas::Rectangle { half_width, half_height } => Vec2::new(half_width, half_height) * 2.0,
            Canvas::Circle { radius } => Vec2::splat(radius * 2.0),
        };
        Rect::from_center_size(Pos2::ZERO, size)
    }
}

/// Named canvases with exactly one current entry once any is added
pub type CanvasRegistry = NamedRegistry<Canvas>;

impl CanvasRegistry {
    pub fn for_canvases() -> Self {
        NamedRegistry::new("canvas")
    }

    /// The current canvas, if any was registered
    pub fn current_canvas(&self) -> Option<Canvas> {
        self.current().map(|(_, canvas)| *canvas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_edges_are_inside() {
        let canvas = Canvas::rectangle(100.0, 50.0).unwrap();
        assert!(canvas.contains(Pos2::new(100.0, 0.0)));
        assert!(canvas.contains(Pos2::new(-100.0, -50.0)));
        assert!(!canvas.contains(Pos2::new(101.0, 0.0)));
        assert!(!canvas.contains(Pos2::new(0.0, 50.5)));
    }

    #[test]
    fn test_circle_containment() {
        let canvas = Canvas::circle(10.0).unwrap();
        assert!(canvas.contains(Pos2::new(6.0, 8.0)));
        assert!(!canvas.contains(Pos2::new(8.0, 8.0)));
        assert_eq!(canvas.bounds().width(), 20.0);
    }

    #[test]
    fn test_invalid_extents() {
        assert!(Canvas::rectangle(0.0, 10.0).is_err());
        assert!(Canvas::circle(-1.0).is_err());
        assert!(Canvas::circle(f32::NAN).is_err());
    }

    #[test]
    fn test_registry_current_canvas() {
        let mut canvases = CanvasRegistry::for_canvases();
        assert_eq!(canvases.current_canvas(), None);

        canvases.add("A4", Canvas::rectangle(105.0, 148.5).unwrap());
        canvases.add("Circle", Canvas::circle(100.0).unwrap());
        assert_eq!(canvases.current_name(), Some("A4"));

        canvases.set_current("Circle").unwrap();
        assert_eq!(canvases.current_canvas(), Some(Canvas::Circle { radius: 100.0 }));
    }
}
