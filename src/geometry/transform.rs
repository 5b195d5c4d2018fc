use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, PipelineResult};

/// Affine map applied to drawing coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Transformation {
    /// `(x, y) -> (-x, y)`
    HorizontalFlip,
    /// `(x, y) -> (x, -y)`
    VerticalFlip,
    /// Uniform scale about the origin; the factor must be positive
    Scale(f32),
    /// Counter-clockwise rotation about the origin, in degrees
    Rotate(f32),
    /// Translation by a fixed offset
    Shift(Vec2),
    /// Applies each map in order, first element first
    Chain(Vec<Transformation>),
}

impl Transformation {
    /// Scale by `factor`, rejecting non-positive or non-finite factors
    pub fn scale(factor: f32) -> PipelineResult<Self> {
        let scale = Transformation::Scale(factor);
        scale.validate()?;
        Ok(scale)
    }

    pub fn rotate(degrees: f32) -> Self {
        Transformation::Rotate(degrees)
    }

    pub fn shift(dx: f32, dy: f32) -> Self {
        Transformation::Shift(Vec2::new(dx, dy))
    }

    /// `self` first, then `next`
    pub fn then(self, next: Transformation) -> Self {
        match self {
            Transformation::Chain(mut steps) => {
                steps.push(next);
                Transformation::Chain(steps)
            }
            first => Transformation::Chain(vec![first, next]),
        }
    }

    pub fn validate(&self) -> PipelineResult<()> {
        match self {
            Transformation::Scale(factor) if !(factor.is_finite() && *factor > 0.0) => Err(
                PipelineError::Configuration(format!("scale factor must be positive, got {}", factor)),
            ),
            Transformation::Rotate(degrees) if !degrees.is_finite() => Err(PipelineError::Configuration(
                format!("rotation must be finite, got {}", degrees),
            )),
            Transformation::Shift(offset) if !(offset.x.is_finite() && offset.y.is_finite()) => Err(
                PipelineError::Configuration(format!("shift must be finite, got {:?}", offset)),
            ),
            Transformation::Chain(steps) => steps.iter().try_for_each(Transformation::validate),
            _ => Ok(()),
        }
    }

    pub fn apply(&self, pos: Pos2) -> Pos2 {
        match self {
            Transformation::HorizontalFlip => Pos2::new(-pos.x, pos.y),
            Transformation::VerticalFlip => Pos2::new(pos.x, -pos.y),
            Transformation::Scale(factor) => Pos2::new(pos.x * factor, pos.y * factor),
            Transformation::Rotate(degrees) => {
                let (sin, cos) = degrees.to_radians().sin_cos();
                Pos2::new(pos.x * cos - pos.y * sin, pos.x * sin + pos.y * cos)
            }
            Transformation::Shift(offset) => pos + *offset,
            Transformation::Chain(steps) => steps.iter().fold(pos, |pos, step| step.apply(pos)),
        }
    }

    /// Short label for driver names and logs
    pub fn describe(&self) -> String {
        match self {
            Transformation::HorizontalFlip => "horizontal flip".to_string(),
            Transformation::VerticalFlip => "vertical flip".to_string(),
            Transformation::Scale(factor) => format!("scale {}", factor),
            Transformation::Rotate(degrees) => format!("rotate {}deg", degrees),
            Transformation::Shift(offset) => format!("shift ({}, {})", offset.x, offset.y),
            Transformation::Chain(steps) => steps
                .iter()
                .map(Transformation::describe)
                .collect::<Vec<_>>()
                .join(" then "),
        }
    }
}
