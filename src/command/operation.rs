use std::fmt;

use egui::Pos2;
use serde::{Deserialize, Serialize};

/// Primitive drawing operation, the only thing a driver ever receives.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Operation {
    /// Lift the pen and move it to a position
    MoveTo(Pos2),
    /// Draw a straight line from the current pen position
    LineTo(Pos2),
}

impl Operation {
    pub fn move_to(x: f32, y: f32) -> Self {
        Operation::MoveTo(Pos2::new(x, y))
    }

    pub fn line_to(x: f32, y: f32) -> Self {
        Operation::LineTo(Pos2::new(x, y))
    }

    /// Target position of the operation
    pub fn position(&self) -> Pos2 {
        match self {
            Operation::MoveTo(pos) | Operation::LineTo(pos) => *pos,
        }
    }

    pub fn is_line(&self) -> bool {
        matches!(self, Operation::LineTo(_))
    }

    /// Same kind of operation, different target
    pub fn with_position(&self, pos: Pos2) -> Self {
        match self {
            Operation::MoveTo(_) => Operation::MoveTo(pos),
            Operation::LineTo(_) => Operation::LineTo(pos),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::MoveTo(pos) => write!(f, "move to ({}, {})", pos.x, pos.y),
            Operation::LineTo(pos) => write!(f, "line to ({}, {})", pos.x, pos.y),
        }
    }
}
