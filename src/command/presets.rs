//! Sample jobs available from the command menu.

use egui::{Pos2, Vec2};

use super::{Command, Operation};
use crate::error::PipelineResult;

/// Closed rectangle with its top-left corner at `origin`
pub fn rectangle(name: &str, origin: Pos2, size: Vec2) -> Command {
    let Pos2 { x, y } = origin;
    Command::leaf(
        name,
        [
            Operation::move_to(x, y),
            Operation::line_to(x + size.x, y),
            Operation::line_to(x + size.x, y + size.y),
            Operation::line_to(x, y + size.y),
            Operation::line_to(x, y),
        ],
    )
}

/// Rectangle assembled from four single-side leaves
pub fn compound_rectangle() -> PipelineResult<Command> {
    let corners = [
        Pos2::new(-100.0, -60.0),
        Pos2::new(100.0, -60.0),
        Pos2::new(100.0, 60.0),
        Pos2::new(-100.0, 60.0),
    ];
    let sides = ["top", "right", "bottom", "left"]
        .iter()
        .enumerate()
        .map(|(index, side)| {
            let from = corners[index];
            let to = corners[(index + 1) % corners.len()];
            Command::leaf(
                format!("{} side", side),
                [Operation::MoveTo(from), Operation::LineTo(to)],
            )
        })
        .collect();
    Command::composite("Compound rectangle", sides)
}

/// A figure whose coordinates never show up in textual output
pub fn secret_command() -> PipelineResult<Command> {
    let zigzag = Command::leaf(
        "zigzag",
        [
            Operation::move_to(-20.0, -90.0),
            Operation::line_to(-10.0, -70.0),
            Operation::line_to(0.0, -90.0),
            Operation::line_to(10.0, -70.0),
            Operation::line_to(20.0, -90.0),
        ],
    );
    Command::secret("Secret command", zigzag)
}

/// Three levels of nested composites mixing every node kind
pub fn deeply_complex() -> PipelineResult<Command> {
    let inner = Command::composite(
        "inner",
        vec![
            rectangle("small square", Pos2::new(-10.0, -10.0), Vec2::splat(20.0)),
            Command::recorded(
                "cross",
                [
                    Operation::move_to(-5.0, 0.0),
                    Operation::line_to(5.0, 0.0),
                    Operation::move_to(0.0, -5.0),
                    Operation::line_to(0.0, 5.0),
                ],
            ),
        ],
    )?;
    let middle = Command::composite(
        "middle",
        vec![
            rectangle("medium square", Pos2::new(-40.0, -40.0), Vec2::splat(80.0)),
            inner,
        ],
    )?;
    Command::composite(
        "Deeply complex command",
        vec![
            rectangle("frame", Pos2::new(-80.0, -80.0), Vec2::splat(160.0)),
            middle,
            secret_command()?,
        ],
    )
}
