use std::fmt;

use egui::Pos2;

use crate::canvas::Canvas;
use crate::command::{Command, CommandVisitor, Operation};

/// A drawn segment leaving the canvas
#[derive(Clone, PartialEq)]
pub struct BoundsViolation {
    /// Child indices from the root, ending with the operation index in its leaf
    pub path: Vec<usize>,
    pub from: Pos2,
    pub to: Pos2,
    /// Set when the segment belongs to secret content
    pub concealed: bool,
}

impl fmt::Debug for BoundsViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("BoundsViolation");
        debug.field("path", &self.path);
        if self.concealed {
            return debug.field("concealed", &true).finish_non_exhaustive();
        }
        debug
            .field("from", &self.from)
            .field("to", &self.to)
            .field("concealed", &false)
            .finish()
    }
}

impl fmt::Display for BoundsViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.concealed {
            write!(f, "segment at {:?} exceeds the canvas", self.path)
        } else {
            write!(
                f,
                "segment ({}, {}) -> ({}, {}) at {:?} exceeds the canvas",
                self.from.x, self.from.y, self.to.x, self.to.y, self.path
            )
        }
    }
}

/// Outcome of a boundary check; exceeding the canvas is a finding, not an error
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundaryReport {
    pub violations: Vec<BoundsViolation>,
    /// Number of `LineTo` segments checked
    pub segments_checked: usize,
}

impl BoundaryReport {
    pub fn exceeded(&self) -> bool {
        !self.violations.is_empty()
    }

    pub fn first(&self) -> Option<&BoundsViolation> {
        self.violations.first()
    }
}

/// Follows the pen through a tree and collects every segment whose
/// endpoints are not both inside the canvas.
#[derive(Debug)]
pub struct CanvasBoundaryVisitor {
    canvas: Canvas,
    pen: Pos2,
    secret_depth: usize,
    report: BoundaryReport,
}

impl CanvasBoundaryVisitor {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            pen: Pos2::ZERO,
            secret_depth: 0,
            report: BoundaryReport::default(),
        }
    }

    /// Checks `command` against `canvas` from a pen at the origin
    pub fn check(canvas: Canvas, command: &Command) -> BoundaryReport {
        let mut visitor = Self::new(canvas);
        command.accept(&mut visitor);
        visitor.into_report()
    }

    pub fn into_report(self) -> BoundaryReport {
        self.report
    }
}

impl CommandVisitor for CanvasBoundaryVisitor {
    fn visit_leaf(&mut self, _command: &Command, operations: &[Operation], path: &[usize]) {
        for (index, operation) in operations.iter().enumerate() {
            match *operation {
                Operation::MoveTo(target) => self.pen = target,
                Operation::LineTo(target) => {
                    self.report.segments_checked += 1;
                    if !(self.canvas.contains(self.pen) && self.canvas.contains(target)) {
                        let mut violation_path = path.to_vec();
                        violation_path.push(index);
                        self.report.violations.push(BoundsViolation {
                            path: violation_path,
                            from: self.pen,
                            to: target,
                            concealed: self.secret_depth > 0,
                        });
                    }
                    self.pen = target;
                }
            }
        }
    }

    fn enter_secret(&mut self, _command: &Command, _path: &[usize]) {
        self.secret_depth += 1;
    }

    fn exit_secret(&mut self, _command: &Command, _path: &[usize]) {
        self.secret_depth -= 1;
    }
}
