use crate::command::{Command, CommandVisitorMut, NodeId, Operation};
use crate::error::PipelineResult;
use crate::geometry::Transformation;

use super::deep_copy;

/// Rewrites the stored coordinates of a command tree
#[derive(Debug, Clone)]
pub struct TransformVisitor {
    transformation: Transformation,
}

impl TransformVisitor {
    /// Fails with a configuration error for invalid transformations
    pub fn new(transformation: Transformation) -> PipelineResult<Self> {
        transformation.validate()?;
        Ok(Self { transformation })
    }

    pub fn transformation(&self) -> &Transformation {
        &self.transformation
    }

    /// Transforms `command` permanently
    pub fn apply_in_place(&mut self, command: &mut Command) {
        log::debug!("Applying {} to {:?}", self.transformation.describe(), command.name());
        command.accept_mut(self);
    }

    /// Transformed deep copy, leaving `command` untouched
    pub fn transformed(&mut self, command: &Command) -> Command {
        let mut copy = deep_copy(command);
        self.apply_in_place(&mut copy);
        copy
    }
}

impl CommandVisitorMut for TransformVisitor {
    fn visit_operations_mut(&mut self, _node: NodeId, operations: &mut Vec<Operation>, _path: &[usize]) {
        for operation in operations.iter_mut() {
            *operation = operation.with_position(self.transformation.apply(operation.position()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_place_keeps_identity() {
        let mut command = Command::composite(
            "root",
            vec![Command::leaf("l", [Operation::move_to(1.0, 2.0), Operation::line_to(3.0, 4.0)])],
        )
        .unwrap();
        let ids = command.node_ids();

        TransformVisitor::new(Transformation::HorizontalFlip)
            .unwrap()
            .apply_in_place(&mut command);

        assert_eq!(command.node_ids(), ids);
        assert_eq!(
            command.children()[0].operations().unwrap(),
            &[Operation::move_to(-1.0, 2.0), Operation::line_to(-3.0, 4.0)]
        );
    }

    #[test]
    fn test_transformed_leaves_original() {
        let original = Command::leaf("l", [Operation::line_to(1.0, 1.0)]);
        let mut visitor = TransformVisitor::new(Transformation::scale(2.0).unwrap()).unwrap();
        let scaled = visitor.transformed(&original);

        assert_eq!(original.operations().unwrap(), &[Operation::line_to(1.0, 1.0)]);
        assert_eq!(scaled.operations().unwrap(), &[Operation::line_to(2.0, 2.0)]);
        assert_ne!(scaled.id(), original.id());
    }

    #[test]
    fn test_secret_content_is_transformed() {
        let mut secret = Command::secret("s", Command::leaf("l", [Operation::line_to(1.0, 0.0)])).unwrap();
        TransformVisitor::new(Transformation::shift(0.0, 5.0))
            .unwrap()
            .apply_in_place(&mut secret);

        let mut flat = crate::command::visitors::FlattenVisitor::default();
        secret.accept(&mut flat);
        assert_eq!(flat.into_operations(), vec![Operation::line_to(1.0, 5.0)]);
    }

    #[test]
    fn test_rejects_invalid_scale() {
        assert!(TransformVisitor::new(Transformation::Scale(0.0)).is_err());
    }
}
