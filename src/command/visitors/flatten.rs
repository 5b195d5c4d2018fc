use crate::command::{Command, CommandVisitor, Operation};

/// Collects the primitive stream a driver receives for a command
#[derive(Debug, Default)]
pub struct FlattenVisitor {
    operations: Vec<Operation>,
}

impl FlattenVisitor {
    pub fn into_operations(self) -> Vec<Operation> {
        self.operations
    }
}

impl CommandVisitor for FlattenVisitor {
    fn visit_leaf(&mut self, _command: &Command, operations: &[Operation], _path: &[usize]) {
        self.operations.extend_from_slice(operations);
    }
}

pub fn flatten(command: &Command) -> Vec<Operation> {
    let mut visitor = FlattenVisitor::default();
    command.accept(&mut visitor);
    visitor.into_operations()
}
