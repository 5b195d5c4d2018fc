use super::{Command, CommandKind, NodeId, Operation};

/// Read-only traversal of a command tree.
///
/// `path` is the sequence of child indices from the root to the visited node;
/// the root has an empty path and the content of a secret node sits at index 0
/// below it. Every method defaults to doing nothing, and recorded nodes are
/// treated as leaves unless `visit_recorded` is overridden.
pub trait CommandVisitor {
    fn visit_leaf(&mut self, _command: &Command, _operations: &[Operation], _path: &[usize]) {}

    fn visit_recorded(&mut self, command: &Command, operations: &[Operation], path: &[usize]) {
        self.visit_leaf(command, operations, path);
    }

    fn enter_composite(&mut self, _command: &Command, _path: &[usize]) {}

    fn exit_composite(&mut self, _command: &Command, _path: &[usize]) {}

    fn enter_secret(&mut self, _command: &Command, _path: &[usize]) {}

    fn exit_secret(&mut self, _command: &Command, _path: &[usize]) {}
}

/// Mutable traversal, reaching every stored operation sequence in order.
pub trait CommandVisitorMut {
    fn visit_operations_mut(&mut self, node: NodeId, operations: &mut Vec<Operation>, path: &[usize]);
}

impl Command {
    /// Dispatches `visitor` over this tree in authoring order.
    pub fn accept<V: CommandVisitor + ?Sized>(&self, visitor: &mut V) {
        let mut path = Vec::new();
        self.walk(visitor, &mut path);
    }

    fn walk<V: CommandVisitor + ?Sized>(&self, visitor: &mut V, path: &mut Vec<usize>) {
        match self.kind() {
            CommandKind::Leaf(operations) => visitor.visit_leaf(self, operations, path),
            CommandKind::Recorded(operations) => visitor.visit_recorded(self, operations, path),
            CommandKind::Composite(children) => {
                visitor.enter_composite(self, path);
                for (index, child) in children.iter().enumerate() {
                    path.push(index);
                    child.walk(visitor, path);
                    path.pop();
                }
                visitor.exit_composite(self, path);
            }
            CommandKind::Secret(inner) => {
                visitor.enter_secret(self, path);
                path.push(0);
                inner.walk(visitor, path);
                path.pop();
                visitor.exit_secret(self, path);
            }
        }
    }

    /// Mutable counterpart of [`Command::accept`].
    pub fn accept_mut<V: CommandVisitorMut + ?Sized>(&mut self, visitor: &mut V) {
        let mut path = Vec::new();
        self.walk_mut(visitor, &mut path);
    }

    fn walk_mut<V: CommandVisitorMut + ?Sized>(&mut self, visitor: &mut V, path: &mut Vec<usize>) {
        let id = self.id();
        match self.kind_mut() {
            CommandKind::Leaf(operations) | CommandKind::Recorded(operations) => {
                visitor.visit_operations_mut(id, operations, path)
            }
            CommandKind::Composite(children) => {
                for (index, child) in children.iter_mut().enumerate() {
                    path.push(index);
                    child.walk_mut(visitor, path);
                    path.pop();
                }
            }
            CommandKind::Secret(inner) => {
                path.push(0);
                inner.walk_mut(visitor, path);
                path.pop();
            }
        }
    }
}
