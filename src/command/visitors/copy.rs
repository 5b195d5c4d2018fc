use crate::command::{Command, CommandVisitor, Operation};

struct Frame {
    name: String,
    secret: bool,
    children: Vec<Command>,
}

/// Rebuilds a visited tree with fresh node identities.
///
/// Operations are copied by value and every rebuilt child is owned by its
/// rebuilt parent, so nothing is shared with the source tree.
#[derive(Default)]
pub struct DeepCopyVisitor {
    stack: Vec<Frame>,
    root: Option<Command>,
}

impl DeepCopyVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// The copy of the last visited tree
    pub fn into_copy(self) -> Option<Command> {
        self.root
    }

    fn emit(&mut self, command: Command) {
        match self.stack.last_mut() {
            Some(frame) => frame.children.push(command),
            None => self.root = Some(command),
        }
    }

    fn push_frame(&mut self, command: &Command, secret: bool) {
        self.stack.push(Frame {
            name: command.name().to_string(),
            secret,
            children: Vec::new(),
        });
    }

    fn pop_frame(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        let rebuilt = if frame.secret {
            match frame.children.into_iter().next() {
                Some(inner) => Command::assemble_secret(frame.name, inner),
                None => return,
            }
        } else {
            Command::assemble_composite(frame.name, frame.children)
        };
        self.emit(rebuilt);
    }
}

impl CommandVisitor for DeepCopyVisitor {
    fn visit_leaf(&mut self, command: &Command, operations: &[Operation], _path: &[usize]) {
        self.emit(Command::leaf(command.name(), operations.iter().copied()));
    }

    fn visit_recorded(&mut self, command: &Command, operations: &[Operation], _path: &[usize]) {
        self.emit(Command::recorded(command.name(), operations.iter().copied()));
    }

    fn enter_composite(&mut self, command: &Command, _path: &[usize]) {
        self.push_frame(command, false);
    }

    fn exit_composite(&mut self, _command: &Command, _path: &[usize]) {
        self.pop_frame();
    }

    fn enter_secret(&mut self, command: &Command, _path: &[usize]) {
        self.push_frame(command, true);
    }

    fn exit_secret(&mut self, _command: &Command, _path: &[usize]) {
        self.pop_frame();
    }
}

/// Structurally identical, unowned copy of `command` with new identities
pub fn deep_copy(command: &Command) -> Command {
    let mut visitor = DeepCopyVisitor::new();
    command.accept(&mut visitor);
    // Every traversal emits a root
    visitor
        .into_copy()
        .unwrap_or_else(|| Command::leaf(command.name(), Vec::<Operation>::new()))
}
