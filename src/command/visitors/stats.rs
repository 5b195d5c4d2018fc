use std::fmt;

use crate::command::{Command, CommandVisitor, Operation};

/// Counts gathered over a command tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommandStats {
    pub operations: usize,
    pub moves: usize,
    pub lines: usize,
    /// Leaf-like nodes, recorded ones included
    pub leaves: usize,
    pub recorded: usize,
    pub secrets: usize,
    pub composites: usize,
    /// Depth of the deepest node, the root being at depth 1
    pub max_depth: usize,
}

impl CommandStats {
    pub fn of(command: &Command) -> Self {
        let mut visitor = StatisticsVisitor::default();
        command.accept(&mut visitor);
        visitor.stats
    }
}

impl fmt::Display for CommandStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} operations ({} moves, {} lines), {} leaves, {} composites, depth {}",
            self.operations, self.moves, self.lines, self.leaves, self.composites, self.max_depth
        )
    }
}

#[derive(Debug, Default)]
pub struct StatisticsVisitor {
    stats: CommandStats,
}

impl StatisticsVisitor {
    pub fn stats(&self) -> CommandStats {
        self.stats
    }

    fn reach(&mut self, path: &[usize]) {
        self.stats.max_depth = self.stats.max_depth.max(path.len() + 1);
    }

    fn count(&mut self, operations: &[Operation], path: &[usize]) {
        self.reach(path);
        self.stats.leaves += 1;
        self.stats.operations += operations.len();
        self.stats.lines += operations.iter().filter(|op| op.is_line()).count();
        self.stats.moves += operations.iter().filter(|op| !op.is_line()).count();
    }
}

impl CommandVisitor for StatisticsVisitor {
    fn visit_leaf(&mut self, _command: &Command, operations: &[Operation], path: &[usize]) {
        self.count(operations, path);
    }

    fn visit_recorded(&mut self, _command: &Command, operations: &[Operation], path: &[usize]) {
        self.stats.recorded += 1;
        self.count(operations, path);
    }

    fn enter_composite(&mut self, _command: &Command, path: &[usize]) {
        self.reach(path);
        self.stats.composites += 1;
    }

    fn enter_secret(&mut self, _command: &Command, path: &[usize]) {
        self.reach(path);
        self.stats.secrets += 1;
    }
}
