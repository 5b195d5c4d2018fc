use crate::command::{Command, CommandVisitor, Operation};

/// Indented outline of a command tree for manager views and logs.
///
/// Secret nodes appear by name only; nothing below them is written.
#[derive(Debug, Default)]
pub struct SummaryVisitor {
    lines: Vec<String>,
    secret_depth: usize,
}

impl SummaryVisitor {
    pub fn into_text(self) -> String {
        self.lines.join("\n")
    }

    fn write(&mut self, path: &[usize], text: String) {
        if self.secret_depth == 0 {
            self.lines.push(format!("{}{}", "  ".repeat(path.len()), text));
        }
    }

    fn write_operations(&mut self, label: &str, command: &Command, operations: &[Operation], path: &[usize]) {
        let listed = operations
            .iter()
            .map(Operation::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        self.write(path, format!("{} {:?}: {}", label, command.name(), listed));
    }
}

impl CommandVisitor for SummaryVisitor {
    fn visit_leaf(&mut self, command: &Command, operations: &[Operation], path: &[usize]) {
        self.write_operations("leaf", command, operations, path);
    }

    fn visit_recorded(&mut self, command: &Command, operations: &[Operation], path: &[usize]) {
        self.write_operations("recorded", command, operations, path);
    }

    fn enter_composite(&mut self, command: &Command, path: &[usize]) {
        let text = format!("composite {:?} ({} children)", command.name(), command.children().len());
        self.write(path, text);
    }

    fn enter_secret(&mut self, command: &Command, path: &[usize]) {
        self.write(path, format!("secret {:?}: <hidden>", command.name()));
        self.secret_depth += 1;
    }

    fn exit_secret(&mut self, _command: &Command, _path: &[usize]) {
        self.secret_depth -= 1;
    }
}

pub fn summarize(command: &Command) -> String {
    let mut visitor = SummaryVisitor::default();
    command.accept(&mut visitor);
    visitor.into_text()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_hides_secret_content() {
        let root = Command::composite(
            "root",
            vec![
                Command::leaf("visible", [Operation::move_to(1.0, 2.0)]),
                Command::secret("classified", Command::leaf("inner", [Operation::line_to(42.0, 43.0)])).unwrap(),
            ],
        )
        .unwrap();

        let text = summarize(&root);
        assert_eq!(
            text,
            "composite \"root\" (2 children)\n  leaf \"visible\": move to (1, 2)\n  secret \"classified\": <hidden>"
        );
        assert!(!text.contains("42"));
        assert!(!text.contains("inner"));
    }
}
