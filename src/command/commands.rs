use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Operation;
use crate::error::{PipelineError, PipelineResult};

/// Identity of a command node.
///
/// Cloning a [`Command`] keeps its id: the clone stands for the same node.
/// Only a deep copy mints new ids.
///
/// Commands are plain values, so the ownership checks can only see the tree
/// they are handed. Two separate trees built from a clone and its original
/// both hold the same id; use a deep copy when the second tree should be a
/// node of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(Uuid);

impl NodeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// The four kinds of command nodes
#[derive(Clone)]
pub enum CommandKind {
    /// Authored sequence of primitive operations
    Leaf(Vec<Operation>),
    /// Sequence captured from live input
    Recorded(Vec<Operation>),
    /// Ordered children, executed one after another
    Composite(Vec<Command>),
    /// Content that is drawn but never shown in textual output
    Secret(Box<Command>),
}

impl CommandKind {
    pub fn label(&self) -> &'static str {
        match self {
            CommandKind::Leaf(_) => "leaf",
            CommandKind::Recorded(_) => "recorded",
            CommandKind::Composite(_) => "composite",
            CommandKind::Secret(_) => "secret",
        }
    }
}

/// A drawing job: one node of a command tree.
#[derive(Clone)]
pub struct Command {
    id: NodeId,
    owner: Option<NodeId>,
    name: String,
    kind: CommandKind,
}

impl Command {
    pub fn leaf(name: impl Into<String>, operations: impl IntoIterator<Item = Operation>) -> Self {
        Self::detached(name.into(), CommandKind::Leaf(operations.into_iter().collect()))
    }

    pub fn recorded(name: impl Into<String>, operations: impl IntoIterator<Item = Operation>) -> Self {
        Self::detached(name.into(), CommandKind::Recorded(operations.into_iter().collect()))
    }

    /// Builds a composite that takes ownership of `children`.
    ///
    /// Fails with [`PipelineError::OwnershipConflict`] if a child is already
    /// attached somewhere else or an id appears twice among the children
    /// (a clone next to its original); nothing is built then.
    pub fn composite(name: impl Into<String>, children: Vec<Command>) -> PipelineResult<Self> {
        let mut seen = HashSet::new();
        for child in &children {
            if let Some(owner) = child.owner {
                return Err(PipelineError::OwnershipConflict { node: child.id, owner });
            }
            for id in child.node_ids() {
                if !seen.insert(id) {
                    return Err(PipelineError::OwnershipConflict { node: id, owner: child.id });
                }
            }
        }
        Ok(Self::assemble_composite(name.into(), children))
    }

    /// Wraps `inner` so that its content is drawn but never displayed.
    pub fn secret(name: impl Into<String>, inner: Command) -> PipelineResult<Self> {
        if let Some(owner) = inner.owner {
            return Err(PipelineError::OwnershipConflict { node: inner.id, owner });
        }
        Ok(Self::assemble_secret(name.into(), inner))
    }

    fn detached(name: String, kind: CommandKind) -> Self {
        Self {
            id: NodeId::new(),
            owner: None,
            name,
            kind,
        }
    }

    /// Composite from children known to be fresh and unowned
    pub(crate) fn assemble_composite(name: String, mut children: Vec<Command>) -> Self {
        let id = NodeId::new();
        for child in &mut children {
            child.owner = Some(id);
        }
        Self {
            id,
            owner: None,
            name,
            kind: CommandKind::Composite(children),
        }
    }

    pub(crate) fn assemble_secret(name: String, mut inner: Command) -> Self {
        let id = NodeId::new();
        inner.owner = Some(id);
        Self {
            id,
            owner: None,
            name,
            kind: CommandKind::Secret(Box::new(inner)),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The composite (or secret wrapper) this node is attached to
    pub fn owner(&self) -> Option<NodeId> {
        self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn kind(&self) -> &CommandKind {
        &self.kind
    }

    pub(crate) fn kind_mut(&mut self) -> &mut CommandKind {
        &mut self.kind
    }

    pub fn is_composite(&self) -> bool {
        matches!(self.kind, CommandKind::Composite(_))
    }

    pub fn is_secret(&self) -> bool {
        matches!(self.kind, CommandKind::Secret(_))
    }

    pub fn is_recorded(&self) -> bool {
        matches!(self.kind, CommandKind::Recorded(_))
    }

    /// Children of a composite; empty for every other kind
    pub fn children(&self) -> &[Command] {
        match &self.kind {
            CommandKind::Composite(children) => children,
            _ => &[],
        }
    }

    /// Operations of a leaf or recorded node
    pub fn operations(&self) -> Option<&[Operation]> {
        match &self.kind {
            CommandKind::Leaf(operations) | CommandKind::Recorded(operations) => Some(operations),
            _ => None,
        }
    }

    /// Ids of this node and all of its descendants, in traversal order
    pub fn node_ids(&self) -> Vec<NodeId> {
        let mut ids = Vec::new();
        self.collect_ids(&mut ids);
        ids
    }

    fn collect_ids(&self, ids: &mut Vec<NodeId>) {
        ids.push(self.id);
        match &self.kind {
            CommandKind::Composite(children) => {
                for child in children {
                    child.collect_ids(ids);
                }
            }
            CommandKind::Secret(inner) => inner.collect_ids(ids),
            CommandKind::Leaf(_) | CommandKind::Recorded(_) => {}
        }
    }

    /// True if `id` is this node or one of its descendants
    pub fn contains(&self, id: NodeId) -> bool {
        self.node_ids().contains(&id)
    }

    /// Appends `child` to this composite.
    ///
    /// The child must be unowned and share no node with this tree, otherwise
    /// the call fails with [`PipelineError::OwnershipConflict`] and neither
    /// tree changes.
    pub fn attach(&mut self, mut child: Command) -> PipelineResult<()> {
        if !self.is_composite() {
            return Err(PipelineError::NotComposite(self.id));
        }
        if let Some(owner) = child.owner {
            return Err(PipelineError::OwnershipConflict { node: child.id, owner });
        }
        let ours: HashSet<NodeId> = self.node_ids().into_iter().collect();
        if let Some(shared) = child.node_ids().into_iter().find(|id| ours.contains(id)) {
            return Err(PipelineError::OwnershipConflict { node: shared, owner: self.id });
        }

        child.owner = Some(self.id);
        if let CommandKind::Composite(children) = &mut self.kind {
            children.push(child);
        }
        Ok(())
    }

    /// Removes and returns the child at `index`, clearing its owner.
    pub fn detach(&mut self, index: usize) -> PipelineResult<Command> {
        let id = self.id;
        match &mut self.kind {
            CommandKind::Composite(children) if index < children.len() => {
                let mut child = children.remove(index);
                child.owner = None;
                Ok(child)
            }
            CommandKind::Composite(children) => Err(PipelineError::Configuration(format!(
                "child index {} out of range for {} children",
                index,
                children.len()
            ))),
            _ => Err(PipelineError::NotComposite(id)),
        }
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            CommandKind::Leaf(operations) => f
                .debug_struct("Leaf")
                .field("name", &self.name)
                .field("operations", operations)
                .finish(),
            CommandKind::Recorded(operations) => f
                .debug_struct("Recorded")
                .field("name", &self.name)
                .field("operations", operations)
                .finish(),
            CommandKind::Composite(children) => f
                .debug_struct("Composite")
                .field("name", &self.name)
                .field("children", children)
                .finish(),
            CommandKind::Secret(_) => f
                .debug_struct("Secret")
                .field("name", &self.name)
                .finish_non_exhaustive(),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Command {
        Command::leaf(
            "square",
            [
                Operation::move_to(0.0, 0.0),
                Operation::line_to(10.0, 0.0),
                Operation::line_to(10.0, 10.0),
                Operation::line_to(0.0, 10.0),
                Operation::line_to(0.0, 0.0),
            ],
        )
    }

    #[test]
    fn test_composite_takes_ownership() {
        let child = square();
        let child_id = child.id();
        let parent = Command::composite("parent", vec![child]).unwrap();

        assert_eq!(parent.children().len(), 1);
        assert_eq!(parent.children()[0].id(), child_id);
        assert_eq!(parent.children()[0].owner(), Some(parent.id()));
        assert_eq!(parent.owner(), None);
    }

    #[test]
    fn test_composite_rejects_owned_child() {
        let parent = Command::composite("parent", vec![square()]).unwrap();
        let stolen = parent.children()[0].clone();

        let result = Command::composite("other", vec![stolen]);
        assert!(matches!(result, Err(PipelineError::OwnershipConflict { owner, .. }) if owner == parent.id()));
    }

    #[test]
    fn test_composite_rejects_duplicate_child() {
        let child = square();
        let twin = child.clone();
        assert!(Command::composite("twice", vec![child, twin]).is_err());
    }

    #[test]
    fn test_attach_to_leaf_fails() {
        let mut leaf = square();
        let result = leaf.attach(square());
        assert_eq!(result, Err(PipelineError::NotComposite(leaf.id())));
    }

    #[test]
    fn test_attach_rejects_cycle() {
        let mut parent = Command::composite("parent", vec![square()]).unwrap();
        let copy_of_self = parent.clone();

        assert!(matches!(
            parent.attach(copy_of_self),
            Err(PipelineError::OwnershipConflict { .. })
        ));
        assert_eq!(parent.children().len(), 1);
    }

    #[test]
    fn test_detach_clears_owner() {
        let mut parent = Command::composite("parent", vec![square()]).unwrap();
        let child = parent.detach(0).unwrap();

        assert_eq!(child.owner(), None);
        assert!(parent.children().is_empty());

        let mut other = Command::composite("other", Vec::new()).unwrap();
        other.attach(child).unwrap();
        assert_eq!(other.children().len(), 1);
    }

    #[test]
    fn test_detach_out_of_range() {
        let mut parent = Command::composite("parent", Vec::new()).unwrap();
        assert!(matches!(parent.detach(3), Err(PipelineError::Configuration(_))));
    }

    #[test]
    fn test_secret_debug_hides_content() {
        let secret = Command::secret("hidden", square()).unwrap();
        let debug = format!("{:?}", secret);

        assert!(debug.contains("hidden"));
        assert!(!debug.contains("10.0"));
        assert_eq!(secret.to_string(), "hidden (secret)");
    }

    #[test]
    fn test_node_ids_in_traversal_order() {
        let first = square();
        let second = square();
        let expected = vec![first.id(), second.id()];
        let parent = Command::composite("parent", vec![first, second]).unwrap();

        let ids = parent.node_ids();
        assert_eq!(ids[0], parent.id());
        assert_eq!(&ids[1..], expected.as_slice());
    }
}
