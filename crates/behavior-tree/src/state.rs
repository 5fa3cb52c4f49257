//! Immutable snapshots of a tree's names and statuses.
//!
//! A [`NodeState`] mirrors the live tree at the moment
//! [`Behavior::state`](crate::Behavior::state) was called. Snapshots are
//! used for logging and for asserting on tree progress in tests: two
//! snapshots are equal when names, statuses and ordered children match
//! recursively.

use std::fmt;

use crate::Status;

/// Recursive copy of a node's name, status and children.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeState {
    name: String,
    status: Status,
    children: Vec<NodeState>,
}

impl NodeState {
    /// Creates a snapshot of a node without children.
    pub fn new(name: impl Into<String>, status: Status) -> Self {
        Self::with_children(name, status, Vec::new())
    }

    /// Creates a snapshot of a node with the given ordered children.
    pub fn with_children(
        name: impl Into<String>,
        status: Status,
        children: Vec<NodeState>,
    ) -> Self {
        Self {
            name: name.into(),
            status,
            children,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn children(&self) -> &[NodeState] {
        &self.children
    }

    /// Structural equality: names, statuses and child counts match pairwise,
    /// in order, all the way down.
    pub fn state_eq(&self, other: &NodeState) -> bool {
        self == other
    }

    /// First node named `name`, searching depth-first in child order.
    pub fn find(&self, name: &str) -> Option<&NodeState> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }

    /// Number of nodes in this snapshot, including itself.
    pub fn node_count(&self) -> usize {
        let below: usize = self.children.iter().map(NodeState::node_count).sum();
        1 + below
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = depth * 2;
        writeln!(f, "{:indent$}{} [{}]", "", self.name, self.status)?;
        for child in &self.children {
            child.write_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}
