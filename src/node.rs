//! Committed tree nodes
//!
//! Nodes live in the document arena and refer to each other by [`NodeId`].
//! Ownership runs through `children` only; `parent` and `child_by_name` are
//! lookups.

use std::collections::HashMap;
use std::fmt;

use crate::value::Attributes;

/// Stable index of a committed node inside its document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The root is always the first node of a document
    pub const ROOT: Self = Self(0);

    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A committed element
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    name: String,
    attributes: Attributes,
    children: Vec<NodeId>,
    child_by_name: HashMap<String, NodeId>,
    parent: Option<NodeId>,
    depth: usize,
}

impl Node {
    pub(crate) fn new(
        name: impl Into<String>,
        attributes: Attributes,
        parent: Option<NodeId>,
        depth: usize,
    ) -> Self {
        Self {
            name: name.into(),
            attributes,
            children: Vec::new(),
            child_by_name: HashMap::new(),
            parent,
            depth,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Committed children in commit order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Most recently committed child with the given name
    pub fn child_by_name(&self, name: &str) -> Option<NodeId> {
        self.child_by_name.get(name).copied()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Register a committed child in both views at once
    pub(crate) fn push_child(&mut self, id: NodeId, name: &str) {
        self.children.push(id);
        self.child_by_name.insert(name.to_string(), id);
    }
}
