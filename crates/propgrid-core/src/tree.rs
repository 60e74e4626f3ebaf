//! Tree nodes consumed by the cascade selector
//!
//! A node exposes a display label and an ordered list of children. Nodes are
//! reference-counted so a selection can hold a node while the forest stays
//! owned by its data source; selection changes compare node identity.

use std::fmt;
use std::rc::Rc;

/// A simple named node owning its child list
#[derive(Debug, PartialEq)]
pub struct NamedNode {
    name: String,
    children: Vec<TreeNode>,
}

/// A node in a cascade forest
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    /// Named node with an owned child list
    Named(Rc<NamedNode>),
}

impl TreeNode {
    /// Create a node without children
    #[must_use]
    pub fn leaf(name: impl Into<String>) -> Self {
        Self::branch(name, Vec::new())
    }

    /// Create a node with the given children, kept in order
    #[must_use]
    pub fn branch(name: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self::Named(Rc::new(NamedNode {
            name: name.into(),
            children,
        }))
    }

    /// The label shown for this node and matched when pre-seeding a cascade
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Named(node) => &node.name,
        }
    }

    /// Child nodes in declaration order
    #[must_use]
    pub fn children(&self) -> &[TreeNode] {
        match self {
            Self::Named(node) => &node.children,
        }
    }

    /// Check whether both handles refer to the same node
    #[must_use]
    pub fn ptr_eq(&self, other: &TreeNode) -> bool {
        match (self, other) {
            (Self::Named(a), Self::Named(b)) => Rc::ptr_eq(a, b),
        }
    }

    /// Find the first node whose label equals `label` exactly
    #[must_use]
    pub fn find<'a>(nodes: &'a [TreeNode], label: &str) -> Option<&'a TreeNode> {
        nodes.iter().find(|n| n.label() == label)
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Compare two optional nodes by identity
pub(crate) fn same_node(a: Option<&TreeNode>, b: Option<&TreeNode>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.ptr_eq(b),
        (None, None) => true,
        _ => false,
    }
}
