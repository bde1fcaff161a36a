use std::fmt;

use serde::Serialize;

/// Renderer-agnostic tree: a label per node and its present children, in
/// left-then-right order.
///
/// Serializes as `{"name": ..., "children": [...]}`, which is the shape
/// generic tree-layout widgets consume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeLayoutNode {
    #[serde(rename = "name")]
    pub label: String,
    pub children: Vec<TreeLayoutNode>,
}

impl TreeLayoutNode {
    #[must_use]
    pub fn leaf(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Total number of nodes in this subtree, including `self`.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TreeLayoutNode::node_count).sum::<usize>()
    }

    /// Look up a node by its pre-order [`NodeId`].
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&TreeLayoutNode> {
        let mut remaining = id.0;
        let mut node = self;
        'descend: loop {
            if remaining == 0 {
                return Some(node);
            }
            remaining -= 1;
            for child in &node.children {
                let size = child.node_count();
                if remaining < size {
                    node = child;
                    continue 'descend;
                }
                remaining -= size;
            }
            return None;
        }
    }
}

/// Identity of a node within one layout snapshot: its pre-order index,
/// with the root at 0.
///
/// Ids are only meaningful for the tree they were taken from; a new AST
/// snapshot starts a new id space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct NodeId(pub usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
