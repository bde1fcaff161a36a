use std::collections::BTreeSet;

use crate::{AstNode, OperandNode};

/// Distinct attribute names referenced by a rule. Iterates in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSet {
    names: BTreeSet<String>,
}

impl AttributeSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the name was not already present.
    pub fn insert(&mut self, name: &str) -> bool {
        if self.names.contains(name) {
            return false;
        }
        self.names.insert(name.to_owned())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.names.into_iter().collect()
    }
}

impl<'a> FromIterator<&'a str> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = AttributeSet::new();
        for name in iter {
            set.insert(name);
        }
        set
    }
}

impl IntoIterator for AttributeSet {
    type Item = String;
    type IntoIter = std::collections::btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.into_iter()
    }
}

/// Collect every attribute name referenced by an operand in `root`.
///
/// Walks pre-order with an explicit stack, so chains of any depth are safe.
/// An absent root yields an empty set; operands without an attribute are
/// skipped.
#[must_use]
pub fn extract_attributes(root: Option<&AstNode>) -> AttributeSet {
    let mut attributes = AttributeSet::new();
    let mut pending: Vec<&AstNode> = root.into_iter().collect();

    while let Some(node) = pending.pop() {
        match node {
            AstNode::Operand(leaf) => record(leaf, &mut attributes),
            AstNode::Operator(op) => {
                // Right is pushed first so left is visited first.
                if let Some(right) = &op.right {
                    pending.push(right);
                }
                if let Some(left) = &op.left {
                    pending.push(left);
                }
            }
        }
    }

    attributes
}

fn record(leaf: &OperandNode, attributes: &mut AttributeSet) {
    match leaf.attribute() {
        Some(name) => {
            attributes.insert(name);
        }
        None => tracing::debug!("skipping operand without attribute: {leaf:?}"),
    }
}
