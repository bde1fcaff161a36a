use serde::Serialize;

use crate::{AstNode, LogicalOp, NodeType};

/// Text shown for nodes that cannot be classified.
pub const UNKNOWN_LABEL: &str = "Unknown node type";

/// Classify a node for display.
///
/// Operators naming `AND`/`OR` map to [`NodeType::And`]/[`NodeType::Or`]. An
/// operand with all three parts is [`NodeType::Operand`]. Everything else,
/// including unrecognized connectives and incomplete operands, is
/// [`NodeType::Unknown`].
#[must_use]
pub fn classify(node: &AstNode) -> NodeType {
    match node {
        AstNode::Operator(op) => match op.logical() {
            Some(LogicalOp::And) => NodeType::And,
            Some(LogicalOp::Or) => NodeType::Or,
            None => NodeType::Unknown,
        },
        AstNode::Operand(leaf) if leaf.parts().is_some() => NodeType::Operand,
        AstNode::Operand(_) => NodeType::Unknown,
    }
}

/// Recover the node type from a label produced by [`display_text`].
///
/// Connective labels and the unknown placeholder are matched exactly; any
/// other label came from an operand.
#[must_use]
pub fn classify_label(label: &str) -> NodeType {
    match label {
        "AND" => NodeType::And,
        "OR" => NodeType::Or,
        UNKNOWN_LABEL => NodeType::Unknown,
        _ => NodeType::Operand,
    }
}

/// Display text for a single node (children are not included).
#[must_use]
pub fn display_text(node: &AstNode) -> String {
    match node {
        AstNode::Operator(op) => match op.logical() {
            Some(logical) => logical.keyword().to_owned(),
            None => {
                tracing::debug!(value = %op.value, "unrecognized operator");
                UNKNOWN_LABEL.to_owned()
            }
        },
        AstNode::Operand(leaf) => match leaf.parts() {
            Some((attribute, operator, constant)) => format!("{attribute} {operator} {constant}"),
            None => {
                tracing::debug!("incomplete operand: {leaf:?}");
                UNKNOWN_LABEL.to_owned()
            }
        },
    }
}

/// A label broken into display lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WrappedLabel {
    pub lines: Vec<String>,
}

impl WrappedLabel {
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines rejoined with single spaces.
    #[must_use]
    pub fn joined(&self) -> String {
        self.lines.join(" ")
    }
}

/// Greedy word wrap.
///
/// Words are packed onto a line while the line stays within `max_width`
/// characters. Words are never split; one longer than `max_width` gets a line
/// to itself. Empty or all-whitespace input gives no lines. A `max_width` of 0
/// behaves like 1.
#[must_use]
pub fn wrap(text: &str, max_width: usize) -> WrappedLabel {
    let max_width = max_width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.chars().count();
        if current.is_empty() {
            current.push_str(word);
            current_width = word_width;
        } else if current_width + 1 + word_width <= max_width {
            current.push(' ');
            current.push_str(word);
            current_width += 1 + word_width;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_width;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    WrappedLabel { lines }
}
