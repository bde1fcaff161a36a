use crate::label::display_text;
use crate::{AstNode, StructureError, TreeLayoutNode, DEFAULT_MAX_DEPTH};

/// Convert an AST into a layout tree using the default depth limit.
///
/// An absent AST converts to `Ok(None)`.
///
/// # Errors
///
/// Returns [`StructureError::DepthExceeded`] if the tree is deeper than
/// [`DEFAULT_MAX_DEPTH`].
pub fn to_layout(node: Option<&AstNode>) -> Result<Option<TreeLayoutNode>, StructureError> {
    to_layout_with_limit(node, DEFAULT_MAX_DEPTH)
}

/// Convert an AST into a layout tree, refusing trees deeper than `max_depth`.
///
/// A lone root has depth 1, so a limit of 0 rejects every non-empty tree.
///
/// # Errors
///
/// Returns [`StructureError::DepthExceeded`] if the limit is hit.
pub fn to_layout_with_limit(
    node: Option<&AstNode>,
    max_depth: usize,
) -> Result<Option<TreeLayoutNode>, StructureError> {
    match node {
        None => Ok(None),
        Some(node) => convert(node, 1, max_depth).map(Some),
    }
}

fn convert(node: &AstNode, depth: usize, max_depth: usize) -> Result<TreeLayoutNode, StructureError> {
    if depth > max_depth {
        tracing::warn!(limit = max_depth, "rule tree too deep to lay out");
        return Err(StructureError::DepthExceeded { limit: max_depth });
    }

    let children = match node {
        AstNode::Operand(_) => Vec::new(),
        AstNode::Operator(op) => op
            .children()
            .map(|child| convert(child, depth + 1, max_depth))
            .collect::<Result<Vec<_>, _>>()?,
    };

    Ok(TreeLayoutNode {
        label: display_text(node),
        children,
    })
}
