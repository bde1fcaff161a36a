//! Expand/collapse state and the visible, sized projection of a layout tree.
//!
//! Positioning of nodes relative to each other is left to whatever tree
//! layout the host uses. This module decides which nodes are visible, how
//! each label wraps, and how big each node box is.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::label::{classify_label, wrap, WrappedLabel};
use crate::{NodeId, NodeStyle, NodeType, RenderConfig, ToggleError, TreeLayoutNode};

/// Message shown when there is no tree to draw.
pub const NO_DATA_MESSAGE: &str = "No AST data available.";

/// Per-node expand/collapse state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum ExpandState {
    #[default]
    Expanded,
    Collapsed,
}

impl ExpandState {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            ExpandState::Expanded => ExpandState::Collapsed,
            ExpandState::Collapsed => ExpandState::Expanded,
        }
    }
}

/// Expand/collapse state for every node of one tree. Nodes start expanded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionMap {
    collapsed: HashSet<NodeId>,
}

impl ExpansionMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self, id: NodeId) -> ExpandState {
        if self.collapsed.contains(&id) {
            ExpandState::Collapsed
        } else {
            ExpandState::Expanded
        }
    }

    /// Flip the state of `id` in `root` and return the new state.
    ///
    /// # Errors
    ///
    /// Returns [`ToggleError::UnknownNode`] if `id` is not in `root` and
    /// [`ToggleError::Leaf`] if the node has no children.
    pub fn toggle(&mut self, root: &TreeLayoutNode, id: NodeId) -> Result<ExpandState, ToggleError> {
        let node = root.get(id).ok_or(ToggleError::UnknownNode { id })?;
        if !node.has_children() {
            return Err(ToggleError::Leaf { id });
        }
        let next = self.state(id).toggled();
        match next {
            ExpandState::Collapsed => self.collapsed.insert(id),
            ExpandState::Expanded => self.collapsed.remove(&id),
        };
        tracing::trace!(%id, ?next, "toggled node");
        Ok(next)
    }

    /// Expand every node again.
    pub fn reset(&mut self) {
        self.collapsed.clear();
    }

    #[must_use]
    pub fn collapsed_count(&self) -> usize {
        self.collapsed.len()
    }
}

/// Box of a node, relative to the node's anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NodeBox {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl NodeBox {
    fn centered(width: u32, height: u32) -> Self {
        Self {
            x: -i64::from(width / 2),
            y: -i64::from(height / 2),
            width,
            height,
        }
    }
}

/// One visible node, ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedNode {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub depth: usize,
    pub label: WrappedLabel,
    pub node_type: NodeType,
    pub style: NodeStyle,
    /// Has children and therefore reacts to toggles.
    pub toggleable: bool,
    pub state: ExpandState,
    pub bounds: NodeBox,
    /// Vertical offset of each label line from the anchor, lines centered.
    pub line_offsets: Vec<i64>,
    /// Last among its siblings; used for outline guides.
    pub last_sibling: bool,
}

/// Result of rendering: either nothing to show, or the visible nodes in
/// depth-first order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RenderedTree {
    NoData,
    Tree(Vec<RenderedNode>),
}

impl RenderedTree {
    #[must_use]
    pub fn nodes(&self) -> &[RenderedNode] {
        match self {
            RenderedTree::NoData => &[],
            RenderedTree::Tree(nodes) => nodes,
        }
    }

    #[must_use]
    pub fn is_no_data(&self) -> bool {
        matches!(self, RenderedTree::NoData)
    }

    #[must_use]
    pub fn find(&self, id: NodeId) -> Option<&RenderedNode> {
        self.nodes().iter().find(|n| n.id == id)
    }
}

struct Pending<'a> {
    node: &'a TreeLayoutNode,
    id: NodeId,
    parent: Option<NodeId>,
    depth: usize,
    last_sibling: bool,
}

/// Render the visible part of `root`.
///
/// Ids are assigned over the whole tree, so a node keeps its id whether or not
/// an ancestor is collapsed. The layout itself is only read.
#[must_use]
pub fn render(
    root: Option<&TreeLayoutNode>,
    expansion: &ExpansionMap,
    config: &RenderConfig,
) -> RenderedTree {
    let Some(root) = root else {
        return RenderedTree::NoData;
    };

    let mut visible = Vec::new();
    let mut stack = vec![Pending {
        node: root,
        id: NodeId::ROOT,
        parent: None,
        depth: 0,
        last_sibling: true,
    }];

    while let Some(item) = stack.pop() {
        let toggleable = item.node.has_children();
        let state = expansion.state(item.id);

        if toggleable && state == ExpandState::Expanded {
            let mut next_id = item.id.0 + 1;
            let mut children = Vec::with_capacity(item.node.children.len());
            let count = item.node.children.len();
            for (i, child) in item.node.children.iter().enumerate() {
                children.push(Pending {
                    node: child,
                    id: NodeId(next_id),
                    parent: Some(item.id),
                    depth: item.depth + 1,
                    last_sibling: i + 1 == count,
                });
                next_id += child.node_count();
            }
            stack.extend(children.into_iter().rev());
        }

        visible.push(render_node(&item, toggleable, state, config));
    }

    RenderedTree::Tree(visible)
}

fn render_node(item: &Pending<'_>, toggleable: bool, state: ExpandState, config: &RenderConfig) -> RenderedNode {
    let label = wrap(&item.node.label, config.wrap_width());
    let node_type = classify_label(&item.node.label);
    let height = config.box_height(label.line_count());
    let line_offsets = line_offsets(label.line_count(), config.line_height());

    RenderedNode {
        id: item.id,
        parent: item.parent,
        depth: item.depth,
        node_type,
        style: node_type.style(),
        toggleable,
        state,
        bounds: NodeBox::centered(config.box_width(), height),
        line_offsets,
        last_sibling: item.last_sibling,
        label,
    }
}

fn line_offsets(lines: usize, line_height: u32) -> Vec<i64> {
    let step = i64::from(line_height);
    let first = -((lines as i64 - 1).max(0) * step) / 2;
    (0..lines as i64).map(|i| first + i * step).collect()
}

/// Text outline of the visible tree, e.g.
///
/// ```text
/// [-] AND
/// +-- age > 30
/// `-- department = Sales
/// ```
impl fmt::Display for RenderedTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nodes = match self {
            RenderedTree::NoData => return writeln!(f, "{NO_DATA_MESSAGE}"),
            RenderedTree::Tree(nodes) => nodes,
        };

        // last_sibling flag of each ancestor on the current path
        let mut ancestors: Vec<bool> = Vec::new();
        for node in nodes {
            ancestors.truncate(node.depth);

            let mut prefix = String::new();
            for &last in ancestors.iter().skip(1) {
                prefix.push_str(if last { "    " } else { "|   " });
            }
            let mut continuation = prefix.clone();
            if node.depth > 0 {
                prefix.push_str(if node.last_sibling { "`-- " } else { "+-- " });
                continuation.push_str(if node.last_sibling { "    " } else { "|   " });
            }

            let marker = match (node.toggleable, node.state) {
                (false, _) => "",
                (true, ExpandState::Expanded) => "[-] ",
                (true, ExpandState::Collapsed) => "[+] ",
            };
            let pad = " ".repeat(marker.len());

            let mut lines = node.label.lines.iter();
            match lines.next() {
                Some(first) => writeln!(f, "{prefix}{marker}{first}")?,
                None => writeln!(f, "{prefix}{marker}")?,
            }
            for line in lines {
                writeln!(f, "{continuation}{pad}{line}")?;
            }

            ancestors.push(node.last_sibling);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TreeLayoutNode {
        // 0:AND ( 1:OR ( 2:a = 1, 3:b = 2 ), 4:c = 3 )
        TreeLayoutNode {
            label: "AND".into(),
            children: vec![
                TreeLayoutNode {
                    label: "OR".into(),
                    children: vec![TreeLayoutNode::leaf("a = 1"), TreeLayoutNode::leaf("b = 2")],
                },
                TreeLayoutNode::leaf("c = 3"),
            ],
        }
    }

    fn ids(tree: &RenderedTree) -> Vec<usize> {
        tree.nodes().iter().map(|n| n.id.0).collect()
    }

    #[test]
    fn no_root_is_no_data() {
        let rendered = render(None, &ExpansionMap::new(), &RenderConfig::default());
        assert!(rendered.is_no_data());
        assert_eq!(rendered.to_string(), "No AST data available.\n");
    }

    #[test]
    fn everything_visible_by_default() {
        let tree = sample();
        let rendered = render(Some(&tree), &ExpansionMap::new(), &RenderConfig::default());
        assert_eq!(ids(&rendered), vec![0, 1, 2, 3, 4]);
        let depths: Vec<_> = rendered.nodes().iter().map(|n| n.depth).collect();
        assert_eq!(depths, vec![0, 1, 2, 2, 1]);
        assert_eq!(rendered.find(NodeId(2)).unwrap().parent, Some(NodeId(1)));
    }

    #[test]
    fn collapsing_hides_only_that_subtree() {
        let tree = sample();
        let mut expansion = ExpansionMap::new();
        assert_eq!(expansion.toggle(&tree, NodeId(1)), Ok(ExpandState::Collapsed));

        let rendered = render(Some(&tree), &expansion, &RenderConfig::default());
        assert_eq!(ids(&rendered), vec![0, 1, 4]);
        assert_eq!(rendered.find(NodeId(1)).unwrap().state, ExpandState::Collapsed);
        // the layout itself is untouched
        assert_eq!(tree, sample());
    }

    #[test]
    fn toggle_twice_restores() {
        let tree = sample();
        let mut expansion = ExpansionMap::new();
        expansion.toggle(&tree, NodeId(0)).unwrap();
        assert_eq!(
            ids(&render(Some(&tree), &expansion, &RenderConfig::default())),
            vec![0]
        );
        assert_eq!(expansion.toggle(&tree, NodeId(0)), Ok(ExpandState::Expanded));
        assert_eq!(expansion.collapsed_count(), 0);
    }

    #[test]
    fn leaves_and_unknown_ids_cannot_toggle() {
        let tree = sample();
        let mut expansion = ExpansionMap::new();
        assert_eq!(
            expansion.toggle(&tree, NodeId(4)),
            Err(ToggleError::Leaf { id: NodeId(4) })
        );
        assert_eq!(
            expansion.toggle(&tree, NodeId(99)),
            Err(ToggleError::UnknownNode { id: NodeId(99) })
        );
        assert_eq!(expansion, ExpansionMap::new());
    }

    #[test]
    fn collapsed_ancestor_keeps_descendant_state() {
        let tree = sample();
        let mut expansion = ExpansionMap::new();
        expansion.toggle(&tree, NodeId(1)).unwrap();
        expansion.toggle(&tree, NodeId(0)).unwrap();
        expansion.toggle(&tree, NodeId(0)).unwrap();
        assert_eq!(expansion.state(NodeId(1)), ExpandState::Collapsed);
    }

    #[test]
    fn box_height_tracks_wrapped_lines() {
        let tree = TreeLayoutNode::leaf("experience greater than five years");
        let rendered = render(Some(&tree), &ExpansionMap::new(), &RenderConfig::default());
        let node = &rendered.nodes()[0];
        assert_eq!(node.label.line_count(), 2);
        assert_eq!(node.bounds.height, 2 * 24 + 20);
        assert_eq!(node.bounds.width, 200);
        assert_eq!(node.bounds.x, -100);
        assert_eq!(node.bounds.y, -34);
        assert_eq!(node.line_offsets, vec![-12, 12]);
    }

    #[test]
    fn styles_follow_labels() {
        let tree = sample();
        let rendered = render(Some(&tree), &ExpansionMap::new(), &RenderConfig::default());
        let types: Vec<_> = rendered.nodes().iter().map(|n| n.node_type).collect();
        assert_eq!(
            types,
            vec![
                NodeType::And,
                NodeType::Or,
                NodeType::Operand,
                NodeType::Operand,
                NodeType::Operand
            ]
        );
        assert_eq!(rendered.nodes()[0].style, NodeType::And.style());
        assert!(rendered.nodes()[0].toggleable);
        assert!(!rendered.nodes()[4].toggleable);
    }

    #[test]
    fn outline_text() {
        let tree = sample();
        let mut expansion = ExpansionMap::new();
        let rendered = render(Some(&tree), &expansion, &RenderConfig::default());
        let expected = "\
[-] AND
+-- [-] OR
|   +-- a = 1
|   `-- b = 2
`-- c = 3
";
        assert_eq!(rendered.to_string(), expected);

        expansion.toggle(&tree, NodeId(1)).unwrap();
        let rendered = render(Some(&tree), &expansion, &RenderConfig::default());
        assert_eq!(rendered.to_string(), "[-] AND\n+-- [+] OR\n`-- c = 3\n");
    }

    #[test]
    fn outline_wraps_continuation_lines() {
        let tree = TreeLayoutNode {
            label: "OR".into(),
            children: vec![
                TreeLayoutNode::leaf("experience greater than five years"),
                TreeLayoutNode::leaf("x = 1"),
            ],
        };
        let rendered = render(Some(&tree), &ExpansionMap::new(), &RenderConfig::default());
        let expected = "\
[-] OR
+-- experience greater than
|   five years
`-- x = 1
";
        assert_eq!(rendered.to_string(), expected);
    }
}
