use std::fmt;

use serde::Serialize;

/// Display classification of an AST node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeType {
    And,
    Or,
    Operand,
    Unknown,
}

/// Fill colors for one node type, as a utility class and as a hex triplet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NodeStyle {
    pub background_class: &'static str,
    pub background_hex: &'static str,
    pub foreground_class: &'static str,
    pub foreground_hex: &'static str,
}

const fn style(background_class: &'static str, background_hex: &'static str) -> NodeStyle {
    NodeStyle {
        background_class,
        background_hex,
        foreground_class: "fill-black",
        foreground_hex: "#000000",
    }
}

const AND_STYLE: NodeStyle = style("fill-blue-200", "#bfdbfe");
const OR_STYLE: NodeStyle = style("fill-red-200", "#fecaca");
const OPERAND_STYLE: NodeStyle = style("fill-green-200", "#bbf7d0");
const UNKNOWN_STYLE: NodeStyle = style("fill-gray-200", "#e5e7eb");

impl NodeType {
    /// Fixed color pair for this node type. Purely cosmetic.
    #[must_use]
    pub const fn style(self) -> NodeStyle {
        match self {
            NodeType::And => AND_STYLE,
            NodeType::Or => OR_STYLE,
            NodeType::Operand => OPERAND_STYLE,
            NodeType::Unknown => UNKNOWN_STYLE,
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeType::And => "AND",
            NodeType::Or => "OR",
            NodeType::Operand => "operand",
            NodeType::Unknown => "unknown",
        };
        f.write_str(name)
    }
}
