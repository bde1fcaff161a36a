mod config;
mod error;
mod layout;
mod node;
mod style;

pub use config::{RenderConfig, DEFAULT_MAX_DEPTH, DEFAULT_WRAP_WIDTH};
pub use error::{StructureError, ToggleError};
pub use layout::{NodeId, TreeLayoutNode};
pub use node::{
    operand, AstNode, CompareOp, Constant, LogicalOp, OperandBuilder, OperandNode, OperatorNode,
};
pub use style::{NodeStyle, NodeType};
