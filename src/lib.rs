//! Layout, labeling and attribute extraction for boolean rule ASTs.
//!
//! A rule such as `age > 30 AND department = 'Sales'` arrives from the rule
//! service as an operator/operand tree. This crate turns that tree into
//! things a front end can show:
//!
//! - [`extract_attributes`]: the distinct attributes a rule reads, for
//!   building an input form ([`EvaluationForm`]).
//! - [`classify`], [`display_text`] and [`wrap`]: per-node labels and colors.
//! - [`to_layout`]: a generic named tree with ordered children.
//! - [`render`] and [`TreeView`]: visible nodes with sized boxes and
//!   expand/collapse state.
//!
//! ```
//! use ruletree::{extract_attributes, operand, to_layout};
//!
//! let ast = operand("age").gt(30_i64).and(operand("department").eq("Sales"));
//!
//! let attrs = extract_attributes(Some(&ast));
//! assert!(attrs.contains("age") && attrs.contains("department"));
//!
//! let layout = to_layout(Some(&ast)).unwrap().unwrap();
//! assert_eq!(layout.label, "AND");
//! assert_eq!(layout.children[1].label, "department = Sales");
//! ```

mod convert;
mod error;
mod extract;
pub mod fingerprint;
pub mod form;
pub mod label;
pub mod render;
mod types;
mod view;
pub mod wire;

pub use convert::{to_layout, to_layout_with_limit};
pub use error::RuletreeError;
pub use extract::{extract_attributes, AttributeSet};
pub use form::{EvaluationForm, FormError, InputValue};
pub use label::{classify, display_text, wrap, WrappedLabel};
pub use render::{render, ExpandState, ExpansionMap, RenderedNode, RenderedTree};
pub use types::{
    operand, AstNode, CompareOp, Constant, LogicalOp, NodeId, NodeStyle, NodeType, OperandBuilder,
    OperandNode, OperatorNode, RenderConfig, StructureError, ToggleError, TreeLayoutNode,
    DEFAULT_MAX_DEPTH, DEFAULT_WRAP_WIDTH,
};
pub use view::{Reload, TreeView};
