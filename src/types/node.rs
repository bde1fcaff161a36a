use std::fmt;

use serde::Serialize;

/// Comparison operators an operand leaf may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CompareOp {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl CompareOp {
    /// Parse the symbol the rule service uses on the wire (`=`, `!=`, `>`, ...).
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "=" => Some(CompareOp::Eq),
            "!=" => Some(CompareOp::Neq),
            ">" => Some(CompareOp::Gt),
            ">=" => Some(CompareOp::Gte),
            "<" => Some(CompareOp::Lt),
            "<=" => Some(CompareOp::Lte),
            _ => None,
        }
    }

    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Neq => "!=",
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// The two logical connectives an operator node can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOp {
    And,
    Or,
}

impl LogicalOp {
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            LogicalOp::And => "AND",
            LogicalOp::Or => "OR",
        }
    }
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Right-hand side of an operand comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Constant {
    /// A 64-bit signed integer.
    Int(i64),
    /// A 64-bit floating-point number.
    Float(f64),
    /// Free text. Stored without surrounding quotes.
    Text(String),
}

impl Constant {
    /// Render the constant the way it appears inside a rule string: text is
    /// single-quoted unless it is made only of digits.
    #[must_use]
    pub fn to_rule_literal(&self) -> String {
        match self {
            Constant::Text(s) if !is_digits(s) => format!("'{s}'"),
            other => other.to_string(),
        }
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

impl From<i64> for Constant {
    fn from(v: i64) -> Self {
        Constant::Int(v)
    }
}

impl From<i32> for Constant {
    fn from(v: i32) -> Self {
        Constant::Int(i64::from(v))
    }
}

impl From<f64> for Constant {
    fn from(v: f64) -> Self {
        Constant::Float(v)
    }
}

impl From<&str> for Constant {
    fn from(v: &str) -> Self {
        Constant::Text(v.to_owned())
    }
}

impl From<String> for Constant {
    fn from(v: String) -> Self {
        Constant::Text(v)
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Int(v) => write!(f, "{v}"),
            Constant::Float(v) => write!(f, "{v}"),
            Constant::Text(v) => f.write_str(v),
        }
    }
}

/// Interior node joining up to two sub-expressions.
///
/// `value` keeps whatever the rule service sent so that unrecognized
/// connectives survive decoding and can be shown as unknown nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperatorNode {
    pub value: String,
    pub left: Option<Box<AstNode>>,
    pub right: Option<Box<AstNode>>,
}

impl OperatorNode {
    /// The connective this node names, if it is one we know.
    #[must_use]
    pub fn logical(&self) -> Option<LogicalOp> {
        match self.value.as_str() {
            "AND" => Some(LogicalOp::And),
            "OR" => Some(LogicalOp::Or),
            _ => None,
        }
    }

    /// Present children, left first.
    pub fn children(&self) -> impl Iterator<Item = &AstNode> {
        self.left.iter().chain(self.right.iter()).map(Box::as_ref)
    }
}

/// Leaf comparing an attribute to a constant.
///
/// Every field is optional: the tree comes from an external service and a
/// leaf missing any part is kept rather than rejected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperandNode {
    pub attribute: Option<String>,
    pub operator: Option<CompareOp>,
    pub constant: Option<Constant>,
}

impl OperandNode {
    #[must_use]
    pub fn new(attribute: &str, operator: CompareOp, constant: impl Into<Constant>) -> Self {
        Self {
            attribute: Some(attribute.to_owned()),
            operator: Some(operator),
            constant: Some(constant.into()),
        }
    }

    /// Attribute name, if present and non-empty.
    #[must_use]
    pub fn attribute(&self) -> Option<&str> {
        self.attribute.as_deref().filter(|a| !a.is_empty())
    }

    /// Returns the three parts when the leaf is complete.
    #[must_use]
    pub fn parts(&self) -> Option<(&str, CompareOp, &Constant)> {
        Some((self.attribute()?, self.operator?, self.constant.as_ref()?))
    }
}

/// A rule expression tree as produced by the rule service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AstNode {
    Operator(OperatorNode),
    Operand(OperandNode),
}

impl AstNode {
    /// Build an operator node with arbitrary (possibly absent) children.
    #[must_use]
    pub fn operator(value: &str, left: Option<AstNode>, right: Option<AstNode>) -> Self {
        AstNode::Operator(OperatorNode {
            value: value.to_owned(),
            left: left.map(Box::new),
            right: right.map(Box::new),
        })
    }

    #[must_use]
    pub fn and(self, other: AstNode) -> AstNode {
        AstNode::operator("AND", Some(self), Some(other))
    }

    #[must_use]
    pub fn or(self, other: AstNode) -> AstNode {
        AstNode::operator("OR", Some(self), Some(other))
    }

    #[must_use]
    pub fn is_operand(&self) -> bool {
        matches!(self, AstNode::Operand(_))
    }
}

impl From<OperandNode> for AstNode {
    fn from(node: OperandNode) -> Self {
        AstNode::Operand(node)
    }
}

impl From<OperatorNode> for AstNode {
    fn from(node: OperatorNode) -> Self {
        AstNode::Operator(node)
    }
}

/// Renders the canonical rule string, e.g. `(age > 30 AND department = 'Sales')`.
impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AstNode::Operand(leaf) => {
                let attribute = leaf.attribute.as_deref().unwrap_or_default();
                let operator = leaf.operator.map(CompareOp::symbol).unwrap_or_default();
                let constant = leaf
                    .constant
                    .as_ref()
                    .map(Constant::to_rule_literal)
                    .unwrap_or_default();
                write!(f, "{attribute} {operator} {constant}")
            }
            AstNode::Operator(op) => {
                f.write_str("(")?;
                if let Some(left) = &op.left {
                    write!(f, "{left}")?;
                }
                write!(f, " {} ", op.value)?;
                if let Some(right) = &op.right {
                    write!(f, "{right}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Intermediate builder for operand leaves.
/// Created by [`operand()`]; a comparison method produces the [`AstNode`].
#[derive(Debug, Clone)]
pub struct OperandBuilder {
    attribute: String,
}

impl OperandBuilder {
    fn finish(self, op: CompareOp, constant: impl Into<Constant>) -> AstNode {
        AstNode::Operand(OperandNode::new(&self.attribute, op, constant))
    }

    #[must_use]
    pub fn eq(self, constant: impl Into<Constant>) -> AstNode {
        self.finish(CompareOp::Eq, constant)
    }

    #[must_use]
    pub fn neq(self, constant: impl Into<Constant>) -> AstNode {
        self.finish(CompareOp::Neq, constant)
    }

    #[must_use]
    pub fn gt(self, constant: impl Into<Constant>) -> AstNode {
        self.finish(CompareOp::Gt, constant)
    }

    #[must_use]
    pub fn gte(self, constant: impl Into<Constant>) -> AstNode {
        self.finish(CompareOp::Gte, constant)
    }

    #[must_use]
    pub fn lt(self, constant: impl Into<Constant>) -> AstNode {
        self.finish(CompareOp::Lt, constant)
    }

    #[must_use]
    pub fn lte(self, constant: impl Into<Constant>) -> AstNode {
        self.finish(CompareOp::Lte, constant)
    }
}

#[must_use]
pub fn operand(attribute: &str) -> OperandBuilder {
    OperandBuilder {
        attribute: attribute.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operand_builder_gt() {
        let node = operand("age").gt(30_i64);
        assert_eq!(
            node,
            AstNode::Operand(OperandNode {
                attribute: Some("age".to_owned()),
                operator: Some(CompareOp::Gt),
                constant: Some(Constant::Int(30)),
            })
        );
    }

    #[test]
    fn compare_op_symbols_round_trip() {
        for op in [
            CompareOp::Eq,
            CompareOp::Neq,
            CompareOp::Gt,
            CompareOp::Gte,
            CompareOp::Lt,
            CompareOp::Lte,
        ] {
            assert_eq!(CompareOp::from_symbol(op.symbol()), Some(op));
        }
        assert_eq!(CompareOp::from_symbol("=="), None);
        assert_eq!(CompareOp::from_symbol("<>"), None);
    }

    #[test]
    fn logical_recognizes_and_or_only() {
        let and = OperatorNode {
            value: "AND".into(),
            left: None,
            right: None,
        };
        let xor = OperatorNode {
            value: "XOR".into(),
            left: None,
            right: None,
        };
        assert_eq!(and.logical(), Some(LogicalOp::And));
        assert_eq!(xor.logical(), None);
    }

    #[test]
    fn children_skip_absent_sides() {
        let node = OperatorNode {
            value: "OR".into(),
            left: None,
            right: Some(Box::new(operand("x").eq(1_i64))),
        };
        let kids: Vec<_> = node.children().collect();
        assert_eq!(kids.len(), 1);
        assert!(kids[0].is_operand());
    }

    #[test]
    fn empty_attribute_is_treated_as_missing() {
        let leaf = OperandNode {
            attribute: Some(String::new()),
            operator: Some(CompareOp::Eq),
            constant: Some(Constant::Int(1)),
        };
        assert_eq!(leaf.attribute(), None);
        assert_eq!(leaf.parts(), None);
    }

    #[test]
    fn constant_display_is_unquoted() {
        assert_eq!(Constant::Int(30).to_string(), "30");
        assert_eq!(Constant::Float(2.5).to_string(), "2.5");
        assert_eq!(Constant::from("Sales").to_string(), "Sales");
    }

    #[test]
    fn rule_literal_quotes_non_numeric_text() {
        assert_eq!(Constant::from("Sales").to_rule_literal(), "'Sales'");
        assert_eq!(Constant::from("30").to_rule_literal(), "30");
        assert_eq!(Constant::from("").to_rule_literal(), "''");
        assert_eq!(Constant::Int(5).to_rule_literal(), "5");
    }

    #[test]
    fn display_renders_rule_string() {
        let ast = operand("age")
            .gt(30_i64)
            .and(operand("department").eq("Sales"));
        assert_eq!(ast.to_string(), "(age > 30 AND department = 'Sales')");
    }

    #[test]
    fn display_nested_and_partial() {
        let ast = AstNode::operator(
            "OR",
            Some(operand("a").lte(1_i64).and(operand("b").neq("x"))),
            None,
        );
        assert_eq!(ast.to_string(), "((a <= 1 AND b != 'x') OR )");
    }
}
