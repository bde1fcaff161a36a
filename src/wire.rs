//! JSON bodies exchanged with the rule service.
//!
//! Nothing here performs I/O. These types describe the request and response
//! bodies so a host can (de)serialize them with `serde_json`, and convert the
//! service's flat node records into [`AstNode`] trees.
//!
//! | Endpoint                  | Request                 | Response               |
//! |---------------------------|-------------------------|------------------------|
//! | `GET /rules`              |                         | [`RulesResponse`]      |
//! | `GET /rules/{id}`         |                         | [`RuleResponse`]       |
//! | `POST /validate_rule`     | [`RuleStringRequest`]   | [`ValidateResponse`]   |
//! | `POST /create_rule`       | [`RuleStringRequest`]   | [`RuleIdResponse`]     |
//! | `POST /combine_rules`     | [`CombineRequest`]      | [`RuleIdResponse`]     |
//! | `POST /evaluate_rule`     | [`EvaluateRequest`]     | [`EvaluateResponse`]   |
//! | `PUT /modify_rule/{id}`   | [`ModifyRequest`]       | [`ModifyResponse`]     |
//!
//! Failed requests carry an [`ErrorResponse`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::form::InputValue;
use crate::{AstNode, CompareOp, Constant, OperandNode, OperatorNode};

/// Errors decoding a service body.
#[derive(Debug, Error)]
pub enum WireError {
    #[error("malformed service response: {0}")]
    Json(#[from] serde_json::Error),
}

/// A constant as the service sends it: a JSON number or string.
///
/// Any other JSON value lands in `Other` and converts to a missing constant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireConstant {
    Int(i64),
    Float(f64),
    Text(String),
    Other(serde_json::Value),
}

impl WireConstant {
    fn into_constant(self) -> Option<Constant> {
        match self {
            WireConstant::Int(v) => Some(Constant::Int(v)),
            WireConstant::Float(v) => Some(Constant::Float(v)),
            WireConstant::Text(v) => Some(Constant::Text(v)),
            WireConstant::Other(value) => {
                tracing::warn!(%value, "dropping constant of unsupported type");
                None
            }
        }
    }
}

impl From<&Constant> for WireConstant {
    fn from(c: &Constant) -> Self {
        match c {
            Constant::Int(v) => WireConstant::Int(*v),
            Constant::Float(v) => WireConstant::Float(*v),
            Constant::Text(v) => WireConstant::Text(v.clone()),
        }
    }
}

/// Flat node record used by the service for every node kind.
///
/// `kind` is `"operator"` or `"operand"`; fields that do not apply are null.
/// A record without a `type` decodes with an empty kind and is dropped on
/// conversion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WireNode {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub attribute: Option<String>,
    #[serde(default)]
    pub operator: Option<String>,
    #[serde(default)]
    pub constant: Option<WireConstant>,
    #[serde(default)]
    pub left: Option<Box<WireNode>>,
    #[serde(default)]
    pub right: Option<Box<WireNode>>,
}

impl WireNode {
    /// Convert to an [`AstNode`], tolerating malformed records.
    ///
    /// A record of unknown or missing kind is dropped (returns `None`), which
    /// makes it an absent child of its parent. An operand whose comparison
    /// symbol is not recognized keeps its other fields with the operator left
    /// empty; likewise a constant that is neither a number nor a string.
    #[must_use]
    pub fn into_ast(self) -> Option<AstNode> {
        match self.kind.as_str() {
            "operator" => Some(AstNode::Operator(OperatorNode {
                value: self.value.unwrap_or_default(),
                left: self.left.and_then(|n| n.into_ast()).map(Box::new),
                right: self.right.and_then(|n| n.into_ast()).map(Box::new),
            })),
            "operand" => {
                let operator = self.operator.as_deref().and_then(|symbol| {
                    let op = CompareOp::from_symbol(symbol);
                    if op.is_none() {
                        tracing::warn!(symbol, "unrecognized comparison operator");
                    }
                    op
                });
                Some(AstNode::Operand(OperandNode {
                    attribute: self.attribute,
                    operator,
                    constant: self.constant.and_then(WireConstant::into_constant),
                }))
            }
            other => {
                tracing::warn!(kind = other, "dropping node of unknown kind");
                None
            }
        }
    }
}

impl From<&AstNode> for WireNode {
    fn from(node: &AstNode) -> Self {
        match node {
            AstNode::Operator(op) => WireNode {
                kind: "operator".to_owned(),
                value: Some(op.value.clone()),
                left: op.left.as_deref().map(|n| Box::new(WireNode::from(n))),
                right: op.right.as_deref().map(|n| Box::new(WireNode::from(n))),
                ..WireNode::default()
            },
            AstNode::Operand(leaf) => WireNode {
                kind: "operand".to_owned(),
                attribute: leaf.attribute.clone(),
                operator: leaf.operator.map(|op| op.symbol().to_owned()),
                constant: leaf.constant.as_ref().map(WireConstant::from),
                ..WireNode::default()
            },
        }
    }
}

/// One entry of `GET /rules`, also the `rule` of `GET /rules/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSummary {
    pub id: i64,
    pub rule_string: String,
    #[serde(default)]
    pub ast: Option<WireNode>,
    #[serde(default)]
    pub is_combined: bool,
}

impl RuleSummary {
    /// The rule's AST, converted. `None` when the service sent none or the
    /// root record is unusable.
    #[must_use]
    pub fn ast(&self) -> Option<AstNode> {
        self.ast.clone().and_then(WireNode::into_ast)
    }

    /// Label used when listing rules for selection.
    #[must_use]
    pub fn option_label(&self) -> String {
        let suffix = if self.is_combined { " (Combined)" } else { "" };
        format!("ID: {}, {}{suffix}", self.id, self.rule_string)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulesResponse {
    pub rules: Vec<RuleSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleResponse {
    pub rule: RuleSummary,
}

/// Body of `POST /validate_rule` and `POST /create_rule`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleStringRequest {
    pub rule_string: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleIdResponse {
    pub rule_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombineRequest {
    pub rule_ids: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluateRequest {
    pub rule_id: i64,
    pub data: BTreeMap<String, InputValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluateResponse {
    pub result: bool,
}

/// Structural edits the service knows how to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModificationType {
    ModifyOperand,
    ReplaceOperator,
    AddSubexpression,
    RemoveSubexpression,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifyRequest {
    pub modification_type: ModificationType,
    pub modification_data: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifyResponse {
    pub message: String,
    pub rule_string: String,
    #[serde(default)]
    pub ast: Option<WireNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Decode a `GET /rules` body.
///
/// # Errors
///
/// Returns [`WireError::Json`] if the body is not a valid rules listing.
pub fn decode_rules(body: &str) -> Result<RulesResponse, WireError> {
    Ok(serde_json::from_str(body)?)
}

/// Decode a bare AST record (the `ast` field of any response).
///
/// Nesting is bounded by `serde_json`'s recursion limit (128 levels), which
/// is below [`DEFAULT_MAX_DEPTH`](crate::DEFAULT_MAX_DEPTH). A deeper tree
/// fails here as [`WireError::Json`] before any layout depth check runs, and
/// the recursive conversions in this module never see it.
///
/// # Errors
///
/// Returns [`WireError::Json`] on malformed JSON or nesting past the limit.
/// A JSON `null` decodes to `Ok(None)`.
pub fn decode_ast(body: &str) -> Result<Option<AstNode>, WireError> {
    let node: Option<WireNode> = serde_json::from_str(body)?;
    Ok(node.and_then(WireNode::into_ast))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operand;

    const SAMPLE_AST: &str = r#"{
        "type": "operator", "value": "AND",
        "attribute": null, "operator": null, "constant": null,
        "left": {
            "type": "operand", "value": null,
            "attribute": "age", "operator": ">", "constant": "30",
            "left": null, "right": null
        },
        "right": {
            "type": "operand", "value": null,
            "attribute": "department", "operator": "=", "constant": "Sales",
            "left": null, "right": null
        }
    }"#;

    #[test]
    fn decode_full_record() {
        let ast = decode_ast(SAMPLE_AST).unwrap().unwrap();
        assert_eq!(ast, operand("age").gt("30").and(operand("department").eq("Sales")));
    }

    #[test]
    fn decode_null_is_absent() {
        assert_eq!(decode_ast("null").unwrap(), None);
    }

    #[test]
    fn decode_numeric_constants() {
        let ast = decode_ast(r#"{"type":"operand","attribute":"x","operator":">=","constant":5}"#)
            .unwrap()
            .unwrap();
        assert_eq!(ast, operand("x").gte(5_i64));
        let ast = decode_ast(r#"{"type":"operand","attribute":"x","operator":"<","constant":2.5}"#)
            .unwrap()
            .unwrap();
        assert_eq!(ast, operand("x").lt(2.5_f64));
    }

    #[test]
    fn unknown_kind_becomes_absent_child() {
        let body = r#"{
            "type": "operator", "value": "OR",
            "left": { "type": "mystery" },
            "right": { "type": "operand", "attribute": "a", "operator": "=", "constant": "1" }
        }"#;
        let ast = decode_ast(body).unwrap().unwrap();
        assert_eq!(ast, AstNode::operator("OR", None, Some(operand("a").eq("1"))));
    }

    #[test]
    fn unknown_comparison_keeps_attribute() {
        let ast = decode_ast(r#"{"type":"operand","attribute":"a","operator":"~=","constant":"1"}"#)
            .unwrap()
            .unwrap();
        match ast {
            AstNode::Operand(leaf) => {
                assert_eq!(leaf.attribute.as_deref(), Some("a"));
                assert_eq!(leaf.operator, None);
            }
            other => panic!("expected operand, got {other:?}"),
        }
    }

    #[test]
    fn missing_kind_is_dropped() {
        assert_eq!(decode_ast(r#"{"value":"AND"}"#).unwrap(), None);

        let body = r#"{
            "type": "operator", "value": "AND",
            "left": { "attribute": "age", "operator": ">", "constant": 30 },
            "right": { "type": "operand", "attribute": "b", "operator": "=", "constant": "x" }
        }"#;
        let ast = decode_ast(body).unwrap().unwrap();
        assert_eq!(ast, AstNode::operator("AND", None, Some(operand("b").eq("x"))));
    }

    #[test]
    fn unsupported_constant_becomes_missing() {
        let ast = decode_ast(r#"{"type":"operand","attribute":"active","operator":"=","constant":true}"#)
            .unwrap()
            .unwrap();
        match &ast {
            AstNode::Operand(leaf) => {
                assert_eq!(leaf.attribute.as_deref(), Some("active"));
                assert_eq!(leaf.operator, Some(CompareOp::Eq));
                assert_eq!(leaf.constant, None);
            }
            other => panic!("expected operand, got {other:?}"),
        }
        assert_eq!(crate::classify(&ast), crate::NodeType::Unknown);
    }

    #[test]
    fn one_bad_rule_does_not_sink_the_listing() {
        let body = r#"{ "rules": [
            { "id": 1, "rule_string": "a = 1",
              "ast": { "type": "operand", "attribute": "a", "operator": "=", "constant": 1 } },
            { "id": 2, "rule_string": "(b = 2 AND c = true)",
              "ast": { "type": "operator", "value": "AND",
                       "left": { "attribute": "b", "operator": "=", "constant": 2 },
                       "right": { "type": "operand", "attribute": "c", "operator": "=", "constant": true } } },
            { "id": 3, "rule_string": "d > 4",
              "ast": { "type": "operand", "attribute": "d", "operator": ">", "constant": 4 } }
        ] }"#;
        let rules = decode_rules(body).unwrap().rules;
        assert_eq!(rules.len(), 3);
        assert_eq!(rules[0].ast(), Some(operand("a").eq(1_i64)));
        assert_eq!(rules[2].ast(), Some(operand("d").gt(4_i64)));

        let broken = rules[1].ast().unwrap();
        let layout = crate::to_layout(Some(&broken)).unwrap().unwrap();
        assert_eq!(layout.label, "AND");
        assert_eq!(
            layout.children,
            vec![crate::TreeLayoutNode::leaf(crate::label::UNKNOWN_LABEL)]
        );
    }

    #[test]
    fn nesting_past_json_limit_is_a_json_error() {
        let mut body = String::from(r#"{"type":"operand","attribute":"x","operator":"=","constant":1}"#);
        for _ in 0..200 {
            body = format!(r#"{{"type":"operator","value":"AND","left":{body}}}"#);
        }
        assert!(matches!(decode_ast(&body), Err(WireError::Json(_))));
    }

    #[test]
    fn wire_round_trip_through_ast() {
        let ast = operand("age").gt(30_i64).or(operand("dept").neq("HR"));
        let wire = WireNode::from(&ast);
        assert_eq!(wire.kind, "operator");
        assert_eq!(wire.clone().into_ast(), Some(ast));
        let json = serde_json::to_value(&wire).unwrap();
        assert_eq!(json["left"]["operator"], ">");
        assert_eq!(json["right"]["constant"], "HR");
    }

    #[test]
    fn decode_rules_listing() {
        let body = format!(
            r#"{{ "rules": [
                {{ "id": 1, "rule_string": "(age > 30 AND department = 'Sales')", "ast": {SAMPLE_AST}, "is_combined": false }},
                {{ "id": 2, "rule_string": "x = 1", "ast": null, "is_combined": true }}
            ] }}"#
        );
        let rules = decode_rules(&body).unwrap().rules;
        assert_eq!(rules.len(), 2);
        assert_eq!(
            rules[0].option_label(),
            "ID: 1, (age > 30 AND department = 'Sales')"
        );
        assert_eq!(rules[1].option_label(), "ID: 2, x = 1 (Combined)");
        assert!(rules[0].ast().is_some());
        assert!(rules[1].ast().is_none());
    }

    #[test]
    fn single_rule_without_is_combined() {
        let body = r#"{ "rule": { "id": 7, "rule_string": "a = 1", "ast": null } }"#;
        let resp: RuleResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.rule.id, 7);
        assert!(!resp.rule.is_combined);
    }

    #[test]
    fn modification_type_names() {
        let req = ModifyRequest {
            modification_type: ModificationType::ReplaceOperator,
            modification_data: BTreeMap::from([
                ("target_operator".to_owned(), "AND".to_owned()),
                ("new_operator".to_owned(), "OR".to_owned()),
            ]),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["modification_type"], "replace_operator");
        assert_eq!(json["modification_data"]["new_operator"], "OR");
    }

    #[test]
    fn evaluate_request_serializes_typed_data() {
        let req = EvaluateRequest {
            rule_id: 3,
            data: BTreeMap::from([
                ("age".to_owned(), InputValue::Number(35.0)),
                ("department".to_owned(), InputValue::Text("Sales".into())),
            ]),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "rule_id": 3, "data": { "age": 35.0, "department": "Sales" } })
        );
    }

    #[test]
    fn validate_response_with_error() {
        let resp: ValidateResponse =
            serde_json::from_str(r#"{ "valid": false, "error": "Expected end of text" }"#).unwrap();
        assert!(!resp.valid);
        assert_eq!(resp.error.as_deref(), Some("Expected end of text"));
    }
}
