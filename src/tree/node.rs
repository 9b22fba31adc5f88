// SPDX-License-Identifier: MIT

//! Expression nodes and their interchange format
//!
//! A node serializes as
//! `{"op_type": 2, "value": ">?", "child": [...]}`; a leaf writes
//! `"child": null`.

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::context::EvalContext;
use super::ops::{IntCompareOp, LogicOp, StrCompareOp};
use super::value::Value;
use crate::error::ExprTreeError;

/// Tag selecting how a node evaluates.
///
/// Codes 0..=3 are the stable interchange codes. Any other integer is kept as
/// `Unrecognized` and rejected when the node is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "KindRepr", into = "i64")]
pub enum OpKind {
    #[default]
    Literal,
    LogicOp,
    IntCompare,
    StrCompare,
    Unrecognized(i64),
}

impl OpKind {
    pub fn code(self) -> i64 {
        match self {
            OpKind::Literal => 0,
            OpKind::LogicOp => 1,
            OpKind::IntCompare => 2,
            OpKind::StrCompare => 3,
            OpKind::Unrecognized(code) => code,
        }
    }

    pub fn from_code(code: i64) -> Self {
        match code {
            0 => OpKind::Literal,
            1 => OpKind::LogicOp,
            2 => OpKind::IntCompare,
            3 => OpKind::StrCompare,
            other => OpKind::Unrecognized(other),
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpKind::Literal => write!(f, "literal"),
            OpKind::LogicOp => write!(f, "logic"),
            OpKind::IntCompare => write!(f, "int_compare"),
            OpKind::StrCompare => write!(f, "str_compare"),
            OpKind::Unrecognized(code) => write!(f, "unrecognized({})", code),
        }
    }
}

/// Node kind: an integer code, or one of the kind names
#[derive(Deserialize, JsonSchema)]
#[serde(untagged)]
enum KindRepr {
    Code(i64),
    Name(KindName),
}

#[derive(Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
enum KindName {
    Literal,
    Logic,
    IntCompare,
    StrCompare,
}

impl From<KindRepr> for OpKind {
    fn from(repr: KindRepr) -> Self {
        match repr {
            KindRepr::Code(code) => OpKind::from_code(code),
            KindRepr::Name(KindName::Literal) => OpKind::Literal,
            KindRepr::Name(KindName::Logic) => OpKind::LogicOp,
            KindRepr::Name(KindName::IntCompare) => OpKind::IntCompare,
            KindRepr::Name(KindName::StrCompare) => OpKind::StrCompare,
        }
    }
}

impl From<OpKind> for i64 {
    fn from(kind: OpKind) -> Self {
        kind.code()
    }
}

/// A node in an expression tree
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Node {
    /// How this node evaluates
    #[serde(rename = "op_type", default)]
    #[schemars(with = "KindRepr")]
    pub kind: OpKind,
    /// Literal operand, placeholder marker, or operator symbol
    #[serde(default)]
    pub value: Value,
    /// Ordered operands
    #[serde(
        rename = "child",
        default,
        serialize_with = "serialize_children",
        deserialize_with = "deserialize_children"
    )]
    #[schemars(with = "Option<Vec<Node>>")]
    pub children: Vec<Node>,
}

fn serialize_children<S: Serializer>(
    children: &[Node],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    if children.is_empty() {
        serializer.serialize_none()
    } else {
        serializer.collect_seq(children)
    }
}

fn deserialize_children<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Vec<Node>, D::Error> {
    Ok(Option::<Vec<Node>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Node {
    /// Create an empty literal node with a null value
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a child. Arity is only checked at evaluation time.
    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn set_kind(&mut self, kind: OpKind) {
        self.kind = kind;
    }

    pub fn set_value(&mut self, value: impl Into<Value>) {
        self.value = value.into();
    }

    /// Literal leaf
    pub fn literal(value: impl Into<Value>) -> Self {
        Self {
            kind: OpKind::Literal,
            value: value.into(),
            children: Vec::new(),
        }
    }

    /// Literal leaf referencing the `position`-th evaluation argument
    pub fn placeholder(position: usize, ctx: &EvalContext) -> Self {
        Self::literal(ctx.placeholder(position))
    }

    pub fn logic(op: LogicOp, children: Vec<Node>) -> Self {
        Self {
            kind: OpKind::LogicOp,
            value: Value::from(op.symbol()),
            children,
        }
    }

    pub fn int_compare(left: Node, op: IntCompareOp, right: Node) -> Self {
        Self {
            kind: OpKind::IntCompare,
            value: Value::from(op.symbol()),
            children: vec![left, right],
        }
    }

    pub fn str_compare(left: Node, op: StrCompareOp, right: Node) -> Self {
        Self {
            kind: OpKind::StrCompare,
            value: Value::from(op.symbol()),
            children: vec![left, right],
        }
    }

    /// JSON has no infinity or NaN, and serde_json would write them as null
    fn ensure_json_representable(&self) -> crate::error::Result<()> {
        if let Value::Float(f) = self.value {
            if !f.is_finite() {
                return Err(ExprTreeError::NonFiniteFloat(f));
            }
        }
        self.children
            .iter()
            .try_for_each(Node::ensure_json_representable)
    }

    pub fn to_json(&self) -> crate::error::Result<String> {
        self.ensure_json_representable()?;
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> crate::error::Result<String> {
        self.ensure_json_representable()?;
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(input: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn to_yaml(&self) -> crate::error::Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn from_yaml(input: &str) -> crate::error::Result<Self> {
        Ok(serde_yaml::from_str(input)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvalError;

    #[test]
    fn test_new_node_is_empty_literal() {
        let node = Node::new();
        assert_eq!(node.kind, OpKind::Literal);
        assert_eq!(node.value, Value::Null);
        assert!(node.children.is_empty());
    }

    #[test]
    fn test_builder_setters() {
        let mut node = Node::new();
        node.set_kind(OpKind::IntCompare);
        node.set_value(">?");
        node.add_child(Node::literal(3600));
        node.add_child(Node::literal(100));

        assert_eq!(
            node,
            Node::int_compare(Node::literal(3600), IntCompareOp::Gt, Node::literal(100))
        );
    }

    #[test]
    fn test_add_child_does_not_check_arity() {
        let mut node = Node::new();
        node.set_kind(OpKind::StrCompare);
        for i in 0..5 {
            node.add_child(Node::literal(i));
        }
        assert_eq!(node.children.len(), 5);
    }

    #[test]
    fn test_kind_codes() {
        assert_eq!(OpKind::Literal.code(), 0);
        assert_eq!(OpKind::LogicOp.code(), 1);
        assert_eq!(OpKind::IntCompare.code(), 2);
        assert_eq!(OpKind::StrCompare.code(), 3);
        assert_eq!(OpKind::from_code(3), OpKind::StrCompare);
        assert_eq!(OpKind::from_code(9), OpKind::Unrecognized(9));
        assert_eq!(OpKind::Unrecognized(9).code(), 9);
    }

    #[test]
    fn test_leaf_serializes_null_children() {
        let json = Node::literal(360).to_json().unwrap();
        assert_eq!(json, r#"{"op_type":0,"value":360,"child":null}"#);
    }

    #[test]
    fn test_operator_serializes_children_in_order() {
        let node = Node::str_compare(
            Node::literal("36"),
            StrCompareOp::Eq,
            Node::literal("360"),
        );
        assert_eq!(
            node.to_json().unwrap(),
            r#"{"op_type":3,"value":"==?","child":[{"op_type":0,"value":"36","child":null},{"op_type":0,"value":"360","child":null}]}"#
        );
    }

    #[test]
    fn test_children_absent_null_and_empty_are_equivalent() {
        let a = Node::from_json(r#"{"op_type":0,"value":1}"#).unwrap();
        let b = Node::from_json(r#"{"op_type":0,"value":1,"child":null}"#).unwrap();
        let c = Node::from_json(r#"{"op_type":0,"value":1,"child":[]}"#).unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert!(a.children.is_empty());
    }

    #[test]
    fn test_deserialize_escaped_symbol() {
        let node = Node::from_json(
            r#"{"op_type":2,"value":">?","child":[{"op_type":0,"value":360,"child":null},{"op_type":0,"value":100,"child":null}]}"#,
        )
        .unwrap();
        assert_eq!(node.kind, OpKind::IntCompare);
        assert_eq!(node.value, Value::from(">?"));
        assert_eq!(node.children[0].value, Value::Int(360));
    }

    #[test]
    fn test_deserialize_kind_by_name() {
        let node = Node::from_json(r#"{"op_type":"logic","value":"OR","child":null}"#).unwrap();
        assert_eq!(node.kind, OpKind::LogicOp);

        let err = Node::from_json(r#"{"op_type":"arith","value":"+"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_out_of_range_kind_codes_load() {
        for code in [256_i64, -1, 70_000] {
            let json = format!(r#"{{"op_type":{},"value":"AND","child":null}}"#, code);
            let node = Node::from_json(&json).unwrap();
            assert_eq!(node.kind, OpKind::Unrecognized(code));
            assert_eq!(node.evaluate(&[]), Err(EvalError::UnsupportedKind(code)));
            assert_eq!(node.to_json().unwrap(), json);
        }
    }

    #[test]
    fn test_non_finite_float_rejected_for_json() {
        let node = Node::from_yaml(
            r#"
            op_type: 2
            value: ">?"
            child:
              - value: .inf
              - value: 0
            "#,
        )
        .unwrap();
        assert_eq!(node.children[0].value, Value::Float(f64::INFINITY));

        let err = node.to_json().unwrap_err();
        assert!(matches!(err, ExprTreeError::NonFiniteFloat(f) if f.is_infinite()));
        assert!(node.to_json_pretty().is_err());

        let nan = Node::literal(f64::NAN);
        assert!(matches!(
            nan.to_json(),
            Err(ExprTreeError::NonFiniteFloat(f)) if f.is_nan()
        ));
    }

    #[test]
    fn test_non_finite_float_survives_yaml() {
        let node = Node::int_compare(
            Node::literal(f64::NEG_INFINITY),
            IntCompareOp::Lt,
            Node::literal(0),
        );
        let back = Node::from_yaml(&node.to_yaml().unwrap()).unwrap();
        assert_eq!(back, node);
        assert_eq!(back.evaluate(&[]), node.evaluate(&[]));
    }

    #[test]
    fn test_schema_accepts_codes_and_names() {
        let schema = serde_json::to_string(&schemars::schema_for!(Node)).unwrap();
        for name in ["literal", "logic", "int_compare", "str_compare"] {
            assert!(schema.contains(&format!("\"{}\"", name)), "missing {}", name);
        }
        assert!(schema.contains("\"integer\""));
    }

    #[test]
    fn test_unrecognized_kind_survives_round_trip() {
        let node = Node::from_json(r#"{"op_type":7,"value":"x","child":null}"#).unwrap();
        assert_eq!(node.kind, OpKind::Unrecognized(7));
        assert_eq!(
            node.to_json().unwrap(),
            r#"{"op_type":7,"value":"x","child":null}"#
        );
    }

    #[test]
    fn test_missing_fields_default() {
        let node = Node::from_json("{}").unwrap();
        assert_eq!(node, Node::new());
    }

    #[test]
    fn test_yaml_round_trip_keeps_types() {
        let node = Node::int_compare(
            Node::literal(3600),
            IntCompareOp::Gt,
            Node::literal(99.5),
        );
        let yaml = node.to_yaml().unwrap();
        let back = Node::from_yaml(&yaml).unwrap();
        assert_eq!(back, node);
        assert_eq!(back.children[0].value, Value::Int(3600));
        assert_eq!(back.children[1].value, Value::Float(99.5));
    }

    #[test]
    fn test_yaml_with_kind_names() {
        let yaml = r#"
            op_type: str_compare
            value: "c?"
            child:
              - value: "hello world"
              - value: world
        "#;
        let node = Node::from_yaml(yaml).unwrap();
        assert_eq!(
            node,
            Node::str_compare(
                Node::literal("hello world"),
                StrCompareOp::Contains,
                Node::literal("world"),
            )
        );
    }

    #[test]
    fn test_placeholder_constructor_uses_prefix() {
        let ctx = EvalContext::with_prefix("#");
        assert_eq!(Node::placeholder(2, &ctx), Node::literal("#2"));
        assert_eq!(
            Node::placeholder(1, &EvalContext::default()),
            Node::literal("$1")
        );
    }
}
