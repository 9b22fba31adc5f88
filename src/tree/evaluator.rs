// SPDX-License-Identifier: MIT

//! Recursive evaluation of expression trees

use super::context::EvalContext;
use super::node::{Node, OpKind};
use super::ops::{IntCompareOp, LogicOp, StrCompareOp};
use super::value::Value;
use crate::error::EvalError;

/// Evaluate a node against positional arguments.
///
/// Children are evaluated depth-first, left to right. The first error aborts
/// the whole evaluation.
pub fn evaluate(node: &Node, ctx: &EvalContext, args: &[Value]) -> Result<Value, EvalError> {
    log::trace!("evaluating {} node {}", node.kind, node.value);

    match node.kind {
        OpKind::Literal => ctx.resolve(&node.value, args),
        OpKind::LogicOp => evaluate_logic(node, ctx, args).map(Value::Bool),
        OpKind::IntCompare => evaluate_int_compare(node, ctx, args).map(Value::Bool),
        OpKind::StrCompare => evaluate_str_compare(node, ctx, args).map(Value::Bool),
        OpKind::Unrecognized(code) => Err(EvalError::UnsupportedKind(code)),
    }
}

impl Node {
    /// Evaluate with the default placeholder prefix
    pub fn evaluate(&self, args: &[Value]) -> Result<Value, EvalError> {
        evaluate(self, EvalContext::global_default(), args)
    }

    pub fn evaluate_with(&self, ctx: &EvalContext, args: &[Value]) -> Result<Value, EvalError> {
        evaluate(self, ctx, args)
    }
}

fn operator_symbol(node: &Node) -> Result<&str, EvalError> {
    node.value
        .as_str()
        .ok_or_else(|| EvalError::UnsupportedOperator {
            kind: node.kind,
            symbol: node.value.to_string(),
        })
}

fn unsupported_operator(node: &Node, symbol: &str) -> EvalError {
    EvalError::UnsupportedOperator {
        kind: node.kind,
        symbol: symbol.to_string(),
    }
}

fn require_two_children(node: &Node) -> Result<(&Node, &Node), EvalError> {
    match node.children.as_slice() {
        [left, right] => Ok((left, right)),
        other => Err(EvalError::Arity {
            kind: node.kind,
            expected: "exactly 2",
            got: other.len(),
        }),
    }
}

// OR only stops on a literal `true` and AND only on a literal `false`, so a
// non-boolean child counts as "not true" under OR but is skipped under AND.
fn evaluate_logic(node: &Node, ctx: &EvalContext, args: &[Value]) -> Result<bool, EvalError> {
    let symbol = operator_symbol(node)?;
    let op = LogicOp::from_symbol(symbol).ok_or_else(|| unsupported_operator(node, symbol))?;

    if node.children.is_empty() {
        return Err(EvalError::Arity {
            kind: node.kind,
            expected: "at least 1",
            got: 0,
        });
    }

    match op {
        LogicOp::Or => {
            for (i, child) in node.children.iter().enumerate() {
                if evaluate(child, ctx, args)?.as_bool() == Some(true) {
                    log::debug!("OR short-circuited at child {}", i);
                    return Ok(true);
                }
            }
            Ok(false)
        }
        LogicOp::And => {
            for (i, child) in node.children.iter().enumerate() {
                if evaluate(child, ctx, args)?.as_bool() == Some(false) {
                    log::debug!("AND short-circuited at child {}", i);
                    return Ok(false);
                }
            }
            Ok(true)
        }
    }
}

fn evaluate_int_compare(
    node: &Node,
    ctx: &EvalContext,
    args: &[Value],
) -> Result<bool, EvalError> {
    let (left, right) = require_two_children(node)?;

    let a = evaluate(left, ctx, args)?.to_int()?;
    let b = evaluate(right, ctx, args)?.to_int()?;

    let symbol = operator_symbol(node)?;
    let op = IntCompareOp::from_symbol(symbol).ok_or_else(|| unsupported_operator(node, symbol))?;
    Ok(op.apply(a, b))
}

fn evaluate_str_compare(
    node: &Node,
    ctx: &EvalContext,
    args: &[Value],
) -> Result<bool, EvalError> {
    let (left, right) = require_two_children(node)?;

    let a = evaluate(left, ctx, args)?;
    let a = a.to_str_operand()?;
    let b = evaluate(right, ctx, args)?;
    let b = b.to_str_operand()?;

    let symbol = operator_symbol(node)?;
    let op = StrCompareOp::from_symbol(symbol).ok_or_else(|| unsupported_operator(node, symbol))?;
    Ok(op.apply(a, b))
}
