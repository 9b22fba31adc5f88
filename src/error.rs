// SPDX-License-Identifier: MIT

//! Typed error handling for exprtree
//!
//! `EvalError` covers everything that can go wrong while walking a tree;
//! `ExprTreeError` wraps it together with loading and configuration failures.

use thiserror::Error;

use crate::tree::OpKind;

/// Errors raised while evaluating a node tree
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvalError {
    /// Operator node with the wrong number of children
    #[error("{kind} node requires {expected} children, got {got}")]
    Arity {
        kind: OpKind,
        expected: &'static str,
        got: usize,
    },

    /// Operand of an integer comparison is not a number
    #[error("can't convert to number: {got}")]
    CannotCoerce { got: &'static str },

    /// Operand of a string comparison is not a string
    #[error("wrong operand type: expected string, got {got}")]
    WrongOperandType { got: &'static str },

    /// Operator symbol not recognized for the node kind
    #[error("unsupported operator {symbol} for {kind} node")]
    UnsupportedOperator { kind: OpKind, symbol: String },

    /// Kind code outside the known set
    #[error("unsupported node kind {0}")]
    UnsupportedKind(i64),

    /// Placeholder references a position past the end of the arguments
    #[error("input args too short: position {position} referenced but only {supplied} supplied")]
    InsufficientArguments { position: usize, supplied: usize },

    /// Prefixed literal whose suffix is not a positive position.
    ///
    /// Reported on its own rather than as `UnsupportedKind`: the node is a
    /// well-formed literal and only its marker is malformed.
    #[error("invalid placeholder: {0}")]
    InvalidPlaceholder(String),
}

/// Top-level error type for exprtree
#[derive(Debug, Error)]
pub enum ExprTreeError {
    /// Evaluation failures
    #[error("Evaluation error: {0}")]
    Eval(#[from] EvalError),

    /// Named rule missing from a rule set
    #[error("Rule '{name}' not found")]
    RuleNotFound { name: String },

    /// Configuration errors (bad env vars, invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// Float with no JSON representation (infinity or NaN)
    #[error("non-finite float {0} can't be written as JSON")]
    NonFiniteFloat(f64),
}

impl ExprTreeError {
    /// Create a rule not found error
    pub fn rule_not_found(name: impl Into<String>) -> Self {
        Self::RuleNotFound { name: name.into() }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

/// Result type alias for exprtree operations
pub type Result<T> = std::result::Result<T, ExprTreeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eval_error_messages() {
        let err = EvalError::Arity {
            kind: OpKind::IntCompare,
            expected: "exactly 2",
            got: 3,
        };
        assert_eq!(
            err.to_string(),
            "int_compare node requires exactly 2 children, got 3"
        );

        let err = EvalError::InsufficientArguments {
            position: 3,
            supplied: 2,
        };
        assert_eq!(
            err.to_string(),
            "input args too short: position 3 referenced but only 2 supplied"
        );

        let err = EvalError::UnsupportedOperator {
            kind: OpKind::IntCompare,
            symbol: "!=".to_string(),
        };
        assert_eq!(err.to_string(), "unsupported operator != for int_compare node");
    }

    #[test]
    fn test_eval_error_converts_to_top_level() {
        let err: ExprTreeError = EvalError::UnsupportedKind(9).into();
        assert!(matches!(err, ExprTreeError::Eval(EvalError::UnsupportedKind(9))));
        assert_eq!(err.to_string(), "Evaluation error: unsupported node kind 9");
    }

    #[test]
    fn test_helper_constructors() {
        assert_eq!(
            ExprTreeError::rule_not_found("route").to_string(),
            "Rule 'route' not found"
        );
        assert_eq!(
            ExprTreeError::config("empty prefix").to_string(),
            "Configuration error: empty prefix"
        );
        assert_eq!(
            ExprTreeError::NonFiniteFloat(f64::INFINITY).to_string(),
            "non-finite float inf can't be written as JSON"
        );
    }
}
