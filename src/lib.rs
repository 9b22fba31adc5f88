// SPDX-License-Identifier: MIT

//! Boolean expression trees with positional placeholders.
//!
//! Trees are built with [`tree::Node`] or read from the JSON/YAML interchange
//! format, then evaluated against an argument list:
//!
//! ```
//! use exprtree::tree::{IntCompareOp, Node, Value};
//!
//! let rule = Node::int_compare(Node::literal("$1"), IntCompareOp::Gt, Node::literal(100));
//! assert_eq!(rule.evaluate(&[Value::Int(3600)]), Ok(Value::Bool(true)));
//! ```

pub mod config;
pub mod error;
pub mod rules;
pub mod tree;

pub use error::{EvalError, ExprTreeError, Result};
