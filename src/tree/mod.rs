// SPDX-License-Identifier: MIT

//! Expression trees
//!
//! A tree is built from [`Node`]s and evaluated against positional
//! arguments:
//! - `AND(x > 100, version == '1.1.2')`
//! - `OR(name c? 'beta', $1 >= 3)`

mod context;
mod evaluator;
mod node;
mod ops;
mod value;

pub use context::{EvalContext, DEFAULT_PLACEHOLDER_PREFIX};
pub use evaluator::evaluate;
pub use node::{Node, OpKind};
pub use ops::{IntCompareOp, LogicOp, StrCompareOp};
pub use value::Value;
