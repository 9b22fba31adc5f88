// SPDX-License-Identifier: MIT

//! Operand values carried by literal nodes and produced by evaluation

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::EvalError;

/// A dynamically-typed scalar.
///
/// Serialized untagged, so `360` stays an integer and `360.0` stays a float
/// across a JSON or YAML round trip.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl Value {
    /// Name of the variant, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Coerce to an integer for numeric comparison.
    ///
    /// Floats are truncated toward zero (saturating at the i64 bounds, NaN
    /// becomes 0). Every other variant is rejected; strings are never parsed.
    pub fn to_int(&self) -> Result<i64, EvalError> {
        match self {
            Value::Int(i) => Ok(*i),
            Value::Float(f) => Ok(f.trunc() as i64),
            other => Err(EvalError::CannotCoerce {
                got: other.type_name(),
            }),
        }
    }

    /// Borrow as a string operand for string comparison
    pub fn to_str_operand(&self) -> Result<&str, EvalError> {
        match self {
            Value::String(s) => Ok(s),
            other => Err(EvalError::WrongOperandType {
                got: other.type_name(),
            }),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            // Debug keeps the trailing `.0` so floats read as floats
            Value::Float(x) => write!(f, "{:?}", x),
            Value::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}
