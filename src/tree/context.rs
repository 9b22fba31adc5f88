// SPDX-License-Identifier: MIT

//! Evaluation context and placeholder resolution

use once_cell::sync::Lazy;

use super::value::Value;
use crate::error::EvalError;

/// Placeholder prefix used when none is configured
pub const DEFAULT_PLACEHOLDER_PREFIX: &str = "$";

static DEFAULT_CONTEXT: Lazy<EvalContext> = Lazy::new(EvalContext::default);

/// Settings threaded through every evaluation.
///
/// Build one at startup and pass it by reference; it is never mutated by
/// evaluation and can be shared across threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalContext {
    placeholder_prefix: String,
}

impl EvalContext {
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            placeholder_prefix: prefix.into(),
        }
    }

    /// Shared context with the default prefix
    pub fn global_default() -> &'static EvalContext {
        &DEFAULT_CONTEXT
    }

    pub fn prefix(&self) -> &str {
        &self.placeholder_prefix
    }

    /// Placeholder marker for a 1-based argument position, e.g. `$2`
    pub fn placeholder(&self, position: usize) -> String {
        format!("{}{}", self.placeholder_prefix, position)
    }

    /// Argument position a literal refers to.
    ///
    /// `None` when the value is not a prefixed string. A prefixed string whose
    /// remainder is not a positive integer is an error.
    pub fn placeholder_position(&self, value: &Value) -> Option<Result<usize, EvalError>> {
        let s = value.as_str()?;
        let rest = s.strip_prefix(self.placeholder_prefix.as_str())?;
        match rest.parse::<usize>() {
            Ok(pos) if pos > 0 => Some(Ok(pos)),
            _ => Some(Err(EvalError::InvalidPlaceholder(s.to_string()))),
        }
    }

    /// Resolve a literal against the evaluation arguments.
    ///
    /// With no arguments the literal passes through verbatim, even when it
    /// looks like a placeholder.
    pub fn resolve(&self, literal: &Value, args: &[Value]) -> Result<Value, EvalError> {
        if args.is_empty() {
            return Ok(literal.clone());
        }

        match self.placeholder_position(literal) {
            None => Ok(literal.clone()),
            Some(Err(e)) => Err(e),
            Some(Ok(pos)) => args.get(pos - 1).cloned().ok_or(
                EvalError::InsufficientArguments {
                    position: pos,
                    supplied: args.len(),
                },
            ),
        }
    }
}

impl Default for EvalContext {
    fn default() -> Self {
        Self::with_prefix(DEFAULT_PLACEHOLDER_PREFIX)
    }
}
