// SPDX-License-Identifier: MIT

//! Rule set documents
//!
//! A rule set groups named trees so they can be stored and shipped as one
//! YAML or JSON file.

use serde::{Deserialize, Serialize};

use crate::error::{ExprTreeError, Result};
use crate::tree::{EvalContext, Node, Value};

/// Top-level rule set definition
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RuleSet {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Prefix the trees in this document were written with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder_prefix: Option<String>,
    #[serde(default)]
    pub rules: Vec<RuleDefinition>,
}

/// A single named rule
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RuleDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub tree: Node,
}

impl RuleSet {
    /// Look up a rule tree by name
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.rules.iter().find(|r| r.name == name).map(|r| &r.tree)
    }

    /// Context for evaluating this document's rules.
    ///
    /// The document's own prefix wins over `fallback`.
    pub fn context(&self, fallback: &EvalContext) -> Result<EvalContext> {
        match &self.placeholder_prefix {
            None => Ok(fallback.clone()),
            Some(p) if p.is_empty() => Err(ExprTreeError::config(format!(
                "rule set '{}' has an empty placeholder_prefix",
                self.name
            ))),
            Some(p) => Ok(EvalContext::with_prefix(p.clone())),
        }
    }

    /// Evaluate a named rule
    pub fn evaluate(&self, name: &str, ctx: &EvalContext, args: &[Value]) -> Result<Value> {
        let tree = self
            .get(name)
            .ok_or_else(|| ExprTreeError::rule_not_found(name))?;
        Ok(tree.evaluate_with(ctx, args)?)
    }

    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.name.as_str())
    }
}
