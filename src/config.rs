// SPDX-License-Identifier: MIT

//! Environment-driven configuration

use crate::error::{ExprTreeError, Result};
use crate::tree::{EvalContext, DEFAULT_PLACEHOLDER_PREFIX};

/// Environment variable overriding the placeholder prefix
pub const PLACEHOLDER_PREFIX_VAR: &str = "EXPRTREE_PLACEHOLDER_PREFIX";

/// Process configuration, read once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalConfig {
    pub placeholder_prefix: String,
}

impl EvalConfig {
    /// Read configuration from the environment.
    ///
    /// Call `dotenv().ok()` first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self> {
        Self::from_prefix(std::env::var(PLACEHOLDER_PREFIX_VAR).ok())
    }

    /// Build from an optional prefix, falling back to the default
    pub fn from_prefix(prefix: Option<String>) -> Result<Self> {
        match prefix {
            None => Ok(Self::default()),
            Some(p) if p.is_empty() => Err(ExprTreeError::config(format!(
                "{} must not be empty",
                PLACEHOLDER_PREFIX_VAR
            ))),
            Some(p) => Ok(Self {
                placeholder_prefix: p,
            }),
        }
    }

    pub fn context(&self) -> EvalContext {
        EvalContext::with_prefix(self.placeholder_prefix.clone())
    }
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            placeholder_prefix: DEFAULT_PLACEHOLDER_PREFIX.to_string(),
        }
    }
}
