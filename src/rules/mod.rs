// SPDX-License-Identifier: MIT

//! Named rule sets and file loading

mod loader;
mod types;

pub use loader::RuleLoader;
pub use types::{RuleDefinition, RuleSet};
