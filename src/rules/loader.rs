//! Rule loader - reads trees and rule sets from YAML or JSON files
//!
//! The format is picked from the file extension: `.json` is parsed as JSON,
//! anything else as YAML.

use super::types::RuleSet;
use crate::error::Result;
use crate::tree::Node;
use std::fs;
use std::path::Path;

/// Loads rule sets and single trees from disk
pub struct RuleLoader;

impl RuleLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load a rule set from a YAML or JSON file
    pub fn load_rule_set<P: AsRef<Path>>(&self, path: P) -> Result<RuleSet> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let set = if is_json(path) {
            Self::parse_json(&content)?
        } else {
            Self::parse_yaml(&content)?
        };
        log::debug!(
            "Loaded rule set '{}' with {} rules from {}",
            set.name,
            set.rules.len(),
            path.display()
        );
        Ok(set)
    }

    /// Load a single tree from a YAML or JSON file
    pub fn load_tree<P: AsRef<Path>>(&self, path: P) -> Result<Node> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        log::debug!("Loading tree from {}", path.display());
        if is_json(path) {
            Node::from_json(&content)
        } else {
            Node::from_yaml(&content)
        }
    }

    /// Parse a rule set from a YAML string
    pub fn parse_yaml(content: &str) -> Result<RuleSet> {
        let set: RuleSet = serde_yaml::from_str(content)?;
        Ok(set)
    }

    /// Parse a rule set from a JSON string
    pub fn parse_json(content: &str) -> Result<RuleSet> {
        let set: RuleSet = serde_json::from_str(content)?;
        Ok(set)
    }
}

impl Default for RuleLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}
