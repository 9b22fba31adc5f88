// SPDX-License-Identifier: MIT

//! Operator vocabulary for logic and comparison nodes
//!
//! Symbols are matched exactly and case-sensitively.

use std::fmt;

/// Logical operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicOp {
    /// AND
    And,
    /// OR
    Or,
}

/// Integer comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntCompareOp {
    /// >=?
    Gte,
    /// >?
    Gt,
    /// ==?
    Eq,
    /// <?
    Lt,
    /// <=?
    Lte,
}

/// String comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrCompareOp {
    /// ==?
    Eq,
    /// c? (left contains right)
    Contains,
}

impl LogicOp {
    pub fn symbol(self) -> &'static str {
        match self {
            LogicOp::And => "AND",
            LogicOp::Or => "OR",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "AND" => Some(LogicOp::And),
            "OR" => Some(LogicOp::Or),
            _ => None,
        }
    }
}

impl IntCompareOp {
    pub fn symbol(self) -> &'static str {
        match self {
            IntCompareOp::Gte => ">=?",
            IntCompareOp::Gt => ">?",
            IntCompareOp::Eq => "==?",
            IntCompareOp::Lt => "<?",
            IntCompareOp::Lte => "<=?",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            ">=?" => Some(IntCompareOp::Gte),
            ">?" => Some(IntCompareOp::Gt),
            "==?" => Some(IntCompareOp::Eq),
            "<?" => Some(IntCompareOp::Lt),
            "<=?" => Some(IntCompareOp::Lte),
            _ => None,
        }
    }

    pub fn apply(self, left: i64, right: i64) -> bool {
        match self {
            IntCompareOp::Gte => left >= right,
            IntCompareOp::Gt => left > right,
            IntCompareOp::Eq => left == right,
            IntCompareOp::Lt => left < right,
            IntCompareOp::Lte => left <= right,
        }
    }
}

impl StrCompareOp {
    pub fn symbol(self) -> &'static str {
        match self {
            StrCompareOp::Eq => "==?",
            StrCompareOp::Contains => "c?",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "==?" => Some(StrCompareOp::Eq),
            "c?" => Some(StrCompareOp::Contains),
            _ => None,
        }
    }

    pub fn apply(self, left: &str, right: &str) -> bool {
        match self {
            StrCompareOp::Eq => left == right,
            StrCompareOp::Contains => left.contains(right),
        }
    }
}

impl fmt::Display for LogicOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl fmt::Display for IntCompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl fmt::Display for StrCompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
