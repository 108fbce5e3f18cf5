use std::cmp::Ordering;
use std::fmt;

use crate::ast::Keyword;

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    /// `EQUAL`
    Equal,
    /// `GREATER_THAN`
    GreaterThan,
    /// `LESS_THAN`
    LessThan,
}

impl CompareOp {
    pub fn from_keyword(keyword: Keyword) -> Option<CompareOp> {
        match keyword {
            Keyword::Equal => Some(CompareOp::Equal),
            Keyword::GreaterThan => Some(CompareOp::GreaterThan),
            Keyword::LessThan => Some(CompareOp::LessThan),
            Keyword::And | Keyword::Or | Keyword::Not => None,
        }
    }

    pub fn keyword(&self) -> Keyword {
        match self {
            CompareOp::Equal => Keyword::Equal,
            CompareOp::GreaterThan => Keyword::GreaterThan,
            CompareOp::LessThan => Keyword::LessThan,
        }
    }

    /// Whether the operator needs an ordered value type.
    pub fn is_ordering(&self) -> bool {
        !matches!(self, CompareOp::Equal)
    }

    /// Whether `left.cmp(right) == ordering` satisfies the operator.
    pub fn holds(&self, ordering: Ordering) -> bool {
        match self {
            CompareOp::Equal => ordering == Ordering::Equal,
            CompareOp::GreaterThan => ordering == Ordering::Greater,
            CompareOp::LessThan => ordering == Ordering::Less,
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.keyword(), f)
    }
}
