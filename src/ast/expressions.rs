use std::fmt;

use crate::ast::CompareOp;

/// Field reference inside a comparison, as written by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    /// Character offset of the name in the query text
    pub position: usize,
}

/// How a literal was spelled in the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    /// `"text"`
    String,
    /// `123`
    Number,
}

/// Literal operand of a comparison.
///
/// Kept textual until it is coerced to the declared type of the field it
/// is compared against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    pub kind: LiteralKind,
    /// Text without surrounding quotes
    pub text: String,
    /// Value decoded by the lexer for a number literal that fits in `i64`
    pub integer: Option<i64>,
    pub position: usize,
}

/// Abstract Syntax Tree node representing a parsed filter expression.
///
/// Produced by the parser without any knowledge of the records it will be
/// applied to; field names and literals are resolved later, when the tree
/// is compiled against a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Field comparison
    ///
    /// # Examples
    /// ```text
    /// EQUAL(id,"store-1")
    /// GREATER_THAN(views,100)
    /// ```
    Comparison {
        op: CompareOp,
        field: Field,
        literal: Literal,
    },

    /// Logical conjunction, `AND(left,right)`
    And { left: Box<Expr>, right: Box<Expr> },

    /// Logical disjunction, `OR(left,right)`
    Or { left: Box<Expr>, right: Box<Expr> },

    /// Negation, `NOT(operand)`
    Not { operand: Box<Expr> },
}

impl Expr {
    /// Nesting depth of the tree; a lone comparison has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Expr::Comparison { .. } => 1,
            Expr::And { left, right } | Expr::Or { left, right } => {
                1 + left.depth().max(right.depth())
            }
            Expr::Not { operand } => 1 + operand.depth(),
        }
    }

    /// Number of comparison leaves.
    pub fn comparisons(&self) -> usize {
        match self {
            Expr::Comparison { .. } => 1,
            Expr::And { left, right } | Expr::Or { left, right } => {
                left.comparisons() + right.comparisons()
            }
            Expr::Not { operand } => operand.comparisons(),
        }
    }
}

/// Renders the canonical form, e.g. `AND(EQUAL(id,"a"),GREATER_THAN(views,3))`.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Comparison { op, field, literal } => match literal.kind {
                LiteralKind::String => write!(f, "{}({},\"{}\")", op, field.name, literal.text),
                LiteralKind::Number => write!(f, "{}({},{})", op, field.name, literal.text),
            },
            Expr::And { left, right } => write!(f, "AND({},{})", left, right),
            Expr::Or { left, right } => write!(f, "OR({},{})", left, right),
            Expr::Not { operand } => write!(f, "NOT({})", operand),
        }
    }
}
