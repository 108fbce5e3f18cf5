use thiserror::Error;

/// Errors reported while turning query text into a predicate.
///
/// All of them are caused by the query itself and should be surfaced to
/// whoever wrote it. Every variant carries the offending fragment and the
/// character offset it starts at.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// A character (or unterminated literal) the lexer does not recognise
    #[error("invalid token '{text}' at position {position}")]
    InvalidToken { text: String, position: usize },

    /// An expression that does not start with one of the six operators
    #[error("unknown operator '{name}' at position {position}")]
    UnknownOperator { name: String, position: usize },

    /// Structural problem: missing operand, stray comma, unbalanced parenthesis
    #[error("malformed expression at position {position}: expected {expected}, found '{found}'")]
    MalformedExpression {
        expected: String,
        found: String,
        position: usize,
    },

    /// Field name that the record schema does not declare
    #[error("unknown field '{name}' at position {position}")]
    UnknownField { name: String, position: usize },

    /// Literal that cannot be converted to the field type, or an operator the
    /// field type does not support
    #[error("cannot compare field '{field}' with '{literal}' at position {position}: {reason}")]
    TypeCoercion {
        field: String,
        literal: String,
        reason: String,
        position: usize,
    },

    /// Operators nested deeper than the configured limit
    #[error("expression nested deeper than {limit} levels at position {position}")]
    NestingTooDeep { limit: usize, position: usize },
}

impl FilterError {
    pub fn malformed(expected: impl Into<String>, found: impl Into<String>, position: usize) -> Self {
        FilterError::MalformedExpression {
            expected: expected.into(),
            found: found.into(),
            position,
        }
    }

    /// Character offset in the query text.
    pub fn position(&self) -> usize {
        match self {
            FilterError::InvalidToken { position, .. }
            | FilterError::UnknownOperator { position, .. }
            | FilterError::MalformedExpression { position, .. }
            | FilterError::UnknownField { position, .. }
            | FilterError::TypeCoercion { position, .. }
            | FilterError::NestingTooDeep { position, .. } => *position,
        }
    }

    /// The piece of query text the error is about.
    pub fn fragment(&self) -> &str {
        match self {
            FilterError::InvalidToken { text, .. } => text,
            FilterError::UnknownOperator { name, .. } => name,
            FilterError::MalformedExpression { found, .. } => found,
            FilterError::UnknownField { name, .. } => name,
            FilterError::TypeCoercion { literal, .. } => literal,
            FilterError::NestingTooDeep { .. } => "",
        }
    }
}
