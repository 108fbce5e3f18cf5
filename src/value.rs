use std::fmt;

use serde::Serialize;

use crate::{
    ast::{CompareOp, Literal},
    error::FilterError,
};

/// Declared type of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    /// Signed 64-bit integer
    Int,
    /// UTF-8 string
    Str,
    /// Boolean
    Bool,
}

impl ValueType {
    /// Whether `GREATER_THAN` / `LESS_THAN` are defined for this type.
    ///
    /// Only integers are ordered; strings and booleans support `EQUAL` only.
    pub fn is_orderable(&self) -> bool {
        matches!(self, ValueType::Int)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Int => f.write_str("integer"),
            ValueType::Str => f.write_str("string"),
            ValueType::Bool => f.write_str("boolean"),
        }
    }
}

/// A typed value, either read off a record or coerced from a literal.
///
/// # Examples
///
/// ```
/// use sieve_lang::{Value, ValueType};
///
/// let views = Value::Int(150);
/// let id = Value::Str("store-1".to_string());
///
/// assert_eq!(views.value_type(), ValueType::Int);
/// assert_eq!(id.as_str(), Some("store-1"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Int(i64),
    Str(String),
    Bool(bool),
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Int(_) => ValueType::Int,
            Value::Str(_) => ValueType::Str,
            Value::Bool(_) => ValueType::Bool,
        }
    }

    /// Get as integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Get as boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Str(s) => write!(f, "\"{}\"", s),
            Value::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Convert a literal's text into a value of the `target` type.
///
/// | target | accepted text |
/// |---|---|
/// | `Int` | the lexer's decoded number, or text `i64` parses, quoted or not |
/// | `Str` | anything, used verbatim |
/// | `Bool` | `true` / `false`, any case |
///
/// `field` only feeds the error message.
pub fn coerce(field: &str, literal: &Literal, target: ValueType) -> Result<Value, FilterError> {
    let fail = |reason: String| FilterError::TypeCoercion {
        field: field.to_string(),
        literal: literal.text.clone(),
        reason,
        position: literal.position,
    };

    match target {
        ValueType::Int => match literal.integer {
            Some(n) => Ok(Value::Int(n)),
            None => literal
                .text
                .trim()
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| fail(format!("'{}' is not a 64-bit integer", literal.text))),
        },
        ValueType::Str => Ok(Value::Str(literal.text.clone())),
        ValueType::Bool => {
            let text = literal.text.trim();
            if text.eq_ignore_ascii_case("true") {
                Ok(Value::Bool(true))
            } else if text.eq_ignore_ascii_case("false") {
                Ok(Value::Bool(false))
            } else {
                Err(fail(format!("'{}' is not a boolean", literal.text)))
            }
        }
    }
}

/// Apply a comparison operator to two values of the same type.
///
/// Strings compare exactly (case-sensitive), integers numerically.
pub fn compare<T: Ord + ?Sized>(op: CompareOp, left: &T, right: &T) -> bool {
    op.holds(left.cmp(right))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::LiteralKind;

    fn literal(kind: LiteralKind, text: &str) -> Literal {
        Literal {
            kind,
            text: text.to_string(),
            integer: None,
            position: 3,
        }
    }

    #[test]
    fn test_coerce_table() {
        let cases = vec![
            (LiteralKind::Number, "150", ValueType::Int, Some(Value::Int(150))),
            (LiteralKind::String, "150", ValueType::Int, Some(Value::Int(150))),
            (LiteralKind::String, "abc", ValueType::Int, None),
            (LiteralKind::Number, "42", ValueType::Str, Some(Value::Str("42".into()))),
            (LiteralKind::String, "Book World", ValueType::Str, Some(Value::Str("Book World".into()))),
            (LiteralKind::String, "TRUE", ValueType::Bool, Some(Value::Bool(true))),
            (LiteralKind::String, "false", ValueType::Bool, Some(Value::Bool(false))),
            (LiteralKind::Number, "1", ValueType::Bool, None),
        ];

        for (kind, text, target, expected) in cases {
            let result = coerce("f", &literal(kind, text), target).ok();
            assert_eq!(result, expected, "Failed for {:?} -> {:?}", text, target);
        }
    }

    #[test]
    fn test_coerce_prefers_decoded_integer() {
        let decoded = Literal {
            integer: Some(7),
            ..literal(LiteralKind::Number, "0007")
        };
        assert_eq!(coerce("f", &decoded, ValueType::Int).ok(), Some(Value::Int(7)));
        assert_eq!(coerce("f", &decoded, ValueType::Str).ok(), Some(Value::Str("0007".into())));

        // Digits past i64::MAX arrive undecoded
        let huge = literal(LiteralKind::Number, "99999999999999999999");
        assert!(matches!(
            coerce("views", &huge, ValueType::Int),
            Err(FilterError::TypeCoercion { position: 3, .. })
        ));
        assert_eq!(
            coerce("id", &huge, ValueType::Str).ok(),
            Some(Value::Str("99999999999999999999".into()))
        );
    }

    #[test]
    fn test_coerce_error_carries_position() {
        let err = coerce("views", &literal(LiteralKind::String, "abc"), ValueType::Int).unwrap_err();
        assert_eq!(err.position(), 3);
        assert_eq!(err.fragment(), "abc");
        assert!(err.to_string().contains("views"));
    }

    #[test]
    fn test_compare() {
        assert!(compare(CompareOp::Equal, &5_i64, &5));
        assert!(compare(CompareOp::GreaterThan, &200_i64, &150));
        assert!(!compare(CompareOp::GreaterThan, &150_i64, &150));
        assert!(compare(CompareOp::LessThan, &75_i64, &400));
        assert!(compare(CompareOp::Equal, "store-1", "store-1"));
        assert!(!compare(CompareOp::Equal, "Store-1", "store-1"));
    }
}
