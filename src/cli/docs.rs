//! Documentation content for the sieve CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Syntax,
    Operators,
    Types,
    Errors,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "syntax" | "grammar" => Some(Self::Syntax),
            "operators" | "ops" => Some(Self::Operators),
            "types" | "type" | "coercion" => Some(Self::Types),
            "errors" | "error" => Some(Self::Errors),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"SIEVE DOCUMENTATION

Sieve is a small filter language. A filter is a function-call style boolean
expression that is compiled once and then tested against every store record.

DOCUMENTATION CATEGORIES

  syntax            Grammar, literals, parentheses and whitespace
  operators         EQUAL, GREATER_THAN, LESS_THAN, AND, OR, NOT
  types             Field types and how literals are converted
  errors            Error kinds and what triggers them

QUICK REFERENCE

  EQUAL(id,"store-1")                        Exact match
  GREATER_THAN(views,100)                    Numeric comparison
  AND(EQUAL(id,"store-2"),LESS_THAN(views,300))
  OR(a,b)   NOT(a)                           Logical combinators

Run 'sieve doc <category>' for detailed documentation.
Run 'sieve fields' to list the fields a filter can use.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    match DocCategory::from_name(name) {
        Some(DocCategory::Syntax) => Ok(SYNTAX_DOC),
        Some(DocCategory::Operators) => Ok(OPERATORS_DOC),
        Some(DocCategory::Types) => Ok(TYPES_DOC),
        Some(DocCategory::Errors) => Ok(ERRORS_DOC),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

const SYNTAX_DOC: &str = r#"SYNTAX

GRAMMAR
-------
  Expr       := BoolExpr | Comparison | "(" Expr ")"
  BoolExpr   := "AND" "(" Expr "," Expr ")"
              | "OR"  "(" Expr "," Expr ")"
              | "NOT" "(" Expr ")"
  Comparison := ("EQUAL" | "GREATER_THAN" | "LESS_THAN") "(" FIELD "," LITERAL ")"
  LITERAL    := "text in double quotes" | 123

NOTES
-----
  Operator words ignore case:       and(...) == AND(...)
  Field names ignore case:          EQUAL(ID,"x") == EQUAL(id,"x")
  Whitespace between tokens is ignored.
  One redundant pair of parentheses is allowed around any expression:
                                    (EQUAL(id,"store-1"))
  String literals have no escapes; they end at the next double quote.
  Commas and parentheses inside a string literal are plain text.
  Numbers are non-negative integers.
"#;

const OPERATORS_DOC: &str = r#"OPERATORS

COMPARISON
----------
  EQUAL(field,value)          field equals value (strings: exact, case-sensitive)
  GREATER_THAN(field,value)   field > value      (integer fields only)
  LESS_THAN(field,value)      field < value      (integer fields only)

LOGICAL
-------
  AND(a,b)                    both hold; b is skipped when a fails
  OR(a,b)                     either holds; b is skipped when a holds
  NOT(a)                      a does not hold

  AND and OR take exactly two operands. Nest them for more:
    AND(EQUAL(id,"a"),AND(GREATER_THAN(views,1),LESS_THAN(views,9)))

EXAMPLES
--------
  sieve check 'NOT(EQUAL(id,"store-2"))' --file stores.json
  sieve check 'OR(EQUAL(id,"store-1"),GREATER_THAN(views,200))' --file stores.json
"#;

const TYPES_DOC: &str = r#"TYPES

FIELD TYPES
-----------
  integer     Counters and timestamps (views, timeStamp)
  string      Text (id, title, content)
  boolean     true / false

LITERAL CONVERSION
------------------
  The literal is converted to the type of the field it is compared with,
  once, when the filter is compiled.

  integer  <- 150 or "150"             "abc" is rejected
  string   <- "text" or 42 (as "42")
  boolean  <- "true" / "false", any case

  GREATER_THAN and LESS_THAN on string or boolean fields are rejected.
"#;

const ERRORS_DOC: &str = r#"ERRORS

Every error names the offending text and its character position.

  invalid token          A character outside the language or an
                         unterminated string
  unknown operator       An expression starting with a word that is not
                         AND, OR, NOT, EQUAL, GREATER_THAN or LESS_THAN
  malformed expression   Missing or extra operands, unbalanced parentheses,
                         missing comma, trailing text
  unknown field          A field the record type does not declare
  type coercion          A literal that does not fit the field type (including
                         numbers too large for 64 bits), or an ordering
                         operator on a non-integer field
  nesting too deep       More nested operators than --max-depth allows
"#;
