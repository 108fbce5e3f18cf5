//! # Sieve Filter Language - Abstract Syntax Tree
//!
//! This module defines the tokens and the Abstract Syntax Tree (AST) for the
//! sieve filter language, a small function-call style language for boolean
//! predicates over typed records.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[operators]** - Comparison operators
//! - **[expressions]** - Expression nodes (comparisons and logical combinators)
//!
//! ## Quick Start
//!
//! ```text
//! AND(EQUAL(id,"store-2"),GREATER_THAN(views,130))
//! ```
//!
//! Keeps records whose `id` is `store-2` and whose `views` exceed 130.
//!
//! ## Grammar
//!
//! ```text
//! Expr       := BoolExpr | Comparison | "(" Expr ")"
//! BoolExpr   := "AND" "(" Expr "," Expr ")"
//!             | "OR"  "(" Expr "," Expr ")"
//!             | "NOT" "(" Expr ")"
//! Comparison := ("EQUAL" | "GREATER_THAN" | "LESS_THAN") "(" IDENT "," Literal ")"
//! Literal    := STRING | NUMBER
//! ```
//!
//! Operator words are case-insensitive. `AND` and `OR` take exactly two
//! operands, `NOT` exactly one.
//!
//! ## Examples
//!
//! ```text
//! EQUAL(id,"store-1")
//! NOT(EQUAL(id,"store-2"))
//! OR(EQUAL(id,"store-1"),GREATER_THAN(views,200))
//! ```
pub mod expressions;
pub mod operators;
pub mod tokens;

pub use expressions::{Expr, Field, Literal, LiteralKind};
pub use operators::CompareOp;
pub use tokens::{Keyword, Token, TokenKind, TokenValue};
