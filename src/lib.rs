pub mod ast;
pub mod cli;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod schema;
pub mod store;
pub mod value;

pub use ast::{CompareOp, Expr, Keyword, Token, TokenKind};
pub use error::FilterError;
pub use evaluator::{Predicate, compile, evaluate, filter};
pub use lexer::{Lexer, tokenize};
pub use parser::{Parser, ParserConfig};
pub use schema::{FieldAccessor, FieldDef, FieldSchema, Record, resolve_field};
pub use store::{Store, StoreCatalog, StoreError};
pub use value::{Value, ValueType};

/// Compile `query` into a predicate over `R`, using `R`'s own schema and the
/// default [`ParserConfig`].
///
/// # Examples
///
/// ```
/// use sieve_lang::{Store, parse_filter};
///
/// let store = Store::new("store-1", "Gadget Haven", "Tech gadgets.", 150, 0);
///
/// let predicate = parse_filter::<Store>(r#"AND(EQUAL(ID,"store-1"),LESS_THAN(views,200))"#).unwrap();
/// assert!(predicate.matches(&store));
/// ```
pub fn parse_filter<R: Record>(query: &str) -> Result<Predicate<R>, FilterError> {
    parse_filter_with(query, R::schema(), &ParserConfig::default())
}

/// Compile `query` against an explicit schema and parser configuration.
pub fn parse_filter_with<R>(
    query: &str,
    schema: &FieldSchema<R>,
    config: &ParserConfig,
) -> Result<Predicate<R>, FilterError> {
    let mut parser = Parser::with_config(Lexer::new(query), *config)?;
    let expr = parser.parse()?;
    compile(expr, schema)
}
