use std::mem;

use crate::{
    ast::{CompareOp, Expr, Field, Keyword, Literal, LiteralKind, Token, TokenKind, TokenValue},
    error::FilterError,
    lexer::Lexer,
};

/// Parser settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Deepest allowed nesting of operators. `EQUAL(a,1)` is depth 1,
    /// `NOT(EQUAL(a,1))` is depth 2.
    pub max_depth: usize,
}

impl ParserConfig {
    pub const DEFAULT_MAX_DEPTH: usize = 64;
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}

/// Recursive-descent parser producing an [`Expr`] tree.
///
/// Pulls tokens from the [`Lexer`] one at a time and stops at the first
/// error. An [`TokenKind::Invalid`] token is rejected as soon as it becomes
/// the current token.
pub struct Parser {
    lexer: Lexer,
    current_token: Token,
    config: ParserConfig,
    depth: usize,
}

impl Parser {
    pub fn new(lexer: Lexer) -> Result<Self, FilterError> {
        Self::with_config(lexer, ParserConfig::default())
    }

    pub fn with_config(mut lexer: Lexer, config: ParserConfig) -> Result<Self, FilterError> {
        let current_token = lexer.next_token();
        let parser = Parser {
            lexer,
            current_token,
            config,
            depth: 0,
        };
        parser.reject_invalid()?;
        Ok(parser)
    }

    fn reject_invalid(&self) -> Result<(), FilterError> {
        if self.check(TokenKind::Invalid) {
            return Err(FilterError::InvalidToken {
                text: self.current_token.text.clone(),
                position: self.current_token.position,
            });
        }
        Ok(())
    }

    /// Move to the next token, handing back the one just consumed.
    fn advance(&mut self) -> Result<Token, FilterError> {
        let next = self.lexer.next_token();
        let consumed = mem::replace(&mut self.current_token, next);
        self.reject_invalid()?;
        Ok(consumed)
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current_token.is(kind)
    }

    fn unexpected(&self, expected: &str) -> FilterError {
        FilterError::malformed(
            expected,
            self.current_token.describe(),
            self.current_token.position,
        )
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, FilterError> {
        if !self.check(kind) {
            return Err(self.unexpected(&kind.to_string()));
        }
        self.advance()
    }

    /// Parse a complete filter; the whole input must be consumed.
    pub fn parse(&mut self) -> Result<Expr, FilterError> {
        if self.check(TokenKind::EndOfInput) {
            return Err(self.unexpected("an expression"));
        }

        let expr = self.parse_expression()?;

        if !self.check(TokenKind::EndOfInput) {
            return Err(self.unexpected("end of input"));
        }
        Ok(expr)
    }

    /// Parse one expression, allowing a single redundant pair of parentheses
    /// around it.
    pub fn parse_expression(&mut self) -> Result<Expr, FilterError> {
        if self.depth >= self.config.max_depth {
            return Err(FilterError::NestingTooDeep {
                limit: self.config.max_depth,
                position: self.current_token.position,
            });
        }

        self.depth += 1;
        let result = self.parse_wrapped();
        self.depth -= 1;
        result
    }

    fn parse_wrapped(&mut self) -> Result<Expr, FilterError> {
        if !self.check(TokenKind::OpenParen) {
            return self.parse_operator();
        }

        self.advance()?;
        let expr = self.parse_operator()?;
        self.expect(TokenKind::CloseParen)?;
        Ok(expr)
    }

    fn parse_operator(&mut self) -> Result<Expr, FilterError> {
        match self.current_token.kind {
            TokenKind::Keyword(Keyword::And) => {
                self.advance()?;
                let (left, right) = self.parse_operand_pair()?;
                Ok(Expr::And { left, right })
            }
            TokenKind::Keyword(Keyword::Or) => {
                self.advance()?;
                let (left, right) = self.parse_operand_pair()?;
                Ok(Expr::Or { left, right })
            }
            TokenKind::Keyword(Keyword::Not) => {
                self.advance()?;
                self.expect(TokenKind::OpenParen)?;
                let operand = Box::new(self.parse_expression()?);
                self.expect(TokenKind::CloseParen)?;
                Ok(Expr::Not { operand })
            }
            TokenKind::Keyword(kw) => match CompareOp::from_keyword(kw) {
                Some(op) => {
                    self.advance()?;
                    self.parse_comparison(op)
                }
                None => Err(self.unexpected("an operator")),
            },
            TokenKind::Identifier => Err(FilterError::UnknownOperator {
                name: self.current_token.text.clone(),
                position: self.current_token.position,
            }),
            _ => Err(self.unexpected("an operator")),
        }
    }

    /// `"(" Expr "," Expr ")"`
    fn parse_operand_pair(&mut self) -> Result<(Box<Expr>, Box<Expr>), FilterError> {
        self.expect(TokenKind::OpenParen)?;
        let left = self.parse_expression()?;
        self.expect(TokenKind::Comma)?;
        let right = self.parse_expression()?;
        self.expect(TokenKind::CloseParen)?;
        Ok((Box::new(left), Box::new(right)))
    }

    /// `"(" IDENT "," Literal ")"`, operator keyword already consumed
    fn parse_comparison(&mut self, op: CompareOp) -> Result<Expr, FilterError> {
        self.expect(TokenKind::OpenParen)?;

        if !self.check(TokenKind::Identifier) {
            return Err(self.unexpected("a field name"));
        }
        let token = self.advance()?;
        let field = Field {
            name: token.text,
            position: token.position,
        };

        self.expect(TokenKind::Comma)?;
        let literal = self.parse_literal()?;
        self.expect(TokenKind::CloseParen)?;

        Ok(Expr::Comparison { op, field, literal })
    }

    fn parse_literal(&mut self) -> Result<Literal, FilterError> {
        let kind = match self.current_token.kind {
            TokenKind::StringLiteral => LiteralKind::String,
            TokenKind::NumberLiteral => LiteralKind::Number,
            _ => return Err(self.unexpected("a string or number literal")),
        };

        let token = self.advance()?;
        let (text, integer) = match token.value {
            Some(TokenValue::String(s)) => (s, None),
            Some(TokenValue::Integer(n)) => (token.text, Some(n)),
            None => (token.text, None),
        };

        Ok(Literal {
            kind,
            text,
            integer,
            position: token.position,
        })
    }
}

/// Parse query text into an expression tree with default settings.
///
/// # Examples
/// ```
/// use sieve_lang::parser::parse;
///
/// let expr = parse(r#"NOT(EQUAL(id,"store-2"))"#).unwrap();
/// assert_eq!(expr.to_string(), r#"NOT(EQUAL(id,"store-2"))"#);
/// ```
pub fn parse(query: &str) -> Result<Expr, FilterError> {
    Parser::new(Lexer::new(query))?.parse()
}
