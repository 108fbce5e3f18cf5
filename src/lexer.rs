use crate::ast::{Keyword, Token, TokenKind, TokenValue};

/// Pull-based tokenizer over the query text.
///
/// Never fails: characters outside the language become
/// [`TokenKind::Invalid`] tokens and it is up to the parser to reject them.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn slice(&self, start: usize) -> String {
        self.input[start..self.position].iter().collect()
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self) -> Token {
        let start = self.position;
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                self.advance();
            } else {
                break;
            }
        }

        let text = self.slice(start);
        match Keyword::from_word(&text) {
            Some(kw) => Token::new(TokenKind::Keyword(kw), text, start),
            None => Token::new(TokenKind::Identifier, text, start),
        }
    }

    fn read_string(&mut self) -> Token {
        let start = self.position;
        self.advance(); // opening quote

        let mut value = String::new();
        while let Some(ch) = self.current_char() {
            self.advance();
            if ch == '"' {
                return Token::new(TokenKind::StringLiteral, self.slice(start), start)
                    .with_value(TokenValue::String(value));
            }
            value.push(ch);
        }

        // Ran off the end without a closing quote
        Token::new(TokenKind::Invalid, self.slice(start), start)
    }

    fn read_number(&mut self) -> Token {
        let start = self.position;
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                self.advance();
            } else {
                break;
            }
        }

        let text = self.slice(start);
        let decoded = text.parse::<i64>().ok();
        let token = Token::new(TokenKind::NumberLiteral, text, start);
        // Too large for i64: no decoded value, coercion decides
        match decoded {
            Some(n) => token.with_value(TokenValue::Integer(n)),
            None => token,
        }
    }

    fn single(&mut self, kind: TokenKind, ch: char) -> Token {
        let start = self.position;
        self.advance();
        Token::new(kind, ch.to_string(), start)
    }

    /// Produce the next token. Once the input is exhausted every call
    /// returns an [`TokenKind::EndOfInput`] token at the input length.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let token = match self.current_char() {
            None => Token::new(TokenKind::EndOfInput, "", self.input.len()),
            Some('(') => self.single(TokenKind::OpenParen, '('),
            Some(')') => self.single(TokenKind::CloseParen, ')'),
            Some(',') => self.single(TokenKind::Comma, ','),
            Some('"') => self.read_string(),
            Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => self.read_identifier(),
            Some(ch) if ch.is_ascii_digit() => self.read_number(),
            Some(ch) => self.single(TokenKind::Invalid, ch),
        };

        tracing::trace!(kind = ?token.kind, text = %token.text, position = token.position, "token");
        token
    }
}

/// Tokenize the whole input. The result always ends with exactly one
/// [`TokenKind::EndOfInput`] token.
///
/// # Examples
/// ```
/// use sieve_lang::ast::TokenKind;
/// use sieve_lang::lexer::tokenize;
///
/// let kinds: Vec<_> = tokenize("NOT(x)").into_iter().map(|t| t.kind).collect();
/// assert_eq!(kinds.len(), 5);
/// assert_eq!(kinds[4], TokenKind::EndOfInput);
/// ```
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = token.is(TokenKind::EndOfInput);
        tokens.push(token);
        if done {
            return tokens;
        }
    }
}

#[test]
fn test_keywords_case_insensitive() {
    let mut lexer = Lexer::new("and Or NOT equal Greater_Than less_than");
    assert_eq!(lexer.next_token().kind, TokenKind::Keyword(Keyword::And));
    assert_eq!(lexer.next_token().kind, TokenKind::Keyword(Keyword::Or));
    assert_eq!(lexer.next_token().kind, TokenKind::Keyword(Keyword::Not));
    assert_eq!(lexer.next_token().kind, TokenKind::Keyword(Keyword::Equal));
    assert_eq!(lexer.next_token().kind, TokenKind::Keyword(Keyword::GreaterThan));
    assert_eq!(lexer.next_token().kind, TokenKind::Keyword(Keyword::LessThan));
    assert_eq!(lexer.next_token().kind, TokenKind::EndOfInput);
}

#[test]
fn test_comparison() {
    let mut lexer = Lexer::new(r#"EQUAL(id, "store-1")"#);
    assert_eq!(lexer.next_token().kind, TokenKind::Keyword(Keyword::Equal));
    assert_eq!(lexer.next_token().kind, TokenKind::OpenParen);

    let field = lexer.next_token();
    assert_eq!(field.kind, TokenKind::Identifier);
    assert_eq!(field.text, "id");
    assert_eq!(field.position, 6);

    assert_eq!(lexer.next_token().kind, TokenKind::Comma);

    let literal = lexer.next_token();
    assert_eq!(literal.kind, TokenKind::StringLiteral);
    assert_eq!(literal.value, Some(TokenValue::String("store-1".to_string())));
    assert_eq!(literal.position, 10);

    assert_eq!(lexer.next_token().kind, TokenKind::CloseParen);
    assert_eq!(lexer.next_token().kind, TokenKind::EndOfInput);
}
