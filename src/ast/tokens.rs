use std::fmt;

/// Reserved operator words.
///
/// Matched case-insensitively by the lexer, so `and`, `And` and `AND` all
/// produce [`Keyword::And`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    /// `AND(expr, expr)`
    And,
    /// `OR(expr, expr)`
    Or,
    /// `NOT(expr)`
    Not,
    /// `EQUAL(field, literal)`
    Equal,
    /// `GREATER_THAN(field, literal)`
    GreaterThan,
    /// `LESS_THAN(field, literal)`
    LessThan,
}

impl Keyword {
    pub const ALL: [Keyword; 6] = [
        Keyword::And,
        Keyword::Or,
        Keyword::Not,
        Keyword::Equal,
        Keyword::GreaterThan,
        Keyword::LessThan,
    ];

    /// Canonical upper-case spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::And => "AND",
            Keyword::Or => "OR",
            Keyword::Not => "NOT",
            Keyword::Equal => "EQUAL",
            Keyword::GreaterThan => "GREATER_THAN",
            Keyword::LessThan => "LESS_THAN",
        }
    }

    /// Look up a word, ignoring ASCII case.
    ///
    /// # Examples
    /// ```
    /// use sieve_lang::ast::Keyword;
    ///
    /// assert_eq!(Keyword::from_word("greater_than"), Some(Keyword::GreaterThan));
    /// assert_eq!(Keyword::from_word("views"), None);
    /// ```
    pub fn from_word(word: &str) -> Option<Keyword> {
        Keyword::ALL
            .into_iter()
            .find(|kw| kw.as_str().eq_ignore_ascii_case(word))
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Field name
    ///
    /// Starts with a letter or underscore, followed by letters, digits or underscores.
    ///
    /// # Examples
    /// ```text
    /// id
    /// views
    /// time_stamp
    /// ```
    Identifier,

    /// One of the six operator words
    Keyword(Keyword),

    /// Double-quoted text, no escape processing
    ///
    /// # Examples
    /// ```text
    /// "store-1"
    /// "Book World"
    /// ```
    StringLiteral,

    /// Run of ASCII digits
    ///
    /// Carries [`TokenValue::Integer`] when the digits fit in an `i64`.
    NumberLiteral,

    /// `(`
    OpenParen,

    /// `)`
    CloseParen,

    /// `,`
    Comma,

    /// End of input. Returned forever once the text is exhausted.
    EndOfInput,

    /// A character (or unterminated literal) the language does not know
    Invalid,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Identifier => f.write_str("field name"),
            TokenKind::Keyword(kw) => write!(f, "'{}'", kw),
            TokenKind::StringLiteral => f.write_str("string literal"),
            TokenKind::NumberLiteral => f.write_str("number literal"),
            TokenKind::OpenParen => f.write_str("'('"),
            TokenKind::CloseParen => f.write_str("')'"),
            TokenKind::Comma => f.write_str("','"),
            TokenKind::EndOfInput => f.write_str("end of input"),
            TokenKind::Invalid => f.write_str("invalid token"),
        }
    }
}

/// Decoded value carried by literal tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenValue {
    Integer(i64),
    String(String),
}

/// A lexical token.
///
/// `text` is the exact source slice (including the quotes of a string
/// literal) and `position` is the character offset where it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub position: usize,
    pub value: Option<TokenValue>,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, position: usize) -> Self {
        Token {
            kind,
            text: text.into(),
            position,
            value: None,
        }
    }

    pub fn with_value(mut self, value: TokenValue) -> Self {
        self.value = Some(value);
        self
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Text as it should appear in diagnostics.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::EndOfInput => "end of input".to_string(),
            _ => self.text.clone(),
        }
    }
}
