//! Token definitions.

use super::{Keyword, Span};

/// Token types produced by the lexer.
///
/// Tokens carry no text of their own: the exact source text of a token is
/// recovered from its span, so literals keep their original spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    // Names
    /// Bare identifier
    Identifier,
    /// Backtick (or, in Oracle mode, double-quoted) identifier
    QuotedIdentifier,
    /// SQL keyword
    Keyword(Keyword),

    // Literals
    /// Integer literal
    IntNum,
    /// Fixed-point literal (`1.5`)
    DecimalNum,
    /// Approximate literal (`1e10`)
    ApproxNum,
    /// String literal
    String,
    /// National string literal (`N'..'`)
    NationalString,
    /// Hexadecimal literal (`X'..'` or `0x..`)
    HexString,
    /// Bit literal (`B'..'` or `0b..`)
    BitString,

    // Variables and placeholders
    /// `@name` or `@'name'`
    UserVariable,
    /// `@@name`, `@@global.name`, `@@session.name`
    SystemVariable,
    /// `?`
    Question,
    /// Optimizer hint (`/*+ ... */`)
    Hint,

    // Operators
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// %
    Percent,
    /// ^
    Caret,
    /// ~
    Tilde,
    /// !
    Bang,
    /// &
    BitAnd,
    /// |
    BitOr,
    /// <<
    LeftShift,
    /// >>
    RightShift,
    /// =
    Eq,
    /// <=>
    NullSafeEq,
    /// != or <>
    NotEq,
    /// <
    Lt,
    /// <=
    LtEq,
    /// >
    Gt,
    /// >=
    GtEq,
    /// &&
    AndAnd,
    /// ||
    Concat,
    /// :=
    Assign,
    /// ->
    Arrow,
    /// ->>
    LongArrow,

    // Delimiters
    /// (
    LeftParen,
    /// )
    RightParen,
    /// ,
    Comma,
    /// .
    Dot,
    /// ;
    Semicolon,
    /// @ (host separator in `'user'@'host'`)
    At,

    // Special
    /// End of input
    Eof,
    /// Invalid/unknown token
    Error(String),
}

impl TokenKind {
    /// Returns true for tokens that can name an object without quoting
    /// problems: identifiers and non-reserved keywords.
    #[must_use]
    pub const fn is_name(&self) -> bool {
        match self {
            Self::Identifier | Self::QuotedIdentifier => true,
            Self::Keyword(kw) => !kw.is_reserved(),
            _ => false,
        }
    }
}

/// A token with its span in the source code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The location in the source code.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match &self.kind {
            TokenKind::Keyword(kw) => Some(*kw),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_is_eof() {
        let eof = Token::new(TokenKind::Eof, Span::new(0, 0));
        let select = Token::new(TokenKind::Keyword(Keyword::Select), Span::new(0, 6));
        assert!(eof.is_eof());
        assert!(!select.is_eof());
    }

    #[test]
    fn test_token_as_keyword() {
        let select = Token::new(TokenKind::Keyword(Keyword::Select), Span::new(0, 6));
        let plus = Token::new(TokenKind::Plus, Span::new(0, 1));
        assert_eq!(select.as_keyword(), Some(Keyword::Select));
        assert_eq!(plus.as_keyword(), None);
    }

    #[test]
    fn test_token_is_name() {
        assert!(TokenKind::Identifier.is_name());
        assert!(TokenKind::Keyword(Keyword::Status).is_name());
        assert!(!TokenKind::Keyword(Keyword::Select).is_name());
        assert!(!TokenKind::Comma.is_name());
    }
}
