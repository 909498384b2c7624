//! SQL Tokenizer implementation.

use super::{Keyword, Span, Token, TokenKind};
use crate::dialect::{Dialect, MySqlDialect};

/// A lexer that tokenizes SQL input.
pub struct Lexer<'a> {
    /// The input source code.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
    /// Dialect deciding how `"` is lexed.
    dialect: &'a dyn Dialect,
    /// Keyword of the previous token, used to recognise hints.
    previous: Option<Keyword>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input using MySQL lexical rules.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self::with_dialect(input, &MySqlDialect)
    }

    /// Creates a new lexer for the given input and dialect.
    #[must_use]
    pub fn with_dialect(input: &'a str, dialect: &'a dyn Dialect) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
            dialect,
            previous: None,
        }
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the next character without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn rest(&self) -> &str {
        &self.input[self.pos..]
    }

    /// Returns true if a hint may follow the previous token.
    fn hint_allowed(&self) -> bool {
        matches!(
            self.previous,
            Some(
                Keyword::Select
                    | Keyword::Insert
                    | Keyword::Replace
                    | Keyword::Update
                    | Keyword::Delete
            )
        )
    }

    /// Skips whitespace and comments, stopping in front of a hint.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.advance();
            }

            // `-- ` comments need whitespace after the dashes
            if self.rest().starts_with("--")
                && self.rest()[2..]
                    .chars()
                    .next()
                    .is_none_or(char::is_whitespace)
            {
                self.skip_line();
                continue;
            }

            if self.peek() == Some('#') {
                self.skip_line();
                continue;
            }

            if self.rest().starts_with("/*") {
                if self.rest().starts_with("/*+") && self.hint_allowed() {
                    break;
                }
                self.advance(); // /
                self.advance(); // *
                loop {
                    match self.advance() {
                        Some('*') if self.peek() == Some('/') => {
                            self.advance();
                            break;
                        }
                        None => break,
                        _ => {}
                    }
                }
                continue;
            }

            break;
        }
    }

    fn skip_line(&mut self) {
        while self.peek().is_some_and(|c| c != '\n') {
            self.advance();
        }
    }

    /// Creates a span from start to current position.
    const fn make_span(&self) -> Span {
        Span::new(self.start, self.pos)
    }

    /// Creates a token with the current span.
    const fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.make_span())
    }

    fn error(&self, message: &str) -> Token {
        self.make_token(TokenKind::Error(String::from(message)))
    }

    /// Scans an identifier or keyword.
    fn scan_identifier(&mut self) -> Token {
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '$')
        {
            self.advance();
        }

        let text = &self.input[self.start..self.pos];
        match Keyword::from_str(text) {
            Some(keyword) => self.make_token(TokenKind::Keyword(keyword)),
            None => self.make_token(TokenKind::Identifier),
        }
    }

    /// Consumes a quoted run up to and including the closing quote.
    ///
    /// A doubled quote stands for the quote itself. Backslash escapes are
    /// honoured when `backslash` is set.
    fn scan_quoted(&mut self, quote: char, backslash: bool) -> bool {
        self.advance(); // opening quote
        loop {
            match self.advance() {
                Some('\\') if backslash => {
                    self.advance();
                }
                Some(c) if c == quote => {
                    if self.peek() == Some(quote) {
                        self.advance();
                    } else {
                        return true;
                    }
                }
                Some(_) => {}
                None => return false,
            }
        }
    }

    /// Scans a quoted identifier (`` `name` `` or, in Oracle mode, `"name"`).
    fn scan_quoted_identifier(&mut self, quote: char) -> Token {
        if self.scan_quoted(quote, false) {
            self.make_token(TokenKind::QuotedIdentifier)
        } else {
            self.error("Unterminated quoted identifier")
        }
    }

    /// Scans a string literal, keeping its raw text.
    fn scan_string(&mut self, quote: char, kind: TokenKind) -> Token {
        if self.scan_quoted(quote, true) {
            self.make_token(kind)
        } else {
            self.error("Unterminated string literal")
        }
    }

    /// Scans a prefixed literal such as `X'0A'`, `B'01'` or `N'text'`.
    fn scan_prefixed_string(&mut self, kind: TokenKind) -> Token {
        self.advance(); // prefix letter
        match kind {
            TokenKind::NationalString => self.scan_string('\'', kind),
            _ => {
                let hex = kind == TokenKind::HexString;
                self.advance(); // opening quote
                while self.peek().is_some_and(|c| is_radix_digit(c, hex)) {
                    self.advance();
                }
                if self.advance() == Some('\'') {
                    self.make_token(kind)
                } else {
                    self.error("Malformed hexadecimal or bit literal")
                }
            }
        }
    }

    /// Scans a number, classifying it as integer, decimal or approximate.
    fn scan_number(&mut self) -> Token {
        // 0x.. and 0b.. literals
        if self.peek() == Some('0') {
            let hex = match self.peek_next() {
                Some('x') => Some(true),
                Some('b') => Some(false),
                _ => None,
            };
            if let Some(hex) = hex {
                let save = self.pos;
                self.advance();
                self.advance();
                let digits_start = self.pos;
                while self.peek().is_some_and(|c| is_radix_digit(c, hex)) {
                    self.advance();
                }
                let ends_word = !self
                    .peek()
                    .is_some_and(|c| c.is_alphanumeric() || c == '_');
                if self.pos > digits_start && ends_word {
                    let kind = if hex {
                        TokenKind::HexString
                    } else {
                        TokenKind::BitString
                    };
                    return self.make_token(kind);
                }
                self.pos = save;
            }
        }

        let mut kind = TokenKind::IntNum;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        if self.peek() == Some('.') && self.peek_next().is_none_or(|c| c.is_ascii_digit()) {
            kind = TokenKind::DecimalNum;
            self.advance(); // consume .
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        if self.peek().is_some_and(|c| c == 'e' || c == 'E') {
            let save = self.pos;
            self.advance(); // consume e/E
            if self.peek().is_some_and(|c| c == '+' || c == '-') {
                self.advance();
            }
            if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                kind = TokenKind::ApproxNum;
                while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.advance();
                }
            } else {
                self.pos = save;
            }
        }

        self.make_token(kind)
    }

    /// Scans `@name`, `@'name'`, `@@name` and `@@scope.name`.
    fn scan_variable(&mut self) -> Token {
        self.advance(); // @
        if self.peek() == Some('@') {
            self.advance();
            while self
                .peek()
                .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '.' || c == '$')
            {
                self.advance();
            }
            return self.make_token(TokenKind::SystemVariable);
        }
        match self.peek() {
            Some('\'' | '"' | '`') => self.make_token(TokenKind::At),
            Some(c) if c.is_alphanumeric() || c == '_' || c == '$' => {
                while self
                    .peek()
                    .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '$' || c == '.')
                {
                    self.advance();
                }
                self.make_token(TokenKind::UserVariable)
            }
            _ => self.make_token(TokenKind::At),
        }
    }

    /// Scans an optimizer hint, `/*+ ... */`.
    fn scan_hint(&mut self) -> Token {
        self.advance(); // /
        self.advance(); // *
        loop {
            match self.advance() {
                Some('*') if self.peek() == Some('/') => {
                    self.advance();
                    return self.make_token(TokenKind::Hint);
                }
                Some(_) => {}
                None => return self.error("Unterminated hint"),
            }
        }
    }

    /// Returns the kind for an operator starting at `c`, consuming any
    /// further characters that belong to it.
    fn scan_operator(&mut self, c: char) -> TokenKind {
        match c {
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '.' => TokenKind::Dot,
            '+' => TokenKind::Plus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '^' => TokenKind::Caret,
            '~' => TokenKind::Tilde,
            '?' => TokenKind::Question,
            '=' => TokenKind::Eq,
            '-' => {
                if self.peek() == Some('>') {
                    self.advance();
                    if self.peek() == Some('>') {
                        self.advance();
                        TokenKind::LongArrow
                    } else {
                        TokenKind::Arrow
                    }
                } else {
                    TokenKind::Minus
                }
            }
            '<' => match self.peek() {
                Some('=') => {
                    self.advance();
                    if self.peek() == Some('>') {
                        self.advance();
                        TokenKind::NullSafeEq
                    } else {
                        TokenKind::LtEq
                    }
                }
                Some('>') => {
                    self.advance();
                    TokenKind::NotEq
                }
                Some('<') => {
                    self.advance();
                    TokenKind::LeftShift
                }
                _ => TokenKind::Lt,
            },
            '>' => match self.peek() {
                Some('=') => {
                    self.advance();
                    TokenKind::GtEq
                }
                Some('>') => {
                    self.advance();
                    TokenKind::RightShift
                }
                _ => TokenKind::Gt,
            },
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::NotEq
                } else {
                    TokenKind::Bang
                }
            }
            '|' => {
                if self.peek() == Some('|') {
                    self.advance();
                    TokenKind::Concat
                } else {
                    TokenKind::BitOr
                }
            }
            '&' => {
                if self.peek() == Some('&') {
                    self.advance();
                    TokenKind::AndAnd
                } else {
                    TokenKind::BitAnd
                }
            }
            ':' if self.peek() == Some('=') => {
                self.advance();
                TokenKind::Assign
            }
            _ => TokenKind::Error(format!("Unexpected character: {c}")),
        }
    }

    /// Scans the next token.
    #[must_use]
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();
        self.start = self.pos;

        let token = self.scan_token();
        self.previous = token.as_keyword();
        token
    }

    fn scan_token(&mut self) -> Token {
        let Some(c) = self.peek() else {
            return self.make_token(TokenKind::Eof);
        };

        match c {
            '/' if self.rest().starts_with("/*+") => self.scan_hint(),
            '\'' => self.scan_string('\'', TokenKind::String),
            '"' if self.dialect.double_quote_is_identifier() => self.scan_quoted_identifier('"'),
            '"' => self.scan_string('"', TokenKind::String),
            '`' => self.scan_quoted_identifier('`'),
            '@' => self.scan_variable(),
            'X' | 'x' if self.peek_next() == Some('\'') => {
                self.scan_prefixed_string(TokenKind::HexString)
            }
            'B' | 'b' if self.peek_next() == Some('\'') => {
                self.scan_prefixed_string(TokenKind::BitString)
            }
            'N' | 'n' if self.peek_next() == Some('\'') => {
                self.scan_prefixed_string(TokenKind::NationalString)
            }
            c if c.is_ascii_digit() => self.scan_number(),
            '.' if self.peek_next().is_some_and(|c| c.is_ascii_digit()) => self.scan_number(),
            c if c.is_alphabetic() || c == '_' || c == '$' => self.scan_identifier(),
            _ => {
                self.advance();
                let kind = self.scan_operator(c);
                self.make_token(kind)
            }
        }
    }

    /// Tokenizes the entire input and returns all tokens, ending with EOF.
    #[must_use]
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }
}

const fn is_radix_digit(c: char, hex: bool) -> bool {
    if hex {
        c.is_ascii_hexdigit()
    } else {
        matches!(c, '0' | '1')
    }
}
