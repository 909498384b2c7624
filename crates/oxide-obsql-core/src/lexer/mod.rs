//! SQL Lexer/Tokenizer
//!
//! A hand-written lexer for the MySQL-mode lexical rules, producing a stream
//! of tokens whose spans index back into the source text.

mod keyword;
mod span;
mod token;
mod tokenizer;

pub use keyword::Keyword;
pub use span::Span;
pub use token::{Token, TokenKind};
pub use tokenizer::Lexer;
