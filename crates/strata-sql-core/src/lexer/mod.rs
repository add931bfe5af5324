//! SQL Lexer/Tokenizer
//!
//! A hand-written lexer that turns SQL text into the typed token stream the
//! parser consumes. Callers with their own tokenizer can skip it and hand a
//! `Vec<Token>` straight to [`crate::Parser::from_tokens`].

mod span;
mod token;
mod tokenizer;

pub use span::{Position, Span};
pub use token::{Keyword, Token, TokenKind};
pub use tokenizer::Lexer;
