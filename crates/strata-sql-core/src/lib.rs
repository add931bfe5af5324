//! # strata-sql-core
//!
//! A parser for an analytic (Presto-style) SQL dialect.
//!
//! This crate provides:
//! - A hand-written lexer producing typed tokens with byte spans and
//!   line/column positions
//! - A recursive descent parser with Pratt expression parsing, covering
//!   41 statement kinds, full queries (WITH, set operations, joins,
//!   grouping sets, window functions) and the type grammar
//! - A typed AST whose `Display` implementation renders canonical SQL that
//!   parses back to the same tree
//! - A [`Visitor`](ast::visit::Visitor) for walking the tree
//!
//! ## Parsing
//!
//! ```rust
//! use strata_sql_core::{parse_statement, Statement};
//!
//! let statement = parse_statement("SELECT name FROM users WHERE id = ?").unwrap();
//! assert!(matches!(statement, Statement::Query(_)));
//! assert_eq!(statement.to_string(), "SELECT name FROM users WHERE id = ?");
//! ```
//!
//! ## Errors
//!
//! Every failure is a [`ParseError`] located at the offending token, with
//! the set of tokens that would have been accepted there:
//!
//! ```rust
//! use strata_sql_core::parse_statement;
//!
//! let err = parse_statement("SELECT * FROM").unwrap_err();
//! assert_eq!((err.line, err.column), (1, 14));
//! assert_eq!(err.offending, "<EOF>");
//! ```
//!
//! ## Options
//!
//! ```rust
//! use strata_sql_core::{DecimalLiteralTreatment, Parser, ParserOptions};
//!
//! let options = ParserOptions::new().with_decimal_literal(DecimalLiteralTreatment::Reject);
//! assert!(Parser::with_options("SELECT 1.5", options).parse_statement().is_err());
//! ```

pub mod ast;
pub mod lexer;
pub mod parser;

pub use ast::{Expr, Statement};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{DecimalLiteralTreatment, ParseError, Parser, ParserOptions};

/// Parses a single SQL statement with default options.
///
/// # Errors
///
/// Returns a [`ParseError`] if the input is not exactly one statement.
pub fn parse_statement(sql: &str) -> Result<Statement, ParseError> {
    Parser::new(sql).parse_statement()
}

/// Parses a standalone SQL expression with default options.
///
/// # Errors
///
/// Returns a [`ParseError`] if the input is not exactly one expression.
pub fn parse_expression(sql: &str) -> Result<Expr, ParseError> {
    Parser::new(sql).parse_expression()
}
