//! SQL Parser implementation.

use std::collections::BTreeSet;
use std::mem::discriminant;

use tracing::debug;

use super::error::ParseError;
use super::options::ParserOptions;
use crate::ast::{Expr, Statement};
use crate::lexer::{Keyword, Lexer, Position, Token, TokenKind};

pub(super) type PResult<T> = Result<T, ParseError>;

/// What the parser expected at the furthest token it failed on.
#[derive(Debug, Default)]
struct Furthest {
    index: usize,
    expected: BTreeSet<&'static str>,
}

/// SQL Parser.
///
/// Holds the whole token stream so that alternatives sharing a prefix can be
/// tried one after another from a saved position.
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    options: ParserOptions,
    depth: usize,
    /// Parameter counter for ? placeholders.
    parameters: usize,
    furthest: Furthest,
}

impl Parser {
    /// Creates a new parser for the given input.
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self::with_options(input, ParserOptions::default())
    }

    /// Creates a parser for the given input with explicit options.
    #[must_use]
    pub fn with_options(input: &str, options: ParserOptions) -> Self {
        let tokens = Lexer::new(input).tokenize();
        Self::from_tokens(tokens, options)
    }

    /// Creates a parser over an already tokenized input.
    ///
    /// An end-of-input token is appended when the stream lacks one.
    #[must_use]
    pub fn from_tokens(mut tokens: Vec<Token>, options: ParserOptions) -> Self {
        if !tokens.last().is_some_and(Token::is_eof) {
            let (offset, position) = tokens.last().map_or((0, Position::default()), |last| {
                let column = last.position.column + last.text.chars().count();
                (last.span.end, Position::new(last.position.line, column))
            });
            tokens.push(Token::eof(offset, position));
        }
        Self {
            tokens,
            pos: 0,
            options,
            depth: 0,
            parameters: 0,
            furthest: Furthest::default(),
        }
    }

    /// The options this parser was created with.
    #[must_use]
    pub const fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parses a single SQL statement spanning the whole input.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input is not a valid SQL statement or
    /// tokens remain after it.
    pub fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        self.begin()?;
        debug!(
            input_len = self.input_len(),
            tokens = self.tokens.len(),
            "parsing statement"
        );
        let result = self.parse_statement_to_eof();
        self.finish(result)
    }

    /// Parses a single expression spanning the whole input.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input is not a valid expression or
    /// tokens remain after it.
    pub fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.begin()?;
        debug!(
            input_len = self.input_len(),
            tokens = self.tokens.len(),
            "parsing expression"
        );
        let result = self.parse_expr().and_then(|expr| {
            self.expect_eof()?;
            Ok(expr)
        });
        self.finish(result)
    }

    fn input_len(&self) -> usize {
        self.tokens.last().map_or(0, |token| token.span.end)
    }

    /// Resets the per-call state and reports the first lexer failure.
    fn begin(&mut self) -> PResult<()> {
        self.pos = 0;
        self.depth = 0;
        self.parameters = 0;
        self.furthest = Furthest::default();
        let failure = self.tokens.iter().find_map(|token| match &token.kind {
            TokenKind::Error(message) => Some(ParseError::new(message.clone(), token)),
            _ => None,
        });
        failure.map_or(Ok(()), Err)
    }

    /// Turns a recoverable failure into the error at the furthest point
    /// reached.
    fn finish<T>(&self, result: PResult<T>) -> PResult<T> {
        match result {
            Err(err) if err.is_recoverable() => Err(self.furthest_error()),
            other => other,
        }
    }

    fn furthest_error(&self) -> ParseError {
        let index = self.furthest.index.min(self.tokens.len() - 1);
        ParseError::mismatched(&self.tokens[index], self.furthest.expected.iter().copied())
    }

    // ===== Cursor =====

    /// The current token.
    pub(super) fn peek(&self) -> &Token {
        self.peek_nth(0)
    }

    /// The token `n` positions ahead, or the end-of-input token.
    pub(super) fn peek_nth(&self, n: usize) -> &Token {
        let index = (self.pos + n).min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    /// Consumes the current token. The end-of-input token is never consumed.
    pub(super) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !token.is_eof() {
            self.pos += 1;
        }
        token
    }

    /// Whether the current token has the same kind as `kind`, ignoring any
    /// payload.
    pub(super) fn at(&self, kind: &TokenKind) -> bool {
        self.nth_is(0, kind)
    }

    pub(super) fn nth_is(&self, n: usize, kind: &TokenKind) -> bool {
        discriminant(&self.peek_nth(n).kind) == discriminant(kind)
    }

    /// Whether the current token is `keyword`.
    pub(super) fn at_keyword(&self, keyword: Keyword) -> bool {
        self.nth_is_keyword(0, keyword)
    }

    pub(super) fn nth_is_keyword(&self, n: usize, keyword: Keyword) -> bool {
        self.peek_nth(n).as_keyword() == Some(keyword)
    }

    /// Records that `what` would have been acceptable at the current token.
    pub(super) fn note(&mut self, what: &'static str) {
        if self.pos > self.furthest.index {
            self.furthest.index = self.pos;
            self.furthest.expected.clear();
        }
        if self.pos == self.furthest.index {
            self.furthest.expected.insert(what);
        }
    }

    /// Like [`Self::at`], noting the expectation on failure.
    pub(super) fn check(&mut self, kind: &TokenKind) -> bool {
        let found = self.at(kind);
        if !found {
            self.note(kind.describe());
        }
        found
    }

    /// Like [`Self::at_keyword`], noting the expectation on failure.
    pub(super) fn check_keyword(&mut self, keyword: Keyword) -> bool {
        let found = self.at_keyword(keyword);
        if !found {
            self.note(keyword.quoted());
        }
        found
    }

    /// Consumes the current token if it matches `kind`.
    pub(super) fn eat(&mut self, kind: &TokenKind) -> bool {
        let found = self.check(kind);
        if found {
            self.advance();
        }
        found
    }

    /// Consumes the current token if it is `keyword`.
    pub(super) fn eat_keyword(&mut self, keyword: Keyword) -> bool {
        let found = self.check_keyword(keyword);
        if found {
            self.advance();
        }
        found
    }

    /// Consumes a token of the given kind or fails.
    pub(super) fn expect(&mut self, kind: &TokenKind) -> PResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.mismatch())
        }
    }

    /// Consumes `keyword` or fails.
    pub(super) fn expect_keyword(&mut self, keyword: Keyword) -> PResult<()> {
        if self.eat_keyword(keyword) {
            Ok(())
        } else {
            Err(self.mismatch())
        }
    }

    /// Consumes the keywords in order or fails at the first that is missing.
    pub(super) fn expect_keywords(&mut self, keywords: &[Keyword]) -> PResult<()> {
        for keyword in keywords {
            self.expect_keyword(*keyword)?;
        }
        Ok(())
    }

    /// Requires the end of input.
    pub(super) fn expect_eof(&mut self) -> PResult<()> {
        self.expect(&TokenKind::Eof).map(drop)
    }

    /// Notes `what` and returns a recoverable error at the current token.
    pub(super) fn expected(&mut self, what: &'static str) -> ParseError {
        self.note(what);
        self.mismatch()
    }

    /// A recoverable error at the current token listing what was noted
    /// there.
    pub(super) fn mismatch(&self) -> ParseError {
        let expected = if self.furthest.index == self.pos {
            self.furthest.expected.iter().copied().collect()
        } else {
            Vec::new()
        };
        ParseError::mismatched(self.peek(), expected)
    }

    /// A fatal error at the current token; no alternative is tried after it.
    pub(super) fn fail(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(message, self.peek())
    }

    // ===== Backtracking =====

    /// Runs `rule` as a trial: on a recoverable failure the cursor and the
    /// parameter counter are rewound and `None` is returned.
    pub(super) fn attempt<T>(
        &mut self,
        rule: impl FnOnce(&mut Self) -> PResult<T>,
    ) -> PResult<Option<T>> {
        let (pos, parameters) = (self.pos, self.parameters);
        match rule(self) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_recoverable() => {
                self.pos = pos;
                self.parameters = parameters;
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Runs `rule` one nesting level deeper, failing once the configured
    /// maximum depth is exceeded.
    pub(super) fn recurse<T>(&mut self, rule: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        if self.depth >= self.options.max_depth {
            return Err(self.fail(format!(
                "statement is too large (stack overflow while parsing): nesting exceeds {} levels",
                self.options.max_depth
            )));
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    /// Allocates the position of the next `?` placeholder, starting at 1.
    pub(super) const fn next_parameter(&mut self) -> usize {
        self.parameters += 1;
        self.parameters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Span;

    fn parser(sql: &str) -> Parser {
        let mut parser = Parser::new(sql);
        parser.begin().unwrap();
        parser
    }

    #[test]
    fn test_peek_past_end_returns_eof() {
        let parser = parser("a");
        assert!(parser.peek_nth(5).is_eof());
    }

    #[test]
    fn test_advance_stops_at_eof() {
        let mut parser = parser("a");
        parser.advance();
        parser.advance();
        assert!(parser.peek().is_eof());
    }

    #[test]
    fn test_attempt_rewinds_on_mismatch() {
        let mut parser = parser("a b");
        let tried = parser
            .attempt(|p| {
                p.advance();
                p.expect(&TokenKind::Comma)
            })
            .unwrap();
        assert!(tried.is_none());
        assert_eq!(parser.peek().text, "a");
    }

    #[test]
    fn test_attempt_propagates_fatal_errors() {
        let mut parser = parser("a");
        let result = parser.attempt(|p| -> PResult<()> { Err(p.fail("boom")) });
        assert_eq!(result.unwrap_err().message, "boom");
    }

    #[test]
    fn test_recurse_enforces_max_depth() {
        let mut parser = Parser::with_options("a", ParserOptions::new().with_max_depth(1));
        parser.begin().unwrap();
        let err = parser
            .recurse(|p| p.recurse(|_| Ok(())))
            .unwrap_err();
        assert!(err.message.contains("nesting exceeds 1 levels"));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_furthest_failure_wins() {
        let mut parser = parser("a b c");
        parser.advance();
        parser.advance();
        parser.note("','");
        parser.pos = 0;
        parser.note("'SELECT'");
        let err = parser.furthest_error();
        assert_eq!(err.offending, "c");
        assert_eq!(err.expected, vec!["','"]);
    }

    #[test]
    fn test_from_tokens_appends_eof() {
        let tokens = vec![Token::new(
            TokenKind::Identifier(String::from("abc")),
            "abc",
            Span::new(0, 3),
            Position::new(1, 1),
        )];
        let parser = Parser::from_tokens(tokens, ParserOptions::default());
        let eof = parser.peek_nth(1);
        assert!(eof.is_eof());
        assert_eq!(eof.span, Span::new(3, 3));
        assert_eq!(eof.position, Position::new(1, 4));
    }

    #[test]
    fn test_lexer_errors_are_reported_first() {
        let err = Parser::new("SELECT 'abc").parse_statement().unwrap_err();
        assert_eq!(err.line, 1);
        assert_eq!(err.column, 8);
    }

    #[test]
    fn test_parameters_are_numbered_in_order() {
        let expr = Parser::new("? + ?").parse_expression().unwrap();
        assert_eq!(
            expr,
            Expr::Parameter { position: 1 }
                .binary(crate::ast::BinaryOp::Add, Expr::Parameter { position: 2 })
        );
    }
}
