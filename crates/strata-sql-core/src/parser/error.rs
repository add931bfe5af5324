//! Parser error types.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::lexer::{Span, Token};

/// A syntax error raised while parsing.
///
/// Every failure of the lexer or of the grammar is reported through this one
/// type. The location is always the offending token; `expected` lists what
/// would have been acceptable there, sorted and without duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[error("line {line}:{column}: {message}")]
pub struct ParseError {
    /// The error message.
    pub message: String,
    /// Byte range of the offending token.
    pub span: Span,
    /// 1-based line of the offending token.
    pub line: usize,
    /// 1-based column of the offending token.
    pub column: usize,
    /// Source text of the offending token, `<EOF>` at end of input.
    pub offending: String,
    /// Acceptable token descriptions at the error location.
    pub expected: Vec<String>,
    #[cfg_attr(feature = "serde", serde(skip))]
    recoverable: bool,
}

impl ParseError {
    /// Creates a new parse error located at `token`.
    #[must_use]
    pub fn new(message: impl Into<String>, token: &Token) -> Self {
        Self {
            message: message.into(),
            span: token.span,
            line: token.position.line,
            column: token.position.column,
            offending: token.display_text().to_string(),
            expected: Vec::new(),
            recoverable: false,
        }
    }

    /// Creates a "mismatched input" error listing the acceptable tokens.
    #[must_use]
    pub fn mismatched<'a>(token: &Token, expected: impl IntoIterator<Item = &'a str>) -> Self {
        let expected: Vec<String> = expected
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect();
        let message = if expected.is_empty() {
            format!("mismatched input '{}'", token.display_text())
        } else {
            format!(
                "mismatched input '{}'. Expecting: {}",
                token.display_text(),
                expected.join(", ")
            )
        };
        Self {
            expected,
            recoverable: true,
            ..Self::new(message, token)
        }
    }

    /// Whether an enclosing alternative may still be tried after this error.
    pub(crate) const fn is_recoverable(&self) -> bool {
        self.recoverable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{Keyword, Position, TokenKind};

    fn token(kind: TokenKind, text: &str, line: usize, column: usize) -> Token {
        Token::new(kind, text, Span::new(4, 4 + text.len()), Position::new(line, column))
    }

    #[test]
    fn test_display_includes_location() {
        let tok = token(TokenKind::Keyword(Keyword::From), "FROM", 2, 7);
        let err = ParseError::new("something went wrong", &tok);
        assert_eq!(err.to_string(), "line 2:7: something went wrong");
        assert_eq!(err.offending, "FROM");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_mismatched_sorts_and_dedups() {
        let tok = token(TokenKind::Identifier(String::from("y")), "y", 1, 3);
        let err = ParseError::mismatched(&tok, ["'FROM'", "<EOF>", "'FROM'", "','"]);
        assert_eq!(err.expected, vec!["','", "'FROM'", "<EOF>"]);
        assert_eq!(
            err.message,
            "mismatched input 'y'. Expecting: ',', 'FROM', <EOF>"
        );
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_mismatched_at_eof() {
        let tok = Token::eof(10, Position::new(1, 11));
        let err = ParseError::mismatched(&tok, ["')'"]);
        assert_eq!(err.offending, "<EOF>");
        assert_eq!(err.to_string(), "line 1:11: mismatched input '<EOF>'. Expecting: ')'");
    }
}
