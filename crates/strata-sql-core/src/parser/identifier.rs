//! Identifier classification.
//!
//! A token may serve as an identifier when it is a plain, quoted,
//! back-quoted or digit-led identifier, or a keyword from the
//! non-reserved set below.

use super::parser::{PResult, Parser};
use crate::ast::{Identifier, QualifiedName};
use crate::lexer::{Keyword, Token, TokenKind};

/// Keywords that stay usable as identifiers. Sorted, so membership is a
/// binary search.
const NON_RESERVED: &[Keyword] = &[
    Keyword::Add,
    Keyword::Analyze,
    Keyword::Array,
    Keyword::Bernoulli,
    Keyword::Call,
    Keyword::Cascade,
    Keyword::Catalogs,
    Keyword::Coalesce,
    Keyword::Column,
    Keyword::Columns,
    Keyword::Comment,
    Keyword::Commit,
    Keyword::Committed,
    Keyword::Current,
    Keyword::Data,
    Keyword::Date,
    Keyword::Day,
    Keyword::Distributed,
    Keyword::Excluding,
    Keyword::Explain,
    Keyword::Filter,
    Keyword::Following,
    Keyword::Format,
    Keyword::Functions,
    Keyword::Grant,
    Keyword::Grants,
    Keyword::Graphviz,
    Keyword::Hour,
    Keyword::If,
    Keyword::Including,
    Keyword::Input,
    Keyword::Integer,
    Keyword::Interval,
    Keyword::Isolation,
    Keyword::Json,
    Keyword::Level,
    Keyword::Logical,
    Keyword::Map,
    Keyword::Minute,
    Keyword::Month,
    Keyword::Nfc,
    Keyword::Nfd,
    Keyword::Nfkc,
    Keyword::Nfkd,
    Keyword::No,
    Keyword::Nullif,
    Keyword::Only,
    Keyword::Option,
    Keyword::Ordinality,
    Keyword::Output,
    Keyword::Over,
    Keyword::Partition,
    Keyword::Partitions,
    Keyword::Poissonized,
    Keyword::Position,
    Keyword::Preceding,
    Keyword::Privileges,
    Keyword::Properties,
    Keyword::Public,
    Keyword::Range,
    Keyword::Read,
    Keyword::Rename,
    Keyword::Repeatable,
    Keyword::Replace,
    Keyword::Reset,
    Keyword::Restrict,
    Keyword::Revoke,
    Keyword::Rollback,
    Keyword::Row,
    Keyword::Rows,
    Keyword::Schema,
    Keyword::Schemas,
    Keyword::Second,
    Keyword::Serializable,
    Keyword::Session,
    Keyword::Set,
    Keyword::Sets,
    Keyword::Show,
    Keyword::Smallint,
    Keyword::Start,
    Keyword::Stats,
    Keyword::Substring,
    Keyword::System,
    Keyword::Tables,
    Keyword::Tablesample,
    Keyword::Text,
    Keyword::Time,
    Keyword::Timestamp,
    Keyword::Tinyint,
    Keyword::To,
    Keyword::Transaction,
    Keyword::Type,
    Keyword::Unbounded,
    Keyword::Uncommitted,
    Keyword::Use,
    Keyword::Validate,
    Keyword::View,
    Keyword::Work,
    Keyword::Write,
    Keyword::Year,
    Keyword::Zone,
];

/// Returns true if `keyword` may be used as a plain identifier.
#[must_use]
pub fn is_non_reserved(keyword: Keyword) -> bool {
    NON_RESERVED.binary_search(&keyword).is_ok()
}

/// Returns the identifier a token denotes, if it can serve as one.
#[must_use]
pub fn identifier_of(token: &Token) -> Option<Identifier> {
    match &token.kind {
        TokenKind::QuotedIdentifier(value) | TokenKind::BackquotedIdentifier(value) => {
            Some(Identifier::quoted(value.clone()))
        }
        TokenKind::DigitIdentifier(value) | TokenKind::Identifier(value) => {
            Some(Identifier::new(value.clone()))
        }
        TokenKind::Keyword(keyword) if is_non_reserved(*keyword) => {
            Some(Identifier::new(token.text.clone()))
        }
        _ => None,
    }
}

const fn is_identifier_token(token: &Token) -> bool {
    match &token.kind {
        TokenKind::QuotedIdentifier(_)
        | TokenKind::BackquotedIdentifier(_)
        | TokenKind::DigitIdentifier(_)
        | TokenKind::Identifier(_) => true,
        _ => false,
    }
}

impl Parser {
    /// Whether the token `n` positions ahead can serve as an identifier.
    pub(super) fn nth_is_identifier(&self, n: usize) -> bool {
        let token = self.peek_nth(n);
        is_identifier_token(token) || token.as_keyword().is_some_and(is_non_reserved)
    }

    /// Whether the current token can serve as an identifier.
    pub(super) fn at_identifier(&self) -> bool {
        self.nth_is_identifier(0)
    }

    /// Parses an identifier.
    pub(super) fn parse_identifier(&mut self) -> PResult<Identifier> {
        match identifier_of(self.peek()) {
            Some(identifier) => {
                self.advance();
                Ok(identifier)
            }
            None => Err(self.expected("<identifier>")),
        }
    }

    /// Parses `ident (. ident)*`.
    pub(super) fn parse_qualified_name(&mut self) -> PResult<QualifiedName> {
        let mut name = QualifiedName::single(self.parse_identifier()?);
        while self.at(&TokenKind::Dot) && self.nth_is_identifier(1) {
            self.advance();
            name.push(self.parse_identifier()?);
        }
        Ok(name)
    }

    /// Parses `ident (, ident)*`.
    pub(super) fn parse_identifier_list(&mut self) -> PResult<Vec<Identifier>> {
        let mut identifiers = vec![self.parse_identifier()?];
        while self.eat(&TokenKind::Comma) {
            identifiers.push(self.parse_identifier()?);
        }
        Ok(identifiers)
    }

    /// Parses `( ident, ... )`.
    pub(super) fn parse_column_aliases(&mut self) -> PResult<Vec<Identifier>> {
        self.expect(&TokenKind::LeftParen)?;
        let identifiers = self.parse_identifier_list()?;
        self.expect(&TokenKind::RightParen)?;
        Ok(identifiers)
    }

    /// Length of the `ident (. ident)*` run starting at the current token,
    /// or zero when the current token is not an identifier.
    pub(super) fn qualified_name_len(&self) -> usize {
        if !self.at_identifier() {
            return 0;
        }
        let mut len = 1;
        while self.peek_nth(len).kind == TokenKind::Dot && self.nth_is_identifier(len + 1) {
            len += 2;
        }
        len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_reserved_table_is_sorted() {
        assert!(NON_RESERVED.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_non_reserved_membership() {
        for keyword in [
            Keyword::Format,
            Keyword::Show,
            Keyword::Filter,
            Keyword::Data,
            Keyword::Replace,
            Keyword::Date,
            Keyword::Zone,
        ] {
            assert!(is_non_reserved(keyword), "{keyword:?}");
        }
    }

    #[test]
    fn test_reserved_keywords() {
        for keyword in [
            Keyword::Select,
            Keyword::From,
            Keyword::Where,
            Keyword::And,
            Keyword::Or,
            Keyword::Case,
            Keyword::Limit,
            Keyword::Join,
            Keyword::Unnest,
            Keyword::TryCast,
            Keyword::Normalize,
        ] {
            assert!(!is_non_reserved(keyword), "{keyword:?}");
        }
    }

    #[test]
    fn test_reserved_set_is_the_rest() {
        let reserved = Keyword::ALL
            .iter()
            .filter(|keyword| !is_non_reserved(**keyword))
            .count();
        assert_eq!(reserved + NON_RESERVED.len(), Keyword::ALL.len());
    }
}
