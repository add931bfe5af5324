//! Tests for parser error cases.

mod common;
use common::*;

use strata_sql_core::lexer::{Position, Span, Token, TokenKind};
use strata_sql_core::{Parser, ParserOptions};

fn expects(err: &strata_sql_core::ParseError, what: &str) -> bool {
    err.expected.iter().any(|e| e == what)
}

#[test]
fn error_empty_input() {
    let err = parse_err("");
    assert_eq!(err.offending, "<EOF>");
    assert_eq!((err.line, err.column), (1, 1));
}

#[test]
fn error_incomplete_select() {
    let err = parse_err("SELECT");
    assert_eq!(err.offending, "<EOF>");
    assert!(expects(&err, "<expression>"), "{err}");
}

#[test]
fn error_missing_from_table() {
    let err = parse_err("SELECT * FROM");
    assert_eq!((err.line, err.column), (1, 14));
    assert!(expects(&err, "<identifier>"), "{err}");
}

#[test]
fn error_unknown_statement() {
    let err = parse_err("TRUNCATE users");
    assert_eq!(err.offending, "TRUNCATE");
    assert!(err.message.starts_with("mismatched input 'TRUNCATE'"), "{}", err.message);
}

#[test]
fn error_unclosed_paren() {
    let err = parse_err("SELECT (1 + 2");
    assert_eq!(err.offending, "<EOF>");
    assert!(expects(&err, "')'"), "{err}");
}

#[test]
fn error_reserved_keyword_as_alias() {
    let err = parse_err("SELECT 1 AS select");
    assert_eq!(err.offending, "select");
    assert!(expects(&err, "<identifier>"), "{err}");
}

#[test]
fn error_reserved_keyword_as_table() {
    let _ = parse_err("SELECT * FROM from");
    let _ = parse_err("DROP TABLE where");
}

#[test]
fn error_trailing_tokens_after_expression() {
    let err = parse_expr_err("x y");
    assert_eq!(err.offending, "y");
    assert_eq!(err.column, 3);
    assert!(expects(&err, "<EOF>"), "{err}");
}

#[test]
fn error_trailing_tokens_after_statement() {
    let err = parse_err("SELECT 1 FROM t t2 t3");
    assert_eq!(err.offending, "t3");
}

#[test]
fn error_trailing_semicolon() {
    let err = parse_err("SELECT 1;");
    assert_eq!(err.offending, ";");
}

#[test]
fn error_position_on_later_line() {
    let err = parse_err("SELECT a,\n  b\nFROM t WHERE");
    assert_eq!(err.line, 3);
    assert_eq!(err.column, 13);
}

#[test]
fn error_is_deterministic() {
    let first = parse_err("CREATE TABLE t (x INT, )");
    let second = parse_err("CREATE TABLE t (x INT, )");
    assert_eq!(first, second);
    assert_eq!(first.offending, ")");
}

#[test]
fn error_display_has_position() {
    let err = parse_err("SELECT * FROM t WHERE");
    assert!(err.to_string().starts_with("line 1:22: "), "{err}");
}

#[test]
fn error_row_type_needs_fields() {
    let _ = parse_expr_err("CAST(x AS ROW())");
}

#[test]
fn error_case_without_when() {
    let err = parse_expr_err("CASE x END");
    assert!(expects(&err, "'WHEN'"), "{err}");
}

#[test]
fn error_more_join_criteria_than_joins() {
    let _ = parse("SELECT * FROM a JOIN b JOIN c ON x ON y");
    let _ = parse_err("SELECT * FROM a JOIN b JOIN c ON x ON y ON z");
}

#[test]
fn error_outer_join_without_criteria() {
    for sql in [
        "SELECT * FROM a LEFT JOIN b",
        "SELECT * FROM a RIGHT OUTER JOIN b WHERE x",
        "SELECT * FROM a FULL JOIN b JOIN c ON x",
    ] {
        let err = parse_err(sql);
        assert!(expects(&err, "'ON'"), "{sql}: {err}");
        assert!(expects(&err, "'USING'"), "{sql}: {err}");
    }
    let _ = parse("SELECT * FROM a LEFT JOIN b ON x JOIN c");
    let _ = parse("SELECT * FROM a INNER JOIN b");
}

// ===== Lexer errors =====

#[test]
fn error_unterminated_string() {
    let err = parse_err("SELECT 'abc");
    assert_eq!(err.column, 8);
}

#[test]
fn error_unterminated_quoted_identifier() {
    let _ = parse_err("SELECT \"abc");
}

#[test]
fn error_invalid_character() {
    let err = parse_err("SELECT a # b");
    assert_eq!(err.column, 10);
}

#[test]
fn error_malformed_binary_literal() {
    let _ = parse_err("SELECT X'ABC'");
    let _ = parse_err("SELECT X'ZZ'");
}

#[test]
fn error_integer_overflow() {
    let _ = parse_err("SELECT 99999999999999999999");
}

#[test]
fn error_decimal_rejected() {
    let options =
        ParserOptions::new().with_decimal_literal(strata_sql_core::DecimalLiteralTreatment::Reject);
    let err = Parser::with_options("SELECT 1.5", options)
        .parse_statement()
        .unwrap_err();
    assert!(err.message.contains("Unexpected decimal literal"), "{}", err.message);
}

// ===== Token streams =====

#[test]
fn parser_from_external_tokens() {
    let tokens = vec![
        Token::new(TokenKind::Identifier(String::from("a")), "a", Span::new(0, 1), Position::new(1, 1)),
        Token::new(TokenKind::Plus, "+", Span::new(2, 3), Position::new(1, 3)),
        Token::new(TokenKind::Integer(1), "1", Span::new(4, 5), Position::new(1, 5)),
    ];
    let expr = Parser::from_tokens(tokens, ParserOptions::default())
        .parse_expression()
        .unwrap();
    assert_eq!(expr.to_string(), "a + 1");
}
