#![allow(dead_code)]

use strata_sql_core::ast::{Expr, Query, QueryBody, Relation, Select, Statement};
use strata_sql_core::{ParseError, Parser};

pub fn parse(sql: &str) -> Statement {
    Parser::new(sql)
        .parse_statement()
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e}"))
}

pub fn parse_err(sql: &str) -> ParseError {
    Parser::new(sql)
        .parse_statement()
        .expect_err(&format!("Expected parse error for: {sql}"))
}

pub fn parse_expr(sql: &str) -> Expr {
    Parser::new(sql)
        .parse_expression()
        .unwrap_or_else(|e| panic!("Failed to parse expression: {sql}\nError: {e}"))
}

pub fn parse_expr_err(sql: &str) -> ParseError {
    Parser::new(sql)
        .parse_expression()
        .expect_err(&format!("Expected parse error for expression: {sql}"))
}

pub fn parse_query(sql: &str) -> Query {
    match parse(sql) {
        Statement::Query(query) => *query,
        other => panic!("Expected a query, got {other:?}"),
    }
}

pub fn parse_select(sql: &str) -> Select {
    match parse_query(sql).body {
        QueryBody::Select(select) => *select,
        other => panic!("Expected SELECT, got {other:?}"),
    }
}

/// Returns the single relation of a `SELECT ... FROM <relation>`.
pub fn parse_relation(sql: &str) -> Relation {
    let mut from = parse_select(sql).from;
    assert_eq!(from.len(), 1, "expected one FROM relation in: {sql}");
    from.remove(0)
}

/// Verifies that the canonical rendering re-parses to a structurally equal
/// tree, and that rendering is a fixed point. Returns the rendering.
pub fn round_trip(sql: &str) -> String {
    let ast1 = parse(sql);
    let rendered1 = ast1.to_string();
    let ast2 = Parser::new(&rendered1)
        .parse_statement()
        .unwrap_or_else(|e| panic!("Rendering does not parse.\n  Input: {sql}\n  Rendered: {rendered1}\n  Error: {e}"));
    assert_eq!(
        ast1, ast2,
        "Round-trip changed the tree.\n  Input:    {sql}\n  Rendered: {rendered1}"
    );
    let rendered2 = ast2.to_string();
    assert_eq!(
        rendered1, rendered2,
        "Round-trip failed.\n  Input:    {sql}\n  First:    {rendered1}\n  Second:   {rendered2}"
    );
    rendered1
}

/// Expression variant of [`round_trip`].
pub fn round_trip_expr(sql: &str) -> String {
    let ast1 = parse_expr(sql);
    let rendered = ast1.to_string();
    let ast2 = parse_expr(&rendered);
    assert_eq!(
        ast1, ast2,
        "Round-trip changed the tree.\n  Input:    {sql}\n  Rendered: {rendered}"
    );
    rendered
}
