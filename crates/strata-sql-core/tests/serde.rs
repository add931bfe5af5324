//! Tests for the JSON form of the AST and of parse errors.
#![cfg(feature = "serde")]

mod common;
use common::*;

use serde_json::{json, Value};

#[test]
fn statement_serializes_as_tagged_tree() {
    let value = serde_json::to_value(parse("SELECT a FROM t WHERE a > 1")).unwrap();

    let select = &value["Query"]["body"]["Select"];
    assert_eq!(
        select["items"][0]["Expr"]["expr"]["Column"],
        json!({ "value": "a", "quoted": false })
    );
    assert_eq!(select["from"][0]["Table"]["parts"][0]["value"], "t");
    assert_eq!(select["where_clause"]["Binary"]["right"]["Literal"]["Long"], 1);
    assert_eq!(value["Query"]["limit"], Value::Null);
}

#[test]
fn expression_serializes_with_parameters_numbered() {
    let value = serde_json::to_value(parse_expr("? + ?")).unwrap();
    assert_eq!(value["Binary"]["left"]["Parameter"]["position"], 1);
    assert_eq!(value["Binary"]["right"]["Parameter"]["position"], 2);
}

#[test]
fn parse_error_serializes_its_location() {
    let value = serde_json::to_value(parse_err("SELECT FROM t")).unwrap();
    assert_eq!(value["line"], 1);
    assert_eq!(value["column"], 8);
    assert_eq!(value["offending"], "FROM");
    assert!(value["expected"].as_array().is_some_and(|e| !e.is_empty()));
    assert!(value.get("recoverable").is_none());
}
