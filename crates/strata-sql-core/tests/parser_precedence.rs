//! Tests for operator precedence and associativity.

mod common;
use common::*;

use strata_sql_core::ast::{BinaryOp, Expr, Literal, UnaryOp};

fn col(name: &str) -> Expr {
    Expr::column(name)
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    assert_eq!(
        parse_expr("1 + 2 * 3"),
        Expr::long(1).binary(BinaryOp::Add, Expr::long(2).binary(BinaryOp::Mul, Expr::long(3)))
    );
}

#[test]
fn and_binds_tighter_than_or() {
    assert_eq!(
        parse_expr("a OR b AND c"),
        col("a").or(col("b").and(col("c")))
    );
}

#[test]
fn not_binds_tighter_than_and() {
    assert_eq!(
        parse_expr("NOT a AND b"),
        Expr::unary(UnaryOp::Not, col("a")).and(col("b"))
    );
}

#[test]
fn not_applies_to_a_whole_predicate() {
    assert_eq!(
        parse_expr("NOT a = b"),
        Expr::unary(UnaryOp::Not, col("a").binary(BinaryOp::Eq, col("b")))
    );
}

#[test]
fn subtraction_is_left_associative() {
    assert_eq!(
        parse_expr("a - b - c"),
        col("a")
            .binary(BinaryOp::Sub, col("b"))
            .binary(BinaryOp::Sub, col("c"))
    );
}

#[test]
fn division_and_modulo_are_left_associative() {
    assert_eq!(
        parse_expr("a / b % c"),
        col("a")
            .binary(BinaryOp::Div, col("b"))
            .binary(BinaryOp::Mod, col("c"))
    );
}

#[test]
fn or_is_left_associative() {
    assert_eq!(
        parse_expr("a OR b OR c"),
        col("a").or(col("b")).or(col("c"))
    );
}

#[test]
fn concatenation_is_looser_than_addition() {
    assert_eq!(
        parse_expr("a || b + c"),
        col("a").binary(BinaryOp::Concat, col("b").binary(BinaryOp::Add, col("c")))
    );
}

#[test]
fn comparison_is_looser_than_concatenation() {
    assert_eq!(
        parse_expr("a || b = c"),
        col("a")
            .binary(BinaryOp::Concat, col("b"))
            .binary(BinaryOp::Eq, col("c"))
    );
}

#[test]
fn unary_minus_binds_tighter_than_multiplication() {
    assert_eq!(
        parse_expr("-a * b"),
        Expr::unary(UnaryOp::Minus, col("a")).binary(BinaryOp::Mul, col("b"))
    );
}

#[test]
fn negative_literal_is_a_unary_expression() {
    assert_eq!(
        parse_expr("-1"),
        Expr::unary(UnaryOp::Minus, Expr::Literal(Literal::Long(1)))
    );
}

#[test]
fn dereference_binds_tighter_than_unary() {
    assert_eq!(
        parse_expr("-a.b"),
        Expr::unary(UnaryOp::Minus, col("a").field("b"))
    );
}

#[test]
fn at_time_zone_binds_tighter_than_addition() {
    let Expr::Binary { left, op, .. } = parse_expr("ts AT TIME ZONE 'UTC' + x") else {
        panic!("expected a binary expression");
    };
    assert_eq!(op, BinaryOp::Add);
    assert!(matches!(*left, Expr::AtTimeZone { .. }));
}

#[test]
fn between_bounds_are_value_expressions() {
    let Expr::Binary { left, op, right } = parse_expr("x BETWEEN 1 AND 2 AND y") else {
        panic!("expected AND at the top");
    };
    assert_eq!(op, BinaryOp::And);
    assert!(matches!(*left, Expr::Between { negated: false, .. }));
    assert_eq!(*right, col("y"));
}

#[test]
fn predicates_do_not_chain() {
    let _ = parse_expr_err("a = b = c");
    let _ = parse_expr_err("a IS NULL IS NULL");
}

#[test]
fn parentheses_override_precedence() {
    assert_eq!(
        parse_expr("(1 + 2) * 3"),
        Expr::long(1)
            .binary(BinaryOp::Add, Expr::long(2))
            .binary(BinaryOp::Mul, Expr::long(3))
    );
}

#[test]
fn subscript_and_dereference_chain() {
    let expr = parse_expr("a.b[1].c");
    let Expr::Dereference { base, field } = expr else {
        panic!("expected a dereference");
    };
    assert_eq!(field.value, "c");
    assert!(matches!(*base, Expr::Subscript { .. }));
}

#[test]
fn lambda_body_is_a_full_expression() {
    let Expr::Lambda { params, body } = parse_expr("x -> x > 1 AND x < 5") else {
        panic!("expected a lambda");
    };
    assert_eq!(params.len(), 1);
    assert!(matches!(
        *body,
        Expr::Binary {
            op: BinaryOp::And,
            ..
        }
    ));
}
